use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        MongoArtistRepository, MongoCategoryRepository, MongoDrinkRepository,
        MongoQuestionRepository, MongoShowRepository, MongoVenueRepository,
    },
    services::{BookingService, DrinkService, TriviaService},
};

#[derive(Clone)]
pub struct AppState {
    pub trivia_service: Arc<TriviaService>,
    pub drink_service: Arc<DrinkService>,
    pub booking_service: Arc<BookingService>,
    pub jwt_service: JwtService,
    /// `None` when the services run on non-Mongo repositories.
    pub db: Option<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let question_repository = Arc::new(MongoQuestionRepository::new(&db));
        question_repository.ensure_indexes().await?;
        let category_repository = Arc::new(MongoCategoryRepository::new(&db));
        category_repository.ensure_indexes().await?;
        let trivia_service = Arc::new(TriviaService::new(
            question_repository,
            category_repository,
            config.questions_per_page,
        ));
        trivia_service.ensure_no_sentinel_collision().await?;

        let drink_repository = Arc::new(MongoDrinkRepository::new(&db));
        drink_repository.ensure_indexes().await?;
        let drink_service = Arc::new(DrinkService::new(drink_repository));

        let venue_repository = Arc::new(MongoVenueRepository::new(&db));
        venue_repository.ensure_indexes().await?;
        let artist_repository = Arc::new(MongoArtistRepository::new(&db));
        artist_repository.ensure_indexes().await?;
        let show_repository = Arc::new(MongoShowRepository::new(&db));
        show_repository.ensure_indexes().await?;
        let booking_service = Arc::new(BookingService::new(
            venue_repository,
            artist_repository,
            show_repository,
        ));

        let jwt_service = JwtService::from_config(&config);

        Ok(Self {
            trivia_service,
            drink_service,
            booking_service,
            jwt_service,
            db: Some(db),
            config: Arc::new(config),
        })
    }

    /// Assembles a state from already-built services, without a database
    /// handle.
    pub fn from_services(
        config: Config,
        trivia_service: TriviaService,
        drink_service: DrinkService,
        booking_service: BookingService,
        jwt_service: JwtService,
    ) -> Self {
        Self {
            trivia_service: Arc::new(trivia_service),
            drink_service: Arc::new(drink_service),
            booking_service: Arc::new(booking_service),
            jwt_service,
            db: None,
            config: Arc::new(config),
        }
    }
}
