#![allow(dead_code)]

use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use secrecy::SecretString;
use serde_json::json;
use tokio::sync::RwLock;

use triad_server::{
    app_state::AppState,
    auth::{AuthorizationChecker, JwtService, StaticKeySet},
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{Artist, Category, Drink, Question, RecipePart, Show, Venue},
    repositories::{
        ArtistRepository, CategoryRepository, DrinkRepository, QuestionRepository,
        ShowRepository, VenueRepository,
    },
    services::{BookingService, DrinkService, TriviaService},
};

pub const ISSUER: &str = "https://triad-it.us.auth0.com/";
pub const AUDIENCE: &str = "drinks";
pub const KEY_ID: &str = "test-signing-key";

pub const JWKS_JSON: &str = include_str!("../fixtures/jwks.json");
pub const TRUSTED_PRIVATE_KEY: &str = include_str!("../fixtures/trusted_rsa_private.pem");
pub const UNTRUSTED_PRIVATE_KEY: &str = include_str!("../fixtures/untrusted_rsa_private.pem");

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack
        .to_lowercase()
        .contains(&needle.trim().to_lowercase())
}

// Questions

#[derive(Default)]
pub struct InMemoryQuestionRepository {
    questions: RwLock<BTreeMap<i64, Question>>,
    sequence: AtomicI64,
}

impl InMemoryQuestionRepository {
    pub fn with(questions: Vec<Question>) -> Self {
        let max = questions.iter().map(|q| q.id).max().unwrap_or(0);
        Self {
            questions: RwLock::new(questions.into_iter().map(|q| (q.id, q)).collect()),
            sequence: AtomicI64::new(max),
        }
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn next_id(&self) -> AppResult<i64> {
        Ok(self.sequence.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn find_all(&self) -> AppResult<Vec<Question>> {
        Ok(self.questions.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Question>> {
        Ok(self.questions.read().await.get(&id).cloned())
    }

    async fn find_by_category(&self, category_id: i64) -> AppResult<Vec<Question>> {
        Ok(self
            .questions
            .read()
            .await
            .values()
            .filter(|q| q.category == category_id)
            .cloned()
            .collect())
    }

    async fn search(&self, term: &str) -> AppResult<Vec<Question>> {
        Ok(self
            .questions
            .read()
            .await
            .values()
            .filter(|q| contains_ignore_case(&q.question, term))
            .cloned()
            .collect())
    }

    async fn create(&self, question: Question) -> AppResult<Question> {
        let mut questions = self.questions.write().await;
        if questions.contains_key(&question.id) {
            return Err(AppError::AlreadyExists(format!(
                "Question with id '{}' already exists",
                question.id
            )));
        }
        questions.insert(question.id, question.clone());
        Ok(question)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.questions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Question with id '{}' not found", id)))
    }
}

// Categories

pub struct InMemoryCategoryRepository {
    categories: Vec<Category>,
}

impl InMemoryCategoryRepository {
    pub fn with(categories: Vec<Category>) -> Self {
        Self { categories }
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_all(&self) -> AppResult<Vec<Category>> {
        let mut categories = self.categories.clone();
        categories.sort_by_key(|c| c.id);
        Ok(categories)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Category>> {
        Ok(self.categories.iter().find(|c| c.id == id).cloned())
    }
}

// Drinks

#[derive(Default)]
pub struct InMemoryDrinkRepository {
    drinks: RwLock<BTreeMap<i64, Drink>>,
    sequence: AtomicI64,
}

#[async_trait]
impl DrinkRepository for InMemoryDrinkRepository {
    async fn next_id(&self) -> AppResult<i64> {
        Ok(self.sequence.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn find_all(&self) -> AppResult<Vec<Drink>> {
        Ok(self.drinks.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Drink>> {
        Ok(self.drinks.read().await.get(&id).cloned())
    }

    async fn find_by_title(&self, title: &str) -> AppResult<Option<Drink>> {
        Ok(self
            .drinks
            .read()
            .await
            .values()
            .find(|d| d.title == title)
            .cloned())
    }

    async fn create(&self, drink: Drink) -> AppResult<Drink> {
        let mut drinks = self.drinks.write().await;
        if drinks.values().any(|d| d.title == drink.title) {
            return Err(AppError::AlreadyExists(format!(
                "A drink titled '{}' already exists",
                drink.title
            )));
        }
        drinks.insert(drink.id, drink.clone());
        Ok(drink)
    }

    async fn update(&self, drink: Drink) -> AppResult<Drink> {
        let mut drinks = self.drinks.write().await;
        if !drinks.contains_key(&drink.id) {
            return Err(AppError::NotFound(format!(
                "Drink with id '{}' not found",
                drink.id
            )));
        }
        if drinks
            .values()
            .any(|d| d.title == drink.title && d.id != drink.id)
        {
            return Err(AppError::AlreadyExists(format!(
                "A drink titled '{}' already exists",
                drink.title
            )));
        }
        drinks.insert(drink.id, drink.clone());
        Ok(drink)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.drinks
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Drink with id '{}' not found", id)))
    }
}

// Venues

#[derive(Default)]
pub struct InMemoryVenueRepository {
    venues: RwLock<BTreeMap<i64, Venue>>,
    sequence: AtomicI64,
}

#[async_trait]
impl VenueRepository for InMemoryVenueRepository {
    async fn next_id(&self) -> AppResult<i64> {
        Ok(self.sequence.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn find_all(&self) -> AppResult<Vec<Venue>> {
        let mut venues: Vec<Venue> = self.venues.read().await.values().cloned().collect();
        venues.sort_by(|a, b| (&a.state, &a.city, &a.name).cmp(&(&b.state, &b.city, &b.name)));
        Ok(venues)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Venue>> {
        Ok(self.venues.read().await.get(&id).cloned())
    }

    async fn search_by_name(&self, term: &str) -> AppResult<Vec<Venue>> {
        let mut venues: Vec<Venue> = self
            .venues
            .read()
            .await
            .values()
            .filter(|v| contains_ignore_case(&v.name, term))
            .cloned()
            .collect();
        venues.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(venues)
    }

    async fn create(&self, venue: Venue) -> AppResult<Venue> {
        self.venues.write().await.insert(venue.id, venue.clone());
        Ok(venue)
    }

    async fn update(&self, venue: Venue) -> AppResult<Venue> {
        let mut venues = self.venues.write().await;
        if !venues.contains_key(&venue.id) {
            return Err(AppError::NotFound(format!(
                "Venue with id '{}' not found",
                venue.id
            )));
        }
        venues.insert(venue.id, venue.clone());
        Ok(venue)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.venues
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Venue with id '{}' not found", id)))
    }
}

// Artists

#[derive(Default)]
pub struct InMemoryArtistRepository {
    artists: RwLock<BTreeMap<i64, Artist>>,
    sequence: AtomicI64,
}

#[async_trait]
impl ArtistRepository for InMemoryArtistRepository {
    async fn next_id(&self) -> AppResult<i64> {
        Ok(self.sequence.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn find_all(&self) -> AppResult<Vec<Artist>> {
        Ok(self.artists.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Artist>> {
        Ok(self.artists.read().await.get(&id).cloned())
    }

    async fn search_by_name(&self, term: &str) -> AppResult<Vec<Artist>> {
        let mut artists: Vec<Artist> = self
            .artists
            .read()
            .await
            .values()
            .filter(|a| contains_ignore_case(&a.name, term))
            .cloned()
            .collect();
        artists.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(artists)
    }

    async fn create(&self, artist: Artist) -> AppResult<Artist> {
        self.artists.write().await.insert(artist.id, artist.clone());
        Ok(artist)
    }

    async fn update(&self, artist: Artist) -> AppResult<Artist> {
        let mut artists = self.artists.write().await;
        if !artists.contains_key(&artist.id) {
            return Err(AppError::NotFound(format!(
                "Artist with id '{}' not found",
                artist.id
            )));
        }
        artists.insert(artist.id, artist.clone());
        Ok(artist)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.artists
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Artist with id '{}' not found", id)))
    }
}

// Shows

#[derive(Default)]
pub struct InMemoryShowRepository {
    shows: RwLock<BTreeMap<i64, Show>>,
    sequence: AtomicI64,
}

impl InMemoryShowRepository {
    pub async fn len(&self) -> usize {
        self.shows.read().await.len()
    }
}

#[async_trait]
impl ShowRepository for InMemoryShowRepository {
    async fn next_id(&self) -> AppResult<i64> {
        Ok(self.sequence.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn find_all(&self) -> AppResult<Vec<Show>> {
        Ok(self.shows.read().await.values().cloned().collect())
    }

    async fn find_by_venue(&self, venue_id: i64) -> AppResult<Vec<Show>> {
        Ok(self
            .shows
            .read()
            .await
            .values()
            .filter(|s| s.venue_id == venue_id)
            .cloned()
            .collect())
    }

    async fn find_by_artist(&self, artist_id: i64) -> AppResult<Vec<Show>> {
        Ok(self
            .shows
            .read()
            .await
            .values()
            .filter(|s| s.artist_id == artist_id)
            .cloned()
            .collect())
    }

    async fn create(&self, show: Show) -> AppResult<Show> {
        self.shows.write().await.insert(show.id, show.clone());
        Ok(show)
    }

    async fn delete_by_venue(&self, venue_id: i64) -> AppResult<u64> {
        let mut shows = self.shows.write().await;
        let before = shows.len();
        shows.retain(|_, s| s.venue_id != venue_id);
        Ok((before - shows.len()) as u64)
    }

    async fn delete_by_artist(&self, artist_id: i64) -> AppResult<u64> {
        let mut shows = self.shows.write().await;
        let before = shows.len();
        shows.retain(|_, s| s.artist_id != artist_id);
        Ok((before - shows.len()) as u64)
    }
}

// Wiring

pub fn test_config() -> Config {
    Config {
        mongo_conn_string: SecretString::from("mongodb://localhost:27017".to_string()),
        mongo_db_name: "triad-it".to_string(),
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 8080,
        auth0_domain: "triad-it.us.auth0.com".to_string(),
        api_audience: AUDIENCE.to_string(),
        jwks_url: "https://triad-it.us.auth0.com/.well-known/jwks.json".to_string(),
        jwks_cache_ttl_secs: 600,
        questions_per_page: 10,
    }
}

pub fn test_categories() -> Vec<Category> {
    vec![
        Category::new(1, "Science"),
        Category::new(2, "Art"),
        Category::new(3, "Geography"),
    ]
}

/// 25 questions, ids 1..=25, spread round-robin over the three categories.
pub fn test_questions() -> Vec<Question> {
    (1..=25)
        .map(|id| Question {
            id,
            question: format!("Question number {}", id),
            answer: format!("Answer {}", id),
            category: (id - 1) % 3 + 1,
            difficulty: (id % 5 + 1) as i32,
        })
        .collect()
}

pub fn recipe() -> Vec<RecipePart> {
    vec![
        RecipePart::new("brown", "espresso", 1),
        RecipePart::new("white", "milk", 3),
    ]
}

/// Handles on the in-memory stores behind a test [`AppState`].
pub struct Backend {
    pub questions: Arc<InMemoryQuestionRepository>,
    pub drinks: Arc<InMemoryDrinkRepository>,
    pub venues: Arc<InMemoryVenueRepository>,
    pub artists: Arc<InMemoryArtistRepository>,
    pub shows: Arc<InMemoryShowRepository>,
}

pub fn jwt_service() -> JwtService {
    let keys = StaticKeySet::from_json(JWKS_JSON).expect("fixture JWKS should parse");
    JwtService::new(AuthorizationChecker::new(ISSUER, AUDIENCE), Arc::new(keys))
}

pub fn test_state() -> (AppState, Backend) {
    let config = test_config();

    let backend = Backend {
        questions: Arc::new(InMemoryQuestionRepository::with(test_questions())),
        drinks: Arc::new(InMemoryDrinkRepository::default()),
        venues: Arc::new(InMemoryVenueRepository::default()),
        artists: Arc::new(InMemoryArtistRepository::default()),
        shows: Arc::new(InMemoryShowRepository::default()),
    };

    let trivia = TriviaService::new(
        backend.questions.clone(),
        Arc::new(InMemoryCategoryRepository::with(test_categories())),
        config.questions_per_page,
    );
    let drinks = DrinkService::new(backend.drinks.clone());
    let booking = BookingService::new(
        backend.venues.clone(),
        backend.artists.clone(),
        backend.shows.clone(),
    );

    let state = AppState::from_services(config, trivia, drinks, booking, jwt_service());
    (state, backend)
}

pub fn mint_token(permissions: &[&str], expires_in_secs: i64) -> String {
    mint_token_with_key(permissions, expires_in_secs, TRUSTED_PRIVATE_KEY)
}

pub fn mint_token_with_key(permissions: &[&str], expires_in_secs: i64, private_key_pem: &str) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = json!({
        "sub": "auth0|barista",
        "iss": ISSUER,
        "aud": [AUDIENCE, "https://triad-it.us.auth0.com/userinfo"],
        "iat": now,
        "exp": now + expires_in_secs,
        "permissions": permissions,
    });

    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(KEY_ID.to_string());
    let key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
        .expect("fixture private key should load");
    encode(&header, &claims, &key).expect("token should encode")
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
