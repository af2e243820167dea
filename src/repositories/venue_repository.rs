use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::ReplaceOptions, Collection};

use crate::{
    db::{ensure_id_index, Database},
    errors::{AppError, AppResult},
    models::domain::Venue,
};

use super::contains_ignore_case;

const COLLECTION: &str = "venues";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VenueRepository: Send + Sync {
    async fn next_id(&self) -> AppResult<i64>;
    async fn find_all(&self) -> AppResult<Vec<Venue>>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Venue>>;
    async fn search_by_name(&self, term: &str) -> AppResult<Vec<Venue>>;
    async fn create(&self, venue: Venue) -> AppResult<Venue>;
    async fn update(&self, venue: Venue) -> AppResult<Venue>;
    async fn delete(&self, id: i64) -> AppResult<()>;
}

pub struct MongoVenueRepository {
    db: Database,
    collection: Collection<Venue>,
}

impl MongoVenueRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            db: db.clone(),
            collection: db.get_collection(COLLECTION),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        ensure_id_index(&self.collection).await
    }
}

#[async_trait]
impl VenueRepository for MongoVenueRepository {
    async fn next_id(&self) -> AppResult<i64> {
        self.db.next_id(COLLECTION).await
    }

    async fn find_all(&self) -> AppResult<Vec<Venue>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "state": 1, "city": 1, "name": 1 })
            .await?;
        let venues: Vec<Venue> = cursor.try_collect().await?;
        Ok(venues)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Venue>> {
        let venue = self.collection.find_one(doc! { "id": id }).await?;
        Ok(venue)
    }

    async fn search_by_name(&self, term: &str) -> AppResult<Vec<Venue>> {
        let cursor = self
            .collection
            .find(contains_ignore_case("name", term))
            .sort(doc! { "name": 1 })
            .await?;
        let venues: Vec<Venue> = cursor.try_collect().await?;
        Ok(venues)
    }

    async fn create(&self, venue: Venue) -> AppResult<Venue> {
        self.collection.insert_one(&venue).await?;
        Ok(venue)
    }

    async fn update(&self, venue: Venue) -> AppResult<Venue> {
        let options = ReplaceOptions::builder().upsert(false).build();

        let result = self
            .collection
            .replace_one(doc! { "id": venue.id }, &venue)
            .with_options(options)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Venue with id '{}' not found",
                venue.id
            )));
        }

        Ok(venue)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!("Venue with id '{}' not found", id)));
        }

        Ok(())
    }
}
