use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::{ensure_id_index, Database},
    errors::AppResult,
    models::domain::Show,
};

const COLLECTION: &str = "shows";

/// Shows are ordered by `start_time` in the services, not here: the stored
/// timestamps are RFC 3339 strings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShowRepository: Send + Sync {
    async fn next_id(&self) -> AppResult<i64>;
    async fn find_all(&self) -> AppResult<Vec<Show>>;
    async fn find_by_venue(&self, venue_id: i64) -> AppResult<Vec<Show>>;
    async fn find_by_artist(&self, artist_id: i64) -> AppResult<Vec<Show>>;
    async fn create(&self, show: Show) -> AppResult<Show>;
    async fn delete_by_venue(&self, venue_id: i64) -> AppResult<u64>;
    async fn delete_by_artist(&self, artist_id: i64) -> AppResult<u64>;
}

pub struct MongoShowRepository {
    db: Database,
    collection: Collection<Show>,
}

impl MongoShowRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            db: db.clone(),
            collection: db.get_collection(COLLECTION),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        ensure_id_index(&self.collection).await?;

        for field in ["venue_id", "artist_id"] {
            let mut keys = mongodb::bson::Document::new();
            keys.insert(field, 1);
            let index = IndexModel::builder()
                .keys(keys)
                .options(IndexOptions::builder().name(format!("{}_idx", field)).build())
                .build();
            self.collection.create_index(index).await?;
        }

        Ok(())
    }
}

#[async_trait]
impl ShowRepository for MongoShowRepository {
    async fn next_id(&self) -> AppResult<i64> {
        self.db.next_id(COLLECTION).await
    }

    async fn find_all(&self) -> AppResult<Vec<Show>> {
        let cursor = self.collection.find(doc! {}).await?;
        let shows: Vec<Show> = cursor.try_collect().await?;
        Ok(shows)
    }

    async fn find_by_venue(&self, venue_id: i64) -> AppResult<Vec<Show>> {
        let cursor = self.collection.find(doc! { "venue_id": venue_id }).await?;
        let shows: Vec<Show> = cursor.try_collect().await?;
        Ok(shows)
    }

    async fn find_by_artist(&self, artist_id: i64) -> AppResult<Vec<Show>> {
        let cursor = self.collection.find(doc! { "artist_id": artist_id }).await?;
        let shows: Vec<Show> = cursor.try_collect().await?;
        Ok(shows)
    }

    async fn create(&self, show: Show) -> AppResult<Show> {
        self.collection.insert_one(&show).await?;
        Ok(show)
    }

    async fn delete_by_venue(&self, venue_id: i64) -> AppResult<u64> {
        let result = self
            .collection
            .delete_many(doc! { "venue_id": venue_id })
            .await?;
        Ok(result.deleted_count)
    }

    async fn delete_by_artist(&self, artist_id: i64) -> AppResult<u64> {
        let result = self
            .collection
            .delete_many(doc! { "artist_id": artist_id })
            .await?;
        Ok(result.deleted_count)
    }
}
