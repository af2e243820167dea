use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::ReplaceOptions, Collection};

use crate::{
    db::{ensure_id_index, Database},
    errors::{AppError, AppResult},
    models::domain::Artist,
};

use super::contains_ignore_case;

const COLLECTION: &str = "artists";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArtistRepository: Send + Sync {
    async fn next_id(&self) -> AppResult<i64>;
    async fn find_all(&self) -> AppResult<Vec<Artist>>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Artist>>;
    async fn search_by_name(&self, term: &str) -> AppResult<Vec<Artist>>;
    async fn create(&self, artist: Artist) -> AppResult<Artist>;
    async fn update(&self, artist: Artist) -> AppResult<Artist>;
    async fn delete(&self, id: i64) -> AppResult<()>;
}

pub struct MongoArtistRepository {
    db: Database,
    collection: Collection<Artist>,
}

impl MongoArtistRepository {
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
impl ArtistRepository for MongoArtistRepository {
    async fn next_id(&self) -> AppResult<i64> {
        self.db.next_id(COLLECTION).await
    }

    async fn find_all(&self) -> AppResult<Vec<Artist>> {
        let cursor = self.collection.find(doc! {}).sort(doc! { "id": 1 }).await?;
        let artists: Vec<Artist> = cursor.try_collect().await?;
        Ok(artists)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Artist>> {
        let artist = self.collection.find_one(doc! { "id": id }).await?;
        Ok(artist)
    }

    async fn search_by_name(&self, term: &str) -> AppResult<Vec<Artist>> {
        let cursor = self
            .collection
            .find(contains_ignore_case("name", term))
            .sort(doc! { "name": 1 })
            .await?;
        let artists: Vec<Artist> = cursor.try_collect().await?;
        Ok(artists)
    }

    async fn create(&self, artist: Artist) -> AppResult<Artist> {
        self.collection.insert_one(&artist).await?;
        Ok(artist)
    }

    async fn update(&self, artist: Artist) -> AppResult<Artist> {
        let options = ReplaceOptions::builder().upsert(false).build();

        let result = self
            .collection
            .replace_one(doc! { "id": artist.id }, &artist)
            .with_options(options)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Artist with id '{}' not found",
                artist.id
            )));
        }

        Ok(artist)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!("Artist with id '{}' not found", id)));
        }

        Ok(())
    }
}
