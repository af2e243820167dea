use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};

use crate::{
    db::{ensure_id_index, Database},
    errors::AppResult,
    models::domain::Category,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Category>>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Category>>;
}

pub struct MongoCategoryRepository {
    collection: Collection<Category>,
}

impl MongoCategoryRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("categories");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        ensure_id_index(&self.collection).await
    }
}

#[async_trait]
impl CategoryRepository for MongoCategoryRepository {
    async fn find_all(&self) -> AppResult<Vec<Category>> {
        let cursor = self.collection.find(doc! {}).sort(doc! { "id": 1 }).await?;
        let categories: Vec<Category> = cursor.try_collect().await?;
        Ok(categories)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Category>> {
        let category = self.collection.find_one(doc! { "id": id }).await?;
        Ok(category)
    }
}
