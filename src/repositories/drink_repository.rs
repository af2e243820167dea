use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{IndexOptions, ReplaceOptions},
    Collection, IndexModel,
};

use crate::{
    db::{ensure_id_index, map_write_error, Database},
    errors::{AppError, AppResult},
    models::domain::Drink,
};

const COLLECTION: &str = "drinks";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DrinkRepository: Send + Sync {
    async fn next_id(&self) -> AppResult<i64>;
    async fn find_all(&self) -> AppResult<Vec<Drink>>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Drink>>;
    async fn find_by_title(&self, title: &str) -> AppResult<Option<Drink>>;
    async fn create(&self, drink: Drink) -> AppResult<Drink>;
    async fn update(&self, drink: Drink) -> AppResult<Drink>;
    async fn delete(&self, id: i64) -> AppResult<()>;
}

pub struct MongoDrinkRepository {
    db: Database,
    collection: Collection<Drink>,
}

impl MongoDrinkRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            db: db.clone(),
            collection: db.get_collection(COLLECTION),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        ensure_id_index(&self.collection).await?;

        let title_index = IndexModel::builder()
            .keys(doc! { "title": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("title_unique".to_string())
                    .build(),
            )
            .build();
        self.collection.create_index(title_index).await?;

        Ok(())
    }
}

#[async_trait]
impl DrinkRepository for MongoDrinkRepository {
    async fn next_id(&self) -> AppResult<i64> {
        self.db.next_id(COLLECTION).await
    }

    async fn find_all(&self) -> AppResult<Vec<Drink>> {
        let cursor = self.collection.find(doc! {}).sort(doc! { "id": 1 }).await?;
        let drinks: Vec<Drink> = cursor.try_collect().await?;
        Ok(drinks)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Drink>> {
        let drink = self.collection.find_one(doc! { "id": id }).await?;
        Ok(drink)
    }

    async fn find_by_title(&self, title: &str) -> AppResult<Option<Drink>> {
        let drink = self.collection.find_one(doc! { "title": title }).await?;
        Ok(drink)
    }

    async fn create(&self, drink: Drink) -> AppResult<Drink> {
        self.collection
            .insert_one(&drink)
            .await
            .map_err(|e| map_write_error(e, || title_taken(&drink.title)))?;
        Ok(drink)
    }

    async fn update(&self, drink: Drink) -> AppResult<Drink> {
        let options = ReplaceOptions::builder().upsert(false).build();

        let result = self
            .collection
            .replace_one(doc! { "id": drink.id }, &drink)
            .with_options(options)
            .await
            .map_err(|e| map_write_error(e, || title_taken(&drink.title)))?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Drink with id '{}' not found",
                drink.id
            )));
        }

        Ok(drink)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!("Drink with id '{}' not found", id)));
        }

        Ok(())
    }
}

fn title_taken(title: &str) -> String {
    format!("A drink titled '{}' already exists", title)
}
