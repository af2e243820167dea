use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};

use crate::{
    db::{ensure_id_index, Database},
    errors::{AppError, AppResult},
    models::domain::Question,
};

use super::contains_ignore_case;

const COLLECTION: &str = "questions";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn next_id(&self) -> AppResult<i64>;
    async fn find_all(&self) -> AppResult<Vec<Question>>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Question>>;
    async fn find_by_category(&self, category_id: i64) -> AppResult<Vec<Question>>;
    async fn search(&self, term: &str) -> AppResult<Vec<Question>>;
    async fn create(&self, question: Question) -> AppResult<Question>;
    async fn delete(&self, id: i64) -> AppResult<()>;
}

pub struct MongoQuestionRepository {
    db: Database,
    collection: Collection<Question>,
}

impl MongoQuestionRepository {
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
impl QuestionRepository for MongoQuestionRepository {
    async fn next_id(&self) -> AppResult<i64> {
        self.db.next_id(COLLECTION).await
    }

    async fn find_all(&self) -> AppResult<Vec<Question>> {
        let cursor = self.collection.find(doc! {}).sort(doc! { "id": 1 }).await?;
        let questions: Vec<Question> = cursor.try_collect().await?;
        Ok(questions)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Question>> {
        let question = self.collection.find_one(doc! { "id": id }).await?;
        Ok(question)
    }

    async fn find_by_category(&self, category_id: i64) -> AppResult<Vec<Question>> {
        let cursor = self
            .collection
            .find(doc! { "category": category_id })
            .sort(doc! { "id": 1 })
            .await?;
        let questions: Vec<Question> = cursor.try_collect().await?;
        Ok(questions)
    }

    async fn search(&self, term: &str) -> AppResult<Vec<Question>> {
        let cursor = self
            .collection
            .find(contains_ignore_case("question", term))
            .sort(doc! { "id": 1 })
            .await?;
        let questions: Vec<Question> = cursor.try_collect().await?;
        Ok(questions)
    }

    async fn create(&self, question: Question) -> AppResult<Question> {
        self.collection.insert_one(&question).await?;
        Ok(question)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!(
                "Question with id '{}' not found",
                id
            )));
        }

        Ok(())
    }
}
