use std::collections::HashSet;
use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Category, Question},
        dto::{
            request::{CreateQuestionRequest, QuizRequest},
            response::{category_map, QuestionListResponse, QuizResponse},
        },
    },
    repositories::{CategoryRepository, QuestionRepository},
    services::{
        pagination::paginate,
        quiz_picker::{pick_question, CategoryFilter},
    },
};

pub struct TriviaService {
    questions: Arc<dyn QuestionRepository>,
    categories: Arc<dyn CategoryRepository>,
    page_size: i64,
}

impl TriviaService {
    pub fn new(
        questions: Arc<dyn QuestionRepository>,
        categories: Arc<dyn CategoryRepository>,
        page_size: i64,
    ) -> Self {
        Self {
            questions,
            categories,
            page_size,
        }
    }

    /// Refuses to start when a stored category could be confused with the
    /// "all categories" quiz value.
    pub async fn ensure_no_sentinel_collision(&self) -> AppResult<()> {
        let categories = self.categories.find_all().await?;
        if let Some(category) = categories.iter().find(|c| c.id <= 0) {
            return Err(AppError::InternalError(format!(
                "Category '{}' has non-positive id {}",
                category.kind, category.id
            )));
        }
        Ok(())
    }

    pub async fn get_categories(&self) -> AppResult<Vec<Category>> {
        let categories = self.categories.find_all().await?;
        if categories.is_empty() {
            return Err(AppError::NotFound("No categories found".to_string()));
        }
        Ok(categories)
    }

    pub async fn list_questions(&self, page: i64) -> AppResult<QuestionListResponse> {
        let all = self.questions.find_all().await?;
        let current = paginate(&all, page, self.page_size)?;
        if current.is_empty() {
            return Err(AppError::NotFound(format!("Page {} has no questions", page)));
        }

        let categories = self.categories.find_all().await?;

        Ok(QuestionListResponse {
            questions: current.to_vec(),
            total_questions: all.len(),
            categories: Some(category_map(&categories)),
            current_category: None,
        })
    }

    pub async fn search_questions(&self, term: &str, page: i64) -> AppResult<QuestionListResponse> {
        let matches = self.questions.search(term.trim()).await?;
        let current = paginate(&matches, page, self.page_size)?;

        Ok(QuestionListResponse {
            questions: current.to_vec(),
            total_questions: matches.len(),
            categories: None,
            current_category: None,
        })
    }

    pub async fn questions_by_category(
        &self,
        category_id: i64,
        page: i64,
    ) -> AppResult<QuestionListResponse> {
        if self.categories.find_by_id(category_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Category with id '{}' not found",
                category_id
            )));
        }

        let in_category = self.questions.find_by_category(category_id).await?;
        let current = paginate(&in_category, page, self.page_size)?;
        if current.is_empty() {
            return Err(AppError::NotFound(format!(
                "Category '{}' has no questions on page {}",
                category_id, page
            )));
        }

        Ok(QuestionListResponse {
            questions: current.to_vec(),
            total_questions: in_category.len(),
            categories: None,
            current_category: Some(category_id),
        })
    }

    pub async fn create_question(&self, request: CreateQuestionRequest) -> AppResult<Question> {
        if self.categories.find_by_id(request.category).await?.is_none() {
            return Err(AppError::Unprocessable(format!(
                "Category with id '{}' does not exist",
                request.category
            )));
        }

        let id = self.questions.next_id().await?;
        let question = self
            .questions
            .create(Question::from_request(id, request))
            .await?;

        log::info!("Created question {} in category {}", question.id, question.category);
        Ok(question)
    }

    pub async fn delete_question(&self, id: i64) -> AppResult<i64> {
        self.questions.delete(id).await?;
        log::info!("Deleted question {}", id);
        Ok(id)
    }

    /// Serves the next quiz question and returns the session's updated
    /// history. Duplicate ids in the incoming history are dropped.
    pub async fn next_quiz_question(&self, request: QuizRequest) -> AppResult<QuizResponse> {
        let category = request.quiz_category.ok_or_else(|| {
            AppError::InvalidArgument("quiz_category is required".to_string())
        })?;
        let filter = CategoryFilter::from_wire(category.id)?;

        let pool = match filter {
            CategoryFilter::All => self.questions.find_all().await?,
            CategoryFilter::Category(id) => self.questions.find_by_category(id).await?,
        };

        let mut seen = HashSet::new();
        let mut previous_questions: Vec<i64> = request
            .previous_questions
            .into_iter()
            .filter(|id| seen.insert(*id))
            .collect();

        let question = pick_question(&pool, filter, &seen)?.clone();
        previous_questions.push(question.id);

        Ok(QuizResponse {
            previous_questions,
            question,
        })
    }
}
