use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer};
use validator::Validate;

use crate::errors::{AppError, AppResult};
use crate::models::domain::RecipePart;

static PHONE_REGEX: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"^\d{3}-\d{3}-\d{4}$").expect("PHONE_REGEX is a valid regex pattern")
});

static STATE_REGEX: Lazy<regex::Regex> =
    Lazy::new(|| regex::Regex::new(r"^[A-Z]{2}$").expect("STATE_REGEX is a valid regex pattern"));

/// `?page=N`. Kept as a raw string so non-numeric input falls back to page 1
/// instead of failing extraction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    pub fn page_number(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .unwrap_or(1)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 1000))]
    pub question: String,

    #[validate(length(min = 1, max = 1000))]
    pub answer: String,

    #[validate(range(min = 1))]
    pub category: i64,

    #[validate(range(min = 1, max = 5))]
    pub difficulty: i32,
}

/// Body of `POST /questions`, which either searches or creates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionsBody {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<i64>,
    pub difficulty: Option<i32>,
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
}

#[derive(Debug, Clone)]
pub enum QuestionsAction {
    Search(String),
    Create(CreateQuestionRequest),
}

impl QuestionsBody {
    pub fn into_action(self) -> AppResult<QuestionsAction> {
        if let Some(term) = self.search_term.filter(|t| !t.trim().is_empty()) {
            return Ok(QuestionsAction::Search(term));
        }

        match (self.question, self.answer, self.category, self.difficulty) {
            (Some(question), Some(answer), Some(category), Some(difficulty)) => {
                let request = CreateQuestionRequest {
                    question,
                    answer,
                    category,
                    difficulty,
                };
                request
                    .validate()
                    .map_err(|e| AppError::Unprocessable(e.to_string()))?;
                Ok(QuestionsAction::Create(request))
            }
            _ => Err(AppError::Unprocessable(
                "question, answer, category and difficulty are required".to_string(),
            )),
        }
    }
}

/// Ids the trivia frontend may send either as numbers or as numeric strings
/// (it builds them from object keys).
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseId {
    Number(i64),
    Text(String),
}

fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match LooseId::deserialize(deserializer)? {
        LooseId::Number(id) => Ok(id),
        LooseId::Text(raw) => raw.trim().parse().map_err(|_| {
            serde::de::Error::custom(format!("expected a numeric id, got {:?}", raw))
        }),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizCategoryDto {
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub id: i64,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub previous_questions: Vec<i64>,
    pub quiz_category: Option<QuizCategoryDto>,
}

/// A recipe is accepted either as a list of parts or as a single part.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RecipeInput {
    Many(Vec<RecipePart>),
    One(RecipePart),
}

impl RecipeInput {
    pub fn into_parts(self) -> Vec<RecipePart> {
        match self {
            RecipeInput::Many(parts) => parts,
            RecipeInput::One(part) => vec![part],
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DrinkRequest {
    pub title: Option<String>,
    pub recipe: Option<RecipeInput>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VenueRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: String,

    #[validate(length(min = 1, max = 120))]
    pub city: String,

    #[validate(regex(path = *STATE_REGEX, message = "State must be a two-letter code"))]
    pub state: String,

    #[validate(length(min = 1, max = 120))]
    pub address: String,

    #[validate(regex(path = *PHONE_REGEX, message = "Phone must look like 123-456-7890"))]
    pub phone: Option<String>,

    #[validate(length(min = 1, message = "At least one genre is required"))]
    pub genres: Vec<String>,

    #[validate(url)]
    pub image_link: Option<String>,

    #[validate(url)]
    pub facebook_link: Option<String>,

    #[validate(url)]
    pub website: Option<String>,

    #[serde(default)]
    pub seeking_talent: bool,

    #[validate(length(max = 500))]
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ArtistRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: String,

    #[validate(length(min = 1, max = 120))]
    pub city: String,

    #[validate(regex(path = *STATE_REGEX, message = "State must be a two-letter code"))]
    pub state: String,

    #[validate(regex(path = *PHONE_REGEX, message = "Phone must look like 123-456-7890"))]
    pub phone: Option<String>,

    #[validate(length(min = 1, message = "At least one genre is required"))]
    pub genres: Vec<String>,

    #[validate(url)]
    pub image_link: Option<String>,

    #[validate(url)]
    pub facebook_link: Option<String>,

    #[validate(url)]
    pub website: Option<String>,

    #[serde(default)]
    pub seeking_venue: bool,

    #[validate(length(max = 500))]
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub search_term: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ShowRequest {
    #[validate(range(min = 1))]
    pub artist_id: i64,

    #[validate(range(min = 1))]
    pub venue_id: i64,

    pub start_time: DateTime<Utc>,
}
