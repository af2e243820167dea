use serde::{Deserialize, Serialize};

use crate::models::dto::request::CreateQuestionRequest;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64, // Category id
    pub difficulty: i32,
}

impl Question {
    pub fn from_request(id: i64, request: CreateQuestionRequest) -> Self {
        Question {
            id,
            question: request.question.trim().to_string(),
            answer: request.answer.trim().to_string(),
            category: request.category,
            difficulty: request.difficulty,
        }
    }
}
