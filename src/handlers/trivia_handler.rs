use actix_web::{delete, get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{
        request::{PageQuery, QuestionsAction, QuestionsBody, QuizRequest},
        response::{category_map, ApiResponse, CategoriesResponse, CreatedResponse, DeletedResponse},
    },
};

#[get("/categories")]
pub async fn get_categories(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let categories = state.trivia_service.get_categories().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(CategoriesResponse {
        categories: category_map(&categories),
    })))
}

#[get("/questions")]
pub async fn get_questions(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let page = state
        .trivia_service
        .list_questions(query.page_number())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(page)))
}

#[delete("/questions/{id}")]
pub async fn delete_question(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let deleted = state.trivia_service.delete_question(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(DeletedResponse { deleted })))
}

/// Searches when the body carries `searchTerm`, creates a question otherwise.
#[post("/questions")]
pub async fn post_questions(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
    body: web::Json<QuestionsBody>,
) -> Result<HttpResponse, AppError> {
    match body.into_inner().into_action()? {
        QuestionsAction::Search(term) => {
            let page = state
                .trivia_service
                .search_questions(&term, query.page_number())
                .await?;
            Ok(HttpResponse::Ok().json(ApiResponse::ok(page)))
        }
        QuestionsAction::Create(request) => {
            let question = state.trivia_service.create_question(request).await?;
            Ok(HttpResponse::Ok().json(ApiResponse::ok(CreatedResponse {
                created: question.id,
            })))
        }
    }
}

#[get("/categories/{id}/questions")]
pub async fn get_category_questions(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let page = state
        .trivia_service
        .questions_by_category(id.into_inner(), query.page_number())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(page)))
}

#[post("/quizzes")]
pub async fn play_quiz(
    state: web::Data<AppState>,
    request: web::Json<QuizRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .trivia_service
        .next_quiz_question(request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(response)))
}
