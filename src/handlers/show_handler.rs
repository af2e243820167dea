use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{
        request::ShowRequest,
        response::{ApiResponse, ShowResponse},
    },
};

#[get("/shows")]
pub async fn list_shows(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let shows = state.booking_service.list_shows().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(shows)))
}

#[post("/shows")]
pub async fn create_show(
    state: web::Data<AppState>,
    request: web::Json<ShowRequest>,
) -> Result<HttpResponse, AppError> {
    let show = state.booking_service.create_show(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(ShowResponse { show })))
}
