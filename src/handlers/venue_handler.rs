use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::Utc;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{
        request::{SearchRequest, VenueRequest},
        response::{ApiResponse, DeletedResponse, VenueResponse},
    },
};

#[get("/venues")]
pub async fn list_venues(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let areas = state.booking_service.venue_areas(Utc::now()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(areas)))
}

#[post("/venues/search")]
pub async fn search_venues(
    state: web::Data<AppState>,
    request: web::Json<SearchRequest>,
) -> Result<HttpResponse, AppError> {
    let results = state
        .booking_service
        .search_venues(&request.search_term, Utc::now())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(results)))
}

#[get("/venues/{id}")]
pub async fn get_venue(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let detail = state
        .booking_service
        .venue_detail(id.into_inner(), Utc::now())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(detail)))
}

#[post("/venues")]
pub async fn create_venue(
    state: web::Data<AppState>,
    request: web::Json<VenueRequest>,
) -> Result<HttpResponse, AppError> {
    let venue = state.booking_service.create_venue(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(VenueResponse { venue })))
}

#[put("/venues/{id}")]
pub async fn update_venue(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    request: web::Json<VenueRequest>,
) -> Result<HttpResponse, AppError> {
    let venue = state
        .booking_service
        .update_venue(id.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(VenueResponse { venue })))
}

#[delete("/venues/{id}")]
pub async fn delete_venue(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let deleted = state.booking_service.delete_venue(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(DeletedResponse { deleted })))
}
