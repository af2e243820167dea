use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::Utc;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{
        request::{ArtistRequest, SearchRequest},
        response::{ApiResponse, ArtistResponse, DeletedResponse},
    },
};

#[get("/artists")]
pub async fn list_artists(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let artists = state.booking_service.list_artists().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(artists)))
}

#[post("/artists/search")]
pub async fn search_artists(
    state: web::Data<AppState>,
    request: web::Json<SearchRequest>,
) -> Result<HttpResponse, AppError> {
    let results = state
        .booking_service
        .search_artists(&request.search_term, Utc::now())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(results)))
}

#[get("/artists/{id}")]
pub async fn get_artist(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let detail = state
        .booking_service
        .artist_detail(id.into_inner(), Utc::now())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(detail)))
}

#[post("/artists")]
pub async fn create_artist(
    state: web::Data<AppState>,
    request: web::Json<ArtistRequest>,
) -> Result<HttpResponse, AppError> {
    let artist = state.booking_service.create_artist(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(ArtistResponse { artist })))
}

#[put("/artists/{id}")]
pub async fn update_artist(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    request: web::Json<ArtistRequest>,
) -> Result<HttpResponse, AppError> {
    let artist = state
        .booking_service
        .update_artist(id.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(ArtistResponse { artist })))
}

#[delete("/artists/{id}")]
pub async fn delete_artist(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let deleted = state.booking_service.delete_artist(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(DeletedResponse { deleted })))
}
