use actix_web::{delete, get, patch, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{permissions, AuthenticatedUser, RequirePermission},
    errors::AppError,
    models::dto::{
        request::DrinkRequest,
        response::{ApiResponse, DrinkDeletedResponse, DrinksResponse},
    },
};

#[get("/drinks")]
pub async fn get_drinks(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let drinks = state.drink_service.list_short().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(DrinksResponse { drinks })))
}

#[get(
    "/drinks-detail",
    wrap = "RequirePermission::new(permissions::GET_DRINKS_DETAIL)"
)]
pub async fn get_drinks_detail(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let drinks = state.drink_service.list_long().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(DrinksResponse { drinks })))
}

#[post("/drinks", wrap = "RequirePermission::new(permissions::POST_DRINKS)")]
pub async fn create_drink(
    state: web::Data<AppState>,
    request: web::Json<DrinkRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let drink = state.drink_service.create_drink(request.into_inner()).await?;
    log::info!("Drink {} created by {}", drink.id, auth.0.sub);
    Ok(HttpResponse::Ok().json(ApiResponse::ok(DrinksResponse {
        drinks: vec![drink],
    })))
}

#[patch("/drinks/{id}", wrap = "RequirePermission::new(permissions::PATCH_DRINKS)")]
pub async fn update_drink(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    request: web::Json<DrinkRequest>,
) -> Result<HttpResponse, AppError> {
    let drink = state
        .drink_service
        .update_drink(id.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(DrinksResponse {
        drinks: vec![drink],
    })))
}

#[delete("/drinks/{id}", wrap = "RequirePermission::new(permissions::DELETE_DRINKS)")]
pub async fn delete_drink(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let delete = state.drink_service.delete_drink(id.into_inner()).await?;
    log::info!("Drink {} deleted by {}", delete, auth.0.sub);
    Ok(HttpResponse::Ok().json(ApiResponse::ok(DrinkDeletedResponse { delete })))
}
