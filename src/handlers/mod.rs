pub mod artist_handler;
pub mod drink_handler;
pub mod health_handler;
pub mod show_handler;
pub mod trivia_handler;
pub mod venue_handler;

use actix_web::{error, web, HttpRequest, HttpResponse, ResponseError};

use crate::{errors::AppError, middleware::get_request_id};

/// Registers every route plus the JSON and query extractor settings.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .service(health_handler::health_check)
        .service(health_handler::health_check_ready)
        .service(health_handler::health_check_live)
        // Trivia
        .service(trivia_handler::get_categories)
        .service(trivia_handler::get_questions)
        .service(trivia_handler::delete_question)
        .service(trivia_handler::post_questions)
        .service(trivia_handler::get_category_questions)
        .service(trivia_handler::play_quiz)
        // Cafe
        .service(drink_handler::get_drinks)
        .service(drink_handler::get_drinks_detail)
        .service(drink_handler::create_drink)
        .service(drink_handler::update_drink)
        .service(drink_handler::delete_drink)
        // Booking
        .service(venue_handler::list_venues)
        .service(venue_handler::search_venues)
        .service(venue_handler::get_venue)
        .service(venue_handler::create_venue)
        .service(venue_handler::update_venue)
        .service(venue_handler::delete_venue)
        .service(artist_handler::list_artists)
        .service(artist_handler::search_artists)
        .service(artist_handler::get_artist)
        .service(artist_handler::create_artist)
        .service(artist_handler::update_artist)
        .service(artist_handler::delete_artist)
        .service(show_handler::list_shows)
        .service(show_handler::create_show);
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = match &err {
            error::JsonPayloadError::ContentType => "expected application/json".to_string(),
            other => other.to_string(),
        };
        AppError::InvalidArgument(message).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::InvalidArgument(err.to_string()).into())
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| AppError::InvalidArgument(err.to_string()).into())
}

/// Fallback for unmatched requests. A path that exists under another method
/// is answered with 405, anything else with 404.
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    let request_id = get_request_id(&req).map(|r| r.0).unwrap_or_default();

    if req.resource_map().has_resource(req.path()) {
        log::debug!("Method {} not allowed on {} [{}]", req.method(), req.path(), request_id);
        return AppError::MethodNotAllowed.error_response();
    }

    log::debug!("No route for {} {} [{}]", req.method(), req.path(), request_id);
    AppError::NotFound(format!("No route for {}", req.path())).error_response()
}
