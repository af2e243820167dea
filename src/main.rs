use actix_cors::Cors;
use actix_web::{
    http::{header, Method},
    middleware::Logger,
    web, App, HttpServer,
};

use triad_server::{
    app_state::AppState, config::Config, handlers, middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    if let Err(e) = config.validate_for_production() {
        if cfg!(debug_assertions) {
            log::warn!("{}", e);
        } else {
            log::error!("{}", e);
            return Err(std::io::Error::other(e.to_string()));
        }
    }

    let bind_address = (config.web_server_host.clone(), config.web_server_port);

    let state = AppState::new(config).await.map_err(|e| {
        log::error!("Failed to initialize application state: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    log::info!(
        "Starting HTTP server on {}:{}",
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec![
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
            .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(state.jwt_service.clone()))
            .wrap(RequestIdMiddleware)
            .wrap(Logger::new("%a \"%r\" %s %b %T [%{x-request-id}o]"))
            .wrap(cors)
            .configure(handlers::configure)
            .default_service(web::route().to(handlers::not_found))
    })
    .bind(bind_address)?
    .run()
    .await
}
