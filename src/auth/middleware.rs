use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures::future::LocalBoxFuture;

use crate::{
    auth::{AuthClaims, JwtService},
    errors::AppError,
};

/// Route middleware that only lets a request through when its bearer token
/// carries `permission`. The decoded claims are stored in request extensions.
pub struct RequirePermission {
    permission: Rc<str>,
}

impl RequirePermission {
    pub fn new(permission: &str) -> Self {
        Self {
            permission: Rc::from(permission),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequirePermission
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequirePermissionService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequirePermissionService {
            service: Rc::new(service),
            permission: Rc::clone(&self.permission),
        }))
    }
}

pub struct RequirePermissionService<S> {
    service: Rc<S>,
    permission: Rc<str>,
}

impl<S, B> Service<ServiceRequest> for RequirePermissionService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let permission = Rc::clone(&self.permission);

        Box::pin(async move {
            let Some(jwt_service) = req.app_data::<web::Data<JwtService>>().cloned() else {
                let err = AppError::InternalError("JWT service not configured".to_string());
                return Ok(req.error_response(err).map_into_right_body());
            };

            let header = req
                .headers()
                .get(AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .map(str::to_owned);

            let claims = match jwt_service.authorize(header.as_deref(), &permission).await {
                Ok(claims) => claims,
                Err(e) => {
                    log::warn!(
                        "Rejected {} {} ({}): {}",
                        req.method(),
                        req.path(),
                        e.code(),
                        e
                    );
                    // The wrapped handler never runs.
                    return Ok(req.error_response(AppError::from(e)).map_into_right_body());
                }
            };

            req.extensions_mut().insert(claims);

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// Extractor for the claims of a request that passed [`RequirePermission`].
pub struct AuthenticatedUser(pub AuthClaims);

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let claims = req
            .extensions()
            .get::<AuthClaims>()
            .cloned()
            .ok_or_else(|| AppError::from(crate::errors::AuthError::MissingToken));

        ready(claims.map(AuthenticatedUser))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::tokens::{mint, test_claims, test_jwt_service};
    use actix_web::{http::StatusCode, test, App, HttpResponse};
    use chrono::Utc;

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.0.sub)
    }

    macro_rules! guarded_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(test_jwt_service()))
                    .service(
                        web::resource("/guarded")
                            .wrap(RequirePermission::new("get:drinks-detail"))
                            .route(web::get().to(whoami)),
                    ),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_missing_token_is_rejected() {
        let app = guarded_app!();
        let req = test::TestRequest::get().uri("/guarded").to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_wrong_scheme_is_bad_request() {
        let app = guarded_app!();
        let req = test::TestRequest::get()
            .uri("/guarded")
            .insert_header((AUTHORIZATION, "Basic dXNlcjpwYXNz"))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_permission_passes_claims_to_handler() {
        let app = guarded_app!();
        let token = mint(&test_claims(
            &["get:drinks-detail"],
            Utc::now().timestamp() + 600,
        ));
        let req = test::TestRequest::get()
            .uri("/guarded")
            .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        assert_eq!(body, "auth0|test-manager");
    }

    #[actix_web::test]
    async fn test_missing_permission_is_forbidden() {
        let app = guarded_app!();
        let token = mint(&test_claims(&["get:drinks"], Utc::now().timestamp() + 600));
        let req = test::TestRequest::get()
            .uri("/guarded")
            .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_extractor_without_middleware_is_unauthorized() {
        let app = test::init_service(App::new().route("/open", web::get().to(whoami))).await;
        let req = test::TestRequest::get().uri("/open").to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
