use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

/// Reasons a bearer credential is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Authorization header is expected")]
    MissingToken,

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Invalid claims: {0}")]
    InvalidClaims(String),

    #[error("Incorrect claims, check the audience and issuer: {0}")]
    ClaimsMismatch(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,

    #[error("Permission '{0}' not found")]
    PermissionDenied(String),

    #[error("Unable to load signing keys: {0}")]
    KeySetUnavailable(String),
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "authorization_header_missing",
            AuthError::InvalidHeader(_) => "invalid_header",
            AuthError::InvalidClaims(_) | AuthError::ClaimsMismatch(_) => "invalid_claims",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::Expired => "token_expired",
            AuthError::PermissionDenied(_) => "permission_not_found",
            AuthError::KeySetUnavailable(_) => "key_set_unavailable",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingToken
            | AuthError::ClaimsMismatch(_)
            | AuthError::InvalidSignature
            | AuthError::Expired => StatusCode::UNAUTHORIZED,
            AuthError::InvalidHeader(_) | AuthError::InvalidClaims(_) => StatusCode::BAD_REQUEST,
            AuthError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            AuthError::KeySetUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl AppError {
    fn message(&self) -> String {
        match self {
            AppError::NotFound(_) => "resource not found".to_string(),
            AppError::AlreadyExists(_) => "conflict".to_string(),
            AppError::ValidationError(_) | AppError::InvalidArgument(_) => {
                "bad request".to_string()
            }
            AppError::Unprocessable(_) => "unprocessable".to_string(),
            AppError::MethodNotAllowed => "method not allowed".to_string(),
            AppError::Auth(err) => err.to_string(),
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                "internal server error".to_string()
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AlreadyExists(_) => StatusCode::CONFLICT,
            AppError::ValidationError(_) | AppError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            AppError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Auth(err) => err.status_code(),
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{}", self);
        }

        // Internal failure details stay in the log.
        let detail = match self {
            AppError::DatabaseError(_) | AppError::InternalError(_) | AppError::Auth(_) => None,
            AppError::MethodNotAllowed => None,
            other => Some(other.to_string()),
        };

        HttpResponse::build(status).json(ErrorResponse {
            success: false,
            error: status.as_u16(),
            message: self.message(),
            code: match self {
                AppError::Auth(err) => Some(err.code()),
                _ => None,
            },
            detail,
        })
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for AppError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        AppError::InternalError(format!("BSON serialization error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
