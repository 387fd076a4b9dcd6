use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Db(sqlx::Error),
    Migrate(sqlx::migrate::MigrateError),
    Json(serde_json::Error),
    Config(String),
    Validation(Vec<String>),
    BadRequest(String),
    MethodNotSupported(String),
    NotFound(String),
}

impl AppError {
    /// Stable error code carried in the JSON error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::MethodNotSupported(_) => "METHOD_NOT_SUPPORTED",
            AppError::NotFound(_) => "NOT_FOUND",
            _ => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Db(e) => write!(f, "Database error: {e}"),
            AppError::Migrate(e) => write!(f, "Migration error: {e}"),
            AppError::Json(e) => write!(f, "JSON error: {e}"),
            AppError::Config(e) => write!(f, "Configuration error: {e}"),
            AppError::Validation(errors) => write!(f, "Validation failed: {}", errors.join("; ")),
            AppError::BadRequest(e) => write!(f, "Bad request: {e}"),
            AppError::MethodNotSupported(e) => write!(f, "Method not supported: {e}"),
            AppError::NotFound(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Db(e) => Some(e),
            AppError::Migrate(e) => Some(e),
            AppError::Json(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: ErrorDetail<'a>,
}

#[derive(Serialize)]
struct ErrorDetail<'a> {
    code: &'a str,
    message: String,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::MethodNotSupported(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Store failures were already logged with their context by `db_failure`.
        let message = match self {
            AppError::Db(_) => "Internal Server Error".to_string(),
            AppError::Migrate(_) | AppError::Json(_) | AppError::Config(_) => {
                log::error!("{self}");
                "Internal Server Error".to_string()
            }
            _ => self.to_string(),
        };
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: ErrorDetail { code: self.code(), message },
        })
    }
}

/// Log a store failure under `context` and convert it, for use with `map_err`.
pub fn db_failure(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| {
        log::error!("{context}: {e}");
        AppError::Db(e)
    }
}

/// Log rejected input under `context` and pass the error through, for use with `map_err`.
pub fn rejected(context: &'static str) -> impl FnOnce(AppError) -> AppError {
    move |e| {
        log::warn!("{context}: {e}");
        e
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Db(e)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Json(e)
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        AppError::Migrate(e)
    }
}
