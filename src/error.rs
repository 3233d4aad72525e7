//!
//! # Error Handling
//!
//! `AppError` is the single error type handlers return. It implements
//! `actix_web::error::ResponseError`, so a failed handler is turned into the
//! matching status code with a short plain-text body.
//!
//! The service layers have their own typed errors (`AuthError`, `SessionError`,
//! `TaskError`, `StoreError`). The `From` implementations below decide how much
//! of each one the client gets to see: store failures are logged here and
//! collapsed to a generic 500, login failures are collapsed to one message.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use log::{error, warn};
use std::fmt;
use validator::ValidationErrors;

use crate::auth::{AuthError, SessionError};
use crate::store::StoreError;
use crate::tasks::TaskError;

/// Body sent for every 500 response.
pub const SERVER_ERROR_BODY: &str = "Server error";

/// Body sent when login fails, whichever half of the credentials was wrong.
pub const INVALID_CREDENTIALS_BODY: &str = "Invalid username or password";

/// Represents all errors a request handler can end with.
#[derive(Debug)]
pub enum AppError {
    /// Rejected credentials or a request the server refuses to act on (HTTP 400).
    BadRequest(String),
    /// Missing, malformed or expired session token (HTTP 403).
    Forbidden(String),
    /// The task does not exist or belongs to someone else (HTTP 404).
    NotFound(String),
    /// A request body failed field validation (HTTP 422).
    ValidationError(String),
    /// Failure inside the store (HTTP 500). The message is only logged.
    DatabaseError(String),
    /// Any other server-side failure (HTTP 500). The message is only logged.
    InternalServerError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::BadRequest(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::ValidationError(msg) => msg.clone(),
            AppError::DatabaseError(msg) | AppError::InternalServerError(msg) => {
                error!("{}", msg);
                SERVER_ERROR_BODY.to_string()
            }
        };

        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(body)
    }
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> AppError {
        AppError::DatabaseError(error.to_string())
    }
}

impl From<AuthError> for AppError {
    fn from(error: AuthError) -> AppError {
        match error {
            e @ (AuthError::NotFound | AuthError::InvalidCredentials) => {
                warn!("login rejected: {}", e);
                AppError::BadRequest(INVALID_CREDENTIALS_BODY.into())
            }
            AuthError::Store(e) => e.into(),
            other => AppError::InternalServerError(other.to_string()),
        }
    }
}

impl From<SessionError> for AppError {
    fn from(error: SessionError) -> AppError {
        AppError::Forbidden(error.to_string())
    }
}

impl From<TaskError> for AppError {
    fn from(error: TaskError) -> AppError {
        match error {
            TaskError::NotFound => AppError::NotFound("Task not found".into()),
            TaskError::Store(e) => e.into(),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}
