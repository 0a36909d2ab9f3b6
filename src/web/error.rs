//! HTTP error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use super::pages;
use super::paths::{found, login_redirect};
use crate::error::NotesError;
use crate::service::ServiceError;

#[derive(Debug)]
pub enum AppError {
    /// Send the browser to the login page, then back to `next`
    LoginRequired { next: String },
    NotFound,
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::LoginRequired { next } => found(&login_redirect(&next)),
            AppError::NotFound => (StatusCode::NOT_FOUND, pages::not_found()).into_response(),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::Internal(msg) => {
                error!(error = %msg, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Unauthenticated { next } => AppError::LoginRequired { next },
            ServiceError::NotFound => AppError::NotFound,
            ServiceError::Invalid(errors) => AppError::BadRequest(format!("{:?}", errors)),
            ServiceError::Store(e) => e.into(),
        }
    }
}

impl From<NotesError> for AppError {
    fn from(err: NotesError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("Background task failed: {}", err))
    }
}
