use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// Identity field that can collide during registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictField {
    Username,
    Phone,
    Email,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Duplicate identity fields: {0:?}")]
    Conflict(Vec<ConflictField>),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, AuthError>;

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        // Credential and token failures share a generic 401 body: the response
        // must not reveal which check rejected the request.
        let (status, body) = match self {
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": "Invalid username or password" }),
            ),
            AuthError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": "Invalid or expired token" }),
            ),
            AuthError::Conflict(fields) => (
                StatusCode::CONFLICT,
                json!({
                    "error": "Username, phone or email already registered",
                    "fields": fields
                }),
            ),
            AuthError::Validation(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AuthError::Database(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": format!("DB error: {}", msg) }),
            ),
            AuthError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg }))
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        AuthError::Database(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(_err: jsonwebtoken::errors::Error) -> Self {
        AuthError::InvalidToken
    }
}

impl From<validator::ValidationErrors> for AuthError {
    fn from(err: validator::ValidationErrors) -> Self {
        AuthError::Validation(err.to_string())
    }
}
