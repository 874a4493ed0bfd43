/// Authentication handlers
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AuthError;
use crate::metrics;
use crate::middleware::AuthenticatedUser;
use crate::models::{LoginRequest, LoginResponse, RegisterRequest, User};
use crate::security::jwt::TOKEN_VALIDITY_MINUTES;
use crate::AppState;

/// Error response body shared by all endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Register endpoint handler
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User registered"),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 409, description = "Username, phone or email already registered", body = ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<StatusCode, AuthError> {
    metrics::inc_register_requests();
    payload.validate()?;

    state.auth.register(payload).await.map_err(|e| {
        if matches!(e, AuthError::Conflict(_)) {
            metrics::inc_register_conflicts();
        }
        e
    })?;
    Ok(StatusCode::OK)
}

/// Login endpoint handler
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "User logged in", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    metrics::inc_login_requests();
    payload.validate()?;

    let access_token = state
        .auth
        .login(&payload.username, &payload.password)
        .await
        .map_err(|e| {
            if matches!(e, AuthError::InvalidCredentials) {
                metrics::inc_login_failures();
            }
            e
        })?;

    Ok(Json(LoginResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: TOKEN_VALIDITY_MINUTES * 60,
    }))
}

/// Current-user endpoint handler.
///
/// Returns the identity snapshot embedded in the presented token, i.e. the
/// user as of issuance time.
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Auth",
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Logged-in user", body = User),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
pub async fn me(AuthenticatedUser(user): AuthenticatedUser) -> Json<User> {
    Json(user)
}

/// Username existence probe
#[utoipa::path(
    get,
    path = "/api/v1/users/exists/username/{username}",
    tag = "Users",
    params(("username" = String, Path, description = "Username to check")),
    responses((status = 200, description = "Whether the username is taken", body = bool))
)]
pub async fn username_registered(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<bool>, AuthError> {
    let exists = state.store.username_exists(&username).await?;
    Ok(Json(exists))
}

/// Phone existence probe
#[utoipa::path(
    get,
    path = "/api/v1/users/exists/phone/{phone}",
    tag = "Users",
    params(("phone" = i64, Path, description = "Phone number to check")),
    responses((status = 200, description = "Whether the phone number is taken", body = bool))
)]
pub async fn phone_registered(
    State(state): State<AppState>,
    Path(phone): Path<i64>,
) -> Result<Json<bool>, AuthError> {
    let exists = state.store.phone_exists(phone).await?;
    Ok(Json(exists))
}

/// Email existence probe
#[utoipa::path(
    get,
    path = "/api/v1/users/exists/email/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "Email to check")),
    responses((status = 200, description = "Whether the email is taken", body = bool))
)]
pub async fn email_registered(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<bool>, AuthError> {
    let exists = state.store.email_exists(&email).await?;
    Ok(Json(exists))
}
