/// Bearer-token extractor
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AuthError;
use crate::models::User;
use crate::AppState;

/// Identity snapshot extracted from a verified bearer token.
///
/// The wrapped record reflects the user at token-issuance time, not current
/// persisted state; handlers needing live data must go back to the store.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .ok_or(AuthError::InvalidToken)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidToken)?;

        let user = state.tokens.authenticate(token).map_err(|e| {
            crate::metrics::inc_token_rejections();
            e
        })?;

        Ok(AuthenticatedUser(user))
    }
}
