use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::db::UserStore;
use crate::error::{AuthError, ConflictField, Result};
use crate::models::{RegisterRequest, User};
use crate::security::jwt::TokenService;
use crate::security::password;

/// Registration and login logic, in front of the identity store.
pub struct AuthService {
    store: Arc<dyn UserStore>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, tokens: Arc<TokenService>) -> Self {
        Self { store, tokens }
    }

    /// Register a new user.
    ///
    /// Username, phone and email must each be unique. All three checks run
    /// before any write and every colliding dimension is reported; the
    /// database unique constraints back this up against concurrent
    /// registrations (see the insert path of the store adapter).
    pub async fn register(&self, req: RegisterRequest) -> Result<User> {
        let mut conflicts = Vec::new();
        if self.store.username_exists(&req.username).await? {
            conflicts.push(ConflictField::Username);
        }
        if self.store.phone_exists(req.phone_number).await? {
            conflicts.push(ConflictField::Phone);
        }
        if self.store.email_exists(&req.email).await? {
            conflicts.push(ConflictField::Email);
        }
        if !conflicts.is_empty() {
            tracing::info!(username = %req.username, ?conflicts, "registration rejected");
            return Err(AuthError::Conflict(conflicts));
        }

        let user = User {
            id: Uuid::new_v4(),
            username: req.username,
            phone_number: req.phone_number,
            email: req.email,
            password_hash: password::hash_password(&req.password)?,
            display_name: req.display_name,
            avatar_url: req.avatar_url,
            created_at: Utc::now(),
        };

        self.store.insert(&user).await?;

        tracing::info!(username = %user.username, user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Verify a username/password pair and issue a token on success.
    ///
    /// Unknown username and wrong password produce the same error; the caller
    /// cannot tell which check failed.
    pub async fn login(&self, username: &str, pass: &str) -> Result<String> {
        let user = self
            .store
            .find_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        password::verify_password(pass, &user.password_hash)?;

        let token = self.tokens.issue(&user)?;
        tracing::info!(username = %user.username, user_id = %user.id, "user logged in");
        Ok(token)
    }
}
