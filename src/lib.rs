// Roster Auth Service Library

use std::sync::Arc;

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod security;
pub mod services;

pub use error::{AuthError, Result};

// Re-export commonly used types
pub use db::{MemoryUserStore, PgUserStore, UserStore};
pub use models::User;
pub use security::jwt::TokenService;
pub use services::AuthService;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub tokens: Arc<TokenService>,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, tokens: Arc<TokenService>) -> Self {
        let auth = Arc::new(AuthService::new(store.clone(), tokens.clone()));
        Self {
            store,
            tokens,
            auth,
        }
    }
}
