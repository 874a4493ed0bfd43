/// HTTP request handlers (REST API)
pub mod auth;

// Re-export handlers for easy access
pub use auth::{
    email_registered, login, me, phone_registered, register, username_registered, ErrorResponse,
};
