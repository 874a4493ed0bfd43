pub mod memory;
pub mod user_repo;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::User;

pub use memory::MemoryUserStore;
pub use user_repo::PgUserStore;

/// Identity store consumed by the auth service.
///
/// Backing-store faults surface as `AuthError::Database`; they are never
/// swallowed. The adapter performs no retries of its own.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn username_exists(&self, username: &str) -> Result<bool>;
    async fn phone_exists(&self, phone_number: i64) -> Result<bool>;
    async fn email_exists(&self, email: &str) -> Result<bool>;

    /// Insert a single user record. A unique-constraint violation maps to
    /// `AuthError::Conflict` naming the colliding field.
    async fn insert(&self, user: &User) -> Result<()>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;
}
