/// In-memory user store for tests and local development
use std::sync::Mutex;

use async_trait::async_trait;

use crate::db::UserStore;
use crate::error::{AuthError, ConflictField, Result};
use crate::models::User;

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records. Used by tests to assert write counts.
    pub fn len(&self) -> usize {
        self.users.lock().expect("user store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn username_exists(&self, username: &str) -> Result<bool> {
        let users = self.users.lock().expect("user store lock poisoned");
        Ok(users.iter().any(|u| u.username == username))
    }

    async fn phone_exists(&self, phone_number: i64) -> Result<bool> {
        let users = self.users.lock().expect("user store lock poisoned");
        Ok(users.iter().any(|u| u.phone_number == phone_number))
    }

    async fn email_exists(&self, email: &str) -> Result<bool> {
        let users = self.users.lock().expect("user store lock poisoned");
        Ok(users.iter().any(|u| u.email == email))
    }

    async fn insert(&self, user: &User) -> Result<()> {
        let mut users = self.users.lock().expect("user store lock poisoned");
        // Same uniqueness guarantee the Postgres constraints give, held under
        // the store lock.
        let mut fields = Vec::new();
        if users.iter().any(|u| u.username == user.username) {
            fields.push(ConflictField::Username);
        }
        if users.iter().any(|u| u.phone_number == user.phone_number) {
            fields.push(ConflictField::Phone);
        }
        if users.iter().any(|u| u.email == user.email) {
            fields.push(ConflictField::Email);
        }
        if !fields.is_empty() {
            return Err(AuthError::Conflict(fields));
        }

        users.push(user.clone());
        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let users = self.users.lock().expect("user store lock poisoned");
        Ok(users.iter().find(|u| u.username == username).cloned())
    }
}
