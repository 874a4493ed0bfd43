/// Postgres-backed user store
use async_trait::async_trait;
use sqlx::PgPool;

use crate::db::UserStore;
use crate::error::{AuthError, ConflictField, Result};
use crate::models::User;

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn username_exists(&self, username: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn phone_exists(&self, phone_number: i64) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE phone_number = $1)",
        )
        .bind(phone_number)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn email_exists(&self, email: &str) -> Result<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn insert(&self, user: &User) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, phone_number, email, password_hash, display_name, avatar_url, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(user.phone_number)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.display_name)
        .bind(&user.avatar_url)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(translate_insert_error)?;

        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }
}

/// The guard's check-then-insert is not atomic against concurrent
/// registrations; the unique constraints on `users` are the second line of
/// defense, surfaced as the same structured conflict.
fn translate_insert_error(err: sqlx::Error) -> AuthError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            let field = match db_err.constraint() {
                Some(c) if c.contains("username") => ConflictField::Username,
                Some(c) if c.contains("phone") => ConflictField::Phone,
                _ => ConflictField::Email,
            };
            return AuthError::Conflict(vec![field]);
        }
    }
    AuthError::Database(err.to_string())
}
