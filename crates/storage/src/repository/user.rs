use sqlx::PgPool;

use crate::error::{Result, StorageError};
use crate::models::User;
use crate::services::credentials;

const USER_COLUMNS: &str =
    "user_id, username, email, first_name, last_name, password_hash, is_active, created_at";

pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all users
    pub async fn list(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY username",
            USER_COLUMNS
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<User> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE user_id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE username = $1",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Create a user from an already hashed password
    pub async fn create(
        &self,
        username: &str,
        email: &str,
        first_name: &str,
        last_name: &str,
        password_hash: &str,
    ) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (username, email, first_name, last_name, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(username)
        .bind(email)
        .bind(first_name)
        .bind(last_name)
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).on_constraint("Username already exists"))?;

        Ok(user)
    }

    /// Return the user's token, creating one on first login
    pub async fn get_or_create_token(&self, user_id: i64) -> Result<String> {
        let key: String = sqlx::query_scalar(
            r#"
            INSERT INTO auth_tokens (token_key, user_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING token_key
            "#,
        )
        .bind(credentials::generate_token())
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;

        Ok(key)
    }

    /// Resolve a bearer token to an active user
    pub async fn find_by_token(&self, token_key: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT u.user_id, u.username, u.email, u.first_name, u.last_name,
                   u.password_hash, u.is_active, u.created_at
            FROM auth_tokens t
            JOIN users u ON u.user_id = t.user_id
            WHERE t.token_key = $1 AND u.is_active
            "#,
        )
        .bind(token_key)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    pub async fn delete_token(&self, user_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM auth_tokens WHERE user_id = $1")
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
