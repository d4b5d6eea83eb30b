use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuthToken {
    pub token_key: String,
    pub user_id: i64,
    pub created_at: chrono::NaiveDateTime,
}
