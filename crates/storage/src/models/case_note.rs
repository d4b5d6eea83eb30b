use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CaseNote {
    pub note_id: i64,
    pub case_id: i64,
    pub author_id: i64,
    pub content: String,
    pub created_at: chrono::NaiveDateTime,
}
