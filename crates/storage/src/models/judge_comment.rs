use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Free-text remark a judge keeps for one contestant, shared by all criteria
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct JudgeComment {
    pub judge_id: i64,
    pub contestant_id: i64,
    pub comments: String,
    pub updated_at: chrono::NaiveDateTime,
}
