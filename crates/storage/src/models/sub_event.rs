use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SubEvent {
    pub sub_event_id: i64,
    pub event_id: i64,
    pub title: String,
    pub date: chrono::NaiveDate,
    pub time: chrono::NaiveTime,
    pub location: String,
    pub status: String,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}
