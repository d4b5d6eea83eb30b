use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Event {
    pub event_id: i64,
    pub title: String,
    pub year: i32,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub location: String,
    pub status: String,
    pub created_by: i64,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

/// Lifecycle shared by events and sub-events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Deactivated,
    Activated,
    Completed,
}

impl EventStatus {
    pub const ALL: &'static [&'static str] = &["deactivated", "activated", "completed"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deactivated => "deactivated",
            Self::Activated => "activated",
            Self::Completed => "completed",
        }
    }
}
