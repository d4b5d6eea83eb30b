use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Contestant {
    pub contestant_id: i64,
    pub sub_event_id: i64,
    pub name: String,
    pub sort_order: i32,
}
