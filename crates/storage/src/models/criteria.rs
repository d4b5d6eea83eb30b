use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Criteria {
    pub criteria_id: i64,
    pub sub_event_id: i64,
    pub name: String,
    /// Percentage weight of this criterion in a contestant's total
    pub points: Decimal,
    pub sort_order: i32,
}
