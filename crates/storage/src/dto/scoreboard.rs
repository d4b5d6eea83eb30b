use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ScoreboardParams {
    /// Restrict the averages to a single judge of the sub-event
    pub judge_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScoreboardEntry {
    pub contestant_id: i64,
    pub name: String,
    pub order: i32,
    /// Criterion id -> mean score across judges, null when nobody scored it
    #[schema(value_type = Object)]
    pub criteria: BTreeMap<i64, Option<Decimal>>,
    /// Sum of mean x points / 100
    pub total: Decimal,
    pub rank: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScoreboardResponse {
    pub sub_event_id: i64,
    pub judge_id: Option<i64>,
    pub judges_counted: usize,
    pub entries: Vec<ScoreboardEntry>,
}
