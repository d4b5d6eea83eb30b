use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::models::{Contestant, Criteria, Judge};

/// Replacement lists for a sub-event's contestants, judges and criteria.
///
/// Entries are matched to existing rows by `id` (string or integer); entries
/// without a usable id become new rows. Entries with an empty name are dropped.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SaveSettingsRequest {
    #[serde(default)]
    pub contestants: Vec<ContestantInput>,
    #[serde(default)]
    pub judges: Vec<JudgeInput>,
    #[serde(default)]
    pub criteria: Vec<CriteriaInput>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ContestantInput {
    #[serde(default)]
    #[schema(value_type = Option<i64>)]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct JudgeInput {
    #[serde(default)]
    #[schema(value_type = Option<i64>)]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub judge_type: Option<String>,
    /// Six-digit code to keep; regenerated when missing, malformed or taken
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub code: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CriteriaInput {
    #[serde(default)]
    #[schema(value_type = Option<i64>)]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<String>,
    /// Percentage weight; unparseable values become 0
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub points: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContestantResponse {
    pub id: i64,
    pub name: String,
    pub order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JudgeResponse {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub judge_type: String,
    /// Only disclosed to the owner of the event
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CriteriaResponse {
    pub id: i64,
    pub name: String,
    pub points: Decimal,
    pub order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SettingsResponse {
    pub sub_event_id: i64,
    pub contestants: Vec<ContestantResponse>,
    pub judges: Vec<JudgeResponse>,
    pub criteria: Vec<CriteriaResponse>,
}

impl From<Contestant> for ContestantResponse {
    fn from(contestant: Contestant) -> Self {
        Self {
            id: contestant.contestant_id,
            name: contestant.name,
            order: contestant.sort_order,
        }
    }
}

impl From<Criteria> for CriteriaResponse {
    fn from(criteria: Criteria) -> Self {
        Self {
            id: criteria.criteria_id,
            name: criteria.name,
            points: criteria.points,
            order: criteria.sort_order,
        }
    }
}

impl JudgeResponse {
    pub fn new(judge: Judge, reveal_code: bool) -> Self {
        Self {
            id: judge.judge_id,
            name: judge.name,
            judge_type: judge.judge_type,
            code: reveal_code.then_some(judge.code),
            order: judge.sort_order,
        }
    }
}

impl SettingsResponse {
    pub fn new(
        sub_event_id: i64,
        contestants: Vec<Contestant>,
        judges: Vec<Judge>,
        criteria: Vec<Criteria>,
        reveal_codes: bool,
    ) -> Self {
        Self {
            sub_event_id,
            contestants: contestants.into_iter().map(Into::into).collect(),
            judges: judges
                .into_iter()
                .map(|judge| JudgeResponse::new(judge, reveal_codes))
                .collect(),
            criteria: criteria.into_iter().map(Into::into).collect(),
        }
    }
}
