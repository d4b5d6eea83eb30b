use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Judge {
    pub judge_id: i64,
    pub sub_event_id: i64,
    pub name: String,
    pub judge_type: String,
    /// Six-digit login code, unique across every judge
    pub code: String,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum JudgeType {
    #[default]
    Judge,
    Chairman,
}

impl JudgeType {
    /// Anything other than "chairman" is a regular judge
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "chairman" => Self::Chairman,
            _ => Self::Judge,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Judge => "judge",
            Self::Chairman => "chairman",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lenient_chairman_any_case() {
        assert_eq!(JudgeType::parse_lenient(Some(" Chairman ")), JudgeType::Chairman);
    }

    #[test]
    fn test_parse_lenient_defaults_to_judge() {
        assert_eq!(JudgeType::parse_lenient(None), JudgeType::Judge);
        assert_eq!(JudgeType::parse_lenient(Some("referee")), JudgeType::Judge);
    }
}
