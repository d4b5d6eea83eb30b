use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::models::{JudgeComment, Score};

/// A judge's score sheet: contestant id -> criterion id -> score.
/// Contestants and criteria without stored rows are absent, and so are
/// contestants whose comment is empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct JudgeScoresResponse {
    pub judge_id: i64,
    #[schema(value_type = Object)]
    pub scores: BTreeMap<i64, BTreeMap<i64, Option<i32>>>,
    #[schema(value_type = Object)]
    pub comments: BTreeMap<i64, String>,
}

impl JudgeScoresResponse {
    /// Group stored rows by contestant, then criterion. Empty comments are
    /// omitted from `comments`.
    pub fn from_rows(judge_id: i64, scores: Vec<Score>, comments: Vec<JudgeComment>) -> Self {
        let mut sheet = Self {
            judge_id,
            ..Self::default()
        };

        for score in scores {
            sheet
                .scores
                .entry(score.contestant_id)
                .or_default()
                .insert(score.criteria_id, score.score);
        }

        sheet.comments = comments
            .into_iter()
            .filter(|c| !c.comments.is_empty())
            .map(|c| (c.contestant_id, c.comments))
            .collect();

        sheet
    }
}

/// Documented shape of a score sheet save. The bare contestant map without
/// the `scores` wrapper is accepted too.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SaveScoresRequest {
    /// contestant id -> { criterion id -> score | {score}, "comments": text }
    #[schema(value_type = Object)]
    pub scores: Map<String, Value>,
}

/// One entry of the sheet that could not be saved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ScoreItemError {
    pub contestant_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub criterion_id: Option<String>,
    pub error: String,
}

impl ScoreItemError {
    pub fn contestant(contestant_id: &str, error: impl Into<String>) -> Self {
        Self {
            contestant_id: contestant_id.to_string(),
            criterion_id: None,
            error: error.into(),
        }
    }

    pub fn pair(contestant_id: &str, criterion_id: &str, error: impl Into<String>) -> Self {
        Self {
            contestant_id: contestant_id.to_string(),
            criterion_id: Some(criterion_id.to_string()),
            error: error.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SaveScoresResponse {
    pub message: String,
    pub saved: usize,
    pub comments_saved: usize,
    pub errors: Vec<ScoreItemError>,
}

impl SaveScoresResponse {
    pub fn new(saved: usize, comments_saved: usize, errors: Vec<ScoreItemError>) -> Self {
        let message = if errors.is_empty() {
            format!("Saved {} scores", saved)
        } else {
            format!("Saved {} scores with {} errors", saved, errors.len())
        };

        Self {
            message,
            saved,
            comments_saved,
            errors,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn score(contestant_id: i64, criteria_id: i64, value: Option<i32>) -> Score {
        Score {
            score_id: 0,
            judge_id: 7,
            contestant_id,
            criteria_id,
            score: value,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    fn comment(contestant_id: i64, text: &str) -> JudgeComment {
        JudgeComment {
            judge_id: 7,
            contestant_id,
            comments: text.to_string(),
            updated_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn test_sheet_groups_by_contestant() {
        let sheet = JudgeScoresResponse::from_rows(
            7,
            vec![score(1, 10, Some(80)), score(1, 11, None), score(2, 10, Some(55))],
            vec![comment(1, "Clean routine"), comment(2, "")],
        );

        assert_eq!(sheet.scores[&1][&10], Some(80));
        assert_eq!(sheet.scores[&1][&11], None);
        assert_eq!(sheet.scores[&2].len(), 1);
        assert_eq!(sheet.comments.get(&1).map(String::as_str), Some("Clean routine"));
        assert!(!sheet.comments.contains_key(&2));
    }

    #[test]
    fn test_sheet_serializes_ids_as_keys() {
        let sheet = JudgeScoresResponse::from_rows(7, vec![score(3, 4, Some(90))], vec![]);
        let value = serde_json::to_value(&sheet).unwrap();
        assert_eq!(value["scores"]["3"]["4"], 90);
    }

    #[test]
    fn test_save_response_message() {
        assert_eq!(SaveScoresResponse::new(2, 0, vec![]).message, "Saved 2 scores");
        let partial = SaveScoresResponse::new(1, 0, vec![ScoreItemError::contestant("x", "bad")]);
        assert!(partial.has_errors());
        assert_eq!(partial.message, "Saved 1 scores with 1 errors");
    }
}
