//! Parsing of a judge's score sheet submission.
//!
//! The payload maps contestant ids to an object of criterion ids to scores,
//! plus an optional `comments` string. Problems with individual entries are
//! collected as item errors so the rest of the sheet can still be saved.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::dto::common::parse_id_str;
use crate::dto::scores::ScoreItemError;

pub const MIN_SCORE: i64 = 0;
pub const MAX_SCORE: i64 = 100;

const COMMENTS_KEY: &str = "comments";

/// One parsed score. The keys are kept as sent so errors found later can be
/// reported against them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEntry {
    pub contestant_key: String,
    pub criterion_key: String,
    pub contestant_id: i64,
    pub criteria_id: i64,
    pub score: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentEntry {
    pub contestant_key: String,
    pub contestant_id: i64,
    pub comments: String,
}

#[derive(Debug, Clone, Default)]
pub struct ScoreSubmission {
    pub scores: Vec<ScoreEntry>,
    pub comments: Vec<CommentEntry>,
    pub errors: Vec<ScoreItemError>,
}

impl ScoreSubmission {
    /// Accepts either `{"scores": {...}}` or the bare contestant map.
    /// Returns `None` when the payload is not a JSON object at all.
    pub fn parse(payload: &Value) -> Option<Self> {
        let root = payload.as_object()?;
        let sheet = match root.get("scores") {
            Some(Value::Object(inner)) => inner,
            _ => root,
        };

        let mut submission = ScoreSubmission::default();
        for (contestant_key, entry) in sheet {
            submission.parse_contestant(contestant_key, entry);
        }

        Some(submission)
    }

    fn parse_contestant(&mut self, contestant_key: &str, entry: &Value) {
        let Some(contestant_id) = parse_id_str(contestant_key) else {
            self.errors.push(ScoreItemError::contestant(
                contestant_key,
                "Invalid contestant id",
            ));
            return;
        };

        let Some(fields) = entry.as_object() else {
            self.errors.push(ScoreItemError::contestant(
                contestant_key,
                "Expected an object of criterion scores",
            ));
            return;
        };

        self.parse_comments(contestant_key, contestant_id, fields);

        for (criterion_key, value) in fields.iter().filter(|(k, _)| *k != COMMENTS_KEY) {
            let Some(criteria_id) = parse_id_str(criterion_key) else {
                self.errors.push(ScoreItemError::pair(
                    contestant_key,
                    criterion_key,
                    "Invalid criterion id",
                ));
                continue;
            };

            match parse_score(value) {
                Ok(score) => self.scores.push(ScoreEntry {
                    contestant_key: contestant_key.to_string(),
                    criterion_key: criterion_key.clone(),
                    contestant_id,
                    criteria_id,
                    score,
                }),
                Err(message) => {
                    self.errors
                        .push(ScoreItemError::pair(contestant_key, criterion_key, message))
                }
            }
        }
    }

    fn parse_comments(&mut self, contestant_key: &str, contestant_id: i64, fields: &Map<String, Value>) {
        let comments = match fields.get(COMMENTS_KEY) {
            None => return,
            Some(Value::String(text)) => text.clone(),
            Some(Value::Null) => String::new(),
            Some(_) => {
                self.errors.push(ScoreItemError::contestant(
                    contestant_key,
                    "Comments must be a string",
                ));
                return;
            }
        };

        self.comments.push(CommentEntry {
            contestant_key: contestant_key.to_string(),
            contestant_id,
            comments,
        });
    }

    /// Move entries naming contestants or criteria outside the judge's
    /// sub-event into the error list.
    pub fn retain_known(&mut self, contestants: &HashSet<i64>, criteria: &HashSet<i64>) {
        let mut unknown = Vec::new();

        self.scores.retain(|entry| {
            let error = if !contestants.contains(&entry.contestant_id) {
                Some("Contestant not found")
            } else if !criteria.contains(&entry.criteria_id) {
                Some("Criterion not found")
            } else {
                None
            };

            match error {
                Some(message) => {
                    unknown.push(ScoreItemError::pair(
                        &entry.contestant_key,
                        &entry.criterion_key,
                        message,
                    ));
                    false
                }
                None => true,
            }
        });

        self.comments.retain(|entry| {
            let known = contestants.contains(&entry.contestant_id);
            if !known {
                unknown.push(ScoreItemError::contestant(
                    &entry.contestant_key,
                    "Contestant not found",
                ));
            }
            known
        });

        self.errors.extend(unknown);
    }
}

/// A score is either a bare value or `{"score": value}`. Null, empty strings
/// and a missing `score` key clear the score.
pub fn parse_score(value: &Value) -> Result<Option<i32>, String> {
    let value = match value {
        Value::Object(wrapper) => wrapper.get("score").unwrap_or(&Value::Null),
        other => other,
    };

    let raw = match value {
        Value::Null => return Ok(None),
        Value::String(s) if s.trim().is_empty() => return Ok(None),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("Score must be an integer, got {:?}", s))?,
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i,
            (None, Some(f)) if f.fract() == 0.0 && f.abs() <= i64::MAX as f64 => f as i64,
            _ => return Err(format!("Score must be an integer, got {}", n)),
        },
        other => return Err(format!("Score must be an integer, got {}", other)),
    };

    if !(MIN_SCORE..=MAX_SCORE).contains(&raw) {
        return Err(format!(
            "Score must be between {} and {}, got {}",
            MIN_SCORE, MAX_SCORE, raw
        ));
    }

    Ok(Some(raw as i32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_score_shapes() {
        assert_eq!(parse_score(&json!(85)), Ok(Some(85)));
        assert_eq!(parse_score(&json!("85")), Ok(Some(85)));
        assert_eq!(parse_score(&json!({"score": 70})), Ok(Some(70)));
        assert_eq!(parse_score(&json!({"score": "0"})), Ok(Some(0)));
        assert_eq!(parse_score(&json!(100.0)), Ok(Some(100)));
    }

    #[test]
    fn test_parse_score_empty_clears() {
        assert_eq!(parse_score(&json!(null)), Ok(None));
        assert_eq!(parse_score(&json!("")), Ok(None));
        assert_eq!(parse_score(&json!("   ")), Ok(None));
        assert_eq!(parse_score(&json!({"score": null})), Ok(None));
        assert_eq!(parse_score(&json!({})), Ok(None));
    }

    #[test]
    fn test_parse_score_out_of_range() {
        assert!(parse_score(&json!(150)).is_err());
        assert!(parse_score(&json!(-1)).is_err());
        assert!(parse_score(&json!("101")).is_err());
    }

    #[test]
    fn test_parse_score_not_an_integer() {
        assert!(parse_score(&json!(85.5)).is_err());
        assert!(parse_score(&json!("eighty")).is_err());
        assert!(parse_score(&json!(true)).is_err());
        assert!(parse_score(&json!([1])).is_err());
    }

    fn triples(sub: &ScoreSubmission) -> Vec<(i64, i64, Option<i32>)> {
        sub.scores
            .iter()
            .map(|e| (e.contestant_id, e.criteria_id, e.score))
            .collect()
    }

    #[test]
    fn test_submission_with_wrapper() {
        let payload = json!({
            "scores": {
                "3": {"10": 90, "11": {"score": "75"}, "comments": "Strong finish"},
                "4": {"10": null}
            }
        });

        let sub = ScoreSubmission::parse(&payload).unwrap();

        assert!(sub.errors.is_empty());
        let triples = triples(&sub);
        assert_eq!(triples.len(), 3);
        assert!(triples.contains(&(3, 11, Some(75))));
        assert!(triples.contains(&(4, 10, None)));
        assert_eq!(sub.comments.len(), 1);
        assert_eq!(sub.comments[0].contestant_id, 3);
        assert_eq!(sub.comments[0].comments, "Strong finish");
    }

    #[test]
    fn test_submission_without_wrapper() {
        let payload = json!({ "7": {"1": 50} });
        let sub = ScoreSubmission::parse(&payload).unwrap();
        assert_eq!(sub.scores.len(), 1);
        assert_eq!(sub.scores[0].contestant_id, 7);
    }

    #[test]
    fn test_submission_partial_errors_keep_valid_pairs() {
        let payload = json!({
            "scores": {
                "1": {"10": 150, "11": 60},
                "abc": {"10": 5},
                "2": "not an object",
                "3": {"x": 5, "comments": 12}
            }
        });

        let sub = ScoreSubmission::parse(&payload).unwrap();

        assert_eq!(triples(&sub), vec![(1, 11, Some(60))]);
        assert_eq!(sub.errors.len(), 5);
        let out_of_range = sub
            .errors
            .iter()
            .find(|e| e.contestant_id == "1")
            .unwrap();
        assert_eq!(out_of_range.criterion_id.as_deref(), Some("10"));
    }

    #[test]
    fn test_null_comments_clear() {
        let payload = json!({ "scores": { "1": {"comments": null} } });
        let sub = ScoreSubmission::parse(&payload).unwrap();
        assert_eq!(sub.comments[0].comments, "");
    }

    #[test]
    fn test_non_object_payload() {
        assert!(ScoreSubmission::parse(&json!([1, 2])).is_none());
        assert!(ScoreSubmission::parse(&json!("x")).is_none());
    }

    #[test]
    fn test_retain_known_moves_foreign_ids_to_errors() {
        let payload = json!({
            "scores": {
                "1": {"10": 80, "99": 70, "comments": "ok"},
                "2": {"10": 60, "comments": "who?"}
            }
        });
        let mut sub = ScoreSubmission::parse(&payload).unwrap();

        sub.retain_known(&HashSet::from([1]), &HashSet::from([10]));

        assert_eq!(sub.scores.len(), 1);
        assert_eq!(sub.scores[0].criteria_id, 10);
        assert_eq!(sub.comments.len(), 1);
        assert_eq!(sub.comments[0].contestant_id, 1);
        assert_eq!(sub.errors.len(), 3);
    }

    #[test]
    fn test_unknown_ids_reported_with_submitted_keys() {
        let payload = json!({
            "scores": {
                " 07": {"010": 80, "comments": "late"}
            }
        });
        let mut sub = ScoreSubmission::parse(&payload).unwrap();
        assert_eq!(sub.scores[0].contestant_id, 7);

        sub.retain_known(&HashSet::new(), &HashSet::new());

        assert!(sub.scores.is_empty());
        assert!(sub.comments.is_empty());
        assert_eq!(
            sub.errors,
            vec![
                ScoreItemError::pair(" 07", "010", "Contestant not found"),
                ScoreItemError::contestant(" 07", "Contestant not found"),
            ]
        );
    }
}
