//! Reconciles a sub-event's stored contestants, judges and criteria with a
//! submitted replacement list.
//!
//! Building the plan is pure: it decides which rows are updated in place,
//! which are inserted, which are deleted and which code every judge ends up
//! with. `SettingsRepository::save` executes it inside one transaction.

use std::collections::HashSet;
use std::str::FromStr;

use rand::Rng;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::dto::common::parse_id;
use crate::dto::settings::SaveSettingsRequest;
use crate::error::Result;
use crate::models::{Contestant, Criteria, Judge, JudgeType};
use crate::services::judge_code;

/// Largest magnitude a NUMERIC(6, 2) column can hold
const MAX_POINTS: Decimal = Decimal::from_parts(999_999, 0, 0, false, 2);

/// One row of the target state. `existing_id` is set when the row updates a
/// stored record in place.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedRow<T> {
    pub existing_id: Option<i64>,
    pub order: i32,
    pub fields: T,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContestantFields {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JudgeFields {
    pub name: String,
    pub judge_type: JudgeType,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CriteriaFields {
    pub name: String,
    pub points: Decimal,
}

/// Rows currently stored for the sub-event
#[derive(Debug, Clone, Copy)]
pub struct CurrentSettings<'a> {
    pub contestants: &'a [Contestant],
    pub judges: &'a [Judge],
    pub criteria: &'a [Criteria],
}

#[derive(Debug, Clone, Default)]
pub struct SettingsPlan {
    pub contestants: Vec<PlannedRow<ContestantFields>>,
    pub judges: Vec<PlannedRow<JudgeFields>>,
    pub criteria: Vec<PlannedRow<CriteriaFields>>,
    pub delete_contestants: Vec<i64>,
    pub delete_judges: Vec<i64>,
    pub delete_criteria: Vec<i64>,
}

impl SettingsPlan {
    /// `foreign_codes` holds the codes of every judge outside this sub-event.
    pub fn build<R: Rng>(
        request: &SaveSettingsRequest,
        current: CurrentSettings<'_>,
        foreign_codes: HashSet<String>,
        rng: &mut R,
    ) -> Result<Self> {
        let mut plan = SettingsPlan::default();

        let contestants: Vec<_> = request
            .contestants
            .iter()
            .filter_map(|c| clean_name(c.name.as_deref()).map(|name| (c.id.as_ref(), name)))
            .collect();
        let existing: Vec<i64> = current.contestants.iter().map(|c| c.contestant_id).collect();
        let (matched, deleted) = match_rows(contestants.iter().map(|(id, _)| *id), &existing);
        plan.delete_contestants = deleted;
        plan.contestants = contestants
            .into_iter()
            .zip(matched)
            .enumerate()
            .map(|(order, ((_, name), existing_id))| PlannedRow {
                existing_id,
                order: order as i32,
                fields: ContestantFields { name },
            })
            .collect();

        let criteria: Vec<_> = request
            .criteria
            .iter()
            .filter_map(|c| {
                clean_name(c.name.as_deref()).map(|name| (c.id.as_ref(), name, c.points.as_ref()))
            })
            .collect();
        let existing: Vec<i64> = current.criteria.iter().map(|c| c.criteria_id).collect();
        let (matched, deleted) = match_rows(criteria.iter().map(|(id, _, _)| *id), &existing);
        plan.delete_criteria = deleted;
        plan.criteria = criteria
            .into_iter()
            .zip(matched)
            .enumerate()
            .map(|(order, ((_, name, points), existing_id))| PlannedRow {
                existing_id,
                order: order as i32,
                fields: CriteriaFields {
                    name,
                    points: parse_points(points),
                },
            })
            .collect();

        let judges: Vec<_> = request
            .judges
            .iter()
            .filter_map(|j| clean_name(j.name.as_deref()).map(|name| (j, name)))
            .collect();
        let existing: Vec<i64> = current.judges.iter().map(|j| j.judge_id).collect();
        let (matched, deleted) = match_rows(judges.iter().map(|(j, _)| j.id.as_ref()), &existing);
        plan.delete_judges = deleted;

        let mut taken = foreign_codes;
        for (order, ((input, name), existing_id)) in judges.into_iter().zip(matched).enumerate() {
            let supplied = input
                .code
                .as_ref()
                .and_then(judge_code::from_value)
                .filter(|code| judge_code::is_well_formed(code) && !taken.contains(code));

            let kept = existing_id
                .and_then(|id| current.judges.iter().find(|j| j.judge_id == id))
                .map(|j| j.code.clone())
                .filter(|code| judge_code::is_well_formed(code) && !taken.contains(code));

            let code = match supplied.or(kept) {
                Some(code) => code,
                None => judge_code::generate(rng, &taken)?,
            };
            taken.insert(code.clone());

            plan.judges.push(PlannedRow {
                existing_id,
                order: order as i32,
                fields: JudgeFields {
                    name,
                    judge_type: JudgeType::parse_lenient(input.judge_type.as_deref()),
                    code,
                },
            });
        }

        Ok(plan)
    }
}

fn clean_name(name: Option<&str>) -> Option<String> {
    name.map(str::trim)
        .filter(|n| !n.is_empty())
        .map(String::from)
}

/// Pair each candidate with the stored row it names. A stored id can be
/// claimed once; candidates naming unknown or already-claimed ids are new rows.
/// Returns the match per candidate and the stored ids nobody claimed.
fn match_rows<'a>(
    candidate_ids: impl Iterator<Item = Option<&'a Value>>,
    existing: &[i64],
) -> (Vec<Option<i64>>, Vec<i64>) {
    let mut claimed = HashSet::new();

    let matched = candidate_ids
        .map(|id| {
            id.and_then(parse_id)
                .filter(|id| existing.contains(id) && claimed.insert(*id))
        })
        .collect();

    let unclaimed = existing
        .iter()
        .copied()
        .filter(|id| !claimed.contains(id))
        .collect();

    (matched, unclaimed)
}

/// Decimal weight from a number or numeric string; anything else is 0
pub fn parse_points(value: Option<&Value>) -> Decimal {
    let parsed = match value {
        Some(Value::Number(n)) => parse_decimal(&n.to_string()),
        Some(Value::String(s)) => parse_decimal(s.trim()),
        _ => None,
    };

    parsed
        .map(|points| points.round_dp(2))
        .filter(|points| points.abs() <= MAX_POINTS)
        .unwrap_or(Decimal::ZERO)
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde_json::json;

    fn request(value: Value) -> SaveSettingsRequest {
        serde_json::from_value(value).unwrap()
    }

    fn judge(id: i64, code: &str) -> Judge {
        Judge {
            judge_id: id,
            sub_event_id: 1,
            name: format!("judge {}", id),
            judge_type: "judge".to_string(),
            code: code.to_string(),
            sort_order: 0,
        }
    }

    fn contestant(id: i64) -> Contestant {
        Contestant {
            contestant_id: id,
            sub_event_id: 1,
            name: format!("contestant {}", id),
            sort_order: 0,
        }
    }

    fn empty<'a>() -> CurrentSettings<'a> {
        CurrentSettings {
            contestants: &[],
            judges: &[],
            criteria: &[],
        }
    }

    fn build(req: &SaveSettingsRequest, current: CurrentSettings<'_>) -> SettingsPlan {
        let mut rng = StdRng::seed_from_u64(42);
        SettingsPlan::build(req, current, HashSet::new(), &mut rng).unwrap()
    }

    #[test]
    fn test_empty_names_are_dropped_and_orders_renumbered() {
        let req = request(json!({
            "judges": [{"name": "Ann"}, {"name": ""}, {"name": "Bo"}]
        }));
        let plan = build(&req, empty());

        let names: Vec<_> = plan.judges.iter().map(|j| j.fields.name.as_str()).collect();
        let orders: Vec<_> = plan.judges.iter().map(|j| j.order).collect();
        assert_eq!(names, ["Ann", "Bo"]);
        assert_eq!(orders, [0, 1]);

        let codes: HashSet<_> = plan.judges.iter().map(|j| j.fields.code.clone()).collect();
        assert_eq!(codes.len(), 2);
        assert!(codes.iter().all(|c| judge_code::is_well_formed(c)));
    }

    #[test]
    fn test_whitespace_and_missing_names_are_dropped() {
        let req = request(json!({
            "contestants": [{"name": "  "}, {}, {"name": " Cy "}, {"name": null}, {"name": "Di"}]
        }));
        let plan = build(&req, empty());

        assert_eq!(plan.contestants.len(), 2);
        assert_eq!(plan.contestants[0].fields.name, "Cy");
        assert_eq!(plan.contestants[0].order, 0);
        assert_eq!(plan.contestants[1].fields.name, "Di");
        assert_eq!(plan.contestants[1].order, 1);
    }

    #[test]
    fn test_counts_match_submission() {
        let req = request(json!({
            "contestants": [{"name": "a"}, {"name": "b"}, {"name": "c"}],
            "judges": [{"name": "j1"}, {"name": "j2"}],
            "criteria": [{"name": "k1", "points": 40}, {"name": "k2", "points": "60"}]
        }));
        let plan = build(&req, empty());

        assert_eq!(plan.contestants.len(), 3);
        assert_eq!(plan.judges.len(), 2);
        assert_eq!(plan.criteria.len(), 2);
        for (i, row) in plan.contestants.iter().enumerate() {
            assert_eq!(row.order, i as i32);
            assert_eq!(row.existing_id, None);
        }
    }

    #[test]
    fn test_supplied_code_kept_when_free() {
        let req = request(json!({
            "judges": [{"name": "Ann", "code": "123456"}, {"name": "Bo", "code": 654321}]
        }));
        let plan = build(&req, empty());

        assert_eq!(plan.judges[0].fields.code, "123456");
        assert_eq!(plan.judges[1].fields.code, "654321");
    }

    #[test]
    fn test_supplied_code_replaced_when_taken_elsewhere() {
        let req = request(json!({ "judges": [{"name": "Ann", "code": "123456"}] }));
        let foreign = HashSet::from(["123456".to_string()]);
        let mut rng = StdRng::seed_from_u64(1);

        let plan = SettingsPlan::build(&req, empty(), foreign, &mut rng).unwrap();

        let code = &plan.judges[0].fields.code;
        assert_ne!(code, "123456");
        assert!(judge_code::is_well_formed(code));
    }

    #[test]
    fn test_duplicate_code_within_batch_is_regenerated() {
        let req = request(json!({
            "judges": [{"name": "Ann", "code": "111111"}, {"name": "Bo", "code": "111111"}]
        }));
        let plan = build(&req, empty());

        assert_eq!(plan.judges[0].fields.code, "111111");
        assert_ne!(plan.judges[1].fields.code, "111111");
    }

    #[test]
    fn test_malformed_code_is_regenerated() {
        let req = request(json!({
            "judges": [{"name": "Ann", "code": "12ab56"}, {"name": "Bo", "code": "1234"}]
        }));
        let plan = build(&req, empty());

        for row in &plan.judges {
            assert!(judge_code::is_well_formed(&row.fields.code));
        }
    }

    #[test]
    fn test_existing_judge_keeps_its_code_without_one_supplied() {
        let stored = [judge(10, "222222"), judge(11, "333333")];
        let current = CurrentSettings {
            judges: &stored,
            ..empty()
        };
        let req = request(json!({ "judges": [{"id": "11", "name": "Renamed"}] }));

        let plan = build(&req, current);

        assert_eq!(plan.judges.len(), 1);
        assert_eq!(plan.judges[0].existing_id, Some(11));
        assert_eq!(plan.judges[0].fields.code, "333333");
        assert_eq!(plan.judges[0].fields.name, "Renamed");
        assert_eq!(plan.delete_judges, vec![10]);
    }

    #[test]
    fn test_codes_can_swap_between_existing_judges() {
        let stored = [judge(10, "222222"), judge(11, "333333")];
        let current = CurrentSettings {
            judges: &stored,
            ..empty()
        };
        let req = request(json!({
            "judges": [
                {"id": 10, "name": "A", "code": "333333"},
                {"id": 11, "name": "B", "code": "222222"}
            ]
        }));

        let plan = build(&req, current);

        assert_eq!(plan.judges[0].fields.code, "333333");
        assert_eq!(plan.judges[1].fields.code, "222222");
        assert!(plan.delete_judges.is_empty());
    }

    #[test]
    fn test_ids_from_other_sub_events_become_inserts() {
        let stored = [contestant(1), contestant(2)];
        let current = CurrentSettings {
            contestants: &stored,
            ..empty()
        };
        let req = request(json!({
            "contestants": [
                {"id": 2, "name": "kept"},
                {"id": 99, "name": "foreign"},
                {"id": 2, "name": "claimed twice"},
                {"name": "new"}
            ]
        }));

        let plan = build(&req, current);

        let ids: Vec<_> = plan.contestants.iter().map(|c| c.existing_id).collect();
        assert_eq!(ids, [Some(2), None, None, None]);
        assert_eq!(plan.delete_contestants, vec![1]);
    }

    #[test]
    fn test_dropped_candidate_does_not_claim_its_row() {
        let stored = [contestant(5)];
        let current = CurrentSettings {
            contestants: &stored,
            ..empty()
        };
        let req = request(json!({ "contestants": [{"id": 5, "name": ""}] }));

        let plan = build(&req, current);

        assert!(plan.contestants.is_empty());
        assert_eq!(plan.delete_contestants, vec![5]);
    }

    #[test]
    fn test_judge_type_normalized() {
        let req = request(json!({
            "judges": [{"name": "A", "type": "chairman"}, {"name": "B", "type": "boss"}, {"name": "C"}]
        }));
        let plan = build(&req, empty());

        let types: Vec<_> = plan.judges.iter().map(|j| j.fields.judge_type).collect();
        assert_eq!(types, [JudgeType::Chairman, JudgeType::Judge, JudgeType::Judge]);
    }

    #[test]
    fn test_parse_points() {
        assert_eq!(parse_points(Some(&json!(25))), Decimal::new(25, 0));
        assert_eq!(parse_points(Some(&json!("33.5"))), Decimal::new(335, 1));
        assert_eq!(parse_points(Some(&json!(12.345))), Decimal::new(1234, 2));
        assert_eq!(parse_points(Some(&json!("abc"))), Decimal::ZERO);
        assert_eq!(parse_points(Some(&json!(""))), Decimal::ZERO);
        assert_eq!(parse_points(Some(&json!(null))), Decimal::ZERO);
        assert_eq!(parse_points(Some(&json!(100000))), Decimal::ZERO);
        assert_eq!(parse_points(None), Decimal::ZERO);
    }

    #[test]
    fn test_bad_points_do_not_reject_batch() {
        let req = request(json!({
            "criteria": [{"name": "Poise", "points": "lots"}, {"name": "Voice", "points": 50}]
        }));
        let plan = build(&req, empty());

        assert_eq!(plan.criteria.len(), 2);
        assert_eq!(plan.criteria[0].fields.points, Decimal::ZERO);
        assert_eq!(plan.criteria[1].fields.points, Decimal::new(50, 0));
    }
}
