//! Settings saves and score sheets against a real database.
//!
//! Each test gets a fresh database from `sqlx::test` with the crate's
//! migrations applied, so `DATABASE_URL` must point at a Postgres server the
//! test user can create databases on.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde_json::{Map, Value, json};
use sqlx::PgPool;
use storage::{
    dto::settings::SaveSettingsRequest,
    repository::{
        score::ScoreRepository,
        settings::{SettingsRepository, SubEventSettings},
    },
    services::score_input::ScoreSubmission,
};

async fn seed_event(pool: &PgPool) -> i64 {
    let user_id: i64 = sqlx::query_scalar(
        "INSERT INTO users (username, password_hash) VALUES ('organizer', 'x') RETURNING user_id",
    )
    .fetch_one(pool)
    .await
    .unwrap();

    sqlx::query_scalar(
        r#"
        INSERT INTO events (title, year, start_date, end_date, location, created_by)
        VALUES ('Spring Finals', 2025, '2025-03-01', '2025-03-02', 'Main Hall', $1)
        RETURNING event_id
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

async fn seed_sub_event(pool: &PgPool, event_id: i64, title: &str) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO sub_events (event_id, title, date, time, location)
        VALUES ($1, $2, '2025-03-01', '10:00', 'Stage A')
        RETURNING sub_event_id
        "#,
    )
    .bind(event_id)
    .bind(title)
    .fetch_one(pool)
    .await
    .unwrap()
}

async fn save(pool: &PgPool, sub_event_id: i64, body: Value) -> SubEventSettings {
    let request: SaveSettingsRequest = serde_json::from_value(body).unwrap();
    SettingsRepository::new(pool)
        .save(sub_event_id, &request)
        .await
        .unwrap()
}

async fn count(pool: &PgPool, table: &str, sub_event_id: i64) -> i64 {
    sqlx::query_scalar(&format!(
        "SELECT COUNT(*) FROM {} WHERE sub_event_id = $1",
        table
    ))
    .bind(sub_event_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// `{"scores": {contestant: {criterion: score, "comments": ...}}}`
fn sheet(rows: &[(i64, Vec<(i64, Value)>, Option<Value>)]) -> ScoreSubmission {
    let mut contestants = Map::new();
    for (contestant_id, scores, comments) in rows {
        let mut fields: Map<String, Value> = scores
            .iter()
            .map(|(criteria_id, score)| (criteria_id.to_string(), score.clone()))
            .collect();
        if let Some(comments) = comments {
            fields.insert("comments".to_string(), comments.clone());
        }
        contestants.insert(contestant_id.to_string(), Value::Object(fields));
    }

    ScoreSubmission::parse(&json!({ "scores": contestants })).unwrap()
}

fn initial_settings() -> Value {
    json!({
        "contestants": [{"name": "Ana"}, {"name": "Ben"}, {"name": "  "}, {"name": "Cleo"}],
        "judges": [
            {"name": "Head", "type": "chairman", "code": "111111"},
            {"name": "Side"}
        ],
        "criteria": [
            {"name": "Technique", "points": 60},
            {"name": "Artistry", "points": "40"}
        ]
    })
}

#[sqlx::test(migrations = "./migrations")]
async fn test_resave_matches_rows_and_keeps_scores(pool: PgPool) {
    let event_id = seed_event(&pool).await;
    let sub_event_id = seed_sub_event(&pool, event_id, "Solo").await;

    let first = save(&pool, sub_event_id, initial_settings()).await;

    assert_eq!(first.contestants.len(), 3);
    assert_eq!(first.judges.len(), 2);
    assert_eq!(first.criteria.len(), 2);
    assert_eq!(first.judges[0].code, "111111");
    assert_eq!(first.judges[0].judge_type, "chairman");
    assert!(first.judges[1].code.len() == 6 && first.judges[1].code.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(first.criteria[1].points, Decimal::new(40, 0));

    let ana = first.contestants[0].contestant_id;
    let cleo = first.contestants[2].contestant_id;
    let head = &first.judges[0];
    let technique = first.criteria[0].criteria_id;

    let scores = ScoreRepository::new(&pool);
    scores
        .save_sheet(head, sheet(&[(ana, vec![(technique, json!(80))], None)]))
        .await
        .unwrap();

    let second = save(
        &pool,
        sub_event_id,
        json!({
            "contestants": [
                {"id": cleo, "name": "Cleo"},
                {"id": ana.to_string(), "name": "Ana Maria"}
            ],
            "judges": [{"id": head.judge_id, "name": "Head", "type": "chairman"}],
            "criteria": [{"id": technique, "name": "Technique", "points": 100}]
        }),
    )
    .await;

    assert_eq!(count(&pool, "contestants", sub_event_id).await, 2);
    assert_eq!(count(&pool, "judges", sub_event_id).await, 1);
    assert_eq!(count(&pool, "criteria", sub_event_id).await, 1);

    let order: Vec<_> = second
        .contestants
        .iter()
        .map(|c| (c.contestant_id, c.name.as_str(), c.sort_order))
        .collect();
    assert_eq!(order, [(cleo, "Cleo", 0), (ana, "Ana Maria", 1)]);
    assert_eq!(second.judges[0].judge_id, head.judge_id);
    assert_eq!(second.judges[0].code, "111111");
    assert_eq!(second.criteria[0].points, Decimal::new(100, 0));

    let kept = scores.list_for_judge(head.judge_id).await.unwrap();
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].contestant_id, ana);
    assert_eq!(kept[0].score, Some(80));

    // Saving the same lists again changes nothing
    let again = save(
        &pool,
        sub_event_id,
        json!({
            "contestants": [{"id": cleo, "name": "Cleo"}, {"id": ana, "name": "Ana Maria"}],
            "judges": [{"id": head.judge_id, "name": "Head", "type": "chairman"}],
            "criteria": [{"id": technique, "name": "Technique", "points": 100}]
        }),
    )
    .await;
    assert_eq!(again.contestants.len(), 2);
    assert_eq!(again.judges.len(), 1);
    assert_eq!(again.criteria.len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_judges_swap_codes_in_one_save(pool: PgPool) {
    let event_id = seed_event(&pool).await;
    let sub_event_id = seed_sub_event(&pool, event_id, "Solo").await;

    let first = save(
        &pool,
        sub_event_id,
        json!({
            "judges": [
                {"name": "North", "code": "111111"},
                {"name": "South", "code": "222222"}
            ]
        }),
    )
    .await;
    let north = first.judges[0].judge_id;
    let south = first.judges[1].judge_id;

    let swapped = save(
        &pool,
        sub_event_id,
        json!({
            "judges": [
                {"id": north, "name": "North", "code": "222222"},
                {"id": south, "name": "South", "code": "111111"}
            ]
        }),
    )
    .await;

    let codes: HashMap<i64, &str> = swapped
        .judges
        .iter()
        .map(|j| (j.judge_id, j.code.as_str()))
        .collect();
    assert_eq!(codes[&north], "222222");
    assert_eq!(codes[&south], "111111");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_code_of_another_sub_event_is_replaced(pool: PgPool) {
    let event_id = seed_event(&pool).await;
    let solo = seed_sub_event(&pool, event_id, "Solo").await;
    let duet = seed_sub_event(&pool, event_id, "Duet").await;

    save(&pool, solo, json!({"judges": [{"name": "North", "code": "111111"}]})).await;
    let duet_settings = save(&pool, duet, json!({"judges": [{"name": "East", "code": "111111"}]})).await;

    assert_ne!(duet_settings.judges[0].code, "111111");
    let judge = SettingsRepository::new(&pool)
        .find_judge_by_code("111111")
        .await
        .unwrap();
    assert_eq!(judge.sub_event_id, solo);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_failed_save_leaves_previous_rows(pool: PgPool) {
    let event_id = seed_event(&pool).await;
    let sub_event_id = seed_sub_event(&pool, event_id, "Solo").await;
    let before = save(&pool, sub_event_id, initial_settings()).await;

    // Contestants are deleted and judges renamed before the oversized
    // criterion name is written and rejected.
    let request: SaveSettingsRequest = serde_json::from_value(json!({
        "contestants": [],
        "judges": [{"id": before.judges[0].judge_id, "name": "Renamed"}],
        "criteria": [{"name": "x".repeat(201), "points": 10}]
    }))
    .unwrap();
    let result = SettingsRepository::new(&pool)
        .save(sub_event_id, &request)
        .await;
    assert!(result.is_err());

    let after = SettingsRepository::new(&pool).load(sub_event_id).await.unwrap();
    let names = |s: &SubEventSettings| -> Vec<String> {
        s.contestants
            .iter()
            .map(|c| c.name.clone())
            .chain(s.judges.iter().map(|j| format!("{}:{}", j.name, j.code)))
            .chain(s.criteria.iter().map(|c| c.name.clone()))
            .collect()
    };
    assert_eq!(names(&after), names(&before));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_save_unknown_sub_event_is_not_found(pool: PgPool) {
    let result = SettingsRepository::new(&pool)
        .save(4242, &SaveSettingsRequest::default())
        .await;

    assert!(matches!(result, Err(storage::error::StorageError::NotFound)));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_score_sheet_upserts_and_reads_back(pool: PgPool) {
    let event_id = seed_event(&pool).await;
    let sub_event_id = seed_sub_event(&pool, event_id, "Solo").await;
    let settings = save(&pool, sub_event_id, initial_settings()).await;

    let judge = &settings.judges[1];
    let ana = settings.contestants[0].contestant_id;
    let ben = settings.contestants[1].contestant_id;
    let technique = settings.criteria[0].criteria_id;
    let artistry = settings.criteria[1].criteria_id;
    let repo = ScoreRepository::new(&pool);

    let saved = repo
        .save_sheet(
            judge,
            sheet(&[
                (
                    ana,
                    vec![(technique, json!(90)), (artistry, json!("70"))],
                    Some(json!("Clean routine")),
                ),
                (ben, vec![(technique, json!(150))], None),
                (999_999, vec![(technique, json!(50))], None),
            ]),
        )
        .await
        .unwrap();

    assert_eq!(saved.saved, 2);
    assert_eq!(saved.comments_saved, 1);
    assert_eq!(saved.errors.len(), 2);
    assert!(saved.errors.iter().any(|e| e.contestant_id == "999999"));

    // Second submission updates in place and clears a score
    repo.save_sheet(
        judge,
        sheet(&[(ana, vec![(technique, json!(95)), (artistry, Value::Null)], None)]),
    )
    .await
    .unwrap();

    let stored: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM scores WHERE judge_id = $1")
        .bind(judge.judge_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stored, 2);

    let read = repo.sheet_for_judge(judge.judge_id).await.unwrap();
    assert_eq!(read.scores[&ana][&technique], Some(95));
    assert_eq!(read.scores[&ana][&artistry], None);
    assert_eq!(read.comments.get(&ana).map(String::as_str), Some("Clean routine"));

    // Other judges see none of it
    let other = repo.sheet_for_judge(settings.judges[0].judge_id).await.unwrap();
    assert!(other.scores.is_empty());

    repo.save_sheet(judge, sheet(&[(ana, vec![], Some(json!("")))]))
        .await
        .unwrap();
    let cleared = repo.sheet_for_judge(judge.judge_id).await.unwrap();
    assert!(cleared.comments.is_empty());
}
