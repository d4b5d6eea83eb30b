use sqlx::PgPool;
use storage::{
    dto::scoreboard::ScoreboardResponse,
    repository::{score::ScoreRepository, settings::SettingsRepository},
    services::scoreboard::build_scoreboard,
};

use crate::error::{WebError, WebResult};
use crate::features::subevents::services::owned_sub_event;

/// Averaged and ranked results of a sub-event, optionally for one judge only
pub async fn get_scoreboard(
    pool: &PgPool,
    sub_event_id: i64,
    judge_id: Option<i64>,
    user_id: i64,
) -> WebResult<ScoreboardResponse> {
    owned_sub_event(pool, sub_event_id, user_id).await?;

    let settings = SettingsRepository::new(pool).load(sub_event_id).await?;

    let judges_counted = match judge_id {
        Some(id) if settings.judges.iter().any(|j| j.judge_id == id) => 1,
        Some(_) => return Err(WebError::NotFound),
        None => settings.judges.len(),
    };

    let scores = ScoreRepository::new(pool)
        .list_for_sub_event(sub_event_id, judge_id)
        .await?;

    let entries = build_scoreboard(&settings.contestants, &settings.criteria, &scores);

    Ok(ScoreboardResponse {
        sub_event_id,
        judge_id,
        judges_counted,
        entries,
    })
}
