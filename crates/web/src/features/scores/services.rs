use sqlx::PgPool;
use storage::{
    dto::scores::{JudgeScoresResponse, SaveScoresResponse},
    repository::{score::ScoreRepository, settings::SettingsRepository},
    services::score_input::ScoreSubmission,
};

use crate::error::WebResult;

/// The judge's sheet grouped by contestant
pub async fn get_judge_scores(pool: &PgPool, judge_id: i64) -> WebResult<JudgeScoresResponse> {
    SettingsRepository::new(pool).find_judge(judge_id).await?;

    Ok(ScoreRepository::new(pool).sheet_for_judge(judge_id).await?)
}

/// Upsert every valid entry of the submission; invalid ones are reported back
pub async fn save_judge_scores(
    pool: &PgPool,
    judge_id: i64,
    submission: ScoreSubmission,
) -> WebResult<SaveScoresResponse> {
    let judge = SettingsRepository::new(pool).find_judge(judge_id).await?;

    let response = ScoreRepository::new(pool)
        .save_sheet(&judge, submission)
        .await?;

    tracing::info!(
        judge_id,
        saved = response.saved,
        comments = response.comments_saved,
        errors = response.errors.len(),
        "Judge scores saved"
    );

    Ok(response)
}
