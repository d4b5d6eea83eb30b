use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use storage::{
    Database,
    dto::scores::{JudgeScoresResponse, SaveScoresRequest, SaveScoresResponse},
    services::score_input::ScoreSubmission,
};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/judges/{id}/scores",
    params(
        ("id" = i64, Path, description = "Judge id")
    ),
    responses(
        (status = 200, description = "Scores and comments keyed by contestant", body = JudgeScoresResponse),
        (status = 404, description = "Judge not found")
    ),
    tag = "scores"
)]
pub async fn get_judge_scores(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    let sheet = services::get_judge_scores(db.pool(), id).await?;

    Ok(Json(sheet).into_response())
}

#[utoipa::path(
    post,
    path = "/api/judges/{id}/scores/save",
    params(
        ("id" = i64, Path, description = "Judge id")
    ),
    request_body = SaveScoresRequest,
    responses(
        (status = 200, description = "Every entry saved", body = SaveScoresResponse),
        (status = 207, description = "Some entries were rejected", body = SaveScoresResponse),
        (status = 400, description = "Payload is not an object"),
        (status = 404, description = "Judge not found")
    ),
    tag = "scores"
)]
pub async fn save_judge_scores(
    State(db): State<Database>,
    Path(id): Path<i64>,
    Json(payload): Json<Value>,
) -> Result<Response, WebError> {
    let submission = ScoreSubmission::parse(&payload)
        .ok_or_else(|| WebError::BadRequest("Scores must be a JSON object".to_string()))?;

    let result = services::save_judge_scores(db.pool(), id, submission).await?;

    let status = if result.has_errors() {
        StatusCode::MULTI_STATUS
    } else {
        StatusCode::OK
    };

    Ok((status, Json(result)).into_response())
}
