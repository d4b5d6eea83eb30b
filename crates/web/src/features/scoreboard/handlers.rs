use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::scoreboard::{ScoreboardParams, ScoreboardResponse},
};

use crate::error::WebError;
use crate::middleware::auth::CurrentUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/subevents/{id}/scoreboard",
    params(
        ("id" = i64, Path, description = "Sub-event id"),
        ScoreboardParams
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Per-criterion means, weighted totals and ranks", body = ScoreboardResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller did not create the event"),
        (status = 404, description = "Sub-event or judge not found")
    ),
    tag = "scoreboard"
)]
pub async fn get_scoreboard(
    State(db): State<Database>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Query(params): Query<ScoreboardParams>,
) -> Result<Response, WebError> {
    let scoreboard = services::get_scoreboard(db.pool(), id, params.judge_id, user.id()).await?;

    Ok(Json(scoreboard).into_response())
}
