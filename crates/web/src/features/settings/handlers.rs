use axum::{
    Extension, Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::settings::{SaveSettingsRequest, SettingsResponse},
};

use crate::error::WebError;
use crate::middleware::auth::CurrentUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/subevents/{id}/settings",
    params(
        ("id" = i64, Path, description = "Sub-event id")
    ),
    responses(
        (status = 200, description = "Contestants, judges and criteria in order; judge codes only for the event creator", body = SettingsResponse),
        (status = 404, description = "Sub-event not found")
    ),
    tag = "settings"
)]
pub async fn get_settings(
    State(db): State<Database>,
    user: Option<Extension<CurrentUser>>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    let viewer = user.map(|Extension(user)| user.id());

    let settings = services::get_settings(db.pool(), id, viewer).await?;

    Ok(Json(settings).into_response())
}

#[utoipa::path(
    post,
    path = "/api/subevents/{id}/settings",
    params(
        ("id" = i64, Path, description = "Sub-event id")
    ),
    request_body = SaveSettingsRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Settings saved; the resulting rows", body = SettingsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller did not create the event"),
        (status = 404, description = "Sub-event not found"),
        (status = 409, description = "Judge code collision")
    ),
    tag = "settings"
)]
pub async fn save_settings(
    State(db): State<Database>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(req): Json<SaveSettingsRequest>,
) -> Result<Response, WebError> {
    let settings = services::save_settings(db.pool(), id, &req, user.id()).await?;

    Ok(Json(settings).into_response())
}
