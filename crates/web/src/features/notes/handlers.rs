use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::case::{CaseNoteResponse, CreateNoteRequest},
};
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::CurrentUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/cases/{id}/notes",
    params(
        ("id" = i64, Path, description = "Case id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Notes of the case, newest first", body = Vec<CaseNoteResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not involved in the case"),
        (status = 404, description = "Case not found")
    ),
    tag = "cases"
)]
pub async fn list_notes(
    State(db): State<Database>,
    Extension(user): Extension<CurrentUser>,
    Path(case_id): Path<i64>,
) -> Result<Response, WebError> {
    let notes = services::list_notes(db.pool(), case_id, user.id()).await?;

    Ok(Json(notes).into_response())
}

#[utoipa::path(
    post,
    path = "/api/cases/{id}/notes",
    params(
        ("id" = i64, Path, description = "Case id")
    ),
    request_body = CreateNoteRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Note added", body = CaseNoteResponse),
        (status = 400, description = "Empty note"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not involved in the case"),
        (status = 404, description = "Case not found")
    ),
    tag = "cases"
)]
pub async fn create_note(
    State(db): State<Database>,
    Extension(user): Extension<CurrentUser>,
    Path(case_id): Path<i64>,
    Json(req): Json<CreateNoteRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let note = services::create_note(db.pool(), case_id, user.id(), &req.content).await?;

    Ok((StatusCode::CREATED, Json(note)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note id")
    ),
    request_body = CreateNoteRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Note updated", body = CaseNoteResponse),
        (status = 400, description = "Empty note"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not the author"),
        (status = 404, description = "Note not found")
    ),
    tag = "cases"
)]
pub async fn update_note(
    State(db): State<Database>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(req): Json<CreateNoteRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let note = services::update_note(db.pool(), id, user.id(), &req.content).await?;

    Ok(Json(note).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Note deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not the author"),
        (status = 404, description = "Note not found")
    ),
    tag = "cases"
)]
pub async fn delete_note(
    State(db): State<Database>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    services::delete_note(db.pool(), id, user.id()).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
