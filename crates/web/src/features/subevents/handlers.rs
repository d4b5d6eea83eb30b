use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::sub_event::{
        CreateSubEventRequest, SubEventResponse, SubEventWithEventResponse, UpdateSubEventRequest,
    },
};
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::CurrentUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/subevents",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Sub-events of the caller's events", body = Vec<SubEventResponse>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "subevents"
)]
pub async fn list_owned_sub_events(
    State(db): State<Database>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Response, WebError> {
    let sub_events = services::list_owned_sub_events(db.pool(), user.id()).await?;
    let response: Vec<SubEventResponse> = sub_events.into_iter().map(Into::into).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/subevents/{id}",
    params(
        ("id" = i64, Path, description = "Sub-event id")
    ),
    responses(
        (status = 200, description = "Sub-event with its event", body = SubEventWithEventResponse),
        (status = 404, description = "Sub-event not found")
    ),
    tag = "subevents"
)]
pub async fn get_sub_event(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    let sub_event = services::get_sub_event(db.pool(), id).await?;

    Ok(Json(sub_event).into_response())
}

#[utoipa::path(
    post,
    path = "/api/subevents",
    request_body = CreateSubEventRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Sub-event created", body = SubEventResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller did not create the event"),
        (status = 404, description = "Event not found")
    ),
    tag = "subevents"
)]
pub async fn create_sub_event(
    State(db): State<Database>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<CreateSubEventRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let sub_event = services::create_sub_event(db.pool(), &req, user.id()).await?;

    Ok((StatusCode::CREATED, Json(SubEventResponse::from(sub_event))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/subevents/{id}",
    params(
        ("id" = i64, Path, description = "Sub-event id")
    ),
    request_body = UpdateSubEventRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Sub-event updated", body = SubEventResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller did not create the event"),
        (status = 404, description = "Sub-event not found")
    ),
    tag = "subevents"
)]
pub async fn update_sub_event(
    State(db): State<Database>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateSubEventRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let sub_event = services::update_sub_event(db.pool(), id, &req, user.id()).await?;

    Ok(Json(SubEventResponse::from(sub_event)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/subevents/{id}",
    params(
        ("id" = i64, Path, description = "Sub-event id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Sub-event deleted with its settings and scores"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller did not create the event"),
        (status = 404, description = "Sub-event not found")
    ),
    tag = "subevents"
)]
pub async fn delete_sub_event(
    State(db): State<Database>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    services::delete_sub_event(db.pool(), id, user.id()).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
