use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        case::{CaseDetailResponse, CaseResponse, CreateCaseRequest, UpdateCaseRequest},
        common::{PaginatedResponse, PaginationParams},
    },
};
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::CurrentUser;
use crate::uploads::UploadStore;

use super::services;

#[utoipa::path(
    get,
    path = "/api/cases",
    params(PaginationParams),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Cases the caller created or is assigned to", body = PaginatedResponse<CaseResponse>),
        (status = 400, description = "Invalid pagination parameters"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "cases"
)]
pub async fn list_cases(
    State(db): State<Database>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<PaginationParams>,
) -> Result<Response, WebError> {
    params.validate().map_err(WebError::BadRequest)?;

    let (cases, total) = services::list_cases(db.pool(), user.id(), &params).await?;

    let data: Vec<CaseResponse> = cases.into_iter().map(CaseResponse::from).collect();

    Ok(Json(PaginatedResponse::new(data, params.page, params.page_size, total)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/cases/{id}",
    params(
        ("id" = i64, Path, description = "Case id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Case with notes and files", body = CaseDetailResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not involved in the case"),
        (status = 404, description = "Case not found")
    ),
    tag = "cases"
)]
pub async fn get_case(
    State(db): State<Database>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    let case = services::get_case_for_user(db.pool(), id, user.id()).await?;
    let detail = services::case_detail(db.pool(), case).await?;

    Ok(Json(detail).into_response())
}

#[utoipa::path(
    post,
    path = "/api/cases",
    request_body = CreateCaseRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Case created", body = CaseResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Case number already exists")
    ),
    tag = "cases"
)]
pub async fn create_case(
    State(db): State<Database>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<CreateCaseRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let case = services::create_case(db.pool(), &req, user.id()).await?;

    Ok((StatusCode::CREATED, Json(CaseResponse::from(case))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/cases/{id}",
    params(
        ("id" = i64, Path, description = "Case id")
    ),
    request_body = UpdateCaseRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Case updated", body = CaseResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not involved in the case"),
        (status = 404, description = "Case not found")
    ),
    tag = "cases"
)]
pub async fn update_case(
    State(db): State<Database>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateCaseRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let case = services::update_case(db.pool(), id, &req, user.id()).await?;

    Ok(Json(CaseResponse::from(case)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/cases/{id}",
    params(
        ("id" = i64, Path, description = "Case id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Case deleted with its notes and files"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller did not create the case"),
        (status = 404, description = "Case not found")
    ),
    tag = "cases"
)]
pub async fn delete_case(
    State(db): State<Database>,
    State(uploads): State<UploadStore>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    let storage_keys = services::delete_case(db.pool(), id, user.id()).await?;

    for key in storage_keys {
        uploads.remove(&key).await?;
    }

    Ok(StatusCode::NO_CONTENT.into_response())
}
