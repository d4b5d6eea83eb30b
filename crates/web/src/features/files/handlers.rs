use axum::{
    Extension, Json,
    extract::{Multipart, Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::case::{CaseFileResponse, NewCaseFile, UploadFileForm},
};

use crate::error::WebError;
use crate::middleware::auth::CurrentUser;
use crate::uploads::UploadStore;

use super::services;

/// Headroom above the file size limit for multipart framing and text fields
pub const MULTIPART_OVERHEAD: usize = 64 * 1024;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

#[utoipa::path(
    get,
    path = "/api/cases/{id}/files",
    params(
        ("id" = i64, Path, description = "Case id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Files attached to the case", body = Vec<CaseFileResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not involved in the case"),
        (status = 404, description = "Case not found")
    ),
    tag = "files"
)]
pub async fn list_files(
    State(db): State<Database>,
    Extension(user): Extension<CurrentUser>,
    Path(case_id): Path<i64>,
) -> Result<Response, WebError> {
    let files = services::list_files(db.pool(), case_id, user.id()).await?;

    let response: Vec<CaseFileResponse> = files.into_iter().map(CaseFileResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/cases/{id}/files",
    params(
        ("id" = i64, Path, description = "Case id")
    ),
    request_body(content = UploadFileForm, content_type = "multipart/form-data"),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "File stored", body = CaseFileResponse),
        (status = 400, description = "Missing or oversized file"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not involved in the case"),
        (status = 404, description = "Case not found")
    ),
    tag = "files"
)]
pub async fn upload_file(
    State(db): State<Database>,
    State(uploads): State<UploadStore>,
    Extension(user): Extension<CurrentUser>,
    Path(case_id): Path<i64>,
    mut multipart: Multipart,
) -> Result<Response, WebError> {
    services::ensure_case_access(db.pool(), case_id, user.id()).await?;

    let mut upload = None;
    let mut description = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| WebError::BadRequest(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or(DEFAULT_CONTENT_TYPE)
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| WebError::BadRequest(e.body_text()))?;
                upload = Some((filename, content_type, bytes));
            }
            "description" => {
                description = field
                    .text()
                    .await
                    .map_err(|e| WebError::BadRequest(e.body_text()))?;
            }
            _ => {}
        }
    }

    let (filename, content_type, bytes) =
        upload.ok_or_else(|| WebError::BadRequest("A `file` part is required".to_string()))?;

    let storage_key = uploads.save(&filename, &bytes).await?;
    let new_file = NewCaseFile {
        storage_key,
        filename,
        content_type,
        size_bytes: bytes.len() as i64,
        description,
    };

    let record = match services::record_file(db.pool(), case_id, user.id(), &new_file).await {
        Ok(record) => record,
        Err(e) => {
            if let Err(cleanup) = uploads.remove(&new_file.storage_key).await {
                tracing::warn!(key = %new_file.storage_key, "Orphaned upload left behind: {}", cleanup);
            }
            return Err(e);
        }
    };

    Ok((StatusCode::CREATED, Json(CaseFileResponse::from(record))).into_response())
}

#[utoipa::path(
    get,
    path = "/api/files/{id}",
    params(
        ("id" = i64, Path, description = "File id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "File metadata", body = CaseFileResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not involved in the case"),
        (status = 404, description = "File not found")
    ),
    tag = "files"
)]
pub async fn get_file(
    State(db): State<Database>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    let file = services::get_file_for_user(db.pool(), id, user.id()).await?;

    Ok(Json(CaseFileResponse::from(file)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/files/{id}/download",
    params(
        ("id" = i64, Path, description = "File id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Raw file content"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not involved in the case"),
        (status = 404, description = "File not found")
    ),
    tag = "files"
)]
pub async fn download_file(
    State(db): State<Database>,
    State(uploads): State<UploadStore>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    let file = services::get_file_for_user(db.pool(), id, user.id()).await?;
    let bytes = uploads.read(&file.storage_key).await?;

    Ok((
        [
            (header::CONTENT_TYPE, file.content_type),
            (
                header::CONTENT_DISPOSITION,
                content_disposition(&file.filename),
            ),
        ],
        bytes,
    )
        .into_response())
}

#[utoipa::path(
    delete,
    path = "/api/files/{id}",
    params(
        ("id" = i64, Path, description = "File id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "File deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller may not delete this file"),
        (status = 404, description = "File not found")
    ),
    tag = "files"
)]
pub async fn delete_file(
    State(db): State<Database>,
    State(uploads): State<UploadStore>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    let file = services::delete_file(db.pool(), id, user.id()).await?;
    uploads.remove(&file.storage_key).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

fn content_disposition(filename: &str) -> String {
    let safe: String = filename
        .chars()
        .filter(|c| c.is_ascii() && !c.is_ascii_control() && *c != '"' && *c != '\\')
        .collect();
    let safe = if safe.trim().is_empty() { "download" } else { safe.trim() };

    format!("attachment; filename=\"{}\"", safe)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition_strips_unsafe_characters() {
        assert_eq!(
            content_disposition("report \"final\".pdf"),
            "attachment; filename=\"report final.pdf\""
        );
        assert_eq!(
            content_disposition("\u{e9}\u{e8}"),
            "attachment; filename=\"download\""
        );
    }
}
