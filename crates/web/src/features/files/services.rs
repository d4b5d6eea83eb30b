use sqlx::PgPool;
use storage::{
    dto::case::NewCaseFile,
    models::CaseFile,
    repository::case_file::CaseFileRepository,
};

use crate::error::{WebError, WebResult};
use crate::features::cases::services::get_case_for_user;

pub async fn list_files(pool: &PgPool, case_id: i64, user_id: i64) -> WebResult<Vec<CaseFile>> {
    get_case_for_user(pool, case_id, user_id).await?;
    Ok(CaseFileRepository::new(pool).list_for_case(case_id).await?)
}

/// Check the case is accessible before any bytes are written
pub async fn ensure_case_access(pool: &PgPool, case_id: i64, user_id: i64) -> WebResult<()> {
    get_case_for_user(pool, case_id, user_id).await?;
    Ok(())
}

pub async fn record_file(
    pool: &PgPool,
    case_id: i64,
    user_id: i64,
    file: &NewCaseFile,
) -> WebResult<CaseFile> {
    let record = CaseFileRepository::new(pool)
        .create(case_id, user_id, file)
        .await?;

    tracing::info!(
        file_id = record.file_id,
        case_id,
        size_bytes = record.size_bytes,
        "File uploaded"
    );
    Ok(record)
}

/// A file is visible to anyone who can see its case
pub async fn get_file_for_user(pool: &PgPool, id: i64, user_id: i64) -> WebResult<CaseFile> {
    let file = CaseFileRepository::new(pool).find_by_id(id).await?;
    get_case_for_user(pool, file.case_id, user_id).await?;
    Ok(file)
}

/// The uploader or the case creator may delete; returns the removed record
pub async fn delete_file(pool: &PgPool, id: i64, user_id: i64) -> WebResult<CaseFile> {
    let repo = CaseFileRepository::new(pool);
    let file = repo.find_by_id(id).await?;
    let case = get_case_for_user(pool, file.case_id, user_id).await?;

    if file.uploaded_by != user_id && case.created_by != user_id {
        return Err(WebError::Forbidden(
            "Only the uploader or the case creator can delete a file".to_string(),
        ));
    }

    repo.delete(id).await?;
    tracing::info!(file_id = id, "File deleted");
    Ok(file)
}
