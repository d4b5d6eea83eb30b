use sqlx::PgPool;
use storage::{
    dto::{
        case::{CaseDetailResponse, CreateCaseRequest, UpdateCaseRequest},
        common::PaginationParams,
    },
    models::Case,
    repository::{
        case::CaseRepository, case_file::CaseFileRepository, case_note::CaseNoteRepository,
        user::UserRepository,
    },
};

use crate::error::{WebError, WebResult};

pub async fn list_cases(
    pool: &PgPool,
    user_id: i64,
    pagination: &PaginationParams,
) -> WebResult<(Vec<Case>, i64)> {
    Ok(CaseRepository::new(pool)
        .list_for_user(user_id, pagination)
        .await?)
}

/// Load a case the user created or is assigned to
pub async fn get_case_for_user(pool: &PgPool, id: i64, user_id: i64) -> WebResult<Case> {
    let case = CaseRepository::new(pool).find_by_id(id).await?;

    if case.created_by != user_id && case.assigned_to != Some(user_id) {
        return Err(WebError::Forbidden(
            "You are not involved in this case".to_string(),
        ));
    }

    Ok(case)
}

/// Case with creator, assignee, notes and files expanded
pub async fn case_detail(pool: &PgPool, case: Case) -> WebResult<CaseDetailResponse> {
    let users = UserRepository::new(pool);
    let created_by = users.find_by_id(case.created_by).await?;
    let assigned_to = match case.assigned_to {
        Some(id) => Some(users.find_by_id(id).await?),
        None => None,
    };

    let notes = CaseNoteRepository::new(pool)
        .list_for_case(case.case_id)
        .await?;
    let files = CaseFileRepository::new(pool)
        .list_for_case(case.case_id)
        .await?;

    Ok(CaseDetailResponse {
        id: case.case_id,
        case_number: case.case_number,
        title: case.title,
        description: case.description,
        status: case.status,
        priority: case.priority,
        assigned_to: assigned_to.map(Into::into),
        created_by: created_by.into(),
        created_at: case.created_at,
        updated_at: case.updated_at,
        due_date: case.due_date,
        notes,
        files: files.into_iter().map(Into::into).collect(),
    })
}

pub async fn create_case(
    pool: &PgPool,
    request: &CreateCaseRequest,
    user_id: i64,
) -> WebResult<Case> {
    let case = CaseRepository::new(pool).create(request, user_id).await?;
    tracing::info!(case_id = case.case_id, user_id, "Case created");
    Ok(case)
}

pub async fn update_case(
    pool: &PgPool,
    id: i64,
    request: &UpdateCaseRequest,
    user_id: i64,
) -> WebResult<Case> {
    let existing = get_case_for_user(pool, id, user_id).await?;
    let case = CaseRepository::new(pool).update(&existing, request).await?;
    tracing::info!(case_id = id, user_id, "Case updated");
    Ok(case)
}

/// Only the creator may delete a case
pub async fn delete_case(pool: &PgPool, id: i64, user_id: i64) -> WebResult<Vec<String>> {
    let repo = CaseRepository::new(pool);
    let case = repo.find_by_id(id).await?;

    if case.created_by != user_id {
        return Err(WebError::Forbidden(
            "Only the creator can delete a case".to_string(),
        ));
    }

    let storage_keys = CaseFileRepository::new(pool)
        .list_for_case(id)
        .await?
        .into_iter()
        .map(|file| file.storage_key)
        .collect();

    repo.delete(id).await?;
    tracing::info!(case_id = id, user_id, "Case deleted");

    Ok(storage_keys)
}
