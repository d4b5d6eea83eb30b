use sqlx::PgPool;
use storage::{
    dto::case::CaseNoteResponse,
    repository::{case_note::CaseNoteRepository, user::UserRepository},
};

use crate::error::{WebError, WebResult};
use crate::features::cases::services::get_case_for_user;

pub async fn list_notes(
    pool: &PgPool,
    case_id: i64,
    user_id: i64,
) -> WebResult<Vec<CaseNoteResponse>> {
    get_case_for_user(pool, case_id, user_id).await?;
    Ok(CaseNoteRepository::new(pool).list_for_case(case_id).await?)
}

pub async fn create_note(
    pool: &PgPool,
    case_id: i64,
    user_id: i64,
    content: &str,
) -> WebResult<CaseNoteResponse> {
    get_case_for_user(pool, case_id, user_id).await?;

    let note = CaseNoteRepository::new(pool)
        .create(case_id, user_id, content)
        .await?;
    let author = UserRepository::new(pool).find_by_id(user_id).await?;

    tracing::info!(note_id = note.note_id, case_id, "Note added");

    Ok(CaseNoteResponse {
        id: note.note_id,
        case_id: note.case_id,
        author_id: note.author_id,
        author_username: author.username,
        content: note.content,
        created_at: note.created_at,
    })
}

/// Notes can only be edited by their author
pub async fn update_note(
    pool: &PgPool,
    note_id: i64,
    user_id: i64,
    content: &str,
) -> WebResult<CaseNoteResponse> {
    let repo = CaseNoteRepository::new(pool);
    let note = repo.find_by_id(note_id).await?;

    if note.author_id != user_id {
        return Err(WebError::Forbidden(
            "Only the author can edit a note".to_string(),
        ));
    }

    let note = repo.update_content(note_id, content).await?;
    let author = UserRepository::new(pool).find_by_id(user_id).await?;

    tracing::info!(note_id, "Note updated");

    Ok(CaseNoteResponse {
        id: note.note_id,
        case_id: note.case_id,
        author_id: note.author_id,
        author_username: author.username,
        content: note.content,
        created_at: note.created_at,
    })
}

/// Notes can only be removed by their author
pub async fn delete_note(pool: &PgPool, note_id: i64, user_id: i64) -> WebResult<()> {
    let repo = CaseNoteRepository::new(pool);
    let note = repo.find_by_id(note_id).await?;

    if note.author_id != user_id {
        return Err(WebError::Forbidden(
            "Only the author can delete a note".to_string(),
        ));
    }

    repo.delete(note_id).await?;
    tracing::info!(note_id, "Note deleted");
    Ok(())
}
