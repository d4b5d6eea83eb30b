use sqlx::PgPool;

use crate::dto::case::CaseNoteResponse;
use crate::error::{Result, StorageError};
use crate::models::CaseNote;

pub struct CaseNoteRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CaseNoteRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Notes of a case with author names, newest first
    pub async fn list_for_case(&self, case_id: i64) -> Result<Vec<CaseNoteResponse>> {
        let notes = sqlx::query_as::<_, CaseNoteResponse>(
            r#"
            SELECT n.note_id AS id, n.case_id, n.author_id, u.username AS author_username,
                   n.content, n.created_at
            FROM case_notes n
            JOIN users u ON u.user_id = n.author_id
            WHERE n.case_id = $1
            ORDER BY n.created_at DESC, n.note_id DESC
            "#,
        )
        .bind(case_id)
        .fetch_all(self.pool)
        .await?;

        Ok(notes)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<CaseNote> {
        sqlx::query_as::<_, CaseNote>(
            "SELECT note_id, case_id, author_id, content, created_at FROM case_notes WHERE note_id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn create(&self, case_id: i64, author_id: i64, content: &str) -> Result<CaseNote> {
        let note = sqlx::query_as::<_, CaseNote>(
            r#"
            INSERT INTO case_notes (case_id, author_id, content)
            VALUES ($1, $2, $3)
            RETURNING note_id, case_id, author_id, content, created_at
            "#,
        )
        .bind(case_id)
        .bind(author_id)
        .bind(content)
        .fetch_one(self.pool)
        .await?;

        Ok(note)
    }

    pub async fn update_content(&self, id: i64, content: &str) -> Result<CaseNote> {
        sqlx::query_as::<_, CaseNote>(
            r#"
            UPDATE case_notes
            SET content = $2
            WHERE note_id = $1
            RETURNING note_id, case_id, author_id, content, created_at
            "#,
        )
        .bind(id)
        .bind(content)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM case_notes WHERE note_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
