use sqlx::PgPool;

use crate::dto::case::NewCaseFile;
use crate::error::{Result, StorageError};
use crate::models::CaseFile;

const FILE_COLUMNS: &str = "file_id, case_id, uploaded_by, storage_key, filename, content_type, \
     size_bytes, description, uploaded_at";

pub struct CaseFileRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CaseFileRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_case(&self, case_id: i64) -> Result<Vec<CaseFile>> {
        let files = sqlx::query_as::<_, CaseFile>(&format!(
            "SELECT {} FROM case_files WHERE case_id = $1 ORDER BY uploaded_at DESC, file_id DESC",
            FILE_COLUMNS
        ))
        .bind(case_id)
        .fetch_all(self.pool)
        .await?;

        Ok(files)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<CaseFile> {
        sqlx::query_as::<_, CaseFile>(&format!(
            "SELECT {} FROM case_files WHERE file_id = $1",
            FILE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn create(&self, case_id: i64, uploaded_by: i64, file: &NewCaseFile) -> Result<CaseFile> {
        let record = sqlx::query_as::<_, CaseFile>(&format!(
            r#"
            INSERT INTO case_files (case_id, uploaded_by, storage_key, filename, content_type,
                                    size_bytes, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            FILE_COLUMNS
        ))
        .bind(case_id)
        .bind(uploaded_by)
        .bind(&file.storage_key)
        .bind(&file.filename)
        .bind(&file.content_type)
        .bind(file.size_bytes)
        .bind(&file.description)
        .fetch_one(self.pool)
        .await?;

        Ok(record)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM case_files WHERE file_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
