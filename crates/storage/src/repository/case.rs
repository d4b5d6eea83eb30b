use sqlx::PgPool;

use crate::dto::case::{CreateCaseRequest, UpdateCaseRequest};
use crate::dto::common::PaginationParams;
use crate::error::{Result, StorageError};
use crate::models::Case;

const CASE_COLUMNS: &str = "case_id, case_number, title, description, status, priority, \
     assigned_to, created_by, created_at, updated_at, due_date";

pub struct CaseRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CaseRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Cases the user opened or is assigned to, newest first
    pub async fn list_for_user(
        &self,
        user_id: i64,
        pagination: &PaginationParams,
    ) -> Result<(Vec<Case>, i64)> {
        let cases = sqlx::query_as::<_, Case>(&format!(
            r#"
            SELECT {}
            FROM cases
            WHERE created_by = $1 OR assigned_to = $1
            ORDER BY created_at DESC, case_id DESC
            LIMIT $2 OFFSET $3
            "#,
            CASE_COLUMNS
        ))
        .bind(user_id)
        .bind(pagination.limit() as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM cases WHERE created_by = $1 OR assigned_to = $1",
        )
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;

        Ok((cases, total))
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Case> {
        sqlx::query_as::<_, Case>(&format!(
            "SELECT {} FROM cases WHERE case_id = $1",
            CASE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn create(&self, req: &CreateCaseRequest, created_by: i64) -> Result<Case> {
        let case = sqlx::query_as::<_, Case>(&format!(
            r#"
            INSERT INTO cases (case_number, title, description, status, priority,
                               assigned_to, created_by, due_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            CASE_COLUMNS
        ))
        .bind(&req.case_number)
        .bind(&req.title)
        .bind(&req.description)
        .bind(&req.status)
        .bind(&req.priority)
        .bind(req.assigned_to)
        .bind(created_by)
        .bind(req.due_date)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            let err = StorageError::from(e);
            if err.is_foreign_key_violation() {
                StorageError::ConstraintViolation("Assigned user does not exist".to_string())
            } else {
                err.on_constraint("Case number already exists")
            }
        })?;

        Ok(case)
    }

    pub async fn update(&self, existing: &Case, req: &UpdateCaseRequest) -> Result<Case> {
        let case = sqlx::query_as::<_, Case>(&format!(
            r#"
            UPDATE cases
            SET case_number = $2,
                title = $3,
                description = $4,
                status = $5,
                priority = $6,
                assigned_to = $7,
                due_date = $8,
                updated_at = NOW()
            WHERE case_id = $1
            RETURNING {}
            "#,
            CASE_COLUMNS
        ))
        .bind(existing.case_id)
        .bind(req.case_number.as_ref().unwrap_or(&existing.case_number))
        .bind(req.title.as_ref().unwrap_or(&existing.title))
        .bind(req.description.as_ref().unwrap_or(&existing.description))
        .bind(req.status.as_ref().unwrap_or(&existing.status))
        .bind(req.priority.as_ref().unwrap_or(&existing.priority))
        .bind(req.assigned_to.or(existing.assigned_to))
        .bind(req.due_date.or(existing.due_date))
        .fetch_optional(self.pool)
        .await
        .map_err(|e| {
            let err = StorageError::from(e);
            if err.is_foreign_key_violation() {
                StorageError::ConstraintViolation("Assigned user does not exist".to_string())
            } else {
                err.on_constraint("Case number already exists")
            }
        })?
        .ok_or(StorageError::NotFound)?;

        Ok(case)
    }

    /// Delete a case; notes and file records cascade
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM cases WHERE case_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
