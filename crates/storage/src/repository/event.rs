use sqlx::PgPool;

use crate::dto::event::{CreateEventRequest, UpdateEventRequest};
use crate::error::{Result, StorageError};
use crate::models::Event;

/// Repository for Event database operations
pub struct EventRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EventRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Events created by `user_id`, newest year first
    pub async fn list_for_owner(&self, user_id: i64) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT event_id, title, year, start_date, end_date, location, status,
                   created_by, created_at, updated_at
            FROM events
            WHERE created_by = $1
            ORDER BY year DESC, start_date DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(events)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Event> {
        sqlx::query_as::<_, Event>(
            r#"
            SELECT event_id, title, year, start_date, end_date, location, status,
                   created_by, created_at, updated_at
            FROM events
            WHERE event_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn create(&self, req: &CreateEventRequest, created_by: i64) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (title, year, start_date, end_date, location, status, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING event_id, title, year, start_date, end_date, location, status,
                      created_by, created_at, updated_at
            "#,
        )
        .bind(&req.title)
        .bind(req.year)
        .bind(req.start_date)
        .bind(req.end_date)
        .bind(&req.location)
        .bind(&req.status)
        .bind(created_by)
        .fetch_one(self.pool)
        .await?;

        Ok(event)
    }

    pub async fn update(&self, existing: &Event, req: &UpdateEventRequest) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET title = $2,
                year = $3,
                start_date = $4,
                end_date = $5,
                location = $6,
                status = $7,
                updated_at = NOW()
            WHERE event_id = $1
            RETURNING event_id, title, year, start_date, end_date, location, status,
                      created_by, created_at, updated_at
            "#,
        )
        .bind(existing.event_id)
        .bind(req.title.as_ref().unwrap_or(&existing.title))
        .bind(req.year.unwrap_or(existing.year))
        .bind(req.start_date.unwrap_or(existing.start_date))
        .bind(req.end_date.unwrap_or(existing.end_date))
        .bind(req.location.as_ref().unwrap_or(&existing.location))
        .bind(req.status.as_ref().unwrap_or(&existing.status))
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(event)
    }

    /// Delete an event; its sub-events and their settings and scores cascade
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM events WHERE event_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
