use sqlx::PgPool;

use crate::dto::sub_event::{CreateSubEventRequest, UpdateSubEventRequest};
use crate::error::{Result, StorageError};
use crate::models::SubEvent;

pub struct SubEventRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SubEventRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Sub-events of an event in schedule order
    pub async fn list_for_event(&self, event_id: i64) -> Result<Vec<SubEvent>> {
        let sub_events = sqlx::query_as::<_, SubEvent>(
            r#"
            SELECT sub_event_id, event_id, title, date, time, location, status,
                   created_at, updated_at
            FROM sub_events
            WHERE event_id = $1
            ORDER BY date, time
            "#,
        )
        .bind(event_id)
        .fetch_all(self.pool)
        .await?;

        Ok(sub_events)
    }

    /// Sub-events of every event created by `user_id`, most recent first
    pub async fn list_for_owner(&self, user_id: i64) -> Result<Vec<SubEvent>> {
        let sub_events = sqlx::query_as::<_, SubEvent>(
            r#"
            SELECT s.sub_event_id, s.event_id, s.title, s.date, s.time, s.location, s.status,
                   s.created_at, s.updated_at
            FROM sub_events s
            JOIN events e ON e.event_id = s.event_id
            WHERE e.created_by = $1
            ORDER BY s.date DESC, s.time DESC, s.sub_event_id
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(sub_events)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<SubEvent> {
        sqlx::query_as::<_, SubEvent>(
            r#"
            SELECT sub_event_id, event_id, title, date, time, location, status,
                   created_at, updated_at
            FROM sub_events
            WHERE sub_event_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn create(&self, req: &CreateSubEventRequest) -> Result<SubEvent> {
        let sub_event = sqlx::query_as::<_, SubEvent>(
            r#"
            INSERT INTO sub_events (event_id, title, date, time, location, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING sub_event_id, event_id, title, date, time, location, status,
                      created_at, updated_at
            "#,
        )
        .bind(req.event_id)
        .bind(&req.title)
        .bind(req.date)
        .bind(req.time)
        .bind(&req.location)
        .bind(&req.status)
        .fetch_one(self.pool)
        .await?;

        Ok(sub_event)
    }

    pub async fn update(&self, existing: &SubEvent, req: &UpdateSubEventRequest) -> Result<SubEvent> {
        let sub_event = sqlx::query_as::<_, SubEvent>(
            r#"
            UPDATE sub_events
            SET title = $2,
                date = $3,
                time = $4,
                location = $5,
                status = $6,
                updated_at = NOW()
            WHERE sub_event_id = $1
            RETURNING sub_event_id, event_id, title, date, time, location, status,
                      created_at, updated_at
            "#,
        )
        .bind(existing.sub_event_id)
        .bind(req.title.as_ref().unwrap_or(&existing.title))
        .bind(req.date.unwrap_or(existing.date))
        .bind(req.time.unwrap_or(existing.time))
        .bind(req.location.as_ref().unwrap_or(&existing.location))
        .bind(req.status.as_ref().unwrap_or(&existing.status))
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(sub_event)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM sub_events WHERE sub_event_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
