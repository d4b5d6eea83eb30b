use sqlx::PgPool;
use storage::{
    dto::{
        event::{CreateEventRequest, EventDetailResponse, UpdateEventRequest, check_date_order},
        sub_event::SubEventResponse,
    },
    models::Event,
    repository::{event::EventRepository, sub_event::SubEventRepository},
};

use crate::error::{WebError, WebResult};

pub async fn list_events(pool: &PgPool, user_id: i64) -> WebResult<Vec<Event>> {
    Ok(EventRepository::new(pool).list_for_owner(user_id).await?)
}

/// Load an event and require `user_id` to be its creator
pub async fn owned_event(pool: &PgPool, event_id: i64, user_id: i64) -> WebResult<Event> {
    let event = EventRepository::new(pool).find_by_id(event_id).await?;

    if event.created_by != user_id {
        tracing::warn!(event_id, user_id, "Rejected access to another user's event");
        return Err(WebError::Forbidden(
            "Only the event creator can manage this event".to_string(),
        ));
    }

    Ok(event)
}

pub async fn get_event_detail(pool: &PgPool, id: i64) -> WebResult<EventDetailResponse> {
    let event = EventRepository::new(pool).find_by_id(id).await?;
    let sub_events = SubEventRepository::new(pool).list_for_event(id).await?;

    Ok(EventDetailResponse {
        event: event.into(),
        sub_events: sub_events.into_iter().map(SubEventResponse::from).collect(),
    })
}

pub async fn create_event(
    pool: &PgPool,
    request: &CreateEventRequest,
    user_id: i64,
) -> WebResult<Event> {
    request
        .validate_dates()
        .map_err(|msg| WebError::BadRequest(msg.to_string()))?;

    let event = EventRepository::new(pool).create(request, user_id).await?;
    tracing::info!(event_id = event.event_id, user_id, "Event created");
    Ok(event)
}

pub async fn update_event(
    pool: &PgPool,
    id: i64,
    request: &UpdateEventRequest,
    user_id: i64,
) -> WebResult<Event> {
    let existing = owned_event(pool, id, user_id).await?;

    check_date_order(
        request.start_date.unwrap_or(existing.start_date),
        request.end_date.unwrap_or(existing.end_date),
    )
    .map_err(|msg| WebError::BadRequest(msg.to_string()))?;

    let event = EventRepository::new(pool).update(&existing, request).await?;
    tracing::info!(event_id = id, "Event updated");
    Ok(event)
}

pub async fn delete_event(pool: &PgPool, id: i64, user_id: i64) -> WebResult<()> {
    owned_event(pool, id, user_id).await?;
    EventRepository::new(pool).delete(id).await?;
    tracing::info!(event_id = id, "Event deleted");
    Ok(())
}

pub async fn list_sub_events(pool: &PgPool, event_id: i64) -> WebResult<Vec<SubEventResponse>> {
    EventRepository::new(pool).find_by_id(event_id).await?;

    let sub_events = SubEventRepository::new(pool).list_for_event(event_id).await?;
    Ok(sub_events.into_iter().map(SubEventResponse::from).collect())
}
