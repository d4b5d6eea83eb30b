use sqlx::PgPool;
use storage::{
    dto::sub_event::{CreateSubEventRequest, SubEventWithEventResponse, UpdateSubEventRequest},
    models::{Event, SubEvent},
    repository::{event::EventRepository, sub_event::SubEventRepository},
};

use crate::error::WebResult;
use crate::features::events::services::owned_event;

pub async fn get_sub_event(pool: &PgPool, id: i64) -> WebResult<SubEventWithEventResponse> {
    let sub_event = SubEventRepository::new(pool).find_by_id(id).await?;
    let event = EventRepository::new(pool).find_by_id(sub_event.event_id).await?;

    Ok(SubEventWithEventResponse {
        sub_event: sub_event.into(),
        event: event.into(),
    })
}

pub async fn list_owned_sub_events(pool: &PgPool, user_id: i64) -> WebResult<Vec<SubEvent>> {
    Ok(SubEventRepository::new(pool).list_for_owner(user_id).await?)
}

/// Load a sub-event whose parent event belongs to `user_id`
pub async fn owned_sub_event(
    pool: &PgPool,
    id: i64,
    user_id: i64,
) -> WebResult<(SubEvent, Event)> {
    let sub_event = SubEventRepository::new(pool).find_by_id(id).await?;
    let event = owned_event(pool, sub_event.event_id, user_id).await?;
    Ok((sub_event, event))
}

pub async fn create_sub_event(
    pool: &PgPool,
    request: &CreateSubEventRequest,
    user_id: i64,
) -> WebResult<SubEvent> {
    owned_event(pool, request.event_id, user_id).await?;

    let sub_event = SubEventRepository::new(pool).create(request).await?;
    tracing::info!(
        sub_event_id = sub_event.sub_event_id,
        event_id = request.event_id,
        "Sub-event created"
    );
    Ok(sub_event)
}

pub async fn update_sub_event(
    pool: &PgPool,
    id: i64,
    request: &UpdateSubEventRequest,
    user_id: i64,
) -> WebResult<SubEvent> {
    let (existing, _) = owned_sub_event(pool, id, user_id).await?;

    let sub_event = SubEventRepository::new(pool)
        .update(&existing, request)
        .await?;
    tracing::info!(sub_event_id = id, "Sub-event updated");
    Ok(sub_event)
}

pub async fn delete_sub_event(pool: &PgPool, id: i64, user_id: i64) -> WebResult<()> {
    owned_sub_event(pool, id, user_id).await?;
    SubEventRepository::new(pool).delete(id).await?;
    tracing::info!(sub_event_id = id, "Sub-event deleted");
    Ok(())
}
