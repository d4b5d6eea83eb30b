use sqlx::PgPool;
use storage::{
    dto::settings::{SaveSettingsRequest, SettingsResponse},
    repository::{
        event::EventRepository, settings::SettingsRepository, sub_event::SubEventRepository,
    },
};

use crate::error::WebResult;
use crate::features::subevents::services::owned_sub_event;

/// Current settings; judge codes are included only for the event creator
pub async fn get_settings(
    pool: &PgPool,
    sub_event_id: i64,
    viewer: Option<i64>,
) -> WebResult<SettingsResponse> {
    let sub_event = SubEventRepository::new(pool).find_by_id(sub_event_id).await?;
    let event = EventRepository::new(pool).find_by_id(sub_event.event_id).await?;
    let settings = SettingsRepository::new(pool).load(sub_event_id).await?;

    Ok(SettingsResponse::new(
        sub_event_id,
        settings.contestants,
        settings.judges,
        settings.criteria,
        viewer == Some(event.created_by),
    ))
}

pub async fn save_settings(
    pool: &PgPool,
    sub_event_id: i64,
    request: &SaveSettingsRequest,
    user_id: i64,
) -> WebResult<SettingsResponse> {
    owned_sub_event(pool, sub_event_id, user_id).await?;

    let settings = SettingsRepository::new(pool)
        .save(sub_event_id, request)
        .await?;

    Ok(SettingsResponse::new(
        sub_event_id,
        settings.contestants,
        settings.judges,
        settings.criteria,
        true,
    ))
}
