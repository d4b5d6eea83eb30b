use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::dto::event::{EventResponse, validate_event_status};
use crate::models::{EventStatus, SubEvent};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateSubEventRequest {
    pub event_id: i64,

    #[validate(length(
        min = 1,
        max = 200,
        message = "Title must be between 1 and 200 characters"
    ))]
    pub title: String,

    pub date: NaiveDate,

    #[schema(value_type = String, example = "18:30:00")]
    pub time: NaiveTime,

    #[validate(length(min = 1, max = 200, message = "Location is required"))]
    pub location: String,

    #[validate(custom(function = "validate_event_status"))]
    #[serde(default = "default_status")]
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateSubEventRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    pub date: Option<NaiveDate>,

    #[schema(value_type = Option<String>)]
    pub time: Option<NaiveTime>,

    #[validate(length(min = 1, max = 200))]
    pub location: Option<String>,

    #[validate(custom(function = "validate_event_status"))]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubEventResponse {
    pub id: i64,
    pub event_id: i64,
    pub title: String,
    pub date: NaiveDate,
    #[schema(value_type = String)]
    pub time: NaiveTime,
    pub location: String,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Sub-event with its parent event embedded
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubEventWithEventResponse {
    #[serde(flatten)]
    pub sub_event: SubEventResponse,
    pub event: EventResponse,
}

fn default_status() -> String {
    EventStatus::Deactivated.as_str().to_string()
}

impl From<SubEvent> for SubEventResponse {
    fn from(sub_event: SubEvent) -> Self {
        Self {
            id: sub_event.sub_event_id,
            event_id: sub_event.event_id,
            title: sub_event.title,
            date: sub_event.date,
            time: sub_event.time,
            location: sub_event.location,
            status: sub_event.status,
            created_at: sub_event.created_at,
            updated_at: sub_event.updated_at,
        }
    }
}
