use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::dto::sub_event::SubEventResponse;
use crate::models::{Event, EventStatus};

/// Request payload for creating a new event
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateEventRequest {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title must be between 1 and 200 characters"
    ))]
    pub title: String,

    #[validate(range(min = 1900, max = 2999))]
    pub year: i32,

    pub start_date: NaiveDate,

    pub end_date: NaiveDate,

    #[validate(length(min = 1, max = 200, message = "Location is required"))]
    pub location: String,

    #[validate(custom(function = "validate_event_status"))]
    #[serde(default = "default_status")]
    pub status: String,
}

/// Request payload for updating an existing event
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(range(min = 1900, max = 2999))]
    pub year: Option<i32>,

    pub start_date: Option<NaiveDate>,

    pub end_date: Option<NaiveDate>,

    #[validate(length(min = 1, max = 200))]
    pub location: Option<String>,

    #[validate(custom(function = "validate_event_status"))]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventResponse {
    pub id: i64,
    pub title: String,
    pub year: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub location: String,
    pub status: String,
    pub created_by: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Event with its sub-events in schedule order
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventDetailResponse {
    #[serde(flatten)]
    pub event: EventResponse,
    pub sub_events: Vec<SubEventResponse>,
}

impl CreateEventRequest {
    pub fn validate_dates(&self) -> Result<(), &'static str> {
        check_date_order(self.start_date, self.end_date)
    }
}

pub fn check_date_order(start: NaiveDate, end: NaiveDate) -> Result<(), &'static str> {
    if end < start {
        Err("end_date must not be before start_date")
    } else {
        Ok(())
    }
}

fn default_status() -> String {
    EventStatus::Deactivated.as_str().to_string()
}

pub(crate) fn validate_event_status(status: &str) -> Result<(), validator::ValidationError> {
    if EventStatus::ALL.contains(&status) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_status"))
    }
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            id: event.event_id,
            title: event.title,
            year: event.year,
            start_date: event.start_date,
            end_date: event.end_date,
            location: event.location,
            status: event.status,
            created_by: event.created_by,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_event_defaults_to_deactivated() {
        let req: CreateEventRequest = serde_json::from_value(json!({
            "title": "Spring Pageant",
            "year": 2025,
            "start_date": "2025-03-01",
            "end_date": "2025-03-02",
            "location": "Main Hall"
        }))
        .unwrap();

        assert_eq!(req.status, "deactivated");
        assert!(req.validate().is_ok());
        assert!(req.validate_dates().is_ok());
    }

    #[test]
    fn test_end_before_start_rejected() {
        let start = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert!(check_date_order(start, end).is_err());
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert!(validate_event_status("archived").is_err());
        assert!(validate_event_status("activated").is_ok());
    }
}
