// File: crates/tourlink_gcal/src/handlers.rs
use axum::{extract::rejection::JsonRejection, extract::State, response::Json};
use std::sync::Arc;
use tourlink_common::services::{ServiceError, SharedCalendarService};
use tourlink_common::{external_service_error, upstream_auth_error, validation_error, TourlinkError};
use tracing::{error, info};

use crate::logic::{CreateEventRequest, CreateEventResponse, EventDefaults};

pub const CALENDAR_SERVICE_NAME: &str = "Google Calendar";

// Shared state needed by GCal handlers
#[derive(Clone)]
pub struct GcalState {
    pub calendar: SharedCalendarService,
    pub defaults: EventDefaults,
}

/// Maps a calendar collaborator failure onto the HTTP error type.
pub fn calendar_error(err: ServiceError) -> TourlinkError {
    match err {
        ServiceError::Unauthorized(m) => upstream_auth_error(CALENDAR_SERVICE_NAME, m),
        ServiceError::InvalidRequest(m) => validation_error(m),
        other => external_service_error(CALENDAR_SERVICE_NAME, other),
    }
}

/// Handler to create a calendar event directly.
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/create-event",
    request_body = CreateEventRequest,
    responses(
        (status = 200, description = "Event created", body = CreateEventResponse),
        (status = 400, description = "Invalid event data"),
        (status = 502, description = "Google Calendar rejected the event or the credentials")
    ),
    tag = "Calendar"
))]
pub async fn create_event_handler(
    State(state): State<Arc<GcalState>>,
    payload: Result<Json<CreateEventRequest>, JsonRejection>,
) -> Result<Json<CreateEventResponse>, TourlinkError> {
    let Json(request) = payload.map_err(|rejection| validation_error(rejection.body_text()))?;

    let event = request
        .to_event(&state.defaults)
        .map_err(validation_error)?;

    info!(
        "Creating event '{}' with {} attendee(s)",
        event.summary,
        event.attendees.len()
    );

    let result = state
        .calendar
        .create_event(&state.defaults.calendar_id, event)
        .await
        .map_err(|e| {
            error!("Event creation failed: {}", e);
            calendar_error(e)
        })?;

    Ok(Json(CreateEventResponse {
        message: "Event created successfully!".to_string(),
        event_link: result.html_link,
    }))
}
