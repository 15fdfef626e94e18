// --- File: crates/tourlink_gcal/src/service.rs ---
//! Google Calendar service implementation.
//!
//! This module provides an implementation of the CalendarService trait for Google Calendar.

use google_calendar3::api::{Event, EventAttendee, EventDateTime, EventReminder, EventReminders};
use std::sync::Arc;
use thiserror::Error;
use tourlink_common::services::{
    BoxFuture, CalendarEvent, CalendarEventResult, CalendarService, ServiceError,
};
use tracing::{error, info};

use crate::auth::HubType;

/// Errors that can occur when interacting with Google Calendar.
#[derive(Error, Debug)]
pub enum GcalServiceError {
    #[error("Google Calendar authentication failed: {0}")]
    Auth(String),
    #[error("Google Calendar API error: {0}")]
    Api(String),
    #[error("Could not reach Google Calendar: {0}")]
    Transport(String),
    #[error("Invalid event: {0}")]
    InvalidRequest(String),
}

impl From<google_calendar3::Error> for GcalServiceError {
    fn from(err: google_calendar3::Error) -> Self {
        use google_calendar3::Error as E;

        match err {
            E::MissingToken(e) => GcalServiceError::Auth(e.to_string()),
            E::BadRequest(value) => {
                let code = value.pointer("/error/code").and_then(|c| c.as_u64());
                let message = value
                    .pointer("/error/message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
                    .unwrap_or_else(|| value.to_string());
                if code == Some(401) {
                    GcalServiceError::Auth(message)
                } else {
                    GcalServiceError::Api(message)
                }
            }
            E::Failure(response) if response.status().as_u16() == 401 => {
                GcalServiceError::Auth(format!("HTTP {}", response.status()))
            }
            E::Failure(response) => GcalServiceError::Api(format!("HTTP {}", response.status())),
            E::HttpError(e) => GcalServiceError::Transport(e.to_string()),
            E::Io(e) => GcalServiceError::Transport(e.to_string()),
            other => GcalServiceError::Api(other.to_string()),
        }
    }
}

impl From<GcalServiceError> for ServiceError {
    fn from(err: GcalServiceError) -> Self {
        match err {
            GcalServiceError::Auth(m) => ServiceError::Unauthorized(m),
            GcalServiceError::Api(m) => ServiceError::Rejected(m),
            GcalServiceError::Transport(m) => ServiceError::Unavailable(m),
            GcalServiceError::InvalidRequest(m) => ServiceError::InvalidRequest(m),
        }
    }
}

/// Google Calendar service implementation.
pub struct GoogleCalendarService {
    calendar_hub: Arc<HubType>,
    send_updates: String,
}

impl GoogleCalendarService {
    /// Create a new Google Calendar service.
    ///
    /// `send_updates` is passed to the insert call as-is (`all`,
    /// `externalOnly` or `none`).
    pub fn new(calendar_hub: Arc<HubType>, send_updates: impl Into<String>) -> Self {
        Self {
            calendar_hub,
            send_updates: send_updates.into(),
        }
    }
}

/// Maps a provider-independent event onto the Calendar API resource.
///
/// Without reminder overrides the calendar's defaults apply.
pub fn build_event(event: &CalendarEvent) -> Event {
    let attendees = event
        .attendees
        .iter()
        .map(|email| EventAttendee {
            email: Some(email.clone()),
            ..Default::default()
        })
        .collect::<Vec<_>>();

    let reminders = if event.reminders.is_empty() {
        EventReminders {
            use_default: Some(true),
            overrides: None,
        }
    } else {
        EventReminders {
            use_default: Some(false),
            overrides: Some(
                event
                    .reminders
                    .iter()
                    .map(|r| EventReminder {
                        method: Some(r.method.as_str().to_string()),
                        minutes: Some(r.minutes),
                    })
                    .collect(),
            ),
        }
    };

    Event {
        summary: Some(event.summary.clone()),
        description: event.description.clone(),
        location: event.location.clone(),
        start: Some(EventDateTime {
            date_time: Some(event.start_time),
            time_zone: Some(event.time_zone.clone()),
            ..Default::default()
        }),
        end: Some(EventDateTime {
            date_time: Some(event.end_time),
            time_zone: Some(event.time_zone.clone()),
            ..Default::default()
        }),
        attendees: if attendees.is_empty() { None } else { Some(attendees) },
        reminders: Some(reminders),
        ..Default::default()
    }
}

impl CalendarService for GoogleCalendarService {
    type Error = GcalServiceError;

    /// Inserts the event and lets Google send the invitations.
    fn create_event(
        &self,
        calendar_id: &str,
        event: CalendarEvent,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
        let calendar_id = calendar_id.to_string();
        let calendar_hub = self.calendar_hub.clone();
        let send_updates = self.send_updates.clone();

        Box::pin(async move {
            if event.end_time <= event.start_time {
                return Err(GcalServiceError::InvalidRequest(
                    "End time must be after start time".to_string(),
                ));
            }

            let new_event = build_event(&event);

            let result = calendar_hub
                .events()
                .insert(new_event, &calendar_id)
                .send_updates(&send_updates)
                .doit()
                .await;

            let created_event = match result {
                Ok((_response, created)) => created,
                Err(e) => {
                    let err = GcalServiceError::from(e);
                    error!("Calendar insert into '{}' failed: {}", calendar_id, err);
                    return Err(err);
                }
            };

            info!(
                "Created calendar event {:?} in '{}'",
                created_event.id, calendar_id
            );

            Ok(CalendarEventResult {
                event_id: created_event.id,
                status: created_event
                    .status
                    .unwrap_or_else(|| "confirmed".to_string()),
                html_link: created_event.html_link,
            })
        })
    }
}
