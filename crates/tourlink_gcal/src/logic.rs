// --- File: crates/tourlink_gcal/src/logic.rs ---
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tourlink_common::services::{CalendarEvent, Reminder, ReminderMethod};
use tourlink_common::time::{parse_event_time, parse_time_zone, TimeParseError};
use tourlink_common::validation::{is_blank, is_valid_email};
use tourlink_config::{GcalConfig, ReminderConfig};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

// --- Error Handling ---
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventInputError {
    #[error("Event title must not be empty")]
    MissingSummary,
    #[error("Invalid {field}: {source}")]
    InvalidTime {
        field: &'static str,
        source: TimeParseError,
    },
    #[error("End time must be after start time")]
    EmptyRange,
    #[error("Invalid attendee email address: '{0}'")]
    InvalidAttendee(String),
}

// --- Data Structures ---
#[derive(Deserialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreateEventRequest {
    #[cfg_attr(feature = "openapi", schema(example = "Heritage Walk"))]
    pub summary: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// RFC 3339, or local time in the calendar's zone
    #[cfg_attr(feature = "openapi", schema(example = "2025-10-25T19:00:00"))]
    pub start: String,
    #[cfg_attr(feature = "openapi", schema(example = "2025-10-25T21:00:00"))]
    pub end: String,
    #[serde(default)]
    pub attendees: Vec<String>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreateEventResponse {
    #[cfg_attr(feature = "openapi", schema(example = "Event created successfully!"))]
    pub message: String,
    pub event_link: Option<String>,
}

/// Calendar-wide settings applied to every created event.
#[derive(Debug, Clone)]
pub struct EventDefaults {
    pub calendar_id: String,
    pub time_zone: Tz,
    pub reminders: Vec<Reminder>,
}

impl EventDefaults {
    pub fn from_config(config: &GcalConfig) -> Result<Self, TimeParseError> {
        Ok(Self {
            calendar_id: config.calendar_id.clone(),
            time_zone: parse_time_zone(&config.time_zone)?,
            reminders: reminders_from_config(&config.reminders),
        })
    }
}

/// Email reminder first, then popup; unset entries are skipped.
pub fn reminders_from_config(config: &ReminderConfig) -> Vec<Reminder> {
    let email = config.email_minutes.map(|minutes| Reminder {
        method: ReminderMethod::Email,
        minutes,
    });
    let popup = config.popup_minutes.map(|minutes| Reminder {
        method: ReminderMethod::Popup,
        minutes,
    });
    email.into_iter().chain(popup).collect()
}

/// Joins the primary invitee with the extra addresses, keeping the first
/// occurrence of each address (compared case-insensitively).
pub fn merge_attendees(primary: Option<&str>, extra: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(extra.len() + 1);
    for address in primary.into_iter().chain(extra.iter().map(String::as_str)) {
        let address = address.trim();
        if address.is_empty() {
            continue;
        }
        if !merged.iter().any(|m| m.eq_ignore_ascii_case(address)) {
            merged.push(address.to_string());
        }
    }
    merged
}

/// Raw event fields as they arrive from a request body.
#[derive(Debug, Clone)]
pub struct EventInput<'a> {
    pub summary: &'a str,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: &'a str,
    pub end: &'a str,
    pub attendees: Vec<String>,
}

/// Validates raw input and produces the event handed to the calendar.
pub fn prepare_event(
    input: EventInput<'_>,
    defaults: &EventDefaults,
) -> Result<CalendarEvent, EventInputError> {
    if is_blank(input.summary) {
        return Err(EventInputError::MissingSummary);
    }

    let start_time = parse_event_time(input.start, defaults.time_zone).map_err(|source| {
        EventInputError::InvalidTime {
            field: "start time",
            source,
        }
    })?;
    let end_time = parse_event_time(input.end, defaults.time_zone).map_err(|source| {
        EventInputError::InvalidTime {
            field: "end time",
            source,
        }
    })?;
    if end_time <= start_time {
        return Err(EventInputError::EmptyRange);
    }

    if let Some(bad) = input.attendees.iter().find(|a| !is_valid_email(a.trim())) {
        return Err(EventInputError::InvalidAttendee(bad.clone()));
    }

    Ok(CalendarEvent {
        summary: input.summary.trim().to_string(),
        description: input.description,
        location: input.location.filter(|l| !is_blank(l)),
        start_time,
        end_time,
        time_zone: defaults.time_zone.name().to_string(),
        attendees: input.attendees,
        reminders: defaults.reminders.clone(),
    })
}

impl CreateEventRequest {
    pub fn to_event(&self, defaults: &EventDefaults) -> Result<CalendarEvent, EventInputError> {
        prepare_event(
            EventInput {
                summary: &self.summary,
                description: self.description.clone(),
                location: self.location.clone(),
                start: &self.start,
                end: &self.end,
                attendees: merge_attendees(None, &self.attendees),
            },
            defaults,
        )
    }
}
