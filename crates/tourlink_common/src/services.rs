// --- File: crates/tourlink_common/src/services.rs ---
//! Service abstractions for external services.
//!
//! The booking pipeline talks to its two collaborators only through these
//! traits, so handlers can be exercised with recording fakes and the concrete
//! Google Calendar / mail API clients stay in their own crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Provider-independent failure of an external collaborator.
///
/// Concrete service errors convert into this so the pipeline can tell an
/// authentication problem from any other upstream failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Credentials were rejected, expired or could not be obtained
    #[error("authentication failed: {0}")]
    Unauthorized(String),
    /// The provider answered but refused the request (quota, malformed payload, ...)
    #[error("request rejected: {0}")]
    Rejected(String),
    /// The provider could not be reached or timed out
    #[error("service unreachable: {0}")]
    Unavailable(String),
    /// The request could not be built from the given input
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ServiceError {
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ServiceError::Unauthorized(_))
    }
}

/// A trait for calendar service operations.
pub trait CalendarService: Send + Sync {
    /// Error type returned by calendar service operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Create a calendar event and invite its attendees.
    fn create_event(
        &self,
        calendar_id: &str,
        event: CalendarEvent,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error>;
}

/// A trait for notification service operations.
pub trait NotificationService: Send + Sync {
    /// Error type returned by notification service operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Send an email notification.
    fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        is_html: bool,
    ) -> BoxFuture<'_, NotificationResult, Self::Error>;
}

/// Calendar service shared between handlers.
pub type SharedCalendarService = Arc<dyn CalendarService<Error = ServiceError>>;

/// Notification service shared between handlers.
pub type SharedNotificationService = Arc<dyn NotificationService<Error = ServiceError>>;

/// Wraps a concrete service so its errors surface as [`ServiceError`].
///
/// ```ignore
/// let calendar: SharedCalendarService = Arc::new(ServiceAdapter(GoogleCalendarService::new(hub, "all")));
/// ```
pub struct ServiceAdapter<S>(pub S);

impl<S> CalendarService for ServiceAdapter<S>
where
    S: CalendarService,
    S::Error: Into<ServiceError>,
{
    type Error = ServiceError;

    fn create_event(
        &self,
        calendar_id: &str,
        event: CalendarEvent,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
        let inner = self.0.create_event(calendar_id, event);
        Box::pin(async move { inner.await.map_err(Into::into) })
    }
}

impl<S> NotificationService for ServiceAdapter<S>
where
    S: NotificationService,
    S::Error: Into<ServiceError>,
{
    type Error = ServiceError;

    fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        is_html: bool,
    ) -> BoxFuture<'_, NotificationResult, Self::Error> {
        let inner = self.0.send_email(to, subject, body, is_html);
        Box::pin(async move { inner.await.map_err(Into::into) })
    }
}

/// How a reminder is delivered to attendees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderMethod {
    Email,
    Popup,
}

impl ReminderMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderMethod::Email => "email",
            ReminderMethod::Popup => "popup",
        }
    }
}

/// A reminder override on a calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub method: ReminderMethod,
    /// Minutes before the event start.
    pub minutes: i32,
}

/// Data structures for calendar service operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// The summary or title of the event.
    pub summary: String,
    /// An optional description of the event.
    pub description: Option<String>,
    pub location: Option<String>,
    /// The start time of the event.
    pub start_time: DateTime<Utc>,
    /// The end time of the event.
    pub end_time: DateTime<Utc>,
    /// IANA zone the event is displayed in.
    pub time_zone: String,
    /// Invitee addresses; invitations are sent to each.
    pub attendees: Vec<String>,
    /// Reminder overrides; empty means the calendar defaults.
    pub reminders: Vec<Reminder>,
}

/// Represents the result of a calendar event operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEventResult {
    /// The ID of the event.
    pub event_id: Option<String>,
    /// The status of the event.
    pub status: String,
    /// Link to the event in the calendar web UI.
    pub html_link: Option<String>,
}

/// Represents the result of a notification operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationResult {
    /// Provider message ID, empty if the provider did not return one.
    pub id: String,
    /// The status of the notification.
    pub status: String,
}
