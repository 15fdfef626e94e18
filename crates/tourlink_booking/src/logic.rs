// --- File: crates/tourlink_booking/src/logic.rs ---
use thiserror::Error;
use tourlink_common::services::{
    CalendarEvent, ServiceError, SharedCalendarService, SharedNotificationService,
};
use tourlink_common::{external_service_error, upstream_auth_error, validation_error, TourlinkError};
use tourlink_gcal::handlers::CALENDAR_SERVICE_NAME;
use tourlink_gcal::logic::{merge_attendees, prepare_event, EventDefaults, EventInput};
use tracing::{error, info};

use crate::email::{compose, ConfirmationEmail};
use crate::models::{BookingRequest, ConfirmationResult};

pub const SUCCESS_MESSAGE: &str = "Email sent and event added to Google Calendar successfully!";

const EMAIL_SERVICE_NAME: &str = "email";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NotifyError {
    #[error("{0}")]
    Validation(String),
    #[error("Failed to send confirmation email: {0}")]
    EmailDelivery(ServiceError),
    #[error("Calendar credentials rejected after the confirmation email was sent: {0}")]
    CalendarAuth(ServiceError),
    #[error("Failed to add event to Google Calendar after the confirmation email was sent: {0}")]
    CalendarApi(ServiceError),
}

impl From<NotifyError> for TourlinkError {
    fn from(err: NotifyError) -> Self {
        match &err {
            NotifyError::Validation(m) => validation_error(m),
            NotifyError::EmailDelivery(_) => external_service_error(EMAIL_SERVICE_NAME, &err),
            NotifyError::CalendarAuth(_) => upstream_auth_error(CALENDAR_SERVICE_NAME, &err),
            NotifyError::CalendarApi(_) => external_service_error(CALENDAR_SERVICE_NAME, &err),
        }
    }
}

/// Classifies a failed calendar insert the same way `POST /create-event` does.
fn calendar_failure(err: ServiceError) -> NotifyError {
    match err {
        ServiceError::InvalidRequest(m) => NotifyError::Validation(m),
        e if e.is_auth_failure() => NotifyError::CalendarAuth(e),
        e => NotifyError::CalendarApi(e),
    }
}

/// Sends the confirmation email, then creates the calendar invitation.
///
/// A failed email stops the pipeline before the calendar is touched. A failed
/// calendar insert leaves the sent email in place.
pub struct BookingNotifier {
    mailer: SharedNotificationService,
    calendar: SharedCalendarService,
    defaults: EventDefaults,
}

impl BookingNotifier {
    pub fn new(
        mailer: SharedNotificationService,
        calendar: SharedCalendarService,
        defaults: EventDefaults,
    ) -> Self {
        Self {
            mailer,
            calendar,
            defaults,
        }
    }

    /// Validates the booking and builds both outgoing messages without side effects.
    pub fn prepare(
        &self,
        request: &BookingRequest,
    ) -> Result<(ConfirmationEmail, CalendarEvent), NotifyError> {
        request
            .validate()
            .map_err(|e| NotifyError::Validation(e.to_string()))?;

        let details = &request.calendar_event;
        let event = prepare_event(
            EventInput {
                summary: &details.title,
                description: details.description.clone(),
                location: details.location.clone(),
                start: &details.start_date_time,
                end: &details.end_date_time,
                attendees: merge_attendees(
                    Some(request.customer_email.as_str()),
                    &details.attendees,
                ),
            },
            &self.defaults,
        )
        .map_err(|e| NotifyError::Validation(e.to_string()))?;

        let email = compose(request, &event, self.defaults.time_zone);
        Ok((email, event))
    }

    pub async fn notify(&self, request: &BookingRequest) -> Result<ConfirmationResult, NotifyError> {
        let (email, event) = self.prepare(request)?;

        info!(
            "Sending booking confirmation for '{}' to {}",
            request.tour_type, request.customer_email
        );
        let sent = self
            .mailer
            .send_email(&request.customer_email, &email.subject, &email.body, false)
            .await
            .map_err(|e| {
                error!("Confirmation email to {} failed: {}", request.customer_email, e);
                NotifyError::EmailDelivery(e)
            })?;

        info!(
            "Creating calendar event '{}' for {} attendee(s)",
            event.summary,
            event.attendees.len()
        );
        let created = self
            .calendar
            .create_event(&self.defaults.calendar_id, event)
            .await
            .map_err(|e| {
                error!(
                    "Calendar event for {} failed after email {}: {}",
                    request.customer_email, sent.id, e
                );
                calendar_failure(e)
            })?;

        info!(
            "Booking for {} confirmed (email {}, event {:?})",
            request.customer_email, sent.id, created.event_id
        );

        Ok(ConfirmationResult {
            message: SUCCESS_MESSAGE.to_string(),
            email_id: sent.id,
            event_id: created.event_id,
            event_link: created.html_link,
        })
    }
}
