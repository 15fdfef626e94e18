// File: crates/tourlink_booking/src/handlers.rs
use axum::{extract::rejection::JsonRejection, extract::State, response::Json};
use std::sync::Arc;
use tourlink_common::{validation_error, TourlinkError};
use tracing::info;

use crate::logic::BookingNotifier;
use crate::models::{BookingRequest, ConfirmationResponse};

#[derive(Clone)]
pub struct BookingState {
    pub notifier: Arc<BookingNotifier>,
}

/// Sends the confirmation email and adds the booking to Google Calendar.
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/send-mail-calendar",
    request_body = BookingRequest,
    responses(
        (status = 200, description = "Email sent and calendar event created", body = ConfirmationResponse),
        (status = 400, description = "Malformed or incomplete booking"),
        (status = 502, description = "Email provider or Google Calendar failed; the message names the stage")
    ),
    tag = "Booking"
))]
pub async fn send_mail_calendar_handler(
    State(state): State<Arc<BookingState>>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<Json<ConfirmationResponse>, TourlinkError> {
    let Json(request) = payload.map_err(|rejection| {
        info!("Rejected booking payload: {}", rejection.body_text());
        validation_error(rejection.body_text())
    })?;

    let result = state.notifier.notify(&request).await?;
    Ok(Json(result.into()))
}
