// File: crates/tourlink_booking/src/doc.rs
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::models::{BookingRequest, CalendarEventDetails, ConfirmationResponse};

#[derive(OpenApi)]
#[openapi(
    paths(crate::handlers::send_mail_calendar_handler),
    components(schemas(BookingRequest, CalendarEventDetails, ConfirmationResponse)),
    tags(
        (name = "Booking", description = "Booking confirmation email and calendar invitation")
    )
)]
pub struct BookingApiDoc;
