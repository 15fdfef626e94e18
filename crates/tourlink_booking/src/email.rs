// --- File: crates/tourlink_booking/src/email.rs ---
//! Confirmation email text.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tourlink_common::services::CalendarEvent;

use crate::models::BookingRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationEmail {
    pub subject: String,
    pub body: String,
}

pub fn subject(request: &BookingRequest) -> String {
    format!(
        "Booking Confirmation: {} on {}",
        request.tour_type.trim(),
        request.tour_date.trim()
    )
}

fn local(instant: DateTime<Utc>, tz: Tz) -> String {
    instant
        .with_timezone(&tz)
        .format("%Y-%m-%d %H:%M %Z")
        .to_string()
}

/// Plain-text summary of the booking and its calendar entry.
pub fn compose(request: &BookingRequest, event: &CalendarEvent, tz: Tz) -> ConfirmationEmail {
    let mut lines = vec![
        format!("Dear {},", request.full_name()),
        String::new(),
        "Thank you for your booking. Here are your tour details:".to_string(),
        String::new(),
        format!("Tour: {}", request.tour_type.trim()),
        format!("Date: {}", request.tour_date.trim()),
    ];
    if let Some(time) = request.tour_time.as_deref().filter(|t| !t.trim().is_empty()) {
        lines.push(format!("Time: {}", time.trim()));
    }
    lines.push(format!("Participants: {}", request.participants));

    if let Some(method) = &request.payment_method {
        lines.push(format!("Payment method: {}", method));
    }
    if let Some(status) = &request.payment_status {
        lines.push(format!("Payment status: {}", status));
    }
    if let Some(price) = request.price {
        lines.push(format!("Price: {:.2}", price));
    }

    lines.push(String::new());
    lines.push(format!("Calendar event: {}", event.summary));
    lines.push(format!("Starts: {}", local(event.start_time, tz)));
    lines.push(format!("Ends: {}", local(event.end_time, tz)));
    if let Some(location) = &event.location {
        lines.push(format!("Location: {}", location));
    }

    lines.push(String::new());
    lines.push(format!(
        "A calendar invitation has been sent to {}.",
        request.customer_email
    ));
    lines.push(String::new());
    lines.push("We look forward to seeing you!".to_string());

    ConfirmationEmail {
        subject: subject(request),
        body: lines.join("\n"),
    }
}
