// --- File: crates/tourlink_booking/src/routes.rs ---
use axum::{routing::post, Router};
use std::sync::Arc;

use crate::handlers::{send_mail_calendar_handler, BookingState};

pub fn routes(state: Arc<BookingState>) -> Router {
    Router::new()
        .route("/send-mail-calendar", post(send_mail_calendar_handler))
        .with_state(state)
}
