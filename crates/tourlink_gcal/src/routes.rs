// --- File: crates/tourlink_gcal/src/routes.rs ---

use crate::handlers::{create_event_handler, GcalState};
use axum::{routing::post, Router};
use std::sync::Arc;

/// Creates a router containing the direct calendar routes.
pub fn routes(state: Arc<GcalState>) -> Router {
    Router::new()
        .route("/create-event", post(create_event_handler))
        .with_state(state)
}
