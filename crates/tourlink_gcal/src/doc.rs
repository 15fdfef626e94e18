// File: crates/tourlink_gcal/src/doc.rs
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::logic::{CreateEventRequest, CreateEventResponse};

#[derive(OpenApi)]
#[openapi(
    paths(crate::handlers::create_event_handler),
    components(schemas(CreateEventRequest, CreateEventResponse)),
    tags(
        (name = "Calendar", description = "Direct Google Calendar event creation")
    )
)]
pub struct GcalApiDoc;
