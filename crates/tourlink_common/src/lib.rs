// --- File: crates/tourlink_common/src/lib.rs ---

pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod services; // Service abstractions
pub mod time; // Event timestamp parsing
pub mod validation; // Shared input checks

// Re-export error types and utilities for easier access
pub use error::{
    external_service_error, upstream_auth_error, validation_error, HttpStatusCode, TourlinkError,
};

// Re-export HTTP utilities for easier access
pub use http::{client::create_client, IntoHttpResponse};

pub use logging::{init, log_error, log_result};

pub use validation::{is_blank, is_valid_email};
