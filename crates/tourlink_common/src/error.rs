// --- File: crates/tourlink_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type returned across the HTTP boundary.
///
/// Each crate keeps its own error enum and converts into this one where a
/// handler turns it into a response.
#[derive(Error, Debug)]
pub enum TourlinkError {
    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// An upstream service refused our credentials
    #[error("Authentication with {service_name} failed: {message}")]
    UpstreamAuthError {
        service_name: String,
        message: String,
    },

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for TourlinkError {
    fn status_code(&self) -> u16 {
        match self {
            TourlinkError::ValidationError(_) => 400,
            TourlinkError::UpstreamAuthError { .. } => 502,
            TourlinkError::ExternalServiceError { .. } => 502,
        }
    }
}

pub fn validation_error<T: fmt::Display>(message: T) -> TourlinkError {
    TourlinkError::ValidationError(message.to_string())
}

pub fn upstream_auth_error<T: fmt::Display>(service_name: &str, message: T) -> TourlinkError {
    TourlinkError::UpstreamAuthError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> TourlinkError {
    TourlinkError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}
