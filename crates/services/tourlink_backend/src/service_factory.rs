// --- File: crates/services/tourlink_backend/src/service_factory.rs ---
//! Builds the external collaborators once at startup.

use std::sync::Arc;
use thiserror::Error;
use tourlink_common::services::{ServiceAdapter, SharedCalendarService, SharedNotificationService};
use tourlink_common::time::TimeParseError;
use tourlink_config::AppConfig;
use tourlink_gcal::{
    auth::{create_calendar_hub, GcalAuthError},
    service::GoogleCalendarService,
};
use tourlink_mail::{HttpMailService, MailError};
use tracing::info;

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Mail service setup failed: {0}")]
    Mail(#[from] MailError),
    #[error("Google Calendar setup failed: {0}")]
    Calendar(#[from] GcalAuthError),
    #[error("Invalid calendar settings: {0}")]
    CalendarSettings(#[from] TimeParseError),
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },
    #[error("Server error: {0}")]
    Serve(std::io::Error),
}

/// The collaborators shared by all handlers.
#[derive(Clone)]
pub struct TourlinkServices {
    pub mailer: SharedNotificationService,
    pub calendar: SharedCalendarService,
}

impl TourlinkServices {
    /// Connects the mail API client and authenticates to Google Calendar.
    pub async fn from_config(config: &AppConfig) -> Result<Self, StartupError> {
        let mailer = HttpMailService::new(&config.mail)?;
        info!("Mail service ready at {}", mailer.endpoint());

        let hub = create_calendar_hub(&config.gcal).await?;
        let calendar = GoogleCalendarService::new(Arc::new(hub), config.gcal.send_updates.clone());
        info!("Google Calendar ready for calendar '{}'", config.gcal.calendar_id);

        Ok(Self {
            mailer: Arc::new(ServiceAdapter(mailer)),
            calendar: Arc::new(ServiceAdapter(calendar)),
        })
    }
}
