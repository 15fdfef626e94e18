// --- File: crates/tourlink_mail/src/service.rs ---
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tourlink_common::create_client;
use tourlink_common::services::{BoxFuture, NotificationResult, NotificationService, ServiceError};
use tourlink_config::MailConfig;
use tracing::{error, info};

use crate::payload::{Address, MailSendRequest};

const SEND_PATH: &str = "/v3/mail/send";

/// Mail API error types.
#[derive(Error, Debug)]
pub enum MailError {
    /// The request never got an answer (connect, TLS, timeout)
    #[error("Mail API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// The API key was refused
    #[error("Mail API rejected the API key (Status: {status_code})")]
    Unauthorized { status_code: u16 },

    /// Any other non-success answer
    #[error("Mail API returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    /// Missing or incomplete mail configuration
    #[error("Mail configuration missing or incomplete: {0}")]
    ConfigError(String),
}

impl From<MailError> for ServiceError {
    fn from(err: MailError) -> Self {
        match err {
            MailError::Unauthorized { .. } => ServiceError::Unauthorized(err.to_string()),
            MailError::ApiError { .. } => ServiceError::Rejected(err.to_string()),
            MailError::RequestError(_) => ServiceError::Unavailable(err.to_string()),
            MailError::ConfigError(_) => ServiceError::InvalidRequest(err.to_string()),
        }
    }
}

/// Sends mail through a SendGrid-compatible `v3/mail/send` endpoint.
pub struct HttpMailService {
    client: Client,
    endpoint: String,
    api_key: String,
    from: Address,
    reply_to: Option<Address>,
}

impl HttpMailService {
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        if config.api_key.trim().is_empty() {
            return Err(MailError::ConfigError("mail.api_key is empty".to_string()));
        }
        if config.from_address.trim().is_empty() {
            return Err(MailError::ConfigError(
                "mail.from_address is empty".to_string(),
            ));
        }

        let client = create_client(config.timeout_secs, false)?;

        Ok(Self {
            client,
            endpoint: format!("{}{}", config.api_base_url.trim_end_matches('/'), SEND_PATH),
            api_key: config.api_key.clone(),
            from: Address {
                email: config.from_address.clone(),
                name: config.from_name.clone(),
            },
            reply_to: config.reply_to.clone().map(Address::new),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl NotificationService for HttpMailService {
    type Error = MailError;

    fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        is_html: bool,
    ) -> BoxFuture<'_, NotificationResult, Self::Error> {
        let request = MailSendRequest::single(
            self.from.clone(),
            self.reply_to.clone(),
            to,
            subject,
            body,
            is_html,
        );
        let to = to.to_string();

        Box::pin(async move {
            info!("Sending email to {}: {}", to, request.subject);

            let resp = self
                .client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .json(&request)
                .send()
                .await
                .map_err(|e| {
                    error!("HTTP error sending email to {}: {}", to, e);
                    MailError::RequestError(e)
                })?;

            let status = resp.status();
            let message_id = resp
                .headers()
                .get("x-message-id")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();

            if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                error!("Mail API refused credentials: {}", status);
                return Err(MailError::Unauthorized {
                    status_code: status.as_u16(),
                });
            }

            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                error!("Mail API returned {}: {}", status, body);
                return Err(MailError::ApiError {
                    status_code: status.as_u16(),
                    message: body,
                });
            }

            info!("Email sent to {} (id: {:?})", to, message_id);
            Ok(NotificationResult {
                id: message_id,
                status: "accepted".to_string(),
            })
        })
    }
}
