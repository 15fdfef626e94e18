// File: crates/tourlink_gcal/src/auth.rs
use google_calendar3::{
    common::Body,
    hyper_rustls::{self, HttpsConnectorBuilder},
    hyper_util::client::legacy::connect::HttpConnector,
    hyper_util::client::legacy::Client,
    yup_oauth2::{
        authorized_user::AuthorizedUserSecret, read_application_secret,
        read_service_account_key, ApplicationSecret, AuthorizedUserAuthenticator,
        ServiceAccountAuthenticator,
    },
    CalendarHub,
};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tourlink_config::GcalConfig;
use tracing::info;

// Type aliases for clarity
type Connector = hyper_rustls::HttpsConnector<HttpConnector>;

pub type HubType = CalendarHub<Connector>;

/// Errors raised while building the authenticated calendar client at startup.
#[derive(Error, Debug)]
pub enum GcalAuthError {
    #[error("Google Calendar credentials not configured (need client secrets + token file, or a service account key)")]
    MissingCredentials,
    #[error("Failed to read OAuth client secrets '{path}': {source}")]
    ClientSecrets {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to read token file '{path}': {source}")]
    TokenFile {
        path: String,
        source: std::io::Error,
    },
    #[error("Token file '{path}' is not an authorized-user token: {source}")]
    InvalidToken {
        path: String,
        source: serde_json::Error,
    },
    #[error("Failed to read service account key '{path}': {source}")]
    ServiceAccountKey {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to build authenticator: {0}")]
    Authenticator(std::io::Error),
    #[error("Failed to load TLS roots: {0}")]
    Tls(std::io::Error),
}

/// The persisted authorized-user token, as written by Google's OAuth helper
/// libraries (`token.json`). Only the fields needed to refresh are read.
#[derive(Deserialize, Debug)]
pub struct StoredUserToken {
    pub refresh_token: String,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
}

/// Combines the client secret file and the stored token into the secret the
/// authenticator refreshes from. Client fields inside the token win.
pub fn authorized_user_secret(
    client: &ApplicationSecret,
    token: StoredUserToken,
) -> AuthorizedUserSecret {
    AuthorizedUserSecret {
        client_id: token.client_id.unwrap_or_else(|| client.client_id.clone()),
        client_secret: token
            .client_secret
            .unwrap_or_else(|| client.client_secret.clone()),
        refresh_token: token.refresh_token,
        key_type: "authorized_user".to_string(),
    }
}

async fn read_user_token(path: &str) -> Result<StoredUserToken, GcalAuthError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| GcalAuthError::TokenFile {
            path: path.to_string(),
            source,
        })?;
    serde_json::from_str(&raw).map_err(|source| GcalAuthError::InvalidToken {
        path: path.to_string(),
        source,
    })
}

/// HTTPS (or plain HTTP, for local endpoints) client the hub sends requests through.
pub fn https_client() -> Result<Client<Connector, Body>, GcalAuthError> {
    let https = HttpsConnectorBuilder::new()
        .with_native_roots()
        .map_err(GcalAuthError::Tls)?
        .https_or_http()
        .enable_http1()
        .build();

    Ok(Client::builder(hyper_util::rt::TokioExecutor::new()).build(https))
}

/// Builds the calendar client once at startup.
///
/// A service account key (`key_path`) takes precedence; otherwise the OAuth
/// client secrets and the stored user token are both required. Token refresh
/// is left to the authenticator.
pub async fn create_calendar_hub(config: &GcalConfig) -> Result<HubType, GcalAuthError> {
    if let Some(key_path) = config.key_path.as_deref() {
        info!("Authenticating to Google Calendar with service account key {}", key_path);
        let sa_key = read_service_account_key(Path::new(key_path))
            .await
            .map_err(|source| GcalAuthError::ServiceAccountKey {
                path: key_path.to_string(),
                source,
            })?;
        let auth = ServiceAccountAuthenticator::builder(sa_key)
            .build()
            .await
            .map_err(GcalAuthError::Authenticator)?;
        return Ok(CalendarHub::new(https_client()?, auth));
    }

    let (secrets_path, token_path) = match (
        config.client_secrets_path.as_deref(),
        config.token_path.as_deref(),
    ) {
        (Some(secrets), Some(token)) => (secrets, token),
        _ => return Err(GcalAuthError::MissingCredentials),
    };

    info!(
        "Authenticating to Google Calendar with client secrets {} and token {}",
        secrets_path, token_path
    );
    let client_secret = read_application_secret(Path::new(secrets_path))
        .await
        .map_err(|source| GcalAuthError::ClientSecrets {
            path: secrets_path.to_string(),
            source,
        })?;
    let token = read_user_token(token_path).await?;

    let auth = AuthorizedUserAuthenticator::builder(authorized_user_secret(&client_secret, token))
        .build()
        .await
        .map_err(GcalAuthError::Authenticator)?;

    Ok(CalendarHub::new(https_client()?, auth))
}
