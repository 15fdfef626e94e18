// --- File: crates/tourlink_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

// --- Logging Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Default filter level, overridden by RUST_LOG.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// When set, logs are additionally written to a daily rolling file here.
    #[serde(default)]
    pub file_dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_dir: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

// --- CORS Config ---
// An empty allow-list means any origin.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

// --- Google Calendar Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GcalConfig {
    #[serde(default = "default_calendar_id")]
    pub calendar_id: String,
    /// IANA zone used for naive timestamps and written onto created events.
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
    /// OAuth client secret file (GOOGLE_CLIENT_SECRETS)
    #[serde(default)]
    pub client_secrets_path: Option<String>,
    /// Authorized-user token file (TOKEN_FILE)
    #[serde(default)]
    pub token_path: Option<String>,
    /// Service account key, used instead of the token pair when set
    #[serde(default)]
    pub key_path: Option<String>,
    /// Value of the `sendUpdates` parameter on insert: all, externalOnly or none
    #[serde(default = "default_send_updates")]
    pub send_updates: String,
    #[serde(default)]
    pub reminders: ReminderConfig,
}

impl Default for GcalConfig {
    fn default() -> Self {
        Self {
            calendar_id: default_calendar_id(),
            time_zone: default_time_zone(),
            client_secrets_path: None,
            token_path: None,
            key_path: None,
            send_updates: default_send_updates(),
            reminders: ReminderConfig::default(),
        }
    }
}

fn default_calendar_id() -> String {
    "primary".to_string()
}

fn default_time_zone() -> String {
    "Asia/Kolkata".to_string()
}

fn default_send_updates() -> String {
    "all".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReminderConfig {
    /// Minutes before the event for the email reminder; None disables it.
    #[serde(default = "default_email_minutes")]
    pub email_minutes: Option<i32>,
    #[serde(default = "default_popup_minutes")]
    pub popup_minutes: Option<i32>,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            email_minutes: default_email_minutes(),
            popup_minutes: default_popup_minutes(),
        }
    }
}

fn default_email_minutes() -> Option<i32> {
    Some(24 * 60)
}

fn default_popup_minutes() -> Option<i32> {
    Some(30)
}

// --- Mail Config ---
// Holds non-secret mail config. The API key is normally "secret_from_env".
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MailConfig {
    #[serde(default = "default_mail_api_base_url")]
    pub api_base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub from_address: String,
    #[serde(default)]
    pub from_name: Option<String>,
    #[serde(default)]
    pub reply_to: Option<String>,
    #[serde(default = "default_mail_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_mail_api_base_url(),
            api_key: String::new(),
            from_address: String::new(),
            from_name: None,
            reply_to: None,
            timeout_secs: default_mail_timeout_secs(),
        }
    }
}

fn default_mail_api_base_url() -> String {
    "https://api.sendgrid.com".to_string()
}

fn default_mail_timeout_secs() -> u64 {
    30
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub gcal: GcalConfig,
    #[serde(default)]
    pub mail: MailConfig,
}
