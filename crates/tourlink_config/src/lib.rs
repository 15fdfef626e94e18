// --- File: crates/tourlink_config/src/lib.rs ---
use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::Path;
use std::str::FromStr;
use tracing::warn;

pub mod env_vars;
pub mod models;
pub use models::*;

use env_vars::{
    get_config_prefix, inject_secrets_with, legacy_secret_path_to_env_var,
    secret_path_to_env_var, CONFIG_SEPARATOR, GOOGLE_CLIENT_SECRETS_VAR, SECRET_MARKER,
    TOKEN_FILE_VAR,
};

const SEND_UPDATES_VALUES: [&str; 3] = ["all", "externalOnly", "none"];

/// Loads the configuration once at process start.
///
/// Sources, lowest priority first: `<CONFIG_DIR>/default.*`,
/// `<CONFIG_DIR>/<RUN_ENV>.*`, then `TOURLINK__*` environment variables.
/// `CONFIG_DIR` defaults to `config`, `RUN_ENV` to `debug`.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let config_dir = env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    load_config_from(Path::new(&config_dir), &run_env)
}

/// Loads configuration from an explicit directory and run environment.
pub fn load_config_from(config_dir: &Path, run_env: &str) -> Result<AppConfig, ConfigError> {
    let prefix = get_config_prefix();
    let default_path = config_dir.join("default");
    let env_path = config_dir.join(run_env);

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(
            Environment::with_prefix(&prefix)
                .separator(CONFIG_SEPARATOR)
                .try_parsing(true),
        );

    let raw_config: AppConfig = builder.build()?.try_deserialize()?;
    finalize(raw_config, &|name| env::var(name).ok())
}

/// Fills secrets and legacy variables, then validates.
///
/// `lookup` resolves an environment variable by name.
pub fn finalize(
    config: AppConfig,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> Result<AppConfig, ConfigError> {
    let mut json = serde_json::to_value(&config)
        .map_err(|err| ConfigError::Message(format!("failed to serialize config: {err}")))?;

    let missing = inject_secrets_with(&mut json, |path| {
        lookup(&secret_path_to_env_var(path))
            .or_else(|| lookup(&legacy_secret_path_to_env_var(path)))
    });
    for path in &missing {
        warn!(
            "No environment variable found for secret '{}' ({} or {})",
            path,
            secret_path_to_env_var(path),
            legacy_secret_path_to_env_var(path)
        );
    }

    let mut config: AppConfig = serde_json::from_value(json)
        .map_err(|err| ConfigError::Message(format!("failed to rebuild config: {err}")))?;
    apply_legacy_gcal_vars(&mut config.gcal, lookup);

    config.validate()?;
    Ok(config)
}

/// `GOOGLE_CLIENT_SECRETS` and `TOKEN_FILE` fill the credential paths when the
/// layered sources left them empty.
fn apply_legacy_gcal_vars(gcal: &mut GcalConfig, lookup: &dyn Fn(&str) -> Option<String>) {
    if gcal.client_secrets_path.is_none() {
        gcal.client_secrets_path = lookup(GOOGLE_CLIENT_SECRETS_VAR).filter(|v| !v.is_empty());
    }
    if gcal.token_path.is_none() {
        gcal.token_path = lookup(TOKEN_FILE_VAR).filter(|v| !v.is_empty());
    }
}

impl AppConfig {
    /// Checks everything the service needs to authenticate upstream.
    /// All problems are reported in one error.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();

        let has_service_account = self.gcal.key_path.is_some();
        let has_user_token =
            self.gcal.client_secrets_path.is_some() && self.gcal.token_path.is_some();
        if !has_service_account && !has_user_token {
            problems.push(format!(
                "Google Calendar credentials missing: set {} and {} (or gcal.key_path)",
                GOOGLE_CLIENT_SECRETS_VAR, TOKEN_FILE_VAR
            ));
        }

        if chrono_tz::Tz::from_str(&self.gcal.time_zone).is_err() {
            problems.push(format!("gcal.time_zone '{}' is not an IANA zone", self.gcal.time_zone));
        }

        if !SEND_UPDATES_VALUES.contains(&self.gcal.send_updates.as_str()) {
            problems.push(format!(
                "gcal.send_updates must be one of {:?}, got '{}'",
                SEND_UPDATES_VALUES, self.gcal.send_updates
            ));
        }

        if self.mail.api_key.is_empty() || self.mail.api_key == SECRET_MARKER {
            problems.push("mail.api_key is not set".to_string());
        }

        if !self.mail.from_address.contains('@') {
            problems.push(format!(
                "mail.from_address '{}' is not an email address",
                self.mail.from_address
            ));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(problems.join("; ")))
        }
    }
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Loads the dotenv file into the process environment once.
///
/// `DOTENV_OVERRIDE` or a first CLI argument starting with `.env` selects the
/// file; otherwise `.env` is used. Returns the path that was tried.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;
    use std::collections::HashMap;

    const BASE_TOML: &str = r#"
        [gcal]
        client_secrets_path = "secrets/client_secret.json"
        token_path = "secrets/token.json"

        [mail]
        api_key = "secret_from_env"
        from_address = "tours@example.com"
    "#;

    fn parse(toml: &str) -> AppConfig {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config = parse(BASE_TOML);
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.gcal.calendar_id, "primary");
        assert_eq!(config.gcal.time_zone, "Asia/Kolkata");
        assert_eq!(config.gcal.send_updates, "all");
        assert_eq!(config.gcal.reminders.email_minutes, Some(1440));
        assert_eq!(config.gcal.reminders.popup_minutes, Some(30));
        assert_eq!(config.mail.api_base_url, "https://api.sendgrid.com");
        assert!(config.cors.allowed_origins.is_empty());
    }

    #[test]
    fn test_finalize_injects_secret() {
        let lookup = lookup_from(&[("TOURLINK_SECRET_MAIL_API_KEY", "SG.abc")]);
        let config = finalize(parse(BASE_TOML), &lookup).unwrap();
        assert_eq!(config.mail.api_key, "SG.abc");
    }

    #[test]
    fn test_finalize_falls_back_to_legacy_secret_name() {
        let lookup = lookup_from(&[("MAIL_API_KEY", "SG.legacy")]);
        let config = finalize(parse(BASE_TOML), &lookup).unwrap();
        assert_eq!(config.mail.api_key, "SG.legacy");
    }

    #[test]
    fn test_finalize_reads_original_gcal_variables() {
        let toml = r#"
            [mail]
            api_key = "SG.inline"
            from_address = "tours@example.com"
        "#;
        let lookup = lookup_from(&[
            ("GOOGLE_CLIENT_SECRETS", "/etc/tourlink/client_secret.json"),
            ("TOKEN_FILE", "/etc/tourlink/token.json"),
        ]);
        let config = finalize(parse(toml), &lookup).unwrap();
        assert_eq!(
            config.gcal.client_secrets_path.as_deref(),
            Some("/etc/tourlink/client_secret.json")
        );
        assert_eq!(config.gcal.token_path.as_deref(), Some("/etc/tourlink/token.json"));
    }

    #[test]
    fn test_missing_credentials_rejected() {
        let toml = r#"
            [mail]
            api_key = "SG.inline"
            from_address = "tours@example.com"
        "#;
        let err = finalize(parse(toml), &lookup_from(&[])).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("GOOGLE_CLIENT_SECRETS"), "got: {message}");
        assert!(message.contains("TOKEN_FILE"), "got: {message}");
    }

    #[test]
    fn test_service_account_alone_is_enough() {
        let toml = r#"
            [gcal]
            key_path = "secrets/service_account.json"
            [mail]
            api_key = "SG.inline"
            from_address = "tours@example.com"
        "#;
        assert!(finalize(parse(toml), &lookup_from(&[])).is_ok());
    }

    #[test]
    fn test_unresolved_secret_and_bad_zone_reported_together() {
        let toml = r#"
            [gcal]
            key_path = "secrets/service_account.json"
            time_zone = "Mars/Olympus"
            send_updates = "everyone"
            [mail]
            api_key = "secret_from_env"
            from_address = "tours"
        "#;
        let message = finalize(parse(toml), &lookup_from(&[]))
            .unwrap_err()
            .to_string();
        assert!(message.contains("mail.api_key"));
        assert!(message.contains("Mars/Olympus"));
        assert!(message.contains("send_updates"));
        assert!(message.contains("from_address"));
    }
}
