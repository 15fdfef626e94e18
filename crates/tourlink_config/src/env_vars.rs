//! Environment variable handling for the Tourlink application.
//!
//! Configuration values can be overridden with `TOURLINK__SECTION__KEY`
//! variables (handled by the `config` crate). Values marked `secret_from_env`
//! in a config file are filled from `TOURLINK_SECRET_SECTION_KEY`, falling back
//! to the legacy `SECTION_KEY` form.

use std::env;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "TOURLINK";

/// The prefix for secret environment variables
pub const SECRET_PREFIX: &str = "TOURLINK_SECRET";

/// The separator for configuration override variables (`TOURLINK__SERVER__PORT`)
pub const CONFIG_SEPARATOR: &str = "__";

/// The separator for secret environment variables
pub const SECRET_SEPARATOR: &str = "_";

/// Marker value replaced by an environment variable at load time
pub const SECRET_MARKER: &str = "secret_from_env";

/// Variable naming the OAuth client secret file
pub const GOOGLE_CLIENT_SECRETS_VAR: &str = "GOOGLE_CLIENT_SECRETS";

/// Variable naming the authorized-user token file
pub const TOKEN_FILE_VAR: &str = "TOKEN_FILE";

/// Get the prefix for configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Convert a secret path (e.g. `mail.api_key`) to `TOURLINK_SECRET_MAIL_API_KEY`.
pub fn secret_path_to_env_var(path: &str) -> String {
    let path = path.replace('.', SECRET_SEPARATOR);
    format!("{}{}{}", SECRET_PREFIX, SECRET_SEPARATOR, path).to_uppercase()
}

/// Convert a secret path to the legacy variable name (e.g. `MAIL_API_KEY`).
pub fn legacy_secret_path_to_env_var(path: &str) -> String {
    let parts: Vec<&str> = path.split('.').collect();
    if parts.len() < 2 {
        return path.to_uppercase();
    }

    let service = parts[0];
    let key = parts[1..].join(SECRET_SEPARATOR);
    format!("{}_{}", service, key).to_uppercase()
}

/// Replace every `secret_from_env` string in `value` using `lookup`.
///
/// Returns the dotted paths whose variable could not be found; those values
/// are left untouched so validation can report them.
pub fn inject_secrets_with<F>(value: &mut serde_json::Value, lookup: F) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    use serde_json::Value;

    fn walk<F: Fn(&str) -> Option<String>>(
        path: &mut Vec<String>,
        obj: &mut Value,
        lookup: &F,
        missing: &mut Vec<String>,
    ) {
        match obj {
            Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    path.push(k.to_string());
                    walk(path, v, lookup, missing);
                    path.pop();
                }
            }
            Value::Array(arr) => {
                for (i, v) in arr.iter_mut().enumerate() {
                    path.push(i.to_string());
                    walk(path, v, lookup, missing);
                    path.pop();
                }
            }
            Value::String(s) if s == SECRET_MARKER => {
                let path_str = path.join(".");
                match lookup(&path_str) {
                    Some(env_val) => *s = env_val,
                    None => missing.push(path_str),
                }
            }
            _ => {}
        }
    }

    let mut missing = Vec::new();
    walk(&mut Vec::new(), value, &lookup, &mut missing);
    missing
}
