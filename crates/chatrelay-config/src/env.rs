//! Environment-variable overrides and `.env` loading.
//!
//! The process environment always wins over the TOML file. A `.env` file in
//! the working directory only fills in variables that are not already set.

use std::path::{Path, PathBuf};

use chatrelay_common::ConfigError;
use tracing::debug;

use crate::schema::ChatRelayConfig;

/// Primary variable holding the upstream API key.
pub const API_KEY_VAR: &str = "API_KEY";
/// Fallback name for the API key.
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Listening port override.
pub const PORT_VAR: &str = "PORT";
/// Model name override.
pub const MODEL_VAR: &str = "GEMINI_MODEL";

/// Load `.env` from the current directory into the process environment.
///
/// Call this before any threads are started: it mutates the process
/// environment. Existing variables are never overwritten. Returns the file
/// that was read so the caller can log it once logging is up.
pub fn load_dotenv() -> Option<PathBuf> {
    load_dotenv_from(Path::new(".env"))
}

/// Same as [`load_dotenv`] for an explicit file.
pub fn load_dotenv_from(path: &Path) -> Option<PathBuf> {
    let contents = std::fs::read_to_string(path).ok()?;
    for (key, value) in parse_dotenv(&contents) {
        if std::env::var_os(&key).is_none() {
            std::env::set_var(&key, value);
        }
    }
    Some(std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()))
}

/// Parse `KEY=value` lines, skipping blanks and `#` comments.
///
/// Surrounding quotes are stripped from values and an `export ` prefix is
/// accepted on keys.
pub fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .filter_map(|(key, value)| {
            let key = key.trim();
            let key = key.strip_prefix("export ").unwrap_or(key).trim();
            if key.is_empty() {
                return None;
            }
            let value = value.trim().trim_matches('"').trim_matches('\'');
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}

/// Apply `API_KEY`/`GEMINI_API_KEY`, `PORT`, and `GEMINI_MODEL` from the
/// process environment.
pub fn apply_env_overrides(config: &mut ChatRelayConfig) -> Result<(), ConfigError> {
    apply_overrides_from(config, |name| std::env::var(name).ok())
}

/// Apply overrides using `lookup` to resolve variable names.
///
/// Blank values are treated as unset.
pub fn apply_overrides_from<F>(config: &mut ChatRelayConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(key) = get(API_KEY_VAR).or_else(|| get(GEMINI_API_KEY_VAR)) {
        debug!("API key taken from environment");
        config.upstream.api_key = key.trim().to_string();
    }

    if let Some(port) = get(PORT_VAR) {
        config.server.port = port.trim().parse().map_err(|e| {
            ConfigError::ParseError(format!("{PORT_VAR}={port:?} is not a valid port: {e}"))
        })?;
        debug!(port = config.server.port, "Port taken from environment");
    }

    if let Some(model) = get(MODEL_VAR) {
        config.upstream.model = model.trim().to_string();
        debug!(model = %config.upstream.model, "Model taken from environment");
    }

    Ok(())
}
