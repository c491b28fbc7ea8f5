//! chatrelay configuration system.
//!
//! TOML-based configuration with environment overrides and validation.
//! All config sections use sensible defaults so partial configs work out
//! of the box; the only value that has to come from somewhere is the
//! upstream API key (normally the `API_KEY` environment variable).
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use chatrelay_config::{load_config, config_to_json};
//!
//! let config = load_config(None).expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod env;
pub mod schema;
pub mod toml_loader;
pub mod validation;

// Re-export core types for convenience
pub use env::{apply_env_overrides, load_dotenv, load_dotenv_from};
pub use schema::{ChatRelayConfig, CONFIG_SCHEMA_VERSION};

use std::path::Path;

use chatrelay_common::ConfigError;

/// Load, override from the environment, and validate.
///
/// With `path`, that file must exist. Without it, the platform default path
/// is used and created with a commented template if missing. Environment
/// variables are applied after the file, so they always win.
pub fn load_config(path: Option<&Path>) -> Result<ChatRelayConfig, ConfigError> {
    let mut config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };

    apply_env_overrides(&mut config)?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
///
/// The API key is redacted.
pub fn config_to_json(config: &ChatRelayConfig) -> String {
    let mut redacted = config.clone();
    if !redacted.upstream.api_key.is_empty() {
        redacted.upstream.api_key = "[REDACTED]".into();
    }
    serde_json::to_string_pretty(&redacted)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
