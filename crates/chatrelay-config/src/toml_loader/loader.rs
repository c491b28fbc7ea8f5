//! Reading the TOML file, and seeding it on first run.

use std::path::{Path, PathBuf};

use chatrelay_common::ConfigError;
use tracing::{info, warn};

use super::template::default_config_toml;
use crate::schema::ChatRelayConfig;
use crate::validation;

const APP_DIR: &str = "chatrelay";
const FILE_NAME: &str = "config.toml";

/// `<platform config dir>/chatrelay/config.toml`, e.g.
/// `~/.config/chatrelay/config.toml` on Linux and
/// `~/Library/Application Support/chatrelay/config.toml` on macOS.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(FILE_NAME))
        .ok_or_else(|| ConfigError::ParseError("no platform config directory".into()))
}

/// Write the commented template to `path`, creating parent directories.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_error("create", parent, e))?;
    }
    std::fs::write(path, default_config_toml()).map_err(|e| io_error("write", path, e))?;
    info!(path = %path.display(), "Wrote default config");
    Ok(())
}

/// Parse the file at `path`; absent keys take their serde defaults.
///
/// Validation problems are only logged here; [`crate::load_config`] runs
/// the hard check after environment overrides have been applied.
pub fn load_from_path(path: &Path) -> Result<ChatRelayConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|e| io_error("read", path, e))?;
    let config: ChatRelayConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("{}: {e}", path.display())))?;

    if let Err(e) = validation::validate(&config) {
        warn!(error = %e, "Config needs attention");
    }
    info!(path = %path.display(), "Loaded config");
    Ok(config)
}

/// Load [`default_config_path`], seeding it with the template when it does
/// not exist yet.
pub fn load_default() -> Result<ChatRelayConfig, ConfigError> {
    let path = default_config_path()?;
    match load_from_path(&path) {
        Err(ConfigError::FileNotFound(_)) => {
            create_default_config(&path)?;
            Ok(ChatRelayConfig::default())
        }
        other => other,
    }
}

fn io_error(action: &str, path: &Path, e: std::io::Error) -> ConfigError {
    ConfigError::ParseError(format!("cannot {action} {}: {e}", path.display()))
}
