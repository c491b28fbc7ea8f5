//! Configuration schema types for chatrelay.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the defaults below.

mod server;
mod system;
mod upstream;

pub use server::*;
pub use system::*;
pub use upstream::*;

use chatrelay_common::ConfigError;
use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for chatrelay.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct ChatRelayConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub logging: LoggingConfig,
}

impl ChatRelayConfig {
    /// The upstream API key, or an error telling the operator how to set it.
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        let key = self.upstream.api_key.trim();
        if key.is_empty() {
            return Err(ConfigError::ValidationError(
                "upstream.api_key is not set (export API_KEY or add it to .env)".into(),
            ));
        }
        Ok(key)
    }
}

// =============================================================================
// Tests
// =============================================================================
