//! Full configuration validation.
//!
//! Validates numeric ranges and required strings. Each section has its own
//! function; `validate` calls them all and collects errors into a single
//! `ConfigError`. The API key is not checked here, see
//! [`ChatRelayConfig::api_key`].

mod helpers;


use crate::schema::ChatRelayConfig;
use chatrelay_common::ConfigError;

use helpers::{validate_range, validate_range_f64};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &ChatRelayConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_server(&mut errors, config);
    validate_upstream(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_server(errors: &mut Vec<String>, config: &ChatRelayConfig) {
    let server = &config.server;
    validate_range(errors, "server.port", u64::from(server.port), 1, 65535);
    if server.host.trim().is_empty() {
        errors.push("server.host must not be empty".into());
    }
}

fn validate_upstream(errors: &mut Vec<String>, config: &ChatRelayConfig) {
    let upstream = &config.upstream;
    if upstream.model.trim().is_empty() {
        errors.push("upstream.model must not be empty".into());
    }
    if !(upstream.api_base.starts_with("http://") || upstream.api_base.starts_with("https://")) {
        errors.push(format!(
            "upstream.api_base = {:?} must start with http:// or https://",
            upstream.api_base
        ));
    }
    validate_range(
        errors,
        "upstream.max_tokens",
        u64::from(upstream.max_tokens),
        1,
        65536,
    );
    validate_range_f64(errors, "upstream.temperature", upstream.temperature, 0.0, 2.0);
    validate_range(
        errors,
        "upstream.connect_timeout_secs",
        upstream.connect_timeout_secs,
        1,
        300,
    );
    validate_range(
        errors,
        "upstream.request_timeout_secs",
        upstream.request_timeout_secs,
        1,
        3600,
    );
}
