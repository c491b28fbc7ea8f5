//! Gemini API client configuration.

use std::time::Duration;

pub(crate) const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini API client configuration.
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    /// Base URL up to and including `/models`.
    pub api_base: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: "gemini-2.5-flash".to_string(),
            api_base: GEMINI_API_BASE.to_string(),
            max_tokens: 4096,
            temperature: 0.7,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_timeouts(mut self, connect: Duration, request: Duration) -> Self {
        self.connect_timeout = connect;
        self.request_timeout = request;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_api_key() {
        let config = GeminiConfig::new("super-secret-key");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret-key"));
        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains("gemini-2.5-flash"));
    }

    #[test]
    fn builder_overrides_defaults() {
        let config = GeminiConfig::new("k")
            .with_model("gemini-2.0-flash")
            .with_api_base("http://127.0.0.1:9/models")
            .with_max_tokens(256)
            .with_temperature(0.1)
            .with_timeouts(Duration::from_secs(1), Duration::from_secs(2));
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.api_base, "http://127.0.0.1:9/models");
        assert_eq!(config.max_tokens, 256);
        assert!((config.temperature - 0.1).abs() < f64::EPSILON);
        assert_eq!(config.request_timeout, Duration::from_secs(2));
    }
}
