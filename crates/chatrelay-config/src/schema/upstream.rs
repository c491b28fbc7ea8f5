use serde::{Deserialize, Serialize};

/// Generative-language API settings.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Usually left empty in the file and supplied through `API_KEY`.
    pub api_key: String,
    pub model: String,
    /// Base URL up to and including `/models`.
    pub api_base: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub connect_timeout_secs: u64,
    /// Upper bound on a single upstream call.
    pub request_timeout_secs: u64,
    /// Sent as the system instruction with every request when set.
    pub system_prompt: Option<String>,
}

impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("system_prompt", &self.system_prompt)
            .finish()
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gemini-2.5-flash".into(),
            api_base: "https://generativelanguage.googleapis.com/v1beta/models".into(),
            max_tokens: 4096,
            temperature: 0.7,
            connect_timeout_secs: 10,
            request_timeout_secs: 120,
            system_prompt: None,
        }
    }
}
