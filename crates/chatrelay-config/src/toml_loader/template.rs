//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# chatrelay configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.
# Environment variables win over this file:
#   API_KEY (or GEMINI_API_KEY), PORT, GEMINI_MODEL

[server]
# host = "0.0.0.0"
# port = 3000            # 1-65535
# static_dir = "public"
# cors = true

[upstream]
# api_key = ""           # prefer the API_KEY environment variable
# model = "gemini-2.5-flash"
# api_base = "https://generativelanguage.googleapis.com/v1beta/models"
# max_tokens = 4096      # 1-65536
# temperature = 0.7      # 0.0-2.0
# connect_timeout_secs = 10    # 1-300
# request_timeout_secs = 120   # 1-3600
# system_prompt = "You are a helpful assistant."

[logging]
# level = "INFO"         # DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
