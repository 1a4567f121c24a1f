//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# gemchat configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[api]
# base_url = "https://generativelanguage.googleapis.com/v1beta/models"
# model = "gemini-1.5-flash"
# The key is read from this environment variable; it wins over api_key.
# api_key_env = "GEMINI_API_KEY"
# api_key = ""
# connect_timeout_secs = 10    # 1-120
# request_timeout_secs = 120   # 1-600
# max_retries = 2              # 0-10, transient failures only (429, 5xx, network)
# retry_backoff_ms = 500

[generation]
# temperature = 0.7            # 0.0-2.0
# max_output_tokens = 4096
# system_instruction = "You are a helpful assistant."

[chat]
# stream = false

[logging]
# level = "INFO"               # DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
