//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

/// Quote and escape a value as a TOML basic string
fn quoted(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}

impl Config {
    /// Serialize to a commented TOML document.
    ///
    /// The API key is never written; only the env var that holds it.
    pub fn to_toml(&self) -> String {
        self.render_toml(None)
    }

    /// Like [`to_toml`](Self::to_toml), but writes `key` into `[provider]`
    /// when given. Used when rewriting a file that already held a key.
    pub(crate) fn render_toml(&self, key: Option<&str>) -> String {
        let key_line = match key {
            Some(key) => format!("key = {}", quoted(key)),
            None => "# key = \"sk-...\"   # Direct value (less safe - prefer key_env)".to_string(),
        };
        let provider = &self.provider;
        let prompt = &self.prompt;
        let highlight = &self.highlight;
        let logging = &self.logging;

        format!(
            r#"# neuromuscle configuration

# ─────────────────────────────────────────────────────────────────────────────
# PROVIDER (OpenAI-compatible chat completions)
# ─────────────────────────────────────────────────────────────────────────────
# Env overrides: NEUROMUSCLE_BASE_URL, NEUROMUSCLE_MODEL
[provider]
base_url = {base_url}
api_path = {api_path}
model = {model}
# API key is read from this environment variable
key_env = {key_env}
{key_line}
timeout_secs = {timeout_secs}

# ─────────────────────────────────────────────────────────────────────────────
# PROMPT
# ─────────────────────────────────────────────────────────────────────────────
[prompt]
temperature = {temperature:?}
max_tokens = {max_tokens}
exercise_count = {exercise_count}
language = {language}

# ─────────────────────────────────────────────────────────────────────────────
# HIGHLIGHT (#RRGGBB colours)
# ─────────────────────────────────────────────────────────────────────────────
[highlight]
idle = "{idle}"
decorative = "{decorative}"
hover = "{hover}"
hover_emissive = "{hover_emissive}"
selected = "{selected}"
selected_emissive = "{selected_emissive}"
pulse_period_ms = {pulse_period_ms}

# Logging configuration (RUST_LOG env var overrides, then NEUROMUSCLE_LOG_LEVEL)
[logging]
level = {log_level}
# JSON file logging (in addition to stderr)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = {log_file_prefix}
"#,
            key_line = key_line,
            base_url = quoted(&provider.base_url),
            api_path = quoted(&provider.api_path),
            model = quoted(&provider.model),
            key_env = quoted(&provider.key_env),
            timeout_secs = provider.timeout.as_secs(),
            temperature = prompt.temperature,
            max_tokens = prompt.max_tokens,
            exercise_count = prompt.exercise_count,
            language = quoted(&prompt.language),
            idle = highlight.idle,
            decorative = highlight.decorative,
            hover = highlight.hover,
            hover_emissive = highlight.hover_emissive,
            selected = highlight.selected,
            selected_emissive = highlight.selected_emissive,
            pulse_period_ms = highlight.pulse_period.as_millis(),
            log_level = quoted(&logging.level),
            log_file_enabled = logging.file_enabled,
            log_file_dir = quoted(&logging.file_dir.to_string_lossy()),
            log_file_rotation = logging.file_rotation.as_str(),
            log_file_prefix = quoted(&logging.file_prefix),
        )
    }
}
