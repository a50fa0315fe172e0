//! Chat-completions provider configuration and credential handling

use crate::util::fingerprint;
use serde::Deserialize;
use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// Defaults
// ─────────────────────────────────────────────────────────────────────────────

pub const DEFAULT_BASE_URL: &str = "https://api.siliconflow.cn/v1";
pub const DEFAULT_API_PATH: &str = "/chat/completions";
pub const DEFAULT_MODEL: &str = "deepseek-ai/DeepSeek-V2.5";
pub const DEFAULT_KEY_ENV: &str = "SILICONFLOW_API_KEY";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

// ─────────────────────────────────────────────────────────────────────────────
// Credential
// ─────────────────────────────────────────────────────────────────────────────

/// Bearer API key. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Blank keys count as absent
    pub fn from_optional(key: Option<String>) -> Option<Self> {
        key.map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .map(Self)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Short SHA-256 fingerprint, safe to log
    pub fn fingerprint(&self) -> String {
        fingerprint(&self.0)
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Credential({})", self.fingerprint())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Provider
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base URL, e.g. "https://api.siliconflow.cn/v1"
    pub base_url: String,
    /// Path appended to base_url
    pub api_path: String,
    pub model: String,
    /// Environment variable holding the API key
    pub key_env: String,
    /// Resolved key (env > file), if any
    pub credential: Option<Credential>,
    pub timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_path: DEFAULT_API_PATH.to_string(),
            model: DEFAULT_MODEL.to_string(),
            key_env: DEFAULT_KEY_ENV.to_string(),
            credential: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// `[provider]` section as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileProvider {
    pub base_url: Option<String>,
    pub api_path: Option<String>,
    pub model: Option<String>,
    pub key_env: Option<String>,
    /// Direct key value (less safe - prefer key_env)
    pub key: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl ProviderConfig {
    /// Create from file config, with env lookups taking precedence
    pub fn from_file(file: Option<FileProvider>, env: &dyn Fn(&str) -> Option<String>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        let key_env = file.key_env.unwrap_or(defaults.key_env);
        let credential = Credential::from_optional(env(&key_env))
            .or_else(|| Credential::from_optional(file.key));

        Self {
            base_url: env("NEUROMUSCLE_BASE_URL")
                .or(file.base_url)
                .unwrap_or(defaults.base_url),
            api_path: file.api_path.unwrap_or(defaults.api_path),
            model: env("NEUROMUSCLE_MODEL")
                .or(file.model)
                .unwrap_or(defaults.model),
            key_env,
            credential,
            timeout: file
                .timeout_secs
                .filter(|&s| s > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }

    /// Full endpoint URL: base_url + api_path, without doubled slashes
    pub fn endpoint_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = self.api_path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }
}
