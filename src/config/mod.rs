//! Application configuration
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/neuromuscle/config.toml)
//! 3. Built-in defaults (lowest priority)
//!
//! The API key is never required to load a config. A missing key surfaces
//! later as a per-query failure.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod generation;
mod highlight;
mod observability;
mod provider;
mod serialization;

#[cfg(test)]
mod tests;

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports
// ─────────────────────────────────────────────────────────────────────────────

pub use generation::{FilePrompt, PromptConfig};
pub use highlight::FileHighlight;
pub use observability::{FileLogging, LogRotation, LoggingConfig};
pub use provider::{
    Credential, FileProvider, ProviderConfig, DEFAULT_BASE_URL, DEFAULT_KEY_ENV, DEFAULT_MODEL,
};

use crate::highlight::HighlightPalette;

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Env var overriding the log level (RUST_LOG still wins for filters)
pub const LOG_LEVEL_ENV: &str = "NEUROMUSCLE_LOG_LEVEL";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Chat-completions endpoint and credential
    pub provider: ProviderConfig,

    /// Prompt and generation parameters
    pub prompt: PromptConfig,

    /// Region highlight colours and pulse timing
    pub highlight: HighlightPalette,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Non-fatal problems found while loading (logged once tracing is up)
    pub warnings: Vec<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    /// Optional [provider] section
    pub provider: Option<FileProvider>,

    /// Optional [prompt] section
    pub prompt: Option<FilePrompt>,

    /// Optional [highlight] section
    pub highlight: Option<FileHighlight>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/neuromuscle/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("neuromuscle").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Silently fail - config is optional
            }
        }

        // Config::default().to_toml() is the single source of truth
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Read and parse a config file. A missing file yields defaults; a file
    /// that exists but cannot be read or parsed is an error.
    pub(crate) fn read_file_config(path: &Path) -> Result<FileConfig> {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => {
                Err(e).with_context(|| format!("Cannot read config file {}", path.display()))
            }
        }
    }

    /// Load configuration: env > file > defaults
    pub fn load() -> Result<Self> {
        let file = match Self::config_path() {
            Some(path) => Self::read_file_config(&path)?,
            None => FileConfig::default(),
        };
        Ok(Self::from_sources(file, &|key: &str| std::env::var(key).ok()))
    }

    /// Load from an explicit file (CLI `--config`), still applying env vars
    pub fn load_from(path: &Path) -> Result<Self> {
        let file = Self::read_file_config(path)?;
        Ok(Self::from_sources(file, &|key: &str| std::env::var(key).ok()))
    }

    /// Regenerate an existing config file in the current template.
    ///
    /// Only the file is read: env overrides must not be baked into it. A key
    /// stored in the file is written back.
    pub fn updated_toml(path: &Path) -> Result<String> {
        let file = Self::read_file_config(path)?;
        let file_key = file
            .provider
            .as_ref()
            .and_then(|p| p.key.clone())
            .filter(|k| !k.trim().is_empty());
        let config = Self::from_sources(file, &|_: &str| None);
        Ok(config.render_toml(file_key.as_deref()))
    }

    /// Merge a parsed file with an environment lookup
    pub(crate) fn from_sources(file: FileConfig, env: &dyn Fn(&str) -> Option<String>) -> Self {
        let mut warnings = Vec::new();

        let provider = ProviderConfig::from_file(file.provider, env);
        let prompt = PromptConfig::from_file(file.prompt);
        let highlight = HighlightPalette::from_file(file.highlight, &mut warnings);
        let logging = LoggingConfig::from_file(file.logging, env(LOG_LEVEL_ENV));

        if provider.credential.is_none() {
            warnings.push(format!(
                "No API key found: set {} or [provider].key in the config file",
                provider.key_env
            ));
        }

        Self {
            provider,
            prompt,
            highlight,
            logging,
            warnings,
        }
    }
}
