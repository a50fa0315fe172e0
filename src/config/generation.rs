//! Prompt and generation parameters

use serde::Deserialize;

/// Generation settings for exercise requests
#[derive(Debug, Clone, PartialEq)]
pub struct PromptConfig {
    /// Low randomness keeps the JSON contract more reliable
    pub temperature: f32,
    /// Output ceiling; large enough for `exercise_count` records
    pub max_tokens: u32,
    /// Exercises to ask for (1-10)
    pub exercise_count: u8,
    /// Language for the text fields of each record
    pub language: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            max_tokens: 800,
            exercise_count: 5,
            language: "Simplified Chinese".to_string(),
        }
    }
}

/// `[prompt]` section as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FilePrompt {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub exercise_count: Option<u8>,
    pub language: Option<String>,
}

impl PromptConfig {
    pub fn from_file(file: Option<FilePrompt>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            temperature: file
                .temperature
                .map(|t| t.clamp(0.0, 2.0))
                .unwrap_or(defaults.temperature),
            max_tokens: file
                .max_tokens
                .filter(|&n| n > 0)
                .unwrap_or(defaults.max_tokens),
            exercise_count: file
                .exercise_count
                .map(|n| n.clamp(1, 10))
                .unwrap_or(defaults.exercise_count),
            language: file
                .language
                .filter(|l| !l.trim().is_empty())
                .unwrap_or(defaults.language),
        }
    }
}
