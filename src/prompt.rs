//! Prompt construction for exercise recommendations
//!
//! Pure data: turns an anatomical phrase into a chat-completions request
//! whose system message pins the output to a bare JSON array. No I/O.

use crate::config::PromptConfig;
use serde::Serialize;

/// Chat message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Request body for an OpenAI-compatible `/chat/completions` endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestSpec {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl RequestSpec {
    /// The user segment (target anatomical phrase), if present
    pub fn user_content(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
    }
}

/// Builds [`RequestSpec`]s with a fixed output contract
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    model: String,
    config: PromptConfig,
}

impl PromptBuilder {
    pub fn new(model: impl Into<String>, config: PromptConfig) -> Self {
        Self {
            model: model.into(),
            config,
        }
    }

    /// Build the request for one region.
    ///
    /// `anatomical_name` should be the descriptive phrase from the registry,
    /// not the bare id.
    pub fn build_request(&self, anatomical_name: &str) -> RequestSpec {
        RequestSpec {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(self.system_instruction()),
                ChatMessage::user(format!(
                    "Target muscle: {}\nRecommend exercises that isolate or emphasise this exact region.",
                    anatomical_name.trim()
                )),
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }

    fn system_instruction(&self) -> String {
        let count = self.config.exercise_count.clamp(1, 10);
        format!(
            r#"You are a strength and conditioning coach with a precise knowledge of human anatomy.
Recommend {count} exercises for the target muscle given by the user.

Respond with EXACTLY a JSON array of {count} objects and nothing else.
Each object has exactly these fields:
  "name": string, the exercise name
  "description": string, one or two sentences on execution and why it targets the muscle
  "setsReps": string, recommended volume such as "4 x 8-12"
  "focus": string, the training emphasis (e.g. "hypertrophy", "strength", "stretch")
  "score": number from 0 to 10, how strongly you recommend it for this muscle
  "difficulty": one of "Beginner", "Intermediate", "Advanced"

Write all text values in {language}.
Do not wrap the array in markdown code fences. Do not add any text before or after the array."#,
            language = self.config.language,
        )
    }
}
