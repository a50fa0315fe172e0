//! Content extraction from provider response envelopes
//!
//! Providers put the generated text in different places. Each known
//! location is one strategy; they are tried in [`ContentLocation::PRIORITY`]
//! order and the first non-blank text wins.
//!
//! | Location          | Shape                                    |
//! |-------------------|------------------------------------------|
//! | `ChatMessage`     | `choices[0].message.content`             |
//! | `CompletionText`  | `choices[0].text` (legacy completions)   |
//! | `DataContent`     | `data[0].content`                        |
//! | `ContentBlocks`   | `content[].text` (Messages-style APIs)   |

use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentLocation {
    ChatMessage,
    CompletionText,
    DataContent,
    ContentBlocks,
}

impl ContentLocation {
    pub const PRIORITY: [ContentLocation; 4] = [
        Self::ChatMessage,
        Self::CompletionText,
        Self::DataContent,
        Self::ContentBlocks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ChatMessage => "choices[0].message.content",
            Self::CompletionText => "choices[0].text",
            Self::DataContent => "data[0].content",
            Self::ContentBlocks => "content[].text",
        }
    }

    /// Text at this location, if present and not blank
    pub fn extract(&self, envelope: &Value) -> Option<String> {
        let text = match self {
            Self::ChatMessage => envelope
                .pointer("/choices/0/message/content")
                .and_then(text_of),
            Self::CompletionText => envelope.pointer("/choices/0/text").and_then(text_of),
            Self::DataContent => envelope.pointer("/data/0/content").and_then(text_of),
            Self::ContentBlocks => envelope.get("content").and_then(joined_text_blocks),
        }?;
        (!text.trim().is_empty()).then_some(text)
    }
}

/// First non-blank content in priority order
pub fn extract_content(envelope: &Value) -> Option<(ContentLocation, String)> {
    ContentLocation::PRIORITY
        .iter()
        .find_map(|loc| loc.extract(envelope).map(|text| (*loc, text)))
}

/// Plain string, or an array of `{type: "text", text}` parts
fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(_) => joined_text_blocks(value),
        _ => None,
    }
}

fn joined_text_blocks(value: &Value) -> Option<String> {
    let parts: Vec<&str> = value
        .as_array()?
        .iter()
        .filter_map(|p| {
            if p.get("type")?.as_str()? == "text" {
                p.get("text")?.as_str()
            } else {
                None
            }
        })
        .collect();
    (!parts.is_empty()).then(|| parts.join("\n"))
}
