//! Structural parsing of model output into exercise records
//!
//! Attempted in order, first success wins:
//! 1. the whole content as a JSON array
//! 2. the first `[ { ... } ]` substring (greedy to the last `}]`)
//! 3. a single synthesized record carrying the raw text
//!
//! Step 3 is intentional: malformed output is shown to the user as text
//! rather than surfaced as an error.

use super::record::{ExerciseRecord, NEUTRAL_SCORE};
use regex::Regex;
use std::sync::LazyLock;

static EMBEDDED_ARRAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\s*\{[\s\S]*\}\s*\]").expect("embedded array pattern is valid")
});

/// Name given to synthesized records
pub const FALLBACK_NAME: &str = "AI 建议";
pub const FALLBACK_VOLUME: &str = "3 x 10-12";
pub const FALLBACK_FOCUS: &str = "general";
const UNTITLED: &str = "Untitled";

/// Which parse step produced the records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsePath {
    Direct,
    Embedded,
    Fallback,
}

impl ParsePath {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Embedded => "embedded",
            Self::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub records: Vec<ExerciseRecord>,
    pub path: ParsePath,
}

pub fn parse_exercises(content: &str) -> Parsed {
    if let Some(records) = parse_array(content.trim()) {
        return Parsed {
            records,
            path: ParsePath::Direct,
        };
    }

    if let Some(records) = EMBEDDED_ARRAY
        .find(content)
        .and_then(|m| parse_array(m.as_str()))
    {
        return Parsed {
            records,
            path: ParsePath::Embedded,
        };
    }

    tracing::debug!(
        "Model output is not an exercise array, synthesizing record ({} bytes)",
        content.len()
    );
    Parsed {
        records: vec![fallback_record(content)],
        path: ParsePath::Fallback,
    }
}

fn parse_array(text: &str) -> Option<Vec<ExerciseRecord>> {
    let mut records: Vec<ExerciseRecord> = serde_json::from_str(text).ok()?;
    for record in &mut records {
        if record.name.trim().is_empty() {
            record.name = UNTITLED.to_string();
        }
    }
    Some(records)
}

fn fallback_record(raw: &str) -> ExerciseRecord {
    ExerciseRecord {
        name: FALLBACK_NAME.to_string(),
        description: raw.to_string(),
        recommended_volume: FALLBACK_VOLUME.to_string(),
        focus: FALLBACK_FOCUS.to_string(),
        score: NEUTRAL_SCORE,
        difficulty: None,
        media_url: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_array() {
        let parsed = parse_exercises(r#"  [{"name":"Lunge","score":7}]  "#);
        assert_eq!(parsed.path, ParsePath::Direct);
        assert_eq!(parsed.records[0].name, "Lunge");
    }

    #[test]
    fn test_fenced_array_is_embedded() {
        let content = "```json\n[{\"name\":\"Face pull\",\"score\":9}]\n```";
        let parsed = parse_exercises(content);
        assert_eq!(parsed.path, ParsePath::Embedded);
        assert_eq!(parsed.records[0].name, "Face pull");
    }

    #[test]
    fn test_wrapped_object_is_embedded() {
        let content = r#"{"exercises":[{"name":"Shrug"},{"name":"Rack pull"}]}"#;
        let parsed = parse_exercises(content);
        assert_eq!(parsed.path, ParsePath::Embedded);
        assert_eq!(parsed.records.len(), 2);
    }

    #[test]
    fn test_empty_array_is_direct_and_empty() {
        let parsed = parse_exercises("[]");
        assert_eq!(parsed.path, ParsePath::Direct);
        assert!(parsed.records.is_empty());
    }

    #[test]
    fn test_truncated_output_falls_back() {
        // max_tokens cut the array short
        let content = r#"[{"name":"Calf raise","description":"Full range"#;
        let parsed = parse_exercises(content);
        assert_eq!(parsed.path, ParsePath::Fallback);
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].description, content);
        assert_eq!(parsed.records[0].name, FALLBACK_NAME);
        assert_eq!(parsed.records[0].recommended_volume, FALLBACK_VOLUME);
    }

    #[test]
    fn test_array_of_non_objects_falls_back() {
        let parsed = parse_exercises(r#"["squat", "lunge"]"#);
        assert_eq!(parsed.path, ParsePath::Fallback);
    }

    #[test]
    fn test_blank_names_become_untitled() {
        let parsed = parse_exercises(r#"[{"name":"  ","score":3}]"#);
        assert_eq!(parsed.records[0].name, UNTITLED);
    }
}
