// Exercise record: the one shape the result panel renders
//
// Models do not reliably honour field names or types, so deserialization is
// lenient: aliases for the older key names (`reps`, `rating`, `mediaUrl`),
// numbers accepted as strings and vice versa, nulls treated as missing.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Score used when the model gives none, and for synthesized records
pub const NEUTRAL_SCORE: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,

    /// Sets/reps guidance as free text, e.g. "4 x 8-12"
    #[serde(
        rename = "setsReps",
        alias = "reps",
        alias = "volume",
        default,
        deserialize_with = "lenient_string"
    )]
    pub recommended_volume: String,

    /// Training emphasis tag
    #[serde(default, deserialize_with = "lenient_string")]
    pub focus: String,

    /// Recommendation strength, nominally 0-10
    #[serde(
        alias = "rating",
        default = "neutral_score",
        deserialize_with = "lenient_score"
    )]
    pub score: f64,

    #[serde(
        default,
        deserialize_with = "lenient_difficulty",
        skip_serializing_if = "Option::is_none"
    )]
    pub difficulty: Option<Difficulty>,

    /// Demonstration media (GIF or video URL)
    #[serde(
        rename = "gifUrl",
        alias = "mediaUrl",
        default,
        deserialize_with = "lenient_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub media_url: Option<String>,
}

impl ExerciseRecord {
    /// Record with a name and neutral defaults elsewhere
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            recommended_volume: String::new(),
            focus: String::new(),
            score: NEUTRAL_SCORE,
            difficulty: None,
            media_url: None,
        }
    }

    /// Score clamped to the 0-10 display range
    pub fn display_score(&self) -> f64 {
        if self.score.is_finite() {
            self.score.clamp(0.0, 10.0)
        } else {
            NEUTRAL_SCORE
        }
    }
}

fn neutral_score() -> f64 {
    NEUTRAL_SCORE
}

// ─────────────────────────────────────────────────────────────────────────────
// Difficulty
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    /// Anything else the model wrote, kept verbatim
    Other(String),
}

impl Difficulty {
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "beginner" | "easy" | "初学者" | "初级" => Self::Beginner,
            "intermediate" | "medium" | "进阶" | "中级" => Self::Intermediate,
            "advanced" | "hard" | "高阶" | "高级" => Self::Advanced,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::Other(s) => s,
        }
    }

    /// Localized label for the result panel
    pub fn label_zh(&self) -> &str {
        match self {
            Self::Beginner => "初学者",
            Self::Intermediate => "进阶",
            Self::Advanced => "高阶",
            Self::Other(s) => s,
        }
    }
}

impl Serialize for Difficulty {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Lenient field readers
// ─────────────────────────────────────────────────────────────────────────────

fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        // "steps": ["...", "..."] style arrays read as lines
        Value::Array(items) => {
            let lines: Vec<String> = items.into_iter().filter_map(value_to_string).collect();
            (!lines.is_empty()).then(|| lines.join("\n"))
        }
        Value::Object(_) => None,
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(value_to_string(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_optional_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(value_to_string(Value::deserialize(deserializer)?).filter(|s| !s.trim().is_empty()))
}

fn lenient_difficulty<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Difficulty>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.trim().is_empty() => Some(Difficulty::parse(&s)),
        _ => None,
    })
}

/// Accepts `8`, `8.5`, `"8"`, `"8/10"`, `"8 分"`; anything else is neutral
fn lenient_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let score = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => leading_number(&s),
        _ => None,
    };
    Ok(score.unwrap_or(NEUTRAL_SCORE))
}

fn leading_number(s: &str) -> Option<f64> {
    let s = s.trim();
    let end = s
        .char_indices()
        .find(|&(_, c)| !(c.is_ascii_digit() || c == '.'))
        .map_or(s.len(), |(i, _)| i);
    s[..end].parse().ok()
}
