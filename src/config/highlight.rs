//! Highlight palette overrides
//!
//! Colours are `#RRGGBB` strings. An unparsable colour keeps the default and
//! records a warning instead of failing the whole config.

use crate::highlight::{HighlightPalette, Rgb};
use serde::Deserialize;
use std::time::Duration;

/// `[highlight]` section as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileHighlight {
    pub idle: Option<String>,
    pub decorative: Option<String>,
    pub hover: Option<String>,
    pub hover_emissive: Option<String>,
    pub selected: Option<String>,
    pub selected_emissive: Option<String>,
    pub pulse_period_ms: Option<u64>,
}

impl HighlightPalette {
    /// Merge file overrides onto the default palette.
    ///
    /// Invalid values are reported through `warnings`.
    pub fn from_file(file: Option<FileHighlight>, warnings: &mut Vec<String>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        let mut color = |key: &str, value: Option<String>, default: Rgb| -> Rgb {
            match value {
                None => default,
                Some(v) => Rgb::parse(&v).unwrap_or_else(|| {
                    warnings.push(format!(
                        "highlight.{key} = {v:?} is not a #RRGGBB colour, using {default}"
                    ));
                    default
                }),
            }
        };

        let idle = color("idle", file.idle, defaults.idle);
        let decorative = color("decorative", file.decorative, defaults.decorative);
        let hover = color("hover", file.hover, defaults.hover);
        let hover_emissive = color("hover_emissive", file.hover_emissive, defaults.hover_emissive);
        let selected = color("selected", file.selected, defaults.selected);
        let selected_emissive = color(
            "selected_emissive",
            file.selected_emissive,
            defaults.selected_emissive,
        );

        let pulse_period = match file.pulse_period_ms {
            Some(0) => {
                warnings.push("highlight.pulse_period_ms must be > 0, using default".to_string());
                defaults.pulse_period
            }
            Some(ms) => Duration::from_millis(ms),
            None => defaults.pulse_period,
        };

        Self {
            idle,
            decorative,
            hover,
            hover_emissive,
            selected,
            selected_emissive,
            pulse_period,
        }
    }
}
