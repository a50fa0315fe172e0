//! Highlight policy: visual parameters from selection state and elapsed time
//!
//! Pure function of `(visual state, elapsed)`. It is evaluated every render
//! frame and never touches selection state. The selected-region pulse is
//! driven by wall-clock elapsed time, so two renderers at different frame
//! rates see the same glow at the same instant.

use crate::selection::RegionVisualState;
use serde::Serialize;
use std::f32::consts::TAU;
use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// Colour
// ─────────────────────────────────────────────────────────────────────────────

/// 24-bit sRGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// From a packed `0xRRGGBB` value
    pub const fn from_hex(hex: u32) -> Self {
        Self(
            ((hex >> 16) & 0xff) as u8,
            ((hex >> 8) & 0xff) as u8,
            (hex & 0xff) as u8,
        )
    }

    /// Parse `#RRGGBB` (leading `#` optional)
    pub fn parse(value: &str) -> Option<Self> {
        let hex = value.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(hex, 16).ok().map(Self::from_hex)
    }

    pub fn to_hex_string(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// Relative luminance approximation, 0-255
    pub fn luma(&self) -> f32 {
        0.2126 * self.0 as f32 + 0.7152 * self.1 as f32 + 0.0722 * self.2 as f32
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Palette
// ─────────────────────────────────────────────────────────────────────────────

/// Default pulse period: 2π / 4 rad·s⁻¹ ≈ 1.571 s
pub const DEFAULT_PULSE_PERIOD: Duration = Duration::from_millis(1571);

/// Glow band for the selected pulse
pub const PULSE_CENTER: f32 = 0.6;
pub const PULSE_AMPLITUDE: f32 = 0.2;

/// Constant glow for hovered regions
pub const HOVER_GLOW: f32 = 0.3;

/// Colours and timing for every visual state
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightPalette {
    /// Interactive region at rest (lighter than decorative, signals affordance)
    pub idle: Rgb,
    /// Decorative region, always
    pub decorative: Rgb,
    pub hover: Rgb,
    pub hover_emissive: Rgb,
    pub selected: Rgb,
    pub selected_emissive: Rgb,
    pub pulse_period: Duration,
}

impl Default for HighlightPalette {
    fn default() -> Self {
        Self {
            idle: Rgb::from_hex(0xa1a1aa),
            decorative: Rgb::from_hex(0x52525b),
            hover: Rgb::from_hex(0xe4e4e7),
            hover_emissive: Rgb::BLACK,
            selected: Rgb::from_hex(0x60a5fa),
            selected_emissive: Rgb::from_hex(0x1d4ed8),
            pulse_period: DEFAULT_PULSE_PERIOD,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Policy
// ─────────────────────────────────────────────────────────────────────────────

/// What the renderer applies to a primitive's material this frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisualParams {
    pub color: Rgb,
    pub emissive: Rgb,
    /// Emissive intensity, 0.0 = no glow
    pub glow: f32,
    /// True while the glow is time-varying
    pub pulsing: bool,
}

#[derive(Debug, Clone, Default)]
pub struct HighlightPolicy {
    palette: HighlightPalette,
}

impl HighlightPolicy {
    pub fn new(palette: HighlightPalette) -> Self {
        Self { palette }
    }

    pub fn palette(&self) -> &HighlightPalette {
        &self.palette
    }

    /// Visual parameters for one region.
    ///
    /// `elapsed` is wall-clock time since the scene started; only the
    /// selected state depends on it.
    pub fn visual(&self, state: RegionVisualState, elapsed: Duration) -> VisualParams {
        let p = &self.palette;
        match state {
            RegionVisualState::Selected => VisualParams {
                color: p.selected,
                emissive: p.selected_emissive,
                glow: self.pulse(elapsed),
                pulsing: true,
            },
            RegionVisualState::Hovered => VisualParams {
                color: p.hover,
                emissive: p.hover_emissive,
                glow: HOVER_GLOW,
                pulsing: false,
            },
            RegionVisualState::Idle => VisualParams {
                color: p.idle,
                emissive: Rgb::BLACK,
                glow: 0.0,
                pulsing: false,
            },
            RegionVisualState::Static => VisualParams {
                color: p.decorative,
                emissive: Rgb::BLACK,
                glow: 0.0,
                pulsing: false,
            },
        }
    }

    /// Sinusoidal glow in [CENTER - AMPLITUDE, CENTER + AMPLITUDE]
    pub fn pulse(&self, elapsed: Duration) -> f32 {
        let period = self.palette.pulse_period.as_secs_f64();
        if period <= 0.0 {
            return PULSE_CENTER;
        }
        // phase in f64 keeps long-running sessions from losing precision
        let phase = (elapsed.as_secs_f64() / period).fract() as f32;
        PULSE_CENTER + (phase * TAU).sin() * PULSE_AMPLITUDE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> HighlightPolicy {
        HighlightPolicy::default()
    }

    #[test]
    fn test_pulse_stays_in_band() {
        let policy = policy();
        for ms in (0..5_000).step_by(37) {
            let glow = policy.pulse(Duration::from_millis(ms));
            assert!((0.4 - 1e-4..=0.8 + 1e-4).contains(&glow), "glow {glow} at {ms}ms");
        }
    }

    #[test]
    fn test_pulse_is_continuous() {
        let policy = policy();
        let t = Duration::from_millis(200);
        let a = policy.visual(RegionVisualState::Selected, t).glow;
        let b = policy
            .visual(RegionVisualState::Selected, t + Duration::from_millis(16))
            .glow;
        assert_ne!(a, b);
        assert!((a - b).abs() < 0.05);
    }

    #[test]
    fn test_pulse_repeats_after_one_period() {
        let policy = policy();
        let t = Duration::from_millis(321);
        let a = policy.pulse(t);
        let b = policy.pulse(t + DEFAULT_PULSE_PERIOD);
        let c = policy.pulse(t + DEFAULT_PULSE_PERIOD * 7);
        assert!((a - b).abs() < 1e-4);
        assert!((a - c).abs() < 1e-4);
    }

    #[test]
    fn test_static_never_glows() {
        let policy = policy();
        for ms in [0, 400, 1_000, 90_000] {
            let v = policy.visual(RegionVisualState::Static, Duration::from_millis(ms));
            assert_eq!(v.color, policy.palette().decorative);
            assert_eq!(v.glow, 0.0);
            assert!(!v.pulsing);
        }
    }

    #[test]
    fn test_idle_interactive_is_lighter_than_decorative() {
        let policy = policy();
        let idle = policy.visual(RegionVisualState::Idle, Duration::ZERO);
        let decorative = policy.visual(RegionVisualState::Static, Duration::ZERO);
        assert!(idle.color.luma() > decorative.color.luma());
    }

    #[test]
    fn test_hover_is_constant() {
        let policy = policy();
        let a = policy.visual(RegionVisualState::Hovered, Duration::from_millis(10));
        let b = policy.visual(RegionVisualState::Hovered, Duration::from_millis(910));
        assert_eq!(a, b);
        assert_eq!(a.glow, HOVER_GLOW);
    }

    #[test]
    fn test_default_palette_matches_renderer_constants() {
        let p = HighlightPalette::default();
        assert_eq!(p.idle, Rgb::from_hex(0xa1a1aa));
        assert_eq!(p.decorative, Rgb::from_hex(0x52525b));
        assert_eq!(p.hover, Rgb::from_hex(0xe4e4e7));
        // hover relies on glow intensity alone
        assert_eq!(p.hover_emissive, Rgb::BLACK);
        assert_eq!(p.selected, Rgb::from_hex(0x60a5fa));
        assert_eq!(p.selected_emissive, Rgb::from_hex(0x1d4ed8));
    }

    #[test]
    fn test_rgb_parse() {
        assert_eq!(Rgb::parse("#60a5fa"), Some(Rgb::from_hex(0x60a5fa)));
        assert_eq!(Rgb::parse("1D4ED8"), Some(Rgb(0x1d, 0x4e, 0xd8)));
        assert_eq!(Rgb::parse("#fff"), None);
        assert_eq!(Rgb::parse("#gggggg"), None);
        assert_eq!(Rgb::from_hex(0xa1a1aa).to_hex_string(), "#a1a1aa");
    }
}
