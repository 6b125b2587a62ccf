//! Theme function — derives a small, immutable palette from one accent color.
//!
//! All color-bearing properties in a page tree come from a `Palette`. Layouts never
//! embed color literals, so swapping the accent recolors the whole document.
//! Blending is integer-rounded per channel, which keeps the output hex string
//! bit-for-bit stable across calls and runs.

use serde::{Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    #[error("invalid color '{input}': expected #rgb or #rrggbb")]
    InvalidColor { input: String },
}

// ────────────────────────────────────────────────────────────────────────────
// Color
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb`, `rrggbb`, `#rgb` or `rgb` (any case, surrounding whitespace ignored).
    pub fn parse(input: &str) -> Result<Self, ThemeError> {
        let invalid = || ThemeError::InvalidColor {
            input: input.to_string(),
        };
        let digits = input.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(invalid()),
        };
        let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Blends toward `target` by `fraction` (clamped to [0,1]; NaN counts as 0).
    pub fn mix(self, target: Color, fraction: f64) -> Color {
        let t = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        let blend = |from: u8, to: u8| {
            let from = f64::from(from);
            (from + (f64::from(to) - from) * t).round().clamp(0.0, 255.0) as u8
        };
        Color::rgb(
            blend(self.r, target.r),
            blend(self.g, target.g),
            blend(self.b, target.b),
        )
    }

    /// Channels scaled to 0.0–1.0, as PDF fill operators expect.
    pub fn unit(self) -> (f32, f32, f32) {
        (
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }

    /// Relative luminance (sRGB, WCAG weights), 0.0–1.0.
    pub fn luminance(self) -> f64 {
        let lin = |c: u8| {
            let c = f64::from(c) / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        0.2126 * lin(self.r) + 0.7152 * lin(self.g) + 0.0722 * lin(self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Theme
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    accent: Color,
}

/// Builds a theme from an accent hex string. Malformed input is rejected.
pub fn theme(accent_hex: &str) -> Result<Theme, ThemeError> {
    Ok(Theme {
        accent: Color::parse(accent_hex)?,
    })
}

impl Theme {
    pub fn accent(&self) -> Color {
        self.accent
    }

    /// Accent blended toward white by `fraction`.
    pub fn tint(&self, fraction: f64) -> Color {
        self.accent.mix(Color::WHITE, fraction)
    }

    /// Accent blended toward black by `fraction`.
    pub fn shade(&self, fraction: f64) -> Color {
        self.accent.mix(Color::BLACK, fraction)
    }

    pub fn palette(&self) -> Palette {
        Palette::from_theme(self)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Palette
// ────────────────────────────────────────────────────────────────────────────

/// Every color a layout may use. Computed once per (template, color) render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub accent: Color,
    pub accent_dark: Color,
    pub accent_soft: Color,
    pub accent_faint: Color,
    /// Headings and names.
    pub ink: Color,
    /// Body copy.
    pub body: Color,
    /// Dates, locations, secondary labels.
    pub muted: Color,
    pub rule: Color,
    pub paper: Color,
    /// Text drawn on top of an accent fill.
    pub on_accent: Color,
}

impl Palette {
    pub fn from_theme(theme: &Theme) -> Self {
        let accent = theme.accent();
        let ink = theme.shade(0.85);
        let on_accent = if accent.luminance() > 0.45 {
            ink
        } else {
            theme.tint(1.0)
        };
        Self {
            accent,
            accent_dark: theme.shade(0.35),
            accent_soft: theme.tint(0.75),
            accent_faint: theme.tint(0.92),
            ink,
            body: theme.shade(0.75),
            muted: theme.shade(0.5).mix(Color::rgb(128, 128, 128), 0.6),
            rule: theme.tint(0.8),
            paper: theme.tint(1.0),
            on_accent,
        }
    }

    #[cfg(test)]
    pub fn colors(&self) -> [Color; 10] {
        [
            self.accent,
            self.accent_dark,
            self.accent_soft,
            self.accent_faint,
            self.ink,
            self.body,
            self.muted,
            self.rule,
            self.paper,
            self.on_accent,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── parsing ─────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_normalizes_forms() {
        assert_eq!(theme("#2563EB").unwrap().accent().to_hex(), "#2563eb");
        assert_eq!(theme("2563eb").unwrap().accent().to_hex(), "#2563eb");
        assert_eq!(theme("#abc").unwrap().accent().to_hex(), "#aabbcc");
        assert_eq!(theme("  fff ").unwrap().accent().to_hex(), "#ffffff");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "#", "#12", "#12345", "#1234567", "#ggg000", "blue", "#2563eb80"] {
            assert!(
                matches!(theme(bad), Err(ThemeError::InvalidColor { .. })),
                "expected rejection for {bad:?}"
            );
        }
    }

    // ── blending ────────────────────────────────────────────────────────────

    #[test]
    fn test_tint_is_deterministic() {
        let t = theme("#2563eb").unwrap();
        assert_eq!(t.tint(0.5).to_hex(), "#92b1f5");
        assert_eq!(t.tint(0.5).to_hex(), t.tint(0.5).to_hex());
        assert_eq!(theme("#2563eb").unwrap().tint(0.5).to_hex(), "#92b1f5");
    }

    #[test]
    fn test_shade_rounds_half_away_from_zero() {
        assert_eq!(theme("#2563eb").unwrap().shade(0.5).to_hex(), "#133276");
    }

    #[test]
    fn test_fraction_bounds_are_clamped() {
        let t = theme("#2563eb").unwrap();
        assert_eq!(t.tint(0.0).to_hex(), "#2563eb");
        assert_eq!(t.tint(1.0).to_hex(), "#ffffff");
        assert_eq!(t.shade(1.0).to_hex(), "#000000");
        assert_eq!(t.tint(7.0).to_hex(), "#ffffff");
        assert_eq!(t.shade(-1.0).to_hex(), "#2563eb");
        assert_eq!(t.tint(f64::NAN).to_hex(), "#2563eb");
    }

    // ── palette ─────────────────────────────────────────────────────────────

    #[test]
    fn test_palette_tracks_accent() {
        let blue = theme("#2563eb").unwrap().palette();
        let red = theme("#dc2626").unwrap().palette();
        assert_eq!(blue.accent.to_hex(), "#2563eb");
        assert_ne!(blue.accent_dark, red.accent_dark);
        assert_eq!(blue.paper, Color::WHITE);
    }

    #[test]
    fn test_on_accent_contrasts_with_light_accent() {
        let yellow = theme("#fde047").unwrap().palette();
        assert_eq!(yellow.on_accent, yellow.ink);
        let navy = theme("#1e3a8a").unwrap().palette();
        assert_eq!(navy.on_accent, Color::WHITE);
    }
}
