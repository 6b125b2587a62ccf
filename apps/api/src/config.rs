use std::time::Duration;

use anyhow::{Context, Result};

use crate::layout::PaperSize;
use crate::theme::Color;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Templates per catalog page when the request does not say.
    pub catalog_page_size: usize,
    pub paper_size: PaperSize,
    /// Accent used when a preview request omits one.
    pub default_accent_color: String,
    /// Preview consumers untouched this long are closed and their handles released.
    pub preview_idle_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let paper = var("PAPER_SIZE", "letter");
        let accent = var("DEFAULT_ACCENT_COLOR", "#2563eb");
        Color::parse(&accent)
            .with_context(|| format!("DEFAULT_ACCENT_COLOR '{accent}' is not a hex color"))?;

        Ok(Config {
            port: var("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG", "info"),
            catalog_page_size: var("CATALOG_PAGE_SIZE", "12")
                .parse::<usize>()
                .context("CATALOG_PAGE_SIZE must be a positive integer")?
                .max(1),
            paper_size: PaperSize::parse(&paper)
                .with_context(|| format!("PAPER_SIZE must be 'letter' or 'a4', got '{paper}'"))?,
            default_accent_color: accent,
            preview_idle_ttl: Duration::from_secs(
                var("PREVIEW_IDLE_TTL_SECS", "1800")
                    .parse::<u64>()
                    .context("PREVIEW_IDLE_TTL_SECS must be a number of seconds")?
                    .max(1),
            ),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            catalog_page_size: 12,
            paper_size: PaperSize::Letter,
            default_accent_color: "#2563eb".to_string(),
            preview_idle_ttl: Duration::from_secs(1800),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.catalog_page_size, 12);
        assert_eq!(config.paper_size, PaperSize::Letter);
        assert_eq!(config.default_accent_color, "#2563eb");
        assert_eq!(config.preview_idle_ttl, Duration::from_secs(1800));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "9000"),
            ("CATALOG_PAGE_SIZE", "6"),
            ("PAPER_SIZE", "A4"),
            ("DEFAULT_ACCENT_COLOR", "#0f766e"),
            ("PREVIEW_IDLE_TTL_SECS", "120"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.catalog_page_size, 6);
        assert_eq!(config.paper_size, PaperSize::A4);
        assert_eq!(config.default_accent_color, "#0f766e");
        assert_eq!(config.preview_idle_ttl, Duration::from_secs(120));
    }

    #[test]
    fn test_malformed_values_fail() {
        assert!(load(&[("PORT", "http")]).is_err());
        assert!(load(&[("PAPER_SIZE", "legal")]).is_err());
        assert!(load(&[("PREVIEW_IDLE_TTL_SECS", "-5")]).is_err());
        let err = load(&[("DEFAULT_ACCENT_COLOR", "teal")]).unwrap_err();
        assert!(err.to_string().contains("DEFAULT_ACCENT_COLOR"));
    }
}
