use serde::{Deserialize, Serialize};

/// Per-render presentation settings. Supplied fresh with every render call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSettings {
    pub template_id: String,
    /// Hex string; validated by the theme function, never trusted as-is.
    pub accent_color: String,
    /// `sans`, `serif` or `mono` (common face names are accepted too).
    pub font_family: Option<String>,
}

impl ResumeSettings {
    pub fn new(template_id: impl Into<String>, accent_color: impl Into<String>) -> Self {
        Self {
            template_id: template_id.into(),
            accent_color: accent_color.into(),
            font_family: None,
        }
    }
}
