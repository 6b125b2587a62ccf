// Document compositor.
// compose(template, data, settings) resolves the layout, derives the theme, builds
// the PageTree, flows it onto pages and serializes the result to PDF bytes.
// Pure and CPU-bound: async callers run it under spawn_blocking.

pub mod flow;
pub mod handlers;
pub mod pdf;

use std::sync::Arc;

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::layout::PaperSize;
use crate::models::{ResumeData, ResumeSettings};
use crate::registry::{RegistryError, TemplateRegistry};
use crate::theme::{theme, ThemeError};

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// A finished document.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub bytes: Bytes,
    pub page_count: usize,
    pub template_id: String,
}

impl Artifact {
    pub fn content_type(&self) -> &'static str {
        PDF_CONTENT_TYPE
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComposeError {
    #[error(transparent)]
    UnknownTemplate(#[from] RegistryError),
    #[error(transparent)]
    InvalidColor(#[from] ThemeError),
    #[error("failed to serialize '{template_id}': {message}")]
    Serialize { template_id: String, message: String },
}

#[derive(Debug, Clone)]
pub struct Compositor {
    registry: Arc<TemplateRegistry>,
    paper: PaperSize,
}

impl Compositor {
    pub fn new(registry: Arc<TemplateRegistry>, paper: PaperSize) -> Self {
        Self { registry, paper }
    }

    /// Renders `data` with the template `template_id`. The template id argument
    /// takes precedence over `settings.template_id`; accent and font come from the
    /// settings. Input is never mutated.
    pub fn compose(
        &self,
        template_id: &str,
        data: &ResumeData,
        settings: &ResumeSettings,
    ) -> Result<Artifact, ComposeError> {
        let layout = self.registry.resolve(template_id)?;
        let theme = theme(&settings.accent_color)?;
        let tree = layout.layout(data, &theme, settings);
        debug!(template = template_id, sections = ?tree.section_kinds(), "Layout built");
        let flowed = flow::flow(&tree, self.paper);

        let title = match data.personal_info.full_name() {
            name if name.is_empty() => "Resume".to_string(),
            name => format!("{name} \u{2013} Resume"),
        };
        let bytes = pdf::write(&flowed, &title).map_err(|e| {
            warn!("Serialization failed for template '{}': {}", template_id, e.0);
            ComposeError::Serialize {
                template_id: template_id.to_string(),
                message: e.0,
            }
        })?;

        info!(
            template = template_id,
            strategy = layout.name(),
            pages = flowed.pages.len(),
            bytes = bytes.len(),
            "Composed document"
        );
        Ok(Artifact {
            bytes: Bytes::from(bytes),
            page_count: flowed.pages.len(),
            template_id: template_id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{experience, sample_resume};

    fn compositor() -> Compositor {
        Compositor::new(Arc::new(TemplateRegistry::builtin().unwrap()), PaperSize::Letter)
    }

    #[test]
    fn test_every_builtin_template_composes_a_pdf() {
        let c = compositor();
        let data = sample_resume();
        for meta in TemplateRegistry::builtin().unwrap().list() {
            let settings = ResumeSettings::new(&meta.id, "#2563eb");
            let artifact = c.compose(&meta.id, &data, &settings).unwrap();
            assert!(artifact.bytes.starts_with(b"%PDF"), "{}", meta.id);
            assert!(artifact.page_count >= 1);
            assert_eq!(artifact.template_id, meta.id);
            assert_eq!(artifact.content_type(), "application/pdf");
        }
    }

    #[test]
    fn test_empty_resume_still_composes() {
        let c = compositor();
        let artifact = c
            .compose("modern", &ResumeData::default(), &ResumeSettings::new("modern", "#000"))
            .unwrap();
        assert_eq!(artifact.page_count, 1);
    }

    #[test]
    fn test_long_history_paginates() {
        let c = compositor();
        let mut data = sample_resume();
        let base = data.experiences[1].clone();
        for i in 0..25 {
            let mut e = experience(&format!("Role {i}"), "Acme", base.start_date, base.end_date);
            e.achievements = (0..6).map(|j| format!("Delivered outcome {j} for role {i}")).collect();
            data.experiences.push(e);
        }
        for id in ["classic", "modern", "creative"] {
            let artifact = c.compose(id, &data, &ResumeSettings::new(id, "#2563eb")).unwrap();
            assert!(artifact.page_count > 1, "{id} did not paginate");
        }
    }

    #[test]
    fn test_same_input_same_bytes() {
        let c = compositor();
        let data = sample_resume();
        let settings = ResumeSettings::new("tech", "#0f766e");
        let a = c.compose("tech", &data, &settings).unwrap();
        let b = c.compose("tech", &data, &settings).unwrap();
        assert_eq!(a.bytes, b.bytes);
    }

    #[test]
    fn test_accent_changes_output() {
        let c = compositor();
        let data = sample_resume();
        let blue = c.compose("modern", &data, &ResumeSettings::new("modern", "#2563eb")).unwrap();
        let red = c.compose("modern", &data, &ResumeSettings::new("modern", "#dc2626")).unwrap();
        assert_ne!(blue.bytes, red.bytes);
    }

    #[test]
    fn test_unknown_template_fails_loudly() {
        let err = compositor()
            .compose("nope", &sample_resume(), &ResumeSettings::new("nope", "#2563eb"))
            .unwrap_err();
        assert!(matches!(err, ComposeError::UnknownTemplate(_)));
    }

    #[test]
    fn test_invalid_accent_is_rejected() {
        let err = compositor()
            .compose("classic", &sample_resume(), &ResumeSettings::new("classic", "blue-ish"))
            .unwrap_err();
        assert!(matches!(err, ComposeError::InvalidColor(_)));
    }

    #[test]
    fn test_paper_size_changes_output() {
        let data = sample_resume();
        let settings = ResumeSettings::new("minimal", "#2563eb");
        let a4 = Compositor::new(Arc::new(TemplateRegistry::builtin().unwrap()), PaperSize::A4)
            .compose("minimal", &data, &settings)
            .unwrap();
        let letter = compositor().compose("minimal", &data, &settings).unwrap();
        assert_ne!(a4.bytes, letter.bytes);
    }
}
