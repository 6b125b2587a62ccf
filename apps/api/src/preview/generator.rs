//! Artifact generator seam.
//!
//! The pipeline only knows `ArtifactGenerator`; the production backend composes a
//! PDF on the blocking pool. Tests swap in scripted generators with delays.

use std::sync::Arc;

use async_trait::async_trait;

use crate::compositor::{Artifact, Compositor};
use crate::models::{ResumeData, ResumeSettings};
use crate::preview::{PreviewError, PreviewKey};

/// Everything one generation needs.
#[derive(Debug, Clone)]
pub struct PreviewRequest {
    pub key: PreviewKey,
    pub data: Arc<ResumeData>,
    pub font_family: Option<String>,
}

impl PreviewRequest {
    pub fn settings(&self) -> ResumeSettings {
        ResumeSettings {
            font_family: self.font_family.clone(),
            ..ResumeSettings::new(&self.key.template_id, &self.key.accent_color)
        }
    }
}

/// Carried in shared state as `Arc<dyn ArtifactGenerator>`.
#[async_trait]
pub trait ArtifactGenerator: Send + Sync {
    async fn generate(&self, request: PreviewRequest) -> Result<Artifact, PreviewError>;
}

/// Production generator backed by the document compositor.
pub struct CompositorGenerator {
    compositor: Compositor,
}

impl CompositorGenerator {
    pub fn new(compositor: Compositor) -> Self {
        Self { compositor }
    }
}

#[async_trait]
impl ArtifactGenerator for CompositorGenerator {
    async fn generate(&self, request: PreviewRequest) -> Result<Artifact, PreviewError> {
        let compositor = self.compositor.clone();
        let template_id = request.key.template_id.clone();

        // CPU-bound composition: keep it off the async executor.
        let joined = tokio::task::spawn_blocking(move || {
            let settings = request.settings();
            compositor.compose(&request.key.template_id, &request.data, &settings)
        })
        .await;

        match joined {
            Ok(result) => result.map_err(|e| PreviewError::from_compose(&template_id, e)),
            Err(e) => {
                // A panic inside a layout is attributed to that template, not hidden.
                tracing::error!(template = %template_id, "Composition task failed: {e}");
                Err(PreviewError::generation(
                    &template_id,
                    format!("template '{template_id}' failed while composing"),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PaperSize;
    use crate::models::fixtures::sample_resume;
    use crate::preview::PreviewErrorKind;
    use crate::registry::TemplateRegistry;

    fn generator() -> CompositorGenerator {
        CompositorGenerator::new(Compositor::new(
            Arc::new(TemplateRegistry::builtin().unwrap()),
            PaperSize::Letter,
        ))
    }

    fn request(template: &str, accent: &str) -> PreviewRequest {
        PreviewRequest {
            key: PreviewKey::new(template, accent),
            data: Arc::new(sample_resume()),
            font_family: None,
        }
    }

    #[tokio::test]
    async fn test_generates_pdf_off_the_executor() {
        let artifact = generator().generate(request("modern", "#2563eb")).await.unwrap();
        assert!(artifact.bytes.starts_with(b"%PDF"));
        assert_eq!(artifact.template_id, "modern");
    }

    #[tokio::test]
    async fn test_configuration_errors_are_structured() {
        let err = generator().generate(request("missing", "#2563eb")).await.unwrap_err();
        assert_eq!(err.kind, PreviewErrorKind::UnknownTemplate);
        assert_eq!(err.template_id, "missing");

        let err = generator().generate(request("classic", "#12")).await.unwrap_err();
        assert_eq!(err.kind, PreviewErrorKind::InvalidColor);
    }

    #[test]
    fn test_request_settings_carry_font() {
        let mut req = request("classic", "#000000");
        req.font_family = Some("serif".to_string());
        let settings = req.settings();
        assert_eq!(settings.template_id, "classic");
        assert_eq!(settings.font_family.as_deref(), Some("serif"));
    }
}
