use std::sync::Arc;

use crate::compositor::Compositor;
use crate::config::Config;
use crate::preview::{ArtifactGenerator, ArtifactStore, CompositorGenerator, PreviewHub};
use crate::registry::TemplateRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Built once at startup; read-only afterwards.
    pub registry: Arc<TemplateRegistry>,
    pub compositor: Compositor,
    /// Per-consumer preview sessions. Owns the artifact store.
    pub previews: PreviewHub,
}

impl AppState {
    pub fn new(config: Config, registry: TemplateRegistry) -> Self {
        let registry = Arc::new(registry);
        let compositor = Compositor::new(Arc::clone(&registry), config.paper_size);
        let generator: Arc<dyn ArtifactGenerator> =
            Arc::new(CompositorGenerator::new(compositor.clone()));
        Self {
            config,
            registry,
            compositor,
            previews: PreviewHub::new(generator, ArtifactStore::new()),
        }
    }

    pub fn artifacts(&self) -> &ArtifactStore {
        self.previews.store()
    }
}
