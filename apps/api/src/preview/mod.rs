// Preview pipeline.
// One session per consumer runs the Idle → Generating → Ready | Failed machine.
// A monotonic generation token decides which result may be applied; the artifact of
// a Ready state is owned by exactly one revocable handle.

pub mod generator;
pub mod handlers;
pub mod hub;
pub mod session;
pub mod store;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::compositor::ComposeError;

pub use generator::{ArtifactGenerator, CompositorGenerator};
pub use hub::PreviewHub;
pub use store::ArtifactStore;

/// What a consumer asked to see.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewKey {
    pub template_id: String,
    pub accent_color: String,
}

impl PreviewKey {
    pub fn new(template_id: impl Into<String>, accent_color: impl Into<String>) -> Self {
        Self {
            template_id: template_id.into(),
            accent_color: accent_color.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewErrorKind {
    UnknownTemplate,
    InvalidColor,
    Generation,
}

/// Structured failure exposed in the `Failed` state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct PreviewError {
    pub kind: PreviewErrorKind,
    pub template_id: String,
    pub message: String,
}

impl PreviewError {
    pub fn generation(template_id: &str, message: impl Into<String>) -> Self {
        Self {
            kind: PreviewErrorKind::Generation,
            template_id: template_id.to_string(),
            message: message.into(),
        }
    }

    pub fn from_compose(template_id: &str, err: ComposeError) -> Self {
        let kind = match &err {
            ComposeError::UnknownTemplate(_) => PreviewErrorKind::UnknownTemplate,
            ComposeError::InvalidColor(_) => PreviewErrorKind::InvalidColor,
            ComposeError::Serialize { .. } => PreviewErrorKind::Generation,
        };
        Self {
            kind,
            template_id: template_id.to_string(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum PreviewState {
    Idle,
    Generating {
        key: PreviewKey,
        generation: u64,
    },
    Ready {
        key: PreviewKey,
        generation: u64,
        handle: Uuid,
        url: String,
        page_count: usize,
    },
    Failed {
        key: PreviewKey,
        generation: u64,
        error: PreviewError,
    },
}

impl PreviewState {
    #[cfg(test)]
    pub fn key(&self) -> Option<&PreviewKey> {
        match self {
            PreviewState::Idle => None,
            PreviewState::Generating { key, .. }
            | PreviewState::Ready { key, .. }
            | PreviewState::Failed { key, .. } => Some(key),
        }
    }

    #[cfg(test)]
    pub fn is_settled(&self) -> bool {
        matches!(self, PreviewState::Ready { .. } | PreviewState::Failed { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, PreviewState::Failed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RegistryError;

    #[test]
    fn test_state_serializes_with_status_tag() {
        let state = PreviewState::Generating {
            key: PreviewKey::new("modern", "#2563eb"),
            generation: 3,
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["status"], "generating");
        assert_eq!(json["generation"], 3);
        assert_eq!(json["key"]["templateId"], "modern");
    }

    #[test]
    fn test_compose_errors_map_to_kinds() {
        let err = PreviewError::from_compose(
            "x",
            ComposeError::UnknownTemplate(RegistryError::UnknownTemplate { id: "x".into() }),
        );
        assert_eq!(err.kind, PreviewErrorKind::UnknownTemplate);
        assert!(err.message.contains("x"));
        assert_eq!(
            serde_json::to_value(&err).unwrap()["kind"],
            "unknown_template"
        );
    }
}
