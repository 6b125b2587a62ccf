//! Artifact store — process-wide registry of generated documents addressed by
//! revocable handles.
//!
//! An `ArtifactHandle` is the only owner of its entry: dropping it revokes the
//! entry exactly once. Handles are deliberately not `Clone`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use uuid::Uuid;

use crate::compositor::Artifact;

#[derive(Debug, Clone, Default)]
pub struct ArtifactStore {
    inner: Arc<StoreInner>,
}

#[derive(Debug, Default)]
struct StoreInner {
    artifacts: Mutex<HashMap<Uuid, Artifact>>,
    created: AtomicU64,
    revoked: AtomicU64,
}

impl ArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<Uuid, Artifact>> {
        self.inner
            .artifacts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers an artifact and returns the handle that owns it.
    pub fn publish(&self, artifact: Artifact) -> ArtifactHandle {
        let id = Uuid::new_v4();
        self.entries().insert(id, artifact);
        self.inner.created.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(handle = %id, "Artifact published");
        ArtifactHandle {
            id,
            store: self.clone(),
        }
    }

    /// The artifact behind a live handle. `None` once revoked.
    pub fn get(&self, id: &Uuid) -> Option<Artifact> {
        self.entries().get(id).cloned()
    }

    pub fn live(&self) -> usize {
        self.entries().len()
    }

    pub fn created(&self) -> u64 {
        self.inner.created.load(Ordering::SeqCst)
    }

    pub fn revoked(&self) -> u64 {
        self.inner.revoked.load(Ordering::SeqCst)
    }

    fn revoke(&self, id: &Uuid) {
        if self.entries().remove(id).is_some() {
            self.inner.revoked.fetch_add(1, Ordering::SeqCst);
            tracing::debug!(handle = %id, "Artifact revoked");
        } else {
            tracing::warn!(handle = %id, "Revoke of unknown artifact handle");
        }
    }
}

/// Exclusive, revocable reference to a published artifact.
#[derive(Debug)]
pub struct ArtifactHandle {
    id: Uuid,
    store: ArtifactStore,
}

impl ArtifactHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn url(&self) -> String {
        format!("blob:{}", self.id)
    }
}

impl Drop for ArtifactHandle {
    fn drop(&mut self) {
        self.store.revoke(&self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn artifact(tag: &str) -> Artifact {
        Artifact {
            bytes: Bytes::from(tag.to_string()),
            page_count: 1,
            template_id: tag.to_string(),
        }
    }

    #[test]
    fn test_handle_resolves_until_released() {
        let store = ArtifactStore::new();
        let handle = store.publish(artifact("a"));
        let id = handle.id();
        assert!(handle.url().starts_with("blob:"));
        assert_eq!(store.get(&id).unwrap().bytes, Bytes::from("a"));

        drop(handle);
        assert!(store.get(&id).is_none());
        assert_eq!((store.created(), store.revoked(), store.live()), (1, 1, 0));
    }

    #[test]
    fn test_each_handle_revokes_exactly_once() {
        let store = ArtifactStore::new();
        let handles: Vec<_> = (0..5).map(|i| store.publish(artifact(&i.to_string()))).collect();
        assert_eq!(store.live(), 5);
        drop(handles);
        assert_eq!(store.created(), 5);
        assert_eq!(store.revoked(), 5);
        assert_eq!(store.live(), 0);
    }

    #[test]
    fn test_clones_share_one_registry() {
        let store = ArtifactStore::new();
        let other = store.clone();
        let handle = store.publish(artifact("x"));
        assert!(other.get(&handle.id()).is_some());
        drop(handle);
        assert_eq!(other.revoked(), 1);
    }
}
