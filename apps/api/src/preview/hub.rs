//! Preview hub. Maps consumer id → independent `PreviewSession`.
//!
//! Sessions never share state or handles; one failing preview leaves its siblings
//! untouched. Removing a consumer closes its session and releases its handle.
//! Consumers that go quiet for longer than the idle TTL are removed by the sweeper.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use uuid::Uuid;

use crate::models::ResumeData;
use crate::preview::generator::ArtifactGenerator;
use crate::preview::session::PreviewSession;
use crate::preview::store::ArtifactStore;
use crate::preview::{PreviewKey, PreviewState};

struct Entry {
    session: Arc<PreviewSession>,
    /// Last `open`, `request` or `state` call for this consumer.
    touched: Instant,
}

#[derive(Clone)]
pub struct PreviewHub {
    sessions: Arc<RwLock<HashMap<Uuid, Entry>>>,
    generator: Arc<dyn ArtifactGenerator>,
    store: ArtifactStore,
}

impl PreviewHub {
    pub fn new(generator: Arc<dyn ArtifactGenerator>, store: ArtifactStore) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            generator,
            store,
        }
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// Registers a consumer previewing `data`; returns its id.
    pub fn open(&self, data: ResumeData, font_family: Option<String>) -> Uuid {
        let id = Uuid::new_v4();
        let session = PreviewSession::new(
            id,
            data,
            font_family,
            Arc::clone(&self.generator),
            self.store.clone(),
        );
        let entry = Entry {
            session: Arc::new(session),
            touched: Instant::now(),
        };
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, entry);
        tracing::debug!(consumer = %id, "Preview consumer opened");
        id
    }

    #[cfg(test)]
    pub fn session(&self, id: &Uuid) -> Option<Arc<PreviewSession>> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .map(|e| Arc::clone(&e.session))
    }

    /// Like `session`, but marks the consumer as active.
    fn touch(&self, id: &Uuid) -> Option<Arc<PreviewSession>> {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let entry = sessions.get_mut(id)?;
        entry.touched = Instant::now();
        Some(Arc::clone(&entry.session))
    }

    /// Starts a generation for the consumer. `None` if the consumer is unknown.
    pub fn request(&self, id: &Uuid, key: PreviewKey) -> Option<PreviewState> {
        let session = self.touch(id)?;
        session.request(key)?;
        Some(session.state())
    }

    pub fn state(&self, id: &Uuid) -> Option<PreviewState> {
        self.touch(id).map(|s| s.state())
    }

    /// Tears a consumer down. Returns false if it did not exist.
    pub fn close(&self, id: &Uuid) -> bool {
        let removed = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);
        match removed {
            Some(entry) => {
                // Other Arcs may be held briefly by in-flight handlers; close now.
                entry.session.close();
                true
            }
            None => false,
        }
    }

    /// Closes every consumer untouched for at least `idle`. Returns how many.
    pub fn sweep_idle(&self, idle: Duration) -> usize {
        let now = Instant::now();
        let expired: Vec<(Uuid, Entry)> = {
            let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
            let ids: Vec<Uuid> = sessions
                .iter()
                .filter(|(_, e)| now.duration_since(e.touched) >= idle)
                .map(|(id, _)| *id)
                .collect();
            ids.into_iter()
                .filter_map(|id| sessions.remove(&id).map(|e| (id, e)))
                .collect()
        };
        // Handles are released outside the map lock.
        for (id, entry) in &expired {
            entry.session.close();
            tracing::debug!(consumer = %id, "Idle preview consumer evicted");
        }
        expired.len()
    }

    /// Spawns the periodic idle sweep. Runs until the runtime shuts down.
    pub fn spawn_idle_sweeper(&self, idle: Duration) -> JoinHandle<()> {
        let hub = self.clone();
        let period = idle.min(Duration::from_secs(60)).max(Duration::from_millis(100));
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let evicted = hub.sweep_idle(idle);
                if evicted > 0 {
                    tracing::info!(evicted, remaining = hub.len(), "Preview sweep");
                }
            }
        })
    }

    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
