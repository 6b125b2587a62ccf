//! Per-consumer preview session.
//!
//! `request` bumps a monotonic generation token and starts a generation task. A
//! finished task applies its result only if its token is still the latest and the
//! session is open; anything else is dropped unseen. The session owns at most one
//! `ArtifactHandle`; replacing or closing releases the previous one.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::compositor::Artifact;
use crate::models::ResumeData;
use crate::preview::generator::{ArtifactGenerator, PreviewRequest};
use crate::preview::store::{ArtifactHandle, ArtifactStore};
use crate::preview::{PreviewError, PreviewKey, PreviewState};

pub struct PreviewSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    consumer_id: Uuid,
    data: Arc<ResumeData>,
    font_family: Option<String>,
    generator: Arc<dyn ArtifactGenerator>,
    store: ArtifactStore,
    shared: Mutex<Shared>,
    state: watch::Sender<PreviewState>,
}

#[derive(Default)]
struct Shared {
    latest: u64,
    handle: Option<ArtifactHandle>,
    closed: bool,
}

impl PreviewSession {
    pub fn new(
        consumer_id: Uuid,
        data: ResumeData,
        font_family: Option<String>,
        generator: Arc<dyn ArtifactGenerator>,
        store: ArtifactStore,
    ) -> Self {
        let (state, _) = watch::channel(PreviewState::Idle);
        Self {
            inner: Arc::new(SessionInner {
                consumer_id,
                data: Arc::new(data),
                font_family,
                generator,
                store,
                shared: Mutex::new(Shared::default()),
                state,
            }),
        }
    }

    pub fn state(&self) -> PreviewState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PreviewState> {
        self.inner.state.subscribe()
    }

    /// Starts a generation for `key`, superseding any generation in flight.
    /// Returns the generation token; `None` once the session is closed.
    pub fn request(&self, key: PreviewKey) -> Option<u64> {
        let generation = {
            let mut shared = self.inner.lock();
            if shared.closed {
                return None;
            }
            shared.latest += 1;
            let generation = shared.latest;
            debug!(
                consumer = %self.inner.consumer_id,
                generation,
                template = %key.template_id,
                "Preview generating"
            );
            self.inner.state.send_replace(PreviewState::Generating {
                key: key.clone(),
                generation,
            });
            generation
        };

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let request = PreviewRequest {
                key: key.clone(),
                data: Arc::clone(&inner.data),
                font_family: inner.font_family.clone(),
            };
            let result = inner.generator.generate(request).await;
            inner.complete(generation, key, result);
        });
        Some(generation)
    }

    /// Tears the session down: in-flight results are ignored from now on and the
    /// live handle, if any, is released. Idempotent.
    pub fn close(&self) {
        let handle = {
            let mut shared = self.inner.lock();
            if shared.closed {
                return;
            }
            shared.closed = true;
            shared.latest += 1;
            self.inner.state.send_replace(PreviewState::Idle);
            shared.handle.take()
        };
        debug!(consumer = %self.inner.consumer_id, "Preview session closed");
        drop(handle);
    }

    #[cfg(test)]
    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }
}

impl Drop for PreviewSession {
    fn drop(&mut self) {
        self.close();
    }
}

impl SessionInner {
    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn complete(&self, generation: u64, key: PreviewKey, result: Result<Artifact, PreviewError>) {
        let previous = {
            let mut shared = self.lock();
            if shared.closed || generation != shared.latest {
                debug!(
                    consumer = %self.consumer_id,
                    generation,
                    latest = shared.latest,
                    "Discarding stale preview result"
                );
                return;
            }
            match result {
                Ok(artifact) => {
                    let page_count = artifact.page_count;
                    let handle = self.store.publish(artifact);
                    let state = PreviewState::Ready {
                        key,
                        generation,
                        handle: handle.id(),
                        url: handle.url(),
                        page_count,
                    };
                    debug!(consumer = %self.consumer_id, generation, "Preview ready");
                    self.state.send_replace(state);
                    shared.handle.replace(handle)
                }
                Err(error) => {
                    warn!(
                        consumer = %self.consumer_id,
                        generation,
                        template = %error.template_id,
                        "Preview failed: {}",
                        error.message
                    );
                    self.state.send_replace(PreviewState::Failed {
                        key,
                        generation,
                        error,
                    });
                    shared.handle.take()
                }
            }
        };
        // Released outside the lock.
        drop(previous);
    }
}
