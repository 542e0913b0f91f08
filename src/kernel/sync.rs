//! Debounced write-through of article edits.

use std::time::{Duration, Instant};

use super::debounce::Debouncer;
use crate::models::ArticleId;

pub const DEFAULT_SAVE_DELAY: Duration = Duration::from_millis(800);

/// One coalesced write: the latest title and body seen for `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub id: ArticleId,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingContent {
    title: String,
    body: String,
}

/// Coalesces edits per article id into one trailing-edge write.
///
/// Timers belong to ids, not to the editor session: switching articles while a
/// write is pending still writes the old article's content to the old id.
#[derive(Debug, Clone)]
pub struct PersistenceGateway {
    debouncer: Debouncer<ArticleId, PendingContent>,
}

impl Default for PersistenceGateway {
    fn default() -> Self {
        Self::new(DEFAULT_SAVE_DELAY)
    }
}

impl PersistenceGateway {
    pub fn new(delay: Duration) -> Self {
        Self {
            debouncer: Debouncer::new(delay),
        }
    }

    pub fn schedule(&mut self, id: ArticleId, title: String, body: String, now: Instant) {
        let fresh = self
            .debouncer
            .schedule(id.clone(), PendingContent { title, body }, now);
        if fresh {
            tracing::trace!(article = %id, "save scheduled");
        }
    }

    pub fn take_due(&mut self, now: Instant) -> Vec<SaveRequest> {
        into_requests(self.debouncer.take_due(now))
    }

    /// Everything still pending, due or not. Used on shutdown.
    pub fn flush_all(&mut self) -> Vec<SaveRequest> {
        into_requests(self.debouncer.drain_all())
    }

    pub fn has_pending(&self) -> bool {
        self.debouncer.pending_len() > 0
    }

    pub fn is_pending(&self, id: &ArticleId) -> bool {
        self.debouncer.is_pending(id)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.next_deadline()
    }
}

fn into_requests(entries: Vec<(ArticleId, PendingContent)>) -> Vec<SaveRequest> {
    entries
        .into_iter()
        .map(|(id, content)| SaveRequest {
            id,
            title: content.title,
            body: content.body,
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/sync.rs"]
mod tests;
