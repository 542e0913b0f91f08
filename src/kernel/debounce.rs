//! Trailing-edge debounce keyed per item.
//!
//! Each key owns an independent deadline. Scheduling a key again replaces its
//! payload and pushes its deadline out; other keys are untouched. Deadlines are
//! compared against the `now` the caller passes in, so the main loop's tick
//! (or a test with `Instant` arithmetic) drives expiry.

use rustc_hash::FxHashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Pending<P> {
    deadline: Instant,
    payload: P,
}

#[derive(Debug, Clone)]
pub struct Debouncer<K, P> {
    delay: Duration,
    pending: FxHashMap<K, Pending<P>>,
}

impl<K, P> Debouncer<K, P>
where
    K: Eq + Hash + Clone,
{
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: FxHashMap::default(),
        }
    }

    /// Stores `payload` as the latest value for `key` and resets its deadline.
    /// Returns `true` when `key` had nothing pending before.
    pub fn schedule(&mut self, key: K, payload: P, now: Instant) -> bool {
        let deadline = now + self.delay;
        self.pending
            .insert(key, Pending { deadline, payload })
            .is_none()
    }

    pub fn cancel(&mut self, key: &K) -> Option<P> {
        self.pending.remove(key).map(|pending| pending.payload)
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.pending.contains_key(key)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|pending| pending.deadline).min()
    }

    /// Removes and returns every entry whose deadline is at or before `now`,
    /// earliest deadline first.
    pub fn take_due(&mut self, now: Instant) -> Vec<(K, P)> {
        let due: Vec<K> = self
            .pending
            .iter()
            .filter(|(_, pending)| pending.deadline <= now)
            .map(|(key, _)| key.clone())
            .collect();

        let mut taken: Vec<(Instant, K, P)> = due
            .into_iter()
            .filter_map(|key| {
                let pending = self.pending.remove(&key)?;
                Some((pending.deadline, key, pending.payload))
            })
            .collect();
        taken.sort_by_key(|(deadline, _, _)| *deadline);
        taken
            .into_iter()
            .map(|(_, key, payload)| (key, payload))
            .collect()
    }

    /// Removes everything regardless of deadline.
    pub fn drain_all(&mut self) -> Vec<(K, P)> {
        let mut taken: Vec<(Instant, K, P)> = self
            .pending
            .drain()
            .map(|(key, pending)| (pending.deadline, key, pending.payload))
            .collect();
        taken.sort_by_key(|(deadline, _, _)| *deadline);
        taken
            .into_iter()
            .map(|(_, key, payload)| (key, payload))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/debounce.rs"]
mod tests;
