//! Latest-wins storage for live previews.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicU64, Ordering},
};

use crate::session::engine::CompositionResult;

/// Monotonic ticket handed out by [`PreviewSlot::begin`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Shared preview state. Results from superseded generations are dropped, never stored.
#[derive(Debug, Default)]
pub struct PreviewSlot {
    newest: AtomicU64,
    latest: Mutex<Option<(Generation, Arc<CompositionResult>)>>,
}

impl PreviewSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new preview; every earlier generation becomes stale.
    pub fn begin(&self) -> Generation {
        Generation(self.newest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.newest.load(Ordering::SeqCst) == generation.0
    }

    /// Store `result` if `generation` is still the newest. Returns whether it was stored.
    pub fn publish(&self, generation: Generation, result: CompositionResult) -> bool {
        let mut latest = self.latest.lock().unwrap_or_else(|e| e.into_inner());
        // Checked under the lock so a stale publish cannot overwrite a newer one.
        if !self.is_current(generation) {
            tracing::debug!(
                generation = generation.0,
                newest = self.newest.load(Ordering::SeqCst),
                "dropping stale preview"
            );
            return false;
        }
        *latest = Some((generation, Arc::new(result)));
        true
    }

    /// Most recently published preview.
    pub fn latest(&self) -> Option<Arc<CompositionResult>> {
        self.latest
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(|(_, r)| r.clone())
    }

    /// Generation of the most recently published preview.
    pub fn latest_generation(&self) -> Option<Generation> {
        self.latest
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(|(g, _)| *g)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/preview.rs"]
mod tests;
