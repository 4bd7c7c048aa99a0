//! Caller-owned registry of the prediction surfaced per buffer.

use std::collections::HashMap;

use crate::plan::RenderPlan;
use crate::prediction::Prediction;

/// Identifies a buffer on the host side.
pub type BufferId = u64;

/// A prediction currently surfaced in one buffer, with the plan rendering
/// it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveEntry {
    pub prediction: Prediction,
    pub plan: RenderPlan,
}

/// Tracks what is visible where.
///
/// The engine itself is stateless, so hosts that juggle several buffers own
/// one of these and pass entries back in instead of the engine holding
/// per-buffer tables. A prediction leaves the map in exactly three ways:
/// superseded by [`publish`](Self::publish), or
/// [`remove`](Self::remove)d on accept or on any buffer edit.
#[derive(Clone, Debug, Default)]
pub struct ActivePredictions {
    entries: HashMap<BufferId, ActiveEntry>,
}

impl ActivePredictions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surfaces a new prediction for `buffer`, returning the superseded
    /// entry if one was visible. The renderer must replace the old plan
    /// wholesale; plans are never deltas.
    pub fn publish(
        &mut self,
        buffer: BufferId,
        prediction: Prediction,
        plan: RenderPlan,
    ) -> Option<ActiveEntry> {
        self.entries.insert(buffer, ActiveEntry { prediction, plan })
    }

    pub fn get(&self, buffer: BufferId) -> Option<&ActiveEntry> {
        self.entries.get(&buffer)
    }

    /// Discards the entry for `buffer`: called on accept, and on any buffer
    /// edit that invalidates the snapshot.
    pub fn remove(&mut self, buffer: BufferId) -> Option<ActiveEntry> {
        self.entries.remove(&buffer)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
