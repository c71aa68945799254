//! Per-call visited-set
//!
//! Tracks composite identities by address, not by contents. A fresh set is
//! built for every serialization pass and dropped with it.

use rustc_hash::FxHashSet;
use safelog_core::{CyclePolicy, Identity};

/// Identities already traversed in the current pass
#[derive(Debug)]
pub struct VisitedSet {
    seen: FxHashSet<Identity>,
    policy: CyclePolicy,
}

impl VisitedSet {
    /// Create an empty set
    pub fn new(policy: CyclePolicy) -> Self {
        Self {
            seen: FxHashSet::default(),
            policy,
        }
    }

    /// Record `id`. Returns false if it was already present, meaning the
    /// caller must emit the circular sentinel instead of recursing.
    pub fn enter(&mut self, id: Identity) -> bool {
        self.seen.insert(id)
    }

    /// Called once the subtree under `id` is finished.
    ///
    /// Under [`CyclePolicy::AnyRepeat`] the identity stays recorded for the
    /// rest of the pass.
    pub fn leave(&mut self, id: Identity) {
        if self.policy == CyclePolicy::Ancestors {
            self.seen.remove(&id);
        }
    }

    /// True if `id` is currently recorded
    pub fn contains(&self, id: Identity) -> bool {
        self.seen.contains(&id)
    }

    /// Number of recorded identities
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// True if nothing is recorded
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
