//! Shared, atomically replaceable shard-map snapshots.
//!
//! The index itself performs no synchronization, so a map that concurrent
//! readers consult must never be mutated in place. [`ShardMapCell`] is the
//! copy-on-write holder that enforces that discipline: writers decode a
//! fresh [`ShardIndex`] and swap it in whole, readers clone out an `Arc`
//! and keep querying their snapshot for as long as they hold it.

use std::sync::{Arc, RwLock};

use crate::index::ShardIndex;

/// Holder for the current shard map of one logical container.
///
/// `None` inside means the container is not sharded. Snapshots handed out
/// by [`load`] stay valid across any number of [`install`] or [`clear`]
/// calls; they simply go stale.
///
/// [`load`]: ShardMapCell::load
/// [`install`]: ShardMapCell::install
/// [`clear`]: ShardMapCell::clear
#[derive(Debug, Default)]
pub struct ShardMapCell {
    current: RwLock<Option<Arc<ShardIndex>>>,
}

impl ShardMapCell {
    /// Create a cell for a container that is not sharded yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current snapshot, or `None` when the container is not sharded.
    pub fn load(&self) -> Option<Arc<ShardIndex>> {
        // The guarded value is only ever a whole-Arc swap, so a poisoned
        // lock still holds a fully-formed snapshot; recover it.
        let guard = self
            .current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.clone()
    }

    /// Replace the snapshot with a freshly built index.
    ///
    /// Readers holding the previous snapshot are unaffected. Returns the
    /// installed snapshot.
    pub fn install(&self, index: ShardIndex) -> Arc<ShardIndex> {
        let snapshot = Arc::new(index);
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(Arc::clone(&snapshot));
        tracing::debug!(shards = snapshot.len(), "installed new shard map");
        snapshot
    }

    /// Drop the snapshot: the container is no longer sharded.
    pub fn clear(&self) {
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if guard.take().is_some() {
            tracing::debug!("cleared shard map");
        }
    }

    /// Returns `true` when a shard map is currently installed.
    pub fn is_sharded(&self) -> bool {
        self.load().is_some()
    }
}
