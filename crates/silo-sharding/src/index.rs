//! The ordered partition map for one logical container.
//!
//! A [`ShardIndex`] holds shard descriptors sorted by their ordinal
//! `index`, but lookups search it by *range*. The dual-comparator search
//! is only correct because, in a well-formed map, ordinal order and range
//! order coincide: each shard's lower bound equals the previous shard's
//! upper bound, so the ranges ascend exactly as the ordinals do. That
//! coincidence is a contract owed by the producer of the shard map, not
//! something the decoder enforces; [`ShardIndex::validate`] checks it on
//! demand.

use std::collections::BTreeMap;

use crate::descriptor::ShardDescriptor;
use crate::error::PartitionError;

/// The full ordered partition map for one logical container.
///
/// Owns its descriptors exclusively. An index is either empty (the
/// container is not sharded) or a complete partition map; there is no
/// incremental insert/remove, only bulk construction. Replace the whole
/// index to pick up a new map, and never mutate one that concurrent
/// readers may be consulting (see [`ShardMapCell`]).
///
/// [`ShardMapCell`]: crate::ShardMapCell
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShardIndex {
    /// Descriptors in ascending `index` order.
    shards: Vec<ShardDescriptor>,
}

impl ShardIndex {
    /// Create an empty index (a container that is not sharded).
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of shards in the map.
    pub fn len(&self) -> usize {
        self.shards.len()
    }

    /// Returns `true` when the container is not sharded.
    pub fn is_empty(&self) -> bool {
        self.shards.is_empty()
    }

    /// Get a descriptor by its ordinal `index`.
    pub fn get(&self, index: u32) -> Option<&ShardDescriptor> {
        self.shards
            .binary_search_by_key(&index, |shard| shard.index)
            .ok()
            .map(|at| &self.shards[at])
    }

    /// Iterate descriptors in ascending `index` order.
    pub fn iter(&self) -> impl Iterator<Item = &ShardDescriptor> {
        self.shards.iter()
    }

    /// Find the shard that owns `path`.
    ///
    /// Binary search with the range comparator ([`ShardDescriptor::locate`])
    /// over the ordinal-sorted descriptors; valid only under the
    /// order-coincidence contract described in the module docs. `None` on
    /// an empty index means "not sharded" and is the normal case; `None`
    /// on a non-empty index means no range owns the path, which cannot
    /// happen in a well-formed map and is logged as corruption evidence.
    pub fn find_shard(&self, path: &str) -> Option<&ShardDescriptor> {
        if self.shards.is_empty() {
            return None;
        }

        match self
            .shards
            .binary_search_by(|shard| shard.locate(path).reverse())
        {
            Ok(at) => Some(&self.shards[at]),
            Err(_) => {
                tracing::warn!(
                    shards = self.shards.len(),
                    "no shard owns the path; shard map does not cover the key space"
                );
                None
            }
        }
    }

    /// Check that the map forms a contiguous partition of the whole key
    /// space: open below, open above, and adjacent bounds meeting exactly.
    ///
    /// Decoding deliberately skips this check to stay cheap on the reload
    /// path; run it when the map comes from a producer you do not trust.
    /// An empty index is valid.
    pub fn validate(&self) -> Result<(), PartitionError> {
        let Some(first) = self.shards.first() else {
            return Ok(());
        };
        if !first.lower.is_empty() {
            return Err(PartitionError::LowerNotOpen {
                index: first.index,
                lower: first.lower.clone(),
            });
        }

        for pair in self.shards.windows(2) {
            let (previous, shard) = (&pair[0], &pair[1]);
            if previous.upper.is_empty() {
                return Err(PartitionError::UnboundedInterior {
                    index: previous.index,
                });
            }
            if shard.lower != previous.upper {
                return Err(PartitionError::BoundaryMismatch {
                    index: shard.index,
                    lower: shard.lower.clone(),
                    previous_upper: previous.upper.clone(),
                });
            }
        }

        if let Some(last) = self.shards.last() {
            if !last.upper.is_empty() {
                return Err(PartitionError::UpperNotOpen {
                    index: last.index,
                    upper: last.upper.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Bulk construction keyed by ordinal `index`.
///
/// Descriptors sharing an `index` silently overwrite: the later one wins,
/// matching the wire decoder's behavior on duplicate entries.
impl FromIterator<ShardDescriptor> for ShardIndex {
    fn from_iter<I: IntoIterator<Item = ShardDescriptor>>(descriptors: I) -> Self {
        let keyed: BTreeMap<u32, ShardDescriptor> = descriptors
            .into_iter()
            .map(|shard| (shard.index, shard))
            .collect();
        Self {
            shards: keyed.into_values().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ShardIndex {
    type Item = &'a ShardDescriptor;
    type IntoIter = std::slice::Iter<'a, ShardDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.shards.iter()
    }
}
