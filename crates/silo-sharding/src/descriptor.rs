use std::cmp::Ordering;

use serde::Serialize;
use silo_types::{cmp_bounded, ContainerId};

/// One shard of a logical container: a contiguous key range and the
/// physical container that owns it.
///
/// The range is `(lower, upper]`: the lower bound is exclusive, the upper
/// bound inclusive. An empty bound string means the range is unbounded on
/// that side. Bounds are compared with [`cmp_bounded`], matching the
/// truncation applied when ranges were created.
///
/// Descriptors are immutable after construction and owned exclusively by
/// the [`ShardIndex`] that holds them.
///
/// The `Serialize` derive defines the wire form of one descriptor: the
/// fields `index`, `lower`, `upper`, `cid` in exactly that order, with
/// `target` renamed to `cid`.
///
/// [`ShardIndex`]: crate::ShardIndex
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ShardDescriptor {
    /// Ordinal position of this shard in the partition order.
    pub index: u32,
    /// Exclusive lower bound; empty means unbounded below.
    pub lower: String,
    /// Inclusive upper bound; empty means unbounded above.
    pub upper: String,
    /// The physical container holding keys in `(lower, upper]`.
    #[serde(rename = "cid")]
    pub target: ContainerId,
}

impl ShardDescriptor {
    /// Create a descriptor for the range `(lower, upper]` owned by `target`.
    pub fn new(
        index: u32,
        lower: impl Into<String>,
        upper: impl Into<String>,
        target: impl Into<ContainerId>,
    ) -> Self {
        Self {
            index,
            lower: lower.into(),
            upper: upper.into(),
            target: target.into(),
        }
    }

    /// Three-way placement of `path` relative to this shard's range.
    ///
    /// Returns `Less` when `path` sorts at or before the exclusive lower
    /// bound, `Greater` when it sorts past the inclusive upper bound, and
    /// `Equal` when this shard owns `path`. This is the comparator the
    /// range lookup searches with.
    pub fn locate(&self, path: &str) -> Ordering {
        if !self.lower.is_empty() && cmp_bounded(path, &self.lower) != Ordering::Greater {
            return Ordering::Less;
        }
        if !self.upper.is_empty() && cmp_bounded(path, &self.upper) == Ordering::Greater {
            return Ordering::Greater;
        }
        // lower < path <= upper
        Ordering::Equal
    }

    /// Returns `true` when `path` lies in `(lower, upper]`.
    pub fn contains(&self, path: &str) -> bool {
        self.locate(path) == Ordering::Equal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_bound_is_exclusive() {
        let shard = ShardDescriptor::new(1, "m", "t", "B");
        assert!(!shard.contains("m"));
        assert_eq!(shard.locate("m"), Ordering::Less);
        assert!(shard.contains("mm"));
    }

    #[test]
    fn upper_bound_is_inclusive() {
        let shard = ShardDescriptor::new(0, "", "m", "A");
        assert!(shard.contains("m"));
        assert_eq!(shard.locate("mm"), Ordering::Greater);
    }

    #[test]
    fn empty_lower_is_unbounded() {
        let shard = ShardDescriptor::new(0, "", "m", "A");
        assert!(shard.contains(""));
        assert!(shard.contains("a"));
    }

    #[test]
    fn empty_upper_is_unbounded() {
        let shard = ShardDescriptor::new(1, "m", "", "B");
        assert!(shard.contains("zzzzzz"));
        assert!(shard.contains(&"\u{7f}".repeat(64)));
    }

    #[test]
    fn both_bounds_empty_accepts_everything() {
        let shard = ShardDescriptor::new(0, "", "", "A");
        assert!(shard.contains(""));
        assert!(shard.contains("anything"));
    }

    #[test]
    fn comparison_stops_at_the_path_limit() {
        use silo_types::CONTENT_PATH_MAX;

        // A bound exactly at the limit: keys extending past it compare
        // equal to the bound, so they stay on the inclusive side.
        let bound = "k".repeat(CONTENT_PATH_MAX);
        let shard = ShardDescriptor::new(0, "", bound.clone(), "A");
        let long_key = format!("{bound}zzz");
        assert!(shard.contains(&long_key));
    }
}
