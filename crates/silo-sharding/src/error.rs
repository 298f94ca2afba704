//! Error types for the sharding crate.

use thiserror::Error;

/// Reason a single shard descriptor failed to decode from its JSON object.
///
/// All four wire fields (`index`, `lower`, `upper`, `cid`) are mandatory;
/// a `null` value counts as the wrong type, not as absence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// The JSON value is not an object.
    #[error("failed to decode shard container info: expected a JSON object")]
    NotAnObject,

    /// A required field is absent.
    #[error("failed to decode shard container info: missing required field `{0}`")]
    MissingField(&'static str),

    /// A field holds a value of the wrong JSON type.
    #[error("failed to decode shard container info: field `{field}` must be {expected}")]
    WrongType {
        /// Name of the offending wire field.
        field: &'static str,
        /// Description of the accepted JSON type.
        expected: &'static str,
    },
}

/// Failure to decode a shard map from its JSON wire form.
///
/// Decoding is atomic: any failure means no [`ShardIndex`] was
/// constructed and nothing is left for the caller to release.
///
/// [`ShardIndex`]: crate::ShardIndex
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input text is not valid JSON.
    #[error("failed to decode shards container info: parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// The top-level JSON value is not an array.
    #[error("failed to decode shards container info: expected a JSON array")]
    NotAnArray,

    /// An array element failed to decode as a shard descriptor.
    #[error("failed to decode shards container info: shard {position}: {source}")]
    Descriptor {
        /// Position of the offending element in the wire array.
        position: usize,
        /// What went wrong with that element.
        #[source]
        source: DescriptorError,
    },
}

/// Ways a shard map can fail to form a contiguous partition of the key
/// space, as reported by [`ShardIndex::validate`].
///
/// [`ShardIndex::validate`]: crate::ShardIndex::validate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PartitionError {
    /// The first shard does not open the key space (its lower bound is set).
    #[error("first shard (index {index}) has lower bound {lower:?}, expected unbounded")]
    LowerNotOpen {
        /// Ordinal of the first shard.
        index: u32,
        /// Its offending lower bound.
        lower: String,
    },

    /// The last shard does not close the key space (its upper bound is set).
    #[error("last shard (index {index}) has upper bound {upper:?}, expected unbounded")]
    UpperNotOpen {
        /// Ordinal of the last shard.
        index: u32,
        /// Its offending upper bound.
        upper: String,
    },

    /// A shard other than the last has an unbounded upper range.
    #[error("shard {index} has an unbounded upper range but is not the last shard")]
    UnboundedInterior {
        /// Ordinal of the offending shard.
        index: u32,
    },

    /// Adjacent shards do not share a boundary.
    #[error(
        "shard {index} has lower bound {lower:?} but the previous shard's upper bound is {previous_upper:?}"
    )]
    BoundaryMismatch {
        /// Ordinal of the shard whose lower bound disagrees.
        index: u32,
        /// Its lower bound.
        lower: String,
        /// The preceding shard's upper bound.
        previous_upper: String,
    },
}
