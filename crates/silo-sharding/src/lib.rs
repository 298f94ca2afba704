//! Container sharding for the Silo metadata tier.
//!
//! A logical container whose key space has grown too large is split
//! across physical shard containers, each owning one contiguous key
//! range. This crate owns the in-memory partition map: decoding it from
//! the JSON wire form used for shard-map distribution, routing content
//! paths to the shard that owns them, and re-encoding the map.
//!
//! The crate is a pure in-memory index plus codec. It performs no I/O,
//! spawns nothing, and never blocks; callers own synchronization, for
//! which [`ShardMapCell`] provides the recommended copy-on-write
//! discipline.
//!
//! # Key Types
//!
//! - [`ShardDescriptor`] -- One shard's key range and target container
//! - [`ShardIndex`] -- The full ordered partition map
//! - [`ShardMapCell`] -- Atomically replaceable shared snapshot
//! - [`DecodeError`] / [`DescriptorError`] -- Wire decode failures
//! - [`PartitionError`] -- Contiguity violations found by validation
//!
//! # Example
//!
//! ```
//! use silo_sharding::{decode, encode};
//!
//! let index = decode(
//!     r#"[{"index":0,"lower":"","upper":"m","cid":"A"},
//!         {"index":1,"lower":"m","upper":"","cid":"B"}]"#,
//! )?;
//!
//! let shard = index.find_shard("apple").unwrap();
//! assert_eq!(shard.target.as_str(), "A");
//! assert_eq!(decode(&encode(&index))?, index);
//! # Ok::<(), silo_sharding::DecodeError>(())
//! ```

pub mod codec;
pub mod descriptor;
pub mod error;
pub mod index;
pub mod snapshot;

pub use codec::{decode, encode};
pub use descriptor::ShardDescriptor;
pub use error::{DecodeError, DescriptorError, PartitionError};
pub use index::ShardIndex;
pub use snapshot::ShardMapCell;
