//! Foundation types for the Silo metadata tier.
//!
//! This crate provides the identifiers and content-path facilities shared
//! by the metadata crates. It has no I/O and no platform dependencies.
//!
//! # Key Types
//!
//! - [`ContainerId`] -- Opaque identifier of a physical container
//! - [`CONTENT_PATH_MAX`] -- The platform's maximum content-path length
//! - [`cmp_bounded`] -- Length-bounded lexicographic path comparison

pub mod container;
pub mod path;

pub use container::ContainerId;
pub use path::{cmp_bounded, CONTENT_PATH_MAX};
