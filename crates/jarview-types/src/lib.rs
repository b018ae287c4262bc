//! Foundation types for jarview.
//!
//! This crate provides the value types shared by the archive, diff, and
//! session crates. Every other jarview crate depends on `jarview-types`.
//!
//! # Key Types
//!
//! - [`VersionId`] — Label identifying one published archive version
//! - [`ClassName`] — Logical class name (outer class plus everything nested in it)
//! - [`Checksum`] / [`ChecksumSet`] — Per-entry CRC-32 values and their sorted multiset

pub mod checksum;
pub mod class_name;
pub mod error;
pub mod version;

pub use checksum::{Checksum, ChecksumSet};
pub use class_name::{ClassName, CLASS_SUFFIX, NESTED_SEPARATOR};
pub use error::TypeError;
pub use version::VersionId;
