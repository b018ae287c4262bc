//! Diff engine for jarview.
//!
//! Turns archive snapshots into per-class checksum tables and compares two
//! such tables to classify each logical class as added, deleted, or
//! modified. Both steps are pure, total functions: they never fail and their
//! output is independent of entry enumeration order.
//!
//! # Key Types
//!
//! - [`EntryTable`] — Logical class name → sorted checksum multiset, for one snapshot
//! - [`ChangeKind`] / [`ChangeSet`] — Per-class change classification between two tables

pub mod aggregate;
pub mod classify;

pub use aggregate::{aggregate_entries, EntryTable};
pub use classify::{classify_changes, ChangeKind, ChangeSet};
