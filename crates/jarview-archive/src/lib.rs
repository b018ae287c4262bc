//! Archive snapshots for jarview.
//!
//! A snapshot is the decoded view of one published archive version: an
//! immutable table of (path, checksum) entries. Producing snapshots —
//! downloading, caching, and unzipping the archive — is the job of a
//! [`SnapshotProvider`] implementation; turning class bytes back into source
//! text is the job of a [`Decompiler`]. Both are trait seams so the diff
//! core never depends on network or decoder details.
//!
//! # Key Types
//!
//! - [`ArchiveSnapshot`] / [`ArchiveEntry`] — Immutable decoded archive contents
//! - [`SnapshotProvider`] — Async source of snapshots, keyed by version
//! - [`Decompiler`] — Async class-to-source transformer
//! - [`InMemorySnapshotProvider`] — HashMap-backed provider for tests and embedding

pub mod decompile;
pub mod error;
pub mod provider;
pub mod snapshot;

pub use decompile::{DecompiledSource, Decompiler};
pub use error::{ArchiveError, ArchiveResult};
pub use provider::{InMemorySnapshotProvider, SnapshotProvider};
pub use snapshot::{ArchiveEntry, ArchiveSnapshot};
