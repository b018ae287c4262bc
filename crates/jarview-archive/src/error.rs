//! Error types for the archive crate.

use jarview_types::{ClassName, VersionId};

/// Errors produced at the archive boundary.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    /// The requested version is not known to the provider.
    #[error("version not found: {0}")]
    VersionNotFound(VersionId),

    /// The provider failed to fetch or decode the archive for a version.
    #[error("snapshot unavailable for {version}: {reason}")]
    SnapshotUnavailable { version: VersionId, reason: String },

    /// The requested class has no entry in the snapshot.
    #[error("class not found in snapshot: {0}")]
    ClassNotFound(ClassName),

    /// The decompiler failed to produce source text for a class.
    #[error("decompile failed for {class}: {reason}")]
    Decompile { class: ClassName, reason: String },
}

/// Convenience alias for archive results.
pub type ArchiveResult<T> = Result<T, ArchiveError>;
