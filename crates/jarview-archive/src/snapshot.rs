use serde::{Deserialize, Serialize};
use tracing::debug;

use jarview_types::{Checksum, VersionId};

/// One file record inside an archive: a path and the CRC-32 of its bytes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveEntry {
    /// Archive-internal path (`net/minecraft/Foo$Bar.class`).
    pub path: String,
    /// CRC-32 of the entry's raw bytes, as recorded in the archive.
    pub checksum: Checksum,
}

impl ArchiveEntry {
    /// Create an entry from a path and a known checksum.
    pub fn new(path: impl Into<String>, checksum: Checksum) -> Self {
        Self {
            path: path.into(),
            checksum,
        }
    }
}

/// Immutable decoded view of one archive version.
///
/// A snapshot is produced once per (side, selected version) by a
/// [`SnapshotProvider`](crate::SnapshotProvider) and never mutated
/// afterwards; downstream consumers share it behind `Arc`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveSnapshot {
    version: VersionId,
    entries: Vec<ArchiveEntry>,
}

impl ArchiveSnapshot {
    /// Create a snapshot from entries whose checksums are already known
    /// (the usual case: zip central directories record per-entry CRC-32).
    pub fn new(version: VersionId, entries: Vec<ArchiveEntry>) -> Self {
        Self { version, entries }
    }

    /// Create a snapshot by checksumming raw file contents.
    ///
    /// Intended for tests and embedding, where no real archive directory is
    /// available to read checksums from.
    pub fn from_files<'a, I>(version: VersionId, files: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [u8])>,
    {
        let entries: Vec<ArchiveEntry> = files
            .into_iter()
            .map(|(path, bytes)| ArchiveEntry::new(path, crc32fast::hash(bytes)))
            .collect();
        debug!(version = %version, entries = entries.len(), "snapshot built from raw files");
        Self { version, entries }
    }

    /// The version this snapshot was decoded from.
    pub fn version(&self) -> &VersionId {
        &self.version
    }

    /// Iterate all (path, checksum) entries.
    pub fn entries(&self) -> impl Iterator<Item = &ArchiveEntry> {
        self.entries.iter()
    }

    /// Look up a single entry by exact path.
    pub fn entry(&self, path: &str) -> Option<&ArchiveEntry> {
        self.entries.iter().find(|e| e.path == path)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the snapshot holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
