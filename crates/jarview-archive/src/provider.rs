use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use jarview_types::VersionId;

use crate::error::{ArchiveError, ArchiveResult};
use crate::snapshot::ArchiveSnapshot;

/// Source of archive snapshots, keyed by version.
///
/// Implementations own the download, caching, and unzip machinery. The
/// contract the diff core relies on:
/// - `snapshot` is pure given a version: the same version always yields a
///   snapshot with the same entries.
/// - Fetch and decode failures are reported as errors, never as partial
///   snapshots.
/// - Calls may be slow (network, decode); callers cancel by dropping the
///   future.
#[async_trait]
pub trait SnapshotProvider: Send + Sync {
    /// List the versions this provider can produce snapshots for.
    async fn versions(&self) -> ArchiveResult<Vec<VersionId>>;

    /// Fetch and decode the archive for one version.
    async fn snapshot(&self, version: &VersionId) -> ArchiveResult<ArchiveSnapshot>;
}

/// In-memory, HashMap-backed snapshot provider.
///
/// Intended for tests and embedding. Snapshots are registered up front and
/// cloned out on request.
pub struct InMemorySnapshotProvider {
    snapshots: RwLock<HashMap<VersionId, ArchiveSnapshot>>,
}

impl InMemorySnapshotProvider {
    /// Create a provider with no registered versions.
    pub fn new() -> Self {
        Self {
            snapshots: RwLock::new(HashMap::new()),
        }
    }

    /// Register a snapshot under its own version, replacing any previous one.
    pub fn insert(&self, snapshot: ArchiveSnapshot) {
        let mut map = self.snapshots.write().expect("lock poisoned");
        map.insert(snapshot.version().clone(), snapshot);
    }

    /// Number of registered versions.
    pub fn len(&self) -> usize {
        self.snapshots.read().expect("lock poisoned").len()
    }

    /// Returns `true` if no versions are registered.
    pub fn is_empty(&self) -> bool {
        self.snapshots.read().expect("lock poisoned").is_empty()
    }
}

impl Default for InMemorySnapshotProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SnapshotProvider for InMemorySnapshotProvider {
    async fn versions(&self) -> ArchiveResult<Vec<VersionId>> {
        let map = self.snapshots.read().expect("lock poisoned");
        let mut versions: Vec<VersionId> = map.keys().cloned().collect();
        versions.sort();
        Ok(versions)
    }

    async fn snapshot(&self, version: &VersionId) -> ArchiveResult<ArchiveSnapshot> {
        let map = self.snapshots.read().expect("lock poisoned");
        map.get(version)
            .cloned()
            .ok_or_else(|| ArchiveError::VersionNotFound(version.clone()))
    }
}

impl std::fmt::Debug for InMemorySnapshotProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemorySnapshotProvider")
            .field("versions", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::ArchiveEntry;

    fn snap(version: &str) -> ArchiveSnapshot {
        ArchiveSnapshot::new(
            VersionId::new(version),
            vec![ArchiveEntry::new("a/Foo.class", 1)],
        )
    }

    #[tokio::test]
    async fn registered_snapshot_is_returned() {
        let provider = InMemorySnapshotProvider::new();
        provider.insert(snap("1.0"));

        let got = provider.snapshot(&VersionId::new("1.0")).await.unwrap();
        assert_eq!(got.version().as_str(), "1.0");
        assert_eq!(got.len(), 1);
    }

    #[tokio::test]
    async fn unknown_version_is_an_error() {
        let provider = InMemorySnapshotProvider::new();
        let err = provider.snapshot(&VersionId::new("9.9")).await.unwrap_err();
        assert!(matches!(err, ArchiveError::VersionNotFound(_)));
    }

    #[tokio::test]
    async fn versions_are_sorted() {
        let provider = InMemorySnapshotProvider::new();
        provider.insert(snap("1.2"));
        provider.insert(snap("1.0"));
        provider.insert(snap("1.1"));

        let versions = provider.versions().await.unwrap();
        let labels: Vec<&str> = versions.iter().map(|v| v.as_str()).collect();
        assert_eq!(labels, ["1.0", "1.1", "1.2"]);
    }
}
