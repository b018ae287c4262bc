//! One comparison side: selected version → snapshot → entry table →
//! decompiled source, as a single spawned pipeline task.
//!
//! The pipeline reacts to two inputs: the side's selected version and the
//! session-wide viewed class. A new version selection supersedes any
//! in-flight fetch or decompile for the previous selection: the serving
//! future is raced against the selection channel and dropped when it loses,
//! so stale results are never delivered downstream.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use jarview_archive::{ArchiveSnapshot, DecompiledSource, Decompiler, SnapshotProvider};
use jarview_diff::{aggregate_entries, EntryTable};
use jarview_types::{ClassName, VersionId};

/// Load state of one side, for UI indicators.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SideStatus {
    /// No version selected yet.
    Idle,
    /// A snapshot fetch for this version is in flight.
    Loading(VersionId),
    /// The entry table for this version is published.
    Ready(VersionId),
    /// The snapshot fetch for this version failed. The side keeps its last
    /// published entry table; recovery comes from a new selection.
    Failed { version: VersionId, reason: String },
}

/// One half of a comparison: the reactive state for a single side.
///
/// Constructed once per side by a
/// [`CompareSession`](crate::CompareSession) and dropped only at session
/// teardown. All outputs are `watch` receivers: subscribers observe the
/// latest value and are notified of replacements.
pub struct DiffSide {
    selection: Arc<watch::Sender<Option<VersionId>>>,
    snapshot_rx: watch::Receiver<Option<Arc<ArchiveSnapshot>>>,
    entries_rx: watch::Receiver<Option<Arc<EntryTable>>>,
    source_rx: watch::Receiver<Option<Arc<DecompiledSource>>>,
    status_rx: watch::Receiver<SideStatus>,
    task: JoinHandle<()>,
}

impl DiffSide {
    /// Spawn the pipeline task for one side.
    ///
    /// `selection` is the side's version input: the comparison side owns a
    /// private sender, while the current side shares the session-wide one.
    /// Must be called from within a tokio runtime.
    pub(crate) fn spawn(
        label: &'static str,
        provider: Arc<dyn SnapshotProvider>,
        decompiler: Arc<dyn Decompiler>,
        selection: Arc<watch::Sender<Option<VersionId>>>,
        viewed_class_rx: watch::Receiver<Option<ClassName>>,
    ) -> Self {
        let (snapshot_tx, snapshot_rx) = watch::channel(None);
        let (entries_tx, entries_rx) = watch::channel(None);
        let (source_tx, source_rx) = watch::channel(None);
        let (status_tx, status_rx) = watch::channel(SideStatus::Idle);

        let selection_rx = selection.subscribe();
        let task = tokio::spawn(run_side(
            label,
            provider,
            decompiler,
            selection_rx,
            viewed_class_rx,
            snapshot_tx,
            entries_tx,
            source_tx,
            status_tx,
        ));
        debug!(side = label, "side pipeline started");

        Self {
            selection,
            snapshot_rx,
            entries_rx,
            source_rx,
            status_rx,
            task,
        }
    }

    /// Select the version this side compares.
    pub fn select_version(&self, version: VersionId) {
        self.selection.send_replace(Some(version));
    }

    /// The currently selected version, if any.
    pub fn selected_version(&self) -> Option<VersionId> {
        self.selection.borrow().clone()
    }

    /// Subscribe to the side's snapshot output.
    pub fn snapshot(&self) -> watch::Receiver<Option<Arc<ArchiveSnapshot>>> {
        self.snapshot_rx.clone()
    }

    /// Subscribe to the side's entry-table output.
    pub fn entries(&self) -> watch::Receiver<Option<Arc<EntryTable>>> {
        self.entries_rx.clone()
    }

    /// Subscribe to the side's decompiled-source output.
    pub fn source(&self) -> watch::Receiver<Option<Arc<DecompiledSource>>> {
        self.source_rx.clone()
    }

    /// Subscribe to the side's load state.
    pub fn status(&self) -> watch::Receiver<SideStatus> {
        self.status_rx.clone()
    }
}

impl Drop for DiffSide {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl std::fmt::Debug for DiffSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiffSide")
            .field("selected_version", &self.selected_version())
            .field("status", &*self.status_rx.borrow())
            .finish()
    }
}

/// Pipeline body: react to version selections until the selection channel
/// closes.
#[allow(clippy::too_many_arguments)]
async fn run_side(
    label: &'static str,
    provider: Arc<dyn SnapshotProvider>,
    decompiler: Arc<dyn Decompiler>,
    mut selection_rx: watch::Receiver<Option<VersionId>>,
    viewed_class_rx: watch::Receiver<Option<ClassName>>,
    snapshot_tx: watch::Sender<Option<Arc<ArchiveSnapshot>>>,
    entries_tx: watch::Sender<Option<Arc<EntryTable>>>,
    source_tx: watch::Sender<Option<Arc<DecompiledSource>>>,
    status_tx: watch::Sender<SideStatus>,
) {
    loop {
        let selected = selection_rx.borrow_and_update().clone();
        if let Some(version) = selected {
            let serve = serve_version(
                label,
                &version,
                provider.as_ref(),
                decompiler.as_ref(),
                viewed_class_rx.clone(),
                &snapshot_tx,
                &entries_tx,
                &source_tx,
                &status_tx,
            );
            tokio::select! {
                // A new selection supersedes all in-flight work for this
                // side: the serving future is dropped, not awaited.
                changed = selection_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    continue;
                }
                _ = serve => {}
            }
        }
        if selection_rx.changed().await.is_err() {
            break;
        }
    }
    debug!(side = label, "side pipeline stopped");
}

/// Serve one selected version: fetch, aggregate, publish, then keep the
/// decompiled source in step with the viewed class. Returns only when the
/// viewed-class channel closes; version switches cancel it from outside.
#[allow(clippy::too_many_arguments)]
async fn serve_version(
    label: &'static str,
    version: &VersionId,
    provider: &dyn SnapshotProvider,
    decompiler: &dyn Decompiler,
    mut viewed_class_rx: watch::Receiver<Option<ClassName>>,
    snapshot_tx: &watch::Sender<Option<Arc<ArchiveSnapshot>>>,
    entries_tx: &watch::Sender<Option<Arc<EntryTable>>>,
    source_tx: &watch::Sender<Option<Arc<DecompiledSource>>>,
    status_tx: &watch::Sender<SideStatus>,
) {
    status_tx.send_replace(SideStatus::Loading(version.clone()));

    let snapshot = match provider.snapshot(version).await {
        Ok(snapshot) => Arc::new(snapshot),
        Err(err) => {
            warn!(side = label, version = %version, error = %err, "snapshot fetch failed");
            status_tx.send_replace(SideStatus::Failed {
                version: version.clone(),
                reason: err.to_string(),
            });
            // The last published entry table stays in place; downstream
            // consumers simply see no fresh value from this side.
            return;
        }
    };

    let table = Arc::new(aggregate_entries(&snapshot));
    debug!(side = label, version = %version, classes = table.len(), "entry table rebuilt");

    snapshot_tx.send_replace(Some(Arc::clone(&snapshot)));
    entries_tx.send_replace(Some(table));
    status_tx.send_replace(SideStatus::Ready(version.clone()));

    // Keep the decompiled source in step with the viewed class. A change
    // arriving mid-decompile is picked up on the next loop turn; the watch
    // slot only ever exposes the latest published result.
    loop {
        let viewed = viewed_class_rx.borrow_and_update().clone();
        if let Some(class_name) = viewed {
            match decompiler.decompile(&snapshot, &class_name).await {
                Ok(source) => {
                    source_tx.send_replace(Some(Arc::new(source)));
                }
                Err(err) => {
                    warn!(side = label, class = %class_name, error = %err, "decompile failed");
                }
            }
        }
        if viewed_class_rx.changed().await.is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tokio::sync::Notify;

    use jarview_archive::{
        ArchiveEntry, ArchiveError, ArchiveResult, InMemorySnapshotProvider,
    };
    use jarview_types::ClassName;

    /// Decompiler fake: echoes the class name, fails for classes with no
    /// entry in the snapshot.
    struct EchoDecompiler;

    #[async_trait]
    impl Decompiler for EchoDecompiler {
        async fn decompile(
            &self,
            snapshot: &ArchiveSnapshot,
            class_name: &ClassName,
        ) -> ArchiveResult<DecompiledSource> {
            let path = format!("{}.class", class_name.as_str());
            if snapshot.entry(&path).is_none() {
                return Err(ArchiveError::ClassNotFound(class_name.clone()));
            }
            Ok(DecompiledSource::new(
                class_name.clone(),
                format!("// source of {class_name}"),
            ))
        }
    }

    /// Provider that blocks one version's fetch on a gate.
    struct GatedProvider {
        inner: InMemorySnapshotProvider,
        gated_version: VersionId,
        gate: Arc<Notify>,
    }

    #[async_trait]
    impl SnapshotProvider for GatedProvider {
        async fn versions(&self) -> ArchiveResult<Vec<VersionId>> {
            self.inner.versions().await
        }

        async fn snapshot(&self, version: &VersionId) -> ArchiveResult<ArchiveSnapshot> {
            if *version == self.gated_version {
                self.gate.notified().await;
            }
            self.inner.snapshot(version).await
        }
    }

    fn provider_with(versions: &[(&str, &[(&str, u32)])]) -> InMemorySnapshotProvider {
        let provider = InMemorySnapshotProvider::new();
        for (version, entries) in versions {
            provider.insert(ArchiveSnapshot::new(
                VersionId::new(*version),
                entries
                    .iter()
                    .map(|(path, crc)| ArchiveEntry::new(*path, *crc))
                    .collect(),
            ));
        }
        provider
    }

    fn spawn_side(
        provider: Arc<dyn SnapshotProvider>,
    ) -> (DiffSide, watch::Sender<Option<ClassName>>) {
        let (selection_tx, _) = watch::channel::<Option<VersionId>>(None);
        let (viewed_tx, viewed_rx) = watch::channel::<Option<ClassName>>(None);
        let side = DiffSide::spawn(
            "test",
            provider,
            Arc::new(EchoDecompiler),
            Arc::new(selection_tx),
            viewed_rx,
        );
        (side, viewed_tx)
    }

    #[tokio::test]
    async fn selection_flows_through_to_entry_table() {
        let provider = provider_with(&[(
            "1.0",
            &[("a/A.class", 1), ("a/A$Inner.class", 2), ("a/B.class", 3)],
        )]);
        let (side, _viewed) = spawn_side(Arc::new(provider));
        let mut entries = side.entries();

        side.select_version(VersionId::new("1.0"));
        entries.changed().await.unwrap();

        let table = entries.borrow().clone().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table[&ClassName::new("a/A")].as_slice(), &[1, 2]);
        assert_eq!(
            *side.status().borrow(),
            SideStatus::Ready(VersionId::new("1.0"))
        );
    }

    #[tokio::test]
    async fn failed_fetch_keeps_last_entry_table() {
        let provider = provider_with(&[("1.0", &[("a/A.class", 1)])]);
        let (side, _viewed) = spawn_side(Arc::new(provider));
        let mut entries = side.entries();

        side.select_version(VersionId::new("1.0"));
        entries.changed().await.unwrap();

        // Unknown version: the fetch fails, the table stays at 1.0's value.
        side.select_version(VersionId::new("9.9"));
        let mut status = side.status();
        status
            .wait_for(|s| matches!(s, SideStatus::Failed { .. }))
            .await
            .unwrap();

        assert!(!entries.has_changed().unwrap());
        let table = entries.borrow().clone().unwrap();
        assert!(table.contains_key(&ClassName::new("a/A")));
    }

    #[tokio::test]
    async fn newer_selection_supersedes_inflight_fetch() {
        let gate = Arc::new(Notify::new());
        let provider = Arc::new(GatedProvider {
            inner: provider_with(&[
                ("slow", &[("a/Old.class", 1)]),
                ("fast", &[("a/New.class", 2)]),
            ]),
            gated_version: VersionId::new("slow"),
            gate: Arc::clone(&gate),
        });
        let (side, _viewed) = spawn_side(provider);
        let mut entries = side.entries();
        let mut status = side.status();

        // Park the first fetch on the gate, then supersede it.
        side.select_version(VersionId::new("slow"));
        status
            .wait_for(|s| *s == SideStatus::Loading(VersionId::new("slow")))
            .await
            .unwrap();
        side.select_version(VersionId::new("fast"));

        entries.changed().await.unwrap();
        let table = entries.borrow().clone().unwrap();
        assert!(table.contains_key(&ClassName::new("a/New")));

        // Releasing the gate must not resurrect the cancelled fetch.
        gate.notify_one();
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
        assert!(!entries.has_changed().unwrap());
        assert_eq!(
            *side.status().borrow(),
            SideStatus::Ready(VersionId::new("fast"))
        );
    }

    #[tokio::test]
    async fn viewed_class_drives_decompiled_source() {
        let provider = provider_with(&[("1.0", &[("a/A.class", 1), ("a/B.class", 2)])]);
        let (side, viewed) = spawn_side(Arc::new(provider));
        let mut entries = side.entries();
        let mut source = side.source();

        side.select_version(VersionId::new("1.0"));
        entries.changed().await.unwrap();

        viewed.send_replace(Some(ClassName::new("a/A")));
        source.changed().await.unwrap();
        assert_eq!(
            source.borrow().clone().unwrap().text,
            "// source of a/A"
        );

        viewed.send_replace(Some(ClassName::new("a/B")));
        source.changed().await.unwrap();
        assert_eq!(
            source.borrow().clone().unwrap().text,
            "// source of a/B"
        );
    }
}
