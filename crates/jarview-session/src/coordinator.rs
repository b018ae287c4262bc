//! The diff coordinator: joins both sides' entry tables into one change
//! set.
//!
//! Combine-latest semantics over two `watch` channels: nothing is emitted
//! until both sides have published an entry table at least once; afterwards
//! every change on either side triggers one reclassification over the
//! latest pair. Because both inputs are read in the same loop turn, a stale
//! table is never paired with a fresh one.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use jarview_diff::{classify_changes, ChangeSet, EntryTable};

/// Joins the comparison and current sides' entry-table outputs and
/// republishes the classification whenever either changes.
///
/// Built once per session; the change set is recomputed wholesale from the
/// current pair of tables, never patched incrementally.
pub struct DiffCoordinator {
    changes_rx: watch::Receiver<Option<Arc<ChangeSet>>>,
    task: JoinHandle<()>,
}

impl DiffCoordinator {
    /// Spawn the join task over the two sides' entry-table receivers.
    ///
    /// `left` is the comparison side, `right` the current side. Must be
    /// called from within a tokio runtime.
    pub(crate) fn spawn(
        left: watch::Receiver<Option<Arc<EntryTable>>>,
        right: watch::Receiver<Option<Arc<EntryTable>>>,
    ) -> Self {
        let (changes_tx, changes_rx) = watch::channel(None);
        let task = tokio::spawn(run_join(left, right, changes_tx));
        debug!("diff coordinator started");

        Self { changes_rx, task }
    }

    /// Subscribe to the coordinated change-set output.
    ///
    /// The value is `None` until both sides have produced an entry table.
    pub fn changes(&self) -> watch::Receiver<Option<Arc<ChangeSet>>> {
        self.changes_rx.clone()
    }
}

impl Drop for DiffCoordinator {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl std::fmt::Debug for DiffCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let classes = self.changes_rx.borrow().as_ref().map(|c| c.len());
        f.debug_struct("DiffCoordinator")
            .field("changed_classes", &classes)
            .finish()
    }
}

async fn run_join(
    mut left: watch::Receiver<Option<Arc<EntryTable>>>,
    mut right: watch::Receiver<Option<Arc<EntryTable>>>,
    changes_tx: watch::Sender<Option<Arc<ChangeSet>>>,
) {
    loop {
        {
            // Read both slots in one turn so the published pair is always
            // the latest from each side.
            let left_table = left.borrow_and_update().clone();
            let right_table = right.borrow_and_update().clone();
            if let (Some(left_table), Some(right_table)) = (left_table, right_table) {
                let changes = classify_changes(&left_table, &right_table);
                debug!(changed = changes.len(), "change set recomputed");
                changes_tx.send_replace(Some(Arc::new(changes)));
            }
        }

        tokio::select! {
            changed = left.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            changed = right.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
    }
    debug!("diff coordinator stopped");
}
