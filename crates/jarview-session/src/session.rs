//! The comparison session: owns the two sides, the coordinator, and the
//! session-wide inputs.
//!
//! Sides and the coordinator are built lazily, exactly once each, behind
//! `OnceLock` accessors; every consumer shares the same pipelines. The
//! *current* side tracks the session-wide version selection, the
//! *comparison* side owns an independent selection of its own.

use std::sync::{Arc, OnceLock};

use tokio::sync::watch;
use tracing::info;

use jarview_archive::{Decompiler, SnapshotProvider};
use jarview_diff::ChangeSet;
use jarview_types::{ClassName, VersionId};

use crate::config::SessionConfig;
use crate::coordinator::DiffCoordinator;
use crate::side::DiffSide;

/// One user's comparison session.
///
/// A process embeds a single session; its sides live until the session is
/// dropped. All outputs are `watch` receivers carrying immutable `Arc`
/// values.
pub struct CompareSession {
    provider: Arc<dyn SnapshotProvider>,
    decompiler: Arc<dyn Decompiler>,
    /// Session-wide version selection, driving the current side.
    global_selection: Arc<watch::Sender<Option<VersionId>>>,
    /// Independent selection for the comparison side.
    comparison_selection: Arc<watch::Sender<Option<VersionId>>>,
    /// Class currently opened for viewing, shared by both sides.
    viewed_class: watch::Sender<Option<ClassName>>,
    /// Whether the diff UI is shown. State only, no behavior attached.
    diff_view: watch::Sender<bool>,
    comparison: OnceLock<DiffSide>,
    current: OnceLock<DiffSide>,
    coordinator: OnceLock<DiffCoordinator>,
}

impl CompareSession {
    /// Create a session over the given collaborators.
    ///
    /// Nothing is spawned until a side or the coordinator is first
    /// requested.
    pub fn new(
        provider: Arc<dyn SnapshotProvider>,
        decompiler: Arc<dyn Decompiler>,
        config: SessionConfig,
    ) -> Self {
        let (global_selection, _) = watch::channel(config.initial_version);
        let (comparison_selection, _) = watch::channel(None);
        let (viewed_class, _) = watch::channel(config.initial_class);
        let (diff_view, _) = watch::channel(config.diff_view);
        info!("comparison session created");

        Self {
            provider,
            decompiler,
            global_selection: Arc::new(global_selection),
            comparison_selection: Arc::new(comparison_selection),
            viewed_class,
            diff_view,
            comparison: OnceLock::new(),
            current: OnceLock::new(),
            coordinator: OnceLock::new(),
        }
    }

    /// The comparison side (user-selectable version), built on first use.
    ///
    /// Must be called from within a tokio runtime.
    pub fn comparison_side(&self) -> &DiffSide {
        self.comparison.get_or_init(|| {
            DiffSide::spawn(
                "comparison",
                Arc::clone(&self.provider),
                Arc::clone(&self.decompiler),
                Arc::clone(&self.comparison_selection),
                self.viewed_class.subscribe(),
            )
        })
    }

    /// The current side (tracks the session-wide version selection), built
    /// on first use.
    ///
    /// Must be called from within a tokio runtime.
    pub fn current_side(&self) -> &DiffSide {
        self.current.get_or_init(|| {
            DiffSide::spawn(
                "current",
                Arc::clone(&self.provider),
                Arc::clone(&self.decompiler),
                Arc::clone(&self.global_selection),
                self.viewed_class.subscribe(),
            )
        })
    }

    /// The coordinator joining both sides, built on first use.
    pub fn coordinator(&self) -> &DiffCoordinator {
        self.coordinator.get_or_init(|| {
            DiffCoordinator::spawn(
                self.comparison_side().entries(),
                self.current_side().entries(),
            )
        })
    }

    /// Subscribe to the coordinated change-set output.
    pub fn changes(&self) -> watch::Receiver<Option<Arc<ChangeSet>>> {
        self.coordinator().changes()
    }

    /// Select the session-wide version (the current side follows it).
    pub fn select_version(&self, version: VersionId) {
        self.global_selection.send_replace(Some(version));
    }

    /// Open a class for viewing on both sides.
    pub fn view_class(&self, class_name: ClassName) {
        self.viewed_class.send_replace(Some(class_name));
    }

    /// The class currently opened for viewing, if any.
    pub fn viewed_class(&self) -> Option<ClassName> {
        self.viewed_class.borrow().clone()
    }

    /// Show or hide the diff view.
    pub fn set_diff_view(&self, enabled: bool) {
        self.diff_view.send_replace(enabled);
    }

    /// Whether the diff view is currently shown.
    pub fn diff_view_enabled(&self) -> bool {
        *self.diff_view.borrow()
    }

    /// Subscribe to diff-view visibility changes.
    pub fn diff_view(&self) -> watch::Receiver<bool> {
        self.diff_view.subscribe()
    }
}

impl std::fmt::Debug for CompareSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompareSession")
            .field("comparison_built", &self.comparison.get().is_some())
            .field("current_built", &self.current.get().is_some())
            .field("diff_view", &self.diff_view_enabled())
            .finish()
    }
}
