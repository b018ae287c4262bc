//! Change classification: compare two entry tables and classify each logical
//! class as added, deleted, or modified.
//!
//! The left table is the comparison side, the right table the current side.
//! A class present on both sides with identical checksum multisets is
//! unchanged and omitted from the result; absence of a key *is* the
//! unchanged signal.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use jarview_types::ClassName;

use crate::aggregate::EntryTable;

/// How one logical class differs between the two sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// Present only on the current (right) side.
    Added,
    /// Present only on the comparison (left) side.
    Deleted,
    /// Present on both sides with differing checksum multisets.
    Modified,
}

/// The per-class classification resulting from comparing two sides.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    changes: BTreeMap<ClassName, ChangeKind>,
}

impl ChangeSet {
    /// Create an empty change set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no class changed between the sides.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of changed classes.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// The classification for one class, or `None` if it is unchanged.
    pub fn get(&self, name: &ClassName) -> Option<ChangeKind> {
        self.changes.get(name).copied()
    }

    /// Iterate all (class, classification) pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&ClassName, ChangeKind)> {
        self.changes.iter().map(|(name, kind)| (name, *kind))
    }
}

/// Compare two entry tables and produce a [`ChangeSet`].
///
/// Walks the union of both key sets. Multiset comparison is plain positional
/// equality, relying on the aggregator's sortedness invariant. Total and
/// order-independent; comparing a table against itself yields an empty set.
pub fn classify_changes(left: &EntryTable, right: &EntryTable) -> ChangeSet {
    let mut changes = BTreeMap::new();

    // Walk the comparison side for deletions and modifications.
    for (name, left_crcs) in left {
        match right.get(name) {
            Some(right_crcs) => {
                if left_crcs != right_crcs {
                    changes.insert(name.clone(), ChangeKind::Modified);
                }
            }
            None => {
                changes.insert(name.clone(), ChangeKind::Deleted);
            }
        }
    }

    // Walk the current side for additions.
    for name in right.keys() {
        if !left.contains_key(name) {
            changes.insert(name.clone(), ChangeKind::Added);
        }
    }

    ChangeSet { changes }
}
