//! Entry aggregation: collapse a snapshot's class files onto logical class
//! names.
//!
//! Each `.class` entry contributes its checksum to the multiset of its
//! logical class name, so `Foo.class` and `Foo$Inner.class` land under the
//! single key `Foo`. Non-class entries (assets, manifests) are skipped.

use std::collections::BTreeMap;

use jarview_archive::ArchiveSnapshot;
use jarview_types::{ChecksumSet, ClassName};

/// Per-class checksum table for one snapshot.
///
/// Keys are exactly the logical class names derivable from the snapshot's
/// class-file entries. The table is rebuilt in full for every new snapshot,
/// never patched across snapshots.
pub type EntryTable = BTreeMap<ClassName, ChecksumSet>;

/// Build the [`EntryTable`] for a snapshot.
///
/// Checksums are inserted at their ordered position as entries are
/// discovered, so every multiset is sorted ascending without a trailing sort
/// pass. The result is deterministic regardless of the snapshot's entry
/// enumeration order; an empty or class-free snapshot yields an empty table.
pub fn aggregate_entries(snapshot: &ArchiveSnapshot) -> EntryTable {
    let mut table = EntryTable::new();

    for entry in snapshot.entries() {
        let Some(name) = ClassName::from_entry_path(&entry.path) else {
            continue;
        };
        table.entry(name).or_default().insert(entry.checksum);
    }

    table
}
