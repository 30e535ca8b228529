//! Publication point for the transliteration table.
//!
//! Readers take an `Arc` snapshot and keep using it for as long as they
//! like; a publish swaps the shared pointer and never touches a table a
//! reader already holds.
//!
//! The read path is not lock-free: [`TableHandle::snapshot`] takes a
//! `parking_lot` read lock for the duration of one `Arc` clone. The write
//! lock is held only to replace the `Arc`, never while a table is built,
//! so a reader waits at most for one pointer swap.

use std::sync::Arc;

use log::info;
use parking_lot::RwLock;

use crate::analysis::transliteration::table::TransliterationTable;

/// Shared, atomically replaceable transliteration table.
#[derive(Debug)]
pub struct TableHandle {
    current: RwLock<Arc<TransliterationTable>>,
}

impl TableHandle {
    /// Create a handle serving `table`.
    pub fn new(table: TransliterationTable) -> Self {
        Self {
            current: RwLock::new(Arc::new(table)),
        }
    }

    /// The table currently published.
    ///
    /// Takes the read lock briefly to clone the `Arc`; analysis then runs
    /// on the snapshot without any lock.
    pub fn snapshot(&self) -> Arc<TransliterationTable> {
        self.current.read().clone()
    }

    /// Version of the table currently published.
    pub fn version(&self) -> u64 {
        self.current.read().version()
    }

    /// Publish a new table, returning the previous one.
    ///
    /// The new table is stamped with the previous version plus one, so
    /// versions increase strictly with every publication.
    pub fn publish(&self, table: TransliterationTable) -> Arc<TransliterationTable> {
        let mut guard = self.current.write();
        let version = guard.version() + 1;
        let table = Arc::new(table.with_version(version));
        info!(
            "published transliteration table v{} ({} keys, {} groups)",
            version,
            table.len(),
            table.groups().len()
        );
        std::mem::replace(&mut *guard, table)
    }
}

impl Default for TableHandle {
    fn default() -> Self {
        Self::new(TransliterationTable::empty())
    }
}
