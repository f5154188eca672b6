//! Bidirectional in-memory record cache.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use registrar_core::types::{Address, Name, Record};

/// In-memory bidirectional store of name↔record.
///
/// Two indexes point at the same logical record: one keyed by name, one by
/// address. Entries are created by the startup seed import, by successful
/// ledger reads, and by accepted (not yet confirmed) registrations; any
/// later write for the same key overwrites both indexes (last-write-wins).
/// There is no eviction and no TTL — entries may go stale relative to the
/// ledger and are only ever used as a fallback, never preferred over a live
/// ledger answer.
///
/// Concurrent `put`s from different requests race; completion order of the
/// underlying asynchronous calls decides the winner. That race is accepted
/// and documented, not eliminated.
#[derive(Default)]
pub struct NameCache {
    by_name: RwLock<HashMap<Name, Arc<Record>>>,
    by_addr: RwLock<HashMap<Address, Arc<Record>>>,
}

impl NameCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bulk-inserts records at startup from a seed collection.
    pub fn load(&self, records: impl IntoIterator<Item = Record>) {
        for record in records {
            self.put(record);
        }
    }

    /// Looks up a record by name.
    pub fn get_by_name(&self, name: &Name) -> Option<Arc<Record>> {
        self.by_name.read().get(name).cloned()
    }

    /// Looks up a record by address.
    pub fn get_by_addr(&self, addr: &Address) -> Option<Arc<Record>> {
        self.by_addr.read().get(addr).cloned()
    }

    /// Inserts a record, overwriting both indexes.
    pub fn put(&self, record: Record) {
        let record = Arc::new(record);
        self.by_name
            .write()
            .insert(record.name.clone(), record.clone());
        self.by_addr.write().insert(record.addr, record);
    }

    /// Returns the number of cached names.
    pub fn len(&self) -> usize {
        self.by_name.read().len()
    }

    /// Returns true if the cache holds no records.
    pub fn is_empty(&self) -> bool {
        self.by_name.read().is_empty()
    }
}
