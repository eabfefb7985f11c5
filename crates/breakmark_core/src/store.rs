//! In-memory keyed breakpoint collection.
//!
//! # Responsibility
//! - Index records by `(file, line)` for lookup and mutation.
//! - Resolve duplicate persisted keys deterministically.
//!
//! # Invariants
//! - At most one record per key.
//! - Duplicate keys in `build_from` input resolve last-writer-wins.
//! - A store is built per operation and discarded afterwards.

use crate::model::breakpoint::{BreakpointKey, BreakpointRecord, BreakpointState};
use log::warn;
use std::collections::BTreeMap;

/// Keyed collection of breakpoint records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreakpointStore {
    records: BTreeMap<BreakpointKey, BreakpointRecord>,
}

impl BreakpointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from decoded records.
    ///
    /// A later record with an already-seen key replaces the earlier one and
    /// the collision is logged.
    pub fn build_from(records: impl IntoIterator<Item = BreakpointRecord>) -> Self {
        let mut store = Self::new();
        for record in records {
            if let Some(previous) = store.upsert(record) {
                warn!(
                    "event=duplicate_key module=store status=warn file={} line={} resolution=last_wins",
                    previous.file, previous.line
                );
            }
        }
        store
    }

    pub fn get(&self, key: &BreakpointKey) -> Option<&BreakpointRecord> {
        self.records.get(key)
    }

    pub fn contains(&self, key: &BreakpointKey) -> bool {
        self.records.contains_key(key)
    }

    /// Returns the condition-derived state of `key`.
    pub fn state(&self, key: &BreakpointKey) -> BreakpointState {
        self.get(key)
            .map_or(BreakpointState::Absent, BreakpointRecord::state)
    }

    /// Inserts or replaces the record under its own key.
    ///
    /// Returns the replaced record, if any.
    pub fn upsert(&mut self, record: BreakpointRecord) -> Option<BreakpointRecord> {
        self.records.insert(record.key(), record)
    }

    /// Removes the record under `key`; absent keys are a no-op.
    pub fn remove(&mut self, key: &BreakpointKey) -> Option<BreakpointRecord> {
        self.records.remove(key)
    }

    /// Removes every record and returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let count = self.records.len();
        self.records.clear();
        count
    }

    /// Iterates records. Order is not part of the contract; use `sorted`.
    pub fn values(&self) -> impl Iterator<Item = &BreakpointRecord> {
        self.records.values()
    }

    /// Records ordered by file, then line.
    pub fn sorted(&self) -> Vec<&BreakpointRecord> {
        let mut records: Vec<_> = self.records.values().collect();
        records.sort_by(|a, b| a.file.cmp(&b.file).then(a.line.cmp(&b.line)));
        records
    }

    /// Records whose `file` equals `path`, ordered by line.
    pub fn records_for_file<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a BreakpointRecord> {
        self.records
            .range(BreakpointKey::new(path, 0)..)
            .take_while(move |(key, _)| key.file == path)
            .map(|(_, record)| record)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consumes the store, returning records ordered by file then line.
    pub fn into_records(self) -> Vec<BreakpointRecord> {
        self.records.into_values().collect()
    }
}
