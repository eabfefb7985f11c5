//! Pure edit transitions over a loaded breakpoint store.
//!
//! # Responsibility
//! - Decide the next store state for toggle, edit-condition and clear-all.
//!
//! # Invariants
//! - Functions here never touch persistence; the caller saves the result.
//! - Toggle never preserves a condition: removing and re-adding a key yields
//!   a bare unconditional record.
//! - Edit-condition keeps `temporary` and `function_name` of an existing
//!   record.

use crate::model::breakpoint::{
    normalize_condition, BreakpointKey, BreakpointRecord, BreakpointState,
};
use crate::store::BreakpointStore;

/// Result of toggling one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Key was absent; a bare record was created.
    Added(BreakpointRecord),
    /// Key was present; the record was deleted.
    Removed(BreakpointRecord),
}

impl ToggleOutcome {
    pub fn record(&self) -> &BreakpointRecord {
        match self {
            Self::Added(record) | Self::Removed(record) => record,
        }
    }

    pub fn is_added(&self) -> bool {
        matches!(self, Self::Added(_))
    }
}

/// Result of editing one key's condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    pub previous: BreakpointState,
    pub current: BreakpointState,
    /// Record stored under the key after the edit.
    pub record: BreakpointRecord,
    /// `false` when the stored record was already identical.
    pub changed: bool,
}

/// `Absent -> Unconditional`, `Unconditional | Conditional -> Absent`.
pub fn toggle(store: &mut BreakpointStore, key: &BreakpointKey) -> ToggleOutcome {
    match store.remove(key) {
        Some(removed) => ToggleOutcome::Removed(removed),
        None => {
            let record = BreakpointRecord::at(key);
            store.upsert(record.clone());
            ToggleOutcome::Added(record)
        }
    }
}

/// Sets or replaces the condition on `key`, creating the record if needed.
///
/// A blank `condition` leaves the key `Unconditional`.
pub fn edit_condition(
    store: &mut BreakpointStore,
    key: &BreakpointKey,
    condition: &str,
) -> EditOutcome {
    let previous = store.state(key);
    let existing = store.get(key).cloned();
    let condition = normalize_condition(Some(condition.to_string()));

    let record = match &existing {
        Some(current) => BreakpointRecord {
            condition,
            ..current.clone()
        },
        None => BreakpointRecord {
            condition,
            ..BreakpointRecord::at(key)
        },
    };

    let changed = existing.as_ref() != Some(&record);
    if changed {
        store.upsert(record.clone());
    }

    EditOutcome {
        previous,
        current: record.state(),
        record,
        changed,
    }
}

/// Moves every key to `Absent`. Returns how many records were dropped.
pub fn clear_all(store: &mut BreakpointStore) -> usize {
    store.clear()
}
