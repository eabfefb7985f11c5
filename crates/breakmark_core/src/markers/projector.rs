//! Marker projection and reconciliation.
//!
//! # Responsibility
//! - Derive the full desired marker set from the store and open buffers.
//! - Report what differs from the host's current markers.
//! - Re-render the own marker group in one full pass.
//!
//! # Invariants
//! - After `refresh`, each open buffer carries exactly one marker per store
//!   record whose `file` equals the buffer path.
//! - Records for files without an open buffer produce no marker.

use super::{BufferId, Marker, MarkerHost, MarkerStyle, OpenBuffer, PlacedMarker};
use crate::store::BreakpointStore;
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

/// Desired markers grouped by buffer, each list ordered by line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerSet {
    by_buffer: BTreeMap<BufferId, Vec<Marker>>,
}

impl MarkerSet {
    pub fn for_buffer(&self, buffer: BufferId) -> &[Marker] {
        self.by_buffer
            .get(&buffer)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Iterates `(buffer, marker)` pairs in buffer then line order.
    pub fn iter(&self) -> impl Iterator<Item = (BufferId, &Marker)> {
        self.by_buffer
            .iter()
            .flat_map(|(buffer, markers)| markers.iter().map(move |marker| (*buffer, marker)))
    }

    pub fn len(&self) -> usize {
        self.by_buffer.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn placements(&self) -> BTreeSet<PlacedMarker> {
        self.iter()
            .map(|(buffer, marker)| PlacedMarker {
                buffer,
                line: marker.line,
            })
            .collect()
    }
}

/// Difference between host markers and the desired projection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerDiff {
    /// Placed but no longer backed by a breakpoint.
    pub stale: Vec<PlacedMarker>,
    /// Backed by a breakpoint but not placed.
    pub missing: Vec<PlacedMarker>,
}

impl MarkerDiff {
    pub fn is_clean(&self) -> bool {
        self.stale.is_empty() && self.missing.is_empty()
    }
}

/// Summary of one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshReport {
    pub buffers: usize,
    pub placed: usize,
    pub diff: MarkerDiff,
}

/// Projects `store` onto `buffers`.
pub fn project(buffers: &[OpenBuffer], store: &BreakpointStore) -> MarkerSet {
    let mut set = MarkerSet::default();
    for buffer in buffers {
        let markers: Vec<Marker> = store
            .records_for_file(buffer.path.as_str())
            .map(|record| Marker {
                key: record.key(),
                line: record.line,
                conditional: record.active_condition().is_some(),
            })
            .collect();
        if !markers.is_empty() {
            set.by_buffer.entry(buffer.id).or_default().extend(markers);
        }
    }
    for markers in set.by_buffer.values_mut() {
        markers.sort_by_key(|marker| marker.line);
    }
    set
}

/// Compares `current` host markers with `desired`.
pub fn diff(current: &[PlacedMarker], desired: &MarkerSet) -> MarkerDiff {
    let current: BTreeSet<PlacedMarker> = current.iter().copied().collect();
    let desired = desired.placements();
    MarkerDiff {
        stale: current.difference(&desired).copied().collect(),
        missing: desired.difference(&current).copied().collect(),
    }
}

/// Clears the own marker group and places every projected marker.
pub fn refresh<H: MarkerHost + ?Sized>(
    host: &mut H,
    store: &BreakpointStore,
    style: &MarkerStyle,
) -> RefreshReport {
    let buffers = host.open_buffers();
    let desired = project(&buffers, store);
    let diff = diff(&host.placed_markers(&style.group), &desired);

    host.clear_markers(&style.group);
    for (buffer, marker) in desired.iter() {
        host.place_marker(buffer, style, marker);
    }

    debug!(
        "event=markers_refresh module=markers status=ok buffers={} placed={} stale={} missing={}",
        buffers.len(),
        desired.len(),
        diff.stale.len(),
        diff.missing.len()
    );

    RefreshReport {
        buffers: buffers.len(),
        placed: desired.len(),
        diff,
    }
}
