//! Visual breakpoint markers in open editor buffers.
//!
//! # Responsibility
//! - Define the host seam through which markers are queried and placed.
//! - Project the breakpoint store onto open buffers and reconcile the host.
//!
//! # Invariants
//! - Only markers in this crate's own group are ever cleared.
//! - Reconciliation is a full clear-then-place pass, never an incremental
//!   patch, so repeated refreshes cannot drift.

pub mod projector;

pub use projector::{diff, project, refresh, MarkerDiff, MarkerSet, RefreshReport};

use crate::model::breakpoint::BreakpointKey;

/// Host-assigned buffer handle.
pub type BufferId = u64;

pub const DEFAULT_MARKER_GROUP: &str = "breakmark";
pub const DEFAULT_SIGN_NAME: &str = "BreakmarkBreakpoint";
pub const DEFAULT_MARKER_PRIORITY: i32 = 10;

/// Buffer currently open in the host, identified by its resolved path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenBuffer {
    pub id: BufferId,
    pub path: String,
}

impl OpenBuffer {
    pub fn new(id: BufferId, path: impl Into<String>) -> Self {
        Self {
            id,
            path: path.into(),
        }
    }
}

/// Group, sign and priority used for every placed marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerStyle {
    pub group: String,
    pub sign_name: String,
    pub priority: i32,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            group: DEFAULT_MARKER_GROUP.to_string(),
            sign_name: DEFAULT_SIGN_NAME.to_string(),
            priority: DEFAULT_MARKER_PRIORITY,
        }
    }
}

/// Desired marker for one breakpoint in one buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub key: BreakpointKey,
    pub line: u32,
    pub conditional: bool,
}

/// Marker as reported by the host for a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlacedMarker {
    pub buffer: BufferId,
    pub line: u32,
}

/// Editor capabilities needed to render breakpoint markers.
pub trait MarkerHost {
    /// Buffers currently open, with resolved absolute paths.
    fn open_buffers(&self) -> Vec<OpenBuffer>;
    /// Markers currently placed under `group`.
    fn placed_markers(&self, group: &str) -> Vec<PlacedMarker>;
    /// Removes every marker of `group` from every buffer.
    fn clear_markers(&mut self, group: &str);
    fn place_marker(&mut self, buffer: BufferId, style: &MarkerStyle, marker: &Marker);
}
