//! Read-only breakpoint listings for display and jump lists.
//!
//! # Responsibility
//! - Format the store as `file:line[:condition]` entries.
//! - Build `file:line:text` location entries for quickfix/location lists.
//!
//! # Invariants
//! - Output is ordered by file, then line.
//! - A missing buffer or out-of-range line is data (a sentinel), never an error.

mod line_cache;

pub use line_cache::{BufferText, LineCache, LineSource};

use crate::store::BreakpointStore;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Location text for a blank source line.
pub const BLANK_LINE_TEXT: &str = "<blank line>";
/// Location text when the file is not open or the line does not exist.
pub const BUFFER_NOT_LOADED_TEXT: &str = "<buffer not loaded>";

/// Human-readable breakpoint entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListEntry {
    pub file: String,
    pub line: u32,
    pub condition: Option<String>,
}

impl Display for ListEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.condition {
            Some(condition) => write!(f, "{}:{}:{}", self.file, self.line, condition),
            None => write!(f, "{}:{}", self.file, self.line),
        }
    }
}

/// Jump-list entry with the source text shown next to the location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationEntry {
    pub file: String,
    pub line: u32,
    pub text: String,
}

impl Display for LocationEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.text)
    }
}

/// Lists every breakpoint in file/line order.
pub fn list(store: &BreakpointStore) -> Vec<ListEntry> {
    store
        .sorted()
        .into_iter()
        .map(|record| ListEntry {
            file: record.file.clone(),
            line: record.line,
            condition: record.active_condition().map(str::to_string),
        })
        .collect()
}

/// Builds jump-list entries, reading line text through `lines`.
pub fn populate_locations<S: LineSource + ?Sized>(
    store: &BreakpointStore,
    lines: &mut S,
) -> Vec<LocationEntry> {
    store
        .sorted()
        .into_iter()
        .map(|record| {
            let text = match lines.line_text(&record.file, record.line) {
                Some(text) if text.trim().is_empty() => BLANK_LINE_TEXT.to_string(),
                Some(text) => text,
                None => BUFFER_NOT_LOADED_TEXT.to_string(),
            };
            LocationEntry {
                file: record.file.clone(),
                line: record.line,
                text,
            }
        })
        .collect()
}
