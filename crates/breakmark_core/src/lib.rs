//! Core breakpoint synchronization for editor integrations.
//! This crate owns the breakpoint invariants; hosts plug in through traits.

pub mod config;
pub mod listing;
pub mod logging;
pub mod markers;
pub mod model;
pub mod persist;
pub mod repo;
pub mod service;
pub mod store;

pub use config::{ConfigError, CoreConfig};
pub use listing::{
    list, populate_locations, BufferText, LineCache, LineSource, ListEntry, LocationEntry,
    BLANK_LINE_TEXT, BUFFER_NOT_LOADED_TEXT,
};
pub use logging::{
    default_log_level, flush_logs, init_logging, logging_status, LogLevel, LoggingError,
};
pub use markers::{
    BufferId, Marker, MarkerDiff, MarkerHost, MarkerSet, MarkerStyle, OpenBuffer, PlacedMarker,
    RefreshReport,
};
pub use model::breakpoint::{
    BreakpointKey, BreakpointRecord, BreakpointState, RecordValidationError,
};
pub use persist::{DecodeOutcome, MalformedRecord, PersistError, PersistResult};
pub use repo::breakpoint_repo::{
    BreakpointRepository, FileBreakpointRepository, MemoryBreakpointRepository,
};
pub use service::breakpoint_service::{BreakpointService, ServiceError, ServiceResult};
pub use service::edit_ops::{EditOutcome, ToggleOutcome};
pub use store::BreakpointStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
