//! Core use-case services.
//!
//! # Responsibility
//! - Decide breakpoint edits as pure transitions over a loaded store.
//! - Orchestrate repository load/save around those transitions.

pub mod breakpoint_service;
pub mod edit_ops;
