//! Domain model for persisted breakpoints.
//!
//! # Responsibility
//! - Define the breakpoint record and its `(file, line)` identity.
//!
//! # Invariants
//! - No two records in a store share a key.
//! - Records are value objects; edits replace a record under the same key.

pub mod breakpoint;
