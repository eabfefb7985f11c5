//! Repository layer over the persisted breakpoint list.
//!
//! # Responsibility
//! - Define the `load`/`save` data access contract used by services.
//! - Isolate codec and file replacement details from edit orchestration.
//!
//! # Invariants
//! - Repositories hold no cached copy of the records between calls.

pub mod breakpoint_repo;
