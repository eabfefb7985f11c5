//! Breakpoint use-case service.
//!
//! # Responsibility
//! - Run every user operation as load -> transform -> save over a repository.
//! - Expose listing, location export and marker refresh entry points.
//!
//! # Invariants
//! - No records are retained between calls; each call reloads from storage.
//! - A mutating call performs at most one `save` of the full record set.
//! - Markers are only refreshed through `refresh`, never after a failed save.

use crate::listing::{self, LineSource, ListEntry, LocationEntry};
use crate::markers::{self, MarkerHost, MarkerStyle, RefreshReport};
use crate::model::breakpoint::{BreakpointKey, BreakpointRecord, RecordValidationError};
use crate::persist::PersistError;
use crate::repo::breakpoint_repo::BreakpointRepository;
use crate::service::edit_ops::{self, EditOutcome, ToggleOutcome};
use crate::store::BreakpointStore;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for breakpoint use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Caller supplied an invalid `(file, line)` location.
    InvalidLocation(RecordValidationError),
    /// Persisted store could not be read or replaced.
    Persist(PersistError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLocation(err) => write!(f, "invalid breakpoint location: {err}"),
            Self::Persist(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidLocation(err) => Some(err),
            Self::Persist(err) => Some(err),
        }
    }
}

impl From<PersistError> for ServiceError {
    fn from(value: PersistError) -> Self {
        Self::Persist(value)
    }
}

/// Breakpoint service facade over a repository implementation.
pub struct BreakpointService<R: BreakpointRepository> {
    repo: R,
    style: MarkerStyle,
}

impl<R: BreakpointRepository> BreakpointService<R> {
    /// Creates a service with the default marker style.
    pub fn new(repo: R) -> Self {
        Self::with_style(repo, MarkerStyle::default())
    }

    pub fn with_style(repo: R, style: MarkerStyle) -> Self {
        Self { repo, style }
    }

    pub fn style(&self) -> &MarkerStyle {
        &self.style
    }

    /// Loads a fresh store from the repository.
    pub fn load_store(&self) -> ServiceResult<BreakpointStore> {
        let records = self.repo.load().inspect_err(|err| {
            error!(
                "event=store_load module=service status=error error_code=load_failed error={}",
                err
            );
        })?;
        Ok(BreakpointStore::build_from(records))
    }

    /// Adds a bare breakpoint at the location, or removes the existing one.
    ///
    /// A removed condition is not restored by a later toggle.
    pub fn toggle(&self, file: &str, line: u32) -> ServiceResult<ToggleOutcome> {
        let key = checked_key(file, line)?;
        let mut store = self.load_store()?;
        let outcome = edit_ops::toggle(&mut store, &key);
        self.commit("toggle", store)?;
        info!(
            "event=breakpoint_toggle module=service status=ok action={}",
            if outcome.is_added() { "added" } else { "removed" }
        );
        Ok(outcome)
    }

    /// Sets the condition at the location, creating the breakpoint if needed.
    ///
    /// An unchanged condition skips the write entirely.
    pub fn edit_condition(
        &self,
        file: &str,
        line: u32,
        condition: &str,
    ) -> ServiceResult<EditOutcome> {
        let key = checked_key(file, line)?;
        let mut store = self.load_store()?;
        let outcome = edit_ops::edit_condition(&mut store, &key, condition);
        if outcome.changed {
            self.commit("edit_condition", store)?;
        }
        info!(
            "event=breakpoint_condition module=service status=ok previous={:?} current={:?} changed={}",
            outcome.previous, outcome.current, outcome.changed
        );
        Ok(outcome)
    }

    /// Removes every breakpoint. Returns how many were removed.
    pub fn clear_all(&self) -> ServiceResult<usize> {
        let mut store = self.load_store()?;
        let cleared = edit_ops::clear_all(&mut store);
        self.commit("clear_all", store)?;
        info!(
            "event=breakpoint_clear module=service status=ok cleared={}",
            cleared
        );
        Ok(cleared)
    }

    /// Returns the record at the location, if any.
    pub fn get(&self, file: &str, line: u32) -> ServiceResult<Option<BreakpointRecord>> {
        let key = checked_key(file, line)?;
        Ok(self.load_store()?.get(&key).cloned())
    }

    /// Lists breakpoints ordered by file, then line.
    pub fn list(&self) -> ServiceResult<Vec<ListEntry>> {
        Ok(listing::list(&self.load_store()?))
    }

    /// Builds quickfix/location-list entries.
    pub fn locations<S: LineSource + ?Sized>(
        &self,
        lines: &mut S,
    ) -> ServiceResult<Vec<LocationEntry>> {
        Ok(listing::populate_locations(&self.load_store()?, lines))
    }

    /// Re-renders all markers from the persisted store.
    ///
    /// When loading fails the host is left untouched.
    pub fn refresh<H: MarkerHost + ?Sized>(&self, host: &mut H) -> ServiceResult<RefreshReport> {
        let store = self.load_store()?;
        Ok(markers::refresh(host, &store, &self.style))
    }

    fn commit(&self, operation: &'static str, store: BreakpointStore) -> ServiceResult<()> {
        let records = store.into_records();
        self.repo.save(&records).map_err(|err| {
            error!(
                "event=store_save module=service status=error operation={} records={} error={}",
                operation,
                records.len(),
                err
            );
            ServiceError::from(err)
        })
    }
}

fn checked_key(file: &str, line: u32) -> ServiceResult<BreakpointKey> {
    BreakpointRecord::new(file, line)
        .validate()
        .map_err(ServiceError::InvalidLocation)?;
    Ok(BreakpointKey::new(file, line))
}
