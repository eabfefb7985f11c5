//! Breakpoint repository contracts and file-backed implementation.
//!
//! # Responsibility
//! - Provide the `load`/`save` contract over the persisted breakpoint list.
//! - Keep codec and file IO details inside the persistence boundary.
//!
//! # Invariants
//! - `save` writes exactly the given records; callers load-modify-save.
//! - `save` validates every record before anything is written.
//! - `load` never fails on malformed entries, only on unreadable storage.

use crate::model::breakpoint::BreakpointRecord;
use crate::persist::{
    decode, encode, read_store_file, write_store_file_atomically, PersistError, PersistResult,
};
use log::{debug, warn};
use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

/// Repository interface over the persisted breakpoint list.
pub trait BreakpointRepository {
    /// Reads and decodes every well-formed record.
    fn load(&self) -> PersistResult<Vec<BreakpointRecord>>;
    /// Replaces the persisted list with exactly `records`.
    fn save(&self, records: &[BreakpointRecord]) -> PersistResult<()>;
}

impl<R: BreakpointRepository + ?Sized> BreakpointRepository for &R {
    fn load(&self) -> PersistResult<Vec<BreakpointRecord>> {
        (**self).load()
    }

    fn save(&self, records: &[BreakpointRecord]) -> PersistResult<()> {
        (**self).save(records)
    }
}

/// Repository backed by one shared file on disk.
#[derive(Debug, Clone)]
pub struct FileBreakpointRepository {
    path: PathBuf,
}

impl FileBreakpointRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BreakpointRepository for FileBreakpointRepository {
    fn load(&self) -> PersistResult<Vec<BreakpointRecord>> {
        let Some(text) = read_store_file(&self.path)? else {
            debug!("event=store_load module=repo status=ok records=0 missing=true");
            return Ok(Vec::new());
        };

        let outcome = decode(&text);
        if !outcome.skipped.is_empty() {
            warn!(
                "event=store_load module=repo status=partial records={} skipped={}",
                outcome.records.len(),
                outcome.skipped.len()
            );
        } else {
            debug!(
                "event=store_load module=repo status=ok records={}",
                outcome.records.len()
            );
        }
        Ok(outcome.records)
    }

    fn save(&self, records: &[BreakpointRecord]) -> PersistResult<()> {
        for record in records {
            record.validate()?;
        }
        let text = encode(records)?;
        write_store_file_atomically(&self.path, &text)
    }
}

/// In-memory repository for hosts without a shared file and for tests.
///
/// `fail_saves(true)` makes every subsequent `save` fail without touching the
/// stored records.
#[derive(Debug, Default)]
pub struct MemoryBreakpointRepository {
    records: RefCell<Vec<BreakpointRecord>>,
    fail_saves: Cell<bool>,
    save_count: Cell<usize>,
}

impl MemoryBreakpointRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<BreakpointRecord>) -> Self {
        Self {
            records: RefCell::new(records),
            ..Self::default()
        }
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.save_count.get()
    }

    pub fn snapshot(&self) -> Vec<BreakpointRecord> {
        self.records.borrow().clone()
    }
}

impl BreakpointRepository for MemoryBreakpointRepository {
    fn load(&self) -> PersistResult<Vec<BreakpointRecord>> {
        Ok(self.records.borrow().clone())
    }

    fn save(&self, records: &[BreakpointRecord]) -> PersistResult<()> {
        for record in records {
            record.validate()?;
        }
        if self.fail_saves.get() {
            return Err(PersistError::Write {
                path: PathBuf::from("<memory>"),
                source: std::io::Error::other("simulated write failure"),
            });
        }
        *self.records.borrow_mut() = records.to_vec();
        self.save_count.set(self.save_count.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{BreakpointRepository, FileBreakpointRepository, MemoryBreakpointRepository};
    use crate::model::breakpoint::BreakpointRecord;
    use crate::persist::PersistError;

    #[test]
    fn file_repo_load_of_missing_file_is_empty() {
        let dir = tempfile::tempdir().expect("temp dir");
        let repo = FileBreakpointRepository::new(dir.path().join("saved-breakpoints"));
        assert!(repo.load().expect("load").is_empty());
    }

    #[test]
    fn file_repo_save_rejects_invalid_records_without_writing() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("saved-breakpoints");
        let repo = FileBreakpointRepository::new(&path);
        repo.save(&[BreakpointRecord::new("/a.py", 1)])
            .expect("valid save");

        let err = repo
            .save(&[BreakpointRecord::new("/a.py", 0)])
            .expect_err("zero line must be rejected");
        assert!(matches!(err, PersistError::Validation(_)));
        assert_eq!(
            repo.load().expect("reload"),
            vec![BreakpointRecord::new("/a.py", 1)]
        );
    }

    #[test]
    fn memory_repo_failed_save_keeps_previous_records() {
        let repo = MemoryBreakpointRepository::with_records(vec![BreakpointRecord::new("/a.py", 1)]);
        repo.fail_saves(true);
        repo.save(&[]).expect_err("save should fail");
        assert_eq!(repo.snapshot().len(), 1);
        assert_eq!(repo.save_count(), 0);
    }
}
