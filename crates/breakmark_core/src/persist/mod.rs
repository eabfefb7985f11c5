//! Persisted breakpoint file access.
//!
//! # Responsibility
//! - Decode/encode the breakpoint list to and from its line-oriented format.
//! - Read the persisted file and replace it atomically on write.
//!
//! # Invariants
//! - A write either fully replaces the file or leaves the previous file intact.
//! - One malformed line never aborts decoding of the others.

use crate::model::breakpoint::RecordValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod codec;
mod file;

pub use codec::{decode, encode, DecodeOutcome, MalformedRecord};
pub use file::{read_store_file, write_store_file_atomically};

pub type PersistResult<T> = Result<T, PersistError>;

/// Storage failure while reading or replacing the persisted file.
#[derive(Debug)]
pub enum PersistError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    Encode(serde_json::Error),
    Validation(RecordValidationError),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read breakpoint store `{}`: {source}", path.display())
            }
            Self::Write { path, source } => {
                write!(f, "failed to write breakpoint store `{}`: {source}", path.display())
            }
            Self::Encode(err) => write!(f, "failed to encode breakpoint records: {err}"),
            Self::Validation(err) => write!(f, "refusing to persist invalid breakpoint: {err}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Write { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

impl From<RecordValidationError> for PersistError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
    }
}
