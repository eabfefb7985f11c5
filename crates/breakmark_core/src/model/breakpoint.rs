//! Breakpoint record model.
//!
//! # Responsibility
//! - Define the canonical breakpoint record shared by codec, store and views.
//! - Provide validation for persisted and user-created records.
//!
//! # Invariants
//! - `(file, line)` is the unique identity of a record.
//! - `line` is 1-based and never `0`.
//! - A blank condition is represented as `None`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Unique identity of a breakpoint.
///
/// Ordering is file first, then line, which is the deterministic listing
/// order used by every view.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BreakpointKey {
    pub file: String,
    pub line: u32,
}

impl BreakpointKey {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl Display for BreakpointKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Condition-derived state of one key, used by edit operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakpointState {
    /// No record exists for the key.
    Absent,
    /// Record exists without a condition.
    Unconditional,
    /// Record exists with a non-blank condition.
    Conditional,
}

/// Validation errors for breakpoint records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    EmptyFile,
    RelativeFile(String),
    ZeroLine { file: String },
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFile => write!(f, "breakpoint file must not be empty"),
            Self::RelativeFile(file) => {
                write!(f, "breakpoint file must be an absolute path, got `{file}`")
            }
            Self::ZeroLine { file } => {
                write!(f, "breakpoint line must be >= 1 (file `{file}`)")
            }
        }
    }
}

impl Error for RecordValidationError {}

/// Persisted breakpoint record.
///
/// `temporary`, `condition` and `function_name` are opaque to this crate and
/// are carried through load/save untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakpointRecord {
    /// Absolute path of the source file.
    pub file: String,
    /// 1-based line number.
    pub line: u32,
    /// Single-shot breakpoint flag.
    #[serde(default)]
    pub temporary: bool,
    /// Optional condition expression, never parsed here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    /// Optional enclosing function name reported by the debugger.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_name: Option<String>,
}

impl BreakpointRecord {
    /// Creates an unconditional, non-temporary record.
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
            temporary: false,
            condition: None,
            function_name: None,
        }
    }

    /// Creates a bare record for an existing key.
    pub fn at(key: &BreakpointKey) -> Self {
        Self::new(key.file.clone(), key.line)
    }

    /// Returns this record with the given condition, normalizing blank input
    /// to `None`.
    pub fn with_condition(mut self, condition: Option<impl Into<String>>) -> Self {
        self.condition = normalize_condition(condition.map(Into::into));
        self
    }

    pub fn key(&self) -> BreakpointKey {
        BreakpointKey::new(self.file.clone(), self.line)
    }

    /// Returns the condition text when one is set and non-blank.
    pub fn active_condition(&self) -> Option<&str> {
        self.condition
            .as_deref()
            .filter(|value| !value.trim().is_empty())
    }

    pub fn state(&self) -> BreakpointState {
        if self.active_condition().is_some() {
            BreakpointState::Conditional
        } else {
            BreakpointState::Unconditional
        }
    }

    /// Validates record shape before it is written or indexed.
    ///
    /// # Errors
    /// - `EmptyFile` when `file` is blank.
    /// - `RelativeFile` when `file` is not an absolute path.
    /// - `ZeroLine` when `line == 0`.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.file.trim().is_empty() {
            return Err(RecordValidationError::EmptyFile);
        }
        if !Path::new(&self.file).is_absolute() {
            return Err(RecordValidationError::RelativeFile(self.file.clone()));
        }
        if self.line == 0 {
            return Err(RecordValidationError::ZeroLine {
                file: self.file.clone(),
            });
        }
        Ok(())
    }
}

/// Maps blank conditions to `None`; non-blank text is kept verbatim.
pub fn normalize_condition(condition: Option<String>) -> Option<String> {
    condition.filter(|value| !value.trim().is_empty())
}
