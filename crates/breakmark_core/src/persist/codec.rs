//! Line codec for the persisted breakpoint list.
//!
//! # Responsibility
//! - Decode JSON Lines records (and legacy pdb `break` commands) into records.
//! - Encode records as JSON Lines, one record per line.
//!
//! # Invariants
//! - Decoding is total: malformed lines are reported and skipped.
//! - Encoding writes exactly the given records in the given order.

use crate::model::breakpoint::{normalize_condition, BreakpointRecord};
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{Display, Formatter};

// `b FILE:LINE[, COND]`, `break ...` and `tbreak ...` as written by pdb front ends.
static PDB_BREAK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<cmd>b|break|tbreak)\s+(?P<file>[^,]+?):(?P<line>\d+)\s*(?:,\s*(?P<cond>.*))?$")
        .expect("valid pdb break regex")
});

/// One skipped line in the persisted file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRecord {
    /// 1-based line number in the persisted file.
    pub line_number: usize,
    pub reason: String,
}

impl Display for MalformedRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line_number, self.reason)
    }
}

/// Decode result: parsed records in file order plus skipped lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeOutcome {
    pub records: Vec<BreakpointRecord>,
    pub skipped: Vec<MalformedRecord>,
}

/// Decodes persisted text into records.
///
/// Blank lines and `#` comments are ignored. Every other line must be a JSON
/// record or a pdb break command; anything else lands in `skipped` and is
/// logged at `warn`.
pub fn decode(text: &str) -> DecodeOutcome {
    let mut outcome = DecodeOutcome::default();

    for (index, raw) in text.lines().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let parsed = if trimmed.starts_with('{') {
            decode_json_line(trimmed)
        } else {
            decode_pdb_line(trimmed)
        };

        match parsed.and_then(|record| {
            record
                .validate()
                .map(|()| record)
                .map_err(|err| err.to_string())
        }) {
            Ok(record) => outcome.records.push(record),
            Err(reason) => {
                let malformed = MalformedRecord {
                    line_number: index + 1,
                    reason,
                };
                warn!(
                    "event=record_skipped module=persist status=warn line_number={} reason={}",
                    malformed.line_number, malformed.reason
                );
                outcome.skipped.push(malformed);
            }
        }
    }

    outcome
}

/// Encodes records as JSON Lines with a trailing newline per record.
///
/// Legacy pdb lines accepted by [`decode`] are never written back: the first
/// save after loading a pdb-format file migrates it to JSON Lines for good.
/// Tools that only read `break FILE:LINE` lines cannot read the result.
pub fn encode(records: &[BreakpointRecord]) -> Result<String, serde_json::Error> {
    let mut out = String::new();
    for record in records {
        out.push_str(&serde_json::to_string(record)?);
        out.push('\n');
    }
    Ok(out)
}

fn decode_json_line(line: &str) -> Result<BreakpointRecord, String> {
    let mut record = serde_json::from_str::<BreakpointRecord>(line)
        .map_err(|err| format!("invalid record json: {err}"))?;
    record.condition = normalize_condition(record.condition.take());
    record.function_name = record
        .function_name
        .take()
        .filter(|value| !value.trim().is_empty());
    Ok(record)
}

fn decode_pdb_line(line: &str) -> Result<BreakpointRecord, String> {
    let caps = PDB_BREAK_RE
        .captures(line)
        .ok_or_else(|| format!("unrecognized entry `{line}`"))?;

    let file = caps
        .name("file")
        .map(|m| m.as_str().trim())
        .unwrap_or_default();
    let line_text = caps.name("line").map(|m| m.as_str()).unwrap_or_default();
    let line_no = line_text
        .parse::<u32>()
        .map_err(|_| format!("invalid line number `{line_text}`"))?;
    let condition = caps.name("cond").map(|m| m.as_str().trim().to_string());
    let temporary = caps.name("cmd").is_some_and(|m| m.as_str() == "tbreak");

    let mut record = BreakpointRecord::new(file, line_no).with_condition(condition);
    record.temporary = temporary;
    Ok(record)
}
