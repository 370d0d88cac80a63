//! Import result reporting.

use bidwit_core::ParseError;
use serde::{Deserialize, Serialize};

/// A rejected input line and the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineFailure {
    /// 1-based line number within the imported input.
    pub line: usize,
    /// Why the line was rejected.
    pub error: ParseError,
}

/// Row counts for a completed import.
///
/// The partial-success contract surfaced to import callers: how many rows
/// arrived, how many parsed, how many were rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    /// Non-blank lines seen.
    pub total_rows: usize,
    /// Lines run through the parser.
    pub processed_rows: usize,
    /// Lines that produced a record.
    pub successful_rows: usize,
    /// Lines rejected with a parse error.
    pub failed_rows: usize,
}

/// Full report of an import operation: counts plus per-line failure reasons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportReport {
    /// Row counts.
    pub summary: ImportSummary,
    /// Every rejected line with its reason, in input order.
    pub failures: Vec<LineFailure>,
}
