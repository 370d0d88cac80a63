//! Bid record ingestion for the bidwit analytics pipeline.
//!
//! This crate handles:
//! - Parsing the flat `timestamp,ad_id,bid_price,ctr,win_status` line format
//! - Per-line failure isolation for batch imports
//! - Import summary reporting

pub mod parser;
pub mod report;

pub use parser::{LineParser, ParsedBatch};
pub use report::{ImportReport, ImportSummary, LineFailure};
