//! Flat-file bid record parsing.
//!
//! Converts comma-separated bid log lines into validated [`BidRecord`]s.
//! Failures are isolated per line so one malformed row never aborts a batch.

use bidwit_core::{
    BidRecord, ParseError, ParserConfig, PriceUnit, RecordField, TimestampFormat, TimestampMs,
};
use chrono::{DateTime, NaiveDate};
use tracing::debug;

use crate::report::{ImportSummary, LineFailure};

const FIELD_COUNT: usize = 5;

/// Outcome of parsing a batch of lines.
#[derive(Debug, Clone, Default)]
pub struct ParsedBatch {
    /// Accepted records, in input order.
    pub records: Vec<BidRecord>,
    /// Per-line failures with 1-based line numbers.
    pub failures: Vec<LineFailure>,
}

impl ParsedBatch {
    /// Row counts in the shape surfaced to import callers.
    ///
    /// Blank lines are skipped before counting, so `total_rows` is the
    /// number of non-blank lines and `processed_rows` always equals it.
    pub fn summary(&self) -> ImportSummary {
        let total = self.records.len() + self.failures.len();
        ImportSummary {
            total_rows: total,
            processed_rows: total,
            successful_rows: self.records.len(),
            failed_rows: self.failures.len(),
        }
    }
}

/// Parser for the `timestamp,ad_id,bid_price,ctr,win_status` line format.
///
/// Fields are strictly comma-separated with no quoting or escaping; the
/// timestamp encoding and price unit come from the configuration and are
/// never guessed from the data.
pub struct LineParser {
    config: ParserConfig,
}

impl LineParser {
    /// Create a parser with the given format configuration.
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// The configured input format.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a single line.
    ///
    /// Returns `Ok(None)` for blank or whitespace-only lines, which are
    /// skipped rather than counted as failures.
    pub fn parse_line(&self, line: &str) -> Result<Option<BidRecord>, ParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != FIELD_COUNT {
            return Err(ParseError::MalformedRow {
                found: fields.len(),
            });
        }

        let ts_ms = self.parse_timestamp(fields[0])?;

        let ad_id = fields[1];
        if ad_id.is_empty() {
            return Err(ParseError::EmptyField {
                field: RecordField::AdId,
            });
        }

        let raw_price = parse_non_negative(fields[2], RecordField::BidPrice)?;
        let ctr = parse_non_negative(fields[3], RecordField::Ctr)?;
        // The win flag may legitimately be zero or negative (lost bid).
        let win_status = parse_finite(fields[4], RecordField::WinStatus)?;

        // Unit conversion happens exactly once, here.
        let bid_price = match self.config.price_unit {
            PriceUnit::Cents => raw_price / 100.0,
            PriceUnit::CurrencyUnits => raw_price,
        };

        Ok(Some(BidRecord {
            ts_ms,
            ad_id: ad_id.to_string(),
            bid_price,
            ctr,
            win_status,
            exec_time_ms: 0.0,
        }))
    }

    /// Parse a batch of lines, isolating per-line failures.
    pub fn parse_lines<'a, I>(&self, lines: I) -> ParsedBatch
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut batch = ParsedBatch::default();
        for (idx, line) in lines.into_iter().enumerate() {
            match self.parse_line(line) {
                Ok(Some(record)) => batch.records.push(record),
                Ok(None) => {}
                Err(error) => {
                    let line_no = idx + 1;
                    debug!(line = line_no, %error, "rejected bid record line");
                    batch.failures.push(LineFailure {
                        line: line_no,
                        error,
                    });
                }
            }
        }
        batch
    }

    /// Parse raw file text, splitting on newlines.
    pub fn parse_text(&self, text: &str) -> ParsedBatch {
        self.parse_lines(text.lines())
    }

    fn parse_timestamp(&self, value: &str) -> Result<TimestampMs, ParseError> {
        let parsed = match self.config.timestamp_format {
            TimestampFormat::Compact17 => parse_compact17(value),
            TimestampFormat::Iso8601 => DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.timestamp_millis()),
        };
        parsed.ok_or_else(|| ParseError::InvalidTimestamp {
            value: value.to_string(),
        })
    }
}

/// Decode a 17-digit `YYYYMMDDHHmmssSSS` timestamp to epoch milliseconds.
///
/// The digits must form a real calendar instant; `20131301...` is rejected
/// even though it is shape-valid.
fn parse_compact17(value: &str) -> Option<TimestampMs> {
    if value.len() != 17 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = value[0..4].parse().ok()?;
    let month: u32 = value[4..6].parse().ok()?;
    let day: u32 = value[6..8].parse().ok()?;
    let hour: u32 = value[8..10].parse().ok()?;
    let minute: u32 = value[10..12].parse().ok()?;
    let second: u32 = value[12..14].parse().ok()?;
    let milli: u32 = value[14..17].parse().ok()?;

    let dt = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_milli_opt(
        hour, minute, second, milli,
    )?;
    Some(dt.and_utc().timestamp_millis())
}

fn parse_finite(value: &str, field: RecordField) -> Result<f64, ParseError> {
    let parsed: f64 = value.parse().map_err(|_| ParseError::InvalidNumericField {
        field,
        value: value.to_string(),
    })?;
    // str::parse accepts "NaN" and "inf"; neither is valid bid data, and a
    // NaN must never be smuggled through as a zero.
    if !parsed.is_finite() {
        return Err(ParseError::InvalidNumericField {
            field,
            value: value.to_string(),
        });
    }
    Ok(parsed)
}

fn parse_non_negative(value: &str, field: RecordField) -> Result<f64, ParseError> {
    let parsed = parse_finite(value, field)?;
    if parsed < 0.0 {
        return Err(ParseError::NegativeValue {
            field,
            value: parsed,
        });
    }
    Ok(parsed)
}
