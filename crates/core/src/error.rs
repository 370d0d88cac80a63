//! Error types for the bidwit analytics pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Field of a bid record named by a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    AdId,
    BidPrice,
    Ctr,
    WinStatus,
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordField::AdId => "ad_id",
            RecordField::BidPrice => "bid_price",
            RecordField::Ctr => "ctr",
            RecordField::WinStatus => "win_status",
        };
        f.write_str(name)
    }
}

/// Why a single input line was rejected by the parser.
///
/// Always reported as data alongside the accepted records of a batch; a bad
/// line never aborts the batch it arrived in.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParseError {
    /// Wrong number of comma-separated fields.
    #[error("expected 5 fields, found {found}")]
    MalformedRow { found: usize },

    /// Timestamp does not match the configured format or is not a real
    /// calendar instant.
    #[error("invalid timestamp {value:?}")]
    InvalidTimestamp { value: String },

    /// A required field was empty after trimming.
    #[error("field {field} must not be empty")]
    EmptyField { field: RecordField },

    /// A numeric field did not parse as a finite number.
    #[error("field {field} is not a number: {value:?}")]
    InvalidNumericField { field: RecordField, value: String },

    /// A numeric field parsed but violates non-negativity.
    #[error("field {field} must be non-negative, got {value}")]
    NegativeValue { field: RecordField, value: f64 },
}

/// Service-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Unknown campaign identifier.
    #[error("campaign not found: {0}")]
    CampaignNotFound(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a campaign-not-found error.
    pub fn campaign_not_found(id: impl Into<String>) -> Self {
        Error::CampaignNotFound(id.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_messages_name_the_field() {
        let err = ParseError::InvalidNumericField {
            field: RecordField::BidPrice,
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "field bid_price is not a number: \"abc\"");

        let err = ParseError::NegativeValue {
            field: RecordField::Ctr,
            value: -2.5,
        };
        assert_eq!(err.to_string(), "field ctr must be non-negative, got -2.5");
    }

    #[test]
    fn test_malformed_row_carries_field_count() {
        let err = ParseError::MalformedRow { found: 3 };
        assert_eq!(err.to_string(), "expected 5 fields, found 3");
    }
}
