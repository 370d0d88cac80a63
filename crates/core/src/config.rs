//! Configuration structures for the bidwit analytics pipeline.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Timestamp encoding the parser expects.
///
/// Source data ships in more than one encoding, so the format is an explicit
/// caller choice rather than auto-detected per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampFormat {
    /// 17-digit fixed-width `YYYYMMDDHHmmssSSS`.
    Compact17,
    /// RFC 3339 (e.g. `2013-06-07T00:01:03.501Z`).
    Iso8601,
}

/// Unit the `bid_price` column is expressed in.
///
/// Explicit rather than inferred from magnitude; the conversion to currency
/// units happens exactly once, at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceUnit {
    /// Cents; divided by 100 during parsing.
    Cents,
    /// Already in currency units; taken as-is.
    CurrencyUnits,
}

/// Record parser configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Timestamp encoding of the input.
    pub timestamp_format: TimestampFormat,
    /// Unit of the bid price column.
    pub price_unit: PriceUnit,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            timestamp_format: TimestampFormat::Compact17,
            price_unit: PriceUnit::Cents,
        }
    }
}

/// Aggregator capacity and retention configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatorConfig {
    /// Maximum records retained for aggregation (`None` = unbounded).
    pub max_records: Option<usize>,
    /// Time-series retention window in milliseconds.
    pub retention_window_ms: i64,
    /// Maximum points kept per time series.
    pub max_series_points: usize,
    /// Maximum minute buckets kept for time-based metrics.
    pub max_minutes: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            max_records: None,
            retention_window_ms: 5 * 60 * 1000,
            max_series_points: 50,
            max_minutes: 240,
        }
    }
}

/// Budget configuration for spend tracking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetConfig {
    /// Total budget in currency units.
    pub total_budget: f64,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            total_budget: 100_000.0,
        }
    }
}

/// Main configuration for the analytics pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Record parser configuration.
    pub parser: ParserConfig,
    /// Aggregator configuration.
    pub aggregator: AggregatorConfig,
    /// Budget configuration.
    pub budget: BudgetConfig,
}

impl Config {
    /// Load and validate configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check configuration bounds.
    pub fn validate(&self) -> Result<()> {
        if self.aggregator.retention_window_ms <= 0 {
            return Err(Error::config("retention_window_ms must be positive"));
        }
        if self.aggregator.max_series_points == 0 {
            return Err(Error::config("max_series_points must be at least 1"));
        }
        if self.aggregator.max_minutes == 0 {
            return Err(Error::config("max_minutes must be at least 1"));
        }
        if self.aggregator.max_records == Some(0) {
            return Err(Error::config("max_records must be at least 1 when set"));
        }
        if self.budget.total_budget < 0.0 {
            return Err(Error::config("total_budget must be non-negative"));
        }
        Ok(())
    }
}
