//! Core data types for the bidwit analytics pipeline.

use serde::{Deserialize, Serialize};

/// Timestamp in milliseconds since Unix epoch (UTC).
pub type TimestampMs = i64;

/// Convert a timestamp to its minute boundary.
#[inline]
pub fn ts_to_minute(ts_ms: TimestampMs) -> TimestampMs {
    (ts_ms / 60_000) * 60_000
}

/// A single validated bid event.
///
/// Only the parser (or an equivalent trusted producer) constructs these, so
/// downstream aggregation can rely on `bid_price >= 0`, `ctr >= 0`, and a
/// resolved timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidRecord {
    /// Timestamp in milliseconds.
    pub ts_ms: TimestampMs,
    /// Campaign/ad identifier (opaque, non-empty).
    pub ad_id: String,
    /// Bid price in currency units.
    pub bid_price: f64,
    /// Click-through rate as delivered by the source (raw percentage figure,
    /// never rescaled).
    pub ctr: f64,
    /// Raw win-status flag as parsed.
    pub win_status: f64,
    /// Bid execution time in milliseconds. Zero for flat-file rows; the line
    /// format carries no such column.
    pub exec_time_ms: f64,
}

impl BidRecord {
    /// Whether the bid was won. Any strictly positive flag is a win.
    #[inline]
    pub fn is_won(&self) -> bool {
        self.win_status > 0.0
    }
}

/// Aggregate metrics over the retained record set.
///
/// Derived data: recomputed from aggregator state, never mutated directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Total bids seen.
    pub total_bids: u64,
    /// Bids won.
    pub successful_bids: u64,
    /// Bids lost.
    pub failed_bids: u64,
    /// Won bids as a percentage of total (0 when empty).
    pub win_rate: f64,
    /// Mean CTR (0 when empty).
    pub average_ctr: f64,
    /// Mean bid price in currency units (0 when empty).
    pub average_bid_price: f64,
    /// Mean execution time in milliseconds (0 when empty).
    pub average_execution_time: f64,
    /// Sum of bid prices over all bids, won or lost.
    pub total_bid_amount: f64,
    /// Sum of bid prices over won bids only.
    pub budget_used: f64,
    /// Configured total budget.
    pub total_budget: f64,
    /// Budget left, clamped at zero for reporting even if spend overran.
    pub remaining_budget: f64,
    /// Distinct ad ids in the retained record set.
    pub active_campaigns: usize,
}

/// Per-campaign KPIs, scoped to one ad id's records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignKpi {
    /// The ad/campaign identifier.
    pub name: String,
    /// Bids for this campaign.
    pub total_bids: u64,
    /// Won bids for this campaign.
    pub successful_bids: u64,
    /// Won bids as a percentage of the campaign's total.
    pub win_rate: f64,
    /// Mean CTR across the campaign's bids.
    pub average_ctr: f64,
    /// Sum of bid prices over the campaign's won bids.
    pub total_spent: f64,
    /// Mean bid price across the campaign's bids.
    pub average_bid_price: f64,
    /// Mean execution time across the campaign's bids.
    pub average_execution_time: f64,
}

/// One point of a charted time series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Timestamp in milliseconds.
    pub ts_ms: TimestampMs,
    /// Charted value at that instant.
    pub value: f64,
}

/// Charted quantity of a rolling time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    /// Bid price in currency units.
    BidPrice,
    /// Click-through rate.
    Ctr,
    /// Execution time in milliseconds.
    ExecutionTime,
    /// Win indicator per bid (1 won, 0 lost).
    SuccessRate,
}

impl SeriesKind {
    /// All series kinds, in display order.
    pub const ALL: [SeriesKind; 4] = [
        SeriesKind::BidPrice,
        SeriesKind::Ctr,
        SeriesKind::ExecutionTime,
        SeriesKind::SuccessRate,
    ];
}

/// Metrics for one minute bucket of bids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinuteMetrics {
    /// Minute boundary timestamp (ms).
    pub ts_min: TimestampMs,
    /// Bids in the minute.
    pub bid_count: u64,
    /// Won bids as a percentage of the minute's total.
    pub success_rate: f64,
    /// Mean bid price over the minute.
    pub average_bid_price: f64,
    /// Mean CTR over the minute.
    pub average_ctr: f64,
    /// Mean execution time over the minute.
    pub average_execution_time: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_status(win_status: f64) -> BidRecord {
        BidRecord {
            ts_ms: 0,
            ad_id: "ad1".to_string(),
            bid_price: 1.0,
            ctr: 1.0,
            win_status,
            exec_time_ms: 0.0,
        }
    }

    #[test]
    fn test_ts_to_minute() {
        // 2024-01-01 00:01:30.500 -> 2024-01-01 00:01:00.000
        let ts = 1704067290500i64;
        assert_eq!(ts_to_minute(ts), 1704067260000);
    }

    #[test]
    fn test_is_won_positive_only() {
        assert!(record_with_status(1.0).is_won());
        assert!(record_with_status(5.0).is_won());
        assert!(record_with_status(0.5).is_won());
        assert!(!record_with_status(0.0).is_won());
        assert!(!record_with_status(-1.0).is_won());
    }

    #[test]
    fn test_empty_snapshot_is_all_zero() {
        let snapshot = MetricsSnapshot::default();
        assert_eq!(snapshot.total_bids, 0);
        assert_eq!(snapshot.win_rate, 0.0);
        assert_eq!(snapshot.average_ctr, 0.0);
    }
}
