//! Per-minute bucketed metrics.
//!
//! Groups bid records by minute boundary for time-based charting, pruning
//! the oldest buckets past a cap.

use bidwit_core::{ts_to_minute, BidRecord, MinuteMetrics, TimestampMs};
use std::collections::BTreeMap;

/// Accumulator for bids within one minute.
#[derive(Debug, Clone, Default)]
struct MinuteAccumulator {
    bids: u64,
    won: u64,
    price_sum: f64,
    ctr_sum: f64,
    exec_sum: f64,
}

impl MinuteAccumulator {
    fn add(&mut self, record: &BidRecord) {
        self.bids += 1;
        if record.is_won() {
            self.won += 1;
        }
        self.price_sum += record.bid_price;
        self.ctr_sum += record.ctr;
        self.exec_sum += record.exec_time_ms;
    }

    fn to_metrics(&self, ts_min: TimestampMs) -> MinuteMetrics {
        let mean = |sum: f64| {
            if self.bids > 0 {
                sum / self.bids as f64
            } else {
                0.0
            }
        };
        MinuteMetrics {
            ts_min,
            bid_count: self.bids,
            success_rate: if self.bids > 0 {
                self.won as f64 / self.bids as f64 * 100.0
            } else {
                0.0
            },
            average_bid_price: mean(self.price_sum),
            average_ctr: mean(self.ctr_sum),
            average_execution_time: mean(self.exec_sum),
        }
    }
}

/// Aggregates bid records into per-minute metric buckets.
pub struct MinuteAggregator {
    /// Accumulators by minute boundary.
    minutes: BTreeMap<TimestampMs, MinuteAccumulator>,
    /// Maximum minute buckets to keep.
    max_minutes: usize,
}

impl MinuteAggregator {
    /// Create a minute aggregator keeping at most `max_minutes` buckets.
    pub fn new(max_minutes: usize) -> Self {
        Self {
            minutes: BTreeMap::new(),
            max_minutes,
        }
    }

    /// Add a record to its minute bucket.
    pub fn add(&mut self, record: &BidRecord) {
        let ts_min = ts_to_minute(record.ts_ms);
        self.minutes.entry(ts_min).or_default().add(record);

        // Prune oldest buckets past the cap.
        while self.minutes.len() > self.max_minutes {
            if let Some((&oldest, _)) = self.minutes.iter().next() {
                self.minutes.remove(&oldest);
            }
        }
    }

    /// Add multiple records.
    pub fn add_all(&mut self, records: &[BidRecord]) {
        for record in records {
            self.add(record);
        }
    }

    /// Metrics for a specific minute boundary.
    pub fn get_minute(&self, ts_min: TimestampMs) -> Option<MinuteMetrics> {
        self.minutes.get(&ts_min).map(|acc| acc.to_metrics(ts_min))
    }

    /// Metrics for the most recent minute seen.
    pub fn latest(&self) -> Option<MinuteMetrics> {
        self.minutes
            .iter()
            .last()
            .map(|(&ts_min, acc)| acc.to_metrics(ts_min))
    }

    /// All minute buckets in ascending order.
    pub fn all(&self) -> Vec<MinuteMetrics> {
        self.minutes
            .iter()
            .map(|(&ts_min, acc)| acc.to_metrics(ts_min))
            .collect()
    }

    /// Number of minute buckets tracked.
    pub fn minute_count(&self) -> usize {
        self.minutes.len()
    }

    /// Clear all buckets.
    pub fn clear(&mut self) {
        self.minutes.clear();
    }
}
