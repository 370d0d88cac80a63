//! Synthetic bid record producers.
//!
//! Demo/live-mode data enters through the same [`BidRecord`] type as parsed
//! imports, so downstream aggregation cannot tell them apart.

use bidwit_core::{BidRecord, TimestampMs};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A producer of bid records on the caller's clock.
pub trait RecordSource {
    /// Produce up to `max` records stamped relative to `now_ms`.
    fn next_batch(&mut self, now_ms: TimestampMs, max: usize) -> Vec<BidRecord>;
}

/// Price/latency profile for one synthetic campaign.
struct CampaignProfile {
    name: &'static str,
    base_price: f64,
    price_variance: f64,
    avg_exec_ms: f64,
    base_performance: f64,
}

const PROFILES: [CampaignProfile; 3] = [
    CampaignProfile {
        name: "Display Ads",
        base_price: 300.0,
        price_variance: 50.0,
        avg_exec_ms: 25.0,
        base_performance: 0.85,
    },
    CampaignProfile {
        name: "Search Ads",
        base_price: 230.0,
        price_variance: 30.0,
        avg_exec_ms: 15.0,
        base_performance: 0.92,
    },
    CampaignProfile {
        name: "Social Media",
        base_price: 450.0,
        price_variance: 40.0,
        avg_exec_ms: 20.0,
        base_performance: 0.88,
    },
];

const EXEC_TIME_VARIANCE_MS: f64 = 10.0;
const PERFORMANCE_VARIANCE: f64 = 0.1;
const BASE_CTR: f64 = 5.0;
const CTR_VARIANCE: f64 = 2.0;

/// Generates random bids from a fixed set of campaign profiles.
///
/// Every generated record satisfies the [`BidRecord`] invariants, same as a
/// record that survived parsing.
pub struct RandomBidSource {
    rng: StdRng,
}

impl RandomBidSource {
    /// Create a source seeded from system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a deterministic source for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn generate(&mut self, ts_ms: TimestampMs) -> BidRecord {
        let profile = &PROFILES[self.rng.gen_range(0..PROFILES.len())];

        let performance = (profile.base_performance
            + self.rng.gen_range(-1.0..1.0) * PERFORMANCE_VARIANCE)
            .clamp(0.5, 1.0);
        let won = self.rng.gen_bool(performance * 0.8);
        let ctr =
            (BASE_CTR * performance + self.rng.gen_range(-1.0..1.0) * CTR_VARIANCE).max(0.0);
        let bid_price = (profile.base_price
            + self.rng.gen_range(-1.0..1.0) * profile.price_variance)
            .max(0.0);
        let exec_time_ms = (profile.avg_exec_ms
            + self.rng.gen_range(-1.0..1.0) * EXEC_TIME_VARIANCE_MS)
            .max(0.0);

        BidRecord {
            ts_ms,
            ad_id: profile.name.to_string(),
            bid_price,
            ctr,
            win_status: if won { 1.0 } else { 0.0 },
            exec_time_ms,
        }
    }
}

impl Default for RandomBidSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordSource for RandomBidSource {
    fn next_batch(&mut self, now_ms: TimestampMs, max: usize) -> Vec<BidRecord> {
        (0..max).map(|_| self.generate(now_ms)).collect()
    }
}

/// Replays a previously parsed record set as if it were arriving live.
///
/// Cycles through the buffer, re-stamping each record onto the caller's
/// clock at a fixed tick interval and regenerating execution times (won
/// bids resolve faster than lost ones).
pub struct ReplaySource {
    buffer: Vec<BidRecord>,
    cursor: usize,
    tick_ms: i64,
    rng: StdRng,
}

impl ReplaySource {
    /// Create a replay over `records`, spacing replayed bids `tick_ms` apart.
    pub fn new(records: Vec<BidRecord>, tick_ms: i64) -> Self {
        Self {
            buffer: records,
            cursor: 0,
            tick_ms: tick_ms.max(1),
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic variant for reproducible runs.
    pub fn with_seed(records: Vec<BidRecord>, tick_ms: i64, seed: u64) -> Self {
        Self {
            buffer: records,
            cursor: 0,
            tick_ms: tick_ms.max(1),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Number of records in the replay buffer.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether the replay buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl RecordSource for ReplaySource {
    fn next_batch(&mut self, now_ms: TimestampMs, max: usize) -> Vec<BidRecord> {
        if self.buffer.is_empty() {
            return Vec::new();
        }

        let mut batch = Vec::with_capacity(max);
        for i in 0..max {
            if self.cursor >= self.buffer.len() {
                self.cursor = 0;
            }
            let mut record = self.buffer[self.cursor].clone();
            record.ts_ms = now_ms - (max - 1 - i) as i64 * self.tick_ms;
            record.exec_time_ms = if record.is_won() {
                15.0 + self.rng.gen_range(0.0..5.0)
            } else {
                25.0 + self.rng.gen_range(0.0..10.0)
            };
            batch.push(record);
            self.cursor += 1;
        }
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_source_respects_record_invariants() {
        let mut source = RandomBidSource::with_seed(42);
        let records = source.next_batch(1_000_000, 200);
        assert_eq!(records.len(), 200);

        let names: Vec<&str> = PROFILES.iter().map(|p| p.name).collect();
        for record in &records {
            assert!(record.bid_price >= 0.0);
            assert!(record.ctr >= 0.0);
            assert!(record.exec_time_ms >= 0.0);
            assert!(names.contains(&record.ad_id.as_str()));
            assert!(record.win_status == 0.0 || record.win_status == 1.0);
            assert_eq!(record.ts_ms, 1_000_000);
        }
        // A 200-bid sample always contains both outcomes.
        assert!(records.iter().any(|r| r.is_won()));
        assert!(records.iter().any(|r| !r.is_won()));
    }

    #[test]
    fn test_seeded_random_source_is_deterministic() {
        let mut a = RandomBidSource::with_seed(7);
        let mut b = RandomBidSource::with_seed(7);
        assert_eq!(a.next_batch(0, 10), b.next_batch(0, 10));
    }

    fn replay_record(ad_id: &str, win_status: f64) -> BidRecord {
        BidRecord {
            ts_ms: 500,
            ad_id: ad_id.to_string(),
            bid_price: 3.0,
            ctr: 6.0,
            win_status,
            exec_time_ms: 0.0,
        }
    }

    #[test]
    fn test_replay_cycles_and_restamps() {
        let buffer = vec![replay_record("a", 1.0), replay_record("b", 0.0)];
        let mut source = ReplaySource::with_seed(buffer, 1_000, 1);

        let now = 100_000;
        let batch = source.next_batch(now, 5);
        assert_eq!(batch.len(), 5);

        // Buffer of two cycles a, b, a, b, a.
        let ids: Vec<&str> = batch.iter().map(|r| r.ad_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "a", "b", "a"]);

        // Timestamps ascend in tick steps and end at the caller's clock.
        let ts: Vec<i64> = batch.iter().map(|r| r.ts_ms).collect();
        assert_eq!(ts, vec![96_000, 97_000, 98_000, 99_000, 100_000]);
    }

    #[test]
    fn test_replay_exec_times_depend_on_outcome() {
        let buffer = vec![replay_record("a", 1.0), replay_record("b", 0.0)];
        let mut source = ReplaySource::with_seed(buffer, 1_000, 1);

        for record in source.next_batch(100_000, 20) {
            if record.is_won() {
                assert!(record.exec_time_ms >= 15.0 && record.exec_time_ms < 20.0);
            } else {
                assert!(record.exec_time_ms >= 25.0 && record.exec_time_ms < 35.0);
            }
        }
    }

    #[test]
    fn test_empty_replay_produces_nothing() {
        let mut source = ReplaySource::new(Vec::new(), 1_000);
        assert!(source.next_batch(100_000, 5).is_empty());
        assert!(source.is_empty());
    }
}
