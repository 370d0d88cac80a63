//! Running bid metrics aggregation.
//!
//! Folds validated [`BidRecord`]s into running totals, per-campaign
//! breakdowns, and rolling time series. Snapshots are pure reads and always
//! match a from-scratch recomputation over the retained record set.

use bidwit_core::{
    AggregatorConfig, BidRecord, CampaignKpi, Config, MetricsSnapshot, SeriesKind,
};
use std::collections::{BTreeMap, VecDeque};
use tracing::trace;

use crate::series::SeriesBuffer;

/// Running sums over one record population.
#[derive(Debug, Clone, Copy, Default)]
struct Totals {
    bids: u64,
    won: u64,
    bid_amount: f64,
    spent: f64,
    ctr_sum: f64,
    exec_sum: f64,
}

impl Totals {
    fn add(&mut self, record: &BidRecord) {
        self.bids += 1;
        self.bid_amount += record.bid_price;
        self.ctr_sum += record.ctr;
        self.exec_sum += record.exec_time_ms;
        if record.is_won() {
            self.won += 1;
            self.spent += record.bid_price;
        }
    }

    fn remove(&mut self, record: &BidRecord) {
        self.bids -= 1;
        self.bid_amount -= record.bid_price;
        self.ctr_sum -= record.ctr;
        self.exec_sum -= record.exec_time_ms;
        if record.is_won() {
            self.won -= 1;
            self.spent -= record.bid_price;
        }
    }

    fn mean(&self, sum: f64) -> f64 {
        if self.bids > 0 {
            sum / self.bids as f64
        } else {
            0.0
        }
    }

    fn win_rate(&self) -> f64 {
        if self.bids > 0 {
            self.won as f64 / self.bids as f64 * 100.0
        } else {
            0.0
        }
    }
}

/// Stateful accumulator over a stream of validated bid records.
///
/// Single-threaded by design; callers that could trigger concurrent imports
/// against one instance must serialize them.
pub struct BidAggregator {
    /// Retained records, sorted by ascending timestamp.
    records: VecDeque<BidRecord>,
    /// Global running totals.
    totals: Totals,
    /// Per-campaign running totals, keyed by ad id.
    campaigns: BTreeMap<String, Totals>,
    bid_price: SeriesBuffer,
    ctr: SeriesBuffer,
    exec_time: SeriesBuffer,
    success: SeriesBuffer,
    max_records: Option<usize>,
    total_budget: f64,
}

impl BidAggregator {
    /// Create an aggregator with the given capacity/retention settings.
    pub fn new(config: &AggregatorConfig, total_budget: f64) -> Self {
        let series = || SeriesBuffer::new(config.retention_window_ms, config.max_series_points);
        Self {
            records: VecDeque::new(),
            totals: Totals::default(),
            campaigns: BTreeMap::new(),
            bid_price: series(),
            ctr: series(),
            exec_time: series(),
            success: series(),
            max_records: config.max_records,
            total_budget,
        }
    }

    /// Create an aggregator from the full pipeline configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.aggregator, config.budget.total_budget)
    }

    /// Fold a batch of records into the running state.
    ///
    /// Safe to call repeatedly with growing or disjoint batches; arrival
    /// order need not match timestamp order.
    pub fn ingest(&mut self, records: &[BidRecord]) {
        for record in records {
            self.ingest_one(record.clone());
        }
    }

    /// Fold a single record into the running state.
    pub fn ingest_one(&mut self, record: BidRecord) {
        self.totals.add(&record);
        self.campaigns
            .entry(record.ad_id.clone())
            .or_default()
            .add(&record);

        self.bid_price.push(record.ts_ms, record.bid_price);
        self.ctr.push(record.ts_ms, record.ctr);
        self.exec_time.push(record.ts_ms, record.exec_time_ms);
        self.success
            .push(record.ts_ms, if record.is_won() { 1.0 } else { 0.0 });

        let idx = self.records.partition_point(|r| r.ts_ms <= record.ts_ms);
        if idx == self.records.len() {
            self.records.push_back(record);
        } else {
            self.records.insert(idx, record);
        }

        self.evict_over_capacity();
    }

    /// Evict oldest-timestamp records beyond capacity, subtracting each
    /// evicted record's contribution from the running sums.
    fn evict_over_capacity(&mut self) {
        let Some(cap) = self.max_records else {
            return;
        };
        while self.records.len() > cap {
            let Some(evicted) = self.records.pop_front() else {
                break;
            };
            self.totals.remove(&evicted);
            if let Some(campaign) = self.campaigns.get_mut(&evicted.ad_id) {
                campaign.remove(&evicted);
                if campaign.bids == 0 {
                    self.campaigns.remove(&evicted.ad_id);
                }
            }
            trace!(ts_ms = evicted.ts_ms, ad_id = %evicted.ad_id, "evicted bid record");
        }
    }

    /// Current metrics over the retained record set.
    ///
    /// Pure read; empty populations yield zeros, never NaN.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let t = &self.totals;
        MetricsSnapshot {
            total_bids: t.bids,
            successful_bids: t.won,
            failed_bids: t.bids - t.won,
            win_rate: t.win_rate(),
            average_ctr: t.mean(t.ctr_sum),
            average_bid_price: t.mean(t.bid_amount),
            average_execution_time: t.mean(t.exec_sum),
            total_bid_amount: t.bid_amount,
            budget_used: t.spent,
            total_budget: self.total_budget,
            remaining_budget: (self.total_budget - t.spent).max(0.0),
            active_campaigns: self.campaigns.len(),
        }
    }

    /// Per-campaign KPIs for every ad id currently retained, ordered by id.
    pub fn campaign_breakdown(&self) -> Vec<CampaignKpi> {
        self.campaigns
            .iter()
            .map(|(name, t)| CampaignKpi {
                name: name.clone(),
                total_bids: t.bids,
                successful_bids: t.won,
                win_rate: t.win_rate(),
                average_ctr: t.mean(t.ctr_sum),
                total_spent: t.spent,
                average_bid_price: t.mean(t.bid_amount),
                average_execution_time: t.mean(t.exec_sum),
            })
            .collect()
    }

    /// Up to `n` most recent retained records for one campaign, newest first.
    pub fn recent_records(&self, ad_id: &str, n: usize) -> Vec<&BidRecord> {
        self.records
            .iter()
            .rev()
            .filter(|r| r.ad_id == ad_id)
            .take(n)
            .collect()
    }

    /// Rolling series for the requested quantity.
    pub fn time_series(&self, kind: SeriesKind) -> &SeriesBuffer {
        match kind {
            SeriesKind::BidPrice => &self.bid_price,
            SeriesKind::Ctr => &self.ctr,
            SeriesKind::ExecutionTime => &self.exec_time,
            SeriesKind::SuccessRate => &self.success,
        }
    }

    /// Number of records currently retained.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// The configured total budget.
    pub fn total_budget(&self) -> f64 {
        self.total_budget
    }

    /// Clear all accumulated state.
    pub fn reset(&mut self) {
        self.records.clear();
        self.totals = Totals::default();
        self.campaigns.clear();
        self.bid_price.clear();
        self.ctr.clear();
        self.exec_time.clear();
        self.success.clear();
    }
}
