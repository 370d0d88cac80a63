//! Dashboard analytics service.
//!
//! A single long-lived owner of parser, aggregators, campaign registry, and
//! settings, with an explicit create / ingest / read / reset lifecycle.
//! Callers hold a handle to one instance instead of reaching for ambient
//! shared state, and must serialize concurrent imports themselves.

use bidwit_core::{
    BidRecord, CampaignKpi, Config, MetricsSnapshot, MinuteMetrics, Result, SeriesKind,
    TimestampMs,
};
use bidwit_ingestion::{ImportReport, LineParser};
use bidwit_metrics::{BidAggregator, MinuteAggregator, SeriesBuffer};
use tracing::info;

use crate::campaigns::{Campaign, CampaignStore, CampaignUpdate, NewCampaign};
use crate::settings::{DashboardSettings, SettingsPatch};
use crate::source::RecordSource;

/// Long-lived owner of all dashboard analytics state.
pub struct DashboardService {
    parser: LineParser,
    aggregator: BidAggregator,
    minutes: MinuteAggregator,
    campaigns: CampaignStore,
    settings: DashboardSettings,
}

impl DashboardService {
    /// Create a service from a configuration, validating it first.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            aggregator: BidAggregator::from_config(&config),
            minutes: MinuteAggregator::new(config.aggregator.max_minutes),
            parser: LineParser::new(config.parser.clone()),
            campaigns: CampaignStore::new(),
            settings: DashboardSettings::default(),
        })
    }

    /// Import raw flat-file text: parse, fold accepted records, report counts.
    ///
    /// Partial success by design: valid rows are ingested even when other
    /// rows in the same import fail.
    pub fn import_text(&mut self, text: &str) -> ImportReport {
        let batch = self.parser.parse_text(text);
        let summary = batch.summary();
        self.ingest(&batch.records);
        info!(
            total = summary.total_rows,
            accepted = summary.successful_rows,
            rejected = summary.failed_rows,
            "import complete"
        );
        ImportReport {
            summary,
            failures: batch.failures,
        }
    }

    /// Fold already-validated records into the aggregation state.
    pub fn ingest(&mut self, records: &[BidRecord]) {
        self.aggregator.ingest(records);
        self.minutes.add_all(records);
    }

    /// Pull one batch from a record source and ingest it.
    ///
    /// Returns the number of records ingested.
    pub fn ingest_from(
        &mut self,
        source: &mut dyn RecordSource,
        now_ms: TimestampMs,
        max: usize,
    ) -> usize {
        let records = source.next_batch(now_ms, max);
        self.ingest(&records);
        records.len()
    }

    /// Current aggregate metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        self.aggregator.snapshot()
    }

    /// Per-campaign KPIs, ordered by ad id.
    pub fn campaign_breakdown(&self) -> Vec<CampaignKpi> {
        self.aggregator.campaign_breakdown()
    }

    /// Rolling series for the requested quantity.
    pub fn time_series(&self, kind: SeriesKind) -> &SeriesBuffer {
        self.aggregator.time_series(kind)
    }

    /// Per-minute bucketed metrics in ascending order.
    pub fn minute_metrics(&self) -> Vec<MinuteMetrics> {
        self.minutes.all()
    }

    /// Up to `n` most recent bids for one campaign, newest first.
    pub fn recent_bids(&self, ad_id: &str, n: usize) -> Vec<BidRecord> {
        self.aggregator
            .recent_records(ad_id, n)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Number of records currently retained for aggregation.
    pub fn record_count(&self) -> usize {
        self.aggregator.record_count()
    }

    /// Discard all aggregated data, e.g. before a fresh import.
    ///
    /// The campaign registry and settings survive a data reset.
    pub fn reset(&mut self) {
        self.aggregator.reset();
        self.minutes.clear();
    }

    /// Register a campaign.
    pub fn create_campaign(&mut self, new: NewCampaign) -> Campaign {
        self.campaigns.create(new)
    }

    /// Look up a campaign by id.
    pub fn campaign(&self, id: &str) -> Result<&Campaign> {
        self.campaigns.get(id)
    }

    /// All registered campaigns, in creation order.
    pub fn campaigns(&self) -> &[Campaign] {
        self.campaigns.list()
    }

    /// Apply a partial update to a campaign.
    pub fn update_campaign(&mut self, id: &str, update: CampaignUpdate) -> Result<&Campaign> {
        self.campaigns.update(id, update)
    }

    /// Remove a campaign, returning it.
    pub fn remove_campaign(&mut self, id: &str) -> Result<Campaign> {
        self.campaigns.remove(id)
    }

    /// Current dashboard settings.
    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    /// Apply a section-wise settings patch, returning the merged settings.
    pub fn apply_settings(&mut self, patch: SettingsPatch) -> &DashboardSettings {
        self.settings.apply(patch);
        &self.settings
    }
}

impl Default for DashboardService {
    fn default() -> Self {
        let config = Config::default();
        Self {
            aggregator: BidAggregator::from_config(&config),
            minutes: MinuteAggregator::new(config.aggregator.max_minutes),
            parser: LineParser::new(config.parser.clone()),
            campaigns: CampaignStore::new(),
            settings: DashboardSettings::default(),
        }
    }
}
