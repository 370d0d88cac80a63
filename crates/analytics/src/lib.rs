//! Dashboard analytics service for the bidwit pipeline.
//!
//! This crate ties the parser and aggregators together behind a single
//! stateful service with an explicit lifecycle, and provides:
//! - Flat-file import with partial-success reporting
//! - Campaign registry and dashboard settings stores
//! - Synthetic record sources for demo/live mode

pub mod campaigns;
pub mod service;
pub mod settings;
pub mod source;

pub use campaigns::{Campaign, CampaignStatus, CampaignStore, CampaignUpdate, NewCampaign};
pub use service::DashboardService;
pub use settings::{DashboardSettings, SettingsPatch};
pub use source::{RandomBidSource, RecordSource, ReplaySource};
