//! Core types and configuration for the bidwit analytics pipeline.
//!
//! This crate provides shared types used across all other crates:
//! - Bid record and derived metric types
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::{AggregatorConfig, BudgetConfig, Config, ParserConfig, PriceUnit, TimestampFormat};
pub use error::{Error, ParseError, RecordField, Result};
pub use types::*;
