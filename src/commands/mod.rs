//! CLI command implementations for dsat-whatif.
//!
//! Available commands:
//! - **analyze**: Score a response set and rank incorrect answers by impact
//! - **tune**: Fit adaptive thresholds from historical data
//! - **init**: Initialize a new configuration file

pub mod analyze;
pub mod init;
pub mod tune;

pub use analyze::{handle_analyze, AnalyzeConfig};
pub use init::init_config;
pub use tune::{handle_tune, TuneConfig};

use crate::config::{self, WhatIfConfig};
use crate::io::{HistoricalSource, JsonHistoricalSource, SeedHistoricalSource};
use anyhow::{Context, Result};
use std::path::Path;

/// Explicit config file if given, otherwise the nearest discovered one.
pub(crate) fn resolve_config(path: Option<&Path>) -> Result<WhatIfConfig> {
    match path {
        Some(path) => config::load_config_from(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(config::load_config()),
    }
}

pub(crate) fn history_source(path: Option<&Path>) -> Box<dyn HistoricalSource> {
    match path {
        Some(path) => Box::new(JsonHistoricalSource::new(path)),
        None => Box::new(SeedHistoricalSource),
    }
}
