use super::{history_source, resolve_config};
use crate::analyzer::WhatIfAnalyzer;
use crate::io::output;
use crate::scoring::ScoringTable;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub struct TuneConfig {
    pub history: Option<PathBuf>,
    pub format: Option<crate::cli::OutputFormat>,
    pub config: Option<PathBuf>,
}

pub fn handle_tune(config: TuneConfig) -> Result<()> {
    let settings = resolve_config(config.config.as_deref())?;

    let source = history_source(config.history.as_deref());
    let records = source
        .records()
        .with_context(|| format!("Failed to load historical data from {}", source.describe()))?;

    // Fitting never consults the scoring table.
    let mut analyzer = WhatIfAnalyzer::from_config(ScoringTable::new(Vec::new()), &settings);
    analyzer.fit_thresholds(&records);

    let format = config
        .format
        .map(output::OutputFormat::from)
        .unwrap_or_else(|| settings.default_format());
    let mut writer = output::create_writer(format, None)?;
    writer.write_fits(&analyzer.fit_report(source.describe()))?;
    Ok(())
}
