use super::{history_source, resolve_config};
use crate::analyzer::WhatIfAnalyzer;
use crate::io::{self, output};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

pub struct AnalyzeConfig {
    pub scoring: PathBuf,
    pub responses: PathBuf,
    pub history: Option<PathBuf>,
    pub top: Option<usize>,
    pub format: Option<crate::cli::OutputFormat>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub parallel: bool,
}

pub fn handle_analyze(config: AnalyzeConfig) -> Result<()> {
    let settings = resolve_config(config.config.as_deref())?;

    let table = io::load_scoring_table(&config.scoring)
        .with_context(|| format!("Failed to load scoring table {}", config.scoring.display()))?;
    let responses = io::load_responses(&config.responses)
        .with_context(|| format!("Failed to load responses {}", config.responses.display()))?;

    let source = history_source(config.history.as_deref());
    let records = source
        .records()
        .with_context(|| format!("Failed to load historical data from {}", source.describe()))?;

    let mut analyzer = WhatIfAnalyzer::from_config(table, &settings)
        .with_parallel(config.parallel || settings.parallel());
    analyzer.fit_thresholds(&records);
    info!(source = %source.describe(), records = records.len(), "thresholds fitted");

    let top_n = config.top.unwrap_or_else(|| settings.top_n());
    let mut report = analyzer.analyze(&responses, top_n);
    report.history_source = Some(source.describe());

    let format = config
        .format
        .map(output::OutputFormat::from)
        .unwrap_or_else(|| settings.default_format());
    let mut writer = output::create_writer(format, config.output.as_deref())?;
    writer.write_report(&report)?;

    if let Some(path) = &config.output {
        log::info!("Report written to {}", path.display());
    }
    Ok(())
}
