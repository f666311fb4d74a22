use serde::{Deserialize, Serialize};

use super::scoring::{ExamConfig, ScoringConfig};
use super::thresholds::ThresholdsConfig;
use crate::io::output::OutputFormat;
use crate::priority::{ImpactWeights, DEFAULT_TOP_N};

/// Root configuration structure for dsat-whatif
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WhatIfConfig {
    /// Subjects always in scope
    #[serde(default)]
    pub exam: Option<ExamConfig>,

    /// Threshold grid and tie-break policy
    #[serde(default)]
    pub thresholds: Option<ThresholdsConfig>,

    /// Branch and complexity bonuses
    #[serde(default)]
    pub impact: Option<ImpactWeights>,

    /// Scoring table fallbacks
    #[serde(default)]
    pub scoring: Option<ScoringConfig>,

    /// Report defaults
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

/// `[output]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    #[serde(default)]
    pub default_format: OutputFormat,

    /// Evaluate counterfactuals on the rayon pool
    #[serde(default)]
    pub parallel: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            default_format: OutputFormat::default(),
            parallel: false,
        }
    }
}

impl OutputConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.top_n == 0 {
            return Err("output.top_n must be at least 1".to_string());
        }
        Ok(())
    }
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}
