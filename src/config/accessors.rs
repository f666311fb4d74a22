use super::core::{OutputConfig, WhatIfConfig};
use super::scoring::{default_subjects, ScoringConfig};
use super::thresholds::ThresholdsConfig;
use crate::io::output::OutputFormat;
use crate::priority::ImpactWeights;
use crate::threshold::ThresholdSearch;

impl WhatIfConfig {
    pub fn subjects(&self) -> Vec<String> {
        self.exam
            .as_ref()
            .map(|exam| exam.subjects.clone())
            .unwrap_or_else(default_subjects)
    }

    pub fn threshold_search(&self) -> ThresholdSearch {
        self.thresholds
            .as_ref()
            .map(ThresholdsConfig::search)
            .unwrap_or_default()
    }

    pub fn impact_weights(&self) -> ImpactWeights {
        self.impact.clone().unwrap_or_default()
    }

    pub fn default_scaled_score(&self) -> u32 {
        self.scoring
            .as_ref()
            .map(|s| s.default_scaled_score)
            .unwrap_or_else(|| ScoringConfig::default().default_scaled_score)
    }

    pub fn top_n(&self) -> usize {
        self.output_config().top_n
    }

    pub fn default_format(&self) -> OutputFormat {
        self.output_config().default_format
    }

    pub fn parallel(&self) -> bool {
        self.output_config().parallel
    }

    fn output_config(&self) -> OutputConfig {
        self.output.clone().unwrap_or_default()
    }
}
