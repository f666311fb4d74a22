use serde::{Deserialize, Serialize};

use crate::threshold::{ThresholdSearch, ThresholdTieBreak};

/// Upper bound on `(max - min) / step`.
const MAX_GRID_STEPS: f64 = 10_000.0;

/// `[thresholds]`: starting cutoff and the grid the fitter scans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdsConfig {
    #[serde(default = "default_threshold")]
    pub default: f64,

    #[serde(default = "default_min")]
    pub min: f64,

    #[serde(default = "default_max")]
    pub max: f64,

    #[serde(default = "default_step")]
    pub step: f64,

    #[serde(default)]
    pub tie_break: ThresholdTieBreak,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            default: default_threshold(),
            min: default_min(),
            max: default_max(),
            step: default_step(),
            tie_break: ThresholdTieBreak::default(),
        }
    }
}

impl ThresholdsConfig {
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [("default", self.default), ("min", self.min), ("max", self.max)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("thresholds.{name} must be within [0, 1], got {value}"));
            }
        }
        if self.min > self.max {
            return Err(format!(
                "thresholds.min ({}) must not exceed thresholds.max ({})",
                self.min, self.max
            ));
        }
        if !(self.step > 0.0) {
            return Err(format!("thresholds.step must be positive, got {}", self.step));
        }
        if (self.max - self.min) / self.step > MAX_GRID_STEPS {
            return Err(format!(
                "thresholds.step {} is too fine: the grid may have at most {} steps",
                self.step, MAX_GRID_STEPS
            ));
        }
        Ok(())
    }

    pub fn search(&self) -> ThresholdSearch {
        ThresholdSearch {
            min: self.min,
            max: self.max,
            step: self.step,
            initial: self.default,
            tie_break: self.tie_break,
        }
    }
}

fn default_threshold() -> f64 {
    crate::threshold::DEFAULT_THRESHOLD
}
fn default_min() -> f64 {
    0.30
}
fn default_max() -> f64 {
    0.80
}
fn default_step() -> f64 {
    0.01
}
