//! Adaptive routing thresholds: storage, fitting, and distance-to-threshold.

pub mod fitter;
pub mod standing;
pub mod thresholds;

pub use fitter::{prediction_accuracy, ThresholdFit, ThresholdFitter, ThresholdSearch, ThresholdTieBreak};
pub use standing::{standing_for, standing_for_score, AdaptiveStanding};
pub use thresholds::{AdaptiveThresholds, DEFAULT_THRESHOLD};
