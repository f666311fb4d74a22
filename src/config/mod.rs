// Sub-modules
mod scoring;
mod thresholds;

// Core configuration types
mod accessors;
mod core;
mod loader;

pub use scoring::{default_subjects, ExamConfig, ScoringConfig};
pub use thresholds::ThresholdsConfig;

pub use core::{OutputConfig, WhatIfConfig};
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from,
    parse_and_validate_config, CONFIG_FILE_NAME,
};
