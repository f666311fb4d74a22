//! Sources of historical routing data for threshold fitting.

use crate::core::{Difficulty, HistoricalRecord};
use crate::errors::Result;
use std::path::PathBuf;

/// Anything that can supply past Module 1 results and the tier each
/// test-taker was routed to.
pub trait HistoricalSource {
    fn records(&self) -> Result<Vec<HistoricalRecord>>;

    /// Short human-readable origin, used in logs and reports.
    fn describe(&self) -> String;
}

/// Records read from a JSON file.
pub struct JsonHistoricalSource {
    path: PathBuf,
}

impl JsonHistoricalSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HistoricalSource for JsonHistoricalSource {
    fn records(&self) -> Result<Vec<HistoricalRecord>> {
        super::loader::load_historical(&self.path)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Built-in sample set used when no history file is given.
#[derive(Default)]
pub struct SeedHistoricalSource;

impl SeedHistoricalSource {
    pub const VERSION: &'static str = "seed-v1";

    const MODULE1_TOTAL: u32 = 22;

    // (subject, module1_correct, routed tier)
    const SEED: &'static [(&'static str, u32, Difficulty)] = &[
        ("Math", 10, Difficulty::Easy),
        ("Math", 14, Difficulty::Hard),
        ("Math", 13, Difficulty::Hard),
        ("Math", 11, Difficulty::Easy),
        ("Math", 16, Difficulty::Hard),
        ("Math", 12, Difficulty::Easy),
        ("Math", 15, Difficulty::Hard),
        ("Math", 9, Difficulty::Easy),
        ("Math", 17, Difficulty::Hard),
        ("Math", 8, Difficulty::Easy),
        ("Reading and Writing", 11, Difficulty::Easy),
        ("Reading and Writing", 15, Difficulty::Hard),
        ("Reading and Writing", 14, Difficulty::Hard),
        ("Reading and Writing", 10, Difficulty::Easy),
        ("Reading and Writing", 16, Difficulty::Hard),
        ("Reading and Writing", 13, Difficulty::Easy),
        ("Reading and Writing", 12, Difficulty::Easy),
        ("Reading and Writing", 18, Difficulty::Hard),
        ("Reading and Writing", 9, Difficulty::Easy),
        ("Reading and Writing", 17, Difficulty::Hard),
    ];
}

impl HistoricalSource for SeedHistoricalSource {
    fn records(&self) -> Result<Vec<HistoricalRecord>> {
        Ok(Self::SEED
            .iter()
            .map(|(subject, correct, tier)| {
                HistoricalRecord::new(*subject, *correct, Self::MODULE1_TOTAL, *tier)
            })
            .collect())
    }

    fn describe(&self) -> String {
        format!("built-in sample ({})", Self::VERSION)
    }
}
