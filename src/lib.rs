//! What-if score analysis for two-stage adaptive exams.
//!
//! A student's Module 1 accuracy in each subject picks the Module 2 tier,
//! and the tier decides which scaled-score curve the raw score is read
//! from. This crate reproduces that scoring, fits the routing thresholds
//! from historical data, and ranks every incorrect answer by how much the
//! total would move if it had been answered correctly.
//!
//! ```
//! use dsat_whatif::{Complexity, Response, ScoreRow, ScoringTable, Section, SubjectScale, WhatIfAnalyzer};
//!
//! let rows = (0..=4).map(|raw| ScoreRow::new(raw, 200 + raw * 40, 200 + raw * 50)).collect();
//! let analyzer = WhatIfAnalyzer::new(ScoringTable::new(vec![SubjectScale::new("Math", rows)]));
//!
//! let responses = vec![
//!     Response::new("m1", "Math", Section::Static, true, Complexity::Medium),
//!     Response::new("m2", "Math", Section::Static, false, Complexity::Easy),
//! ];
//! let report = analyzer.generate_recommendations(&responses, 5);
//! assert_eq!(report.recommendations["Math"].high_impact_questions[0].question_id, "m2");
//! ```

pub mod analyzer;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod io;
pub mod observability;
pub mod priority;
pub mod scoring;
pub mod threshold;

// Re-export commonly used types
pub use crate::analyzer::{AnalysisReport, FitReport, WhatIfAnalyzer};
pub use crate::config::WhatIfConfig;
pub use crate::core::{Complexity, Difficulty, HistoricalRecord, Module, Response, Section};
pub use crate::errors::{Result, WhatIfError};
pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
pub use crate::priority::{ImpactEntry, RecommendationReport, StudyInsights};
pub use crate::scoring::{ScoreCalculator, ScoreOutcome, ScoreRow, ScoringTable, SubjectScale};
pub use crate::threshold::{AdaptiveThresholds, ThresholdFit, ThresholdFitter};
