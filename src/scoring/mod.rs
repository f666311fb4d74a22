pub mod calculator;
pub mod table;

pub use calculator::{module1_accuracy, ScoreCalculator, ScoreOutcome, SubjectScore};
pub use table::{ScoreRow, ScoringTable, SubjectScale, DEFAULT_SCALED_SCORE};
