//! Raw-to-scaled score conversion.
//!
//! Lookup rules, in order:
//!
//! | Case                               | Result                          |
//! |------------------------------------|---------------------------------|
//! | subject not in the table           | default score (200)             |
//! | raw score matches a row            | that row's easy/hard value      |
//! | raw score below the lowest row     | default score (200)             |
//! | raw score >= number of rows        | last row's easy/hard value      |
//! | anything else                      | default score (200)             |
//!
//! Below the table the default is returned rather than the first row's
//! value, while above the table the last row is used. The two ends are
//! deliberately not symmetric.

use crate::core::Difficulty;
use serde::{Deserialize, Serialize};

/// Score reported when a lookup cannot be resolved.
pub const DEFAULT_SCALED_SCORE: u32 = 200;

/// One raw score and its scaled value on each Module 2 tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRow {
    pub raw: u32,
    pub easy: u32,
    pub hard: u32,
}

impl ScoreRow {
    pub fn new(raw: u32, easy: u32, hard: u32) -> Self {
        Self { raw, easy, hard }
    }

    pub fn scaled(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Hard => self.hard,
        }
    }
}

/// Rows for one subject, ordered by raw score.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectScale {
    pub subject: String,
    pub rows: Vec<ScoreRow>,
}

impl SubjectScale {
    /// Build a scale; rows are sorted by raw score.
    pub fn new(subject: impl Into<String>, mut rows: Vec<ScoreRow>) -> Self {
        rows.sort_by_key(|row| row.raw);
        Self {
            subject: subject.into(),
            rows,
        }
    }

    pub fn min_raw(&self) -> Option<u32> {
        self.rows.first().map(|row| row.raw)
    }

    fn lookup(&self, raw_score: u32, difficulty: Difficulty, default_score: u32) -> u32 {
        if let Some(row) = self.rows.iter().find(|row| row.raw == raw_score) {
            return row.scaled(difficulty);
        }

        match (self.min_raw(), self.rows.last()) {
            (Some(min), _) if raw_score < min => default_score,
            (_, Some(last)) if raw_score as usize >= self.rows.len() => last.scaled(difficulty),
            _ => default_score,
        }
    }
}

/// Scaled-score tables for every subject of the exam.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringTable {
    scales: Vec<SubjectScale>,
    #[serde(default = "default_scaled_score")]
    default_score: u32,
}

fn default_scaled_score() -> u32 {
    DEFAULT_SCALED_SCORE
}

impl ScoringTable {
    pub fn new(scales: Vec<SubjectScale>) -> Self {
        Self {
            scales,
            default_score: DEFAULT_SCALED_SCORE,
        }
    }

    /// Override the score used for unresolved lookups.
    pub fn with_default_score(mut self, default_score: u32) -> Self {
        self.default_score = default_score;
        self
    }

    pub fn scale(&self, subject: &str) -> Option<&SubjectScale> {
        self.scales.iter().find(|scale| scale.subject == subject)
    }

    /// Scaled score for `raw_score` on the given Module 2 tier.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsat_whatif::core::Difficulty;
    /// use dsat_whatif::scoring::{ScoreRow, ScoringTable, SubjectScale};
    ///
    /// let table = ScoringTable::new(vec![SubjectScale::new(
    ///     "Math",
    ///     vec![ScoreRow::new(0, 200, 200), ScoreRow::new(1, 220, 240)],
    /// )]);
    ///
    /// assert_eq!(table.lookup("Math", 1, Difficulty::Hard), 240);
    /// assert_eq!(table.lookup("Math", 9, Difficulty::Easy), 220); // clamped
    /// assert_eq!(table.lookup("Physics", 1, Difficulty::Easy), 200);
    /// ```
    pub fn lookup(&self, subject: &str, raw_score: u32, difficulty: Difficulty) -> u32 {
        match self.scale(subject) {
            Some(scale) => scale.lookup(raw_score, difficulty, self.default_score),
            None => self.default_score,
        }
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_rows() -> impl Strategy<Value = Vec<ScoreRow>> {
        prop::collection::vec((200u32..800, 200u32..800), 1..60).prop_map(|values| {
            values
                .into_iter()
                .enumerate()
                .map(|(raw, (easy, hard))| ScoreRow::new(raw as u32, easy, hard))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn in_bounds_lookup_returns_configured_value(rows in arb_rows(), pick in any::<prop::sample::Index>()) {
            let row = rows[pick.index(rows.len())];
            let table = ScoringTable::new(vec![SubjectScale::new("Math", rows)]);

            prop_assert_eq!(table.lookup("Math", row.raw, Difficulty::Easy), row.easy);
            prop_assert_eq!(table.lookup("Math", row.raw, Difficulty::Hard), row.hard);
        }

        #[test]
        fn lookup_past_the_end_returns_last_row(rows in arb_rows(), extra in 0u32..100) {
            let last = *rows.last().unwrap();
            let raw = rows.len() as u32 + extra;
            let table = ScoringTable::new(vec![SubjectScale::new("Math", rows)]);

            prop_assert_eq!(table.lookup("Math", raw, Difficulty::Easy), last.easy);
            prop_assert_eq!(table.lookup("Math", raw, Difficulty::Hard), last.hard);
        }

        #[test]
        fn lookup_below_the_table_returns_default(offset in 1u32..50, below in 0u32..50) {
            let rows = vec![ScoreRow::new(offset + below, 500, 600)];
            let table = ScoringTable::new(vec![SubjectScale::new("Math", rows)]);

            prop_assert_eq!(table.lookup("Math", below, Difficulty::Easy), DEFAULT_SCALED_SCORE);
            prop_assert_eq!(table.lookup("Math", below, Difficulty::Hard), DEFAULT_SCALED_SCORE);
        }
    }
}
