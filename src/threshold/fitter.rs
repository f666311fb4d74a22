//! Grid search for the Module 1 cutoff that best explains past routing.
//!
//! Every candidate threshold on a fixed grid (0.30 to 0.80 in steps of 0.01
//! by default) is scored by how many historical records it routes the way
//! they were actually routed: `hard` when `module1_correct / module1_total`
//! reaches the candidate, `easy` otherwise.
//!
//! ## Tie-break
//!
//! The scan runs from the lowest candidate up and only replaces the best
//! candidate on a strictly better hit count, so the lowest threshold with
//! the maximum accuracy wins. [`ThresholdTieBreak`] can pick the highest
//! tied candidate, or the one nearest the default, instead.
//!
//! A subject with no records (or whose records no candidate gets right)
//! keeps the initial threshold with accuracy 0.

use crate::core::{Difficulty, HistoricalRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use super::thresholds::DEFAULT_THRESHOLD;

/// How to choose among candidates that reach the same best accuracy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdTieBreak {
    /// First (lowest) candidate reaching the maximum
    #[default]
    Lowest,
    /// Last (highest) candidate reaching the maximum
    Highest,
    /// Tied candidate nearest the initial threshold; lower on equal distance
    ClosestToDefault,
}

/// Candidate grid and starting point of the search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSearch {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// Threshold kept when no candidate gets any record right
    pub initial: f64,
    pub tie_break: ThresholdTieBreak,
}

impl Default for ThresholdSearch {
    fn default() -> Self {
        Self {
            min: 0.30,
            max: 0.80,
            step: 0.01,
            initial: DEFAULT_THRESHOLD,
            tie_break: ThresholdTieBreak::Lowest,
        }
    }
}

impl ThresholdSearch {
    /// Candidate thresholds from `min` to `max` inclusive.
    ///
    /// ```
    /// use dsat_whatif::threshold::ThresholdSearch;
    ///
    /// let candidates = ThresholdSearch::default().candidates();
    /// assert_eq!(candidates.len(), 51);
    /// assert_eq!(candidates[0], 0.30);
    /// assert_eq!(candidates[11], 0.41);
    /// assert_eq!(candidates[50], 0.80);
    /// ```
    pub fn candidates(&self) -> Vec<f64> {
        if self.step <= 0.0 || self.max < self.min {
            return vec![self.min];
        }
        // Epsilon absorbs float error when step divides the range exactly.
        let steps = ((self.max - self.min) / self.step + 1e-9).floor() as usize;
        (0..=steps)
            .map(|i| round_to_grid(self.min + i as f64 * self.step))
            .collect()
    }
}

// Accumulated float error would otherwise leave 0.41 as 0.41000000000000003.
fn round_to_grid(value: f64) -> f64 {
    (value * 1e9).round() / 1e9
}

/// Outcome of fitting one subject, kept for diagnostics only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThresholdFit {
    pub subject: String,
    pub threshold: f64,
    pub accuracy: f64,
    pub data_points: usize,
    /// Share of records routed `hard` at the chosen threshold
    pub hard_share: f64,
    /// Share of records routed `easy` at the chosen threshold
    pub easy_share: f64,
    pub fitted_at: DateTime<Utc>,
}

pub struct ThresholdFitter {
    search: ThresholdSearch,
}

impl Default for ThresholdFitter {
    fn default() -> Self {
        Self::new(ThresholdSearch::default())
    }
}

impl ThresholdFitter {
    pub fn new(search: ThresholdSearch) -> Self {
        Self { search }
    }

    /// Fit the threshold for one subject.
    pub fn fit(&self, records: &[HistoricalRecord], subject: &str) -> ThresholdFit {
        let subject_records: Vec<&HistoricalRecord> =
            records.iter().filter(|r| r.subject == subject).collect();

        let mut best_threshold = self.search.initial;
        let mut best_hits = 0usize;
        for candidate in self.search.candidates() {
            let hits = count_hits(&subject_records, candidate);
            if self.improves(hits, best_hits, candidate, best_threshold) {
                best_hits = hits;
                best_threshold = candidate;
            }
        }

        let data_points = subject_records.len();
        let hard = subject_records
            .iter()
            .filter(|r| predict(r, best_threshold) == Difficulty::Hard)
            .count();
        let fit = ThresholdFit {
            subject: subject.to_string(),
            threshold: best_threshold,
            accuracy: share(best_hits, data_points),
            data_points,
            hard_share: share(hard, data_points),
            easy_share: share(data_points - hard, data_points),
            fitted_at: Utc::now(),
        };

        debug!(
            subject,
            threshold = fit.threshold,
            accuracy = fit.accuracy,
            data_points,
            "fitted adaptive threshold"
        );
        fit
    }

    /// Fit every subject, keyed by subject name.
    pub fn fit_all<S: AsRef<str>>(
        &self,
        records: &[HistoricalRecord],
        subjects: &[S],
    ) -> BTreeMap<String, ThresholdFit> {
        subjects
            .iter()
            .map(|subject| {
                let fit = self.fit(records, subject.as_ref());
                (fit.subject.clone(), fit)
            })
            .collect()
    }

    fn improves(&self, hits: usize, best_hits: usize, candidate: f64, best: f64) -> bool {
        if hits != best_hits {
            return hits > best_hits;
        }
        // Ties only count once some record is predicted correctly.
        if hits == 0 {
            return false;
        }
        match self.search.tie_break {
            ThresholdTieBreak::Lowest => false,
            ThresholdTieBreak::Highest => true,
            ThresholdTieBreak::ClosestToDefault => {
                let initial = self.search.initial;
                (candidate - initial).abs() < (best - initial).abs()
            }
        }
    }
}

/// Fraction of `subject`'s records that `threshold` routes correctly.
///
/// Returns 0 when the subject has no records.
pub fn prediction_accuracy(records: &[HistoricalRecord], threshold: f64, subject: &str) -> f64 {
    let subject_records: Vec<&HistoricalRecord> =
        records.iter().filter(|r| r.subject == subject).collect();
    share(count_hits(&subject_records, threshold), subject_records.len())
}

fn predict(record: &HistoricalRecord, threshold: f64) -> Difficulty {
    Difficulty::assign(record.module1_ratio(), threshold)
}

fn count_hits(records: &[&HistoricalRecord], threshold: f64) -> usize {
    records
        .iter()
        .filter(|r| predict(r, threshold) == r.module2_difficulty_received)
        .count()
}

fn share(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}
