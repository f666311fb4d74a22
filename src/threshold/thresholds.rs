use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Threshold used for any subject that has not been fitted.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Module 1 accuracy cutoffs, one per subject.
///
/// Subjects without an explicit entry read the default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveThresholds {
    values: BTreeMap<String, f64>,
    default: f64,
}

impl Default for AdaptiveThresholds {
    fn default() -> Self {
        Self::uniform(DEFAULT_THRESHOLD)
    }
}

impl AdaptiveThresholds {
    /// No per-subject entries; every subject reads `default`.
    pub fn uniform(default: f64) -> Self {
        Self {
            values: BTreeMap::new(),
            default,
        }
    }

    /// One entry per subject, all set to `default`.
    pub fn for_subjects<S: AsRef<str>>(subjects: &[S], default: f64) -> Self {
        Self {
            values: subjects
                .iter()
                .map(|subject| (subject.as_ref().to_string(), default))
                .collect(),
            default,
        }
    }

    pub fn get(&self, subject: &str) -> f64 {
        self.values.get(subject).copied().unwrap_or(self.default)
    }

    pub fn set(&mut self, subject: impl Into<String>, threshold: f64) {
        self.values.insert(subject.into(), threshold);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_subject_reads_default() {
        let thresholds = AdaptiveThresholds::default();
        assert_eq!(thresholds.get("Math"), 0.5);
    }

    #[test]
    fn set_overrides_one_subject() {
        let mut thresholds = AdaptiveThresholds::for_subjects(&["Math", "Reading and Writing"][..], 0.5);
        thresholds.set("Math", 0.59);

        assert_eq!(thresholds.get("Math"), 0.59);
        assert_eq!(thresholds.get("Reading and Writing"), 0.5);
        assert_eq!(thresholds.get("Physics"), 0.5);
    }
}
