use serde::{Deserialize, Serialize};

use crate::scoring::DEFAULT_SCALED_SCORE;

/// `[scoring]`: fallback for lookups the table cannot resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_scaled_score")]
    pub default_scaled_score: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            default_scaled_score: default_scaled_score(),
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.default_scaled_score == 0 {
            return Err("scoring.default_scaled_score must be positive".to_string());
        }
        Ok(())
    }
}

fn default_scaled_score() -> u32 {
    DEFAULT_SCALED_SCORE
}

/// `[exam]`: subjects scored even when a response set omits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamConfig {
    #[serde(default = "default_subjects")]
    pub subjects: Vec<String>,
}

impl Default for ExamConfig {
    fn default() -> Self {
        Self {
            subjects: default_subjects(),
        }
    }
}

impl ExamConfig {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(blank) = self.subjects.iter().position(|s| s.trim().is_empty()) {
            return Err(format!("exam.subjects[{blank}] is blank"));
        }
        let mut seen = std::collections::BTreeSet::new();
        match self.subjects.iter().find(|s| !seen.insert(s.as_str())) {
            Some(duplicate) => Err(format!("exam.subjects lists '{duplicate}' twice")),
            None => Ok(()),
        }
    }
}

pub fn default_subjects() -> Vec<String> {
    vec!["Math".to_string(), "Reading and Writing".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_subjects_are_rejected() {
        let exam = ExamConfig {
            subjects: vec!["Math".into(), "Math".into()],
        };
        assert!(exam.validate().unwrap_err().contains("twice"));
    }

    #[test]
    fn blank_subject_is_rejected() {
        let exam = ExamConfig {
            subjects: vec!["Math".into(), "  ".into()],
        };
        assert!(exam.validate().is_err());
    }

    #[test]
    fn zero_fallback_score_is_rejected() {
        assert!(ScoringConfig { default_scaled_score: 0 }.validate().is_err());
        assert!(ScoringConfig::default().validate().is_ok());
    }
}
