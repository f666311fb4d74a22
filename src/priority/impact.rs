//! # Counterfactual Impact
//!
//! Estimates how much correcting one wrong answer is worth by rescoring a
//! copy of the response set with that answer marked correct.
//!
//! ## Impact Formula
//!
//! `impact = direct + branch + complexity`
//!
//! - **direct**: new total minus baseline total, straight from the calculator
//! - **branch**: flat bonus (120) when a Module 1 correction moves its
//!   subject to a different Module 2 tier. Module 2 corrections never earn it.
//! - **complexity**: effort bonus that favours cheap fixes among otherwise
//!   equal questions (easy 5, medium 2, hard and unknown 0)
//!
//! The rescoring is a full pass over the copied set. Response sets are small
//! (tens to low hundreds), so there is no incremental bookkeeping.

use crate::core::{Complexity, Difficulty, Module, Response};
use crate::scoring::ScoreCalculator;
use crate::threshold::AdaptiveThresholds;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bonus weights layered on top of the scaled-score delta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactWeights {
    #[serde(default = "default_branch_bonus")]
    pub branch_bonus: i64,
    #[serde(default = "default_easy_bonus")]
    pub easy_bonus: i64,
    #[serde(default = "default_medium_bonus")]
    pub medium_bonus: i64,
    #[serde(default)]
    pub hard_bonus: i64,
    #[serde(default)]
    pub unknown_bonus: i64,
}

pub fn default_branch_bonus() -> i64 {
    120
}

pub fn default_easy_bonus() -> i64 {
    5
}

pub fn default_medium_bonus() -> i64 {
    2
}

impl Default for ImpactWeights {
    fn default() -> Self {
        Self {
            branch_bonus: default_branch_bonus(),
            easy_bonus: default_easy_bonus(),
            medium_bonus: default_medium_bonus(),
            hard_bonus: 0,
            unknown_bonus: 0,
        }
    }
}

impl ImpactWeights {
    pub fn complexity_bonus(&self, complexity: Complexity) -> i64 {
        match complexity {
            Complexity::Easy => self.easy_bonus,
            Complexity::Medium => self.medium_bonus,
            Complexity::Hard => self.hard_bonus,
            Complexity::Unknown => self.unknown_bonus,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        let bonuses = [
            ("branch_bonus", self.branch_bonus),
            ("easy_bonus", self.easy_bonus),
            ("medium_bonus", self.medium_bonus),
            ("hard_bonus", self.hard_bonus),
            ("unknown_bonus", self.unknown_bonus),
        ];
        match bonuses.iter().find(|(_, value)| *value < 0) {
            Some((name, value)) => Err(format!("{name} must not be negative, got {value}")),
            None => Ok(()),
        }
    }
}

/// How an impact score was put together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactBreakdown {
    pub direct_impact: i64,
    pub branch_bonus: i64,
    pub complexity_bonus: i64,
    pub impact_score: i64,
    pub difficulty_before: Option<Difficulty>,
    pub difficulty_after: Option<Difficulty>,
}

pub struct ImpactAnalyzer<'a> {
    calculator: &'a ScoreCalculator<'a>,
    thresholds: &'a AdaptiveThresholds,
    weights: &'a ImpactWeights,
}

impl<'a> ImpactAnalyzer<'a> {
    pub fn new(
        calculator: &'a ScoreCalculator<'a>,
        thresholds: &'a AdaptiveThresholds,
        weights: &'a ImpactWeights,
    ) -> Self {
        Self {
            calculator,
            thresholds,
            weights,
        }
    }

    pub fn calculator(&self) -> &ScoreCalculator<'a> {
        self.calculator
    }

    /// Impact of correcting `question_id`; 0 when no response has that id.
    pub fn impact(
        &self,
        baseline: &[Response],
        question_id: &str,
        baseline_total: u32,
        baseline_difficulties: &BTreeMap<String, Difficulty>,
    ) -> i64 {
        self.evaluate(baseline, question_id, baseline_total, baseline_difficulties)
            .map(|breakdown| breakdown.impact_score)
            .unwrap_or(0)
    }

    /// Full breakdown for correcting `question_id`, or `None` when no
    /// response has that id.
    pub fn evaluate(
        &self,
        baseline: &[Response],
        question_id: &str,
        baseline_total: u32,
        baseline_difficulties: &BTreeMap<String, Difficulty>,
    ) -> Option<ImpactBreakdown> {
        let target = baseline.iter().find(|r| r.question_id == question_id)?;
        let modified = with_question_corrected(baseline, question_id);
        let outcome = self.calculator.compute(&modified, self.thresholds);

        let direct_impact = i64::from(outcome.total_score) - i64::from(baseline_total);
        let difficulty_before = baseline_difficulties.get(&target.subject).copied();
        let difficulty_after = outcome.difficulty(&target.subject);
        let branch_bonus =
            if target.module() == Module::One && difficulty_before != difficulty_after {
                self.weights.branch_bonus
            } else {
                0
            };
        let complexity_bonus = self.weights.complexity_bonus(target.complexity);

        Some(ImpactBreakdown {
            direct_impact,
            branch_bonus,
            complexity_bonus,
            impact_score: direct_impact + branch_bonus + complexity_bonus,
            difficulty_before,
            difficulty_after,
        })
    }
}

/// Independent copy of `responses` with the matching answer marked correct.
pub fn with_question_corrected(responses: &[Response], question_id: &str) -> Vec<Response> {
    responses
        .iter()
        .map(|response| {
            let mut copy = response.clone();
            if copy.question_id == question_id {
                copy.correct = true;
            }
            copy
        })
        .collect()
}
