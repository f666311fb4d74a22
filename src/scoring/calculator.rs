//! Exam score reproduction.
//!
//! For each subject the Module 1 accuracy picks the Module 2 tier, and the
//! raw score (every correct answer in both modules) is converted on that
//! tier. The total is the sum over subjects.
//!
//! The calculator is the oracle for every counterfactual, so it has to stay
//! a pure function of its inputs.

use crate::core::{subjects_in_scope, Difficulty, Module, Response};
use crate::scoring::table::ScoringTable;
use crate::threshold::AdaptiveThresholds;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-subject result of a scoring pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubjectScore {
    pub raw_score: u32,
    pub module1_correct: u32,
    pub module1_total: u32,
    pub module1_accuracy: f64,
    pub threshold: f64,
    pub difficulty: Difficulty,
    pub scaled_score: u32,
}

/// Result of scoring a response set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreOutcome {
    pub total_score: u32,
    pub difficulties: BTreeMap<String, Difficulty>,
    pub subjects: BTreeMap<String, SubjectScore>,
}

impl ScoreOutcome {
    pub fn difficulty(&self, subject: &str) -> Option<Difficulty> {
        self.difficulties.get(subject).copied()
    }
}

#[derive(Default)]
struct Tally {
    module1_correct: u32,
    module1_total: u32,
    total_correct: u32,
}

pub struct ScoreCalculator<'a> {
    table: &'a ScoringTable,
    subjects: &'a [String],
}

impl<'a> ScoreCalculator<'a> {
    /// `subjects` are the configured subjects; subjects that only appear in
    /// a response set are scored too, after the configured ones.
    pub fn new(table: &'a ScoringTable, subjects: &'a [String]) -> Self {
        Self { table, subjects }
    }

    pub fn subjects(&self) -> &[String] {
        self.subjects
    }

    pub fn compute(&self, responses: &[Response], thresholds: &AdaptiveThresholds) -> ScoreOutcome {
        let subjects = subjects_in_scope(self.subjects, responses);
        let mut tallies: BTreeMap<&str, Tally> = subjects
            .iter()
            .map(|subject| (subject.as_str(), Tally::default()))
            .collect();

        for response in responses {
            let Some(tally) = tallies.get_mut(response.subject.as_str()) else {
                continue;
            };
            if response.module() == Module::One {
                tally.module1_total += 1;
                if response.correct {
                    tally.module1_correct += 1;
                }
            }
            if response.correct {
                tally.total_correct += 1;
            }
        }

        let mut outcome = ScoreOutcome {
            total_score: 0,
            difficulties: BTreeMap::new(),
            subjects: BTreeMap::new(),
        };

        for subject in &subjects {
            let tally = &tallies[subject.as_str()];
            let score = self.score_subject(subject, tally, thresholds.get(subject));
            outcome.total_score += score.scaled_score;
            outcome.difficulties.insert(subject.clone(), score.difficulty);
            outcome.subjects.insert(subject.clone(), score);
        }

        outcome
    }

    fn score_subject(&self, subject: &str, tally: &Tally, threshold: f64) -> SubjectScore {
        let module1_accuracy = module1_accuracy(tally.module1_correct, tally.module1_total);
        let difficulty = Difficulty::assign(module1_accuracy, threshold);

        SubjectScore {
            raw_score: tally.total_correct,
            module1_correct: tally.module1_correct,
            module1_total: tally.module1_total,
            module1_accuracy,
            threshold,
            difficulty,
            scaled_score: self.table.lookup(subject, tally.total_correct, difficulty),
        }
    }
}

/// Correct over total, or 0 when there is nothing to divide by.
pub fn module1_accuracy(correct: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        correct as f64 / total as f64
    }
}
