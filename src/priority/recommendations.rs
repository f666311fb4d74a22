//! Per-subject recommendation report built from ranked impact entries.

use crate::core::Difficulty;
use crate::priority::ranking::ImpactEntry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectRecommendation {
    pub high_impact_questions: Vec<ImpactEntry>,
    pub total_potential_gain: i64,
    pub module1_priority_count: usize,
}

impl SubjectRecommendation {
    pub fn from_entries(entries: Vec<ImpactEntry>) -> Self {
        let total_potential_gain = entries.iter().map(|e| e.impact_score).sum();
        let module1_priority_count = entries.iter().filter(|e| e.is_module1()).count();
        Self {
            high_impact_questions: entries,
            total_potential_gain,
            module1_priority_count,
        }
    }

    /// Summary statistics, or `None` for a subject with nothing to fix.
    pub fn summary(&self) -> Option<SubjectSummary> {
        let count = self.high_impact_questions.len();
        if count == 0 {
            return None;
        }
        let highest_single_impact = self
            .high_impact_questions
            .iter()
            .map(|e| e.impact_score)
            .max()
            .unwrap_or_default();

        Some(SubjectSummary {
            average_impact_per_question: self.total_potential_gain as f64 / count as f64,
            highest_single_impact,
            focus_on_module1: self.module1_priority_count > count / 2,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectSummary {
    pub average_impact_per_question: f64,
    pub highest_single_impact: i64,
    /// More than half of the selected questions are Module 1.
    pub focus_on_module1: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationReport {
    pub current_total_score: u32,
    pub current_module2_difficulties: BTreeMap<String, Difficulty>,
    pub recommendations: BTreeMap<String, SubjectRecommendation>,
    pub summary: BTreeMap<String, SubjectSummary>,
}

impl RecommendationReport {
    pub fn build(
        current_total_score: u32,
        current_module2_difficulties: BTreeMap<String, Difficulty>,
        selected: BTreeMap<String, Vec<ImpactEntry>>,
    ) -> Self {
        let recommendations: BTreeMap<String, SubjectRecommendation> = selected
            .into_iter()
            .map(|(subject, entries)| (subject, SubjectRecommendation::from_entries(entries)))
            .collect();
        let summary = recommendations
            .iter()
            .filter_map(|(subject, rec)| rec.summary().map(|s| (subject.clone(), s)))
            .collect();

        Self {
            current_total_score,
            current_module2_difficulties,
            recommendations,
            summary,
        }
    }

    pub fn total_potential_gain(&self) -> i64 {
        self.recommendations.values().map(|r| r.total_potential_gain).sum()
    }

    pub fn question_count(&self) -> usize {
        self.recommendations
            .values()
            .map(|r| r.high_impact_questions.len())
            .sum()
    }
}
