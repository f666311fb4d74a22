//! Study insights derived from a recommendation report.
//!
//! Everything here is arithmetic over numbers the calculator and ranker
//! already produced. Nothing is rescored.

use crate::core::{Complexity, Difficulty, Module};
use crate::priority::ranking::{sort_by_impact, ImpactEntry};
use crate::priority::recommendations::RecommendationReport;
use crate::scoring::{ScoreOutcome, SubjectScore};
use crate::threshold::{standing_for_score, AdaptiveStanding};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Questions kept per subject when building the action plan.
const ACTION_PLAN_PER_SUBJECT: usize = 2;
/// Length of the merged action plan.
const ACTION_PLAN_LEN: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierBreakdown {
    pub count: usize,
    pub impact: i64,
}

impl TierBreakdown {
    fn add(&mut self, impact: i64) {
        self.count += 1;
        self.impact += impact;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectInsights {
    pub current_score: u32,
    pub potential_score: i64,
    pub max_gain: i64,
    pub threshold: f64,
    pub difficulty: Difficulty,
    pub standing: Option<AdaptiveStanding>,
    pub complexity: BTreeMap<Complexity, TierBreakdown>,
    pub module1: TierBreakdown,
    pub module2: TierBreakdown,
    /// Subject score after fixing the first k selected questions, k = 1..=n.
    pub progression: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    pub subject: String,
    pub question_id: String,
    pub module: Module,
    pub complexity: Complexity,
    pub impact_score: i64,
}

impl From<&ImpactEntry> for ActionItem {
    fn from(entry: &ImpactEntry) -> Self {
        Self {
            subject: entry.subject.clone(),
            question_id: entry.question_id.clone(),
            module: entry.module,
            complexity: entry.complexity,
            impact_score: entry.impact_score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyInsights {
    pub subjects: BTreeMap<String, SubjectInsights>,
    pub total_current: u32,
    pub total_potential: i64,
    pub total_gain: i64,
    pub action_plan: Vec<ActionItem>,
}

pub fn derive_insights(report: &RecommendationReport, baseline: &ScoreOutcome) -> StudyInsights {
    let subjects: BTreeMap<String, SubjectInsights> = report
        .recommendations
        .iter()
        .filter_map(|(subject, rec)| {
            let score = baseline.subjects.get(subject)?;
            Some((subject.clone(), subject_insights(&rec.high_impact_questions, score)))
        })
        .collect();

    let total_gain = report.total_potential_gain();
    StudyInsights {
        subjects,
        total_current: report.current_total_score,
        total_potential: i64::from(report.current_total_score) + total_gain,
        total_gain,
        action_plan: action_plan(report),
    }
}

fn subject_insights(entries: &[ImpactEntry], score: &SubjectScore) -> SubjectInsights {
    let mut complexity: BTreeMap<Complexity, TierBreakdown> = Complexity::ALL
        .iter()
        .map(|c| (*c, TierBreakdown::default()))
        .collect();
    let mut module1 = TierBreakdown::default();
    let mut module2 = TierBreakdown::default();

    for entry in entries {
        complexity.entry(entry.complexity).or_default().add(entry.impact_score);
        match entry.module {
            Module::One => module1.add(entry.impact_score),
            Module::Two => module2.add(entry.impact_score),
        }
    }

    let current = i64::from(score.scaled_score);
    let progression: Vec<i64> = entries
        .iter()
        .scan(current, |running, entry| {
            *running += entry.impact_score;
            Some(*running)
        })
        .collect();
    let max_gain: i64 = entries.iter().map(|e| e.impact_score).sum();

    SubjectInsights {
        current_score: score.scaled_score,
        potential_score: current + max_gain,
        max_gain,
        threshold: score.threshold,
        difficulty: score.difficulty,
        standing: standing_for_score(score),
        complexity,
        module1,
        module2,
        progression,
    }
}

fn action_plan(report: &RecommendationReport) -> Vec<ActionItem> {
    let mut merged: Vec<ImpactEntry> = report
        .recommendations
        .values()
        .flat_map(|rec| rec.high_impact_questions.iter().take(ACTION_PLAN_PER_SUBJECT).cloned())
        .collect();
    sort_by_impact(&mut merged);
    merged.iter().take(ACTION_PLAN_LEN).map(ActionItem::from).collect()
}
