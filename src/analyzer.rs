//! The what-if analyzer: one scoring table, one set of thresholds, and the
//! operations built on top of them.
//!
//! Thresholds are held on the analyzer and only change through
//! [`WhatIfAnalyzer::fit_thresholds`] or [`WhatIfAnalyzer::set_threshold`].
//! Every scoring operation reads them and leaves them untouched.

use crate::config::WhatIfConfig;
use crate::core::{Difficulty, HistoricalRecord, Response};
use crate::priority::{
    derive_insights, ImpactAnalyzer, ImpactEntry, ImpactRanker, ImpactWeights,
    RecommendationReport, StudyInsights,
};
use crate::scoring::{ScoreCalculator, ScoreOutcome, ScoringTable};
use crate::threshold::{AdaptiveThresholds, ThresholdFit, ThresholdFitter};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, info_span};

/// Everything the report writers need for one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub history_source: Option<String>,
    pub thresholds: BTreeMap<String, f64>,
    pub fits: BTreeMap<String, ThresholdFit>,
    pub score: ScoreOutcome,
    pub recommendations: RecommendationReport,
    pub insights: StudyInsights,
}

/// Fit diagnostics for the `tune` report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitReport {
    pub history_source: String,
    pub fits: BTreeMap<String, ThresholdFit>,
}

pub struct WhatIfAnalyzer {
    table: ScoringTable,
    subjects: Vec<String>,
    thresholds: AdaptiveThresholds,
    fitter: ThresholdFitter,
    weights: ImpactWeights,
    fits: BTreeMap<String, ThresholdFit>,
    parallel: bool,
}

impl WhatIfAnalyzer {
    /// Analyzer with default settings; every subject starts at 0.5.
    pub fn new(table: ScoringTable) -> Self {
        Self::from_config(table, &WhatIfConfig::default())
    }

    pub fn from_config(table: ScoringTable, config: &WhatIfConfig) -> Self {
        let subjects = config.subjects();
        let search = config.threshold_search();
        Self {
            table: table.with_default_score(config.default_scaled_score()),
            thresholds: AdaptiveThresholds::for_subjects(subjects.as_slice(), search.initial),
            subjects,
            fitter: ThresholdFitter::new(search),
            weights: config.impact_weights(),
            fits: BTreeMap::new(),
            parallel: config.parallel(),
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn thresholds(&self) -> &AdaptiveThresholds {
        &self.thresholds
    }

    pub fn set_threshold(&mut self, subject: impl Into<String>, threshold: f64) {
        self.thresholds.set(subject, threshold);
    }

    /// Diagnostics from the last fit, empty until one has run.
    pub fn fits(&self) -> &BTreeMap<String, ThresholdFit> {
        &self.fits
    }

    /// Fit and store a threshold for each configured subject.
    pub fn fit_thresholds(&mut self, records: &[HistoricalRecord]) -> BTreeMap<String, f64> {
        let _span = info_span!("fit_thresholds", records = records.len()).entered();

        let fits = self.fitter.fit_all(records, self.subjects.as_slice());
        for fit in fits.values() {
            self.thresholds.set(fit.subject.clone(), fit.threshold);
            info!(
                subject = %fit.subject,
                threshold = fit.threshold,
                accuracy = fit.accuracy,
                "threshold set"
            );
        }
        self.fits = fits;

        self.fits
            .iter()
            .map(|(subject, fit)| (subject.clone(), fit.threshold))
            .collect()
    }

    pub fn fit_report(&self, history_source: impl Into<String>) -> FitReport {
        FitReport {
            history_source: history_source.into(),
            fits: self.fits.clone(),
        }
    }

    pub fn calculate_current_score(&self, responses: &[Response]) -> ScoreOutcome {
        ScoreCalculator::new(&self.table, &self.subjects).compute(responses, &self.thresholds)
    }

    pub fn impact_score(
        &self,
        responses: &[Response],
        question_id: &str,
        baseline_total: u32,
        baseline_difficulties: &BTreeMap<String, Difficulty>,
    ) -> i64 {
        let calculator = ScoreCalculator::new(&self.table, &self.subjects);
        ImpactAnalyzer::new(&calculator, &self.thresholds, &self.weights).impact(
            responses,
            question_id,
            baseline_total,
            baseline_difficulties,
        )
    }

    /// Top `top_n` incorrect answers per subject, highest impact first.
    pub fn identify_high_impact_questions(
        &self,
        responses: &[Response],
        top_n: usize,
    ) -> BTreeMap<String, Vec<ImpactEntry>> {
        let baseline = self.calculate_current_score(responses);
        self.select_top(responses, &baseline, top_n)
    }

    pub fn generate_recommendations(&self, responses: &[Response], top_n: usize) -> RecommendationReport {
        let baseline = self.calculate_current_score(responses);
        self.recommendations_from(responses, &baseline, top_n)
    }

    pub fn insights(&self, responses: &[Response], top_n: usize) -> StudyInsights {
        let baseline = self.calculate_current_score(responses);
        let report = self.recommendations_from(responses, &baseline, top_n);
        derive_insights(&report, &baseline)
    }

    /// Score, rank, and summarize one response set.
    pub fn analyze(&self, responses: &[Response], top_n: usize) -> AnalysisReport {
        let _span = info_span!("analyze", responses = responses.len(), top_n).entered();

        let baseline = self.calculate_current_score(responses);
        let recommendations = self.recommendations_from(responses, &baseline, top_n);
        let insights = derive_insights(&recommendations, &baseline);
        let thresholds = baseline
            .subjects
            .iter()
            .map(|(subject, score)| (subject.clone(), score.threshold))
            .collect();

        info!(
            current = baseline.total_score,
            potential = insights.total_potential,
            questions = recommendations.question_count(),
            "analysis complete"
        );

        AnalysisReport {
            generated_at: Utc::now(),
            history_source: None,
            thresholds,
            fits: self.fits.clone(),
            score: baseline,
            recommendations,
            insights,
        }
    }

    fn select_top(
        &self,
        responses: &[Response],
        baseline: &ScoreOutcome,
        top_n: usize,
    ) -> BTreeMap<String, Vec<ImpactEntry>> {
        let calculator = ScoreCalculator::new(&self.table, &self.subjects);
        let analyzer = ImpactAnalyzer::new(&calculator, &self.thresholds, &self.weights);
        ImpactRanker::new(&analyzer)
            .with_parallel(self.parallel)
            .select_top(responses, baseline, top_n)
    }

    fn recommendations_from(
        &self,
        responses: &[Response],
        baseline: &ScoreOutcome,
        top_n: usize,
    ) -> RecommendationReport {
        let selected = self.select_top(responses, baseline, top_n);
        RecommendationReport::build(baseline.total_score, baseline.difficulties.clone(), selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Complexity, Section};
    use crate::scoring::{ScoreRow, SubjectScale};

    fn table() -> ScoringTable {
        let rows: Vec<ScoreRow> = (0..=6)
            .map(|raw| ScoreRow::new(raw, 200 + raw * 40, 200 + raw * 50))
            .collect();
        ScoringTable::new(vec![
            SubjectScale::new("Math", rows.clone()),
            SubjectScale::new("Reading and Writing", rows),
        ])
    }

    fn responses() -> Vec<Response> {
        vec![
            Response::new("m1", "Math", Section::Static, true, Complexity::Medium),
            Response::new("m2", "Math", Section::Static, false, Complexity::Easy),
            Response::new("m3", "Math", Section::Adaptive, false, Complexity::Hard),
            Response::new("r1", "Reading and Writing", Section::Static, true, Complexity::Easy),
            Response::new("r2", "Reading and Writing", Section::Adaptive, false, Complexity::Medium),
        ]
    }

    #[test]
    fn starts_with_default_threshold_per_subject() {
        let analyzer = WhatIfAnalyzer::new(table());
        assert_eq!(analyzer.thresholds().get("Math"), 0.5);
        assert_eq!(analyzer.thresholds().get("Reading and Writing"), 0.5);
        assert!(analyzer.fits().is_empty());
    }

    #[test]
    fn fitting_updates_thresholds_used_for_scoring() {
        let mut analyzer = WhatIfAnalyzer::new(table());
        let records = vec![
            HistoricalRecord::new("Math", 4, 10, Difficulty::Easy),
            HistoricalRecord::new("Math", 6, 10, Difficulty::Hard),
            HistoricalRecord::new("Math", 7, 10, Difficulty::Hard),
        ];

        let fitted = analyzer.fit_thresholds(&records);

        assert_eq!(fitted["Math"], 0.41);
        // no records: keeps the default
        assert_eq!(fitted["Reading and Writing"], 0.5);
        assert_eq!(analyzer.thresholds().get("Math"), 0.41);
        assert_eq!(analyzer.fits()["Reading and Writing"].accuracy, 0.0);
    }

    #[test]
    fn recommendations_report_current_state_and_gains() {
        let analyzer = WhatIfAnalyzer::new(table());
        let responses = responses();

        let report = analyzer.generate_recommendations(&responses, 5);

        // Math: 1/2 = 0.5 -> hard, raw 1 -> 250; R&W: 1/1 -> hard, raw 1 -> 250
        assert_eq!(report.current_total_score, 500);
        assert_eq!(report.current_module2_difficulties["Math"], Difficulty::Hard);

        let math = &report.recommendations["Math"];
        let ids: Vec<&str> = math.high_impact_questions.iter().map(|e| e.question_id.as_str()).collect();
        // m2: raw 2 hard = 300, +50 +5; m3: +50 +0
        assert_eq!(ids, vec!["m2", "m3"]);
        assert_eq!(math.total_potential_gain, 105);
        assert_eq!(math.module1_priority_count, 1);
    }

    #[test]
    fn top_n_limits_each_subject() {
        let analyzer = WhatIfAnalyzer::new(table());
        let selected = analyzer.identify_high_impact_questions(&responses(), 1);

        assert_eq!(selected["Math"].len(), 1);
        assert_eq!(selected["Reading and Writing"].len(), 1);
    }

    #[test]
    fn scoring_does_not_mutate_inputs() {
        let analyzer = WhatIfAnalyzer::new(table());
        let responses = responses();
        let before = responses.clone();
        let thresholds_before = analyzer.thresholds().clone();

        let _ = analyzer.analyze(&responses, 5);

        assert_eq!(responses, before);
        assert_eq!(analyzer.thresholds(), &thresholds_before);
    }

    #[test]
    fn analyze_matches_individual_operations() {
        let analyzer = WhatIfAnalyzer::new(table());
        let responses = responses();

        let report = analyzer.analyze(&responses, 5);

        assert_eq!(report.score, analyzer.calculate_current_score(&responses));
        assert_eq!(report.recommendations, analyzer.generate_recommendations(&responses, 5));
        assert_eq!(report.insights.total_gain, report.recommendations.total_potential_gain());
        assert_eq!(report.thresholds["Math"], 0.5);
    }
}
