//! Ranking of incorrect answers by counterfactual impact.
//!
//! Every incorrect response is evaluated against the same baseline and the
//! resulting entries are sorted by impact, highest first. The sort is stable,
//! so equal impacts keep the order the responses were given in. Selection
//! then keeps the first `top_n` entries of each subject.

use crate::core::{subjects_in_scope, Complexity, Module, Response};
use crate::priority::impact::ImpactAnalyzer;
use crate::scoring::ScoreOutcome;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, debug_span};

/// Default number of questions kept per subject.
pub const DEFAULT_TOP_N: usize = 5;

/// One incorrect answer and what correcting it is worth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactEntry {
    pub question_id: String,
    pub subject: String,
    pub module: Module,
    pub complexity: Complexity,
    pub impact_score: i64,
    pub direct_impact: i64,
    pub branch_bonus: i64,
    pub complexity_bonus: i64,
}

impl ImpactEntry {
    pub fn is_module1(&self) -> bool {
        self.module == Module::One
    }
}

pub struct ImpactRanker<'a> {
    analyzer: &'a ImpactAnalyzer<'a>,
    parallel: bool,
}

impl<'a> ImpactRanker<'a> {
    pub fn new(analyzer: &'a ImpactAnalyzer<'a>) -> Self {
        Self {
            analyzer,
            parallel: false,
        }
    }

    /// Evaluate counterfactuals on the rayon pool. Output order is unchanged.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Impact of every incorrect response, highest first.
    pub fn rank(&self, responses: &[Response], baseline: &ScoreOutcome) -> Vec<ImpactEntry> {
        let _span = debug_span!("rank_impacts", responses = responses.len()).entered();

        let evaluate = |response: &Response| self.entry_for(responses, response, baseline);
        let mut entries: Vec<ImpactEntry> = if self.parallel {
            responses
                .par_iter()
                .filter(|r| !r.correct)
                .map(evaluate)
                .collect()
        } else {
            responses.iter().filter(|r| !r.correct).map(evaluate).collect()
        };

        sort_by_impact(&mut entries);
        debug!(incorrect = entries.len(), parallel = self.parallel, "ranked impacts");
        entries
    }

    /// Ranked entries split by subject and cut to `top_n` each.
    ///
    /// Every subject in scope gets an entry, possibly empty.
    pub fn select_top(
        &self,
        responses: &[Response],
        baseline: &ScoreOutcome,
        top_n: usize,
    ) -> BTreeMap<String, Vec<ImpactEntry>> {
        let ranked = self.rank(responses, baseline);
        let subjects = subjects_in_scope(self.analyzer.calculator().subjects(), responses);
        partition_top(ranked, subjects.as_slice(), top_n)
    }

    fn entry_for(&self, responses: &[Response], response: &Response, baseline: &ScoreOutcome) -> ImpactEntry {
        let breakdown = self.analyzer.evaluate(
            responses,
            &response.question_id,
            baseline.total_score,
            &baseline.difficulties,
        );
        let (impact_score, direct_impact, branch_bonus, complexity_bonus) = breakdown
            .map(|b| (b.impact_score, b.direct_impact, b.branch_bonus, b.complexity_bonus))
            .unwrap_or_default();

        ImpactEntry {
            question_id: response.question_id.clone(),
            subject: response.subject.clone(),
            module: response.module(),
            complexity: response.complexity,
            impact_score,
            direct_impact,
            branch_bonus,
            complexity_bonus,
        }
    }
}

/// Stable sort, highest impact first.
pub fn sort_by_impact(entries: &mut [ImpactEntry]) {
    entries.sort_by(|a, b| b.impact_score.cmp(&a.impact_score));
}

/// Split ranked entries by subject, keeping at most `top_n` per subject.
pub fn partition_top<S: AsRef<str>>(
    ranked: Vec<ImpactEntry>,
    subjects: &[S],
    top_n: usize,
) -> BTreeMap<String, Vec<ImpactEntry>> {
    let mut selected: BTreeMap<String, Vec<ImpactEntry>> = subjects
        .iter()
        .map(|subject| (subject.as_ref().to_string(), Vec::new()))
        .collect();

    for entry in ranked {
        if let Some(slice) = selected.get_mut(&entry.subject) {
            if slice.len() < top_n {
                slice.push(entry);
            }
        }
    }
    selected
}
