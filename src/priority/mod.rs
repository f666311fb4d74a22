//! Prioritization of incorrect answers: counterfactual impact, ranking,
//! per-subject recommendations, and the insights derived from them.

pub mod impact;
pub mod insights;
pub mod ranking;
pub mod recommendations;

pub use impact::{with_question_corrected, ImpactAnalyzer, ImpactBreakdown, ImpactWeights};
pub use insights::{derive_insights, ActionItem, StudyInsights, SubjectInsights, TierBreakdown};
pub use ranking::{partition_top, sort_by_impact, ImpactEntry, ImpactRanker, DEFAULT_TOP_N};
pub use recommendations::{RecommendationReport, SubjectRecommendation, SubjectSummary};
