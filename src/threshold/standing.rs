//! Distance to the adaptive threshold.
//!
//! Tells a test-taker how many more Module 1 answers they need to reach the
//! hard tier, or how many Module 1 misses they could absorb and stay there.
//! Both counts use the same inclusive comparison as the score calculator.

use crate::core::Difficulty;
use crate::scoring::{module1_accuracy, SubjectScore};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AdaptiveStanding {
    /// On the easy tier; `questions_needed` more correct Module 1 answers
    /// reach the hard tier. `None` when even a perfect Module 1 falls short.
    Locked { questions_needed: Option<u32> },
    /// On the hard tier; up to `buffer` Module 1 answers could be lost
    /// without dropping to easy.
    Unlocked { buffer: u32 },
}

/// Standing for one subject, or `None` when it has no Module 1 responses.
///
/// ```
/// use dsat_whatif::threshold::{standing_for, AdaptiveStanding};
///
/// // 10 of 22 right against a 0.59 cutoff: 13 are needed, so 3 more.
/// assert_eq!(
///     standing_for(10, 22, 0.59),
///     Some(AdaptiveStanding::Locked { questions_needed: Some(3) })
/// );
/// ```
pub fn standing_for(module1_correct: u32, module1_total: u32, threshold: f64) -> Option<AdaptiveStanding> {
    if module1_total == 0 {
        return None;
    }

    let tier = |correct: u32| Difficulty::assign(module1_accuracy(correct, module1_total), threshold);

    let standing = match tier(module1_correct) {
        Difficulty::Easy => AdaptiveStanding::Locked {
            questions_needed: (1..=module1_total.saturating_sub(module1_correct))
                .find(|extra| tier(module1_correct + extra) == Difficulty::Hard),
        },
        Difficulty::Hard => AdaptiveStanding::Unlocked {
            buffer: (1..=module1_correct)
                .take_while(|lost| tier(module1_correct - lost) == Difficulty::Hard)
                .count() as u32,
        },
    };
    Some(standing)
}

/// Standing computed from a scored subject.
pub fn standing_for_score(score: &SubjectScore) -> Option<AdaptiveStanding> {
    standing_for(score.module1_correct, score.module1_total, score.threshold)
}
