//! Domain types shared by the scoring engine.
//!
//! A response set is a caller-owned snapshot. Everything downstream
//! (calculator, impact analyzer, ranker) only ever borrows it or clones it.

use serde::{Deserialize, Serialize};

/// Which section of a subject test a response belongs to.
///
/// The static section is Module 1. Every other section is Module 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Static,
    Adaptive,
}

impl Section {
    /// Map a raw section label onto a section. Only `"Static"` is Module 1.
    pub fn from_label(label: &str) -> Self {
        if label == "Static" {
            Section::Static
        } else {
            Section::Adaptive
        }
    }

    pub fn module(self) -> Module {
        match self {
            Section::Static => Module::One,
            Section::Adaptive => Module::Two,
        }
    }
}

/// Exam module, serialized as its number (1 or 2).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Module {
    One,
    Two,
}

impl Module {
    pub fn number(self) -> u8 {
        match self {
            Module::One => 1,
            Module::Two => 2,
        }
    }
}

impl From<Module> for u8 {
    fn from(module: Module) -> Self {
        module.number()
    }
}

impl TryFrom<u8> for Module {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Module::One),
            2 => Ok(Module::Two),
            other => Err(format!("module must be 1 or 2, got {other}")),
        }
    }
}

impl std::fmt::Display for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Module {}", self.number())
    }
}

/// Remediation effort of a question, as tagged in the response data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Easy,
    Medium,
    Hard,
    #[default]
    Unknown,
}

impl Complexity {
    pub const ALL: [Complexity; 4] = [
        Complexity::Easy,
        Complexity::Medium,
        Complexity::Hard,
        Complexity::Unknown,
    ];

    /// Case-insensitive parse; anything unrecognized is `Unknown`.
    pub fn from_label(label: &str) -> Self {
        static LABELS: &[(&str, Complexity)] = &[
            ("easy", Complexity::Easy),
            ("medium", Complexity::Medium),
            ("hard", Complexity::Hard),
        ];

        let normalized = label.trim().to_ascii_lowercase();
        LABELS
            .iter()
            .find(|(name, _)| *name == normalized)
            .map(|(_, complexity)| *complexity)
            .unwrap_or(Complexity::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Easy => "easy",
            Complexity::Medium => "medium",
            Complexity::Hard => "hard",
            Complexity::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Module 2 difficulty tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Hard => "hard",
        }
    }

    /// `Hard` when the Module 1 accuracy reaches the threshold.
    pub fn assign(module1_accuracy: f64, threshold: f64) -> Self {
        if module1_accuracy >= threshold {
            Difficulty::Hard
        } else {
            Difficulty::Easy
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One answered question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub question_id: String,
    pub subject: String,
    pub section: Section,
    pub correct: bool,
    #[serde(default)]
    pub complexity: Complexity,
}

impl Response {
    pub fn new(
        question_id: impl Into<String>,
        subject: impl Into<String>,
        section: Section,
        correct: bool,
        complexity: Complexity,
    ) -> Self {
        Self {
            question_id: question_id.into(),
            subject: subject.into(),
            section,
            correct,
            complexity,
        }
    }

    pub fn module(&self) -> Module {
        self.section.module()
    }
}

/// A past test-taker's Module 1 result and the Module 2 tier they received.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalRecord {
    pub subject: String,
    pub module1_correct: u32,
    pub module1_total: u32,
    pub module2_difficulty_received: Difficulty,
}

impl HistoricalRecord {
    pub fn new(
        subject: impl Into<String>,
        module1_correct: u32,
        module1_total: u32,
        module2_difficulty_received: Difficulty,
    ) -> Self {
        Self {
            subject: subject.into(),
            module1_correct,
            module1_total,
            module2_difficulty_received,
        }
    }

    /// Module 1 accuracy; 0 when the record has no Module 1 questions.
    pub fn module1_ratio(&self) -> f64 {
        if self.module1_total == 0 {
            0.0
        } else {
            self.module1_correct as f64 / self.module1_total as f64
        }
    }
}

/// Subjects to evaluate: the configured ones first, then any subject that
/// only shows up in the responses, in first-appearance order.
pub fn subjects_in_scope(configured: &[String], responses: &[Response]) -> Vec<String> {
    let mut subjects: Vec<String> = Vec::with_capacity(configured.len());
    for subject in configured.iter().chain(responses.iter().map(|r| &r.subject)) {
        if !subjects.contains(subject) {
            subjects.push(subject.clone());
        }
    }
    subjects
}
