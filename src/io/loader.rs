//! JSON input parsing.
//!
//! The raw shapes below mirror the files the exam platform exports. They
//! are converted into core types here so nothing past this module deals
//! with untyped labels, object-or-string subjects, or the `compleixty`
//! spelling some exports carry.

use crate::core::{Complexity, HistoricalRecord, Response, Section};
use crate::errors::{Result, WhatIfError};
use crate::scoring::{ScoreRow, ScoringTable, SubjectScale};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

#[derive(Deserialize)]
struct RawScale {
    key: String,
    map: Vec<ScoreRow>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSubject {
    Name(String),
    Object { name: String },
}

impl RawSubject {
    fn into_name(self) -> String {
        match self {
            RawSubject::Name(name) | RawSubject::Object { name } => name,
        }
    }
}

#[derive(Deserialize)]
struct RawResponse {
    question_id: String,
    subject: RawSubject,
    section: String,
    correct: bool,
    #[serde(default, alias = "compleixty")]
    complexity: Option<String>,
}

impl From<RawResponse> for Response {
    fn from(raw: RawResponse) -> Self {
        Response {
            question_id: raw.question_id,
            subject: raw.subject.into_name(),
            section: Section::from_label(&raw.section),
            correct: raw.correct,
            complexity: raw
                .complexity
                .as_deref()
                .map(Complexity::from_label)
                .unwrap_or_default(),
        }
    }
}

fn parse_json<T: DeserializeOwned>(contents: &str, path: Option<&Path>) -> Result<T> {
    serde_json::from_str(contents).map_err(|e| WhatIfError::json(e, path.map(Path::to_path_buf)))
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| WhatIfError::io_with_path(e, PathBuf::from(path)))
}

pub fn parse_scoring_table(contents: &str, path: Option<&Path>) -> Result<ScoringTable> {
    let raw: Vec<RawScale> = parse_json(contents, path)?;
    let mut scales = Vec::with_capacity(raw.len());
    for scale in raw {
        let mut seen = BTreeSet::new();
        if let Some(dup) = scale.map.iter().find(|row| !seen.insert(row.raw)) {
            return Err(WhatIfError::validation(format!(
                "scoring table for '{}' lists raw score {} more than once",
                scale.key, dup.raw
            )));
        }
        scales.push(SubjectScale::new(scale.key, scale.map));
    }
    Ok(ScoringTable::new(scales))
}

pub fn load_scoring_table(path: &Path) -> Result<ScoringTable> {
    parse_scoring_table(&read(path)?, Some(path))
}

pub fn parse_responses(contents: &str, path: Option<&Path>) -> Result<Vec<Response>> {
    let raw: Vec<RawResponse> = parse_json(contents, path)?;
    let responses: Vec<Response> = raw.into_iter().map(Response::from).collect();

    let mut seen = BTreeSet::new();
    if let Some(dup) = responses.iter().find(|r| !seen.insert(r.question_id.as_str())) {
        return Err(WhatIfError::validation(format!(
            "question id '{}' appears more than once",
            dup.question_id
        )));
    }
    Ok(responses)
}

pub fn load_responses(path: &Path) -> Result<Vec<Response>> {
    parse_responses(&read(path)?, Some(path))
}

pub fn parse_historical(contents: &str, path: Option<&Path>) -> Result<Vec<HistoricalRecord>> {
    parse_json(contents, path)
}

pub fn load_historical(path: &Path) -> Result<Vec<HistoricalRecord>> {
    parse_historical(&read(path)?, Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Difficulty, Module};
    use indoc::indoc;

    #[test]
    fn scoring_rows_are_sorted_on_load() {
        let table = parse_scoring_table(
            indoc! {r#"
                [{"key": "Math", "map": [
                    {"raw": 2, "easy": 300, "hard": 320},
                    {"raw": 0, "easy": 200, "hard": 200},
                    {"raw": 1, "easy": 250, "hard": 260}
                ]}]
            "#},
            None,
        )
        .unwrap();

        let raws: Vec<u32> = table.scale("Math").unwrap().rows.iter().map(|r| r.raw).collect();
        assert_eq!(raws, vec![0, 1, 2]);
        assert_eq!(table.lookup("Math", 1, Difficulty::Hard), 260);
    }

    #[test]
    fn duplicate_raw_scores_are_rejected() {
        let err = parse_scoring_table(
            r#"[{"key": "Math", "map": [{"raw": 1, "easy": 1, "hard": 1}, {"raw": 1, "easy": 2, "hard": 2}]}]"#,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, WhatIfError::Validation(_)));
    }

    #[test]
    fn responses_accept_both_subject_shapes_and_the_misspelled_key() {
        let responses = parse_responses(
            indoc! {r#"
                [
                  {"question_id": "q1", "subject": {"name": "Math"}, "section": "Static",
                   "correct": false, "compleixty": "Easy"},
                  {"question_id": "q2", "subject": "Reading and Writing", "section": "hard",
                   "correct": true, "complexity": "MEDIUM"},
                  {"question_id": "q3", "subject": "Math", "section": "Adaptive", "correct": false}
                ]
            "#},
            None,
        )
        .unwrap();

        assert_eq!(responses[0].subject, "Math");
        assert_eq!(responses[0].module(), Module::One);
        assert_eq!(responses[0].complexity, Complexity::Easy);
        assert_eq!(responses[1].module(), Module::Two);
        assert_eq!(responses[1].complexity, Complexity::Medium);
        assert_eq!(responses[2].complexity, Complexity::Unknown);
    }

    #[test]
    fn missing_field_reports_the_file() {
        let err = parse_responses(
            r#"[{"question_id": "q1", "subject": "Math", "section": "Static"}]"#,
            Some(Path::new("data/stu1.json")),
        )
        .unwrap_err();

        let rendered = err.to_string();
        assert!(rendered.contains("data/stu1.json"), "{rendered}");
        assert!(rendered.contains("correct"), "{rendered}");
    }

    #[test]
    fn duplicate_question_ids_are_rejected() {
        let err = parse_responses(
            indoc! {r#"
                [
                  {"question_id": "q1", "subject": "Math", "section": "Static", "correct": true},
                  {"question_id": "q1", "subject": "Math", "section": "Static", "correct": false}
                ]
            "#},
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("q1"));
    }

    #[test]
    fn historical_records_ignore_extra_keys() {
        let records = parse_historical(
            r#"[{"student_id": "s1", "subject": "Math", "module1_correct": 10,
                 "module1_total": 22, "module2_difficulty_received": "easy"}]"#,
            None,
        )
        .unwrap();

        assert_eq!(records, vec![HistoricalRecord::new("Math", 10, 22, Difficulty::Easy)]);
    }

    #[test]
    fn unreadable_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_responses(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, WhatIfError::Io { .. }));
    }
}
