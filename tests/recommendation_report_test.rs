//! End-to-end tests for scoring and recommendation reports built from JSON
//! inputs in the exported exam format.

use dsat_whatif::io::{parse_responses, parse_scoring_table};
use dsat_whatif::{Difficulty, Module, WhatIfAnalyzer};
use indoc::indoc;
use pretty_assertions::assert_eq;

const SCORING: &str = indoc! {r#"
    [
      {"key": "Math", "map": [
        {"raw": 0, "easy": 200, "hard": 200},
        {"raw": 1, "easy": 250, "hard": 260},
        {"raw": 2, "easy": 300, "hard": 320},
        {"raw": 3, "easy": 330, "hard": 350},
        {"raw": 4, "easy": 360, "hard": 400}
      ]},
      {"key": "Reading and Writing", "map": [
        {"raw": 0, "easy": 200, "hard": 200},
        {"raw": 1, "easy": 240, "hard": 250},
        {"raw": 2, "easy": 280, "hard": 300},
        {"raw": 3, "easy": 310, "hard": 340}
      ]}
    ]
"#};

const RESPONSES: &str = indoc! {r#"
    [
      {"question_id": "m1-a", "subject": {"name": "Math"}, "section": "Static", "correct": true, "compleixty": "Hard"},
      {"question_id": "m1-b", "subject": {"name": "Math"}, "section": "Static", "correct": false, "compleixty": "Easy"},
      {"question_id": "m2-a", "subject": {"name": "Math"}, "section": "hard", "correct": true, "compleixty": "Medium"},
      {"question_id": "m2-b", "subject": {"name": "Math"}, "section": "hard", "correct": false, "compleixty": "Easy"},
      {"question_id": "rw1-a", "subject": "Reading and Writing", "section": "Static", "correct": true, "complexity": "easy"},
      {"question_id": "rw2-a", "subject": "Reading and Writing", "section": "Adaptive", "correct": false, "complexity": "hard"}
    ]
"#};

fn analyzer() -> WhatIfAnalyzer {
    let mut analyzer = WhatIfAnalyzer::new(parse_scoring_table(SCORING, None).unwrap());
    analyzer.set_threshold("Math", 0.75);
    analyzer
}

#[test]
fn module1_flip_that_changes_tier_scores_175() {
    let analyzer = analyzer();
    let responses = parse_responses(RESPONSES, None).unwrap();
    let baseline = analyzer.calculate_current_score(&responses);

    // Math 1/2 < 0.75 -> easy, raw 2 -> 300; R&W 1/1 -> hard, raw 1 -> 250
    assert_eq!(baseline.total_score, 550);
    assert_eq!(baseline.difficulty("Math"), Some(Difficulty::Easy));

    let impact = analyzer.impact_score(&responses, "m1-b", baseline.total_score, &baseline.difficulties);
    assert_eq!(impact, 50 + 120 + 5);
}

#[test]
fn report_ranks_each_subject_and_summarizes() {
    let analyzer = analyzer();
    let responses = parse_responses(RESPONSES, None).unwrap();

    let report = analyzer.generate_recommendations(&responses, 5);

    assert_eq!(report.current_total_score, 550);
    let math = &report.recommendations["Math"];
    let ranked: Vec<(&str, i64)> = math
        .high_impact_questions
        .iter()
        .map(|e| (e.question_id.as_str(), e.impact_score))
        .collect();
    assert_eq!(ranked, vec![("m1-b", 175), ("m2-b", 35)]);
    assert_eq!(math.total_potential_gain, 210);
    assert_eq!(math.module1_priority_count, 1);
    assert_eq!(math.high_impact_questions[0].module, Module::One);

    // 1 of 2 is not a strict majority
    let summary = &report.summary["Math"];
    assert!(!summary.focus_on_module1);
    assert_eq!(summary.highest_single_impact, 175);
    assert_eq!(summary.average_impact_per_question, 105.0);

    // R&W raw 1 -> 2 on hard: 250 -> 300
    let rw = &report.recommendations["Reading and Writing"];
    assert_eq!(rw.high_impact_questions[0].impact_score, 50);
}

#[test]
fn gain_covers_exactly_the_selected_questions() {
    let analyzer = analyzer();
    let responses = parse_responses(RESPONSES, None).unwrap();

    let report = analyzer.generate_recommendations(&responses, 1);

    let math = &report.recommendations["Math"];
    assert_eq!(math.high_impact_questions.len(), 1);
    assert_eq!(math.total_potential_gain, 175);
    assert!(report.summary["Math"].focus_on_module1);
}

#[test]
fn perfect_subject_gets_empty_slice_and_no_summary() {
    let analyzer = analyzer();
    let responses = parse_responses(
        r#"[{"question_id": "m1", "subject": "Math", "section": "Static", "correct": true}]"#,
        None,
    )
    .unwrap();

    let report = analyzer.generate_recommendations(&responses, 5);

    assert!(report.recommendations["Math"].high_impact_questions.is_empty());
    assert!(report.recommendations["Reading and Writing"].high_impact_questions.is_empty());
    assert!(report.summary.is_empty());
}

#[test]
fn analysis_report_carries_breakdown_and_insights() {
    let analyzer = analyzer();
    let responses = parse_responses(RESPONSES, None).unwrap();

    let report = analyzer.analyze(&responses, 5);

    let math = &report.score.subjects["Math"];
    assert_eq!((math.module1_correct, math.module1_total, math.raw_score), (1, 2, 2));
    assert_eq!(math.scaled_score, 300);

    let insights = &report.insights;
    assert_eq!(insights.total_current, 550);
    assert_eq!(insights.total_gain, 260);
    assert_eq!(insights.total_potential, 810);
    assert_eq!(insights.subjects["Math"].progression, vec![475, 510]);

    let plan: Vec<&str> = insights.action_plan.iter().map(|a| a.question_id.as_str()).collect();
    assert_eq!(plan, vec!["m1-b", "rw2-a", "m2-b"]);
}

#[test]
fn repeated_analysis_serializes_identically() {
    let analyzer = analyzer();
    let responses = parse_responses(RESPONSES, None).unwrap();

    let first = serde_json::to_string(&analyzer.calculate_current_score(&responses)).unwrap();
    let second = serde_json::to_string(&analyzer.calculate_current_score(&responses)).unwrap();
    assert_eq!(first, second);
}
