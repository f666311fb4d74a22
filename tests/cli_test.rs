//! Command-line tests for the `analyze`, `tune` and `init` subcommands.

use assert_cmd::Command;
use indoc::indoc;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SCORING: &str = indoc! {r#"
    [
      {"key": "Math", "map": [
        {"raw": 0, "easy": 200, "hard": 200},
        {"raw": 1, "easy": 250, "hard": 260},
        {"raw": 2, "easy": 300, "hard": 320},
        {"raw": 3, "easy": 330, "hard": 350}
      ]}
    ]
"#};

const RESPONSES: &str = indoc! {r#"
    [
      {"question_id": "m1", "subject": {"name": "Math"}, "section": "Static", "correct": true, "compleixty": "Medium"},
      {"question_id": "m2", "subject": {"name": "Math"}, "section": "Static", "correct": false, "compleixty": "Easy"},
      {"question_id": "m3", "subject": {"name": "Math"}, "section": "hard", "correct": false, "compleixty": "Hard"}
    ]
"#};

fn write_inputs(dir: &Path) -> (PathBuf, PathBuf) {
    let scoring = dir.join("scoring.json");
    let responses = dir.join("stu1.json");
    fs::write(&scoring, SCORING).unwrap();
    fs::write(&responses, RESPONSES).unwrap();
    (scoring, responses)
}

fn bin(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("dsat-whatif").unwrap();
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("DSAT_WHATIF_CONFIG");
    cmd
}

#[test]
fn analyze_writes_json_report() {
    let temp = TempDir::new().unwrap();
    let (scoring, responses) = write_inputs(temp.path());
    let output = temp.path().join("report.json");

    bin(temp.path())
        .args(["analyze", "--format", "json", "--scoring"])
        .arg(&scoring)
        .arg("--responses")
        .arg(&responses)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let json: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let math = &json["recommendations"]["recommendations"]["Math"];
    assert_eq!(math["high_impact_questions"].as_array().unwrap().len(), 2);
    assert!(json["history_source"].as_str().unwrap().contains("seed-v1"));
    assert!(json["fits"]["Math"]["threshold"].is_number());
}

#[test]
fn analyze_respects_top_flag() {
    let temp = TempDir::new().unwrap();
    let (scoring, responses) = write_inputs(temp.path());

    let assert = bin(temp.path())
        .args(["analyze", "--format", "json", "--top", "1", "--scoring"])
        .arg(&scoring)
        .arg("--responses")
        .arg(&responses)
        .assert()
        .success();

    let json: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let questions = &json["recommendations"]["recommendations"]["Math"]["high_impact_questions"];
    assert_eq!(questions.as_array().unwrap().len(), 1);
}

#[test]
fn analyze_reports_malformed_responses() {
    let temp = TempDir::new().unwrap();
    let (scoring, _) = write_inputs(temp.path());
    let broken = temp.path().join("broken.json");
    fs::write(&broken, r#"[{"question_id": "q1", "subject": "Math"}]"#).unwrap();

    let assert = bin(temp.path())
        .args(["analyze", "--scoring"])
        .arg(&scoring)
        .arg("--responses")
        .arg(&broken)
        .assert()
        .failure();

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("broken.json"), "{stderr}");
}

#[test]
fn tune_prints_fit_diagnostics() {
    let temp = TempDir::new().unwrap();

    let assert = bin(temp.path()).args(["tune", "--format", "json"]).assert().success();

    let json: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(json["fits"]["Math"]["threshold"].as_f64(), Some(0.55));
    assert_eq!(json["fits"]["Reading and Writing"]["data_points"].as_u64(), Some(10));
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let temp = TempDir::new().unwrap();

    bin(temp.path()).arg("init").assert().success();
    assert!(temp.path().join(".dsat-whatif.toml").exists());

    bin(temp.path()).arg("init").assert().failure();
    bin(temp.path()).args(["init", "--force"]).assert().success();
}

#[test]
fn config_top_n_applies_without_flag() {
    let temp = TempDir::new().unwrap();
    let (scoring, responses) = write_inputs(temp.path());
    fs::write(temp.path().join(".dsat-whatif.toml"), "[output]\ntop_n = 1\n").unwrap();

    let assert = bin(temp.path())
        .args(["analyze", "--format", "json", "--scoring"])
        .arg(&scoring)
        .arg("--responses")
        .arg(&responses)
        .assert()
        .success();

    let json: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let questions = &json["recommendations"]["recommendations"]["Math"]["high_impact_questions"];
    assert_eq!(questions.as_array().unwrap().len(), 1);
}

#[test]
fn config_path_can_come_from_environment() {
    let temp = TempDir::new().unwrap();
    let (scoring, responses) = write_inputs(temp.path());
    let conf_dir = temp.path().join("conf");
    fs::create_dir(&conf_dir).unwrap();
    let config = conf_dir.join("whatif.toml");
    fs::write(&config, "[output]\ntop_n = 1\n").unwrap();

    let assert = bin(temp.path())
        .env("DSAT_WHATIF_CONFIG", &config)
        .args(["analyze", "--format", "json", "--scoring"])
        .arg(&scoring)
        .arg("--responses")
        .arg(&responses)
        .assert()
        .success();

    let json: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let questions = &json["recommendations"]["recommendations"]["Math"]["high_impact_questions"];
    assert_eq!(questions.as_array().unwrap().len(), 1);
}
