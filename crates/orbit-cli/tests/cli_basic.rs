//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway data directory and
//! verify its JSON output.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_orbit-cli"))
        .env("ORBIT_DATA_DIR", data_dir)
        .env_remove("ORBIT_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Run a CLI command, expect success, and parse stdout as JSON.
fn run_json(data_dir: &Path, args: &[&str]) -> serde_json::Value {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "CLI command {:?} failed: {}", args, stderr);
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

fn add_habit(data_dir: &Path, args: &[&str]) -> String {
    let mut full = vec!["habit", "add"];
    full.extend_from_slice(args);
    let habit = run_json(data_dir, &full);
    habit["id"].as_str().unwrap().to_string()
}

#[test]
fn test_habit_add_and_list() {
    let dir = tempfile::tempdir().unwrap();
    let id = add_habit(dir.path(), &["Read", "--category", "Mind", "--frequency", "3x_week"]);

    let list = run_json(dir.path(), &["habit", "list"]);
    let rows = list.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["habit"]["id"], id.as_str());
    assert_eq!(rows[0]["habit"]["frequency"], "3x_week");
    assert_eq!(rows[0]["habit"]["streak"], 0);
    assert_eq!(rows[0]["status"]["checkedInToday"], false);
}

#[test]
fn test_habit_add_rejects_blank_name() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["habit", "add", "  ", "--category", "Mind"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("name"));

    let list = run_json(dir.path(), &["habit", "list"]);
    assert!(list.as_array().unwrap().is_empty());
}

#[test]
fn test_check_in_is_once_per_day() {
    let dir = tempfile::tempdir().unwrap();
    let id = add_habit(dir.path(), &["Run", "--category", "Body"]);

    let first = run_json(dir.path(), &["--today", "2025-02-01", "habit", "done", &id]);
    assert_eq!(first["outcome"]["outcome"], "recorded");
    assert_eq!(first["habit"]["streak"], 1);
    assert_eq!(first["habit"]["points"], 10);
    assert_eq!(first["rank"]["name"], "BRONZE");

    let second = run_json(dir.path(), &["--today", "2025-02-01", "habit", "done", &id]);
    assert_eq!(second["outcome"]["outcome"], "already_checked_in");
    assert_eq!(second["habit"]["points"], 10);
}

#[test]
fn test_late_check_in_applies_penalty() {
    let dir = tempfile::tempdir().unwrap();
    let id = add_habit(dir.path(), &["Lift", "--category", "Body", "--mode", "strict"]);

    for day in ["2025-02-01", "2025-02-02", "2025-02-03", "2025-02-04"] {
        run_json(dir.path(), &["--today", day, "habit", "done", &id]);
    }

    let preview = run_json(dir.path(), &["--today", "2025-02-08", "penalty", "preview", &id]);
    assert_eq!(preview["overdue"], true);
    assert_eq!(preview["missedDaysIfCheckedInToday"], 2);
    assert_eq!(preview["penaltyIfCheckedInToday"], 12);

    let late = run_json(dir.path(), &["--today", "2025-02-08", "habit", "done", &id]);
    assert_eq!(late["outcome"]["penalty"], 12);
    assert_eq!(late["habit"]["points"], 38);
    assert_eq!(late["habit"]["streak"], 5);
}

#[test]
fn test_rank_and_ladder() {
    let dir = tempfile::tempdir().unwrap();
    let rank = run_json(dir.path(), &["rank"]);
    assert_eq!(rank["name"], "BRONZE");
    assert_eq!(rank["pointsToNext"], 500);

    let ladder = run_json(dir.path(), &["rank", "--ladder"]);
    let tiers = ladder.as_array().unwrap();
    assert_eq!(tiers.len(), 7);
    assert_eq!(tiers[0]["name"], "BRONZE");
    assert_eq!(tiers[0]["min_points"], 0);
    assert_eq!(tiers[6]["name"], "LEGEND");
}

#[test]
fn test_penalty_estimate() {
    let dir = tempfile::tempdir().unwrap();
    let est = run_json(
        dir.path(),
        &["penalty", "estimate", "--streak", "10", "--mode", "strict", "--missed-days", "2"],
    );
    assert_eq!(est["penalty"], 30);
}

#[test]
fn test_repair_requires_yes() {
    let dir = tempfile::tempdir().unwrap();
    let id = add_habit(dir.path(), &["Run", "--category", "Body"]);

    let (_, stderr, code) = run_cli(dir.path(), &["habit", "repair", &id]);
    assert_ne!(code, 0);
    assert!(stderr.contains("confirmation"));

    let summary = run_json(dir.path(), &["habit", "repair", &id, "--yes"]);
    assert_eq!(summary["pointsAfter"], 0);
}

#[test]
fn test_chart_and_categories() {
    let dir = tempfile::tempdir().unwrap();
    let x = add_habit(dir.path(), &["X", "--category", "Fitness"]);
    let y = add_habit(dir.path(), &["Y", "--category", "Fitness"]);
    add_habit(dir.path(), &["Z", "--category", "Reading"]);

    run_json(dir.path(), &["--today", "2025-03-01", "habit", "done", &x]);
    run_json(dir.path(), &["--today", "2025-03-02", "habit", "done", &y]);
    run_json(dir.path(), &["--today", "2025-03-03", "habit", "done", &x]);

    let categories = run_json(dir.path(), &["categories"]);
    assert_eq!(categories, serde_json::json!(["Fitness", "Reading"]));

    let chart = run_json(dir.path(), &["chart", "Fitness"]);
    assert_eq!(chart["chartable"], true);
    let rows = chart["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1]["date"], "2025-03-02");
    assert_eq!(rows[1]["values"], serde_json::json!([null, 1]));

    let all = run_json(dir.path(), &["chart", "--all"]);
    assert_eq!(all[1]["category"], "Reading");
    assert_eq!(all[1]["chartable"], false);

    let (_, _, code) = run_cli(dir.path(), &["chart", "Nope"]);
    assert_ne!(code, 0);
}

#[test]
fn test_export_import_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let id = add_habit(dir.path(), &["Run", "--category", "Body"]);
    run_json(dir.path(), &["--today", "2025-02-01", "habit", "done", &id]);
    let before = run_json(dir.path(), &["habit", "list"]);

    let export = dir.path().join("export.json");
    let export_str = export.to_str().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["data", "export", export_str]);
    assert_eq!(code, 0, "{stderr}");

    run_cli(dir.path(), &["habit", "delete", &id]);
    assert!(run_json(dir.path(), &["habit", "list"]).as_array().unwrap().is_empty());

    let (_, stderr, code) = run_cli(dir.path(), &["data", "import", export_str]);
    assert_eq!(code, 0, "{stderr}");
    let after = run_json(dir.path(), &["habit", "list"]);
    assert_eq!(before, after);
}

#[test]
fn test_import_rejects_non_array_document() {
    let dir = tempfile::tempdir().unwrap();
    add_habit(dir.path(), &["Run", "--category", "Body"]);

    let doc = dir.path().join("bad.json");
    std::fs::write(&doc, r#"{"habits": []}"#).unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["data", "import", doc.to_str().unwrap()]);
    assert_ne!(code, 0);
    assert!(stderr.contains("array"));

    let list = run_json(dir.path(), &["habit", "list"]);
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[test]
fn test_config_get_set() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["config", "get", "scoring.grace_period_days"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "1");

    let (_, _, code) = run_cli(dir.path(), &["config", "set", "scoring.grace_period_days", "3"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(dir.path(), &["config", "get", "scoring.grace_period_days"]);
    assert_eq!(stdout.trim(), "3");

    let (_, _, code) = run_cli(dir.path(), &["config", "set", "scoring.bogus", "3"]);
    assert_ne!(code, 0);
}
