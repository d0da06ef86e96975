#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn cli(roster: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("roulement-cli").unwrap();
    cmd.arg("--roster").arg(roster);
    cmd
}

#[test]
fn generate_fill_check() {
    let dir = tempdir().unwrap();
    let roster = dir.path().join("roster.json");

    cli(&roster)
        .args(["generate", "--weeks", "2", "--employees", "10", "--seed", "12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 10 employee(s), 28 shift(s)"));

    cli(&roster)
        .args(["fill", "--strategy", "round-robin", "--seed", "3"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("round-robin: 28 shift(s)"));

    cli(&roster)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: no violations"));
}

#[test]
fn compare_does_not_touch_roster_file() {
    let dir = tempdir().unwrap();
    let roster = dir.path().join("roster.json");

    cli(&roster)
        .args(["generate", "--names", "A,B,C,D,E", "--seed", "1"])
        .assert()
        .success();
    let before = fs::read_to_string(&roster).unwrap();

    cli(&roster)
        .args(["compare", "--seed", "5"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("greedy")
                .and(predicate::str::contains("round-robin"))
                .and(predicate::str::contains("deadline")),
        );

    assert_eq!(before, fs::read_to_string(&roster).unwrap());
}

#[test]
fn tampered_roster_fails_check() {
    let dir = tempdir().unwrap();
    let roster = dir.path().join("roster.json");
    fs::write(
        &roster,
        r#"{
  "employees": [{"name": "A", "availability": [], "assigned_shifts": 0}],
  "calendar": {
    "days_per_week": 1,
    "weeks": [{"index": 1, "days": [{
      "index": 1,
      "morning": {"kind": "morning", "needed": 1, "assigned": ["A", "A"]},
      "night": {"kind": "night", "needed": 0}
    }]}]
  }
}"#,
    )
    .unwrap();

    cli(&roster)
        .arg("check")
        .assert()
        .code(2)
        .stderr(
            predicate::str::contains("over-staffed")
                .and(predicate::str::contains("double-booking"))
                .and(predicate::str::contains("counter-mismatch")),
        );
}

#[test]
fn unknown_strategy_is_rejected() {
    let dir = tempdir().unwrap();
    let roster = dir.path().join("roster.json");
    cli(&roster)
        .args(["fill", "--strategy", "lottery"])
        .assert()
        .failure();
}

#[test]
fn import_calendar_rejects_negative_headcount() {
    let dir = tempdir().unwrap();
    let roster = dir.path().join("roster.json");
    let csv = dir.path().join("calendar.csv");
    fs::write(&csv, "week,day,kind,needed\n1,1,morning,-1\n").unwrap();

    cli(&roster)
        .args(["import-calendar", "--csv"])
        .arg(&csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid headcount"));
    assert!(!roster.exists());
}
