//! CLI integration tests
//!
//! Run the `csvnorm` binary against files in a temp directory.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn csvnorm() -> Command {
    let mut cmd = Command::cargo_bin("csvnorm").unwrap();
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_preset_writes_out_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("prices.csv");
    fs::write(&input, "12,50;3.00\n").unwrap();

    csvnorm()
        .arg(&input)
        .args(["--preset", "comma-to-period"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 replaced"));

    assert_eq!(
        fs::read_to_string(dir.path().join("prices_out.csv")).unwrap(),
        "12.50;3.00\n"
    );
}

#[test]
fn test_from_to_with_names_in_place() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("rows.csv");
    fs::write(&input, "a;b;c").unwrap();

    csvnorm()
        .arg(&input)
        .args(["--from", "semicolon", "--to", ",", "--in-place"])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&input).unwrap(), "a,b,c");
}

#[test]
fn test_swap_flag() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("n.csv");
    fs::write(&input, "1.234,5").unwrap();

    csvnorm()
        .arg(&input)
        .args(["--from", ".", "--to", ",", "--swap", "-o"])
        .arg(dir.path().join("swapped.csv"))
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(dir.path().join("swapped.csv")).unwrap(),
        "1,234.5"
    );
}

#[test]
fn test_latin1_encoding_flag() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("latin.csv");
    fs::write(&input, b"caf\xe9;2.5").unwrap();

    csvnorm()
        .arg(&input)
        .args(["--preset", "period-to-comma", "--encoding", "latin-1"])
        .assert()
        .success();

    assert_eq!(
        fs::read(dir.path().join("latin_out.csv")).unwrap(),
        b"caf\xe9;2,5"
    );
}

#[test]
fn test_invalid_utf8_fails_with_hint() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("latin.csv");
    fs::write(&input, b"caf\xe9;2.5").unwrap();

    csvnorm()
        .arg(&input)
        .args(["--preset", "period-to-comma"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("csvnorm::decode"))
        .stderr(predicate::str::contains("latin-1"));
}

#[test]
fn test_missing_input_fails() {
    let dir = TempDir::new().unwrap();

    csvnorm()
        .arg(dir.path().join("missing.csv"))
        .args(["--preset", "comma-to-period"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Nothing to normalize").not())
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn test_identity_substitution_rejected() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("a.csv");
    fs::write(&input, "1,5").unwrap();

    csvnorm()
        .arg(&input)
        .args(["--from", ",", "--to", "comma"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does nothing"));
}

#[test]
fn test_missing_substitution_rejected() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("a.csv");
    fs::write(&input, "1,5").unwrap();

    csvnorm()
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--preset"));
}

#[test]
fn test_preset_conflicts_with_from() {
    csvnorm()
        .args(["a.csv", "--preset", "comma-to-period", "--from", ";"])
        .assert()
        .failure();
}

#[test]
fn test_dry_run_leaves_files_alone() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("a.csv");
    fs::write(&input, "1,5").unwrap();

    csvnorm()
        .arg(&input)
        .args(["--preset", "comma-to-period", "--in-place", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dry run"));

    assert_eq!(fs::read_to_string(&input).unwrap(), "1,5");
}

#[test]
fn test_backup_flag() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("a.csv");
    fs::write(&input, "1,5").unwrap();

    csvnorm()
        .arg(&input)
        .args(["--preset", "comma-to-period", "--in-place", "--backup"])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&input).unwrap(), "1.5");
    assert_eq!(
        fs::read_to_string(dir.path().join("a.csv.bak")).unwrap(),
        "1,5"
    );
}

#[test]
fn test_json_report_is_parseable() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("a.csv");
    fs::write(&input, "1,5;2,5").unwrap();

    let output = csvnorm()
        .arg(&input)
        .args(["--preset", "comma-to-period", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value[0]["replaced"], 2);
    assert_eq!(value[0]["substitution"]["kind"], "replace");
    assert_eq!(value[0]["substitution"]["from"], ",");
}

#[test]
fn test_json_report_to_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("a.csv");
    let report = dir.path().join("report.json");
    fs::write(&input, "1,5").unwrap();

    csvnorm()
        .arg(&input)
        .args(["--preset", "comma-to-period", "--format", "json", "--report-output"])
        .arg(&report)
        .assert()
        .success();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 1);
}

#[test]
fn test_report_output_with_terminal_format_warns() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("a.csv");
    let report = dir.path().join("report.json");
    fs::write(&input, "1,5").unwrap();

    csvnorm()
        .arg(&input)
        .args(["--preset", "comma-to-period", "--report-output"])
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 file processed"))
        .stderr(predicate::str::contains("--report-output only applies"));

    assert!(!report.exists());
}

#[test]
fn test_config_run_reports_jobs_before_failure() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.csv"), "1,5").unwrap();
    fs::write(
        dir.path().join(".csvnorm.toml"),
        r#"
[[jobs]]
input = "a.csv"
preset = "comma-to-period"

[[jobs]]
input = "missing.csv"
preset = "comma-to-period"
"#,
    )
    .unwrap();

    csvnorm()
        .current_dir(dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("1 file processed"))
        .stderr(predicate::str::contains("Failed to read"));

    assert_eq!(fs::read_to_string(dir.path().join("a_out.csv")).unwrap(), "1.5");
}

#[test]
fn test_config_run_warns_about_single_file_flags() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.csv"), "1,5").unwrap();
    fs::write(
        dir.path().join(".csvnorm.toml"),
        r#"
[[jobs]]
input = "a.csv"
preset = "comma-to-period"
"#,
    )
    .unwrap();

    csvnorm()
        .current_dir(dir.path())
        .args(["--to", ";"])
        .assert()
        .success()
        .stderr(predicate::str::contains("only apply with an INPUT file"));

    assert_eq!(fs::read_to_string(dir.path().join("a_out.csv")).unwrap(), "1.5");
}

#[test]
fn test_runs_default_config_jobs() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.csv"), "1,5").unwrap();
    fs::write(dir.path().join("b.csv"), "x;y").unwrap();
    fs::write(
        dir.path().join(".csvnorm.toml"),
        r#"
[[jobs]]
input = "a.csv"
preset = "comma-to-period"

[[jobs]]
input = "b.csv"
from = ";"
to = ","
in_place = true
"#,
    )
    .unwrap();

    csvnorm()
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2 files processed"));

    assert_eq!(fs::read_to_string(dir.path().join("a_out.csv")).unwrap(), "1.5");
    assert_eq!(fs::read_to_string(dir.path().join("b.csv")).unwrap(), "x,y");
}

#[test]
fn test_no_input_and_no_config_fails() {
    let dir = TempDir::new().unwrap();

    csvnorm()
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No input given"));
}

#[test]
fn test_completions() {
    csvnorm()
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("csvnorm"));
}
