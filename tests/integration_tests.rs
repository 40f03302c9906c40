use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cogmet() -> Command {
    Command::cargo_bin("cogmet").expect("binary exists")
}

fn fixtures_dir() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures")
}

// ---------------------------------------------------------------------------
// CLI smoke tests
// ---------------------------------------------------------------------------

#[test]
fn test_help_output() {
    cogmet()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("cognitive complexity"));
}

#[test]
fn test_analyze_runs_successfully() {
    cogmet()
        .args(["-p", fixtures_dir(), "-f", "json", "analyze"])
        .assert()
        .success();
}

#[test]
fn test_analyze_json_output() {
    cogmet()
        .args(["-p", fixtures_dir(), "-f", "json", "analyze"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"score\""))
        .stdout(predicate::str::contains("CountPositive"))
        .stdout(predicate::str::contains("clamp"))
        .stdout(predicate::str::contains("firstTruthy"));
}

#[test]
fn test_analyze_markdown_output() {
    cogmet()
        .args(["-p", fixtures_dir(), "-f", "markdown", "analyze"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "| Function | File | Line | Score | Severity |",
        ))
        .stdout(predicate::str::contains("## Summary"));
}

#[test]
fn test_analyze_min_score_filters_output() {
    cogmet()
        .args(["-p", fixtures_dir(), "-f", "json", "analyze", "-n", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CountPositive"))
        .stdout(predicate::str::contains("Describe").not());
}

#[test]
fn test_analyze_exclude_pattern() {
    cogmet()
        .args([
            "-p",
            fixtures_dir(),
            "-f",
            "json",
            "analyze",
            "-e",
            "**/*.java",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("clamp").not())
        .stdout(predicate::str::contains("CountPositive"));
}

// ---------------------------------------------------------------------------
// Threshold policy
// ---------------------------------------------------------------------------

#[test]
fn test_check_passes_under_threshold() {
    cogmet()
        .args(["-p", fixtures_dir(), "-f", "json", "check"])
        .assert()
        .success();
}

#[test]
fn test_check_warns_without_deny() {
    // Fixture scores top out at 3, so threshold 2 violates; without --deny
    // or error_on_exceed the run still succeeds.
    cogmet()
        .args(["-p", fixtures_dir(), "-f", "json", "check", "-t", "2"])
        .assert()
        .success()
        .stderr(predicate::str::contains("over threshold"));
}

#[test]
fn test_check_deny_fails_on_violations() {
    cogmet()
        .args([
            "-p",
            fixtures_dir(),
            "-f",
            "json",
            "check",
            "-t",
            "2",
            "--deny",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Threshold violation"));
}

#[test]
fn test_check_env_escalation_fails() {
    cogmet()
        .env("COGMET_COGNITIVE__ERROR_ON_EXCEED", "true")
        .args(["-p", fixtures_dir(), "-f", "json", "check", "-t", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Threshold violation"));
}

// ---------------------------------------------------------------------------
// Config handling
// ---------------------------------------------------------------------------

#[test]
fn test_init_writes_config() {
    let dir = TempDir::new().unwrap();
    cogmet()
        .args(["-p", dir.path().to_str().unwrap(), "init"])
        .assert()
        .success();
    assert!(dir.path().join("cogmet.toml").exists());
}

#[test]
fn test_init_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("cogmet.toml"), "exclude = []\n").unwrap();
    cogmet()
        .args(["-p", dir.path().to_str().unwrap(), "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_init_force_overwrites() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("cogmet.toml"), "exclude = []\n").unwrap();
    cogmet()
        .args(["-p", dir.path().to_str().unwrap(), "init", "--force"])
        .assert()
        .success();
    let content = std::fs::read_to_string(dir.path().join("cogmet.toml")).unwrap();
    assert!(content.contains("threshold = 10"));
}

#[test]
fn test_config_file_threshold_applies() {
    let dir = TempDir::new().unwrap();
    std::fs::copy(
        format!("{}/Inventory.cs", fixtures_dir()),
        dir.path().join("Inventory.cs"),
    )
    .unwrap();
    std::fs::write(
        dir.path().join("cogmet.toml"),
        "[cognitive]\nthreshold = 2\nerror_on_exceed = true\n",
    )
    .unwrap();

    cogmet()
        .args(["-p", dir.path().to_str().unwrap(), "-f", "json", "check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Threshold violation"));
}

#[test]
fn test_config_output_format_applies() {
    // Without -f, the format comes from [output] in the config (here via
    // the env override).
    cogmet()
        .env("COGMET_OUTPUT__FORMAT", "markdown")
        .args(["-p", fixtures_dir(), "analyze"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "| Function | File | Line | Score | Severity |",
        ));
}

#[test]
fn test_format_flag_overrides_config() {
    cogmet()
        .env("COGMET_OUTPUT__FORMAT", "markdown")
        .args(["-p", fixtures_dir(), "-f", "json", "analyze"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"summary\""));
}

#[test]
fn test_missing_explicit_config_is_an_error() {
    cogmet()
        .args([
            "-p",
            fixtures_dir(),
            "-c",
            "/does/not/exist.toml",
            "analyze",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn test_nonexistent_path_is_an_error() {
    cogmet()
        .args(["-p", "/does/not/exist", "analyze"])
        .assert()
        .failure();
}
