use assert_cmd::Command;
use predicates::str::contains;

#[test]
fn runs_end_to_end_with_no_credentials_configured() {
    let dir = tempfile::tempdir().unwrap();
    let checkpoint_path = dir.path().join("checkpoint.ndjson");

    Command::cargo_bin("heatwave")
        .unwrap()
        .env_clear()
        .env("RUST_LOG", "info")
        .arg("--checkpoint-path")
        .arg(&checkpoint_path)
        .arg("--deadline-secs")
        .arg("30")
        .assert()
        .success()
        .stderr(contains("run finished"));
}

#[test]
fn rejects_an_unsupported_language_code() {
    let dir = tempfile::tempdir().unwrap();
    let checkpoint_path = dir.path().join("checkpoint.ndjson");

    Command::cargo_bin("heatwave")
        .unwrap()
        .env_clear()
        .arg("--checkpoint-path")
        .arg(&checkpoint_path)
        .arg("--language")
        .arg("zz")
        .assert()
        .failure();
}
