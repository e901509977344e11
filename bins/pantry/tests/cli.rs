use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command pointed at an empty config file, independent of any pantry.toml
/// on the machine. The directory must outlive the run.
fn pantry() -> (Command, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("pantry.toml");
    std::fs::write(&config, "").unwrap();

    let mut cmd = Command::cargo_bin("pantry").unwrap();
    cmd.arg("--config").arg(&config);
    cmd.env_remove("PANTRY_REMOTE_LOOKUP");
    cmd.env_remove("RUST_LOG");
    (cmd, dir)
}

#[test]
fn lookup_json_exact() {
    let (mut cmd, _dir) = pantry();
    cmd.args(["lookup", "西兰花", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"id\": \"local_西兰花\""))
        .stdout(predicate::str::contains("\"source\": \"local\""));
}

#[test]
fn lookup_miss_exits_not_found() {
    let (mut cmd, _dir) = pantry();
    cmd.args(["lookup", "不存在的食材XYZ"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No nutrition data"));
}

#[test]
fn suggest_prints_notes() {
    let (mut cmd, _dir) = pantry();
    cmd.args(["suggest", "鸡胸肉"])
        .assert()
        .success()
        .stdout(predicate::str::contains("富含蛋白质"));
}

#[test]
fn foods_json_lists_table() {
    let (mut cmd, _dir) = pantry();
    cmd.args(["foods", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"categories\""))
        .stdout(predicate::str::contains("苹果"));
}

#[test]
fn missing_config_file_fails() {
    Command::cargo_bin("pantry")
        .unwrap()
        .args(["--config", "/nonexistent/pantry.toml", "foods"])
        .assert()
        .code(3);
}
