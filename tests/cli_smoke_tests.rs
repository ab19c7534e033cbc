use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const EVENTS_VAR: &str = "COMMIT_INQUIRY_TEST_EVENTS";

fn composer(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("commit_inquiry").unwrap();
    cmd.arg("--config")
        .arg(temp.path().join("config.json"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn scripted_run_prints_message() {
    let temp = TempDir::new().unwrap();
    composer(&temp)
        .args(["--branch", "main"])
        .env(EVENTS_VAR, "accept | active=1,accept | accept | type=fix crash,accept")
        .assert()
        .success()
        .stdout(predicate::str::contains("fix: fix crash"));

    assert!(temp.path().join("config.json").exists());
}

#[test]
fn output_flag_writes_file() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("COMMIT_EDITMSG");
    composer(&temp)
        .arg("-o")
        .arg(&target)
        .args(["--preset", "Quick"])
        .env(EVENTS_VAR, "accept | accept | type=add docs,accept")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(std::fs::read_to_string(target).unwrap(), "feat: add docs\n");
}

#[test]
fn dismissed_wizard_exits_cleanly() {
    let temp = TempDir::new().unwrap();
    composer(&temp)
        .env(EVENTS_VAR, "hide")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No commit message composed"));
}

#[test]
fn unknown_preset_fails_with_suggestion() {
    let temp = TempDir::new().unwrap();
    composer(&temp)
        .args(["--preset", "Ful"])
        .env(EVENTS_VAR, "accept")
        .assert()
        .failure()
        .stderr(predicate::str::contains("did you mean `Full`"));
}

#[test]
fn malformed_script_fails() {
    let temp = TempDir::new().unwrap();
    composer(&temp)
        .env(EVENTS_VAR, "wiggle")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown event `wiggle`"));
}

#[test]
fn version_flag_prints_build_summary() {
    Command::cargo_bin("commit_inquiry")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(concat!("commit_inquiry ", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn unexpected_argument_fails() {
    Command::cargo_bin("commit_inquiry")
        .unwrap()
        .arg("--frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected argument `--frobnicate`"));
}

#[test]
fn quiet_flag_keeps_stderr_free_of_chatter() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("msg.txt");
    composer(&temp)
        .args(["--quiet", "--plain", "--preset", "Quick", "-o"])
        .arg(&target)
        .env(EVENTS_VAR, "accept | accept | type=add docs,accept")
        .assert()
        .success()
        .stderr(predicate::str::contains("Commit message written").not())
        .stderr(predicate::str::contains("Configuration:").not());
}
