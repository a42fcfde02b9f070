mod common;

use predicates::prelude::*;

#[test]
fn list_shows_every_report_name() {
  common::bin()
    .arg("--list")
    .assert()
    .success()
    .stdout(predicate::str::contains("status-changed"))
    .stdout(predicate::str::contains("stale-tickets"))
    .stdout(predicate::str::contains("my-tickets"))
    .stdout(predicate::str::contains("recent-tickets"));
}

#[test]
fn missing_report_flag_is_an_error() {
  common::bin().assert().failure().stderr(predicate::str::contains("--report"));
}

#[test]
fn unknown_report_name_is_an_error() {
  let td = tempfile::TempDir::new().unwrap();
  let config = common::write_config(td.path());

  common::bin()
    .args(["--report", "no-such-report", "--config", config.to_str().unwrap()])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Unknown report"));
}

#[test]
fn missing_configuration_is_fatal_with_a_diagnostic() {
  let td = tempfile::TempDir::new().unwrap();
  let config = td.path().join("config.toml"); // never written

  common::bin()
    .env_remove("JIRA_SERVER")
    .env_remove("JIRA_EMAIL")
    .env_remove("JIRA_API_TOKEN")
    .args(["--report", "status-changed", "--config", config.to_str().unwrap()])
    .assert()
    .failure()
    .stderr(predicate::str::contains("[jira] section"));
}

#[test]
fn gen_man_emits_troff() {
  common::bin()
    .arg("--gen-man")
    .assert()
    .success()
    .stdout(predicate::str::contains(".TH"));
}
