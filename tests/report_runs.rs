mod common;

use predicates::prelude::*;

#[test]
fn status_changed_run_exports_header_plus_two_rows() {
  let td = tempfile::TempDir::new().unwrap();
  let config = common::write_config(td.path());
  let out_dir = td.path().join("reports");

  common::bin()
    .env("JAR_TEST_SEARCH_JSON", common::two_issue_search_json())
    .args([
      "--report",
      "status-changed",
      "--config",
      config.to_str().unwrap(),
      "--out",
      out_dir.to_str().unwrap(),
      "--now-override",
      "2024-10-17",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Found 2 issue(s)"));

  let csv_path = out_dir.join("status_changes.csv");
  let text = std::fs::read_to_string(&csv_path).expect("export written");
  let lines: Vec<&str> = text.lines().collect();

  assert_eq!(lines.len(), 3, "header plus one line per issue");
  assert_eq!(lines[0], "ID,Summary,Status,Last Updated");
  assert_eq!(lines[1], "DA-1,First ticket,Done,2024-10-17 13:30");
  assert_eq!(lines[2], "DA-2,Second ticket,In Progress,2024-10-16 09:00");
}

#[test]
fn empty_result_writes_no_file() {
  let td = tempfile::TempDir::new().unwrap();
  let config = common::write_config(td.path());
  let out_dir = td.path().join("reports");

  common::bin()
    .env("JAR_TEST_SEARCH_JSON", common::empty_search_json())
    .args([
      "--report",
      "status-changed",
      "--config",
      config.to_str().unwrap(),
      "--out",
      out_dir.to_str().unwrap(),
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("No issues matched"));

  assert!(!out_dir.join("status_changes.csv").exists());
  assert!(!out_dir.exists(), "output directory is not created for an empty run");
}

#[test]
fn jql_echo_reflects_the_now_override() {
  let td = tempfile::TempDir::new().unwrap();
  let config = common::write_config(td.path());

  common::bin()
    .env("JAR_TEST_SEARCH_JSON", common::empty_search_json())
    .args([
      "--report",
      "stale-tickets",
      "--config",
      config.to_str().unwrap(),
      "--out",
      td.path().join("reports").to_str().unwrap(),
      "--now-override",
      "2024-10-17",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("status changed BEFORE \"2024-07-19\""));
}

#[test]
fn stale_tickets_run_exports_grouped_rows() {
  let td = tempfile::TempDir::new().unwrap();
  let config = common::write_config(td.path());
  let out_dir = td.path().join("reports");

  let body = serde_json::json!({
    "issues": [
      {
        "key": "FDA-7",
        "fields": {
          "summary": "Dormant migration",
          "status": { "name": "Blocked" },
          "assignee": null,
          "created": "2024-01-05T08:00:00.000+0000",
          "updated": "2024-08-01T10:15:00.000+0000",
          "statuscategorychangedate": "2024-03-12T09:30:00.000-0700"
        }
      }
    ]
  })
  .to_string();

  common::bin()
    .env("JAR_TEST_SEARCH_JSON", body)
    .args([
      "--report",
      "stale-tickets",
      "--config",
      config.to_str().unwrap(),
      "--out",
      out_dir.to_str().unwrap(),
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("FDA Board"))
    .stdout(predicate::str::contains("Total stale tickets across all boards: 1"));

  let text = std::fs::read_to_string(out_dir.join("stale_tickets.csv")).unwrap();
  let lines: Vec<&str> = text.lines().collect();

  assert_eq!(lines.len(), 2);
  assert_eq!(
    lines[0],
    "ID,Summary,Status,Assignee,Created,Last Updated,Status Changed,URL"
  );
  assert!(lines[1].starts_with("FDA-7,Dormant migration,Blocked,Unassigned,"));
  assert!(lines[1].ends_with("https://example.atlassian.net/browse/FDA-7"));
}

#[test]
fn transport_failure_degrades_to_an_empty_run() {
  let td = tempfile::TempDir::new().unwrap();
  let config = common::write_config(td.path());
  let out_dir = td.path().join("reports");

  // Unparseable fixture: the search client logs and reports zero issues.
  common::bin()
    .env("JAR_TEST_SEARCH_JSON", "not json")
    .args([
      "--report",
      "my-tickets",
      "--config",
      config.to_str().unwrap(),
      "--out",
      out_dir.to_str().unwrap(),
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("No issues matched"))
    .stderr(predicate::str::contains("[jira] search failed"));

  assert!(!out_dir.exists());
}
