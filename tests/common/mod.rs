use std::path::{Path, PathBuf};

#[allow(dead_code)]
pub fn bin() -> assert_cmd::Command {
  assert_cmd::Command::cargo_bin("jira-activity-report").expect("binary built")
}

/// Write a config.toml into `dir` and return its path.
#[allow(dead_code)]
pub fn write_config(dir: &Path) -> PathBuf {
  let path = dir.join("config.toml");

  std::fs::write(
    &path,
    "[jira]\nserver = \"https://example.atlassian.net\"\nemail = \"po@example.com\"\napi_token = \"tok\"\nboard_name = \"DA\"\n",
  )
  .expect("write config fixture");

  path
}

/// A two-issue search response in the tracker's wire shape.
#[allow(dead_code)]
pub fn two_issue_search_json() -> String {
  serde_json::json!({
    "issues": [
      {
        "key": "DA-1",
        "fields": {
          "summary": "First ticket",
          "status": { "name": "Done" },
          "updated": "2024-10-17T14:30:45.123+0100"
        }
      },
      {
        "key": "DA-2",
        "fields": {
          "summary": "Second ticket",
          "status": { "name": "In Progress" },
          "updated": "2024-10-16T09:00:00.000+0000"
        }
      }
    ]
  })
  .to_string()
}

#[allow(dead_code)]
pub fn empty_search_json() -> String {
  serde_json::json!({ "issues": [] }).to_string()
}
