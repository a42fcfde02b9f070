use std::path::Path;

use anyhow::{bail, Result};
use serde::Deserialize;

/// Connection settings for the tracker, passed explicitly into every
/// component that needs them. No module-level globals.
#[derive(Debug, Clone, Deserialize)]
pub struct JiraConfig {
  pub server: String,
  pub email: String,
  pub api_token: String,
  #[serde(default = "default_board_name")]
  pub board_name: String,
}

fn default_board_name() -> String {
  "DA".to_string()
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
  jira: Option<JiraConfig>,
}

/// Load configuration from a TOML file's `[jira]` table, falling back to the
/// `JIRA_*` environment variables when the file or table is absent.
///
/// Missing both is the one fatal startup condition in this tool; callers are
/// expected to surface the error and exit.
pub fn load(path: &Path) -> Result<JiraConfig> {
  if let Ok(text) = std::fs::read_to_string(path) {
    if let Ok(parsed) = toml::from_str::<ConfigFile>(&text) {
      if let Some(jira) = parsed.jira {
        return Ok(jira);
      }
    }
  }

  if let Some(cfg) = from_env() {
    return Ok(cfg);
  }

  bail!(
    "{} not found or missing its [jira] section.\nCreate it based on config.toml.example (server, email, api_token, board_name), or set JIRA_SERVER/JIRA_EMAIL/JIRA_API_TOKEN.",
    path.display()
  )
}

/// Environment fallback: JIRA_SERVER, JIRA_EMAIL, JIRA_API_TOKEN, and
/// optionally JIRA_BOARD_NAME.
fn from_env() -> Option<JiraConfig> {
  let server = non_empty_env("JIRA_SERVER")?;
  let email = non_empty_env("JIRA_EMAIL")?;
  let api_token = non_empty_env("JIRA_API_TOKEN")?;
  let board_name = non_empty_env("JIRA_BOARD_NAME").unwrap_or_else(default_board_name);

  Some(JiraConfig {
    server,
    email,
    api_token,
    board_name,
  })
}

fn non_empty_env(key: &str) -> Option<String> {
  match std::env::var(key) {
    Ok(v) if !v.trim().is_empty() => Some(v),
    _ => None,
  }
}
