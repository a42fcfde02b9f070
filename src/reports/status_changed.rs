use anyhow::{bail, Result};
use chrono::{DateTime, Utc};

use crate::config::JiraConfig;
use crate::dates;
use crate::fields;
use crate::report::{cell, ReportDefinition, ReportRow};

pub const NAME: &str = "status-changed";
pub const ABOUT: &str = "Tickets on the configured board whose status changed during the last sprint";

/// One sprint on the board, in days.
const SPRINT_DAYS: i64 = 27;

pub struct StatusChangedReport {
  board: String,
  sprint_days: i64,
  now: Option<DateTime<Utc>>,
}

impl StatusChangedReport {
  pub fn new(cfg: &JiraConfig, now: Option<DateTime<Utc>>) -> Self {
    Self {
      board: cfg.board_name.clone(),
      sprint_days: SPRINT_DAYS,
      now,
    }
  }
}

impl ReportDefinition for StatusChangedReport {
  fn name(&self) -> &'static str {
    NAME
  }

  fn about(&self) -> &'static str {
    ABOUT
  }

  fn build_jql(&self) -> Result<String> {
    if self.board.trim().is_empty() {
      bail!("board_name missing from configuration");
    }

    let cutoff = dates::jql_date(dates::days_ago(dates::effective_now(self.now), self.sprint_days));

    Ok(format!(
      "project = \"{}\" AND (status changed AFTER \"{}\")",
      self.board, cutoff
    ))
  }

  fn required_fields(&self) -> Vec<&'static str> {
    vec!["summary", "status", "updated"]
  }

  fn transform(&self, issue: &serde_json::Value) -> ReportRow {
    let updated_raw = fields::field_value(issue, "fields.updated", fields::MISSING);

    let mut row = ReportRow::new();
    row.insert("ID".to_string(), fields::issue_key(issue));
    row.insert(
      "Summary".to_string(),
      fields::field_value(issue, "fields.summary", fields::MISSING),
    );
    row.insert("Status".to_string(), fields::status_name(issue));
    row.insert(
      "Last Updated".to_string(),
      dates::normalize_timestamp(&updated_raw, dates::DISPLAY_FORMAT),
    );

    row
  }

  fn headers(&self) -> Vec<&'static str> {
    vec!["ID", "Summary", "Status", "Last Updated"]
  }

  fn output_name(&self) -> String {
    "status_changes.csv".to_string()
  }

  fn display(&self, rows: &[ReportRow]) {
    println!("\nTickets with status changes (last {} days):", self.sprint_days);
    println!("{}", "-".repeat(80));

    for row in rows {
      println!(
        "ID: {}, Summary: {}, Status: {}",
        cell(row, "ID"),
        cell(row, "Summary"),
        cell(row, "Status")
      );
    }
  }
}
