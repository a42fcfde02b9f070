use anyhow::{bail, Result};
use chrono::{DateTime, Utc};

use crate::config::JiraConfig;
use crate::dates;
use crate::fields;
use crate::report::{cell, ReportDefinition, ReportRow};

pub const NAME: &str = "recent-tickets";
pub const ABOUT: &str = "Tickets created on the configured board in the last 7 days";

const RECENT_DAYS: i64 = 7;

pub struct RecentTicketsReport {
  server: String,
  board: String,
  days: i64,
  now: Option<DateTime<Utc>>,
}

impl RecentTicketsReport {
  pub fn new(cfg: &JiraConfig, now: Option<DateTime<Utc>>) -> Self {
    Self {
      server: cfg.server.clone(),
      board: cfg.board_name.clone(),
      days: RECENT_DAYS,
      now,
    }
  }
}

impl ReportDefinition for RecentTicketsReport {
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

    let cutoff = dates::jql_date(dates::days_ago(dates::effective_now(self.now), self.days));

    Ok(format!("project = \"{}\" AND created >= \"{}\"", self.board, cutoff))
  }

  fn required_fields(&self) -> Vec<&'static str> {
    vec!["summary", "status", "assignee", "created", "reporter"]
  }

  fn transform(&self, issue: &serde_json::Value) -> ReportRow {
    let key = fields::issue_key(issue);

    let mut row = ReportRow::new();
    row.insert(
      "Summary".to_string(),
      fields::field_value(issue, "fields.summary", fields::MISSING),
    );
    row.insert("Status".to_string(), fields::status_name(issue));
    row.insert("Assignee".to_string(), fields::assignee_name(issue));
    row.insert(
      "Reporter".to_string(),
      fields::object_name(issue, "fields.reporter", "displayName", "Unknown"),
    );
    // Creation time is exported as the tracker sent it.
    row.insert(
      "Created".to_string(),
      fields::field_value(issue, "fields.created", fields::MISSING),
    );
    row.insert("URL".to_string(), fields::issue_url(&self.server, &key));
    row.insert("ID".to_string(), key);

    row
  }

  fn headers(&self) -> Vec<&'static str> {
    vec!["ID", "Summary", "Status", "Assignee", "Reporter", "Created", "URL"]
  }

  fn output_name(&self) -> String {
    format!("recently_created_tickets_{}days.csv", self.days)
  }

  fn display(&self, rows: &[ReportRow]) {
    println!("\nRecently created tickets (last {} days):", self.days);
    println!("{}", "-".repeat(80));

    for row in rows {
      println!("{}: {}", cell(row, "ID"), cell(row, "Summary"));
      println!("   Status: {} | Assignee: {}", cell(row, "Status"), cell(row, "Assignee"));
      println!("   Reporter: {} | Created: {}", cell(row, "Reporter"), cell(row, "Created"));
      println!();
    }
  }
}
