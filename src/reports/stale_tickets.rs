use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::config::JiraConfig;
use crate::dates;
use crate::fields;
use crate::report::{cell, ReportDefinition, ReportRow};
use crate::reports::group_by_project;

pub const NAME: &str = "stale-tickets";
pub const ABOUT: &str = "Tickets with no status change in the last 3 months (FDA/FDP boards)";

const PROJECTS: [&str; 2] = ["FDA", "FDP"];
const BOARDS: [(&str, u32, &str); 2] = [("FDA", 740, "FDA Board"), ("FDP", 728, "FDP Board")];
const STALE_MONTHS: i64 = 3;

pub struct StaleTicketsReport {
  server: String,
  months: i64,
  stale_days: i64,
  now: Option<DateTime<Utc>>,
}

impl StaleTicketsReport {
  pub fn new(cfg: &JiraConfig, now: Option<DateTime<Utc>>) -> Self {
    Self {
      server: cfg.server.clone(),
      months: STALE_MONTHS,
      stale_days: STALE_MONTHS * 30,
      now,
    }
  }
}

impl ReportDefinition for StaleTicketsReport {
  fn name(&self) -> &'static str {
    NAME
  }

  fn about(&self) -> &'static str {
    ABOUT
  }

  fn build_jql(&self) -> Result<String> {
    let cutoff = dates::jql_date(dates::days_ago(dates::effective_now(self.now), self.stale_days));
    let project_clause = PROJECTS
      .iter()
      .map(|p| format!("project = {}", p))
      .collect::<Vec<_>>()
      .join(" OR ");

    Ok(format!(
      "({}) AND status changed BEFORE \"{}\" AND (updated >= \"{}\" OR created >= \"{}\")",
      project_clause, cutoff, cutoff, cutoff
    ))
  }

  fn required_fields(&self) -> Vec<&'static str> {
    vec![
      "summary",
      "status",
      "assignee",
      "created",
      "updated",
      "statuscategorychangedate",
    ]
  }

  fn transform(&self, issue: &serde_json::Value) -> ReportRow {
    let created_raw = fields::field_value(issue, "fields.created", fields::MISSING);
    let updated_raw = fields::field_value(issue, "fields.updated", fields::MISSING);
    let status_changed_raw = fields::field_value(issue, "fields.statuscategorychangedate", fields::MISSING);
    let key = fields::issue_key(issue);

    let mut row = ReportRow::new();
    row.insert(
      "Summary".to_string(),
      fields::field_value(issue, "fields.summary", fields::MISSING),
    );
    row.insert("Status".to_string(), fields::status_name(issue));
    row.insert("Assignee".to_string(), fields::assignee_name(issue));
    row.insert(
      "Created".to_string(),
      dates::normalize_timestamp(&created_raw, dates::DISPLAY_FORMAT),
    );
    row.insert(
      "Last Updated".to_string(),
      dates::normalize_timestamp(&updated_raw, dates::DISPLAY_FORMAT),
    );
    row.insert(
      "Status Changed".to_string(),
      dates::normalize_timestamp(&status_changed_raw, dates::DISPLAY_FORMAT),
    );
    row.insert("URL".to_string(), fields::issue_url(&self.server, &key));
    row.insert("ID".to_string(), key);

    row
  }

  fn headers(&self) -> Vec<&'static str> {
    vec![
      "ID",
      "Summary",
      "Status",
      "Assignee",
      "Created",
      "Last Updated",
      "Status Changed",
      "URL",
    ]
  }

  fn output_name(&self) -> String {
    "stale_tickets.csv".to_string()
  }

  fn display(&self, rows: &[ReportRow]) {
    println!("\nStale tickets (no status change in the last {} months):", self.months);
    println!("{}", "=".repeat(80));

    let groups = group_by_project(rows, "ID");
    let mut total = 0usize;

    for (project, board_id, board_name) in BOARDS {
      let tickets = groups.get(project).map(Vec::as_slice).unwrap_or(&[]);

      println!("\n{} (Project: {}, Board ID: {})", board_name, project, board_id);
      println!("{}", "-".repeat(60));

      if tickets.is_empty() {
        println!("No stale tickets found.");
        continue;
      }

      println!("Found {} stale ticket(s):", tickets.len());

      for row in tickets {
        println!("\n  {}: {}", cell(row, "ID"), cell(row, "Summary"));
        println!("     Status: {}", cell(row, "Status"));
        println!("     Assignee: {}", cell(row, "Assignee"));
        println!("     Last Updated: {}", cell(row, "Last Updated"));
        println!("     Status Changed: {}", cell(row, "Status Changed"));
        println!("     URL: {}", cell(row, "URL"));
      }

      total += tickets.len();
    }

    println!("\n{}", "=".repeat(80));
    println!("Total stale tickets across all boards: {}", total);
    println!("{}", "=".repeat(80));
  }
}
