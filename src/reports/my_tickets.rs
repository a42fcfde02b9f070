use anyhow::Result;

use crate::config::JiraConfig;
use crate::dates;
use crate::fields;
use crate::report::{cell, ReportDefinition, ReportRow};
use crate::reports::group_by_project;

pub const NAME: &str = "my-tickets";
pub const ABOUT: &str = "Tickets assigned to the current user (DI/CCS boards)";

const PROJECTS: [&str; 2] = ["DI", "CCS"];
const BOARDS: [(&str, Option<u32>, &str); 2] = [("DI", Some(705), "DI Board"), ("CCS", None, "CCS Project")];

pub struct MyTicketsReport {
  server: String,
}

impl MyTicketsReport {
  pub fn new(cfg: &JiraConfig) -> Self {
    Self {
      server: cfg.server.clone(),
    }
  }
}

impl ReportDefinition for MyTicketsReport {
  fn name(&self) -> &'static str {
    NAME
  }

  fn about(&self) -> &'static str {
    ABOUT
  }

  fn build_jql(&self) -> Result<String> {
    let project_clause = PROJECTS
      .iter()
      .map(|p| format!("project = {}", p))
      .collect::<Vec<_>>()
      .join(" OR ");

    Ok(format!(
      "({}) AND assignee = currentUser() ORDER BY updated DESC",
      project_clause
    ))
  }

  fn required_fields(&self) -> Vec<&'static str> {
    vec!["summary", "status", "priority", "created", "updated", "reporter"]
  }

  fn transform(&self, issue: &serde_json::Value) -> ReportRow {
    let created_raw = fields::field_value(issue, "fields.created", fields::MISSING);
    let updated_raw = fields::field_value(issue, "fields.updated", fields::MISSING);
    let key = fields::issue_key(issue);

    let mut row = ReportRow::new();
    row.insert(
      "Summary".to_string(),
      fields::field_value(issue, "fields.summary", fields::MISSING),
    );
    row.insert("Status".to_string(), fields::status_name(issue));
    row.insert(
      "Priority".to_string(),
      fields::object_name(issue, "fields.priority", "name", "None"),
    );
    row.insert(
      "Reporter".to_string(),
      fields::object_name(issue, "fields.reporter", "displayName", "Unknown"),
    );
    row.insert(
      "Created".to_string(),
      dates::normalize_timestamp(&created_raw, dates::DISPLAY_FORMAT),
    );
    row.insert(
      "Last Updated".to_string(),
      dates::normalize_timestamp(&updated_raw, dates::DISPLAY_FORMAT),
    );
    row.insert("URL".to_string(), fields::issue_url(&self.server, &key));
    row.insert("Key".to_string(), key);

    row
  }

  fn headers(&self) -> Vec<&'static str> {
    vec![
      "Key",
      "Summary",
      "Status",
      "Priority",
      "Reporter",
      "Created",
      "Last Updated",
      "URL",
    ]
  }

  fn output_name(&self) -> String {
    "my_assigned_tickets.csv".to_string()
  }

  fn display(&self, rows: &[ReportRow]) {
    println!("\nMy assigned tickets");
    println!("{}", "=".repeat(80));

    let groups = group_by_project(rows, "Key");
    let mut total = 0usize;

    for (project, board_id, board_name) in BOARDS {
      let board_ref = match board_id {
        Some(id) => format!("Board ID: {}", id),
        None => "Project".to_string(),
      };

      println!("\n{} (Project: {}, {})", board_name, project, board_ref);
      println!("{}", "-".repeat(80));

      let tickets = groups.get(project).map(Vec::as_slice).unwrap_or(&[]);

      if tickets.is_empty() {
        println!("No tickets assigned to you.");
        continue;
      }

      println!("Found {} ticket(s) assigned to you:", tickets.len());

      for row in tickets {
        println!("\n  {}: {}", cell(row, "Key"), cell(row, "Summary"));
        println!("     Status: {}", cell(row, "Status"));
        println!("     Priority: {}", cell(row, "Priority"));
        println!("     Reporter: {}", cell(row, "Reporter"));
        println!("     Last Updated: {}", cell(row, "Last Updated"));
        println!("     URL: {}", cell(row, "URL"));
      }

      total += tickets.len();
    }

    println!("\n{}", "=".repeat(80));
    println!("Total tickets assigned to you across all boards: {}", total);
    println!("{}", "=".repeat(80));
  }
}
