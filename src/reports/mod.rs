// Concrete report definitions and the name registry the CLI dispatches on.

pub mod my_tickets;
pub mod recent_tickets;
pub mod stale_tickets;
pub mod status_changed;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::config::JiraConfig;
use crate::report::{cell, ReportDefinition, ReportRow};

/// Construct every report against the loaded configuration. `now` is the
/// optional override used to pin date-relative filters in tests.
pub fn all(cfg: &JiraConfig, now: Option<DateTime<Utc>>) -> Vec<Box<dyn ReportDefinition>> {
  vec![
    Box::new(status_changed::StatusChangedReport::new(cfg, now)),
    Box::new(stale_tickets::StaleTicketsReport::new(cfg, now)),
    Box::new(my_tickets::MyTicketsReport::new(cfg)),
    Box::new(recent_tickets::RecentTicketsReport::new(cfg, now)),
  ]
}

pub fn by_name(name: &str, cfg: &JiraConfig, now: Option<DateTime<Utc>>) -> Option<Box<dyn ReportDefinition>> {
  all(cfg, now).into_iter().find(|r| r.name() == name)
}

/// (name, about) pairs for `--list`, available without configuration.
pub fn catalog() -> Vec<(&'static str, &'static str)> {
  vec![
    (status_changed::NAME, status_changed::ABOUT),
    (stale_tickets::NAME, stale_tickets::ABOUT),
    (my_tickets::NAME, my_tickets::ABOUT),
    (recent_tickets::NAME, recent_tickets::ABOUT),
  ]
}

/// Group rows by the project prefix of their issue key (`DA-101` -> `DA`).
/// Display-only policy shared by the grouped reports.
pub(crate) fn group_by_project<'a>(rows: &'a [ReportRow], key_column: &str) -> BTreeMap<String, Vec<&'a ReportRow>> {
  let mut groups: BTreeMap<String, Vec<&ReportRow>> = BTreeMap::new();

  for row in rows {
    let project = cell(row, key_column).split('-').next().unwrap_or("").to_string();
    groups.entry(project).or_default().push(row);
  }

  groups
}
