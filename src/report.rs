use std::collections::BTreeMap;

use anyhow::Result;

/// One display-ready row: column name to rendered value. Each report's
/// transform emits exactly the keys declared by its `headers()`.
pub type ReportRow = BTreeMap<String, String>;

/// Non-panicking cell access for display code.
pub fn cell<'a>(row: &'a ReportRow, key: &str) -> &'a str {
  row.get(key).map(String::as_str).unwrap_or("")
}

/// Behavior each concrete report supplies to the shared pipeline: the filter
/// expression, the requested field list, the row transform, the header order,
/// the export file name, and (optionally) a custom console renderer.
pub trait ReportDefinition {
  /// Stable CLI identifier (kebab-case).
  fn name(&self) -> &'static str;

  /// One-line description shown by `--list` and in the run banner.
  fn about(&self) -> &'static str;

  /// Build the JQL filter. The only fallible step before the network call;
  /// an error here aborts the run.
  fn build_jql(&self) -> Result<String>;

  /// Fields to request from the search API; bounds what transform may read.
  fn required_fields(&self) -> Vec<&'static str>;

  /// Reshape one raw issue into a row. Must be total: missing upstream data
  /// degrades to placeholder values, never to an absent key or a panic.
  fn transform(&self, issue: &serde_json::Value) -> ReportRow;

  /// Declared column order; the CSV header row and the key set of every row.
  fn headers(&self) -> Vec<&'static str>;

  /// Export file name (joined under the run's output directory).
  fn output_name(&self) -> String;

  /// Console rendering. Pure side effect; must not alter the rows.
  fn display(&self, rows: &[ReportRow]) {
    println!("\nResults:");
    println!("{}", "-".repeat(40));

    for row in rows {
      for key in self.headers() {
        println!("  {}: {}", key, cell(row, key));
      }
      println!();
    }
  }
}
