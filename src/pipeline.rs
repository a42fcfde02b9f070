// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Orchestrate one report run: build filter, fetch, transform, display, export
// role: processing/orchestrator
// inputs: A ReportDefinition, a SearchClient, output directory, page cap
// outputs: Console summary; one CSV file under the output directory
// side_effects: One network call via the client; one file write via the exporter
// invariants:
// - Single pass, no retries; filter-build failure aborts before any network call
// - An empty fetch short-circuits: display and export are skipped (normal outcome)
// - Export failure is logged by the exporter and does not fail the run
// errors: Only build_jql errors propagate
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::Path;

use anyhow::Result;

use crate::export;
use crate::jira::SearchClient;
use crate::report::{ReportDefinition, ReportRow};

pub fn run_report(
  report: &dyn ReportDefinition,
  client: &SearchClient,
  out_dir: &Path,
  max_results: u32,
) -> Result<()> {
  println!("{}", "=".repeat(80));
  println!("{}", report.about());
  println!("{}", "=".repeat(80));

  // Phase 1: build the filter; the only fatal step.
  let jql = report.build_jql()?;
  let fields = report.required_fields();

  // Phase 2: fetch. Failures have already degraded to an empty list.
  let issues = client.search(&jql, &fields, max_results);

  if issues.is_empty() {
    println!("No issues matched the report criteria.");
    return Ok(());
  }

  // Phase 3: transform every record; transforms are total.
  let rows: Vec<ReportRow> = issues.iter().map(|issue| report.transform(issue)).collect();

  // Phase 4: render, then export.
  report.display(&rows);

  let path = out_dir.join(report.output_name());
  export::write_csv(&path, &rows, &report.headers());

  Ok(())
}
