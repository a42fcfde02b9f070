// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: CSV export of report rows with fixed headers; fail-soft on every I/O fault
// role: output/export
// inputs: Destination path, ordered rows, declared header order
// outputs: UTF-8 comma-separated file; header row always present
// side_effects: Creates parent directories; writes one file
// invariants:
// - Never raises to the caller; faults are logged to stderr and swallowed
// - Header row is written even for an empty row set
// - Rows are written in arrival order; columns follow the declared header order
// errors: Logged with the destination path; the process continues
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::Path;

use anyhow::{Context, Result};

use crate::report::{cell, ReportRow};

/// Write `rows` to `path` under the declared `headers`. All faults are
/// reported on stderr; none propagate.
pub fn write_csv(path: &Path, rows: &[ReportRow], headers: &[&str]) {
  match try_write(path, rows, headers) {
    Ok(()) => println!("Exported {} row(s) to {}", rows.len(), path.display()),
    Err(err) => eprintln!("[csv] failed to write {}: {:#}", path.display(), err),
  }
}

fn try_write(path: &Path, rows: &[ReportRow], headers: &[&str]) -> Result<()> {
  if let Some(parent) = path.parent() {
    if !parent.as_os_str().is_empty() {
      std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
  }

  let mut writer = csv::Writer::from_path(path).with_context(|| "opening export file")?;

  writer.write_record(headers)?;

  for row in rows {
    let record: Vec<&str> = headers.iter().map(|h| cell(row, h)).collect();
    writer.write_record(&record)?;
  }

  writer.flush()?;

  Ok(())
}
