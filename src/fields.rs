// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Safe, default-valued field extraction from loosely-typed issue records
// role: utilities/extraction
// inputs: serde_json::Value issue trees from the search API
// outputs: Display-ready strings; callers never see a panic or an absent key
// invariants:
// - Every accessor returns a value for every structurally valid record
// - status/assignee tolerate the field being absent, null, a bare string, or a nested object
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use crate::ext::serde_json::JsonFetch;

/// Placeholder for data the record does not carry.
pub const MISSING: &str = "N/A";

/// Dotted-path field lookup with an explicit default for missing/null values.
pub fn field_value(issue: &serde_json::Value, path: &str, default: &str) -> String {
  issue.fetch(path).display_or(default)
}

/// The issue key (`DA-101`), or the placeholder when absent.
pub fn issue_key(issue: &serde_json::Value) -> String {
  issue.fetch("key").display_or(MISSING)
}

/// Browse URL for an issue key on the configured server.
pub fn issue_url(server: &str, key: &str) -> String {
  format!("{}/browse/{}", server.trim_end_matches('/'), key)
}

/// The status display name, or `Unknown` when the field is absent, null, or
/// carries no name. A bare string status is taken verbatim.
pub fn status_name(issue: &serde_json::Value) -> String {
  shape_tolerant_name(issue, "fields.status", "name", "Unknown")
}

/// The assignee display name, or `Unassigned`. Same shape tolerance as status.
pub fn assignee_name(issue: &serde_json::Value) -> String {
  shape_tolerant_name(issue, "fields.assignee", "displayName", "Unassigned")
}

/// Name lookup on a field that may be an object, a bare string, null, or
/// absent. Objects resolve through `name_key`; bare strings pass through.
fn shape_tolerant_name(issue: &serde_json::Value, path: &str, name_key: &str, fallback: &str) -> String {
  match issue.fetch(path).value() {
    None | Some(serde_json::Value::Null) => fallback.to_string(),
    Some(serde_json::Value::Object(map)) => map
      .get(name_key)
      .and_then(|v| v.as_str())
      .unwrap_or(fallback)
      .to_string(),
    Some(serde_json::Value::String(s)) => s.clone(),
    Some(other) => other.to_string(),
  }
}

/// Strict variant for fields like priority/reporter where anything other than
/// an object with `name_key` renders as the fallback.
pub fn object_name(issue: &serde_json::Value, path: &str, name_key: &str, fallback: &str) -> String {
  match issue.fetch(path).value() {
    Some(serde_json::Value::Object(map)) => map
      .get(name_key)
      .and_then(|v| v.as_str())
      .unwrap_or(fallback)
      .to_string(),
    _ => fallback.to_string(),
  }
}
