// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Normalize tracker timestamps to UTC display strings and build date-relative JQL literals
// role: utilities/time
// inputs: Raw ISO-8601 strings with optional fraction and ±HHMM offset; optional now override
// outputs: Formatted UTC strings; YYYY-MM-DD JQL date literals
// invariants:
// - normalize_timestamp never fails: unparseable input is returned verbatim
// - empty and "N/A" inputs round-trip unchanged
// - a returned value equal to the raw input means "unparsed" to downstream consumers
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// Default display pattern for normalized timestamps.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Placeholder the tracker (and our own extractors) use for absent values.
pub const PLACEHOLDER: &str = "N/A";

static RE_NEG_OFFSET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.*)-(\d{4})$").unwrap());

/// Convert a tracker timestamp such as `2024-10-17T14:30:45.123-0700` into a
/// UTC string rendered with `format`. Empty input and the `N/A` placeholder
/// pass through unchanged, as does anything that fails to parse.
pub fn normalize_timestamp(raw: &str, format: &str) -> String {
  if raw.is_empty() || raw == PLACEHOLDER {
    return raw.to_string();
  }

  match parse_to_utc(raw) {
    Some(dt) => dt.format(format).to_string(),
    None => raw.to_string(),
  }
}

fn parse_to_utc(raw: &str) -> Option<NaiveDateTime> {
  let has_plus = raw.contains('+');
  let many_dashes = raw.matches('-').count() > 2;

  if has_plus || many_dashes {
    let (naive_part, offset_minutes) = split_offset(raw)?;
    let naive = parse_naive(naive_part)?;

    // UTC = naive local time minus its offset.
    return naive.checked_sub_signed(Duration::minutes(offset_minutes));
  }

  // No offset marker at all: assume UTC, clipping trailing decoration
  // (a `Z`, surplus fractional digits) before parsing.
  let cut = if raw.contains('.') { 23 } else { 19 };
  let head = if raw.len() > cut {
    raw.get(..cut).unwrap_or(raw)
  } else {
    raw
  };

  parse_naive(head)
}

/// Split a timestamp into its naive part and a signed offset in minutes.
/// `+HHMM` takes the positive branch; a trailing `-HHMM` (only recognizable
/// once the two date dashes are accounted for) takes the negative branch;
/// absence of either is treated as UTC. A `+` followed by anything other
/// than four digits is malformed and yields None.
fn split_offset(raw: &str) -> Option<(&str, i64)> {
  if let Some(idx) = raw.rfind('+') {
    let minutes = parse_hhmm(&raw[idx + 1..])?;
    return Some((&raw[..idx], minutes));
  }

  if raw.matches('-').count() > 2 {
    if let Some(caps) = RE_NEG_OFFSET.captures(raw) {
      let head = caps.get(1).map(|m| m.as_str())?;
      let minutes = parse_hhmm(caps.get(2).map(|m| m.as_str())?)?;
      return Some((head, -minutes));
    }
  }

  Some((raw, 0))
}

fn parse_hhmm(tail: &str) -> Option<i64> {
  if tail.len() != 4 || !tail.bytes().all(|b| b.is_ascii_digit()) {
    return None;
  }

  let hours: i64 = tail[..2].parse().ok()?;
  let minutes: i64 = tail[2..].parse().ok()?;

  Some(hours * 60 + minutes)
}

fn parse_naive(s: &str) -> Option<NaiveDateTime> {
  let fmt = if s.contains('.') {
    "%Y-%m-%dT%H:%M:%S%.f"
  } else {
    "%Y-%m-%dT%H:%M:%S"
  };

  NaiveDateTime::parse_from_str(s, fmt).ok()
}

/// Returns the effective "now" given an optional override.
///
/// When `override_now` is `Some`, that instant is returned; otherwise the
/// current UTC time is used. Centralizes our handling of test determinism
/// without sprinkling `Utc::now()` throughout the reports.
pub fn effective_now(override_now: Option<DateTime<Utc>>) -> DateTime<Utc> {
  override_now.unwrap_or_else(Utc::now)
}

/// Parse a hidden `--now-override` value: RFC3339 or a bare `YYYY-MM-DD`.
pub fn parse_now(s: Option<&str>) -> Option<DateTime<Utc>> {
  s.and_then(|raw| {
    DateTime::parse_from_rfc3339(raw)
      .ok()
      .map(|dt| dt.with_timezone(&Utc))
      .or_else(|| {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
          .ok()
          .and_then(|d| d.and_hms_opt(0, 0, 0))
          .map(|ndt| Utc.from_utc_datetime(&ndt))
      })
  })
}

/// The instant `days` days before `now`.
pub fn days_ago(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
  now - Duration::days(days)
}

/// Format an instant as a JQL date literal (`YYYY-MM-DD`).
pub fn jql_date(dt: DateTime<Utc>) -> String {
  dt.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
  use super::*;
  use proptest::prelude::*;

  #[test]
  fn zero_offset_reformats_clock_time() {
    assert_eq!(
      normalize_timestamp("2024-10-17T14:30:45.123+0000", "%Y-%m-%d %H:%M:%S"),
      "2024-10-17 14:30:45"
    );
    assert_eq!(
      normalize_timestamp("2024-10-17T14:30:45+0000", DISPLAY_FORMAT),
      "2024-10-17 14:30"
    );
  }

  #[test]
  fn positive_offset_subtracts() {
    assert_eq!(
      normalize_timestamp("2024-10-17T14:30:45.123+0100", "%Y-%m-%d %H:%M:%S"),
      "2024-10-17 13:30:45"
    );
  }

  #[test]
  fn negative_offset_adds() {
    assert_eq!(
      normalize_timestamp("2024-10-17T14:30:45.123-0700", "%Y-%m-%d %H:%M:%S"),
      "2024-10-17 21:30:45"
    );
  }

  #[test]
  fn offset_minutes_apply_independently() {
    assert_eq!(
      normalize_timestamp("2024-10-17T14:30:45+0530", "%Y-%m-%d %H:%M:%S"),
      "2024-10-17 09:00:45"
    );
  }

  #[test]
  fn missing_offset_is_treated_as_utc() {
    assert_eq!(
      normalize_timestamp("2024-10-17T14:30:45", DISPLAY_FORMAT),
      "2024-10-17 14:30"
    );
    assert_eq!(
      normalize_timestamp("2024-10-17T14:30:45.123456", DISPLAY_FORMAT),
      "2024-10-17 14:30"
    );
    // Trailing decoration after the seconds is clipped, not fatal.
    assert_eq!(
      normalize_timestamp("2024-10-17T14:30:45Z", DISPLAY_FORMAT),
      "2024-10-17 14:30"
    );
  }

  #[test]
  fn midnight_rollover_crosses_date() {
    assert_eq!(
      normalize_timestamp("2024-01-01T00:10:00+0100", DISPLAY_FORMAT),
      "2023-12-31 23:10"
    );
  }

  #[test]
  fn malformed_input_round_trips() {
    assert_eq!(normalize_timestamp("not-a-date", DISPLAY_FORMAT), "not-a-date");
    // Colon-separated offsets are not the tracker's wire shape.
    assert_eq!(
      normalize_timestamp("2024-10-17T14:30:45+07:00", DISPLAY_FORMAT),
      "2024-10-17T14:30:45+07:00"
    );
    assert_eq!(
      normalize_timestamp("2024-10-17T14:30:45-07:00", DISPLAY_FORMAT),
      "2024-10-17T14:30:45-07:00"
    );
  }

  #[test]
  fn empty_and_placeholder_round_trip() {
    assert_eq!(normalize_timestamp("", DISPLAY_FORMAT), "");
    assert_eq!(normalize_timestamp("N/A", DISPLAY_FORMAT), "N/A");
  }

  #[test]
  fn parse_now_accepts_rfc3339_and_bare_dates() {
    let d = parse_now(Some("2024-10-17")).unwrap();
    assert_eq!(jql_date(d), "2024-10-17");

    let t = parse_now(Some("2024-10-17T09:00:00Z")).unwrap();
    assert_eq!(t.format("%H:%M").to_string(), "09:00");

    assert!(parse_now(Some("last tuesday")).is_none());
    assert!(parse_now(None).is_none());
  }

  #[test]
  fn days_ago_builds_jql_cutoffs() {
    let now = parse_now(Some("2024-10-17")).unwrap();
    assert_eq!(jql_date(days_ago(now, 27)), "2024-09-20");
    assert_eq!(jql_date(days_ago(now, 90)), "2024-07-19");
  }

  proptest! {
    // With a +0000 offset the normalizer only reformats: the clock time in
    // the output must equal the clock time in the input.
    #[test]
    fn zero_offset_is_reformat_only(
      y in 1990i32..2100,
      mo in 1u32..=12,
      d in 1u32..=28,
      h in 0u32..24,
      mi in 0u32..60,
      s in 0u32..60,
    ) {
      let raw = format!("{y:04}-{mo:02}-{d:02}T{h:02}:{mi:02}:{s:02}+0000");
      let expect = format!("{y:04}-{mo:02}-{d:02} {h:02}:{mi:02}:{s:02}");
      prop_assert_eq!(normalize_timestamp(&raw, "%Y-%m-%d %H:%M:%S"), expect);
    }
  }
}
