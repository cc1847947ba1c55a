//! Cell-level normalization helpers.
//!
//! The source data is hand-maintained, so every textual key is cleaned
//! before it is used for joining or grouping. Dates follow a
//! coercion-with-null policy: a malformed cell becomes `None`, never an
//! error, and the row is excluded from date-indexed aggregations only.

use chrono::{NaiveDate, NaiveDateTime};

/// Normalize a province name for use as a join/group key.
///
/// Strips the literal word "province" (any case), collapses runs of
/// whitespace, and trims. `"Vientiane  Province"` and `"vientiane"` both
/// group under the same key modulo case of the remaining words.
pub fn normalize_province(raw: &str) -> String {
  raw
    .split_whitespace()
    .filter(|w| !w.eq_ignore_ascii_case("province"))
    .collect::<Vec<_>>()
    .join(" ")
}

/// Clean a disease name: drop surrounding double quotes and any
/// parenthesised suffix, e.g. `"Avian influenza (poultry)"` → `Avian
/// influenza`.
pub fn clean_disease_name(raw: &str) -> String {
  let mut out = String::with_capacity(raw.len());
  let mut depth = 0usize;
  for c in raw.chars() {
    match c {
      '"' => {}
      '(' => depth += 1,
      ')' => depth = depth.saturating_sub(1),
      _ if depth == 0 => out.push(c),
      _ => {}
    }
  }
  out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Month-first date coercion (sheet default). Accepts ISO dates as well.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
  let s = raw.trim();
  if s.is_empty() {
    return None;
  }
  for fmt in ["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y", "%d %b %Y"] {
    if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
      return Some(d);
    }
  }
  // Datetime cells pasted into date columns.
  parse_datetime(s).map(|dt| dt.date())
}

/// Day-first date coercion, used by the weather sheet.
pub fn parse_date_dayfirst(raw: &str) -> Option<NaiveDate> {
  let s = raw.trim();
  if s.is_empty() {
    return None;
  }
  for fmt in ["%d/%m/%Y", "%d/%m/%y", "%Y-%m-%d", "%d-%m-%Y"] {
    if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
      return Some(d);
    }
  }
  None
}

/// Month-first datetime coercion.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
  let s = raw.trim();
  if s.is_empty() {
    return None;
  }
  for fmt in [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
  ] {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
      return Some(dt);
    }
  }
  None
}

/// Day-first datetime coercion (weather timestamps, sunrise/sunset).
pub fn parse_datetime_dayfirst(raw: &str) -> Option<NaiveDateTime> {
  let s = raw.trim();
  if s.is_empty() {
    return None;
  }
  for fmt in [
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
  ] {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
      return Some(dt);
    }
  }
  // Bare dates are valid timestamps at midnight.
  parse_date_dayfirst(s).and_then(|d| d.and_hms_opt(0, 0, 0))
}
