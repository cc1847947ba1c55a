//! Loader tests against an in-memory sheet source.

use laostat_core::{Error as SchemaError, HostCategory};

use crate::{
  MemorySource,
  error::Error,
  load::load_snapshot,
  normalize::{clean_disease_name, normalize_province, parse_date},
};

fn source() -> MemorySource {
  MemorySource::new()
    .with_sheet(
      "laos_regions",
      &["province", "capital", "latitude", "longitude"],
      &[
        &["Vientiane Province", "Vientiane", "17.97", "102.6"],
        &["Champasak Province", "Pakse", "15.12", "105.81"],
      ],
    )
    .with_sheet(
      "laos_data",
      &["reported_date", "province", "location", "disease_code", "case"],
      &[
        &["2024-03-02", "Vientiane Province", "Vientiane", "HPAI-P", "4"],
        &["2024-04-15", "Champasak  Province", "Pakse", "ND", "12.0"],
        &["not-a-date", "Champasak", "Pakse", "ND", "3"],
        &["2024-05-01", "Luang Prabang", "Luang Prabang", "IBD", "7"],
        &["", "", "", "", ""],
      ],
    )
    .with_sheet(
      "weather_data",
      &[
        "region", "timestamp", "temperature", "feels_like", "humidity",
        "pressure", "wind_speed", "visibility", "description", "sunrise",
        "sunset",
      ],
      &[&[
        "Vientiane",
        "02/03/2024 14:00",
        "31.5",
        "34.0",
        "70",
        "1009",
        "3.2",
        "10.0",
        "scattered clouds",
        "02/03/2024 06:21",
        "02/03/2024 18:12",
      ]],
    )
    .with_sheet(
      "news_data",
      &["title", "date", "tag", "main_text", "image_url", "url"],
      &[&[
        "Outbreak contained",
        "2024-06-10",
        "Press Release",
        "Officials report...",
        "http://example.com/img.png",
        "http://example.com/a",
      ]],
    )
    .with_sheet(
      "neighbours_data",
      &[
        "Year", "Semester", "Region", "Country", "Disease", "Category",
        "Occurrence Code", "Disease status",
      ],
      &[
        &[
          "2024",
          "Jan-Jun-2024",
          "Asia",
          "Thailand",
          "\"Avian influenza (poultry)\"",
          "Domestic",
          "+",
          "Present",
        ],
        &["2024", "Jan-Jun-2024", "Asia", "Vietnam", "ND", "Captive", "+", "Present"],
        &["2024", "Jul-Dec-2024", "Asia", "Vietnam", "ND", "Wild", "", ""],
      ],
    )
}

// ─── Normalization ───────────────────────────────────────────────────────────

#[test]
fn province_word_stripped_case_insensitively() {
  assert_eq!(normalize_province("Vientiane Province"), "Vientiane");
  assert_eq!(normalize_province("Champasak  PROVINCE"), "Champasak");
  assert_eq!(normalize_province("  Luang   Prabang "), "Luang Prabang");
}

#[test]
fn disease_name_cleaning_strips_quotes_and_parens() {
  assert_eq!(
    clean_disease_name("\"Avian influenza (poultry)\""),
    "Avian influenza"
  );
  assert_eq!(clean_disease_name("Newcastle disease"), "Newcastle disease");
}

#[test]
fn malformed_dates_coerce_to_none() {
  assert!(parse_date("2024-03-02").is_some());
  assert!(parse_date("03/02/2024").is_some());
  assert!(parse_date("soon").is_none());
  assert!(parse_date("").is_none());
}

// ─── Typed load ──────────────────────────────────────────────────────────────

#[test]
fn load_snapshot_decodes_all_sheets() {
  let snapshot = load_snapshot(&source()).unwrap();
  assert_eq!(snapshot.reports.len(), 4); // blank row dropped
  assert_eq!(snapshot.regions.len(), 2);
  assert_eq!(snapshot.weather.len(), 1);
  assert_eq!(snapshot.news.len(), 1);
}

#[test]
fn report_provinces_are_normalized() {
  let snapshot = load_snapshot(&source()).unwrap();
  assert!(snapshot.reports.iter().all(|r| !r
    .province
    .to_lowercase()
    .contains("province")));
  assert_eq!(snapshot.reports[1].province, "Champasak");
}

#[test]
fn region_join_fills_coordinates_by_capital() {
  let snapshot = load_snapshot(&source()).unwrap();
  let vientiane = &snapshot.reports[0];
  assert_eq!(vientiane.latitude, Some(17.97));
  assert_eq!(vientiane.longitude, Some(102.6));

  // No region row has "Luang Prabang" as its capital; the row survives the
  // join with empty coordinates.
  let unmatched = &snapshot.reports[3];
  assert!(unmatched.latitude.is_none());
}

#[test]
fn float_formatted_counts_are_accepted() {
  let snapshot = load_snapshot(&source()).unwrap();
  assert_eq!(snapshot.reports[1].cases, 12);
}

#[test]
fn malformed_report_date_is_null_not_error() {
  let snapshot = load_snapshot(&source()).unwrap();
  assert!(snapshot.reports[2].reported_date.is_none());
}

#[test]
fn missing_column_fails_with_sheet_and_column_named() {
  let bad = source().with_sheet(
    "laos_data",
    &["reported_date", "province", "location", "code", "case"],
    &[],
  );
  let err = load_snapshot(&bad).unwrap_err();
  match err {
    Error::Schema(SchemaError::MissingColumn { sheet, column }) => {
      assert_eq!(sheet, "laos_data");
      assert_eq!(column, "disease_code");
    }
    other => panic!("unexpected error: {other}"),
  }
}

#[test]
fn missing_sheet_is_a_backend_error() {
  let bad = MemorySource::new();
  assert!(load_snapshot(&bad).is_err());
}

#[test]
fn invalid_case_count_is_an_error() {
  let bad = source().with_sheet(
    "laos_data",
    &["reported_date", "province", "location", "disease_code", "case"],
    &[&["2024-03-02", "Vientiane", "Vientiane", "HPAI-P", "many"]],
  );
  let err = load_snapshot(&bad).unwrap_err();
  assert!(matches!(
    err,
    Error::Schema(SchemaError::InvalidNumber { .. })
  ));
}

// ─── Neighbours ──────────────────────────────────────────────────────────────

#[test]
fn neighbour_rows_keep_only_wild_and_domestic() {
  let snapshot = load_snapshot(&source()).unwrap();
  assert_eq!(snapshot.neighbours.len(), 1);
  assert_eq!(snapshot.neighbours[0].category, HostCategory::Domestic);
}

#[test]
fn neighbour_disease_names_are_cleaned() {
  let snapshot = load_snapshot(&source()).unwrap();
  assert_eq!(snapshot.neighbours[0].disease, "Avian influenza");
}

#[test]
fn neighbour_rows_without_status_are_dropped() {
  // The third fixture row has an empty occurrence code and status.
  let snapshot = load_snapshot(&source()).unwrap();
  assert!(snapshot.neighbours.iter().all(|n| !n.status.is_empty()));
}

// ─── Weather ─────────────────────────────────────────────────────────────────

#[test]
fn weather_timestamps_parse_day_first() {
  let snapshot = load_snapshot(&source()).unwrap();
  let reading = &snapshot.weather[0];
  let ts = reading.timestamp.unwrap();
  assert_eq!(ts.format("%Y-%m-%d %H:%M").to_string(), "2024-03-02 14:00");
  assert!(reading.sunrise.is_some());
  assert!(reading.sunset.is_some());
}
