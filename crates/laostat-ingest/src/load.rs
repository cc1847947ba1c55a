//! Column-validated typed decode of every sheet into a [`Snapshot`].
//!
//! Each loader resolves its expected columns by name up front, so a renamed
//! or missing source column fails the whole load with the sheet and column
//! named, instead of surfacing as a wrong aggregate later.

use chrono::Utc;
use laostat_core::{
  DiseaseReport, HostCategory, NeighbourEvent, NewsArticle, RegionProfile,
  Sheet, SheetSource, Snapshot, WeatherReading,
};

use crate::{
  error::{Error, Result},
  normalize::{
    clean_disease_name, normalize_province, parse_date,
    parse_datetime_dayfirst,
  },
};

// Sheet names in the source document.
pub const SHEET_REPORTS: &str = "laos_data";
pub const SHEET_REGIONS: &str = "laos_regions";
pub const SHEET_WEATHER: &str = "weather_data";
pub const SHEET_NEWS: &str = "news_data";
pub const SHEET_NEIGHBOURS: &str = "neighbours_data";

/// Load and join all five sheets into one immutable snapshot.
pub fn load_snapshot<S>(source: &S) -> Result<Snapshot>
where
  S: SheetSource,
{
  let regions = load_regions(fetch(source, SHEET_REGIONS)?)?;
  let reports = load_reports(fetch(source, SHEET_REPORTS)?, &regions)?;
  let weather = load_weather(fetch(source, SHEET_WEATHER)?)?;
  let news = load_news(fetch(source, SHEET_NEWS)?)?;
  let neighbours = load_neighbours(fetch(source, SHEET_NEIGHBOURS)?)?;

  tracing::info!(
    reports = reports.len(),
    regions = regions.len(),
    weather = weather.len(),
    news = news.len(),
    neighbours = neighbours.len(),
    "snapshot loaded"
  );

  Ok(Snapshot {
    reports,
    regions,
    weather,
    news,
    neighbours,
    fetched_at: Utc::now(),
  })
}

fn fetch<S: SheetSource>(source: &S, name: &str) -> Result<Sheet> {
  source.sheet(name).map_err(Error::source)
}

// ─── Numeric cells ───────────────────────────────────────────────────────────

fn require_f64(
  sheet: &Sheet,
  row_ix: usize,
  column: &str,
  raw: &str,
) -> Result<f64> {
  raw.trim().parse::<f64>().map_err(|_| {
    Error::Schema(laostat_core::Error::InvalidNumber {
      sheet:  sheet.name.clone(),
      row:    row_ix,
      column: column.to_string(),
      value:  raw.to_string(),
    })
  })
}

fn require_cases(
  sheet: &Sheet,
  row_ix: usize,
  column: &str,
  raw: &str,
) -> Result<u32> {
  // Sheets export counts as floats ("12.0"); accept those too.
  let n = require_f64(sheet, row_ix, column, raw)?;
  if n < 0.0 || n.fract() != 0.0 || n > u32::MAX as f64 {
    return Err(Error::Schema(laostat_core::Error::InvalidNumber {
      sheet:  sheet.name.clone(),
      row:    row_ix,
      column: column.to_string(),
      value:  raw.to_string(),
    }));
  }
  Ok(n as u32)
}

// ─── Per-sheet loaders ───────────────────────────────────────────────────────

fn load_regions(sheet: Sheet) -> Result<Vec<RegionProfile>> {
  let province = sheet.column("province")?;
  let capital = sheet.column("capital")?;
  let latitude = sheet.column("latitude")?;
  let longitude = sheet.column("longitude")?;

  let mut out = Vec::with_capacity(sheet.rows.len());
  for (i, row) in sheet.rows.iter().enumerate() {
    if Sheet::is_blank_row(row) {
      continue;
    }
    out.push(RegionProfile {
      province:  normalize_province(sheet.cell(row, province)),
      capital:   sheet.cell(row, capital).trim().to_string(),
      latitude:  require_f64(&sheet, i, "latitude", sheet.cell(row, latitude))?,
      longitude: require_f64(
        &sheet,
        i,
        "longitude",
        sheet.cell(row, longitude),
      )?,
    });
  }
  Ok(out)
}

fn load_reports(
  sheet: Sheet,
  regions: &[RegionProfile],
) -> Result<Vec<DiseaseReport>> {
  let reported_date = sheet.column("reported_date")?;
  let province = sheet.column("province")?;
  let location = sheet.column("location")?;
  let disease_code = sheet.column("disease_code")?;
  let case = sheet.column("case")?;

  let mut out = Vec::with_capacity(sheet.rows.len());
  for (i, row) in sheet.rows.iter().enumerate() {
    if Sheet::is_blank_row(row) {
      continue;
    }

    let loc = sheet.cell(row, location).trim().to_string();
    // Left join against the region lookup by capital; a miss keeps the row
    // but leaves the coordinates empty, which excludes it from map views.
    let coords = regions.iter().find(|r| r.capital == loc);

    out.push(DiseaseReport {
      reported_date: parse_date(sheet.cell(row, reported_date)),
      province:      normalize_province(sheet.cell(row, province)),
      location:      loc,
      disease_code:  sheet.cell(row, disease_code).trim().to_string(),
      cases:         require_cases(&sheet, i, "case", sheet.cell(row, case))?,
      latitude:      coords.map(|r| r.latitude),
      longitude:     coords.map(|r| r.longitude),
    });
  }
  Ok(out)
}

fn load_weather(sheet: Sheet) -> Result<Vec<WeatherReading>> {
  let region = sheet.column("region")?;
  let timestamp = sheet.column("timestamp")?;
  let temperature = sheet.column("temperature")?;
  let feels_like = sheet.column("feels_like")?;
  let humidity = sheet.column("humidity")?;
  let pressure = sheet.column("pressure")?;
  let wind_speed = sheet.column("wind_speed")?;
  let visibility = sheet.column("visibility")?;
  let description = sheet.column("description")?;
  let sunrise = sheet.column("sunrise")?;
  let sunset = sheet.column("sunset")?;

  let mut out = Vec::with_capacity(sheet.rows.len());
  for (i, row) in sheet.rows.iter().enumerate() {
    if Sheet::is_blank_row(row) {
      continue;
    }
    out.push(WeatherReading {
      region:      sheet.cell(row, region).trim().to_string(),
      timestamp:   parse_datetime_dayfirst(sheet.cell(row, timestamp)),
      temperature: require_f64(
        &sheet,
        i,
        "temperature",
        sheet.cell(row, temperature),
      )?,
      feels_like:  require_f64(
        &sheet,
        i,
        "feels_like",
        sheet.cell(row, feels_like),
      )?,
      humidity:    require_f64(&sheet, i, "humidity", sheet.cell(row, humidity))?,
      pressure:    require_f64(&sheet, i, "pressure", sheet.cell(row, pressure))?,
      wind_speed:  require_f64(
        &sheet,
        i,
        "wind_speed",
        sheet.cell(row, wind_speed),
      )?,
      visibility:  require_f64(
        &sheet,
        i,
        "visibility",
        sheet.cell(row, visibility),
      )?,
      description: sheet.cell(row, description).trim().to_string(),
      sunrise:     parse_datetime_dayfirst(sheet.cell(row, sunrise)),
      sunset:      parse_datetime_dayfirst(sheet.cell(row, sunset)),
    });
  }
  Ok(out)
}

fn load_news(sheet: Sheet) -> Result<Vec<NewsArticle>> {
  let title = sheet.column("title")?;
  let date = sheet.column("date")?;
  let tag = sheet.column("tag")?;
  let main_text = sheet.column("main_text")?;
  let image_url = sheet.column("image_url")?;
  let url = sheet.column("url")?;

  let mut out = Vec::with_capacity(sheet.rows.len());
  for row in &sheet.rows {
    if Sheet::is_blank_row(row) {
      continue;
    }
    out.push(NewsArticle {
      title:     sheet.cell(row, title).trim().to_string(),
      date:      parse_date(sheet.cell(row, date)),
      tag:       sheet.cell(row, tag).trim().to_string(),
      main_text: sheet.cell(row, main_text).trim().to_string(),
      image_url: sheet.cell(row, image_url).trim().to_string(),
      url:       sheet.cell(row, url).trim().to_string(),
    });
  }
  Ok(out)
}

fn load_neighbours(sheet: Sheet) -> Result<Vec<NeighbourEvent>> {
  let year = sheet.column("Year")?;
  let semester = sheet.column("Semester")?;
  let region = sheet.column("Region")?;
  let country = sheet.column("Country")?;
  let disease = sheet.column("Disease")?;
  let category = sheet.column("Category")?;
  let occurrence = sheet.column("Occurrence Code")?;
  let status = sheet.column("Disease status")?;

  let mut out = Vec::with_capacity(sheet.rows.len());
  for (i, row) in sheet.rows.iter().enumerate() {
    if Sheet::is_blank_row(row) {
      continue;
    }

    // Surveillance exports carry partial rows; anything without a category,
    // occurrence code and status is unusable and silently dropped.
    let occurrence_code = sheet.cell(row, occurrence).trim().to_string();
    let status_value = sheet.cell(row, status).trim().to_string();
    if occurrence_code.is_empty() || status_value.is_empty() {
      continue;
    }
    let Some(host) = HostCategory::parse(sheet.cell(row, category)) else {
      continue;
    };

    let year_raw = sheet.cell(row, year);
    let year_value = require_f64(&sheet, i, "Year", year_raw)? as i32;

    out.push(NeighbourEvent {
      year: year_value,
      semester: sheet.cell(row, semester).trim().to_string(),
      region: sheet.cell(row, region).trim().to_string(),
      country: sheet.cell(row, country).trim().to_string(),
      disease: clean_disease_name(sheet.cell(row, disease)),
      category: host,
      occurrence_code,
      status: status_value,
    });
  }
  Ok(out)
}
