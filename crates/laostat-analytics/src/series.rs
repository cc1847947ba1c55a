//! Calendar bucketing of dated reports.
//!
//! Rows with a null `reported_date` are excluded here and only here; they
//! still count toward the non-temporal KPIs in [`crate::aggregate`].
//!
//! Bucketing policy: the plain monthly
//! series omits empty months entirely, while the pivoted charts (month ×
//! disease, year × disease) are zero-filled across the full range.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};
use laostat_core::DiseaseReport;

use crate::{
  figure::{
    BarChart, BarSeries, StackedArea, StackedAreaLayer, TimeSeries,
    TimeSeriesPoint,
  },
  palette,
};

/// First day of the report's calendar month.
fn month_bucket(date: NaiveDate) -> NaiveDate {
  NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
    .unwrap_or(date)
}

fn next_month(month: NaiveDate) -> NaiveDate {
  let (y, m) = if month.month() == 12 {
    (month.year() + 1, 1)
  } else {
    (month.year(), month.month() + 1)
  };
  NaiveDate::from_ymd_opt(y, m, 1).unwrap_or(month)
}

/// Every calendar month from `first` to `last` inclusive.
fn month_range(first: NaiveDate, last: NaiveDate) -> Vec<NaiveDate> {
  let mut months = Vec::new();
  let mut m = first;
  while m <= last {
    months.push(m);
    m = next_month(m);
  }
  months
}

/// Reports dated within the last `days` days of `today` (inclusive cutoff).
pub fn recent_reports(
  reports: &[DiseaseReport],
  days: i64,
  today: NaiveDate,
) -> Vec<DiseaseReport> {
  let cutoff = today - chrono::Duration::days(days);
  reports
    .iter()
    .filter(|r| r.reported_date.is_some_and(|d| d >= cutoff))
    .cloned()
    .collect()
}

/// Monthly case totals. Empty months are absent, so every point lies within
/// the min/max month of the input.
pub fn monthly_case_totals(
  reports: &[DiseaseReport],
) -> Vec<TimeSeriesPoint> {
  let mut sums: BTreeMap<NaiveDate, u64> = BTreeMap::new();
  for r in reports {
    if let Some(d) = r.reported_date {
      *sums.entry(month_bucket(d)).or_insert(0) += r.cases as u64;
    }
  }
  sums
    .into_iter()
    .map(|(date, value)| TimeSeriesPoint { date, value })
    .collect()
}

/// The overview outbreak-over-time series.
pub fn outbreak_series(reports: &[DiseaseReport]) -> TimeSeries {
  TimeSeries {
    title:  "Number of Cases Reported overtime".to_string(),
    color:  "#00afb9".to_string(),
    points: monthly_case_totals(reports),
  }
}

/// Sorted distinct disease codes; fixes the layer/series order everywhere.
fn disease_codes(reports: &[DiseaseReport]) -> Vec<String> {
  reports
    .iter()
    .map(|r| r.disease_code.clone())
    .collect::<BTreeSet<_>>()
    .into_iter()
    .collect()
}

/// Month × disease pivot, zero-filled over the full month range.
fn monthly_pivot(
  reports: &[DiseaseReport],
) -> (Vec<NaiveDate>, Vec<String>, BTreeMap<(NaiveDate, String), u64>) {
  let codes = disease_codes(reports);
  let mut cells: BTreeMap<(NaiveDate, String), u64> = BTreeMap::new();
  let mut first: Option<NaiveDate> = None;
  let mut last: Option<NaiveDate> = None;

  for r in reports {
    let Some(d) = r.reported_date else { continue };
    let m = month_bucket(d);
    first = Some(first.map_or(m, |f| f.min(m)));
    last = Some(last.map_or(m, |l| l.max(m)));
    *cells.entry((m, r.disease_code.clone())).or_insert(0) +=
      r.cases as u64;
  }

  let months = match (first, last) {
    (Some(f), Some(l)) => month_range(f, l),
    _ => Vec::new(),
  };
  (months, codes, cells)
}

/// Cumulative stacked area of monthly cases per disease code.
///
/// Layers stack in code order; layer i's fill baseline is layer i-1's
/// running total.
pub fn stacked_monthly_by_disease(reports: &[DiseaseReport]) -> StackedArea {
  let (months, codes, cells) = monthly_pivot(reports);

  let mut running = vec![0u64; months.len()];
  let mut layers = Vec::with_capacity(codes.len());
  for (i, code) in codes.iter().enumerate() {
    let values: Vec<u64> = months
      .iter()
      .map(|m| cells.get(&(*m, code.clone())).copied().unwrap_or(0))
      .collect();
    for (acc, v) in running.iter_mut().zip(&values) {
      *acc += v;
    }
    layers.push(StackedAreaLayer {
      name:   code.clone(),
      color:  palette::color(i).to_string(),
      values,
      upper:  running.clone(),
    });
  }

  StackedArea {
    title: "Stacked Disease Reports Over Time".to_string(),
    dates: months,
    layers,
  }
}

/// Year × disease grouped bars, zero-filled.
pub fn yearly_by_disease(reports: &[DiseaseReport]) -> BarChart {
  let codes = disease_codes(reports);
  let mut years: BTreeSet<i32> = BTreeSet::new();
  let mut cells: BTreeMap<(i32, String), u64> = BTreeMap::new();
  for r in reports {
    let Some(d) = r.reported_date else { continue };
    years.insert(d.year());
    *cells
      .entry((d.year(), r.disease_code.clone()))
      .or_insert(0) += r.cases as u64;
  }

  let years: Vec<i32> = years.into_iter().collect();
  let series = codes
    .iter()
    .enumerate()
    .map(|(i, code)| BarSeries {
      name:   code.clone(),
      color:  palette::color(i).to_string(),
      values: years
        .iter()
        .map(|y| {
          cells.get(&(*y, code.clone())).copied().unwrap_or(0) as f64
        })
        .collect(),
    })
    .collect();

  BarChart {
    title:      "Yearly Distribution of Disease Cases".to_string(),
    categories: years.iter().map(|y| y.to_string()).collect(),
    series,
    stacked:    false,
  }
}

/// Province × disease stacked bars.
pub fn cases_by_province(reports: &[DiseaseReport]) -> BarChart {
  let codes = disease_codes(reports);
  let mut provinces: BTreeSet<String> = BTreeSet::new();
  let mut cells: BTreeMap<(String, String), u64> = BTreeMap::new();
  for r in reports {
    provinces.insert(r.province.clone());
    *cells
      .entry((r.province.clone(), r.disease_code.clone()))
      .or_insert(0) += r.cases as u64;
  }

  let provinces: Vec<String> = provinces.into_iter().collect();
  let series = codes
    .iter()
    .enumerate()
    .map(|(i, code)| BarSeries {
      name:   code.clone(),
      color:  palette::color(i).to_string(),
      values: provinces
        .iter()
        .map(|p| {
          cells
            .get(&(p.clone(), code.clone()))
            .copied()
            .unwrap_or(0) as f64
        })
        .collect(),
    })
    .collect();

  BarChart {
    title:      "Distribution of Disease Cases by Province".to_string(),
    categories: provinces,
    series,
    stacked:    true,
  }
}
