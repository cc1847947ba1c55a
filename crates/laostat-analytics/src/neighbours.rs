//! Cross-border surveillance views.

use std::collections::BTreeMap;

use laostat_core::{HostCategory, NeighbourEvent};

use crate::{
  figure::{BarChart, BarSeries, HorizontalBars},
  palette,
};

/// Years the neighbouring-stats tab reports on.
pub const REPORTING_YEARS: [i32; 2] = [2024, 2025];

/// Cleaning step: keep only the reporting years and rewrite semester
/// prefixes to the short display form (`Jan-Jun-` → `S1-`, `Jul-Dec-` →
/// `S2-`).
pub fn clean(events: &[NeighbourEvent]) -> Vec<NeighbourEvent> {
  events
    .iter()
    .filter(|e| REPORTING_YEARS.contains(&e.year))
    .map(|e| {
      let mut e = e.clone();
      e.semester = e
        .semester
        .replace("Jan-Jun-", "S1-")
        .replace("Jul-Dec-", "S2-");
      e
    })
    .collect()
}

/// Restrict to the selected countries. An empty selection keeps everything.
pub fn filter_countries(
  events: &[NeighbourEvent],
  countries: &[String],
) -> Vec<NeighbourEvent> {
  if countries.is_empty() {
    return events.to_vec();
  }
  events
    .iter()
    .filter(|e| countries.iter().any(|c| c == &e.country))
    .cloned()
    .collect()
}

/// Wild vs Domestic record counts per country, grouped bars.
pub fn category_by_country(events: &[NeighbourEvent]) -> BarChart {
  let mut counts: BTreeMap<(String, HostCategory), u64> = BTreeMap::new();
  let mut countries: BTreeMap<String, ()> = BTreeMap::new();
  for e in events {
    countries.insert(e.country.clone(), ());
    *counts.entry((e.country.clone(), e.category)).or_insert(0) += 1;
  }

  let countries: Vec<String> = countries.into_keys().collect();
  let series = [HostCategory::Wild, HostCategory::Domestic]
    .iter()
    .enumerate()
    .map(|(i, &cat)| BarSeries {
      name:   cat.label().to_string(),
      color:  palette::color(i).to_string(),
      values: countries
        .iter()
        .map(|c| {
          counts.get(&(c.clone(), cat)).copied().unwrap_or(0) as f64
        })
        .collect(),
    })
    .collect();

  BarChart {
    title:      "Wild vs Domestic Case Counts by Country".to_string(),
    categories: countries,
    series,
    stacked:    false,
  }
}

/// Count of `Present` records per disease, smallest first.
pub fn present_diseases(events: &[NeighbourEvent]) -> HorizontalBars {
  let mut counts: BTreeMap<String, u64> = BTreeMap::new();
  for e in events.iter().filter(|e| e.status == "Present") {
    *counts.entry(e.disease.clone()).or_insert(0) += 1;
  }

  let mut pairs: Vec<(String, u64)> = counts.into_iter().collect();
  pairs.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));

  HorizontalBars {
    title:  "Reported Disease Counts in Recent Years".to_string(),
    color:  palette::color(0).to_string(),
    labels: pairs.iter().map(|(d, _)| d.clone()).collect(),
    values: pairs.iter().map(|(_, n)| *n).collect(),
  }
}
