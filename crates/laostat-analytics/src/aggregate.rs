//! Grouped sums and scalar KPIs over disease reports.

use std::collections::BTreeMap;

use laostat_core::DiseaseReport;

use crate::{
  figure::{DonutChart, DonutSlice},
  palette,
};

/// The disease codes singled out on the Key Diseases tab.
pub const KEY_DISEASES: [&str; 4] = ["HPAI-P", "ND", "IBD", "MG"];

/// Reports restricted to the key disease set.
pub fn key_disease_reports(reports: &[DiseaseReport]) -> Vec<DiseaseReport> {
  reports
    .iter()
    .filter(|r| KEY_DISEASES.contains(&r.disease_code.as_str()))
    .cloned()
    .collect()
}

/// Sum of `cases` over all reports. Counts every row, dated or not.
pub fn total_cases(reports: &[DiseaseReport]) -> u64 {
  reports.iter().map(|r| r.cases as u64).sum()
}

/// Case totals grouped by an arbitrary key. BTreeMap keeps group iteration
/// in ascending key order, which makes downstream tie-breaks deterministic.
pub fn case_sum_by<F>(reports: &[DiseaseReport], key: F) -> BTreeMap<String, u64>
where
  F: Fn(&DiseaseReport) -> &str,
{
  let mut sums = BTreeMap::new();
  for r in reports {
    *sums.entry(key(r).to_string()).or_insert(0u64) += r.cases as u64;
  }
  sums
}

/// Entry with the maximum value. Ties resolve to the lexicographically
/// smallest key; `None` on empty input.
fn max_entry(sums: &BTreeMap<String, u64>) -> Option<(String, u64)> {
  let mut best: Option<(&String, u64)> = None;
  for (k, &v) in sums {
    match best {
      Some((_, bv)) if v <= bv => {}
      _ => best = Some((k, v)),
    }
  }
  best.map(|(k, v)| (k.clone(), v))
}

/// Disease code with the highest case total.
pub fn most_viral(reports: &[DiseaseReport]) -> Option<(String, u64)> {
  max_entry(&case_sum_by(reports, |r| &r.disease_code))
}

/// Province with the highest case total.
pub fn most_affected(reports: &[DiseaseReport]) -> Option<(String, u64)> {
  max_entry(&case_sum_by(reports, |r| &r.province))
}

/// Donut of case totals per disease code.
pub fn disease_distribution(reports: &[DiseaseReport]) -> DonutChart {
  let slices = case_sum_by(reports, |r| &r.disease_code)
    .into_iter()
    .enumerate()
    .map(|(i, (label, value))| DonutSlice {
      label,
      value,
      color: palette::color(i).to_string(),
    })
    .collect();
  DonutChart { title: "Distribution of Key Disease".to_string(), slices }
}

/// Compact display form for KPI values: `1_500_000` → `"1.5 M"`.
pub fn format_kpi_value(value: f64, decimals: usize, prefix: &str) -> String {
  if value >= 1e6 {
    format!("{prefix}{:.decimals$} M", value / 1e6)
  } else if value >= 1e3 {
    format!("{prefix}{:.decimals$} K", value / 1e3)
  } else {
    format!("{prefix}{value:.2}")
  }
}
