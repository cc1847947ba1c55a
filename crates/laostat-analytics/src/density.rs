//! Gaussian kernel density estimates of case counts per disease code.

use std::collections::BTreeMap;

use laostat_core::DiseaseReport;

use crate::{
  figure::{DensityChart, DensityCurve},
  palette,
};

/// Number of evaluation points across the global case-value range.
const GRID_POINTS: usize = 200;

/// Scott's rule bandwidth: `σ · n^(-1/5)`.
///
/// A zero-variance or single-point sample gets a tiny positive bandwidth
/// instead, which turns the curve into a narrow spike at the sample value
/// rather than a division by zero.
fn bandwidth(sample: &[f64], span: f64) -> f64 {
  let n = sample.len() as f64;
  let mean = sample.iter().sum::<f64>() / n;
  let var = sample.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
  let h = var.sqrt() * n.powf(-0.2);
  if h > 0.0 {
    h
  } else {
    (span / GRID_POINTS as f64).max(1e-6)
  }
}

fn gaussian_pdf(z: f64) -> f64 {
  (-0.5 * z * z).exp() / (2.0 * std::f64::consts::PI).sqrt()
}

/// Evaluate the KDE of `sample` at each grid point.
fn kde(sample: &[f64], grid: &[f64], h: f64) -> Vec<f64> {
  let n = sample.len() as f64;
  grid
    .iter()
    .map(|&x| {
      sample
        .iter()
        .map(|&xi| gaussian_pdf((x - xi) / h))
        .sum::<f64>()
        / (n * h)
    })
    .collect()
}

/// One density curve per disease code, over a 200-point grid spanning the
/// global case min/max. Codes without any reports are skipped.
pub fn case_density_chart(reports: &[DiseaseReport]) -> DensityChart {
  let mut by_code: BTreeMap<String, Vec<f64>> = BTreeMap::new();
  for r in reports {
    by_code
      .entry(r.disease_code.clone())
      .or_default()
      .push(r.cases as f64);
  }

  let all: Vec<f64> = by_code.values().flatten().copied().collect();
  let Some((min, max)) = all
    .iter()
    .fold(None::<(f64, f64)>, |acc, &v| match acc {
      None => Some((v, v)),
      Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
  else {
    return DensityChart {
      title:  "Probability Distribution of Key Diseases".to_string(),
      curves: Vec::new(),
    };
  };

  let span = (max - min).max(1.0);
  let grid: Vec<f64> = (0..GRID_POINTS)
    .map(|i| min + span * i as f64 / (GRID_POINTS - 1) as f64)
    .collect();

  let curves = by_code
    .into_iter()
    .enumerate()
    .map(|(i, (code, sample))| {
      let h = bandwidth(&sample, span);
      DensityCurve {
        name:  code,
        color: palette::color(i).to_string(),
        x:     grid.clone(),
        y:     kde(&sample, &grid, h),
      }
    })
    .collect();

  DensityChart {
    title: "Probability Distribution of Key Diseases".to_string(),
    curves,
  }
}
