//! Disease report rows and the static province lookup.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One disease report as loaded from the `laos_data` sheet, joined against
/// the province lookup.
///
/// `province` is normalized before it is used as a join or group key: the
/// literal word "province" is stripped and whitespace is collapsed. Rows
/// whose capital had no match in the region sheet carry `None` coordinates
/// and are silently excluded from geospatial views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseaseReport {
  /// `None` when the source cell failed date coercion; such rows are
  /// excluded from date-indexed aggregations but still count toward
  /// non-temporal totals.
  pub reported_date: Option<NaiveDate>,
  pub province:      String,
  /// Reporting location (the provincial capital in the source data).
  pub location:      String,
  /// Short fixed-vocabulary identifier, e.g. an avian-influenza strain code.
  pub disease_code:  String,
  pub cases:         u32,
  pub latitude:      Option<f64>,
  pub longitude:     Option<f64>,
}

/// A row of the static `laos_regions` lookup sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionProfile {
  pub province:  String,
  pub capital:   String,
  pub latitude:  f64,
  pub longitude: f64,
}
