//! Map-ready marker collections.
//!
//! Joins per-entity aggregates with coordinate lookups and emits scaled
//! markers. Entities without coordinates are silently excluded; the join
//! miss already logged at load time is not an error here.

use std::collections::BTreeMap;

use laostat_core::{DiseaseReport, RegionProfile, WeatherReading};

use crate::{
  aggregate::case_sum_by,
  figure::{DonutSlice, GeoPoint, MapBounds, MapMarker, MapView},
  palette,
};

/// Pie-marker radius range in pixels.
pub const MIN_PIE_SIZE: f64 = 80.0;
pub const MAX_PIE_SIZE: f64 = 120.0;

/// Default map centre (roughly the middle of Laos).
const LAOS_CENTER: GeoPoint = GeoPoint { latitude: 18.0, longitude: 105.0 };

/// Linear size interpolation over `[MIN_PIE_SIZE, MAX_PIE_SIZE]`,
/// proportional to `total / max_total`. A zero maximum maps everything to
/// the minimum size.
fn pie_size(total: u64, max_total: u64) -> f64 {
  if max_total == 0 {
    return MIN_PIE_SIZE;
  }
  MIN_PIE_SIZE
    + (MAX_PIE_SIZE - MIN_PIE_SIZE) * (total as f64 / max_total as f64)
}

/// Mean coordinates per province over reports that have any.
fn province_centers(
  reports: &[DiseaseReport],
) -> BTreeMap<String, GeoPoint> {
  let mut acc: BTreeMap<String, (f64, f64, usize)> = BTreeMap::new();
  for r in reports {
    if let (Some(lat), Some(lon)) = (r.latitude, r.longitude) {
      let e = acc.entry(r.province.clone()).or_insert((0.0, 0.0, 0));
      e.0 += lat;
      e.1 += lon;
      e.2 += 1;
    }
  }
  acc
    .into_iter()
    .map(|(p, (lat, lon, n))| {
      (p, GeoPoint {
        latitude:  lat / n as f64,
        longitude: lon / n as f64,
      })
    })
    .collect()
}

/// The overview map: one pie marker per province, sliced by disease code.
///
/// Callers pass reports already restricted to the recent window.
pub fn province_pie_map(
  reports: &[DiseaseReport],
  bounds: Option<MapBounds>,
) -> MapView {
  // province × disease pivot, zero-filled so every pie has the same slice
  // order and colouring. BTreeMap keys come out already sorted.
  let codes: Vec<String> =
    case_sum_by(reports, |r| &r.disease_code).into_keys().collect();
  let mut cells: BTreeMap<(String, String), u64> = BTreeMap::new();
  for r in reports {
    *cells
      .entry((r.province.clone(), r.disease_code.clone()))
      .or_insert(0) += r.cases as u64;
  }

  let totals = case_sum_by(reports, |r| &r.province);
  let max_total = totals.values().copied().max().unwrap_or(0);
  let centers = province_centers(reports);

  let mut markers = Vec::new();
  for (province, total) in &totals {
    // Provinces without a resolvable centre stay off the map.
    let Some(&position) = centers.get(province) else { continue };

    let slices: Vec<DonutSlice> = codes
      .iter()
      .enumerate()
      .map(|(i, code)| DonutSlice {
        label: code.clone(),
        value: cells
          .get(&(province.clone(), code.clone()))
          .copied()
          .unwrap_or(0),
        color: palette::color(i).to_string(),
      })
      .collect();

    let mut popup = vec![
      province.clone(),
      format!("Total cases: {total}"),
    ];
    for s in slices.iter().filter(|s| s.value > 0) {
      popup.push(format!("{}: {}", s.label, s.value));
    }

    markers.push(MapMarker {
      label: province.clone(),
      position,
      size: pie_size(*total, max_total),
      color: palette::color(0).to_string(),
      popup,
      slices,
    });
  }

  MapView {
    title: "Disease Cases by Province".to_string(),
    center: LAOS_CENTER,
    zoom: 6.0,
    bounds,
    markers,
  }
}

/// Per-location markers for the key-disease map, one colour per code.
/// Marker size scales within each code group: `cases / group_max · 40 + 5`.
pub fn disease_code_map(reports: &[DiseaseReport]) -> MapView {
  let mut grouped: BTreeMap<(String, String), (GeoPoint, u64)> =
    BTreeMap::new();
  for r in reports {
    let (Some(lat), Some(lon)) = (r.latitude, r.longitude) else {
      continue;
    };
    let e = grouped
      .entry((r.disease_code.clone(), r.location.clone()))
      .or_insert((GeoPoint { latitude: lat, longitude: lon }, 0));
    e.1 += r.cases as u64;
  }

  let mut group_max: BTreeMap<String, u64> = BTreeMap::new();
  for ((code, _), (_, cases)) in &grouped {
    let m = group_max.entry(code.clone()).or_insert(0);
    *m = (*m).max(*cases);
  }

  let codes: Vec<String> = group_max.keys().cloned().collect();
  let markers = grouped
    .iter()
    .map(|((code, location), (position, cases))| {
      let max = group_max.get(code).copied().unwrap_or(0);
      let scaled = if max == 0 {
        5.0
      } else {
        *cases as f64 / max as f64 * 40.0 + 5.0
      };
      let color_ix =
        codes.iter().position(|c| c == code).unwrap_or(0);
      MapMarker {
        label:    code.clone(),
        position: *position,
        size:     scaled,
        color:    palette::color(color_ix).to_string(),
        popup:    vec![location.clone(), format!("Cases: {cases}")],
        slices:   Vec::new(),
      }
    })
    .collect();

  MapView {
    title:   "Disease Distribution Map".to_string(),
    center:  LAOS_CENTER,
    zoom:    4.5,
    bounds:  None,
    markers,
  }
}

/// Weather-station markers; size tracks temperature, floored at 10 px.
pub fn weather_map(
  readings: &[WeatherReading],
  regions: &[RegionProfile],
) -> MapView {
  let markers = readings
    .iter()
    .filter_map(|w| {
      let region = regions.iter().find(|r| r.province == w.region)?;
      Some(MapMarker {
        label:    w.region.clone(),
        position: GeoPoint {
          latitude:  region.latitude,
          longitude: region.longitude,
        },
        size:     (w.temperature + 20.0).max(10.0),
        color:    palette::color(2).to_string(),
        popup:    vec![
          w.region.clone(),
          format!("Temperature: {:.1}°C", w.temperature),
          format!("Feels like: {:.1}°C", w.feels_like),
          format!("Humidity: {:.0}%", w.humidity),
          format!("Description: {}", w.description),
          format!("Wind: {:.1} m/s", w.wind_speed),
        ],
        slices:   Vec::new(),
      })
    })
    .collect();

  MapView {
    title:   "Weather Conditions Across Laos".to_string(),
    center:  GeoPoint { latitude: 19.8563, longitude: 102.4955 },
    zoom:    6.0,
    bounds:  None,
    markers,
  }
}

/// Bounding box of the first polygon ring in a GeoJSON geometry.
///
/// Accepts either a bare geometry or a feature carrying one. Returns `None`
/// rather than erroring on any structural surprise.
pub fn bounds_from_geojson(geojson: &serde_json::Value) -> Option<MapBounds> {
  let geometry = if geojson.get("geometry").is_some() {
    geojson.get("geometry")?
  } else {
    geojson
  };
  let ring = geometry.get("coordinates")?.get(0)?.as_array()?;

  let mut bounds: Option<MapBounds> = None;
  for pair in ring {
    let lon = pair.get(0)?.as_f64()?;
    let lat = pair.get(1)?.as_f64()?;
    bounds = Some(match bounds {
      None => MapBounds { south: lat, west: lon, north: lat, east: lon },
      Some(b) => MapBounds {
        south: b.south.min(lat),
        west:  b.west.min(lon),
        north: b.north.max(lat),
        east:  b.east.max(lon),
      },
    });
  }
  bounds
}

#[cfg(test)]
mod tests {
  use super::*;

  fn located(
    province: &str,
    code: &str,
    cases: u32,
    coords: Option<(f64, f64)>,
  ) -> DiseaseReport {
    DiseaseReport {
      reported_date: None,
      province: province.to_string(),
      location: province.to_string(),
      disease_code: code.to_string(),
      cases,
      latitude: coords.map(|c| c.0),
      longitude: coords.map(|c| c.1),
    }
  }

  #[test]
  fn pie_sizes_are_monotonic_and_clamped() {
    let reports = vec![
      located("A", "ND", 10, Some((17.0, 102.0))),
      located("B", "ND", 5, Some((15.0, 105.0))),
      located("C", "ND", 1, Some((16.0, 104.0))),
    ];
    let map = province_pie_map(&reports, None);
    let size = |p: &str| {
      map.markers.iter().find(|m| m.label == p).unwrap().size
    };
    assert!(size("A") >= size("B"));
    assert!(size("B") >= size("C"));
    for m in &map.markers {
      assert!(m.size >= MIN_PIE_SIZE && m.size <= MAX_PIE_SIZE);
    }
    assert_eq!(size("A"), MAX_PIE_SIZE);
  }

  #[test]
  fn provinces_without_coordinates_are_excluded() {
    let reports = vec![
      located("A", "ND", 10, Some((17.0, 102.0))),
      located("B", "ND", 5, None),
    ];
    let map = province_pie_map(&reports, None);
    assert_eq!(map.markers.len(), 1);
    assert_eq!(map.markers[0].label, "A");
  }

  #[test]
  fn all_zero_totals_fall_back_to_minimum_size() {
    let reports = vec![located("A", "ND", 0, Some((17.0, 102.0)))];
    let map = province_pie_map(&reports, None);
    assert_eq!(map.markers[0].size, MIN_PIE_SIZE);
  }

  #[test]
  fn popup_lists_only_nonzero_diseases() {
    let reports = vec![
      located("A", "ND", 4, Some((17.0, 102.0))),
      located("A", "IBD", 0, Some((17.0, 102.0))),
    ];
    let map = province_pie_map(&reports, None);
    let popup = &map.markers[0].popup;
    assert!(popup.iter().any(|l| l.contains("ND: 4")));
    assert!(!popup.iter().any(|l| l.contains("IBD")));
  }

  #[test]
  fn pie_slices_are_ordered_by_code() {
    let reports = vec![
      located("A", "ND", 4, Some((17.0, 102.0))),
      located("A", "IBD", 2, Some((17.0, 102.0))),
      located("A", "AI", 1, Some((17.0, 102.0))),
    ];
    let map = province_pie_map(&reports, None);
    let labels: Vec<&str> = map.markers[0]
      .slices
      .iter()
      .map(|s| s.label.as_str())
      .collect();
    assert_eq!(labels, vec!["AI", "IBD", "ND"]);
  }

  #[test]
  fn weather_map_joins_known_regions_only() {
    let regions = vec![RegionProfile {
      province:  "Vientiane".to_string(),
      capital:   "Vientiane".to_string(),
      latitude:  17.97,
      longitude: 102.6,
    }];
    let reading = |region: &str| WeatherReading {
      region:      region.to_string(),
      timestamp:   None,
      temperature: 28.0,
      feels_like:  30.0,
      humidity:    70.0,
      pressure:    1010.0,
      wind_speed:  2.0,
      visibility:  10.0,
      description: "clear".to_string(),
      sunrise:     None,
      sunset:      None,
    };
    let map =
      weather_map(&[reading("Vientiane"), reading("Nowhere")], &regions);
    assert_eq!(map.markers.len(), 1);
    assert_eq!(map.markers[0].position.latitude, 17.97);
    assert_eq!(map.markers[0].position.longitude, 102.6);
  }

  #[test]
  fn code_map_sizes_scale_within_each_group() {
    let reports = vec![
      located("A", "ND", 10, Some((17.0, 102.0))),
      located("B", "ND", 5, Some((15.0, 105.0))),
    ];
    let map = disease_code_map(&reports);
    let big = map.markers.iter().find(|m| m.popup[0] == "A").unwrap();
    let small = map.markers.iter().find(|m| m.popup[0] == "B").unwrap();
    assert_eq!(big.size, 45.0);
    assert_eq!(small.size, 25.0);
  }

  #[test]
  fn geojson_bounds_cover_all_ring_points() {
    let geojson = serde_json::json!({
      "geometry": {
        "type": "Polygon",
        "coordinates": [[[100.0, 14.0], [108.0, 14.0], [108.0, 22.5], [100.0, 22.5]]]
      }
    });
    let b = bounds_from_geojson(&geojson).unwrap();
    assert_eq!(b.west, 100.0);
    assert_eq!(b.east, 108.0);
    assert_eq!(b.south, 14.0);
    assert_eq!(b.north, 22.5);
  }
}
