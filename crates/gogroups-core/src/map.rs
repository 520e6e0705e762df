//! Marker map for the filtered group view.
//!
//! Markers are bucketed into square lat/lon cells and each occupied cell is
//! drawn as one cluster centered on the mean position of its markers.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{json, Value};

use crate::group::GroupRecord;

const DEFAULT_CELL_DEGREES: f64 = 10.0;

/// Anything that can plot the currently filtered groups.
pub trait MapRenderer {
    fn render(&mut self, groups: &[GroupRecord]);
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cluster {
    pub lat: f64,
    pub lon: f64,
    pub count: usize,
    pub names: Vec<String>,
}

/// A clustered marker map that owns its markers.
///
/// Each [`render`](MapRenderer::render) call replaces the previous markers.
#[derive(Debug, Clone)]
pub struct MarkerMap {
    cell_degrees: f64,
    markers: Vec<Marker>,
    clusters: Vec<Cluster>,
}

impl Default for MarkerMap {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_DEGREES)
    }
}

impl MarkerMap {
    /// Creates an empty map clustering on cells of `cell_degrees`.
    ///
    /// Non-finite or non-positive sizes fall back to the default cell size.
    #[must_use]
    pub fn new(cell_degrees: f64) -> Self {
        let cell_degrees = if cell_degrees.is_finite() && cell_degrees > 0.0 {
            cell_degrees
        } else {
            DEFAULT_CELL_DEGREES
        };
        Self {
            cell_degrees,
            markers: Vec::new(),
            clusters: Vec::new(),
        }
    }

    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    #[must_use]
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// The current clusters as a GeoJSON `FeatureCollection`.
    #[must_use]
    pub fn to_geojson(&self) -> Value {
        let features: Vec<Value> = self
            .clusters
            .iter()
            .map(|c| {
                json!({
                    "type": "Feature",
                    // GeoJSON positions are [lon, lat].
                    "geometry": { "type": "Point", "coordinates": [c.lon, c.lat] },
                    "properties": { "count": c.count, "names": c.names },
                })
            })
            .collect();
        json!({ "type": "FeatureCollection", "features": features })
    }

    #[allow(clippy::cast_possible_truncation)]
    fn cell_of(&self, marker: &Marker) -> (i64, i64) {
        (
            (marker.lat / self.cell_degrees).floor() as i64,
            (marker.lon / self.cell_degrees).floor() as i64,
        )
    }

    #[allow(clippy::cast_precision_loss)]
    fn cluster(&self) -> Vec<Cluster> {
        let mut cells: BTreeMap<(i64, i64), Vec<&Marker>> = BTreeMap::new();
        for marker in &self.markers {
            cells.entry(self.cell_of(marker)).or_default().push(marker);
        }

        cells
            .into_values()
            .map(|members| {
                let count = members.len();
                let lat = members.iter().map(|m| m.lat).sum::<f64>() / count as f64;
                let lon = members.iter().map(|m| m.lon).sum::<f64>() / count as f64;
                Cluster {
                    lat,
                    lon,
                    count,
                    names: members.iter().map(|m| m.name.clone()).collect(),
                }
            })
            .collect()
    }
}

impl MapRenderer for MarkerMap {
    fn render(&mut self, groups: &[GroupRecord]) {
        self.markers = groups
            .iter()
            .filter_map(|g| {
                g.position().map(|(lat, lon)| Marker {
                    name: g.name.clone(),
                    lat,
                    lon,
                })
            })
            .collect();
        self.clusters = self.cluster();
        tracing::debug!(
            markers = self.markers.len(),
            clusters = self.clusters.len(),
            "map rendered"
        );
    }
}
