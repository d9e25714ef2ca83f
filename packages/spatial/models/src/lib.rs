#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Types describing how a map point was assigned to a monitoring station.

use aqi_map_station_models::Coordinates;
use serde::{Deserialize, Serialize};

/// Radius of a station's influence buffer, in kilometres.
pub const DEFAULT_BUFFER_RADIUS_KM: f64 = 5.0;

/// Which resolution stage assigned the station, with the distance where
/// the stage is distance-based.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AssignmentReason {
    /// The point lies inside the station's Voronoi cell.
    Voronoi,
    /// The point lies within the station's influence buffer.
    Buffer {
        /// Great-circle distance to the station (km).
        distance: f64,
    },
    /// Closest station, with no zone or buffer match.
    Nearest {
        /// Great-circle distance to the station (km).
        distance: f64,
    },
}

impl AssignmentReason {
    /// Short stage name (`"voronoi"`, `"buffer"`, `"nearest"`).
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Voronoi => "voronoi",
            Self::Buffer { .. } => "buffer",
            Self::Nearest { .. } => "nearest",
        }
    }
}

/// The station governing an arbitrary point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaStationResult {
    /// Governing station id.
    pub station_id: String,
    /// Governing station name.
    pub station_name: String,
    /// Governing station position.
    pub coordinates: Coordinates,
    /// Great-circle distance from the query point to the station (km).
    pub distance: f64,
    /// How the station was chosen.
    pub reason: AssignmentReason,
}

/// Caller-controlled stage switches. A disabled stage is skipped; the
/// nearest-station fallback always runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerVisibility {
    /// Allow Voronoi cell membership.
    pub voronoi: bool,
    /// Allow influence-buffer matching.
    pub buffers: bool,
}

impl Default for LayerVisibility {
    fn default() -> Self {
        Self {
            voronoi: true,
            buffers: true,
        }
    }
}

/// A lat/lng rectangle used to clip the tessellation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    /// Southern edge.
    pub min_lat: f64,
    /// Northern edge.
    pub max_lat: f64,
    /// Western edge.
    pub min_lng: f64,
    /// Eastern edge.
    pub max_lng: f64,
}

impl Bounds {
    /// Delhi NCR clipping rectangle.
    pub const DELHI: Self = Self {
        min_lat: 28.4,
        max_lat: 28.9,
        min_lng: 76.8,
        max_lng: 77.5,
    };

    /// Whether the point lies inside or on the rectangle.
    #[must_use]
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&lat) && (self.min_lng..=self.max_lng).contains(&lng)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::DELHI
    }
}

/// One station's Voronoi cell, ready for a map layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoronoiRegion {
    /// Station owning the cell.
    pub station_id: String,
    /// Station name.
    pub station_name: String,
    /// Closed exterior ring as `[lng, lat]` pairs.
    pub positions: Vec<[f64; 2]>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_serializes_with_tag() {
        let json = serde_json::to_string(&AssignmentReason::Buffer { distance: 1.5 }).unwrap();
        assert_eq!(json, r#"{"type":"buffer","distance":1.5}"#);
        let json = serde_json::to_string(&AssignmentReason::Voronoi).unwrap();
        assert_eq!(json, r#"{"type":"voronoi"}"#);
    }

    #[test]
    fn bounds_contains_edges() {
        let b = Bounds::DELHI;
        assert!(b.contains(28.4, 76.8));
        assert!(b.contains(28.6, 77.2));
        assert!(!b.contains(29.0, 77.2));
    }

    #[test]
    fn default_visibility_enables_everything() {
        let v = LayerVisibility::default();
        assert!(v.voronoi && v.buffers);
    }
}
