#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Area-to-station resolution.
//!
//! Maps any map point to the monitoring station that governs it, trying in
//! order: Voronoi cell membership, the fixed-radius influence buffer, and
//! finally the nearest station by great-circle distance. The last stage is
//! total, so resolution never fails for a non-empty station set.
//!
//! Tie-break: whenever two stations are equally good under a stage, the
//! one with the lexicographically lowest id wins.

pub mod distance;
pub mod voronoi;

use std::cmp::Ordering;
use std::sync::OnceLock;

use aqi_map_spatial_models::{
    AreaStationResult, AssignmentReason, Bounds, DEFAULT_BUFFER_RADIUS_KM, LayerVisibility,
    VoronoiRegion,
};
use aqi_map_station_models::Station;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value};

pub use distance::haversine_km;
pub use voronoi::Tessellation;

/// Errors raised while constructing a resolver.
#[derive(Debug, thiserror::Error)]
pub enum SpatialError {
    /// No stations to resolve against.
    #[error("Cannot build a resolver without stations")]
    EmptyRegistry,

    /// The buffer radius is negative or not finite.
    #[error("Invalid buffer radius: {radius_km} km")]
    InvalidBufferRadius {
        /// The rejected radius.
        radius_km: f64,
    },
}

/// Resolves points to governing stations.
///
/// The Voronoi tessellation is built lazily on first use and reused for
/// every later query.
pub struct SpatialResolver {
    stations: Vec<Station>,
    bounds: Bounds,
    buffer_radius_km: f64,
    tessellation: OnceLock<Tessellation>,
}

impl SpatialResolver {
    /// Creates a resolver over a fixed station set.
    ///
    /// # Errors
    ///
    /// Returns an error if `stations` is empty or the buffer radius is
    /// negative or not finite.
    pub fn new(
        stations: Vec<Station>,
        bounds: Bounds,
        buffer_radius_km: f64,
    ) -> Result<Self, SpatialError> {
        if stations.is_empty() {
            return Err(SpatialError::EmptyRegistry);
        }
        if !buffer_radius_km.is_finite() || buffer_radius_km < 0.0 {
            return Err(SpatialError::InvalidBufferRadius {
                radius_km: buffer_radius_km,
            });
        }

        Ok(Self {
            stations,
            bounds,
            buffer_radius_km,
            tessellation: OnceLock::new(),
        })
    }

    /// Creates a resolver with the Delhi bounds and the default 5 km buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if `stations` is empty.
    pub fn with_defaults(stations: Vec<Station>) -> Result<Self, SpatialError> {
        Self::new(stations, Bounds::DELHI, DEFAULT_BUFFER_RADIUS_KM)
    }

    /// Stations this resolver assigns points to.
    #[must_use]
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Whether the tessellation has been built yet.
    #[must_use]
    pub fn is_tessellated(&self) -> bool {
        self.tessellation.get().is_some()
    }

    /// The shared tessellation, built on first call.
    #[must_use]
    pub fn tessellation(&self) -> &Tessellation {
        self.tessellation
            .get_or_init(|| Tessellation::build(&self.stations, &self.bounds))
    }

    /// Returns the station governing `(lat, lng)`.
    ///
    /// `visibility` can switch off the Voronoi or buffer stage; `None`
    /// enables both. The nearest-station stage always runs last.
    #[must_use]
    pub fn resolve(
        &self,
        lat: f64,
        lng: f64,
        visibility: Option<LayerVisibility>,
    ) -> AreaStationResult {
        let visibility = visibility.unwrap_or_default();

        if visibility.voronoi
            && let Some(result) = self.find_by_voronoi(lat, lng)
        {
            return result;
        }

        if visibility.buffers
            && let Some(result) = self.find_by_buffer(lat, lng)
        {
            return result;
        }

        self.find_nearest(lat, lng)
    }

    /// Voronoi stage: the station whose cell contains the point.
    #[must_use]
    pub fn find_by_voronoi(&self, lat: f64, lng: f64) -> Option<AreaStationResult> {
        let index = self.tessellation().locate(&self.stations, lat, lng)?;
        let station = &self.stations[index];
        let distance = haversine_km(lat, lng, station.lat, station.lng);

        log::debug!("({lat}, {lng}) inside Voronoi cell of {}", station.id);

        Some(to_result(station, distance, AssignmentReason::Voronoi))
    }

    /// Buffer stage: the nearest station within the buffer radius.
    #[must_use]
    pub fn find_by_buffer(&self, lat: f64, lng: f64) -> Option<AreaStationResult> {
        let (station, distance) = self
            .distances(lat, lng)
            .filter(|(_, d)| *d <= self.buffer_radius_km)
            .min_by(compare_candidates)?;

        log::debug!(
            "({lat}, {lng}) within {} km buffer of {} ({distance:.3} km)",
            self.buffer_radius_km,
            station.id
        );

        Some(to_result(
            station,
            distance,
            AssignmentReason::Buffer { distance },
        ))
    }

    /// Nearest stage: the closest station regardless of distance.
    #[must_use]
    pub fn find_nearest(&self, lat: f64, lng: f64) -> AreaStationResult {
        let mut candidates = self.distances(lat, lng);
        // Non-empty by construction.
        let Some(mut best) = candidates.next() else {
            unreachable!("resolver has at least one station")
        };

        for candidate in candidates {
            if compare_candidates(&candidate, &best) == Ordering::Less {
                best = candidate;
            }
        }

        let (station, distance) = best;
        to_result(station, distance, AssignmentReason::Nearest { distance })
    }

    /// Every station's Voronoi cell as a map region.
    #[must_use]
    pub fn regions(&self) -> Vec<VoronoiRegion> {
        self.tessellation().regions(&self.stations)
    }

    /// Voronoi cells as a `GeoJSON` `FeatureCollection` with `stationId` and
    /// `stationName` properties.
    #[must_use]
    pub fn regions_geojson(&self) -> GeoJson {
        let features = self
            .regions()
            .into_iter()
            .map(|region| {
                let ring: Vec<Vec<f64>> = region.positions.iter().map(|p| p.to_vec()).collect();

                let mut properties = JsonObject::new();
                properties.insert(
                    "stationId".to_string(),
                    serde_json::Value::String(region.station_id),
                );
                properties.insert(
                    "stationName".to_string(),
                    serde_json::Value::String(region.station_name),
                );

                Feature {
                    bbox: None,
                    geometry: Some(Geometry::new(Value::Polygon(vec![ring]))),
                    id: None,
                    properties: Some(properties),
                    foreign_members: None,
                }
            })
            .collect();

        GeoJson::FeatureCollection(FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        })
    }

    fn distances(&self, lat: f64, lng: f64) -> impl Iterator<Item = (&Station, f64)> {
        self.stations
            .iter()
            .map(move |s| (s, haversine_km(lat, lng, s.lat, s.lng)))
    }
}

/// Human-readable explanation of an assignment.
#[must_use]
pub fn reason_text(result: &AreaStationResult) -> String {
    match result.reason {
        AssignmentReason::Voronoi => {
            format!("Inside Voronoi zone of {}", result.station_name)
        }
        AssignmentReason::Buffer { distance } => format!(
            "Within influence buffer of {} ({distance:.1} km)",
            result.station_name
        ),
        AssignmentReason::Nearest { distance } => {
            format!("Nearest station: {} ({distance:.1} km)", result.station_name)
        }
    }
}

/// Orders by distance, then by station id.
fn compare_candidates(a: &(&Station, f64), b: &(&Station, f64)) -> Ordering {
    a.1.total_cmp(&b.1).then_with(|| a.0.id.cmp(&b.0.id))
}

fn to_result(station: &Station, distance: f64, reason: AssignmentReason) -> AreaStationResult {
    AreaStationResult {
        station_id: station.id.clone(),
        station_name: station.name.clone(),
        coordinates: station.coordinates(),
        distance,
        reason,
    }
}
