#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Monitoring station types shared across the aqi-map system.
//!
//! A [`Station`] is a fixed registry point. Each station carries a set of
//! static [`StationCoefficients`] describing how the shared historical
//! baseline ([`HistoricalYear`]) scales to that location, and a
//! [`StationExposure`] estimate of the pollution sources around it.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A single air-quality monitoring station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    /// Stable identifier (e.g. `"delhi-anand-vihar"`).
    pub id: String,
    /// Human-readable station name.
    pub name: String,
    /// WGS84 latitude.
    pub lat: f64,
    /// WGS84 longitude.
    pub lng: f64,
}

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// WGS84 latitude.
    pub lat: f64,
    /// WGS84 longitude.
    pub lng: f64,
}

impl Station {
    /// Returns this station's position.
    #[must_use]
    pub const fn coordinates(&self) -> Coordinates {
        Coordinates {
            lat: self.lat,
            lng: self.lng,
        }
    }
}

/// Land-use character of the area around a station.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum StationType {
    /// Factories and industrial estates nearby
    Industrial,
    /// Predominantly residential neighborhood
    Residential,
    /// Major road or junction
    Traffic,
    /// No dominant land use
    #[default]
    Mixed,
}

impl StationType {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Industrial,
            Self::Residential,
            Self::Traffic,
            Self::Mixed,
        ]
    }
}

/// Static per-station model coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationCoefficients {
    /// Scales the shared historical baseline to this station.
    pub base_multiplier: f64,
    /// Amplifies or dampens the yearly improvement trend.
    pub trend_sensitivity: f64,
    /// Land-use character of the station.
    pub station_type: StationType,
    /// Green cover in `0..=1`; more green cover damps pollution persistence.
    pub green_cover_score: f64,
}

impl Default for StationCoefficients {
    /// The neutral coefficients applied to stations without a record.
    fn default() -> Self {
        Self {
            base_multiplier: 1.0,
            trend_sensitivity: 1.0,
            station_type: StationType::Mixed,
            green_cover_score: 0.4,
        }
    }
}

/// Relative exposure of a station's surroundings to pollution sources,
/// each on a `0..=1` scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationExposure {
    /// Residential and commercial density.
    pub population_density: f64,
    /// Vehicular traffic load.
    pub traffic_intensity: f64,
    /// Closeness to industrial estates.
    pub industrial_proximity: f64,
}

impl Default for StationExposure {
    /// Estimate used for stations without a record.
    fn default() -> Self {
        Self {
            population_density: 0.6,
            traffic_intensity: 0.6,
            industrial_proximity: 0.4,
        }
    }
}

/// One row of the shared historical baseline table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalYear {
    /// Calendar year.
    pub year: i32,
    /// Yearly average AQI.
    pub avg_aqi: f64,
    /// Yearly average PM2.5 (µg/m³).
    pub pm25: f64,
    /// Yearly average PM10 (µg/m³).
    pub pm10: f64,
    /// Days with good or satisfactory air.
    pub good_days: u16,
    /// Days with moderate air.
    pub moderate_days: u16,
    /// Days with poor or worse air.
    pub poor_days: u16,
}
