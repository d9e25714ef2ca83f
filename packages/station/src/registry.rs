//! Compile-time station table.
//!
//! The Delhi NCR station list, coefficients and exposure estimates are
//! embedded from
//! `data/stations.toml` via `include_str!`. Adding a station means adding a
//! `[[stations]]` block there.

use aqi_map_station_models::{Station, StationCoefficients, StationExposure};
use serde::Deserialize;

/// Number of embedded stations. Enforced by a test.
#[cfg(test)]
const EXPECTED_STATION_COUNT: usize = 25;

const STATIONS_TOML: &str = include_str!("../data/stations.toml");

#[derive(Deserialize)]
struct StationTable {
    stations: Vec<StationEntry>,
}

#[derive(Deserialize)]
struct StationEntry {
    id: String,
    name: String,
    lat: f64,
    lng: f64,
    coefficients: Option<StationCoefficients>,
    exposure: Option<StationExposure>,
}

/// One row of the embedded table.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedStation {
    pub station: Station,
    pub coefficients: Option<StationCoefficients>,
    pub exposure: Option<StationExposure>,
}

/// Returns every embedded station in file order, with its coefficients and
/// exposure when the table defines them.
///
/// # Panics
///
/// Panics if the embedded TOML fails to parse. It is a compile-time
/// constant, so a parse failure is a development error caught by tests.
#[must_use]
pub fn embedded_stations() -> Vec<EmbeddedStation> {
    let table: StationTable = toml::de::from_str(STATIONS_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse embedded station table: {e}"));

    table
        .stations
        .into_iter()
        .map(|entry| EmbeddedStation {
            station: Station {
                id: entry.id,
                name: entry.name,
                lat: entry.lat,
                lng: entry.lng,
            },
            coefficients: entry.coefficients,
            exposure: entry.exposure,
        })
        .collect()
}
