#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Station registry for the aqi-map forecasting engine.
//!
//! The registry is the single source of truth for which monitoring points
//! exist, where they are, which model coefficients apply to each, and how
//! exposed each one is to local pollution sources. It is read-only after
//! construction.

pub mod historical;
pub mod registry;

use std::collections::BTreeMap;

use aqi_map_station_models::{HistoricalYear, Station, StationCoefficients, StationExposure};

use crate::registry::EmbeddedStation;

/// An immutable set of stations plus their coefficients and exposure.
#[derive(Debug, Clone)]
pub struct StationRegistry {
    stations: Vec<Station>,
    coefficients: BTreeMap<String, StationCoefficients>,
    exposure: BTreeMap<String, StationExposure>,
}

impl StationRegistry {
    /// Creates a registry from an explicit station list and coefficient map.
    ///
    /// Stations missing from `coefficients` use
    /// [`StationCoefficients::default`].
    #[must_use]
    pub fn new(
        stations: Vec<Station>,
        coefficients: BTreeMap<String, StationCoefficients>,
    ) -> Self {
        Self {
            stations,
            coefficients,
            exposure: BTreeMap::new(),
        }
    }

    /// Replaces the exposure estimates. Stations missing from `exposure`
    /// use [`StationExposure::default`].
    #[must_use]
    pub fn with_exposure(mut self, exposure: BTreeMap<String, StationExposure>) -> Self {
        self.exposure = exposure;
        self
    }

    /// Builds the registry from the embedded Delhi NCR station table.
    ///
    /// # Panics
    ///
    /// Panics if the embedded table is malformed (see
    /// [`registry::embedded_stations`]).
    #[must_use]
    pub fn builtin() -> Self {
        let mut stations = Vec::new();
        let mut coefficients = BTreeMap::new();
        let mut exposure = BTreeMap::new();

        for EmbeddedStation {
            station,
            coefficients: coeff,
            exposure: exp,
        } in registry::embedded_stations()
        {
            if let Some(coeff) = coeff {
                coefficients.insert(station.id.clone(), coeff);
            }
            if let Some(exp) = exp {
                exposure.insert(station.id.clone(), exp);
            }
            stations.push(station);
        }

        log::debug!(
            "Loaded {} stations ({} with coefficients, {} with exposure)",
            stations.len(),
            coefficients.len(),
            exposure.len()
        );

        Self::new(stations, coefficients).with_exposure(exposure)
    }

    /// All stations in registry order.
    #[must_use]
    pub fn list_stations(&self) -> &[Station] {
        &self.stations
    }

    /// Looks up a station by id. Returns `None` if not registered.
    #[must_use]
    pub fn get_station(&self, id: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == id)
    }

    /// Coefficients for `id`, or the neutral default if none are recorded.
    /// Never fails, including for ids outside the registry.
    #[must_use]
    pub fn coefficients(&self, id: &str) -> StationCoefficients {
        self.coefficients.get(id).copied().unwrap_or_default()
    }

    /// Exposure estimate for `id`, or the default if none is recorded.
    #[must_use]
    pub fn exposure(&self, id: &str) -> StationExposure {
        self.exposure.get(id).copied().unwrap_or_default()
    }

    /// The shared historical baseline.
    #[must_use]
    pub fn historical_table(&self) -> &'static [HistoricalYear] {
        historical::HISTORICAL_YEARS
    }

    /// Number of registered stations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Whether the registry has no stations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl Default for StationRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
