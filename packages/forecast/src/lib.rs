#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Deterministic station forecasting.
//!
//! For every station the generator derives a five-year AQI projection from
//! the shared historical baseline and the station's coefficients, scores the
//! result for livability and attaches resident-facing advice. All variation
//! between runs is removed: the only randomness is a per-station seeded
//! stream used for particulate jitter.
//!
//! [`contributors`] turns a forecast year into a ranked list of the factors
//! behind it, plus the matching health guidance.

pub mod cache;
pub mod city;
pub mod contributors;
pub mod features;
pub mod generator;
pub mod livability;
pub mod model;
pub mod recommendation;
pub mod rng;

pub use cache::ForecastCache;
pub use city::city_wide_stats;
pub use contributors::{aqi_contributors, explain};
pub use generator::{ForecastGenerator, project};

/// Errors returned by forecast lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ForecastError {
    /// The station id is not in the registry.
    #[error("Station not found: {station_id}")]
    NotFound {
        /// The id that was looked up.
        station_id: String,
    },

    /// The year lies outside the station's forecast horizon.
    #[error("No forecast for {station_id} in {year}")]
    YearOutOfRange {
        /// The station that was explained.
        station_id: String,
        /// The requested year.
        year: i32,
    },
}
