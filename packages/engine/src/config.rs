//! Engine configuration.
//!
//! Loaded from a TOML file such as:
//!
//! ```toml
//! globalSeed = 42
//! bufferRadiusKm = 5.0
//!
//! [bounds]
//! minLat = 28.4
//! maxLat = 28.9
//! minLng = 76.8
//! maxLng = 77.5
//! ```
//!
//! Every key is optional and falls back to the built-in value.

use std::path::Path;

use aqi_map_forecast::model::RANDOM_STATE;
use aqi_map_spatial_models::{Bounds, DEFAULT_BUFFER_RADIUS_KM};
use serde::Deserialize;

/// Errors that can occur while loading an [`EngineConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML or has the wrong shape.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The values parse but are unusable.
    #[error("Invalid config: {message}")]
    Invalid {
        /// Description of what went wrong.
        message: String,
    },
}

/// Tunable engine parameters.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct EngineConfig {
    /// Seed added to every station's id-derived seed.
    pub global_seed: u32,
    /// Influence buffer radius in kilometres.
    pub buffer_radius_km: f64,
    /// Rectangle the Voronoi tessellation is clipped to.
    pub bounds: Bounds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            global_seed: RANDOM_STATE,
            buffer_radius_km: DEFAULT_BUFFER_RADIUS_KM,
            bounds: Bounds::DELHI,
        }
    }
}

impl EngineConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::Parse`] if the document is malformed
    /// * [`ConfigError::Invalid`] if a value is out of range
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::de::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::Io`] if the file cannot be read
    /// * [`ConfigError::Parse`] if the document is malformed
    /// * [`ConfigError::Invalid`] if a value is out of range
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        log::debug!("Loading engine config from {}", path.display());
        let data = std::fs::read_to_string(path)?;
        Self::from_toml_str(&data)
    }

    /// Checks the buffer radius and bounds.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::Invalid`] describing the first bad value
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.buffer_radius_km.is_finite() || self.buffer_radius_km < 0.0 {
            return Err(ConfigError::Invalid {
                message: format!(
                    "bufferRadiusKm must be a non-negative number, got {}",
                    self.buffer_radius_km
                ),
            });
        }

        let b = &self.bounds;
        let finite = [b.min_lat, b.max_lat, b.min_lng, b.max_lng]
            .iter()
            .all(|v| v.is_finite());
        if !finite || b.min_lat >= b.max_lat || b.min_lng >= b.max_lng {
            return Err(ConfigError::Invalid {
                message: format!(
                    "bounds must span a non-empty area, got lat {}..{} lng {}..{}",
                    b.min_lat, b.max_lat, b.min_lng, b.max_lng
                ),
            });
        }

        Ok(())
    }
}
