#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! The aqi-map engine.
//!
//! Owns one station registry and exposes the in-process operations the map
//! UI needs: station listing, point-to-station resolution, cached
//! per-station forecasts and the AQI explanation built on them. Everything
//! is deterministic for a given [`EngineConfig`].

pub mod config;

use std::sync::Arc;

use aqi_map_forecast::{
    ForecastCache, ForecastError, ForecastGenerator, city_wide_stats, contributors,
};
use aqi_map_forecast_models::{AqiExplanation, CityWideStats, StationForecastResult};
use aqi_map_spatial::{SpatialError, SpatialResolver};
use aqi_map_spatial_models::{AreaStationResult, LayerVisibility, VoronoiRegion};
use aqi_map_station::StationRegistry;
use aqi_map_station_models::Station;
use geojson::GeoJson;

pub use aqi_map_spatial::reason_text;
pub use config::{ConfigError, EngineConfig};

/// Registry, resolver, generator and cache wired together.
pub struct Engine {
    config: EngineConfig,
    generator: ForecastGenerator,
    resolver: SpatialResolver,
    cache: ForecastCache,
}

impl Engine {
    /// Builds an engine over `registry`.
    ///
    /// # Errors
    ///
    /// * [`SpatialError::EmptyRegistry`] if the registry has no stations
    /// * [`SpatialError::InvalidBufferRadius`] if the configured radius is
    ///   negative or not finite
    pub fn new(config: EngineConfig, registry: StationRegistry) -> Result<Self, SpatialError> {
        let resolver = SpatialResolver::new(
            registry.list_stations().to_vec(),
            config.bounds,
            config.buffer_radius_km,
        )?;

        log::info!(
            "Engine ready: {} stations, seed {}, {} km buffer",
            registry.len(),
            config.global_seed,
            config.buffer_radius_km
        );

        Ok(Self {
            config,
            generator: ForecastGenerator::new(registry, config.global_seed),
            resolver,
            cache: ForecastCache::new(),
        })
    }

    /// Engine over the embedded station table with default configuration.
    ///
    /// # Panics
    ///
    /// Panics if the embedded station table is empty or malformed.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(EngineConfig::default(), StationRegistry::builtin())
            .unwrap_or_else(|e| panic!("Built-in station table is unusable: {e}"))
    }

    /// Configuration the engine was built with.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Station registry backing every operation.
    #[must_use]
    pub const fn registry(&self) -> &StationRegistry {
        self.generator.registry()
    }

    /// All stations in registry order.
    #[must_use]
    pub fn list_stations(&self) -> &[Station] {
        self.registry().list_stations()
    }

    /// Station governing `(lat, lng)`. Never fails.
    #[must_use]
    pub fn resolve(
        &self,
        lat: f64,
        lng: f64,
        visibility: Option<LayerVisibility>,
    ) -> AreaStationResult {
        self.resolver.resolve(lat, lng, visibility)
    }

    /// Forecast for a station, computed on first request and then served
    /// from the cache.
    ///
    /// # Errors
    ///
    /// * [`ForecastError::NotFound`] if `station_id` is not registered
    pub fn forecast(&self, station_id: &str) -> Result<Arc<StationForecastResult>, ForecastError> {
        self.cache
            .get_or_compute(station_id, || self.generator.forecast(station_id))
    }

    /// Forecasts for every station, in registry order.
    ///
    /// # Errors
    ///
    /// * [`ForecastError::NotFound`] is not expected, since every id comes
    ///   from the registry itself
    pub fn forecast_all(&self) -> Result<Vec<Arc<StationForecastResult>>, ForecastError> {
        self.list_stations()
            .iter()
            .map(|s| self.forecast(&s.id))
            .collect()
    }

    /// Ranked AQI contributors and health guidance for a station in `year`,
    /// or in the first forecast year when `year` is `None`.
    ///
    /// # Errors
    ///
    /// * [`ForecastError::NotFound`] if `station_id` is not registered
    /// * [`ForecastError::YearOutOfRange`] if `year` is outside the horizon
    pub fn explain(
        &self,
        station_id: &str,
        year: Option<i32>,
    ) -> Result<AqiExplanation, ForecastError> {
        let forecast = self.forecast(station_id)?;
        let registry = self.registry();

        contributors::explain(
            &forecast,
            &registry.exposure(station_id),
            registry.coefficients(station_id).green_cover_score,
            year,
        )
        .ok_or_else(|| ForecastError::YearOutOfRange {
            station_id: station_id.to_string(),
            year: year.unwrap_or_default(),
        })
    }

    /// Aggregate statistics over every station's forecast.
    ///
    /// # Errors
    ///
    /// * Propagates [`Engine::forecast_all`] errors
    pub fn city_wide_stats(&self) -> Result<CityWideStats, ForecastError> {
        Ok(city_wide_stats(&self.forecast_all()?))
    }

    #[must_use]
    pub fn regions(&self) -> Vec<VoronoiRegion> {
        self.resolver.regions()
    }

    #[must_use]
    pub fn regions_geojson(&self) -> GeoJson {
        self.resolver.regions_geojson()
    }

    /// Forecast cache, for inspection.
    #[must_use]
    pub const fn cache(&self) -> &ForecastCache {
        &self.cache
    }

    /// Empties the forecast cache. Later requests recompute identical values.
    pub fn clear_cache(&self) {
        log::debug!("Clearing {} cached forecasts", self.cache.len());
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use aqi_map_forecast_models::{AqiCategory, ContributorIcon, LivabilityClass, TrendDirection};
    use aqi_map_spatial_models::{AssignmentReason, Bounds};

    use super::*;

    fn station(id: &str, lat: f64, lng: f64) -> Station {
        Station {
            id: id.to_string(),
            name: id.to_uppercase(),
            lat,
            lng,
        }
    }

    #[test]
    fn builtin_lists_registry_order() {
        let engine = Engine::builtin();
        let ids: Vec<&str> = engine.list_stations().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), 25);
        assert_eq!(ids[0], "delhi-anand-vihar");
        assert_eq!(ids[24], "delhi-wazirpur");
    }

    #[test]
    fn forecast_is_cached_and_stable_across_clear() {
        let engine = Engine::builtin();
        assert!(engine.cache().is_empty());

        let first = engine.forecast("delhi-pusa").unwrap();
        assert!(engine.cache().has("delhi-pusa"));

        let again = engine.forecast("delhi-pusa").unwrap();
        assert!(Arc::ptr_eq(&first, &again));

        engine.clear_cache();
        assert!(!engine.cache().has("delhi-pusa"));

        let recomputed = engine.forecast("delhi-pusa").unwrap();
        assert_eq!(*first, *recomputed);
    }

    #[test]
    fn unknown_station_is_not_cached() {
        let engine = Engine::builtin();
        let err = engine.forecast("delhi-nowhere").unwrap_err();
        assert_eq!(
            err,
            ForecastError::NotFound {
                station_id: "delhi-nowhere".to_string()
            }
        );
        assert!(engine.cache().is_empty());
    }

    #[test]
    fn forecast_all_fills_cache() {
        let engine = Engine::builtin();
        let all = engine.forecast_all().unwrap();
        assert_eq!(all.len(), 25);
        assert_eq!(engine.cache().len(), 25);
        for (forecast, station) in all.iter().zip(engine.list_stations()) {
            assert_eq!(forecast.station_id, station.id);
        }
    }

    #[test]
    fn builtin_city_wide_stats() {
        let stats = Engine::builtin().city_wide_stats().unwrap();

        assert_eq!(stats.avg_livability_score, 44);
        assert_eq!(stats.highly_livable_count, 0);
        assert_eq!(stats.moderately_livable_count, 10);
        assert_eq!(stats.low_livability_count, 15);
        assert_eq!(stats.overall_trend, TrendDirection::Improving);

        let expected: BTreeMap<i32, u16> =
            [(2025, 280), (2026, 272), (2027, 264), (2028, 256), (2029, 248)].into();
        assert_eq!(stats.avg_future_aqi, expected);
    }

    #[test]
    fn builtin_greenest_station() {
        let forecast = Engine::builtin().forecast("delhi-pusa").unwrap();
        let predicted: Vec<u16> = forecast.forecasts.iter().map(|f| f.predicted_aqi).collect();
        assert_eq!(predicted, vec![187, 180, 174, 168, 162]);
        assert_eq!(forecast.livability_score, 60);
        assert_eq!(forecast.livability_class, LivabilityClass::ModeratelyLivable);
    }

    #[test]
    fn global_seed_changes_only_particulates() {
        let default = Engine::builtin();
        let reseeded = Engine::new(
            EngineConfig {
                global_seed: 7,
                ..EngineConfig::default()
            },
            StationRegistry::builtin(),
        )
        .unwrap();

        let a = default.forecast("delhi-ito").unwrap();
        let b = reseeded.forecast("delhi-ito").unwrap();

        let aqi = |r: &StationForecastResult| -> Vec<u16> {
            r.forecasts.iter().map(|f| f.predicted_aqi).collect()
        };
        let pm = |r: &StationForecastResult| -> Vec<(u16, u16)> {
            r.forecasts.iter().map(|f| (f.pm25, f.pm10)).collect()
        };

        assert_eq!(aqi(&a), aqi(&b));
        assert_eq!(a.livability_score, b.livability_score);
        assert_ne!(pm(&a), pm(&b));
    }

    #[test]
    fn explains_builtin_station_from_cached_forecast() {
        let engine = Engine::builtin();
        let explanation = engine.explain("delhi-anand-vihar", None).unwrap();

        assert!(engine.cache().has("delhi-anand-vihar"));
        assert_eq!(explanation.year, 2025);
        assert_eq!(explanation.aqi, 372);
        assert_eq!(explanation.category, AqiCategory::Hazardous);
        assert_eq!(explanation.contributors[0].icon, ContributorIcon::Traffic);
        assert!((explanation.contributors[0].score - 1.235).abs() < 1e-9);

        let pusa = engine.explain("delhi-pusa", Some(2029)).unwrap();
        assert_eq!(pusa.aqi, 162);
        assert_eq!(pusa.category, AqiCategory::Poor);
    }

    #[test]
    fn explain_errors() {
        let engine = Engine::builtin();
        assert_eq!(
            engine.explain("delhi-nowhere", None).unwrap_err(),
            ForecastError::NotFound {
                station_id: "delhi-nowhere".to_string()
            }
        );
        assert_eq!(
            engine.explain("delhi-ito", Some(2024)).unwrap_err(),
            ForecastError::YearOutOfRange {
                station_id: "delhi-ito".to_string(),
                year: 2024
            }
        );
    }

    #[test]
    fn resolves_station_location_to_itself() {
        let engine = Engine::builtin();
        for station in engine.list_stations() {
            let result = engine.resolve(station.lat, station.lng, None);
            assert_eq!(result.station_id, station.id);
            assert_eq!(result.reason, AssignmentReason::Voronoi);
            assert!(result.distance.abs() < 1e-9);
        }
    }

    #[test]
    fn far_point_falls_back_to_nearest() {
        let engine = Engine::builtin();
        // Mumbai
        let result = engine.resolve(19.076, 72.8777, None);
        assert!(matches!(result.reason, AssignmentReason::Nearest { .. }));
        assert!(result.distance > 1000.0);
        assert!(reason_text(&result).starts_with("Nearest station: "));
    }

    #[test]
    fn custom_registry_and_config() {
        let registry = StationRegistry::new(
            vec![station("a", 0.25, 0.25), station("b", 0.75, 0.75)],
            BTreeMap::new(),
        );
        let config = EngineConfig {
            global_seed: 1,
            buffer_radius_km: 1.0,
            bounds: Bounds {
                min_lat: 0.0,
                max_lat: 1.0,
                min_lng: 0.0,
                max_lng: 1.0,
            },
        };
        let engine = Engine::new(config, registry).unwrap();

        assert_eq!(engine.config().global_seed, 1);
        assert_eq!(engine.regions().len(), 2);
        assert_eq!(engine.resolve(0.1, 0.1, None).station_id, "a");
        assert_eq!(engine.forecast("b").unwrap().station_name, "B");

        let hidden = LayerVisibility {
            voronoi: false,
            buffers: false,
        };
        let result = engine.resolve(0.9, 0.9, Some(hidden));
        assert_eq!(result.station_id, "b");
        assert!(matches!(result.reason, AssignmentReason::Nearest { .. }));
    }

    #[test]
    fn empty_registry_is_rejected() {
        let registry = StationRegistry::new(Vec::new(), BTreeMap::new());
        assert!(matches!(
            Engine::new(EngineConfig::default(), registry),
            Err(SpatialError::EmptyRegistry)
        ));
    }

    #[test]
    fn geojson_has_a_feature_per_station() {
        let engine = Engine::builtin();
        let GeoJson::FeatureCollection(collection) = engine.regions_geojson() else {
            panic!("expected a FeatureCollection");
        };
        assert_eq!(collection.features.len(), engine.list_stations().len());
    }
}
