#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the aqi-map engine.
//!
//! ```text
//! aqi_map stations
//! aqi_map resolve --lat 28.61 --lng 77.21 [--no-voronoi] [--no-buffers]
//! aqi_map forecast <station-id>
//! aqi_map explain <station-id> [--year 2027]
//! aqi_map summary
//! aqi_map regions
//! ```
//!
//! Every command prints pretty JSON to stdout. `--config <path>` loads an
//! engine config TOML; logging is controlled with `RUST_LOG`.

use std::path::PathBuf;

use aqi_map_engine::{Engine, EngineConfig, reason_text};
use aqi_map_forecast_models::{AqiCategory, AqiZone, StationForecastResult};
use aqi_map_spatial_models::{AreaStationResult, LayerVisibility};
use aqi_map_station::StationRegistry;
use aqi_map_station_models::{Station, StationCoefficients};
use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Parser)]
#[command(
    name = "aqi_map",
    about = "Deterministic AQI forecasts and area-to-station resolution"
)]
struct Cli {
    /// Engine config TOML (seed, buffer radius, bounds)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List stations with their model coefficients
    Stations,
    /// Find the station governing a map point
    Resolve {
        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// Skip the Voronoi stage
        #[arg(long)]
        no_voronoi: bool,
        /// Skip the influence buffer stage
        #[arg(long)]
        no_buffers: bool,
    },
    /// Five-year forecast and livability assessment for a station
    Forecast {
        /// Station ID (e.g. `delhi-ito`)
        station_id: String,
    },
    /// Ranked AQI contributors and health advice for a station
    Explain {
        /// Station ID (e.g. `delhi-ito`)
        station_id: String,
        /// Forecast year; defaults to the first one
        #[arg(long)]
        year: Option<i32>,
    },
    /// City-wide livability and trend summary
    Summary,
    /// Voronoi regions as a `GeoJSON` `FeatureCollection`
    Regions,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StationListing<'a> {
    #[serde(flatten)]
    station: &'a Station,
    coefficients: StationCoefficients,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Resolution {
    #[serde(flatten)]
    result: AreaStationResult,
    reason_kind: &'static str,
    reason_text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ForecastReport<'a> {
    #[serde(flatten)]
    forecast: &'a StationForecastResult,
    livability_label: &'static str,
    livability_color: &'static str,
    categories: Vec<YearCategory>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct YearCategory {
    year: i32,
    category: AqiCategory,
    label: &'static str,
    zone: AqiZone,
    zone_label: &'static str,
    zone_description: &'static str,
}

impl<'a> ForecastReport<'a> {
    fn new(forecast: &'a StationForecastResult) -> Self {
        let categories = forecast
            .forecasts
            .iter()
            .map(|f| {
                let category = AqiCategory::from_aqi(f.predicted_aqi);
                YearCategory {
                    year: f.year,
                    category,
                    label: category.label(),
                    zone: category.zone(),
                    zone_label: category.zone().label(),
                    zone_description: category.zone().description(),
                }
            })
            .collect();

        Self {
            forecast,
            livability_label: forecast.livability_class.label(),
            livability_color: forecast.livability_class.fill_color(),
            categories,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    let engine = Engine::new(config, StationRegistry::builtin())?;

    match cli.command {
        Commands::Stations => {
            let registry = engine.registry();
            let listing: Vec<StationListing<'_>> = registry
                .list_stations()
                .iter()
                .map(|station| StationListing {
                    station,
                    coefficients: registry.coefficients(&station.id),
                })
                .collect();
            print_json(&listing)?;
        }
        Commands::Resolve {
            lat,
            lng,
            no_voronoi,
            no_buffers,
        } => {
            let visibility = LayerVisibility {
                voronoi: !no_voronoi,
                buffers: !no_buffers,
            };
            let result = engine.resolve(lat, lng, Some(visibility));
            log::info!("{}", reason_text(&result));
            print_json(&Resolution {
                reason_kind: result.reason.kind(),
                reason_text: reason_text(&result),
                result,
            })?;
        }
        Commands::Forecast { station_id } => {
            let forecast = engine.forecast(&station_id).inspect_err(|e| {
                log::error!("{e}");
            })?;
            print_json(&ForecastReport::new(&forecast))?;
        }
        Commands::Explain { station_id, year } => {
            let explanation = engine.explain(&station_id, year).inspect_err(|e| {
                log::error!("{e}");
            })?;
            log::info!(
                "{} {}: AQI {} ({})",
                explanation.station_name,
                explanation.year,
                explanation.aqi,
                explanation.category.label()
            );
            print_json(&explanation)?;
        }
        Commands::Summary => {
            print_json(&engine.city_wide_stats()?)?;
        }
        Commands::Regions => {
            print_json(&engine.regions_geojson())?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forecast_report_adds_legend_and_categories() {
        let engine = Engine::builtin();
        let forecast = engine.forecast("delhi-pusa").unwrap();
        let json = serde_json::to_value(ForecastReport::new(&forecast)).unwrap();

        assert_eq!(json["stationId"], "delhi-pusa");
        assert_eq!(json["livabilityLabel"], "Moderately Livable");
        assert_eq!(json["livabilityColor"], "#eab308");
        assert_eq!(json["categories"][0]["year"], 2025);
        assert_eq!(json["categories"][0]["category"], "poor");
        assert_eq!(json["categories"][0]["zone"], "yellow");
        assert_eq!(json["categories"][0]["zoneLabel"], "Yellow Zone");
        assert_eq!(
            json["categories"][0]["zoneDescription"],
            "Caution advised - Moderate air quality"
        );
    }

    #[test]
    fn resolution_reports_reason_kind() {
        let engine = Engine::builtin();
        let result = engine.resolve(19.076, 72.8777, None);
        let json = serde_json::to_value(Resolution {
            reason_kind: result.reason.kind(),
            reason_text: reason_text(&result),
            result,
        })
        .unwrap();

        assert_eq!(json["reasonKind"], "nearest");
        assert!(json["reasonText"].as_str().unwrap().starts_with("Nearest station: "));
    }
}
