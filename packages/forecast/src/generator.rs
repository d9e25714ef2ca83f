//! Recursive five-year projection of a station's AQI.
//!
//! Each forecast year is predicted from the running series (historical
//! values followed by the already-predicted years), rounded and clamped, then
//! appended to that series before the next year is predicted.

#![allow(clippy::suboptimal_flops)]

use aqi_map_forecast_models::{
    HistoricalPoint, Season, SeasonalBreakdown, StationForecastResult, TrendDirection,
    YearlyForecast,
};
use aqi_map_station::StationRegistry;
use aqi_map_station_models::{HistoricalYear, Station, StationCoefficients};

use crate::{
    ForecastError,
    features::{lag_features, rolling_average},
    livability,
    model::{
        BASE_CONFIDENCE, CONFIDENCE_DECAY, FEATURE_SCALE, FIRST_FORECAST_YEAR, FORECAST_HORIZON,
        GREEN_COVER_DAMPING, LAG_WEIGHT, MAX_AQI, MIN_AQI, MIN_CONFIDENCE, OVERALL_TREND_BAND,
        PM10_JITTER, PM10_RATIO, PM25_JITTER, PM25_RATIO, RANDOM_STATE, ROLLING_WEIGHT,
        ROLLING_WINDOW, TREND_INTERCEPT, TREND_ORIGIN_YEAR, TREND_SLOPE, YEARLY_TREND_BAND,
        monthly_factor,
    },
    recommendation::recommendation,
    rng::{SeededRng, station_seed},
};

/// Produces forecasts for the stations of a registry.
#[derive(Debug, Clone)]
pub struct ForecastGenerator {
    registry: StationRegistry,
    global_seed: u32,
}

impl ForecastGenerator {
    /// Generator over `registry` with every station stream offset by `global_seed`.
    #[must_use]
    pub const fn new(registry: StationRegistry, global_seed: u32) -> Self {
        Self {
            registry,
            global_seed,
        }
    }

    /// Stations and coefficients this generator projects.
    #[must_use]
    pub const fn registry(&self) -> &StationRegistry {
        &self.registry
    }

    /// Seed added to each station's id-derived seed.
    #[must_use]
    pub const fn global_seed(&self) -> u32 {
        self.global_seed
    }

    /// Forecast and livability assessment for one station.
    ///
    /// # Errors
    ///
    /// * [`ForecastError::NotFound`] if `station_id` is not in the registry
    pub fn forecast(&self, station_id: &str) -> Result<StationForecastResult, ForecastError> {
        let station =
            self.registry
                .get_station(station_id)
                .ok_or_else(|| ForecastError::NotFound {
                    station_id: station_id.to_string(),
                })?;

        let coefficients = self.registry.coefficients(station_id);
        let seed = station_seed(self.global_seed, station_id);

        log::debug!("Projecting {station_id} (seed {seed})");

        Ok(project(
            station,
            &coefficients,
            self.registry.historical_table(),
            seed,
        ))
    }
}

impl Default for ForecastGenerator {
    fn default() -> Self {
        Self::new(StationRegistry::builtin(), RANDOM_STATE)
    }
}

/// Projects `station` over the forecast horizon. Total for any input.
///
/// The trend term counts years from the first row of `historical` and the
/// horizon starts the year after its last row. An empty history falls back
/// to [`TREND_ORIGIN_YEAR`] and [`FIRST_FORECAST_YEAR`].
///
/// `seed` drives the PM2.5/PM10 jitter; two draws are taken per year, PM2.5
/// first.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn project(
    station: &Station,
    coefficients: &StationCoefficients,
    historical: &[HistoricalYear],
    seed: u32,
) -> StationForecastResult {
    let mut rng = SeededRng::new(seed);

    let historical_data: Vec<HistoricalPoint> = historical
        .iter()
        .map(|h| HistoricalPoint {
            year: h.year,
            avg_aqi: to_u16(h.avg_aqi * coefficients.base_multiplier),
        })
        .collect();

    let historical_values: Vec<f64> = historical_data
        .iter()
        .map(|p| f64::from(p.avg_aqi))
        .collect();

    let origin_year = historical.first().map_or(TREND_ORIGIN_YEAR, |h| h.year);
    let first_year = historical.last().map_or(FIRST_FORECAST_YEAR, |h| h.year + 1);

    let mut running = historical_values.clone();
    let mut forecasts = Vec::with_capacity(FORECAST_HORIZON);

    for (offset, year) in (0..FORECAST_HORIZON).zip(first_year..) {
        let predicted = predict(&running, year - origin_year, coefficients);

        let pm25 = to_u16(predicted * PM25_RATIO + rng.next_f64() * PM25_JITTER);
        let pm10 = to_u16(predicted * PM10_RATIO + rng.next_f64() * PM10_JITTER);

        let confidence = (BASE_CONFIDENCE - offset as f64 * CONFIDENCE_DECAY).max(MIN_CONFIDENCE);

        let trend = running.last().map_or(TrendDirection::Stable, |previous| {
            direction(*previous, predicted, YEARLY_TREND_BAND)
        });

        forecasts.push(YearlyForecast {
            year,
            predicted_aqi: to_u16(predicted),
            pm25,
            pm10,
            confidence,
            seasonal_breakdown: seasonal_breakdown(predicted),
            trend,
        });

        running.push(predicted);
    }

    let future_values = &running[historical_values.len()..];
    let livability_score = livability::score(
        future_values,
        &historical_values,
        coefficients.green_cover_score,
    );
    let livability_class = livability::classify(livability_score);

    let overall_trend = match (future_values.first(), future_values.last()) {
        (Some(first), Some(last)) => direction(*first, *last, OVERALL_TREND_BAND),
        _ => TrendDirection::Stable,
    };

    StationForecastResult {
        station_id: station.id.clone(),
        station_name: station.name.clone(),
        station_type: coefficients.station_type,
        coordinates: station.coordinates(),
        historical_data,
        forecasts,
        livability_score,
        livability_class,
        overall_trend,
        recommendation: recommendation(livability_class, overall_trend, coefficients.station_type),
    }
}

/// Rounded and clamped AQI `years_since_origin` years after the first
/// historical year, given the running series.
fn predict(running: &[f64], years_since_origin: i32, coefficients: &StationCoefficients) -> f64 {
    let lags = lag_features(running);
    let rolling = rolling_average(running, ROLLING_WINDOW);

    let trend_component =
        TREND_SLOPE * f64::from(years_since_origin) * coefficients.trend_sensitivity;
    let lag_component = lags.lag1 * LAG_WEIGHT
        + lags.lag2 * LAG_WEIGHT * 0.5
        + lags.lag3 * LAG_WEIGHT * 0.25;
    let rolling_component = rolling * ROLLING_WEIGHT;
    let green_effect = 1.0 - coefficients.green_cover_score * GREEN_COVER_DAMPING;

    let raw = (TREND_INTERCEPT * coefficients.base_multiplier
        + trend_component
        + lag_component * FEATURE_SCALE
        + rolling_component * FEATURE_SCALE)
        * green_effect;

    raw.round().clamp(MIN_AQI, MAX_AQI)
}

fn seasonal_breakdown(predicted: f64) -> SeasonalBreakdown {
    let season_aqi = |season: Season| {
        let months = season.months();
        let factor = months
            .iter()
            .fold(0.0, |sum, month| sum + monthly_factor(*month))
            / 3.0;
        to_u16(predicted * factor)
    };

    SeasonalBreakdown {
        winter: season_aqi(Season::Winter),
        spring: season_aqi(Season::Spring),
        monsoon: season_aqi(Season::Monsoon),
        autumn: season_aqi(Season::Autumn),
    }
}

/// Lower AQI is an improvement; moves within `band` either way are stable.
fn direction(from: f64, to: f64, band: f64) -> TrendDirection {
    if to < from - band {
        TrendDirection::Improving
    } else if to > from + band {
        TrendDirection::Declining
    } else {
        TrendDirection::Stable
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u16(value: f64) -> u16 {
    value.round().clamp(0.0, f64::from(u16::MAX)) as u16
}
