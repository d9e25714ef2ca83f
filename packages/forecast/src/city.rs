//! City-wide aggregation of station forecasts.

use std::{borrow::Borrow, collections::BTreeMap};

use aqi_map_forecast_models::{
    CityWideStats, LivabilityClass, StationForecastResult, TrendDirection,
};

/// Margin by which one trend direction must outnumber the other to set the
/// city-wide direction.
const MAJORITY_MARGIN: usize = 3;

/// Aggregates station forecasts into [`CityWideStats`].
///
/// Accepts owned results or shared handles such as `Arc`. An empty input
/// yields zero counts, zero averages and a stable trend.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn city_wide_stats<R: Borrow<StationForecastResult>>(results: &[R]) -> CityWideStats {
    let results: Vec<&StationForecastResult> = results
        .iter()
        .map(<R as Borrow<StationForecastResult>>::borrow)
        .collect();

    let count_class =
        |class: LivabilityClass| results.iter().filter(|r| r.livability_class == class).count();
    let count_trend =
        |trend: TrendDirection| results.iter().filter(|r| r.overall_trend == trend).count();

    let avg_livability_score = if results.is_empty() {
        0
    } else {
        let total: f64 = results
            .iter()
            .fold(0.0, |sum, r| sum + f64::from(r.livability_score));
        (total / results.len() as f64).round() as u8
    };

    let mut per_year: BTreeMap<i32, f64> = BTreeMap::new();
    for result in &results {
        for forecast in &result.forecasts {
            *per_year.entry(forecast.year).or_default() += f64::from(forecast.predicted_aqi);
        }
    }
    let avg_future_aqi = per_year
        .into_iter()
        .map(|(year, total)| (year, (total / results.len() as f64).round() as u16))
        .collect();

    let improving = count_trend(TrendDirection::Improving);
    let declining = count_trend(TrendDirection::Declining);
    let overall_trend = if improving > declining + MAJORITY_MARGIN {
        TrendDirection::Improving
    } else if declining > improving + MAJORITY_MARGIN {
        TrendDirection::Declining
    } else {
        TrendDirection::Stable
    };

    CityWideStats {
        avg_livability_score,
        highly_livable_count: count_class(LivabilityClass::HighlyLivable),
        moderately_livable_count: count_class(LivabilityClass::ModeratelyLivable),
        low_livability_count: count_class(LivabilityClass::LowLivability),
        overall_trend,
        avg_future_aqi,
    }
}
