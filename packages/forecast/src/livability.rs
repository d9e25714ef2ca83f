//! Livability scoring.
//!
//! Reduces a station's historical and forecast AQI series to a single
//! `0..=100` score:
//!
//! | component | weight |
//! |---|---|
//! | mean future AQI level | 50% |
//! | stability (std-dev of all years) | 25% |
//! | share of future years at AQI ≤ 150 | 25% |
//! | green cover bonus (`green × 10`) | additive |

#![allow(clippy::suboptimal_flops)]

use aqi_map_forecast_models::LivabilityClass;

const AQI_WEIGHT: f64 = 0.50;
const STABILITY_WEIGHT: f64 = 0.25;
const GOOD_DAYS_WEIGHT: f64 = 0.25;
const GREEN_BONUS_SCALE: f64 = 10.0;
const GOOD_AQI_MAX: f64 = 150.0;

/// Score at or above which a station is highly livable.
pub const HIGHLY_LIVABLE_MIN: u8 = 70;

/// Score at or above which a station is moderately livable.
pub const MODERATELY_LIVABLE_MIN: u8 = 45;

/// Computes the livability score.
///
/// An empty `future` series contributes zero to the level and good-day
/// components.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn score(future: &[f64], historical: &[f64], green_cover_score: f64) -> u8 {
    let aqi_score = mean(future).map_or(0.0, |avg| (100.0 - (avg - 50.0) * 0.3).max(0.0));

    let all: Vec<f64> = historical.iter().chain(future).copied().collect();
    let stability_score = (100.0 - std_dev(&all) * 0.5).max(0.0);

    let good_days_score = if future.is_empty() {
        0.0
    } else {
        let good = future.iter().filter(|aqi| **aqi <= GOOD_AQI_MAX).count();
        good as f64 / future.len() as f64 * 100.0
    };

    let green_bonus = green_cover_score * GREEN_BONUS_SCALE;

    let total = aqi_score * AQI_WEIGHT
        + stability_score * STABILITY_WEIGHT
        + good_days_score * GOOD_DAYS_WEIGHT
        + green_bonus;

    total.clamp(0.0, 100.0).round() as u8
}

/// Maps a score to its livability class.
#[must_use]
pub const fn classify(score: u8) -> LivabilityClass {
    if score >= HIGHLY_LIVABLE_MIN {
        LivabilityClass::HighlyLivable
    } else if score >= MODERATELY_LIVABLE_MIN {
        LivabilityClass::ModeratelyLivable
    } else {
        LivabilityClass::LowLivability
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().fold(0.0, |a, b| a + b) / values.len() as f64)
    }
}

/// Population standard deviation; zero for an empty slice.
#[allow(clippy::cast_precision_loss)]
fn std_dev(values: &[f64]) -> f64 {
    let Some(avg) = mean(values) else {
        return 0.0;
    };
    let variance = values.iter().fold(0.0, |sum, v| sum + (v - avg).powi(2)) / values.len() as f64;
    variance.sqrt()
}
