//! Fixed model parameters.
//!
//! Every constant here is part of the reproducibility contract: changing
//! any of them changes published forecasts.

/// Default global seed.
pub const RANDOM_STATE: u32 = 42;

/// Number of forecast years.
pub const FORECAST_HORIZON: usize = 5;

/// First forecast year when no history is supplied.
pub const FIRST_FORECAST_YEAR: i32 = 2025;

/// Year the trend term counts from when no history is supplied.
pub const TREND_ORIGIN_YEAR: i32 = 2021;

/// Yearly AQI improvement applied per year since the first historical year.
pub const TREND_SLOPE: f64 = -8.5;

/// Baseline AQI for a station with multiplier 1.0.
pub const TREND_INTERCEPT: f64 = 298.0;

/// Weight of the lag features.
pub const LAG_WEIGHT: f64 = 0.35;

/// Weight of the rolling average.
pub const ROLLING_WEIGHT: f64 = 0.25;

/// Scale applied to the lag and rolling components when combined.
pub const FEATURE_SCALE: f64 = 0.1;

/// Green cover damping: prediction × (1 − green × this).
pub const GREEN_COVER_DAMPING: f64 = 0.3;

/// Window of the rolling average.
pub const ROLLING_WINDOW: usize = 3;

/// Lower bound of a predicted AQI.
pub const MIN_AQI: f64 = 50.0;

/// Upper bound of a predicted AQI.
pub const MAX_AQI: f64 = 450.0;

/// PM2.5 as a fraction of AQI.
pub const PM25_RATIO: f64 = 0.52;

/// Maximum PM2.5 jitter.
pub const PM25_JITTER: f64 = 5.0;

/// PM10 as a fraction of AQI.
pub const PM10_RATIO: f64 = 0.95;

/// Maximum PM10 jitter.
pub const PM10_JITTER: f64 = 10.0;

/// Confidence of the first forecast year.
pub const BASE_CONFIDENCE: f64 = 0.95;

/// Confidence lost per year of horizon.
pub const CONFIDENCE_DECAY: f64 = 0.06;

/// Confidence floor.
pub const MIN_CONFIDENCE: f64 = 0.65;

/// Half-width of the stable band for the year-over-year trend.
pub const YEARLY_TREND_BAND: f64 = 10.0;

/// Half-width of the stable band for the first-to-last trend.
pub const OVERALL_TREND_BAND: f64 = 15.0;

/// Monthly AQI multipliers, January first. Winter inversions and
/// October-November stubble burning push the late-year months up; the
/// monsoon pulls June-August down.
pub const MONTHLY_FACTORS: [f64; 12] = [
    1.25, 1.15, 0.95, 0.75, 0.70, 0.65, 0.55, 0.60, 0.75, 1.10, 1.45, 1.35,
];

/// Multiplier for calendar month `month` (1-12).
#[must_use]
pub const fn monthly_factor(month: u8) -> f64 {
    MONTHLY_FACTORS[(month as usize + 11) % 12]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monthly_factor_indexing() {
        assert!((monthly_factor(1) - 1.25).abs() < f64::EPSILON);
        assert!((monthly_factor(7) - 0.55).abs() < f64::EPSILON);
        assert!((monthly_factor(11) - 1.45).abs() < f64::EPSILON);
        assert!((monthly_factor(12) - 1.35).abs() < f64::EPSILON);
    }
}
