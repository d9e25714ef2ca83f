//! Lag and rolling-average features over the running AQI series.

/// The three most recent values of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LagFeatures {
    /// Most recent value.
    pub lag1: f64,
    /// Second most recent, or `lag1` if the series is shorter.
    pub lag2: f64,
    /// Third most recent, or `lag2` if the series is shorter.
    pub lag3: f64,
}

/// Lag features of `series`. An empty series yields zeros.
#[must_use]
pub fn lag_features(series: &[f64]) -> LagFeatures {
    let back = |k: usize| series.len().checked_sub(k).map(|i| series[i]);

    let lag1 = back(1).unwrap_or(0.0);
    let lag2 = back(2).unwrap_or(lag1);
    let lag3 = back(3).unwrap_or(lag2);

    LagFeatures { lag1, lag2, lag3 }
}

/// Mean of the last `window` values (fewer if the series is shorter).
/// An empty series yields `0.0`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn rolling_average(series: &[f64], window: usize) -> f64 {
    let tail = &series[series.len().saturating_sub(window)..];
    if tail.is_empty() {
        return 0.0;
    }
    tail.iter().sum::<f64>() / tail.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_lags() {
        let lags = lag_features(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(
            lags,
            LagFeatures {
                lag1: 4.0,
                lag2: 3.0,
                lag3: 2.0
            }
        );
    }

    #[test]
    fn short_series_reuses_latest() {
        let lags = lag_features(&[7.0]);
        assert_eq!(
            lags,
            LagFeatures {
                lag1: 7.0,
                lag2: 7.0,
                lag3: 7.0
            }
        );

        let lags = lag_features(&[5.0, 9.0]);
        assert!((lags.lag3 - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_series() {
        assert!((lag_features(&[]).lag1).abs() < f64::EPSILON);
        assert!(rolling_average(&[], 3).abs() < f64::EPSILON);
    }

    #[test]
    fn rolling_uses_last_window() {
        let avg = rolling_average(&[100.0, 1.0, 2.0, 3.0], 3);
        assert!((avg - 2.0).abs() < f64::EPSILON);
        let avg = rolling_average(&[4.0, 8.0], 3);
        assert!((avg - 6.0).abs() < f64::EPSILON);
    }
}
