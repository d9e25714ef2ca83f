//! Shared historical baseline (2021-2024 yearly city averages).
//!
//! Every station uses the same four rows; a station's own history is this
//! table scaled by its `base_multiplier`.

use aqi_map_station_models::HistoricalYear;

/// Yearly city-wide averages, oldest first.
pub static HISTORICAL_YEARS: &[HistoricalYear] = &[
    HistoricalYear {
        year: 2021,
        avg_aqi: 298.0,
        pm25: 156.2,
        pm10: 289.4,
        good_days: 52,
        moderate_days: 89,
        poor_days: 224,
    },
    HistoricalYear {
        year: 2022,
        avg_aqi: 285.0,
        pm25: 148.7,
        pm10: 275.8,
        good_days: 61,
        moderate_days: 95,
        poor_days: 209,
    },
    HistoricalYear {
        year: 2023,
        avg_aqi: 271.0,
        pm25: 139.4,
        pm10: 261.2,
        good_days: 68,
        moderate_days: 102,
        poor_days: 195,
    },
    HistoricalYear {
        year: 2024,
        avg_aqi: 262.0,
        pm25: 132.1,
        pm10: 248.5,
        good_days: 75,
        moderate_days: 108,
        poor_days: 182,
    },
];
