#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Forecast and livability result types.
//!
//! These are the shapes handed to map layers, side panels and exporters.
//! Field names serialize in `camelCase` and enum values in `kebab-case`.
//!
//! [`AqiCategory`] also carries the fixed health texts shown next to an AQI
//! reading, and [`AqiExplanation`] bundles them with the ranked
//! [`AqiContributor`]s for one station and year.

use std::collections::BTreeMap;

use aqi_map_station_models::{Coordinates, StationType};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Direction of AQI change. Lower AQI is an improvement.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TrendDirection {
    /// AQI falling
    Improving,
    /// AQI within the stable band
    Stable,
    /// AQI rising
    Declining,
}

/// Three-way livability classification of a station.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum LivabilityClass {
    /// Score 70 and above
    HighlyLivable,
    /// Score 45 to 69
    ModeratelyLivable,
    /// Score below 45
    LowLivability,
}

impl LivabilityClass {
    /// Legend label for map layers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::HighlyLivable => "Highly Livable",
            Self::ModeratelyLivable => "Moderately Livable",
            Self::LowLivability => "Low Livability",
        }
    }

    /// Fill colour used by map layers.
    #[must_use]
    pub const fn fill_color(self) -> &'static str {
        match self {
            Self::HighlyLivable => "#22c55e",
            Self::ModeratelyLivable => "#eab308",
            Self::LowLivability => "#ef4444",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::HighlyLivable,
            Self::ModeratelyLivable,
            Self::LowLivability,
        ]
    }
}

/// Meteorological season used in the seasonal breakdown.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Season {
    /// December to February
    Winter,
    /// March to May
    Spring,
    /// June to August
    Monsoon,
    /// September to November
    Autumn,
}

impl Season {
    /// Calendar months (1-12) belonging to this season.
    #[must_use]
    pub const fn months(self) -> [u8; 3] {
        match self {
            Self::Winter => [12, 1, 2],
            Self::Spring => [3, 4, 5],
            Self::Monsoon => [6, 7, 8],
            Self::Autumn => [9, 10, 11],
        }
    }

    /// Returns all variants of this enum, in breakdown order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Winter, Self::Spring, Self::Monsoon, Self::Autumn]
    }
}

/// Predicted AQI per season for one forecast year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SeasonalBreakdown {
    /// December to February.
    pub winter: u16,
    /// March to May.
    pub spring: u16,
    /// June to August.
    pub monsoon: u16,
    /// September to November.
    pub autumn: u16,
}

impl SeasonalBreakdown {
    /// AQI for one season.
    #[must_use]
    pub const fn get(&self, season: Season) -> u16 {
        match season {
            Season::Winter => self.winter,
            Season::Spring => self.spring,
            Season::Monsoon => self.monsoon,
            Season::Autumn => self.autumn,
        }
    }
}

/// Forecast for one station and one future year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyForecast {
    /// Calendar year.
    pub year: i32,
    /// Predicted yearly AQI, within `50..=450`.
    pub predicted_aqi: u16,
    /// Estimated PM2.5 (µg/m³).
    pub pm25: u16,
    /// Estimated PM10 (µg/m³).
    pub pm10: u16,
    /// Model confidence in `0.65..=0.95`, decreasing with horizon.
    pub confidence: f64,
    /// Per-season AQI.
    pub seasonal_breakdown: SeasonalBreakdown,
    /// Change relative to the previous year in the running series.
    pub trend: TrendDirection,
}

/// One year of a station's scaled historical baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalPoint {
    /// Calendar year.
    pub year: i32,
    /// Station-scaled average AQI.
    pub avg_aqi: u16,
}

/// The full forecast and livability assessment for a station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationForecastResult {
    /// Station id.
    pub station_id: String,
    /// Station name.
    pub station_name: String,
    /// Land-use type from the coefficient table.
    pub station_type: StationType,
    /// Station position.
    pub coordinates: Coordinates,
    /// Station-scaled historical series, oldest first.
    pub historical_data: Vec<HistoricalPoint>,
    /// Five consecutive yearly forecasts, oldest first.
    pub forecasts: Vec<YearlyForecast>,
    /// Livability score in `0..=100`.
    pub livability_score: u8,
    /// Class derived from the score.
    pub livability_class: LivabilityClass,
    /// First-to-last forecast direction.
    pub overall_trend: TrendDirection,
    /// Advice text for residents.
    pub recommendation: String,
}

impl StationForecastResult {
    /// Forecast for a given calendar year, if inside the horizon.
    #[must_use]
    pub fn forecast_for(&self, year: i32) -> Option<&YearlyForecast> {
        self.forecasts.iter().find(|f| f.year == year)
    }
}

/// Aggregate view across every station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityWideStats {
    /// Rounded mean livability score.
    pub avg_livability_score: u8,
    /// Stations classed highly livable.
    pub highly_livable_count: usize,
    /// Stations classed moderately livable.
    pub moderately_livable_count: usize,
    /// Stations classed low livability.
    pub low_livability_count: usize,
    /// Majority direction across station overall trends.
    pub overall_trend: TrendDirection,
    /// Rounded mean predicted AQI per forecast year.
    pub avg_future_aqi: BTreeMap<i32, u16>,
}

/// CPCB-style AQI band.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AqiCategory {
    /// 0-50
    Good,
    /// 51-100
    Satisfactory,
    /// 101-150
    Moderate,
    /// 151-200
    Poor,
    /// 201-300
    VeryPoor,
    /// Above 300
    Hazardous,
}

impl AqiCategory {
    /// Band containing `aqi`.
    #[must_use]
    pub const fn from_aqi(aqi: u16) -> Self {
        match aqi {
            0..=50 => Self::Good,
            51..=100 => Self::Satisfactory,
            101..=150 => Self::Moderate,
            151..=200 => Self::Poor,
            201..=300 => Self::VeryPoor,
            _ => Self::Hazardous,
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Satisfactory => "Satisfactory",
            Self::Moderate => "Moderate",
            Self::Poor => "Poor",
            Self::VeryPoor => "Very Poor",
            Self::Hazardous => "Hazardous",
        }
    }

    /// Short description of the band.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Good => "Air quality is satisfactory",
            Self::Satisfactory => "Acceptable air quality",
            Self::Moderate => "May cause breathing discomfort",
            Self::Poor => "Breathing discomfort likely",
            Self::VeryPoor => "Respiratory illness likely",
            Self::Hazardous => "Serious health effects",
        }
    }

    #[must_use]
    pub const fn health_implications(self) -> &'static str {
        match self {
            Self::Good => {
                "Air quality is considered satisfactory, and air pollution poses little or no risk."
            }
            Self::Satisfactory => {
                "Air quality is acceptable. However, there may be a risk for some people, \
                 particularly those who are unusually sensitive to air pollution."
            }
            Self::Moderate => {
                "Members of sensitive groups may experience health effects. \
                 The general public is less likely to be affected."
            }
            Self::Poor => {
                "Everyone may begin to experience health effects; \
                 members of sensitive groups may experience more serious health effects."
            }
            Self::VeryPoor => {
                "Health warnings of emergency conditions. \
                 The entire population is more likely to be affected."
            }
            Self::Hazardous => "Health alert: everyone may experience more serious health effects.",
        }
    }

    #[must_use]
    pub const fn cautionary_statement(self) -> &'static str {
        match self {
            Self::Good => "None",
            Self::Satisfactory => {
                "Unusually sensitive people should consider reducing prolonged outdoor exertion."
            }
            Self::Moderate => {
                "Active children and adults, and people with respiratory disease \
                 should limit prolonged outdoor exertion."
            }
            Self::Poor => {
                "Active children and adults, and people with respiratory disease \
                 should avoid prolonged outdoor exertion."
            }
            Self::VeryPoor => "Everyone should avoid all outdoor exertion.",
            Self::Hazardous => "Everyone should avoid all outdoor physical activity.",
        }
    }

    /// One-sentence explanation of what drives a reading in this band.
    #[must_use]
    pub const fn summary(self) -> &'static str {
        match self {
            Self::Good => "Air quality is excellent with minimal pollution sources.",
            Self::Satisfactory => "Air quality is acceptable with minor pollution factors.",
            Self::Moderate => "Moderate pollution from multiple sources affects air quality.",
            Self::Poor => "Poor air quality due to significant pollution factors.",
            Self::VeryPoor => "Very poor air quality with high pollution from multiple sources.",
            Self::Hazardous => "Hazardous air quality due to severe pollution levels.",
        }
    }

    /// Activity and protection advice for the band.
    #[must_use]
    pub const fn health_advisory(self) -> HealthAdvisory {
        match self {
            Self::Good => HealthAdvisory {
                general: "Air quality is ideal for most activities.",
                sensitive_groups: "No precautions needed.",
                outdoor: "Great day for outdoor exercise and activities.",
                indoor: "Open windows for fresh air.",
                mask: "No mask required.",
            },
            Self::Satisfactory => HealthAdvisory {
                general: "Air quality is acceptable for most people.",
                sensitive_groups: "Unusually sensitive people may want to reduce prolonged outdoor exertion.",
                outdoor: "Good for outdoor activities with minor precautions.",
                indoor: "Normal activities recommended.",
                mask: "Optional for sensitive individuals.",
            },
            Self::Moderate => HealthAdvisory {
                general: "Moderate health concern for sensitive groups.",
                sensitive_groups: "People with respiratory conditions, elderly, and children should limit outdoor exposure.",
                outdoor: "Reduce prolonged outdoor exertion.",
                indoor: "Consider running air purifiers.",
                mask: "N95 mask recommended for prolonged outdoor exposure.",
            },
            Self::Poor => HealthAdvisory {
                general: "Unhealthy for sensitive groups, concerning for all.",
                sensitive_groups: "Avoid outdoor activities. Keep medications handy.",
                outdoor: "Avoid prolonged outdoor exertion.",
                indoor: "Keep windows closed. Use air purifiers.",
                mask: "N95/N99 mask required outdoors.",
            },
            Self::VeryPoor => HealthAdvisory {
                general: "Health alert - everyone may experience effects.",
                sensitive_groups: "Stay indoors. Seek medical attention if symptoms occur.",
                outdoor: "Avoid all outdoor activities.",
                indoor: "Keep all windows and doors sealed. Run air purifiers on high.",
                mask: "N95/N99 mask essential for any outdoor exposure.",
            },
            Self::Hazardous => HealthAdvisory {
                general: "Health emergency - serious risk to all.",
                sensitive_groups: "Emergency conditions. Stay indoors at all times.",
                outdoor: "Do not go outdoors under any circumstances.",
                indoor: "Seal all openings. Use maximum air filtration.",
                mask: "Avoid any outdoor exposure. If unavoidable, use N99 or P100 respirator.",
            },
        }
    }

    /// Coarse three-colour zone for the band.
    #[must_use]
    pub const fn zone(self) -> AqiZone {
        match self {
            Self::Good | Self::Satisfactory => AqiZone::Blue,
            Self::Moderate | Self::Poor => AqiZone::Yellow,
            Self::VeryPoor | Self::Hazardous => AqiZone::Red,
        }
    }
}

/// Three-colour residential zoning.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AqiZone {
    /// AQI up to 100
    Blue,
    /// AQI 101-200
    Yellow,
    /// AQI above 200
    Red,
}

impl AqiZone {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Blue => "Blue Zone",
            Self::Yellow => "Yellow Zone",
            Self::Red => "Red Zone",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Blue => "Safe for all - Good air quality",
            Self::Yellow => "Caution advised - Moderate air quality",
            Self::Red => "Health risk - Poor air quality",
        }
    }

    /// Residential advice for the zone.
    #[must_use]
    pub const fn recommendation(self) -> &'static str {
        match self {
            Self::Blue => "Excellent for residential living and outdoor activities",
            Self::Yellow => "Consider air purifiers for sensitive individuals",
            Self::Red => "Not recommended for long-term residence without precautions",
        }
    }
}

/// Per-audience advice for an AQI band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthAdvisory {
    pub general: &'static str,
    pub sensitive_groups: &'static str,
    pub outdoor: &'static str,
    pub indoor: &'static str,
    pub mask: &'static str,
}

/// How strongly a factor contributes to a reading.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Impact {
    /// Score above 0.7
    High,
    /// Score above 0.5
    Medium,
    /// Anything lower
    Low,
}

/// Icon key for a contributing factor.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ContributorIcon {
    Traffic,
    Industry,
    Population,
    Greenery,
    Weather,
    Trend,
}

/// One ranked factor behind a station's AQI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AqiContributor {
    /// Display name (e.g. `"Traffic Pollution"`).
    pub factor: &'static str,
    /// Weighted score the ranking is based on.
    pub score: f64,
    pub impact: Impact,
    pub description: &'static str,
    pub icon: ContributorIcon,
}

/// Why a station reads the AQI it does in a given year, with the matching
/// health guidance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AqiExplanation {
    pub station_id: String,
    pub station_name: String,
    /// Forecast year the reading belongs to.
    pub year: i32,
    /// Predicted AQI for `year`.
    pub aqi: u16,
    pub category: AqiCategory,
    /// See [`AqiCategory::description`].
    pub description: &'static str,
    pub zone: AqiZone,
    /// See [`AqiZone::recommendation`].
    pub zone_recommendation: &'static str,
    /// Station trend fed into the contributor ranking.
    pub trend: TrendDirection,
    /// See [`AqiCategory::summary`].
    pub summary: &'static str,
    /// Between three and five factors, strongest first.
    pub contributors: Vec<AqiContributor>,
    pub health_implications: &'static str,
    pub cautionary_statement: &'static str,
    pub advisory: HealthAdvisory,
}
