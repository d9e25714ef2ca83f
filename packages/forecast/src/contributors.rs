//! Ranked explanation of what drives a station's AQI.
//!
//! Each candidate factor gets a score from the station's exposure estimate,
//! its green cover and the AQI band being explained; readings above
//! [`HIGH_AQI`] amplify the source factors. Candidates scoring above
//! [`SIGNIFICANT_SCORE`] are kept, strongest first, up to
//! [`MAX_CONTRIBUTORS`]. When fewer than [`MIN_CONTRIBUTORS`] qualify the
//! top three are shown regardless of score.

use aqi_map_forecast_models::{
    AqiCategory, AqiContributor, AqiExplanation, ContributorIcon, Impact, StationForecastResult,
    TrendDirection,
};
use aqi_map_station_models::StationExposure;

/// AQI above which source factors are amplified.
pub const HIGH_AQI: u16 = 150;

/// AQI above which (up to [`HIGH_AQI`]) weather is a moderate factor.
pub const MODERATE_AQI: u16 = 100;

/// Minimum score for a factor to be listed on its own merit.
pub const SIGNIFICANT_SCORE: f64 = 0.35;

pub const MIN_CONTRIBUTORS: usize = 3;
pub const MAX_CONTRIBUTORS: usize = 5;

const HIGH_IMPACT: f64 = 0.7;
const MEDIUM_IMPACT: f64 = 0.5;

/// Ranks the factors behind a reading of `aqi`.
///
/// `green_cover` is the station's green cover score. A `trend` adds an
/// "AQI Trend" candidate. Always returns between three and five entries.
#[must_use]
pub fn aqi_contributors(
    exposure: &StationExposure,
    green_cover: f64,
    aqi: u16,
    trend: Option<TrendDirection>,
) -> Vec<AqiContributor> {
    let high = aqi > HIGH_AQI;
    let moderate = aqi > MODERATE_AQI && !high;

    let weather = if high {
        0.75
    } else if moderate {
        0.5
    } else {
        0.3
    };

    let mut candidates = vec![
        (
            "Traffic Pollution",
            ContributorIcon::Traffic,
            exposure.traffic_intensity * if high { 1.3 } else { 1.0 },
        ),
        (
            "Industrial Activity",
            ContributorIcon::Industry,
            exposure.industrial_proximity * if high { 1.4 } else { 1.0 },
        ),
        (
            "Population Density",
            ContributorIcon::Population,
            exposure.population_density * if high { 1.2 } else { 0.9 },
        ),
        (
            "Green Cover",
            ContributorIcon::Greenery,
            (1.0 - green_cover) * if high { 1.2 } else { 0.8 },
        ),
        ("Weather Conditions", ContributorIcon::Weather, weather),
    ];

    if let Some(trend) = trend {
        let score = match trend {
            TrendDirection::Declining => 0.8,
            TrendDirection::Stable => 0.4,
            TrendDirection::Improving => 0.2,
        };
        candidates.push(("AQI Trend", ContributorIcon::Trend, score));
    }

    // Stable, so equal scores keep candidate order.
    candidates.sort_by(|a, b| b.2.total_cmp(&a.2));

    let significant = candidates
        .iter()
        .filter(|(_, _, score)| *score > SIGNIFICANT_SCORE)
        .take(MAX_CONTRIBUTORS)
        .count();
    let shown = significant.max(MIN_CONTRIBUTORS.min(candidates.len()));

    log::trace!("AQI {aqi}: {significant} significant of {} factors", candidates.len());

    candidates
        .into_iter()
        .take(shown)
        .map(|(factor, icon, score)| AqiContributor {
            factor,
            score,
            impact: impact(score),
            description: description(icon, score, aqi, trend),
            icon,
        })
        .collect()
}

/// Explanation of `forecast` for `year`, defaulting to the first forecast
/// year. Returns `None` if `year` is outside the horizon.
#[must_use]
pub fn explain(
    forecast: &StationForecastResult,
    exposure: &StationExposure,
    green_cover: f64,
    year: Option<i32>,
) -> Option<AqiExplanation> {
    let yearly = match year {
        Some(year) => forecast.forecast_for(year)?,
        None => forecast.forecasts.first()?,
    };

    let aqi = yearly.predicted_aqi;
    let category = AqiCategory::from_aqi(aqi);
    let trend = forecast.overall_trend;

    Some(AqiExplanation {
        station_id: forecast.station_id.clone(),
        station_name: forecast.station_name.clone(),
        year: yearly.year,
        aqi,
        category,
        description: category.description(),
        zone: category.zone(),
        zone_recommendation: category.zone().recommendation(),
        trend,
        summary: category.summary(),
        contributors: aqi_contributors(exposure, green_cover, aqi, Some(trend)),
        health_implications: category.health_implications(),
        cautionary_statement: category.cautionary_statement(),
        advisory: category.health_advisory(),
    })
}

fn impact(score: f64) -> Impact {
    if score > HIGH_IMPACT {
        Impact::High
    } else if score > MEDIUM_IMPACT {
        Impact::Medium
    } else {
        Impact::Low
    }
}

fn description(
    icon: ContributorIcon,
    score: f64,
    aqi: u16,
    trend: Option<TrendDirection>,
) -> &'static str {
    match icon {
        ContributorIcon::Traffic => {
            if score > 0.8 {
                "Heavy vehicular emissions dominate this zone"
            } else if score > 0.6 {
                "Moderate traffic contributes to particulate matter"
            } else {
                "Low traffic impact on air quality"
            }
        }
        ContributorIcon::Industry => {
            if score > 0.7 {
                "Industrial emissions significantly affect air quality"
            } else if score > 0.4 {
                "Nearby industrial zones add particulate matter"
            } else {
                "Minimal industrial influence detected"
            }
        }
        ContributorIcon::Population => {
            if score > 0.75 {
                "High population density increases emissions"
            } else if score > 0.5 {
                "Moderate urban density affects local air"
            } else {
                "Lower density reduces pollution sources"
            }
        }
        ContributorIcon::Greenery => {
            if score > 0.6 {
                "Low green cover reduces natural air purification"
            } else if score > 0.4 {
                "Moderate vegetation provides some filtration"
            } else {
                "Good green cover helps purify air"
            }
        }
        ContributorIcon::Weather => {
            if aqi > 200 {
                "Atmospheric conditions trap pollutants"
            } else if aqi > HIGH_AQI {
                "Weather patterns limit pollutant dispersion"
            } else {
                "Favorable conditions for air circulation"
            }
        }
        ContributorIcon::Trend => match trend {
            Some(TrendDirection::Declining) => "Air quality is worsening over time",
            Some(TrendDirection::Stable) => "Air quality remains relatively unchanged",
            _ => "Air quality shows improvement trend",
        },
    }
}

#[cfg(test)]
mod tests {
    use aqi_map_forecast_models::AqiZone;

    use super::*;
    use crate::ForecastGenerator;

    const ANAND_VIHAR: StationExposure = StationExposure {
        population_density: 0.85,
        traffic_intensity: 0.95,
        industrial_proximity: 0.70,
    };

    fn factors(contributors: &[AqiContributor]) -> Vec<&'static str> {
        contributors.iter().map(|c| c.factor).collect()
    }

    #[test]
    fn high_aqi_amplifies_sources() {
        let contributors = aqi_contributors(&ANAND_VIHAR, 0.2, 372, None);

        assert_eq!(
            factors(&contributors),
            vec![
                "Traffic Pollution",
                "Population Density",
                "Industrial Activity",
                "Green Cover",
                "Weather Conditions",
            ]
        );
        assert!((contributors[0].score - 1.235).abs() < 1e-9);
        assert!(contributors.iter().all(|c| c.impact == Impact::High));
        assert_eq!(
            contributors[0].description,
            "Heavy vehicular emissions dominate this zone"
        );
        assert_eq!(
            contributors[4].description,
            "Atmospheric conditions trap pollutants"
        );
    }

    #[test]
    fn at_most_five_are_listed() {
        let contributors =
            aqi_contributors(&ANAND_VIHAR, 0.2, 372, Some(TrendDirection::Declining));

        assert_eq!(contributors.len(), MAX_CONTRIBUTORS);
        assert_eq!(contributors[4].factor, "AQI Trend");
        assert_eq!(contributors[4].description, "Air quality is worsening over time");
        assert!(!factors(&contributors).contains(&"Weather Conditions"));
    }

    #[test]
    fn insignificant_factors_are_dropped() {
        let contributors = aqi_contributors(&StationExposure::default(), 0.4, 80, None);

        assert_eq!(
            factors(&contributors),
            vec![
                "Traffic Pollution",
                "Population Density",
                "Green Cover",
                "Industrial Activity",
            ]
        );
        assert_eq!(contributors[0].impact, Impact::Medium, "0.6 is not above 0.7");
        assert_eq!(contributors[0].description, "Low traffic impact on air quality");
        assert_eq!(contributors[2].impact, Impact::Low);
        assert_eq!(
            contributors[3].description,
            "Minimal industrial influence detected"
        );
    }

    #[test]
    fn fewer_than_three_significant_shows_top_three() {
        let clean = StationExposure {
            population_density: 0.3,
            traffic_intensity: 0.3,
            industrial_proximity: 0.1,
        };
        let contributors = aqi_contributors(&clean, 0.9, 40, Some(TrendDirection::Stable));

        // Traffic and weather tie at 0.3 and keep their candidate order.
        assert_eq!(
            factors(&contributors),
            vec!["AQI Trend", "Traffic Pollution", "Weather Conditions"]
        );
        assert!(contributors.iter().all(|c| c.impact == Impact::Low));
        assert_eq!(
            contributors[2].description,
            "Favorable conditions for air circulation"
        );
    }

    #[test]
    fn moderate_band_weather_and_ties() {
        let pusa = StationExposure {
            population_density: 0.5,
            traffic_intensity: 0.45,
            industrial_proximity: 0.15,
        };
        let contributors = aqi_contributors(&pusa, 0.55, 120, Some(TrendDirection::Declining));

        assert_eq!(
            factors(&contributors),
            vec![
                "AQI Trend",
                "Weather Conditions",
                "Traffic Pollution",
                "Population Density",
                "Green Cover",
            ]
        );
        assert!((contributors[1].score - 0.5).abs() < f64::EPSILON);
        assert_eq!(contributors[1].impact, Impact::Low, "0.5 is not above 0.5");
        assert_eq!(
            contributors[4].description,
            "Good green cover helps purify air"
        );
    }

    #[test]
    fn improving_trend_is_weak() {
        let contributors = aqi_contributors(
            &StationExposure::default(),
            0.4,
            80,
            Some(TrendDirection::Improving),
        );
        assert!(!factors(&contributors).contains(&"AQI Trend"));
    }

    #[test]
    fn impact_thresholds_are_strict() {
        assert_eq!(impact(0.71), Impact::High);
        assert_eq!(impact(0.7), Impact::Medium);
        assert_eq!(impact(0.51), Impact::Medium);
        assert_eq!(impact(0.5), Impact::Low);
    }

    #[test]
    fn explains_first_forecast_year_by_default() {
        let forecast = ForecastGenerator::default()
            .forecast("delhi-anand-vihar")
            .unwrap();

        let explanation = explain(&forecast, &ANAND_VIHAR, 0.2, None).unwrap();
        assert_eq!(explanation.year, 2025);
        assert_eq!(explanation.aqi, 372);
        assert_eq!(explanation.category, AqiCategory::Hazardous);
        assert_eq!(explanation.zone, AqiZone::Red);
        assert_eq!(explanation.trend, TrendDirection::Improving);
        assert_eq!(
            explanation.summary,
            "Hazardous air quality due to severe pollution levels."
        );
        assert_eq!(explanation.contributors.len(), 5);
        assert_eq!(
            explanation.advisory.outdoor,
            "Do not go outdoors under any circumstances."
        );

        let later = explain(&forecast, &ANAND_VIHAR, 0.2, Some(2029)).unwrap();
        assert_eq!(later.aqi, 336);

        assert!(explain(&forecast, &ANAND_VIHAR, 0.2, Some(2030)).is_none());
    }

    #[test]
    fn explanation_serializes_camel_case() {
        let forecast = ForecastGenerator::default().forecast("delhi-pusa").unwrap();
        let explanation = explain(&forecast, &StationExposure::default(), 0.7, None).unwrap();
        let json = serde_json::to_value(&explanation).unwrap();

        assert_eq!(json["stationId"], "delhi-pusa");
        assert_eq!(json["category"], "poor");
        assert_eq!(json["zone"], "yellow");
        assert_eq!(json["description"], "Breathing discomfort likely");
        assert_eq!(
            json["zoneRecommendation"],
            "Consider air purifiers for sensitive individuals"
        );
        assert_eq!(json["contributors"][0]["icon"], "traffic");
        assert_eq!(json["contributors"][1]["impact"], "high");
        assert!(json["advisory"]["sensitiveGroups"].is_string());
    }
}
