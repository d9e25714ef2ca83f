//! Resident-facing advice text.

use aqi_map_forecast_models::{LivabilityClass, TrendDirection};
use aqi_map_station_models::StationType;

/// Advice for a livability class and overall trend, followed by a land-use
/// note for industrial and traffic stations.
#[must_use]
pub fn recommendation(
    class: LivabilityClass,
    trend: TrendDirection,
    station_type: StationType,
) -> String {
    let mut text = base_text(class, trend).to_string();
    if let Some(note) = type_note(station_type) {
        text.push_str(note);
    }
    text
}

const fn base_text(class: LivabilityClass, trend: TrendDirection) -> &'static str {
    use LivabilityClass::{HighlyLivable, LowLivability, ModeratelyLivable};
    use TrendDirection::{Declining, Improving, Stable};

    match (class, trend) {
        (HighlyLivable, Improving) => {
            "Excellent choice for long-term residence. Air quality is improving and expected to remain good."
        }
        (HighlyLivable, Stable) => {
            "Highly recommended for residential purposes. Consistent good air quality expected."
        }
        (HighlyLivable, Declining) => {
            "Currently good but monitor trends. Consider air purifiers as precaution."
        }
        (ModeratelyLivable, Improving) => {
            "Promising area with improving air quality. Good for investment as conditions will improve."
        }
        (ModeratelyLivable, Stable) => {
            "Acceptable for residence with precautions. Air purifiers recommended for sensitive groups."
        }
        (ModeratelyLivable, Declining) => {
            "Caution advised. Consider other areas or invest in robust air filtration."
        }
        (LowLivability, Improving) => {
            "Wait for further improvement before considering for residence. Industrial activity affects air quality."
        }
        (LowLivability, Stable) => {
            "Not recommended for long-term residence without significant air quality measures."
        }
        (LowLivability, Declining) => {
            "Avoid for residential purposes. High pollution expected to continue."
        }
    }
}

const fn type_note(station_type: StationType) -> Option<&'static str> {
    match station_type {
        StationType::Industrial => Some(" Industrial area - expect higher pollution."),
        StationType::Traffic => Some(" High traffic area - peak hour pollution expected."),
        StationType::Residential | StationType::Mixed => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_station_has_no_note() {
        assert_eq!(
            recommendation(
                LivabilityClass::ModeratelyLivable,
                TrendDirection::Improving,
                StationType::Mixed,
            ),
            "Promising area with improving air quality. Good for investment as conditions will improve."
        );
    }

    #[test]
    fn industrial_note_is_appended() {
        let text = recommendation(
            LivabilityClass::LowLivability,
            TrendDirection::Declining,
            StationType::Industrial,
        );
        assert_eq!(
            text,
            "Avoid for residential purposes. High pollution expected to continue. Industrial area - expect higher pollution."
        );
    }

    #[test]
    fn traffic_note_is_appended() {
        let text = recommendation(
            LivabilityClass::HighlyLivable,
            TrendDirection::Stable,
            StationType::Traffic,
        );
        assert!(text.starts_with("Highly recommended"));
        assert!(text.ends_with(" High traffic area - peak hour pollution expected."));
    }

    #[test]
    fn every_pair_has_distinct_text() {
        let trends = [
            TrendDirection::Improving,
            TrendDirection::Stable,
            TrendDirection::Declining,
        ];
        let mut seen = std::collections::BTreeSet::new();
        for class in LivabilityClass::all() {
            for trend in trends {
                let text = recommendation(*class, trend, StationType::Residential);
                assert!(seen.insert(text), "duplicate text for {class}/{trend}");
            }
        }
        assert_eq!(seen.len(), 9);
    }
}
