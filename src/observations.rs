/// Observation registry for the Dongcheon river station.
///
/// Defines the canonical yearly measurements the forecast models are fitted
/// on. This is the single source of truth for training data; all other
/// modules should reference observations from here rather than hardcoding
/// values.

use crate::model::{Indicator, Observation};

// ---------------------------------------------------------------------------
// Observation table
// ---------------------------------------------------------------------------

/// Yearly station observations, ordered by year ascending.
pub static OBSERVATIONS: &[Observation] = &[
    Observation { year: 2020, dissolved_oxygen: 15.4, ph: 7.9, turbidity: 0.8 },
    Observation { year: 2021, dissolved_oxygen: 13.6, ph: 8.0, turbidity: 3.6 },
    Observation { year: 2022, dissolved_oxygen: 13.9, ph: 7.2, turbidity: 1.6 },
    Observation { year: 2023, dissolved_oxygen: 12.0, ph: 7.8, turbidity: 2.0 },
    Observation { year: 2024, dissolved_oxygen: 14.0, ph: 7.8, turbidity: 1.6 },
    Observation { year: 2025, dissolved_oxygen: 12.3, ph: 7.3, turbidity: 1.2 },
];

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

/// Feature column for a regression fit: each observation's year.
pub fn years(observations: &[Observation]) -> Vec<f64> {
    observations.iter().map(|o| o.year as f64).collect()
}

/// Observed values of one indicator, in the same order as `years`.
pub fn series(observations: &[Observation], indicator: Indicator) -> Vec<f64> {
    observations.iter().map(|o| o.value(indicator)).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_observations_span_2020_to_2025() {
        assert_eq!(OBSERVATIONS.len(), 6);
        assert_eq!(years(OBSERVATIONS), vec![2020.0, 2021.0, 2022.0, 2023.0, 2024.0, 2025.0]);
    }

    #[test]
    fn test_years_are_strictly_ascending() {
        // Duplicate years would silently weight one year twice in the fit.
        for pair in OBSERVATIONS.windows(2) {
            assert!(
                pair[0].year < pair[1].year,
                "observations must be strictly ascending, got {} then {}",
                pair[0].year,
                pair[1].year
            );
        }
    }

    #[test]
    fn test_series_matches_table_columns() {
        assert_eq!(
            series(OBSERVATIONS, Indicator::DissolvedOxygen),
            vec![15.4, 13.6, 13.9, 12.0, 14.0, 12.3]
        );
        assert_eq!(series(OBSERVATIONS, Indicator::Ph)[1], 8.0);
        assert_eq!(series(OBSERVATIONS, Indicator::Turbidity).len(), OBSERVATIONS.len());
    }

    #[test]
    fn test_columns_follow_the_given_slice() {
        let recent = &OBSERVATIONS[4..];
        assert_eq!(years(recent), vec![2024.0, 2025.0]);
        assert_eq!(series(recent, Indicator::Turbidity), vec![1.6, 1.2]);
        assert!(series(&[], Indicator::Ph).is_empty());
    }

    #[test]
    fn test_values_are_physically_plausible() {
        for obs in OBSERVATIONS {
            assert!(obs.dissolved_oxygen > 0.0, "DO must be positive in {}", obs.year);
            assert!((0.0..=14.0).contains(&obs.ph), "pH out of range in {}", obs.year);
            assert!(obs.turbidity >= 0.0, "turbidity negative in {}", obs.year);
        }
    }
}
