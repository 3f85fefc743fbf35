//! One forecast request, end to end.
//!
//! A request is a calendar month. It is predicted by the `Regressor`, each
//! indicator is graded, the WQI is scored and graded, and the trend series
//! is attached so a renderer has everything it needs in one value.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;

use crate::config::TrendSettings;
use crate::grading::{classify_do, classify_ph, classify_turbidity};
use crate::logging::{self, Component};
use crate::model::{Grade, Indicator, Prediction, WqiError};
use crate::regression::{Regressor, TrendPoint};
use crate::scoring::{calculate_wqi, classify_wqi, WqiScore};

// ---------------------------------------------------------------------------
// Request date
// ---------------------------------------------------------------------------

/// The month being forecast. The day of a selected date is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ForecastDate {
    pub year: i32,
    pub month: u32,
}

impl ForecastDate {
    pub fn new(year: i32, month: u32) -> Result<Self, WqiError> {
        if !(1..=12).contains(&month) {
            return Err(WqiError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self { year: date.year(), month: date.month() }
    }
}

impl fmt::Display for ForecastDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorGrades {
    pub dissolved_oxygen: Grade,
    pub ph: Grade,
    pub turbidity: Grade,
}

pub fn grade_prediction(prediction: &Prediction) -> IndicatorGrades {
    IndicatorGrades {
        dissolved_oxygen: classify_do(prediction.dissolved_oxygen),
        ph: classify_ph(prediction.ph),
        turbidity: classify_turbidity(prediction.turbidity),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub date: ForecastDate,
    pub prediction: Prediction,
    pub grades: IndicatorGrades,
    pub wqi: WqiScore,
    pub wqi_grade: Grade,
    pub trend_month: u32,
    pub trend: Vec<TrendPoint>,
}

// ---------------------------------------------------------------------------
// Composition
// ---------------------------------------------------------------------------

pub fn forecast(regressor: &Regressor, date: ForecastDate, trend: &TrendSettings) -> Forecast {
    let context = date.to_string();

    let prediction = regressor.predict(date.year, date.month);
    logging::debug(
        Component::Regressor,
        Some(&context),
        &format!(
            "DO={} pH={} turbidity={}",
            prediction.dissolved_oxygen, prediction.ph, prediction.turbidity
        ),
    );

    for indicator in Indicator::ALL {
        let value = prediction.value(indicator);
        if value < 0.0 {
            logging::warn(
                Component::Regressor,
                Some(&context),
                &format!("extrapolated {} is negative ({})", indicator, value),
            );
        }
    }

    let grades = grade_prediction(&prediction);
    logging::debug(
        Component::Classifier,
        Some(&context),
        &format!("{:?} / {:?} / {:?}", grades.dissolved_oxygen, grades.ph, grades.turbidity),
    );

    let wqi = calculate_wqi(&prediction);
    let wqi_grade = classify_wqi(wqi.value);
    logging::debug(
        Component::Scorer,
        Some(&context),
        &format!("WQI {} ({:?})", wqi.value, wqi_grade),
    );

    Forecast {
        date,
        prediction,
        grades,
        wqi,
        wqi_grade,
        trend_month: trend.month,
        trend: regressor.trend(trend.years(), trend.month),
    }
}

/// Forecast for an optional date selection; no selection means nothing to
/// render, not an error.
pub fn forecast_for_selection(
    regressor: &Regressor,
    selection: Option<NaiveDate>,
    trend: &TrendSettings,
) -> Option<Forecast> {
    match selection {
        Some(date) => Some(forecast(regressor, ForecastDate::from_date(date), trend)),
        None => {
            logging::debug(Component::System, None, "no date selected, skipping forecast");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn station() -> Regressor {
        Regressor::from_station_data().expect("embedded data is non-degenerate")
    }

    #[test]
    fn test_forecast_date_rejects_month_zero_and_thirteen() {
        assert_eq!(ForecastDate::new(2025, 0), Err(WqiError::InvalidMonth(0)));
        assert_eq!(ForecastDate::new(2025, 13), Err(WqiError::InvalidMonth(13)));
        assert!(ForecastDate::new(2025, 12).is_ok());
    }

    #[test]
    fn test_forecast_date_ignores_day() {
        let a = NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date");
        let b = NaiveDate::from_ymd_opt(2026, 3, 31).expect("valid date");
        assert_eq!(ForecastDate::from_date(a), ForecastDate::from_date(b));
    }

    #[test]
    fn test_forecast_date_display() {
        assert_eq!(ForecastDate { year: 2025, month: 6 }.to_string(), "2025-06");
    }

    #[test]
    fn test_default_request_forecast() {
        let date = ForecastDate::new(2025, 6).expect("valid month");
        let f = forecast(&station(), date, &TrendSettings::default());

        assert_abs_diff_eq!(f.prediction.dissolved_oxygen, 12.18, epsilon = 1e-9);
        assert_eq!(f.grades.dissolved_oxygen, Grade::Good);
        assert_eq!(f.grades.ph, Grade::Good);
        assert_eq!(f.grades.turbidity, Grade::Fair);
        assert_abs_diff_eq!(f.wqi.value, 15.5, epsilon = 1e-9);
        assert_eq!(f.wqi_grade, Grade::Fair);
        assert_eq!(f.trend.len(), 11);
        assert_eq!(f.trend_month, 6);
    }

    #[test]
    fn test_no_selection_skips_forecast() {
        assert!(forecast_for_selection(&station(), None, &TrendSettings::default()).is_none());
    }

    #[test]
    fn test_selection_is_forecast() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date");
        let f = forecast_for_selection(&station(), Some(date), &TrendSettings::default())
            .expect("date selected");
        assert_eq!(f.date, ForecastDate { year: 2025, month: 6 });
    }

    #[test]
    fn test_forecast_is_repeatable() {
        let r = station();
        let date = ForecastDate::new(2029, 11).expect("valid month");
        let trend = TrendSettings::default();
        assert_eq!(forecast(&r, date, &trend), forecast(&r, date, &trend));
    }
}
