/// Integration tests for the public forecast pipeline
///
/// These tests verify:
/// 1. The station models fit once and predict deterministically
/// 2. Grades and WQI for the default request (June 2025)
/// 3. The June trend series for 2020–2030
/// 4. Config-driven trend settings flow through to the forecast
/// 5. Rendered reports carry the same values as the forecast
///
/// No network, database or files are required.
///
/// Run with: cargo test --test forecast_integration

use approx::assert_abs_diff_eq;
use chrono::NaiveDate;

use wqi_forecast::config::{Config, TrendSettings};
use wqi_forecast::grading::classify;
use wqi_forecast::observations::OBSERVATIONS;
use wqi_forecast::report;
use wqi_forecast::scoring::{calculate_wqi, classify_wqi};
use wqi_forecast::{forecast, forecast_for_selection, ForecastDate, Grade, Indicator, Regressor};

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

fn station() -> Regressor {
    Regressor::from_station_data().expect("embedded observations fit cleanly")
}

fn june(year: i32) -> ForecastDate {
    ForecastDate::new(year, 6).expect("June is a valid month")
}

// ---------------------------------------------------------------------------
// Prediction
// ---------------------------------------------------------------------------

#[test]
fn test_default_date_from_config_reproduces_june_2025() {
    let config = Config::default();
    let selection = config.default_date().expect("built-in default date parses");
    let f = forecast_for_selection(&station(), Some(selection), &config.trend)
        .expect("a date was selected");

    assert_eq!(f.date, june(2025));
    assert_abs_diff_eq!(f.prediction.dissolved_oxygen, 12.18, epsilon = 1e-9);
    assert_abs_diff_eq!(f.prediction.ph, 7.42, epsilon = 1e-9);
    assert_abs_diff_eq!(f.prediction.turbidity, 1.5, epsilon = 1e-9);
}

#[test]
fn test_repeated_requests_are_bit_identical() {
    let r = station();
    let a = r.predict(2025, 6);
    let b = r.predict(2025, 6);
    assert_eq!(a.dissolved_oxygen.to_bits(), b.dissolved_oxygen.to_bits());
    assert_eq!(a.ph.to_bits(), b.ph.to_bits());
    assert_eq!(a.turbidity.to_bits(), b.turbidity.to_bits());

    // Refitting from scratch must not drift either.
    let c = station().predict(2025, 6);
    assert_eq!(a, c);
}

#[test]
fn test_predictions_track_fitted_lines_at_training_years() {
    let r = station();
    for obs in OBSERVATIONS {
        let p = r.predict(obs.year, 1);
        for indicator in Indicator::ALL {
            let expected = r.line(indicator).evaluate(obs.year as f64);
            assert_abs_diff_eq!(p.value(indicator), expected, epsilon = 0.005);
        }
    }
}

#[test]
fn test_all_indicators_trend_downward() {
    let r = station();
    for indicator in Indicator::ALL {
        assert!(
            r.line(indicator).slope < 0.0,
            "{} slope should be negative for the station data",
            indicator
        );
    }
}

// ---------------------------------------------------------------------------
// Grading and scoring
// ---------------------------------------------------------------------------

#[test]
fn test_june_2025_grades_and_wqi() {
    let f = forecast(&station(), june(2025), &TrendSettings::default());

    assert_eq!(f.grades.dissolved_oxygen, Grade::Good);
    assert_eq!(f.grades.ph, Grade::Good);
    assert_eq!(f.grades.turbidity, Grade::Fair);
    assert_abs_diff_eq!(f.wqi.value, 15.5, epsilon = 1e-9);
    assert_eq!(f.wqi_grade, Grade::Fair);
}

#[test]
fn test_forecast_grades_agree_with_direct_classification() {
    let r = station();
    for year in 2018..=2035 {
        for month in [1, 6, 12] {
            let date = ForecastDate::new(year, month).expect("valid month");
            let f = forecast(&r, date, &TrendSettings::default());
            assert_eq!(f.grades.ph, classify(Indicator::Ph, f.prediction.ph));
            assert_eq!(f.wqi, calculate_wqi(&f.prediction));
            assert_eq!(f.wqi_grade, classify_wqi(f.wqi.value));
        }
    }
}

#[test]
fn test_wqi_stays_within_scale_over_trend() {
    let r = station();
    for point in r.trend(2000..=2035, 6) {
        let score = calculate_wqi(&point.prediction);
        assert!(
            (0.0..=20.0).contains(&score.value),
            "WQI {} out of range in {}",
            score.value,
            point.year
        );
    }
}

// ---------------------------------------------------------------------------
// Trend series
// ---------------------------------------------------------------------------

#[test]
fn test_default_trend_is_june_2020_through_2030() {
    let f = forecast(&station(), june(2025), &TrendSettings::default());
    let years: Vec<i32> = f.trend.iter().map(|p| p.year).collect();
    assert_eq!(years, (2020..=2030).collect::<Vec<_>>());

    let expected_do = [14.5, 14.03, 13.57, 13.11, 12.65, 12.18, 11.72, 11.26, 10.79, 10.33, 9.87];
    for (point, expected) in f.trend.iter().zip(expected_do) {
        assert_abs_diff_eq!(point.prediction.dissolved_oxygen, expected, epsilon = 1e-9);
    }
}

#[test]
fn test_trend_point_for_selected_month_matches_prediction() {
    let r = station();
    let f = forecast(&r, june(2025), &TrendSettings::default());
    let point = f
        .trend
        .iter()
        .find(|p| p.year == 2025)
        .expect("2025 is inside the default trend range");
    assert_eq!(point.prediction, f.prediction);
}

#[test]
fn test_configured_trend_range_flows_through() {
    let config = Config::from_toml_str("[trend]\nstart_year = 2024\nend_year = 2026\nmonth = 12\n")
        .expect("valid config");
    let f = forecast(&station(), june(2025), &config.trend);
    assert_eq!(f.trend_month, 12);
    assert_eq!(f.trend.iter().map(|p| p.year).collect::<Vec<_>>(), vec![2024, 2025, 2026]);
}

#[test]
fn test_no_selection_renders_nothing() {
    let result = forecast_for_selection(&station(), None, &TrendSettings::default());
    assert!(result.is_none());
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

#[test]
fn test_text_and_json_reports_agree() {
    let selection = NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date");
    let f = forecast_for_selection(&station(), Some(selection), &TrendSettings::default())
        .expect("a date was selected");

    let text = report::render_text(&f);
    assert!(text.contains("15.5 → 보통"), "{}", text);

    let json = report::render_json(&f).expect("forecast serializes");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
    assert_eq!(value["prediction"]["ph"], 7.42);
    assert_eq!(value["grades"]["dissolved_oxygen"], "good");
}
