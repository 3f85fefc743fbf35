//! Report rendering: the forecast page as terminal text or JSON.

use std::fmt::Write;
use std::io;

use crate::forecast::Forecast;
use crate::model::{Indicator, WqiError};
use crate::observations::OBSERVATIONS;
use crate::regression::{Regressor, TrendPoint};

pub const TITLE: &str = "🌊 순천 동천 수질 예측 시스템";
pub const SUBTITLE: &str = "날짜를 선택하면 예측 수질과 상태, 그래프, 종합 점수를 보여줍니다.";

const RULE: &str = "═══════════════════════════════════════════════════════════";
const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Output encoding selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

fn value_with_unit(value: f64, indicator: Indicator) -> String {
    match indicator.unit() {
        "" => format!("{}", value),
        unit => format!("{} {}", value, unit),
    }
}

/// Full forecast page: predicted values, grades, WQI, then the trend.
pub fn render_text(forecast: &Forecast) -> String {
    let mut out = String::new();
    let p = &forecast.prediction;
    let g = &forecast.grades;

    let _ = writeln!(out, "{}", TITLE);
    let _ = writeln!(out, "{}", SUBTITLE);
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(
        out,
        "📊 {}년 {}월 수질 예측 결과:",
        forecast.date.year, forecast.date.month
    );
    for (indicator, grade) in [
        (Indicator::DissolvedOxygen, g.dissolved_oxygen),
        (Indicator::Ph, g.ph),
        (Indicator::Turbidity, g.turbidity),
    ] {
        let _ = writeln!(
            out,
            "- {}: {} → {}",
            indicator.display_name(),
            value_with_unit(p.value(indicator), indicator),
            grade
        );
    }
    let _ = writeln!(
        out,
        "🧮 종합 수질 점수 (WQI): {} → {} {}",
        forecast.wqi.value,
        forecast.wqi_grade.index_label(),
        forecast.wqi_grade.emoji()
    );
    let _ = writeln!(out);
    out.push_str(&render_trend_text(&forecast.trend, forecast.trend_month));
    out
}

/// Trend table plus one sparkline per indicator.
pub fn render_trend_text(points: &[TrendPoint], month: u32) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "📈 연도별 수질 예측 그래프 ({}월 기준)", month);
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(
        out,
        "{:>6} {:>12} {:>8} {:>10}",
        "Year", "DO (mg/L)", "pH", "탁도 (NTU)"
    );
    for point in points {
        let p = &point.prediction;
        let _ = writeln!(
            out,
            "{:>6} {:>12.2} {:>8.2} {:>10.2}",
            point.year, p.dissolved_oxygen, p.ph, p.turbidity
        );
    }
    let _ = writeln!(out, "{}", RULE);
    for indicator in Indicator::ALL {
        let values: Vec<f64> = points.iter().map(|pt| pt.prediction.value(indicator)).collect();
        let _ = writeln!(out, "{:<16} {}", indicator.display_name(), sparkline(&values));
    }
    out
}

/// Renders values as block characters scaled between their min and max.
pub fn sparkline(values: &[f64]) -> String {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    let top = SPARK_LEVELS.len() - 1;

    values
        .iter()
        .map(|&v| {
            if !span.is_finite() || span == 0.0 {
                SPARK_LEVELS[top / 2]
            } else {
                let level = ((v - min) / span * top as f64).round() as usize;
                SPARK_LEVELS[level.min(top)]
            }
        })
        .collect()
}

/// Station observations alongside the fitted trend lines.
pub fn render_observations(regressor: &Regressor) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", TITLE);
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(
        out,
        "{:>6} {:>12} {:>8} {:>10}",
        "Year", "DO (mg/L)", "pH", "탁도 (NTU)"
    );
    for obs in OBSERVATIONS {
        let _ = writeln!(
            out,
            "{:>6} {:>12.1} {:>8.1} {:>10.1}",
            obs.year, obs.dissolved_oxygen, obs.ph, obs.turbidity
        );
    }
    let _ = writeln!(out, "{}", RULE);
    for indicator in Indicator::ALL {
        let line = regressor.line(indicator);
        let _ = writeln!(
            out,
            "{:<16} slope {:+.4}/yr  intercept {:.4}",
            indicator.display_name(),
            line.slope,
            line.intercept
        );
    }
    out
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

pub fn render_json(forecast: &Forecast) -> Result<String, WqiError> {
    serde_json::to_string_pretty(forecast).map_err(|e| WqiError::Io(e.to_string()))
}

pub fn render_trend_json(points: &[TrendPoint]) -> Result<String, WqiError> {
    serde_json::to_string_pretty(points).map_err(|e| WqiError::Io(e.to_string()))
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Writes a rendered report followed by a newline.
///
/// A reader that closes the pipe early (`wqi predict | head`) is not a
/// failure: the write stops quietly.
pub fn write_output<W: io::Write>(out: &mut W, rendered: &str) -> Result<(), WqiError> {
    let result = out
        .write_all(rendered.as_bytes())
        .and_then(|_| out.write_all(b"\n"))
        .and_then(|_| out.flush());
    match result {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        Err(e) => Err(WqiError::Io(format!("writing report: {}", e))),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
