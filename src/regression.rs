//! Per-indicator linear trend models.
//!
//! Each indicator gets its own ordinary-least-squares line over the yearly
//! observations. The fitted `Regressor` is an immutable value: build it once
//! at startup and pass it by reference to everything that predicts.
//!
//! # Feature encoding
//! Observations carry no sub-year granularity, so training uses the integer
//! year. Predictions use a fractional year, `year + (month - 1) / 12`, which
//! places January at the whole year and December eleven twelfths later.

use serde::Serialize;

use crate::logging::{self, Component};
use crate::model::{Indicator, Observation, Prediction, WqiError};
use crate::observations;

/// Decimal places kept on predicted indicator values.
pub const PREDICTION_DECIMALS: i32 = 2;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fractional-year feature for a calendar month.
pub fn fractional_year(year: i32, month: u32) -> f64 {
    year as f64 + (month as f64 - 1.0) / 12.0
}

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

// ---------------------------------------------------------------------------
// Single line
// ---------------------------------------------------------------------------

/// A fitted line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Ordinary least squares over paired samples.
    ///
    /// Fails when the samples cannot determine a unique line: mismatched
    /// lengths, fewer than two points, or every x identical.
    pub fn fit(xs: &[f64], ys: &[f64]) -> Result<Self, WqiError> {
        if xs.len() != ys.len() {
            return Err(WqiError::DegenerateFit(format!(
                "{} x values but {} y values",
                xs.len(),
                ys.len()
            )));
        }
        if xs.len() < 2 {
            return Err(WqiError::DegenerateFit(format!(
                "need at least 2 samples, got {}",
                xs.len()
            )));
        }

        let n = xs.len() as f64;
        let x_mean = xs.iter().sum::<f64>() / n;
        let y_mean = ys.iter().sum::<f64>() / n;

        let (sxy, sxx) = xs
            .iter()
            .zip(ys)
            .fold((0.0, 0.0), |(sxy, sxx), (&x, &y)| {
                let dx = x - x_mean;
                (sxy + dx * (y - y_mean), sxx + dx * dx)
            });

        if sxx == 0.0 {
            return Err(WqiError::DegenerateFit(
                "all x values are identical".to_string(),
            ));
        }

        let slope = sxy / sxx;
        Ok(LinearFit {
            slope,
            intercept: y_mean - slope * x_mean,
        })
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

// ---------------------------------------------------------------------------
// Three-indicator regressor
// ---------------------------------------------------------------------------

/// One trend line per indicator. No coefficients are shared.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Regressor {
    pub dissolved_oxygen: LinearFit,
    pub ph: LinearFit,
    pub turbidity: LinearFit,
}

/// One point of a multi-year trend series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    pub year: i32,
    pub prediction: Prediction,
}

impl Regressor {
    /// Fits the three lines against the given observations.
    pub fn fit(observations: &[Observation]) -> Result<Self, WqiError> {
        let xs = observations::years(observations);
        let fit = |indicator| LinearFit::fit(&xs, &observations::series(observations, indicator));

        let regressor = Regressor {
            dissolved_oxygen: fit(Indicator::DissolvedOxygen)?,
            ph: fit(Indicator::Ph)?,
            turbidity: fit(Indicator::Turbidity)?,
        };

        for indicator in Indicator::ALL {
            let line = regressor.line(indicator);
            logging::debug(
                Component::Regressor,
                Some(&indicator.to_string()),
                &format!(
                    "fitted on {} observations: slope={:.6} intercept={:.6}",
                    observations.len(),
                    line.slope,
                    line.intercept
                ),
            );
        }

        Ok(regressor)
    }

    /// Fits against the embedded station table.
    pub fn from_station_data() -> Result<Self, WqiError> {
        Self::fit(observations::OBSERVATIONS)
    }

    pub fn line(&self, indicator: Indicator) -> &LinearFit {
        match indicator {
            Indicator::DissolvedOxygen => &self.dissolved_oxygen,
            Indicator::Ph => &self.ph,
            Indicator::Turbidity => &self.turbidity,
        }
    }

    /// Predicts all three indicators for a calendar month.
    ///
    /// No bounds checking: months far outside the training years are
    /// linearly extrapolated, even to physically implausible values.
    pub fn predict(&self, year: i32, month: u32) -> Prediction {
        let x = fractional_year(year, month);
        Prediction {
            dissolved_oxygen: round_to(self.dissolved_oxygen.evaluate(x), PREDICTION_DECIMALS),
            ph: round_to(self.ph.evaluate(x), PREDICTION_DECIMALS),
            turbidity: round_to(self.turbidity.evaluate(x), PREDICTION_DECIMALS),
        }
    }

    /// Predictions for the same month across an inclusive range of years.
    pub fn trend(&self, years: std::ops::RangeInclusive<i32>, month: u32) -> Vec<TrendPoint> {
        years
            .map(|year| TrendPoint {
                year,
                prediction: self.predict(year, month),
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
