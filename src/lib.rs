//! Water-quality forecast for the Dongcheon river.
//!
//! Predicts dissolved oxygen, pH and turbidity for a calendar month from
//! per-indicator linear trends, grades each indicator, and combines them
//! into a weighted Water Quality Index.

pub mod config;
pub mod forecast;
pub mod grading;
pub mod logging;
pub mod model;
pub mod observations;
pub mod regression;
pub mod report;
pub mod scoring;

pub use forecast::{forecast, forecast_for_selection, Forecast, ForecastDate};
pub use model::{Grade, Indicator, Observation, Prediction, WqiError};
pub use regression::Regressor;
