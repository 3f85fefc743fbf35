//! Indicator grading.
//!
//! Submodules:
//! - `thresholds`: band tables mapping an indicator value to a `Grade`.

pub mod thresholds;

pub use thresholds::{classify, classify_do, classify_ph, classify_turbidity};
