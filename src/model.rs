/// Observation, Prediction, Indicator, Grade, WqiError
/// core data structures and error handling
///
/// Core data types for the Dongcheon water-quality forecast.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no logic beyond labels and formatting.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Units
// ---------------------------------------------------------------------------

/// Dissolved oxygen concentration unit.
pub const UNIT_DO: &str = "mg/L";

/// Turbidity unit (nephelometric turbidity units).
pub const UNIT_TURBIDITY: &str = "NTU";

// ---------------------------------------------------------------------------
// Indicators
// ---------------------------------------------------------------------------

/// The three water-quality indicators tracked by the forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    DissolvedOxygen,
    Ph,
    Turbidity,
}

impl Indicator {
    pub const ALL: [Indicator; 3] = [
        Indicator::DissolvedOxygen,
        Indicator::Ph,
        Indicator::Turbidity,
    ];

    /// Display name used in reports (Korean, as shown on the station page).
    pub fn display_name(self) -> &'static str {
        match self {
            Indicator::DissolvedOxygen => "용존 산소 (DO)",
            Indicator::Ph => "pH",
            Indicator::Turbidity => "탁도",
        }
    }

    /// Measurement unit; pH is dimensionless.
    pub fn unit(self) -> &'static str {
        match self {
            Indicator::DissolvedOxygen => UNIT_DO,
            Indicator::Ph => "",
            Indicator::Turbidity => UNIT_TURBIDITY,
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Indicator::DissolvedOxygen => write!(f, "DO"),
            Indicator::Ph => write!(f, "pH"),
            Indicator::Turbidity => write!(f, "turbidity"),
        }
    }
}

// ---------------------------------------------------------------------------
// Observation / prediction types
// ---------------------------------------------------------------------------

/// One yearly measurement of all three indicators at the river station.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observation {
    pub year: i32,
    pub dissolved_oxygen: f64, // mg/L
    pub ph: f64,
    pub turbidity: f64,        // NTU
}

impl Observation {
    pub fn value(&self, indicator: Indicator) -> f64 {
        match indicator {
            Indicator::DissolvedOxygen => self.dissolved_oxygen,
            Indicator::Ph => self.ph,
            Indicator::Turbidity => self.turbidity,
        }
    }
}

/// Predicted indicator values for one (year, month), each rounded to 2 dp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub dissolved_oxygen: f64,
    pub ph: f64,
    pub turbidity: f64,
}

impl Prediction {
    pub fn value(&self, indicator: Indicator) -> f64 {
        match indicator {
            Indicator::DissolvedOxygen => self.dissolved_oxygen,
            Indicator::Ph => self.ph,
            Indicator::Turbidity => self.turbidity,
        }
    }
}

// ---------------------------------------------------------------------------
// Grades
// ---------------------------------------------------------------------------

/// Qualitative grades, in descending order of quality.
///
/// The same four ordinal grades are used per indicator and for the composite
/// index; only the labels differ (see `indicator_label` / `index_label`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    Good,
    Fair,
    SlightlyPoor,
    Poor,
}

impl Grade {
    pub fn emoji(self) -> &'static str {
        match self {
            Grade::Good => "💧",
            Grade::Fair => "🙂",
            Grade::SlightlyPoor => "😕",
            Grade::Poor => "🚫",
        }
    }

    /// Label for an individual indicator grade.
    pub fn indicator_label(self) -> &'static str {
        match self {
            Grade::Good => "좋음",
            Grade::Fair => "괜찮음",
            Grade::SlightlyPoor => "살짝 나쁨",
            Grade::Poor => "나쁨",
        }
    }

    /// Label for the composite WQI grade (Good / Fair / Caution / Poor).
    pub fn index_label(self) -> &'static str {
        match self {
            Grade::Good => "좋음",
            Grade::Fair => "보통",
            Grade::SlightlyPoor => "주의",
            Grade::Poor => "나쁨",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.indicator_label(), self.emoji())
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when fitting models, parsing input or loading config.
#[derive(Debug, PartialEq)]
pub enum WqiError {
    /// Regression inputs cannot define a unique line.
    DegenerateFit(String),
    /// Month outside 1..=12.
    InvalidMonth(u32),
    /// A date string could not be parsed as YYYY-MM-DD.
    InvalidDate(String),
    /// The configuration file is malformed or inconsistent.
    Config(String),
    /// Reading the configuration file failed.
    Io(String),
}

impl fmt::Display for WqiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WqiError::DegenerateFit(msg) => write!(f, "Degenerate fit: {}", msg),
            WqiError::InvalidMonth(m) => write!(f, "Invalid month: {} (expected 1-12)", m),
            WqiError::InvalidDate(s) => write!(f, "Invalid date '{}' (expected YYYY-MM-DD)", s),
            WqiError::Config(msg) => write!(f, "Config error: {}", msg),
            WqiError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for WqiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grades_are_ordered_best_to_worst() {
        assert!(Grade::Good < Grade::Fair);
        assert!(Grade::Fair < Grade::SlightlyPoor);
        assert!(Grade::SlightlyPoor < Grade::Poor);
    }

    #[test]
    fn test_index_labels_differ_from_indicator_labels_in_middle_grades() {
        assert_eq!(Grade::Good.index_label(), Grade::Good.indicator_label());
        assert_eq!(Grade::Fair.index_label(), "보통");
        assert_eq!(Grade::SlightlyPoor.index_label(), "주의");
        assert_eq!(Grade::Poor.index_label(), Grade::Poor.indicator_label());
    }

    #[test]
    fn test_grade_display_includes_emoji() {
        assert_eq!(Grade::Good.to_string(), "좋음 💧");
        assert_eq!(Grade::Poor.to_string(), "나쁨 🚫");
    }

    #[test]
    fn test_error_display_messages() {
        assert_eq!(
            WqiError::InvalidMonth(13).to_string(),
            "Invalid month: 13 (expected 1-12)"
        );
        assert!(WqiError::InvalidDate("x".into()).to_string().contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_indicator_units() {
        assert_eq!(Indicator::DissolvedOxygen.unit(), "mg/L");
        assert_eq!(Indicator::Ph.unit(), "");
        assert_eq!(Indicator::Turbidity.unit(), "NTU");
    }
}
