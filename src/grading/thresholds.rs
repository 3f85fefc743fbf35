//! Water-quality grade thresholds.
//!
//! Each indicator is graded by an ordered list of bands; the first band
//! containing the value wins, and a value matched by no band is `Poor`.
//! Band edges carry their own inclusivity so boundary behaviour can be read
//! straight off the tables:
//!
//! | indicator | Good        | Fair                      | Slightly poor             |
//! |-----------|-------------|---------------------------|---------------------------|
//! | DO        | ≥ 8.0       | [6.5, 8.0)                | [5.0, 6.5)                |
//! | pH        | [6.5, 8.5]  | [6.0, 6.5) ∪ (8.5, 9.0]   | [5.5, 6.0) ∪ (9.0, 9.5]   |
//! | turbidity | ≤ 1.0       | (1.0, 2.0]                | (2.0, 3.0]                |

use std::ops::Bound::{self, Excluded, Included, Unbounded};

use crate::model::{Grade, Indicator};

/// A half-open, closed or unbounded value range assigned to one grade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub low: Bound<f64>,
    pub high: Bound<f64>,
    pub grade: Grade,
}

impl Band {
    pub fn contains(&self, value: f64) -> bool {
        let above_low = match self.low {
            Unbounded => true,
            Included(l) => value >= l,
            Excluded(l) => value > l,
        };
        let below_high = match self.high {
            Unbounded => true,
            Included(h) => value <= h,
            Excluded(h) => value < h,
        };
        above_low && below_high
    }
}

pub const fn band(low: Bound<f64>, high: Bound<f64>, grade: Grade) -> Band {
    Band { low, high, grade }
}

// ---------------------------------------------------------------------------
// Band tables
// ---------------------------------------------------------------------------

/// Dissolved oxygen, mg/L. Higher is better; edges belong to the better grade.
pub static DO_BANDS: &[Band] = &[
    band(Included(8.0), Unbounded, Grade::Good),
    band(Included(6.5), Excluded(8.0), Grade::Fair),
    band(Included(5.0), Excluded(6.5), Grade::SlightlyPoor),
];

/// pH. Neutral is best; quality falls off symmetrically on either side.
pub static PH_BANDS: &[Band] = &[
    band(Included(6.5), Included(8.5), Grade::Good),
    band(Included(6.0), Excluded(6.5), Grade::Fair),
    band(Excluded(8.5), Included(9.0), Grade::Fair),
    band(Included(5.5), Excluded(6.0), Grade::SlightlyPoor),
    band(Excluded(9.0), Included(9.5), Grade::SlightlyPoor),
];

/// Turbidity, NTU. Lower is better; edges belong to the lower-turbidity grade.
pub static TURBIDITY_BANDS: &[Band] = &[
    band(Unbounded, Included(1.0), Grade::Good),
    band(Excluded(1.0), Included(2.0), Grade::Fair),
    band(Excluded(2.0), Included(3.0), Grade::SlightlyPoor),
];

/// Returns the grade of the first band containing `value`, or `Poor`.
pub fn grade_in(bands: &[Band], value: f64) -> Grade {
    bands
        .iter()
        .find(|b| b.contains(value))
        .map(|b| b.grade)
        .unwrap_or(Grade::Poor)
}

pub fn bands_for(indicator: Indicator) -> &'static [Band] {
    match indicator {
        Indicator::DissolvedOxygen => DO_BANDS,
        Indicator::Ph => PH_BANDS,
        Indicator::Turbidity => TURBIDITY_BANDS,
    }
}

pub fn classify(indicator: Indicator, value: f64) -> Grade {
    grade_in(bands_for(indicator), value)
}

pub fn classify_do(dissolved_oxygen: f64) -> Grade {
    grade_in(DO_BANDS, dissolved_oxygen)
}

pub fn classify_ph(ph: f64) -> Grade {
    grade_in(PH_BANDS, ph)
}

pub fn classify_turbidity(turbidity: f64) -> Grade {
    grade_in(TURBIDITY_BANDS, turbidity)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
