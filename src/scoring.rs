//! Composite Water Quality Index (WQI).
//!
//! Every indicator is mapped onto a common 0–20 sub-score and the three are
//! combined with fixed weights:
//!
//!   WQI = 0.4 × DO + 0.3 × pH + 0.3 × turbidity
//!
//! The pH sub-score reads the same band table the classifier uses, so the
//! two can never disagree about where a pH value falls.

use serde::Serialize;
use std::ops::Bound::{Excluded, Included, Unbounded};

use crate::grading::thresholds::{band, grade_in, Band, PH_BANDS};
use crate::model::{Grade, Prediction};
use crate::regression::round_to;

/// Top of every sub-score scale.
pub const MAX_SUBSCORE: f64 = 20.0;

/// DO concentration (mg/L) that earns the full sub-score.
pub const DO_SATURATION_MG_L: f64 = 15.0;

/// Sub-score lost per NTU of turbidity.
pub const TURBIDITY_PENALTY_PER_NTU: f64 = 6.6;

pub const WEIGHT_DO: f64 = 0.4;
pub const WEIGHT_PH: f64 = 0.3;
pub const WEIGHT_TURBIDITY: f64 = 0.3;

/// Decimal places kept on the composite index.
pub const WQI_DECIMALS: i32 = 1;

// ---------------------------------------------------------------------------
// Sub-scores
// ---------------------------------------------------------------------------

/// Linear up to saturation, capped at `MAX_SUBSCORE`.
pub fn do_subscore(dissolved_oxygen: f64) -> f64 {
    (dissolved_oxygen / DO_SATURATION_MG_L * MAX_SUBSCORE).min(MAX_SUBSCORE)
}

/// Coarse step score from the pH grade: 20 / 15 / 10 / 5.
pub fn ph_subscore(ph: f64) -> f64 {
    match grade_in(PH_BANDS, ph) {
        Grade::Good => 20.0,
        Grade::Fair => 15.0,
        Grade::SlightlyPoor => 10.0,
        Grade::Poor => 5.0,
    }
}

/// Linear decay reaching zero near 3.03 NTU, floored at zero.
pub fn turbidity_subscore(turbidity: f64) -> f64 {
    (MAX_SUBSCORE - turbidity * TURBIDITY_PENALTY_PER_NTU).max(0.0)
}

// ---------------------------------------------------------------------------
// Composite index
// ---------------------------------------------------------------------------

/// Sub-scores and the weighted index derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WqiScore {
    pub do_subscore: f64,
    pub ph_subscore: f64,
    pub turbidity_subscore: f64,
    pub value: f64,
}

/// Weighted sum of the three sub-scores, rounded to one decimal.
pub fn wqi_from_subscores(do_sub: f64, ph_sub: f64, turbidity_sub: f64) -> f64 {
    round_to(
        do_sub * WEIGHT_DO + ph_sub * WEIGHT_PH + turbidity_sub * WEIGHT_TURBIDITY,
        WQI_DECIMALS,
    )
}

pub fn calculate_wqi(prediction: &Prediction) -> WqiScore {
    let do_sub = do_subscore(prediction.dissolved_oxygen);
    let ph_sub = ph_subscore(prediction.ph);
    let turbidity_sub = turbidity_subscore(prediction.turbidity);
    WqiScore {
        do_subscore: do_sub,
        ph_subscore: ph_sub,
        turbidity_subscore: turbidity_sub,
        value: wqi_from_subscores(do_sub, ph_sub, turbidity_sub),
    }
}

/// Index grade bands: ≥17 good, [13,17) fair, [10,13) caution, below 10 poor.
///
/// Caution is carried as `Grade::SlightlyPoor`; see `Grade::index_label`.
pub static WQI_BANDS: &[Band] = &[
    band(Included(17.0), Unbounded, Grade::Good),
    band(Included(13.0), Excluded(17.0), Grade::Fair),
    band(Included(10.0), Excluded(13.0), Grade::SlightlyPoor),
];

pub fn classify_wqi(wqi: f64) -> Grade {
    grade_in(WQI_BANDS, wqi)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
