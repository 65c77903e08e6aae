//! Cardiovascular risk scoring.
//!
//! Pure functions from the two selected lifestyle factor bands to percentage
//! risk scores, plus the grid presentation transform the risk widget uses.
//! No state, no I/O.

use serde::{Deserialize, Serialize};

/// One selectable band of a lifestyle risk factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskFactorOption {
    pub label: &'static str,
    /// Risk percentage contribution.
    pub value: u32,
}

const fn option(label: &'static str, value: u32) -> RiskFactorOption {
    RiskFactorOption { label, value }
}

/// Cigarettes-per-day bands.
pub const SMOKING_OPTIONS: [RiskFactorOption; 8] = [
    option("0!", 0),
    option("0-1", 2),
    option("1-2", 3),
    option("2-3", 4),
    option("3-5", 6),
    option("5-10", 8),
    option("10-20", 10),
    option("> 20", 12),
];

/// Daily-exercise bands.
pub const ACTIVITY_OPTIONS: [RiskFactorOption; 5] = [
    option("> 60 minutes", 0),
    option("30-60 minutes", 3),
    option("10-30 minutes", 6),
    option("0-10 minutes", 8),
    option("None", 10),
];

/// Default selection: no cigarettes.
pub fn default_smoking() -> RiskFactorOption {
    SMOKING_OPTIONS[0]
}

/// Default selection: the middle exercise band (10-30 minutes).
pub fn default_activity() -> RiskFactorOption {
    ACTIVITY_OPTIONS[2]
}

/// Computed risk percentages, each clamped to 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskProfile {
    pub total: u32,
    pub heart_attack: u32,
    pub angina: u32,
    pub ischemic_heart: u32,
    pub atrial_fibrillation: u32,
}

const TOTAL_BASE: u32 = 10;
const HEART_ATTACK_BASE: u32 = 15;
const ANGINA_BASE: u32 = 10;
const ISCHEMIC_HEART_BASE: u32 = 25;
const ATRIAL_FIBRILLATION_BASE: u32 = 10;

fn condition_score(
    base: u32,
    smoking: &RiskFactorOption,
    smoking_multiplier: u32,
    activity: &RiskFactorOption,
    activity_multiplier: u32,
) -> u32 {
    (base + smoking.value * smoking_multiplier + activity.value * activity_multiplier).min(100)
}

impl RiskProfile {
    /// Score every condition from the two selected factor bands.
    pub fn compute(smoking: &RiskFactorOption, activity: &RiskFactorOption) -> Self {
        Self {
            total: condition_score(TOTAL_BASE, smoking, 1, activity, 1),
            heart_attack: condition_score(HEART_ATTACK_BASE, smoking, 3, activity, 2),
            angina: condition_score(ANGINA_BASE, smoking, 2, activity, 1),
            ischemic_heart: condition_score(ISCHEMIC_HEART_BASE, smoking, 1, activity, 3),
            atrial_fibrillation: condition_score(ATRIAL_FIBRILLATION_BASE, smoking, 2, activity, 2),
        }
    }
}

/// Cells in the 6x6 mood grid.
pub const GRID_CELLS: u32 = 36;

/// Filled (frowning) cells for a risk percentage.
///
/// Truncating division, not rounding: a 97% risk still leaves one smiling
/// cell.
pub fn filled_cells(risk: u32) -> u32 {
    GRID_CELLS * risk.min(100) / 100
}

/// Static monthly series shown on the risk trend chart. Illustrative data,
/// not computed history.
pub const MONTHLY_RISK_SAMPLES: [(&str, u32); 3] = [("March", 75), ("April", 65), ("May", 58)];
