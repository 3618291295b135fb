// Luc Léger step ("palier") values
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_STEP: u8 = 7;
pub const MAX_STEP: u8 = 15;

/// Input granularity of the step field for a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StepPrecision {
    /// Whole steps only (7, 8, 9 …)
    #[default]
    Whole,
    /// Half steps allowed (7, 7.5, 8 …)
    Half,
}

/// A step result as entered by the coach, stored in half-step units.
///
/// Values above the table range are kept, snapped to the precision grid;
/// negative input is stored as zero. Clamping to 7..=15 happens at lookup time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "f64", from = "f64")]
pub struct Step {
    halves: u16,
}

impl Step {
    pub fn whole(step: u8) -> Self {
        Self { halves: step as u16 * 2 }
    }

    /// Snap a numeric input down onto the precision grid. Negative and
    /// non-finite inputs become zero; lookup clamps them afterwards.
    pub fn from_value(value: f64, precision: StepPrecision) -> Self {
        if !value.is_finite() || value <= 0.0 {
            return Self { halves: 0 };
        }
        let value = value.min(u16::MAX as f64 / 2.0);
        let halves = match precision {
            StepPrecision::Whole => value.floor() as u16 * 2,
            StepPrecision::Half => (value * 2.0).floor() as u16,
        };
        Self { halves }
    }

    pub fn value(&self) -> f64 {
        self.halves as f64 / 2.0
    }

    pub fn is_half(&self) -> bool {
        self.halves % 2 == 1
    }

    /// Completed whole step, clamped into the table's step range.
    /// A half step counts as the whole step below it.
    pub fn lookup_step(&self) -> u8 {
        let whole = (self.halves / 2).min(u8::MAX as u16) as u8;
        whole.clamp(MIN_STEP, MAX_STEP)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_half() {
            write!(f, "{}.5", self.halves / 2)
        } else {
            write!(f, "{}", self.halves / 2)
        }
    }
}

impl From<Step> for f64 {
    fn from(step: Step) -> Self {
        step.value()
    }
}

impl From<f64> for Step {
    fn from(value: f64) -> Self {
        Step::from_value(value, StepPrecision::Half)
    }
}
