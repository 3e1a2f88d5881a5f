//! Ground-truth irrigation rule
//!
//! Branches are evaluated top to bottom and the first match wins. The soil
//! sensor's polarity is not documented; thresholds are kept exactly as
//! calibrated and must not be reinterpreted.

use crate::reading::{Action, SensorReading};

/// Soil reading below which the pump is always triggered.
pub const SOIL_CRITICAL: f64 = 350.0;
/// Temperature above which the hot-weather branch applies.
pub const HOT_TEMP: f64 = 30.0;
/// Soil reading bound for the hot-weather branch.
pub const SOIL_HOT: f64 = 450.0;
/// Humidity below which the dry-air branch applies.
pub const DRY_HUM: f64 = 50.0;
/// Soil reading bound for the dry-air branch.
pub const SOIL_DRY_AIR: f64 = 550.0;

/// The rule branch that decided a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleBranch {
    /// `soil < 350`
    SoilCritical,
    /// `temp > 30 && soil < 450`
    HotWeather,
    /// `hum < 50 && soil < 550`
    DryAir,
    /// No branch matched
    Idle,
}

impl RuleBranch {
    pub const fn action(self) -> Action {
        match self {
            Self::SoilCritical | Self::HotWeather | Self::DryAir => Action::On,
            Self::Idle => Action::Off,
        }
    }
}

/// Find the first branch matching a reading.
pub fn matched_branch(reading: &SensorReading) -> RuleBranch {
    if reading.soil < SOIL_CRITICAL {
        RuleBranch::SoilCritical
    } else if reading.temp > HOT_TEMP && reading.soil < SOIL_HOT {
        RuleBranch::HotWeather
    } else if reading.hum < DRY_HUM && reading.soil < SOIL_DRY_AIR {
        RuleBranch::DryAir
    } else {
        RuleBranch::Idle
    }
}

/// Assign the ground-truth pump action for a reading.
pub fn label_reading(reading: &SensorReading) -> Action {
    matched_branch(reading).action()
}
