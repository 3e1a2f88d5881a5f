//! Sensor readings, pump actions and labeled samples
//!
//! A [`SensorReading`] is one instantaneous measurement. Values pass through
//! unchecked: the sensors define no valid range. Before a reading reaches a
//! policy it is converted into a [`FeatureRow`], which binds each value to
//! its feature name so that column order can never silently change a
//! prediction.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Feature name for air temperature (°C).
pub const TEMP: &str = "temp";
/// Feature name for relative humidity (%).
pub const HUM: &str = "hum";
/// Feature name for the raw soil moisture reading.
pub const SOIL: &str = "soil";

/// Canonical feature names in dataset column order.
pub const FEATURE_NAMES: [&str; 3] = [TEMP, HUM, SOIL];

/// Header of the label column in a labeled dataset.
pub const ACTION_COLUMN: &str = "Pump_Action";

/// One instantaneous (temp, hum, soil) measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Air temperature in °C
    pub temp: f64,
    /// Relative humidity in %
    pub hum: f64,
    /// Raw soil moisture sensor value
    pub soil: f64,
}

impl SensorReading {
    pub const fn new(temp: f64, hum: f64, soil: f64) -> Self {
        Self { temp, hum, soil }
    }

    /// `false` if any value is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.temp.is_finite() && self.hum.is_finite() && self.soil.is_finite()
    }

    /// Bind the reading's values to their feature names.
    pub fn to_features(&self) -> FeatureRow {
        FeatureRow::new()
            .with(TEMP, self.temp)
            .with(HUM, self.hum)
            .with(SOIL, self.soil)
    }
}

impl fmt::Display for SensorReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "temp={}, hum={}, soil={}", self.temp, self.hum, self.soil)
    }
}

/// Binary pump action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Action {
    /// Leave the pump off. Also the fail-safe default.
    #[default]
    Off,
    /// Activate the irrigation pump.
    On,
}

impl Action {
    /// Class index used by the classifier (0 = off, 1 = on).
    pub const fn class(self) -> usize {
        match self {
            Self::Off => 0,
            Self::On => 1,
        }
    }

    /// Map a classifier class index back to an action.
    pub const fn from_class(class: usize) -> Self {
        if class == 0 {
            Self::Off
        } else {
            Self::On
        }
    }

    /// Human-readable label used in training reports.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Off => "Not Pump",
            Self::On => "Pump",
        }
    }
}

impl From<Action> for u8 {
    fn from(action: Action) -> Self {
        action.class() as u8
    }
}

impl TryFrom<u8> for Action {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Off),
            1 => Ok(Self::On),
            other => Err(format!("invalid pump action {other} (expected 0 or 1)")),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

/// A reading with its ground-truth action, as produced by the labeling rule.
///
/// Field names and order match the labeled dataset header
/// `temp,hum,soil,Pump_Action`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabeledSample {
    pub temp: f64,
    pub hum: f64,
    pub soil: f64,
    #[serde(rename = "Pump_Action")]
    pub action: Action,
}

impl LabeledSample {
    pub fn new(reading: SensorReading, action: Action) -> Self {
        Self {
            temp: reading.temp,
            hum: reading.hum,
            soil: reading.soil,
            action,
        }
    }

    pub fn reading(&self) -> SensorReading {
        SensorReading::new(self.temp, self.hum, self.soil)
    }
}

/// Ordered collection of labeled samples.
pub type Dataset = Vec<LabeledSample>;

/// Count samples per action: `(off, on)`.
pub fn class_balance(samples: &[LabeledSample]) -> (usize, usize) {
    let on = samples.iter().filter(|s| s.action == Action::On).count();
    (samples.len() - on, on)
}

/// Feature values keyed by feature name.
///
/// Insertion order is irrelevant; lookups are by name only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    values: BTreeMap<String, f64>,
}

impl FeatureRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for FeatureRow {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut row = Self::new();
        for (name, value) in iter {
            row.insert(name, value);
        }
        row
    }
}
