//! Policy-backed inference for single readings

use super::decision::Decision;
use crate::error::{Error, Result};
use crate::io::load_policy;
use crate::policy::Policy;
use crate::reading::{SensorReading, FEATURE_NAMES};
use std::path::Path;

/// A loaded policy answering one reading at a time.
#[derive(Debug, Clone)]
pub struct InferenceAdapter {
    policy: Policy,
}

impl InferenceAdapter {
    /// Load the policy artifact at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        load_policy(path).map(Self::new)
    }

    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Decide for a parsed reading. Prediction failures keep the pump off.
    pub fn decide(&self, reading: &SensorReading) -> Decision {
        Decision::from_result(self.policy.predict(&reading.to_features()))
    }

    /// Decide for raw `temp humid soil` arguments.
    pub fn decide_args<S: AsRef<str>>(&self, args: &[S]) -> Decision {
        match parse_readings(args) {
            Ok(reading) => self.decide(&reading),
            Err(e) => Decision::fail_safe(e.to_string()),
        }
    }
}

/// Parse exactly three positional values as `temp, humid, soil`.
///
/// # Errors
///
/// Returns [`Error::Prediction`] on a wrong argument count or a value that
/// is not a number.
pub fn parse_readings<S: AsRef<str>>(args: &[S]) -> Result<SensorReading> {
    if args.len() != FEATURE_NAMES.len() {
        return Err(Error::Prediction(format!(
            "expected 3 readings (temp humid soil), got {}",
            args.len()
        )));
    }
    let value = |i: usize| -> Result<f64> {
        let raw = args[i].as_ref().trim();
        raw.parse::<f64>().map_err(|e| {
            Error::Prediction(format!(
                "could not convert {} '{raw}' to a number: {e}",
                FEATURE_NAMES[i]
            ))
        })
    };
    Ok(SensorReading::new(value(0)?, value(1)?, value(2)?))
}

/// Full adapter run: load the policy, then decide for `args`.
///
/// Never fails. A missing or unusable policy yields
/// `{"action":0,"error":"No model found"}` before the arguments are looked at.
pub fn run_inference<S: AsRef<str>>(model_path: impl AsRef<Path>, args: &[S]) -> Decision {
    match InferenceAdapter::load(model_path) {
        Ok(adapter) => adapter.decide_args(args),
        Err(_) => Decision::no_model(),
    }
}
