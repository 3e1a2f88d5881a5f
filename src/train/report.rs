//! Training result types

use crate::eval::ClassificationReport;
use crate::reading::{Action, SensorReading};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Prediction of the persisted policy on a fixed reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SmokeTest {
    pub reading: SensorReading,
    pub action: Action,
}

impl fmt::Display for SmokeTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Test({}): {}", self.reading, self.action.label())
    }
}

/// Result of a training run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingReport {
    /// Samples the forest was fit on
    pub train_size: usize,
    /// Held-out samples used for evaluation
    pub test_size: usize,
    /// Metrics on the held-out partition
    pub evaluation: ClassificationReport,
    /// `(off, on)` counts in the held-out partition
    pub eval_balance: (usize, usize),
    /// Where the policy was written, if it was persisted
    pub model_path: Option<PathBuf>,
    pub smoke_test: Option<SmokeTest>,
    /// Wall-clock fitting time in seconds
    pub elapsed_secs: f64,
}

impl TrainingReport {
    pub fn accuracy(&self) -> f64 {
        self.evaluation.accuracy
    }
}

impl fmt::Display for TrainingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Trained on {} samples, evaluated on {} ({:.2}s)",
            self.train_size, self.test_size, self.elapsed_secs
        )?;
        writeln!(
            f,
            "Evaluation balance: {} not pump / {} pump",
            self.eval_balance.0, self.eval_balance.1
        )?;
        writeln!(f, "Accuracy: {:.2}%", self.accuracy() * 100.0)?;
        writeln!(f)?;
        writeln!(f, "--- report ---")?;
        write!(f, "{}", self.evaluation)?;
        if let Some(path) = &self.model_path {
            writeln!(f)?;
            writeln!(f, "Saved policy: {}", path.display())?;
        }
        if let Some(smoke) = &self.smoke_test {
            writeln!(f, "{smoke}")?;
        }
        Ok(())
    }
}
