//! Policy evaluation
//!
//! Accuracy, confusion matrix and an sklearn-style per-class report for
//! the held-out evaluation set.

pub mod classification;

pub use classification::{Average, ClassMetrics, ClassificationReport, ConfusionMatrix};
