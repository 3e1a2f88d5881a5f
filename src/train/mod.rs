//! Policy training
//!
//! This module turns a labeled dataset into a persisted policy:
//! - Seeded train/evaluation split
//! - Random forest fitting
//! - Held-out evaluation (accuracy, per-class precision/recall/F1)
//! - Persistence and a smoke test on a fixed reading
//!
//! # Example
//!
//! ```no_run
//! use irrigate::train::{run_training, TrainConfig};
//!
//! let report = run_training("dataset.csv", "policy.json", &TrainConfig::default()).unwrap();
//! println!("{report}");
//! ```

mod pipeline;
mod report;

pub use pipeline::{run_training, TrainConfig, Trainer, SMOKE_READING};
pub use report::{SmokeTest, TrainingReport};
