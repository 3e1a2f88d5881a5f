//! Irrigate: sensor-driven irrigation pump decisions
//!
//! Three stages, each feeding the next:
//!
//! 1. [`label`]: raw sensor rows are labeled with a fixed pump rule.
//! 2. [`train`]: a random forest is fit on the labeled dataset, evaluated
//!    on a held-out split and persisted as a [`Policy`].
//! 3. [`infer`]: the policy answers one `(temp, humid, soil)` reading with
//!    a [`Decision`], keeping the pump off on any failure.
//!
//! # Example
//!
//! ```no_run
//! use irrigate::infer::run_inference;
//!
//! let decision = run_inference("policy.json", &["35", "40", "400"]);
//! println!("{}", decision.to_json());
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod eval;
pub mod forest;
pub mod infer;
pub mod io;
pub mod label;
pub mod policy;
pub mod reading;
pub mod train;

pub use error::{Error, Result};
pub use infer::{Decision, InferenceAdapter};
pub use policy::Policy;
pub use reading::{Action, FeatureRow, LabeledSample, SensorReading};
