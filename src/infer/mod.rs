//! Inference adapter
//!
//! Loads a policy once and answers one `(temp, humid, soil)` reading with a
//! [`Decision`]. Nothing on this path fails loudly: load, parse and
//! prediction errors all become a decision with the pump off.

mod adapter;
mod decision;

pub use adapter::{parse_readings, run_inference, InferenceAdapter};
pub use decision::{Decision, MODEL_REASON, NO_MODEL};
