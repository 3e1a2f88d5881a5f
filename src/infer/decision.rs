//! Pump decisions as exchanged with the controller

use crate::error::Result;
use crate::reading::Action;
use serde::{Deserialize, Serialize};

/// Reason attached to every decision the policy produced.
pub const MODEL_REASON: &str = "AI Model Decision";

/// Error reported when no usable policy could be loaded.
pub const NO_MODEL: &str = "No model found";

/// Outcome of one inference invocation.
///
/// Exactly one of `reason` and `error` is set. A decision carrying an error
/// always has the pump off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub action: Action,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Decision {
    /// A decision made by the policy.
    pub fn model(action: Action) -> Self {
        Self {
            action,
            reason: Some(MODEL_REASON.to_string()),
            error: None,
        }
    }

    /// Pump off, with the failure that prevented a real decision.
    pub fn fail_safe(error: impl Into<String>) -> Self {
        Self {
            action: Action::Off,
            reason: None,
            error: Some(error.into()),
        }
    }

    pub fn no_model() -> Self {
        Self::fail_safe(NO_MODEL)
    }

    pub fn from_result(result: Result<Action>) -> Self {
        match result {
            Ok(action) => Self::model(action),
            Err(e) => Self::fail_safe(e.to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Single-line JSON, as printed by `irrigate decide`.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(
                "{{\"action\":0,\"error\":{}}}",
                serde_json::Value::from(e.to_string())
            )
        })
    }

    /// Read a decision back from adapter stdout.
    ///
    /// Anything that is not a well-formed decision keeps the pump off.
    pub fn from_output(stdout: &str) -> Self {
        let line = stdout.lines().rev().find(|l| !l.trim().is_empty()).unwrap_or("");
        match serde_json::from_str::<Self>(line.trim()) {
            Ok(decision) if decision.is_error() => Self {
                action: Action::Off,
                ..decision
            },
            Ok(decision) => decision,
            Err(e) => Self::fail_safe(format!("unreadable inference output: {e}")),
        }
    }
}
