//! The trained irrigation policy
//!
//! A [`Policy`] wraps a [`RandomForest`] together with the feature names it
//! was fit on. Queries are [`FeatureRow`]s: values are looked up by name in
//! the policy's own feature order, so a caller can never feed `soil` into
//! the `hum` slot by listing columns in a different order.

use crate::error::{Error, Result};
use crate::forest::{ForestParams, RandomForest, RfPrediction};
use crate::reading::{Action, FeatureRow, SensorReading, FEATURE_NAMES};
use serde::{Deserialize, Serialize};

/// Architecture tag stored in every artifact.
pub const ARCHITECTURE: &str = "random_forest";

/// Policy metadata stored alongside the forest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyMetadata {
    /// Policy name/identifier
    pub name: String,

    /// Classifier architecture (always `random_forest`)
    pub architecture: String,

    /// Crate version that produced the artifact
    pub version: String,

    /// Feature names in the order the forest indexes them
    pub feature_names: Vec<String>,

    /// Hyperparameters used for fitting
    pub hyperparameters: ForestParams,

    /// Number of samples the forest was fit on
    #[serde(default)]
    pub trained_samples: usize,

    /// Held-out accuracy measured after fitting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
}

/// A trained pump policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    pub metadata: PolicyMetadata,
    pub forest: RandomForest,
}

impl Policy {
    /// Wrap a forest fit on the canonical `temp, hum, soil` features.
    pub fn new(forest: RandomForest, params: ForestParams, trained_samples: usize) -> Self {
        Self {
            metadata: PolicyMetadata {
                name: "irrigation-policy".to_string(),
                architecture: ARCHITECTURE.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                feature_names: FEATURE_NAMES.iter().map(|s| (*s).to_string()).collect(),
                hyperparameters: params,
                trained_samples,
                accuracy: None,
            },
            forest,
        }
    }

    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.metadata.accuracy = Some(accuracy);
        self
    }

    pub fn feature_names(&self) -> &[String] {
        &self.metadata.feature_names
    }

    /// Resolve a named row into the forest's positional feature vector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Prediction`] if a feature is missing, unknown or
    /// not finite.
    pub fn feature_vector(&self, row: &FeatureRow) -> Result<Vec<f64>> {
        if let Some(unknown) = row
            .names()
            .find(|name| !self.metadata.feature_names.iter().any(|f| f == name))
        {
            return Err(Error::Prediction(format!(
                "unexpected feature '{unknown}'; expected {}",
                self.metadata.feature_names.join(", ")
            )));
        }

        self.metadata
            .feature_names
            .iter()
            .map(|name| {
                let value = row
                    .get(name)
                    .ok_or_else(|| Error::Prediction(format!("missing feature '{name}'")))?;
                if !value.is_finite() {
                    return Err(Error::Prediction(format!(
                        "feature '{name}' must be a finite number, got {value}"
                    )));
                }
                Ok(value)
            })
            .collect()
    }

    /// Predict the pump action for a named feature row.
    pub fn predict(&self, row: &FeatureRow) -> Result<Action> {
        let features = self.feature_vector(row)?;
        Ok(Action::from_class(self.forest.predict(&features)))
    }

    /// Predict with per-class vote counts and confidence.
    pub fn predict_with_votes(&self, row: &FeatureRow) -> Result<RfPrediction> {
        let features = self.feature_vector(row)?;
        Ok(self.forest.predict_with_votes(&features))
    }

    pub fn predict_reading(&self, reading: &SensorReading) -> Result<Action> {
        self.predict(&reading.to_features())
    }

    /// Validate a policy loaded from storage.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ModelUnavailable`] if the artifact is not a usable
    /// random forest over uniquely named features.
    pub fn check(&self) -> Result<()> {
        let names = &self.metadata.feature_names;
        if self.metadata.architecture != ARCHITECTURE {
            return Err(Error::ModelUnavailable(format!(
                "unsupported architecture '{}'",
                self.metadata.architecture
            )));
        }
        if names.len() != self.forest.n_features() {
            return Err(Error::ModelUnavailable(format!(
                "{} feature names for a forest over {} features",
                names.len(),
                self.forest.n_features()
            )));
        }
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(Error::ModelUnavailable(format!("duplicate feature '{name}'")));
            }
        }
        self.forest.check_structure().map_err(Error::ModelUnavailable)
    }
}
