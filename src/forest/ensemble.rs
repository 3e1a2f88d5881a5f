//! Random forest classifier
//!
//! Each tree is grown on a bootstrap sample with a random feature subset
//! per split. Prediction averages the trees' leaf probabilities (soft
//! voting); ties resolve to the lowest class, which keeps the pump off.

use super::tree::{argmax, DecisionTree, TreeParams};
use super::ForestParams;
use crate::error::{Error, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// A trained random forest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_features: usize,
    n_classes: usize,
}

/// Result of Random Forest prediction with vote details.
#[derive(Debug, Clone, PartialEq)]
pub struct RfPrediction {
    /// Predicted class (highest mean probability).
    pub class: usize,
    /// Hard vote count per class.
    pub votes: Vec<usize>,
    /// Mean probability of the predicted class across trees.
    pub confidence: f64,
}

impl RandomForest {
    /// Fit a forest on feature rows `x` and class labels `y`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `x` is empty, rows have differing widths, a value
    /// is NaN or infinite, or `x` and `y` differ in length.
    pub fn fit(x: &[Vec<f64>], y: &[usize], params: &ForestParams) -> Result<Self> {
        if x.is_empty() {
            return Err(Error::TrainingInput("cannot fit a forest on zero samples".into()));
        }
        if x.len() != y.len() {
            return Err(Error::TrainingInput(format!(
                "{} feature rows but {} labels",
                x.len(),
                y.len()
            )));
        }
        let n_features = x[0].len();
        if n_features == 0 || x.iter().any(|row| row.len() != n_features) {
            return Err(Error::TrainingInput(
                "feature rows must share a non-zero width".into(),
            ));
        }
        if let Some(row) = x.iter().position(|row| row.iter().any(|v| !v.is_finite())) {
            return Err(Error::TrainingInput(format!(
                "feature row {row} has a non-finite value"
            )));
        }
        // binary classifier: always reserve both classes so probabilities line up
        let n_classes = y.iter().max().map_or(2, |&m| (m + 1).max(2));

        let tree_params = TreeParams {
            max_depth: params.max_depth,
            min_samples_split: params.min_samples_split,
            max_features: params.max_features.resolve(n_features),
        };

        let mut master = StdRng::seed_from_u64(params.seed);
        let n = x.len();
        let trees = (0..params.n_trees)
            .map(|_| {
                let mut rng = StdRng::seed_from_u64(master.random::<u64>());
                let bootstrap: Vec<usize> = (0..n).map(|_| rng.random_range(0..n)).collect();
                DecisionTree::fit(x, y, &bootstrap, n_classes, tree_params, &mut rng)
            })
            .collect();

        Ok(Self {
            trees,
            n_features,
            n_classes,
        })
    }

    /// Mean class probabilities across all trees.
    pub fn predict_proba(&self, features: &[f64]) -> Vec<f64> {
        let mut mean = vec![0.0; self.n_classes];
        if self.trees.is_empty() {
            return mean;
        }
        for tree in &self.trees {
            for (acc, p) in mean.iter_mut().zip(tree.predict_proba(features)) {
                *acc += p;
            }
        }
        let n = self.trees.len() as f64;
        mean.iter_mut().for_each(|p| *p /= n);
        mean
    }

    /// Predict a single sample with vote details.
    pub fn predict_with_votes(&self, features: &[f64]) -> RfPrediction {
        let mut votes = vec![0usize; self.n_classes];
        for tree in &self.trees {
            let pred = tree.predict(features);
            if pred < self.n_classes {
                votes[pred] += 1;
            }
        }

        let proba = self.predict_proba(features);
        let class = argmax(&proba);

        RfPrediction {
            class,
            votes,
            confidence: proba.get(class).copied().unwrap_or(0.0),
        }
    }

    /// Predict a single sample (soft vote, returns class only).
    pub fn predict(&self, features: &[f64]) -> usize {
        argmax(&self.predict_proba(features))
    }

    /// Predict multiple samples, returning class labels.
    pub fn predict_batch(&self, samples: &[Vec<f64>]) -> Vec<usize> {
        samples.iter().map(|s| self.predict(s)).collect()
    }

    /// Number of trees in the forest.
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Expected number of features per sample.
    pub const fn n_features(&self) -> usize {
        self.n_features
    }

    pub const fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Deepest tree in the forest.
    pub fn max_tree_depth(&self) -> usize {
        self.trees.iter().map(DecisionTree::depth).max().unwrap_or(0)
    }

    /// Total node count across all trees.
    pub fn total_nodes(&self) -> usize {
        self.trees.iter().map(DecisionTree::n_nodes).sum()
    }

    /// Validate a deserialized forest before it is used for prediction.
    pub fn check_structure(&self) -> std::result::Result<(), String> {
        if self.trees.is_empty() {
            return Err("empty forest".into());
        }
        for (i, tree) in self.trees.iter().enumerate() {
            if tree.n_features() != self.n_features || tree.n_classes() != self.n_classes {
                return Err(format!("tree {i} does not match the forest's shape"));
            }
            tree.check_structure().map_err(|e| format!("tree {i}: {e}"))?;
        }
        Ok(())
    }
}
