//! Random forest classifier
//!
//! - [`tree`]: CART decision trees with Gini splits
//! - [`ensemble`]: bagged forest with soft voting
//! - [`split`]: seeded train/evaluation partitioning

pub mod ensemble;
pub mod split;
pub mod tree;

pub use ensemble::{RandomForest, RfPrediction};
pub use split::train_test_split;
pub use tree::{DecisionTree, TreeNode, TreeParams};

use serde::{Deserialize, Serialize};

/// How many features each split examines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaxFeatures {
    /// `floor(sqrt(n_features))`, at least 1
    #[default]
    Sqrt,
    /// Every feature
    All,
    /// A fixed count, capped at the number of features
    #[serde(untagged)]
    Count(usize),
}

impl MaxFeatures {
    /// Resolve to a concrete feature count for `n_features` inputs.
    pub fn resolve(self, n_features: usize) -> usize {
        let n = match self {
            Self::Sqrt => (n_features as f64).sqrt().floor() as usize,
            Self::All => n_features,
            Self::Count(k) => k.min(n_features),
        };
        n.max(1)
    }
}

impl std::fmt::Display for MaxFeatures {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqrt => write!(f, "sqrt"),
            Self::All => write!(f, "all"),
            Self::Count(k) => write!(f, "{k}"),
        }
    }
}

impl std::str::FromStr for MaxFeatures {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqrt" => Ok(Self::Sqrt),
            "all" => Ok(Self::All),
            other => other.parse::<usize>().map(Self::Count).map_err(|_| {
                format!("Unknown max_features: {s}. Valid values: sqrt, all, or a positive integer")
            }),
        }
    }
}

/// Forest hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    /// Number of trees in the ensemble
    pub n_trees: usize,
    /// Maximum depth of each tree
    pub max_depth: usize,
    /// Features examined per split
    pub max_features: MaxFeatures,
    /// Minimum samples required to split a node
    pub min_samples_split: usize,
    /// Seed for bootstrap and feature sampling
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 10,
            max_features: MaxFeatures::Sqrt,
            min_samples_split: 2,
            seed: 42,
        }
    }
}
