//! CART decision tree classifier
//!
//! Array-based tree: node 0 is the root and children are referenced by
//! index. Splits minimize weighted Gini impurity over a random subset of
//! features; samples with `value <= threshold` go left. Leaves store class
//! probabilities so an ensemble can average them.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// A node in the decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Feature index to split on (`None` for leaf nodes).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<usize>,
    /// Split threshold (features <= threshold go left).
    #[serde(default)]
    pub threshold: f64,
    /// Index of left child (0 for leaves).
    #[serde(default)]
    pub left: usize,
    /// Index of right child (0 for leaves).
    #[serde(default)]
    pub right: usize,
    /// Fraction of training samples per class that reached this node.
    pub probabilities: Vec<f64>,
}

impl TreeNode {
    fn leaf(probabilities: Vec<f64>) -> Self {
        Self {
            feature: None,
            threshold: 0.0,
            left: 0,
            right: 0,
            probabilities,
        }
    }

    /// Returns `true` if this node is a leaf (no children).
    pub fn is_leaf(&self) -> bool {
        self.feature.is_none()
    }
}

/// Growth limits for a single tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeParams {
    /// Maximum depth; the root is at depth 0.
    pub max_depth: usize,
    /// Minimum samples a node needs before it may split.
    pub min_samples_split: usize,
    /// Number of non-constant features examined per split.
    pub max_features: usize,
}

#[derive(Debug, Clone, Copy)]
struct Split {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

/// Borrowed training data shared by every node of one fit.
struct FitData<'a> {
    x: &'a [Vec<f64>],
    y: &'a [usize],
    n_classes: usize,
    params: TreeParams,
}

/// A decision tree classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<TreeNode>,
    n_features: usize,
    n_classes: usize,
}

impl DecisionTree {
    /// Grow a tree on the rows of `x` selected by `indices`.
    ///
    /// `indices` may repeat rows (bootstrap samples). Every row in `x` must
    /// have `n_features` values and every label in `y` must be below
    /// `n_classes`.
    pub fn fit(
        x: &[Vec<f64>],
        y: &[usize],
        indices: &[usize],
        n_classes: usize,
        params: TreeParams,
        rng: &mut StdRng,
    ) -> Self {
        let n_features = x.first().map_or(0, Vec::len);
        let mut tree = Self {
            nodes: Vec::new(),
            n_features,
            n_classes,
        };
        let data = FitData {
            x,
            y,
            n_classes,
            params,
        };
        tree.grow(&data, indices.to_vec(), 0, rng);
        tree
    }

    fn grow(
        &mut self,
        data: &FitData<'_>,
        indices: Vec<usize>,
        depth: usize,
        rng: &mut StdRng,
    ) -> usize {
        let counts = class_counts(data.y, &indices, data.n_classes);
        let node_idx = self.nodes.len();
        self.nodes.push(TreeNode::leaf(to_probabilities(&counts)));

        let is_pure = counts.iter().filter(|&&c| c > 0).count() <= 1;
        if is_pure
            || depth >= data.params.max_depth
            || indices.len() < data.params.min_samples_split
        {
            return node_idx;
        }

        let Some(split) = best_split(data, &indices, self.n_features, rng) else {
            return node_idx;
        };

        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = indices
            .into_iter()
            .partition(|&i| data.x[i][split.feature] <= split.threshold);

        let left = self.grow(data, left_rows, depth + 1, rng);
        let right = self.grow(data, right_rows, depth + 1, rng);

        let node = &mut self.nodes[node_idx];
        node.feature = Some(split.feature);
        node.threshold = split.threshold;
        node.left = left;
        node.right = right;
        node_idx
    }

    /// Class probabilities of the leaf a sample lands in.
    ///
    /// Missing trailing features read as `0.0`.
    pub fn predict_proba(&self, features: &[f64]) -> &[f64] {
        let mut idx = 0usize;
        loop {
            let node = &self.nodes[idx];
            let Some(feature) = node.feature else {
                return &node.probabilities;
            };
            let value = features.get(feature).copied().unwrap_or(0.0);
            idx = if value <= node.threshold {
                node.left
            } else {
                node.right
            };
        }
    }

    /// Classify a single sample.
    pub fn predict(&self, features: &[f64]) -> usize {
        argmax(self.predict_proba(features))
    }

    /// Number of nodes in the tree.
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaf nodes.
    pub fn n_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Expected number of features.
    pub const fn n_features(&self) -> usize {
        self.n_features
    }

    pub const fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Access a node by index.
    pub fn node_at(&self, index: usize) -> &TreeNode {
        &self.nodes[index]
    }

    /// Tree depth (longest root-to-leaf path).
    pub fn depth(&self) -> usize {
        if self.nodes.is_empty() {
            return 0;
        }
        self.node_depth(0)
    }

    fn node_depth(&self, idx: usize) -> usize {
        let node = &self.nodes[idx];
        if node.is_leaf() {
            return 0;
        }
        1 + self.node_depth(node.left).max(self.node_depth(node.right))
    }

    /// Check child indices and probability widths after deserialization.
    pub fn check_structure(&self) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".into());
        }
        for (i, node) in self.nodes.iter().enumerate() {
            if node.probabilities.len() != self.n_classes {
                return Err(format!(
                    "node {i} has {} class probabilities, expected {}",
                    node.probabilities.len(),
                    self.n_classes
                ));
            }
            if let Some(feature) = node.feature {
                if feature >= self.n_features {
                    return Err(format!("node {i} splits on unknown feature {feature}"));
                }
                if !node.threshold.is_finite() {
                    return Err(format!("node {i} has a non-finite threshold"));
                }
                // children are always pushed after their parent
                if node.left <= i
                    || node.right <= i
                    || node.left.max(node.right) >= self.nodes.len()
                {
                    return Err(format!("node {i} has invalid children"));
                }
            }
        }
        Ok(())
    }
}

fn class_counts(y: &[usize], indices: &[usize], n_classes: usize) -> Vec<usize> {
    let mut counts = vec![0usize; n_classes];
    for &i in indices {
        counts[y[i]] += 1;
    }
    counts
}

fn to_probabilities(counts: &[usize]) -> Vec<f64> {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return vec![0.0; counts.len()];
    }
    counts.iter().map(|&c| c as f64 / total as f64).collect()
}

fn gini(counts: &[usize], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let t = total as f64;
    1.0 - counts.iter().map(|&c| (c as f64 / t).powi(2)).sum::<f64>()
}

/// Index of the largest value; ties resolve to the lowest class.
pub(crate) fn argmax(values: &[f64]) -> usize {
    let mut best = 0usize;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}

fn best_split(
    data: &FitData<'_>,
    indices: &[usize],
    n_features: usize,
    rng: &mut StdRng,
) -> Option<Split> {
    let mut features: Vec<usize> = (0..n_features).collect();
    features.shuffle(rng);

    let mut best: Option<Split> = None;
    let mut examined = 0usize;

    for feature in features {
        if examined >= data.params.max_features && best.is_some() {
            break;
        }
        let mut order = indices.to_vec();
        order.sort_by(|&a, &b| data.x[a][feature].total_cmp(&data.x[b][feature]));

        let first = data.x[order[0]][feature];
        let last = data.x[order[order.len() - 1]][feature];
        if first == last {
            continue;
        }
        examined += 1;

        if let Some(candidate) = best_threshold(data, &order, feature) {
            if best.map_or(true, |b| candidate.impurity < b.impurity) {
                best = Some(candidate);
            }
        }
    }

    best
}

/// Sweep sorted rows and find the threshold with the lowest weighted Gini.
fn best_threshold(data: &FitData<'_>, order: &[usize], feature: usize) -> Option<Split> {
    let n = order.len();
    let mut right = class_counts(data.y, order, data.n_classes);
    let mut left = vec![0usize; data.n_classes];
    let mut best: Option<Split> = None;

    for pos in 0..n - 1 {
        let row = order[pos];
        left[data.y[row]] += 1;
        right[data.y[row]] -= 1;

        let here = data.x[row][feature];
        let next = data.x[order[pos + 1]][feature];
        if here == next {
            continue;
        }

        let n_left = pos + 1;
        let n_right = n - n_left;
        let weighted = n_left as f64 * gini(&left, n_left) + n_right as f64 * gini(&right, n_right);
        let impurity = weighted / n as f64;

        if best.map_or(true, |b| impurity < b.impurity) {
            let mut threshold = here + (next - here) / 2.0;
            if threshold >= next {
                threshold = here;
            }
            best = Some(Split {
                feature,
                threshold,
                impurity,
            });
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;

    fn params(max_depth: usize) -> TreeParams {
        TreeParams {
            max_depth,
            min_samples_split: 2,
            max_features: 1,
        }
    }

    fn fit_all(x: &[Vec<f64>], y: &[usize], max_depth: usize) -> DecisionTree {
        let indices: Vec<usize> = (0..x.len()).collect();
        let mut rng = StdRng::seed_from_u64(7);
        DecisionTree::fit(x, y, &indices, 2, params(max_depth), &mut rng)
    }

    #[test]
    fn test_check_structure_rejects_nan_threshold() {
        let x: Vec<Vec<f64>> = (0..10).map(|i| vec![f64::from(i)]).collect();
        let y: Vec<usize> = (0..10).map(|i| usize::from(i >= 5)).collect();
        let mut tree = fit_all(&x, &y, 5);
        assert!(tree.check_structure().is_ok());

        tree.nodes[0].threshold = f64::NAN;
        let err = tree.check_structure().unwrap_err();
        assert!(err.contains("non-finite threshold"));
    }

    #[test]
    fn test_single_threshold_learned() {
        let x: Vec<Vec<f64>> = (0..10).map(|i| vec![f64::from(i)]).collect();
        let y: Vec<usize> = (0..10).map(|i| usize::from(i >= 5)).collect();
        let tree = fit_all(&x, &y, 5);

        assert_eq!(tree.n_nodes(), 3);
        assert_eq!(tree.n_leaves(), 2);
        assert_eq!(tree.depth(), 1);
        assert_abs_diff_eq!(tree.node_at(0).threshold, 4.5);
        assert_eq!(tree.predict(&[4.4]), 0);
        assert_eq!(tree.predict(&[4.6]), 1);
    }

    #[test]
    fn test_boundary_goes_left() {
        let x = vec![vec![0.0], vec![1.0]];
        let y = vec![0, 1];
        let tree = fit_all(&x, &y, 3);
        assert_eq!(tree.predict(&[0.5]), 0);
    }

    #[test]
    fn test_pure_node_is_leaf() {
        let x = vec![vec![1.0], vec![2.0], vec![3.0]];
        let y = vec![1, 1, 1];
        let tree = fit_all(&x, &y, 10);
        assert_eq!(tree.n_nodes(), 1);
        assert_eq!(tree.predict(&[100.0]), 1);
    }

    #[test]
    fn test_max_depth_zero_gives_majority_leaf() {
        let x = vec![vec![1.0], vec![2.0], vec![3.0]];
        let y = vec![0, 1, 1];
        let tree = fit_all(&x, &y, 0);
        assert_eq!(tree.n_nodes(), 1);
        assert_eq!(tree.predict(&[1.0]), 1);
        assert_abs_diff_eq!(tree.predict_proba(&[1.0])[1], 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_features_cannot_split() {
        let x = vec![vec![5.0], vec![5.0], vec![5.0], vec![5.0]];
        let y = vec![0, 1, 0, 1];
        let tree = fit_all(&x, &y, 10);
        assert_eq!(tree.n_nodes(), 1);
        // tie resolves to class 0
        assert_eq!(tree.predict(&[5.0]), 0);
    }

    #[test]
    fn test_skips_constant_feature_for_informative_one() {
        // feature 0 constant, feature 1 separates classes
        let x: Vec<Vec<f64>> = (0..8).map(|i| vec![1.0, f64::from(i)]).collect();
        let y: Vec<usize> = (0..8).map(|i| usize::from(i >= 4)).collect();
        let tree = fit_all(&x, &y, 4);
        assert_eq!(tree.node_at(0).feature, Some(1));
        assert_eq!(tree.predict(&[1.0, 7.0]), 1);
        assert_eq!(tree.predict(&[1.0, 0.0]), 0);
    }

    #[test]
    fn test_two_dimensional_rule() {
        // class 1 iff a > 5 and b < 3
        let mut x = Vec::new();
        let mut y = Vec::new();
        for a in 0..10 {
            for b in 0..6 {
                x.push(vec![f64::from(a), f64::from(b)]);
                y.push(usize::from(a > 5 && b < 3));
            }
        }
        let indices: Vec<usize> = (0..x.len()).collect();
        let mut rng = StdRng::seed_from_u64(3);
        let p = TreeParams {
            max_depth: 10,
            min_samples_split: 2,
            max_features: 2,
        };
        let tree = DecisionTree::fit(&x, &y, &indices, 2, p, &mut rng);
        for (row, &label) in x.iter().zip(&y) {
            assert_eq!(tree.predict(row), label);
        }
        assert!(tree.check_structure().is_ok());
    }

    #[test]
    fn test_bootstrap_indices_with_repeats() {
        let x = vec![vec![0.0], vec![10.0]];
        let y = vec![0, 1];
        let mut rng = StdRng::seed_from_u64(1);
        let tree = DecisionTree::fit(&x, &y, &[1, 1, 1], 2, params(5), &mut rng);
        assert_eq!(tree.n_nodes(), 1);
        assert_eq!(tree.predict(&[0.0]), 1);
    }

    #[test]
    fn test_gini() {
        assert_abs_diff_eq!(gini(&[5, 5], 10), 0.5);
        assert_abs_diff_eq!(gini(&[10, 0], 10), 0.0);
        assert_abs_diff_eq!(gini(&[0, 0], 0), 0.0);
    }

    #[test]
    fn test_argmax_prefers_lowest_on_tie() {
        assert_eq!(argmax(&[0.5, 0.5]), 0);
        assert_eq!(argmax(&[0.2, 0.8]), 1);
        assert_eq!(argmax(&[]), 0);
    }

    #[test]
    fn test_check_structure_rejects_bad_children() {
        let mut tree = fit_all(&[vec![0.0], vec![1.0]], &[0, 1], 3);
        tree.nodes[0].left = 9;
        assert!(tree.check_structure().is_err());
    }
}
