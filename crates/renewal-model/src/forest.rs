//! Random forest of binary decision trees.
//!
//! Trees use the flat parallel-array layout of fitted tree estimators:
//! node `i` splits on `feature[i]` at `threshold[i]`, sending samples with
//! `x[feature] <= threshold` to `children_left[i]` and the rest to
//! `children_right[i]`. A node whose left child is [`LEAF`] is a leaf, and
//! `value[i]` holds its per-class weights.

use renewal_core::{Classifier, PredictError};
use serde::{Deserialize, Serialize};

/// Child index marking a leaf.
pub const LEAF: i64 = -1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<[f64; 2]>,
}

impl DecisionTree {
    pub fn node_count(&self) -> usize {
        self.children_left.len()
    }

    /// Checks array lengths, child indices, and split features.
    pub fn validate(&self, n_features: usize) -> Result<(), String> {
        let n = self.node_count();
        if n == 0 {
            return Err("tree has no nodes".into());
        }
        let lengths = [
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
            self.value.len(),
        ];
        if lengths.iter().any(|&len| len != n) {
            return Err(format!("tree arrays disagree in length (expected {n} nodes)"));
        }

        for node in 0..n {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == LEAF {
                continue;
            }
            for child in [left, right] {
                if child <= node as i64 || child >= n as i64 {
                    return Err(format!("node {node} has out-of-order child {child}"));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature as usize >= n_features {
                return Err(format!("node {node} splits on unknown feature {feature}"));
            }
        }
        Ok(())
    }

    /// Walks to a leaf and returns its normalized class weights.
    pub fn leaf_proba(&self, features: &[f64]) -> Result<[f64; 2], PredictError> {
        let mut node = 0usize;
        // Children always point forward, so a walk visits at most node_count nodes.
        for _ in 0..self.node_count() {
            let left = *self
                .children_left
                .get(node)
                .ok_or_else(|| PredictError::Model(format!("tree node {node} out of range")))?;

            if left == LEAF {
                let [w0, w1] = self.value.get(node).copied().unwrap_or([0.0, 0.0]);
                let total = w0 + w1;
                if total.is_nan() || total <= 0.0 {
                    return Err(PredictError::Model(format!("leaf {node} has no class weight")));
                }
                return Ok([w0 / total, w1 / total]);
            }

            let split = self
                .feature
                .get(node)
                .and_then(|&f| features.get(usize::try_from(f).ok()?))
                .zip(self.threshold.get(node))
                .zip(self.children_right.get(node));
            let Some(((&x, &threshold), &right)) = split else {
                return Err(PredictError::Model(format!("node {node} has an invalid split")));
            };
            let next = match x <= threshold {
                true => left,
                false => right,
            };
            node = usize::try_from(next)
                .map_err(|_| PredictError::Model(format!("node {node} has invalid child {next}")))?;
        }
        Err(PredictError::Model("tree walk did not reach a leaf".into()))
    }
}

/// Averages the leaf probabilities of its trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    pub n_features: usize,
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn validate(&self) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("random forest has no trees".into());
        }
        for (idx, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features)
                .map_err(|e| format!("tree {idx}: {e}"))?;
        }
        Ok(())
    }
}

impl Classifier for RandomForest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_proba(&self, features: &[f64]) -> Result<[f64; 2], PredictError> {
        if features.len() != self.n_features {
            return Err(PredictError::Model(format!(
                "X has {} features, but the model expects {}",
                features.len(),
                self.n_features
            )));
        }
        if self.trees.is_empty() {
            return Err(PredictError::Model("random forest has no trees".into()));
        }

        let mut sum = [0.0, 0.0];
        for tree in &self.trees {
            let [p0, p1] = tree.leaf_proba(features)?;
            sum[0] += p0;
            sum[1] += p1;
        }
        let n = self.trees.len() as f64;
        Ok([sum[0] / n, sum[1] / n])
    }
}
