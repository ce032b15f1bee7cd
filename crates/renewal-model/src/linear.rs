//! Binary logistic regression.

use renewal_core::{Classifier, PredictError};
use serde::{Deserialize, Serialize};

/// Fitted coefficients for `p1 = sigmoid(coef · x + intercept)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub coef: Vec<f64>,
    pub intercept: f64,
}

impl LogisticRegression {
    pub fn new(coef: Vec<f64>, intercept: f64) -> Self {
        Self { coef, intercept }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.coef.is_empty() {
            return Err("logistic regression has no coefficients".into());
        }
        if self.coef.iter().any(|c| !c.is_finite()) || !self.intercept.is_finite() {
            return Err("logistic regression parameters must be finite".into());
        }
        Ok(())
    }

    fn decision(&self, features: &[f64]) -> f64 {
        self.coef
            .iter()
            .zip(features)
            .map(|(c, x)| c * x)
            .sum::<f64>()
            + self.intercept
    }
}

impl Classifier for LogisticRegression {
    fn n_features(&self) -> usize {
        self.coef.len()
    }

    fn predict_proba(&self, features: &[f64]) -> Result<[f64; 2], PredictError> {
        if features.len() != self.coef.len() {
            return Err(PredictError::Model(format!(
                "X has {} features, but the model expects {}",
                features.len(),
                self.coef.len()
            )));
        }
        let p1 = sigmoid(self.decision(features));
        Ok([1.0 - p1, p1])
    }
}

fn sigmoid(z: f64) -> f64 {
    // Split by sign so exp never overflows.
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
