//! Standard scaler: `(x - mean) / scale` per column.

use renewal_core::{PredictError, Scaler};
use serde::{Deserialize, Serialize};

/// Fitted standardization parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
    #[serde(default = "default_true")]
    pub with_mean: bool,
    #[serde(default = "default_true")]
    pub with_std: bool,
}

fn default_true() -> bool {
    true
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Self {
        Self {
            mean,
            scale,
            with_mean: true,
            with_std: true,
        }
    }

    /// Checks the parameter vectors agree in length and are finite.
    pub fn validate(&self) -> Result<(), String> {
        if self.mean.len() != self.scale.len() {
            return Err(format!(
                "mean has {} columns but scale has {}",
                self.mean.len(),
                self.scale.len()
            ));
        }
        if self.mean.iter().chain(&self.scale).any(|v| !v.is_finite()) {
            return Err("scaler parameters must be finite".into());
        }
        Ok(())
    }
}

impl Scaler for StandardScaler {
    fn n_features(&self) -> usize {
        self.mean.len()
    }

    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, PredictError> {
        if row.len() != self.n_features() {
            return Err(PredictError::Transform(format!(
                "scaler expects {} columns, got {}",
                self.n_features(),
                row.len()
            )));
        }

        let out = row
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(&x, (&mean, &scale))| {
                let centered = if self.with_mean { x - mean } else { x };
                // Constant columns are fitted with a zero scale; leave them unscaled.
                match (self.with_std, scale == 0.0) {
                    (true, false) => centered / scale,
                    _ => centered,
                }
            })
            .collect();

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform() {
        let scaler = StandardScaler::new(vec![1.0, 10.0, 0.0], vec![2.0, 5.0, 1.0]);
        let out = scaler.transform(&[3.0, 0.0, -4.0]).unwrap();
        assert_eq!(out, vec![1.0, -2.0, -4.0]);
    }

    #[test]
    fn test_zero_scale_is_identity_scale() {
        let scaler = StandardScaler::new(vec![5.0], vec![0.0]);
        assert_eq!(scaler.transform(&[7.0]).unwrap(), vec![2.0]);
    }

    #[test]
    fn test_without_mean_or_std() {
        let mut scaler = StandardScaler::new(vec![5.0], vec![2.0]);
        scaler.with_mean = false;
        assert_eq!(scaler.transform(&[7.0]).unwrap(), vec![3.5]);

        scaler.with_mean = true;
        scaler.with_std = false;
        assert_eq!(scaler.transform(&[7.0]).unwrap(), vec![2.0]);
    }

    #[test]
    fn test_width_mismatch() {
        let scaler = StandardScaler::new(vec![0.0; 7], vec![1.0; 7]);
        let err = scaler.transform(&[1.0; 6]).unwrap_err();
        assert!(matches!(err, PredictError::Transform(_)));
    }

    #[test]
    fn test_validate() {
        assert!(StandardScaler::new(vec![0.0; 2], vec![1.0; 3]).validate().is_err());
        assert!(StandardScaler::new(vec![f64::NAN], vec![1.0]).validate().is_err());
        assert!(StandardScaler::new(vec![0.0], vec![1.0]).validate().is_ok());
    }
}
