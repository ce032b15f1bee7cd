//! Core domain types and capability traits for renewal.
//!
//! This crate provides everything the inference path needs that is not tied
//! to a particular model format or to HTTP:
//!
//! - [`PredictError`] — Closed set of failure kinds for loading and prediction
//! - [`FormInput`] — The six user-supplied fields of a prediction request
//! - [`FeatureVector`] and [`build_features`] — The fixed feature pipeline
//! - [`Prediction`] — Positive-class probability and its human-readable form
//! - [`Scaler`], [`Classifier`], [`ArtifactProvider`] — The pluggable backend
//!
//! # Example
//!
//! ```rust
//! use renewal_core::{build_features, FormInput, PredictError, Scaler};
//!
//! struct Identity;
//!
//! impl Scaler for Identity {
//!     fn n_features(&self) -> usize {
//!         7
//!     }
//!
//!     fn transform(&self, row: &[f64]) -> Result<Vec<f64>, PredictError> {
//!         Ok(row.to_vec())
//!     }
//! }
//!
//! let input = FormInput {
//!     perc_premium_paid_by_cash_credit: 0.3,
//!     income: 0.0,
//!     application_underwriting_score: 99.0,
//!     age_in_years: 45.0,
//!     total_late_payments: 2.0,
//!     has_late_payments: 1.0,
//! };
//!
//! let features = build_features(&input, &Identity).unwrap();
//! assert_eq!(features.as_slice(), &[0.3, 0.0, 99.0, 45.0, 2.0, 1.0]);
//! ```

mod features;
mod form;
mod prediction;

pub use features::{
    build_features, log_income, scaler_row, FeatureVector, FEATURE_COUNT, SCALER_COLUMNS,
    SELECTED_COLUMNS,
};
pub use form::{FormInput, FORM_FIELDS};
pub use prediction::{Prediction, Verdict, LOADING_MESSAGE, RENEWAL_THRESHOLD};

use thiserror::Error;

/// Errors that can occur while loading artifacts or serving a prediction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictError {
    /// Artifact resolution or deserialization failed.
    #[error("failed to load model artifacts: {0}")]
    Load(String),

    /// A form field was missing or not a number.
    #[error("{0}")]
    Validation(String),

    /// The feature transform produced an unusable value.
    #[error("feature transform failed: {0}")]
    Transform(String),

    /// The classifier rejected the feature vector.
    #[error("model inference failed: {0}")]
    Model(String),
}

/// Feature standardization fitted ahead of time.
pub trait Scaler: Send + Sync {
    /// Number of columns the scaler was fitted on.
    fn n_features(&self) -> usize;

    /// Transforms a single row. Fails with [`PredictError::Transform`].
    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, PredictError>;
}

/// Binary classifier fitted ahead of time.
pub trait Classifier: Send + Sync {
    /// Number of features the classifier expects.
    fn n_features(&self) -> usize;

    /// Returns `[p_class0, p_class1]` for a single row. Fails with [`PredictError::Model`].
    fn predict_proba(&self, features: &[f64]) -> Result<[f64; 2], PredictError>;
}

/// The loaded pair of artifacts, read-only once published.
pub struct ModelBundle {
    pub scaler: Box<dyn Scaler>,
    pub classifier: Box<dyn Classifier>,
}

impl ModelBundle {
    pub fn new(scaler: Box<dyn Scaler>, classifier: Box<dyn Classifier>) -> Self {
        Self { scaler, classifier }
    }

    /// Runs the feature pipeline and the classifier for one request.
    pub fn predict(&self, input: &FormInput) -> Result<Prediction, PredictError> {
        let features = build_features(input, self.scaler.as_ref())?;
        let [_, renewal] = self.classifier.predict_proba(features.as_slice())?;
        if !renewal.is_finite() {
            return Err(PredictError::Model(format!(
                "classifier returned non-finite probability {renewal}"
            )));
        }
        Ok(Prediction::new(renewal))
    }
}

/// Source of a [`ModelBundle`], resolved once at startup.
#[async_trait::async_trait]
pub trait ArtifactProvider: Send + Sync {
    /// Resolves and deserializes both artifacts. Fails with [`PredictError::Load`].
    async fn load(&self) -> Result<ModelBundle, PredictError>;
}
