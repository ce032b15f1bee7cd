//! Concrete inference backend for renewal.
//!
//! Artifacts are JSON exports of a fitted standard scaler and a fitted binary
//! classifier. They are read from a local directory when both are present,
//! otherwise fetched from a model hub repository into an on-disk cache.

mod artifact;
mod forest;
mod hub;
mod linear;
mod loader;
mod scaler;

pub use artifact::{decode_classifier, decode_scaler, ArtifactError, ClassifierArtifact};
pub use forest::{DecisionTree, RandomForest};
pub use hub::HubClient;
pub use linear::LogisticRegression;
pub use loader::ArtifactLoader;
pub use scaler::StandardScaler;
