//! JSON artifact codec and load errors.

use std::path::{Path, PathBuf};

use renewal_core::{Classifier, PredictError, FEATURE_COUNT, SCALER_COLUMNS};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::forest::RandomForest;
use crate::linear::LogisticRegression;
use crate::scaler::StandardScaler;

/// Errors raised while resolving, fetching, or decoding artifacts.
#[derive(thiserror::Error, Debug)]
pub enum ArtifactError {
    #[error("failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {}: {}", .path.display(), .source)]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid artifact {}: {}", .path.display(), .reason)]
    Invalid { path: PathBuf, reason: String },

    #[error("download of {file} failed: {reason}")]
    Download { file: String, reason: String },
}

impl From<ArtifactError> for PredictError {
    fn from(e: ArtifactError) -> Self {
        PredictError::Load(e.to_string())
    }
}

/// Supported classifier exports, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    LogisticRegression(LogisticRegression),
    RandomForest(RandomForest),
}

impl ClassifierArtifact {
    fn validate(&self) -> Result<(), String> {
        match self {
            ClassifierArtifact::LogisticRegression(m) => m.validate(),
            ClassifierArtifact::RandomForest(m) => m.validate(),
        }
    }

    pub fn into_classifier(self) -> Box<dyn Classifier> {
        match self {
            ClassifierArtifact::LogisticRegression(m) => Box::new(m),
            ClassifierArtifact::RandomForest(m) => Box::new(m),
        }
    }
}

/// Decodes a scaler export and checks it is as wide as the scaler row.
pub fn decode_scaler(bytes: &[u8], path: &Path) -> Result<StandardScaler, ArtifactError> {
    let scaler: StandardScaler = decode(bytes, path)?;
    scaler.validate().map_err(|reason| invalid(path, reason))?;

    if scaler.mean.len() != SCALER_COLUMNS {
        return Err(invalid(
            path,
            format!("scaler has {} columns, expected {SCALER_COLUMNS}", scaler.mean.len()),
        ));
    }
    Ok(scaler)
}

/// Decodes a classifier export and checks it takes the final feature row.
pub fn decode_classifier(bytes: &[u8], path: &Path) -> Result<Box<dyn Classifier>, ArtifactError> {
    let artifact: ClassifierArtifact = decode(bytes, path)?;
    artifact.validate().map_err(|reason| invalid(path, reason))?;

    let classifier = artifact.into_classifier();
    if classifier.n_features() != FEATURE_COUNT {
        return Err(invalid(
            path,
            format!(
                "classifier expects {} features, expected {FEATURE_COUNT}",
                classifier.n_features()
            ),
        ));
    }
    Ok(classifier)
}

fn decode<T: DeserializeOwned>(bytes: &[u8], path: &Path) -> Result<T, ArtifactError> {
    serde_json::from_slice(bytes).map_err(|source| ArtifactError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

fn invalid(path: &Path, reason: String) -> ArtifactError {
    ArtifactError::Invalid {
        path: path.to_path_buf(),
        reason,
    }
}
