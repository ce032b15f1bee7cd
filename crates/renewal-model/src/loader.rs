//! Local-then-hub artifact resolution.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use renewal_config::ArtifactConfig;
use renewal_core::{ArtifactProvider, ModelBundle, PredictError};
use tracing::info;

use crate::artifact::{decode_classifier, decode_scaler, ArtifactError};
use crate::hub::HubClient;

/// Resolves the scaler and classifier from disk, falling back to the hub.
pub struct ArtifactLoader {
    config: ArtifactConfig,
    hub: HubClient,
}

impl ArtifactLoader {
    pub fn new(config: ArtifactConfig) -> Self {
        let hub = HubClient::new(&config);
        Self { config, hub }
    }

    /// Returns `(model_path, scaler_path)`, downloading unless both exist locally.
    pub async fn resolve(&self) -> Result<(PathBuf, PathBuf), ArtifactError> {
        let model = self.config.local_model_path();
        let scaler = self.config.local_scaler_path();

        if exists(&model).await && exists(&scaler).await {
            info!(
                model = %model.display(),
                scaler = %scaler.display(),
                "Loading artifacts from local files"
            );
            return Ok((model, scaler));
        }

        info!(repo = %self.config.repo_id, "Local artifacts missing, fetching from hub");
        let model = self.hub.fetch(&self.config.model_file).await?;
        let scaler = self.hub.fetch(&self.config.scaler_file).await?;
        Ok((model, scaler))
    }

    async fn load_bundle(&self) -> Result<ModelBundle, ArtifactError> {
        let (model_path, scaler_path) = self.resolve().await?;

        let classifier = decode_classifier(&read(&model_path).await?, &model_path)?;
        let scaler = decode_scaler(&read(&scaler_path).await?, &scaler_path)?;

        Ok(ModelBundle::new(Box::new(scaler), classifier))
    }
}

#[async_trait]
impl ArtifactProvider for ArtifactLoader {
    async fn load(&self) -> Result<ModelBundle, PredictError> {
        Ok(self.load_bundle().await?)
    }
}

async fn exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}

async fn read(path: &Path) -> Result<Vec<u8>, ArtifactError> {
    tokio::fs::read(path).await.map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })
}
