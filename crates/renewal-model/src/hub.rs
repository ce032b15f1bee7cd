//! Model hub download client with an on-disk snapshot cache.
//!
//! Cache layout mirrors the hub's own client:
//!
//! ```text
//! {cache_dir}/models--{owner}--{name}/snapshots/{revision}/{file}
//! ```

use std::path::{Path, PathBuf};

use renewal_config::ArtifactConfig;
use reqwest::Client;
use tracing::{debug, info};

use crate::artifact::ArtifactError;

/// Fetches files from one hub repository revision.
pub struct HubClient {
    client: Client,
    endpoint: String,
    repo_id: String,
    revision: String,
    cache_dir: PathBuf,
    token: Option<String>,
}

impl HubClient {
    pub fn new(config: &ArtifactConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.hub_endpoint.trim_end_matches('/').to_string(),
            repo_id: config.repo_id.clone(),
            revision: config.revision.clone(),
            cache_dir: config.cache_dir.clone(),
            token: config.hub_token.clone(),
        }
    }

    /// Download URL for `file`.
    pub fn file_url(&self, file: &str) -> String {
        format!(
            "{}/{}/resolve/{}/{}",
            self.endpoint, self.repo_id, self.revision, file
        )
    }

    /// Where `file` lives once cached.
    pub fn cache_path(&self, file: &str) -> PathBuf {
        self.cache_dir
            .join(format!("models--{}", self.repo_id.replace('/', "--")))
            .join("snapshots")
            .join(&self.revision)
            .join(file)
    }

    /// Returns the cached path of `file`, downloading it first if absent.
    pub async fn fetch(&self, file: &str) -> Result<PathBuf, ArtifactError> {
        let target = self.cache_path(file);
        if tokio::fs::try_exists(&target).await.unwrap_or(false) {
            debug!(path = %target.display(), "Using cached artifact");
            return Ok(target);
        }

        let url = self.file_url(file);
        info!(%url, "Downloading artifact");

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| download_error(file, e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(download_error(file, format!("{url} returned {status}")));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| download_error(file, e.to_string()))?;

        write_atomic(&target, &bytes).await?;
        info!(path = %target.display(), size = bytes.len(), "Artifact cached");
        Ok(target)
    }
}

/// Writes to a sibling temp file and renames it into place.
async fn write_atomic(target: &Path, bytes: &[u8]) -> Result<(), ArtifactError> {
    let io_err = |source| ArtifactError::Io {
        path: target.to_path_buf(),
        source,
    };

    if let Some(parent) = target.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
    }

    let mut partial = target.as_os_str().to_owned();
    partial.push(".incomplete");
    let partial = PathBuf::from(partial);

    tokio::fs::write(&partial, bytes).await.map_err(io_err)?;
    tokio::fs::rename(&partial, target).await.map_err(io_err)?;
    Ok(())
}

fn download_error(file: &str, reason: String) -> ArtifactError {
    ArtifactError::Download {
        file: file.to_string(),
        reason,
    }
}
