use serde::{Deserialize, Serialize};
use std::fs;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

/// Environment variable naming an optional JSON config file.
pub const CONFIG_FILE_ENV: &str = "RENEWAL_CONFIG";

// ─────────────────────────────────────────────────────────────────────────────
// Error
// ─────────────────────────────────────────────────────────────────────────────

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

// ─────────────────────────────────────────────────────────────────────────────
// Artifact Config
// ─────────────────────────────────────────────────────────────────────────────

/// Where the scaler and classifier artifacts come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    /// Classifier artifact file name, both locally and in the hub repository.
    pub model_file: String,
    /// Scaler artifact file name, both locally and in the hub repository.
    pub scaler_file: String,
    /// Directory checked first for both files.
    pub local_dir: PathBuf,
    /// Hub repository id, `owner/name`.
    pub repo_id: String,
    pub revision: String,
    pub hub_endpoint: String,
    /// Root of the download cache.
    pub cache_dir: PathBuf,
    #[serde(skip_serializing)]
    pub hub_token: Option<String>,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            model_file: "insurance_renewal_model.json".into(),
            scaler_file: "scaler.json".into(),
            local_dir: PathBuf::from("."),
            repo_id: "sophie-muriel/renovacion-seguros".into(),
            revision: "main".into(),
            hub_endpoint: "https://huggingface.co".into(),
            cache_dir: PathBuf::from("."),
            hub_token: None,
        }
    }
}

impl ArtifactConfig {
    pub fn local_model_path(&self) -> PathBuf {
        self.local_dir.join(&self.model_file)
    }

    pub fn local_scaler_path(&self) -> PathBuf {
        self.local_dir.join(&self.scaler_file)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Server Config
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub artifacts: ArtifactConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            artifacts: ArtifactConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Loads defaults, then the file named by `RENEWAL_CONFIG`, then environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = match std::env::var_os(CONFIG_FILE_ENV) {
            Some(path) => Self::load_file(Path::new(&path))?,
            None => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Applies overrides from `lookup`, keyed by environment variable name.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT",
                value: port.clone(),
            })?;
        }

        let artifacts = &mut self.artifacts;
        set_string(&mut artifacts.model_file, lookup("MODEL_FILE"));
        set_string(&mut artifacts.scaler_file, lookup("SCALER_FILE"));
        set_string(&mut artifacts.repo_id, lookup("HF_REPO_ID"));
        set_string(&mut artifacts.revision, lookup("HF_REVISION"));
        set_string(&mut artifacts.hub_endpoint, lookup("HF_ENDPOINT"));

        if let Some(dir) = lookup("ARTIFACT_DIR").filter(|v| !v.is_empty()) {
            artifacts.local_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("HF_CACHE_DIR").filter(|v| !v.is_empty()) {
            artifacts.cache_dir = PathBuf::from(dir);
        }
        if let Some(token) = lookup("HF_TOKEN").filter(|v| !v.is_empty()) {
            artifacts.hub_token = Some(token);
        }

        if artifacts.repo_id.split('/').count() != 2 {
            return Err(ConfigError::InvalidValue {
                key: "HF_REPO_ID",
                value: artifacts.repo_id.clone(),
            });
        }

        Ok(self)
    }

    /// Listen address; all interfaces.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

fn set_string(slot: &mut String, value: Option<String>) {
    if let Some(v) = value.filter(|v| !v.is_empty()) {
        *slot = v;
    }
}
