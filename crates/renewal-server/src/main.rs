mod app;
mod dto;
mod error;
mod handlers;
mod services;
mod view;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use anyhow::Result;
use renewal_config::ServerConfig;
use renewal_model::ArtifactLoader;
use tracing::info;

use crate::services::inference::InferenceService;

pub struct ServerState {
    pub inference: Arc<InferenceService>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .compact()
        .init();

    let config = ServerConfig::from_env()?;
    info!(
        repo = %config.artifacts.repo_id,
        model = %config.artifacts.model_file,
        scaler = %config.artifacts.scaler_file,
        "Configuration loaded"
    );

    let loader = ArtifactLoader::new(config.artifacts.clone());
    let inference = Arc::new(InferenceService::new(Box::new(loader)));
    inference.spawn_load();

    let state = Arc::new(ServerState { inference });
    let app = app::router(state);

    let addr = config.bind_addr();
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
