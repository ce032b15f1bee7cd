//! One-time artifact loading and the prediction entry point.

use std::sync::{Arc, OnceLock};

use renewal_core::{ArtifactProvider, FormInput, ModelBundle, PredictError, Prediction};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadState {
    NotStarted,
    Loaded,
    Failed,
}

/// Holds the artifacts once they are published.
///
/// Loading happens at most once; a failed load is never retried. Readers go
/// through the `OnceLock` and never touch the load mutex.
pub struct InferenceService {
    provider: Box<dyn ArtifactProvider>,
    bundle: OnceLock<ModelBundle>,
    state: Mutex<LoadState>,
}

impl InferenceService {
    pub fn new(provider: Box<dyn ArtifactProvider>) -> Self {
        Self {
            provider,
            bundle: OnceLock::new(),
            state: Mutex::new(LoadState::NotStarted),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.bundle.get().is_some()
    }

    /// Runs the provider unless a load already ran.
    pub async fn load(&self) {
        let mut state = self.state.lock().await;
        if *state != LoadState::NotStarted {
            return;
        }

        info!("Loading model artifacts");
        match self.provider.load().await {
            Ok(bundle) => {
                // Set at most once, under `state`.
                let _ = self.bundle.set(bundle);
                *state = LoadState::Loaded;
                info!("Model artifacts loaded");
            }
            Err(e) => {
                *state = LoadState::Failed;
                error!("Failed to load model artifacts: {}", e);
            }
        }
    }

    /// Starts [`load`](Self::load) on a background task.
    pub fn spawn_load(self: &Arc<Self>) -> JoinHandle<()> {
        let service = Arc::clone(self);
        tokio::spawn(async move { service.load().await })
    }

    /// Scores one request. Returns `None` while artifacts are not loaded.
    pub fn predict(&self, input: &FormInput) -> Option<Result<Prediction, PredictError>> {
        self.bundle.get().map(|bundle| bundle.predict(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_input, StubProvider};

    #[tokio::test]
    async fn test_not_ready_before_load() {
        let (provider, probe) = StubProvider::succeeding(0.7);
        let service = InferenceService::new(Box::new(provider));

        assert!(!service.is_ready());
        assert!(service.predict(&sample_input()).is_none());
        assert_eq!(probe.scaler_calls(), 0);
    }

    #[tokio::test]
    async fn test_load_publishes_bundle() {
        let (provider, probe) = StubProvider::succeeding(0.7);
        let service = InferenceService::new(Box::new(provider));

        service.load().await;

        assert!(service.is_ready());
        assert_eq!(*service.state.lock().await, LoadState::Loaded);
        let prediction = service.predict(&sample_input()).unwrap().unwrap();
        assert!((prediction.probability() - 0.7).abs() < 1e-12);
        assert_eq!(probe.scaler_calls(), 1);
        assert_eq!(probe.model_calls(), 1);
    }

    #[tokio::test]
    async fn test_load_is_idempotent() {
        let (provider, probe) = StubProvider::succeeding(0.7);
        let service = Arc::new(InferenceService::new(Box::new(provider)));

        let handles: Vec<_> = (0..4).map(|_| service.spawn_load()).collect();
        for handle in handles {
            handle.await.unwrap();
        }
        service.load().await;

        assert!(service.is_ready());
        assert_eq!(probe.load_calls(), 1);
    }

    #[tokio::test]
    async fn test_failed_load_is_permanent() {
        let (provider, probe) = StubProvider::failing("network unreachable");
        let service = InferenceService::new(Box::new(provider));

        service.load().await;
        service.load().await;

        assert!(!service.is_ready());
        assert_eq!(*service.state.lock().await, LoadState::Failed);
        assert_eq!(probe.load_calls(), 1);
        assert!(service.predict(&sample_input()).is_none());
    }
}
