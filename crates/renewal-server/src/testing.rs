//! Stub artifacts for handler and service tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use renewal_core::{
    ArtifactProvider, Classifier, FormInput, ModelBundle, PredictError, Scaler, FEATURE_COUNT,
    SCALER_COLUMNS,
};
use tokio::sync::Notify;

#[derive(Default)]
struct Counters {
    load: AtomicUsize,
    scaler: AtomicUsize,
    model: AtomicUsize,
}

/// Observes how often the stub artifacts were used.
#[derive(Clone, Default)]
pub struct Probe(Arc<Counters>);

impl Probe {
    pub fn load_calls(&self) -> usize {
        self.0.load.load(Ordering::SeqCst)
    }

    pub fn scaler_calls(&self) -> usize {
        self.0.scaler.load(Ordering::SeqCst)
    }

    pub fn model_calls(&self) -> usize {
        self.0.model.load(Ordering::SeqCst)
    }
}

struct IdentityScaler(Probe);

impl Scaler for IdentityScaler {
    fn n_features(&self) -> usize {
        SCALER_COLUMNS
    }

    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, PredictError> {
        self.0 .0.scaler.fetch_add(1, Ordering::SeqCst);
        Ok(row.to_vec())
    }
}

struct FixedClassifier {
    probe: Probe,
    renewal: f64,
}

impl Classifier for FixedClassifier {
    fn n_features(&self) -> usize {
        FEATURE_COUNT
    }

    fn predict_proba(&self, _features: &[f64]) -> Result<[f64; 2], PredictError> {
        self.probe.0.model.fetch_add(1, Ordering::SeqCst);
        Ok([1.0 - self.renewal, self.renewal])
    }
}

/// Provider returning identity-scaler/fixed-probability artifacts, or an error.
pub struct StubProvider {
    probe: Probe,
    outcome: Result<f64, String>,
    gate: Option<Arc<Notify>>,
}

impl StubProvider {
    pub fn succeeding(renewal: f64) -> (Self, Probe) {
        let probe = Probe::default();
        let provider = Self { probe: probe.clone(), outcome: Ok(renewal), gate: None };
        (provider, probe)
    }

    pub fn failing(message: &str) -> (Self, Probe) {
        let probe = Probe::default();
        let provider = Self { probe: probe.clone(), outcome: Err(message.into()), gate: None };
        (provider, probe)
    }

    /// Like [`succeeding`](Self::succeeding), but blocks until the returned gate is notified.
    pub fn gated(renewal: f64) -> (Self, Probe, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let (mut provider, probe) = Self::succeeding(renewal);
        provider.gate = Some(gate.clone());
        (provider, probe, gate)
    }
}

#[async_trait::async_trait]
impl ArtifactProvider for StubProvider {
    async fn load(&self) -> Result<ModelBundle, PredictError> {
        self.probe.0.load.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let renewal = self.outcome.clone().map_err(PredictError::Load)?;
        Ok(ModelBundle::new(
            Box::new(IdentityScaler(self.probe.clone())),
            Box::new(FixedClassifier { probe: self.probe.clone(), renewal }),
        ))
    }
}

pub fn sample_input() -> FormInput {
    FormInput {
        perc_premium_paid_by_cash_credit: 0.3,
        income: 50_000.0,
        application_underwriting_score: 99.0,
        age_in_years: 45.0,
        total_late_payments: 2.0,
        has_late_payments: 1.0,
    }
}
