//! Prediction form handler.

use std::sync::Arc;

use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::response::Html;
use axum::Form;
use renewal_core::{FormInput, PredictError, LOADING_MESSAGE};
use tracing::{error, info};

use crate::error::AppError;
use crate::view::render_page;
use crate::ServerState;

/// POST /predict - Scores the submitted form.
///
/// Readiness is checked before the body is looked at, so a request made
/// while artifacts are loading always gets the loading page. A field sent
/// more than once takes its first value.
pub async fn predict(
    State(state): State<Arc<ServerState>>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Result<Html<String>, AppError> {
    if !state.inference.is_ready() {
        info!("Prediction requested before artifacts loaded");
        return Ok(Html(render_page(Some(LOADING_MESSAGE))));
    }

    let result = form
        .map_err(|e| PredictError::Validation(e.body_text()))
        .and_then(|Form(pairs)| FormInput::from_pairs(pairs))
        .and_then(|input| {
            state
                .inference
                .predict(&input)
                .unwrap_or_else(|| Err(PredictError::Load("artifacts not loaded".into())))
        });

    let prediction = result.map_err(|e| {
        error!("Prediction failed: {}", e);
        AppError::from(e)
    })?;

    info!(
        probability = prediction.probability(),
        verdict = ?prediction.verdict(),
        "Prediction served"
    );
    Ok(Html(render_page(Some(&prediction.to_string()))))
}
