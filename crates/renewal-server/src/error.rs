//! Application error types and Axum response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use renewal_core::PredictError;

/// Request-path errors with HTTP status code mapping.
#[derive(Debug)]
pub enum AppError {
    Predict(PredictError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        let AppError::Predict(e) = self;
        match e {
            PredictError::Load(_) => StatusCode::SERVICE_UNAVAILABLE,
            PredictError::Validation(_) | PredictError::Transform(_) | PredictError::Model(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<PredictError> for AppError {
    fn from(e: PredictError) -> Self {
        AppError::Predict(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let AppError::Predict(e) = self;
        (status, format!("ERROR: {e}")).into_response()
    }
}
