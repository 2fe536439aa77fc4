//! Bias-check API operations.
//!
//! Thin wrappers that attach a JSON body to a `POST` and hand it to the
//! shared `RequestPipeline`. Success, error notification, and auth expiry
//! are all handled there.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde_json::Value;

use super::error::ApiError;
use super::request::RequestPipeline;
use super::transport::Transport;
use super::types::{FeedbackRequest, PredictRequest};

pub const PREDICT_PATH: &str = "/api/predict";
pub const FEEDBACK_PATH: &str = "/api/feedback";
pub const FEEDBACK_SUBMIT_PATH: &str = "/api/feedback/submit";

/// Check `text` for bias via `POST /api/predict`.
///
/// # Errors
///
/// Returns an [`ApiError`] when the call fails at any pipeline stage.
pub async fn check_bias<T: Transport>(client: &RequestPipeline<T>, text: &str) -> Result<Value, ApiError> {
    let body = PredictRequest { text: text.to_owned() };
    client.post(PREDICT_PATH, &body).await
}

/// Record whether a prediction was correct via `POST /api/feedback`.
///
/// # Errors
///
/// Returns an [`ApiError`] when the call fails at any pipeline stage.
pub async fn submit_feedback<T: Transport>(
    client: &RequestPipeline<T>,
    record_id: impl Into<Value>,
    is_correct: bool,
) -> Result<Value, ApiError> {
    let body = FeedbackRequest { record_id: record_id.into(), is_correct };
    client.post(FEEDBACK_PATH, &body).await
}

/// Pass a caller-built feedback object through to `POST /api/feedback/submit`.
///
/// # Errors
///
/// Returns an [`ApiError`] when the call fails at any pipeline stage.
pub async fn submit_feedback_raw<T: Transport>(client: &RequestPipeline<T>, payload: &Value) -> Result<Value, ApiError> {
    client.post(FEEDBACK_SUBMIT_PATH, payload).await
}
