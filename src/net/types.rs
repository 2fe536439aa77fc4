//! Wire types for the bias-check API.
//!
//! Every response body is an `Envelope`; request bodies are small typed
//! structs serialized to JSON.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope codes that mean success.
pub const SUCCESS_CODES: [i64; 2] = [0, 200];
/// Envelope code that means the session token is no longer valid.
pub const AUTH_EXPIRED_CODE: i64 = 401;
/// Fallback reason when a failed envelope carries no message.
pub const DEFAULT_ERROR_MESSAGE: &str = "Error";

/// Uniform `{ code, message, data }` response wrapper.
///
/// Read field by field from the parsed body: a `code` written as a whole
/// float still counts, and a non-string `message` is ignored rather than
/// discarding the envelope.
#[derive(Clone, Debug, PartialEq)]
pub struct Envelope {
    pub code: i64,
    pub message: Option<String>,
    pub data: Value,
}

impl Envelope {
    /// Extract an envelope from a response body. `None` when there is no
    /// integral `code`.
    pub fn parse(body: &Value) -> Option<Self> {
        let code = body.get("code").and_then(integral_code)?;
        let message = body.get("message").and_then(Value::as_str).map(str::to_owned);
        let data = body.get("data").cloned().unwrap_or(Value::Null);
        Some(Self { code, message, data })
    }

    pub fn is_success(&self) -> bool {
        SUCCESS_CODES.contains(&self.code)
    }

    pub fn is_auth_expired(&self) -> bool {
        self.code == AUTH_EXPIRED_CODE
    }
}

#[allow(clippy::cast_possible_truncation)]
fn integral_code(raw: &Value) -> Option<i64> {
    raw.as_i64().or_else(|| {
        let f = raw.as_f64()?;
        (f.fract() == 0.0 && f.abs() < 9.0e15).then_some(f as i64)
    })
}

/// Body of `POST /api/predict`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub text: String,
}

/// Body of `POST /api/feedback`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub record_id: Value,
    pub is_correct: bool,
}
