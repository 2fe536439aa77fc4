//! Error taxonomy surfaced by API calls.
//!
//! ERROR HANDLING
//! ==============
//! Every failure reaches the caller as an `ApiError`; nothing is swallowed.
//! `user_message` is what the notification and page views display.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use super::transport::TransportError;
use super::types::DEFAULT_ERROR_MESSAGE;

/// Fallback reason when a transport failure carries no message.
pub const DEFAULT_TRANSPORT_MESSAGE: &str = "请求失败";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// No usable response reached the client.
    #[error("{}", transport_message(.0))]
    Transport(#[from] TransportError),

    /// A response arrived with a non-success envelope code.
    #[error("{message}")]
    Application { code: Option<i64>, message: String },

    /// The server rejected the session token (code 401).
    #[error("{message}")]
    AuthExpired { message: String },

    /// The request body could not be serialized; nothing was sent.
    #[error("request encoding failed: {0}")]
    Encode(String),
}

impl ApiError {
    pub(crate) fn application(code: Option<i64>, message: Option<&str>) -> Self {
        Self::Application { code, message: message_or(message, DEFAULT_ERROR_MESSAGE) }
    }

    pub(crate) fn auth_expired(message: Option<&str>) -> Self {
        Self::AuthExpired { message: message_or(message, DEFAULT_ERROR_MESSAGE) }
    }

    /// Human-readable reason for notifications and views.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthExpired { .. })
    }
}

fn message_or(message: Option<&str>, default: &str) -> String {
    message.filter(|m| !m.is_empty()).unwrap_or(default).to_owned()
}

fn transport_message(err: &TransportError) -> String {
    let message = err.to_string();
    if message.is_empty() { DEFAULT_TRANSPORT_MESSAGE.to_owned() } else { message }
}
