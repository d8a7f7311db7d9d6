//! Error types for the beacon client.
//!
//! # Design
//! Two failure kinds reach callers. `Transport` covers everything below the
//! envelope: network errors, timeouts, non-2xx responses without a readable
//! envelope, and bodies that do not deserialize. `Application` is a parsed
//! envelope whose `code` is not 200. Both carry the text that was shown to
//! the user, so callers can branch on the variant instead of the message.

use thiserror::Error;

/// Shown when a failure carries no message of its own.
pub const FALLBACK_MESSAGE: &str = "Request failed";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The exchange itself failed or produced an unusable response.
    #[error("{message}")]
    Transport { message: String, status: Option<u16> },

    /// The backend answered with a non-200 envelope code.
    #[error("{message}")]
    Application { code: i64, message: String },
}

impl ApiError {
    pub fn transport(message: impl Into<String>, status: Option<u16>) -> Self {
        ApiError::Transport {
            message: or_fallback(message.into()),
            status,
        }
    }

    pub fn application(code: i64, message: impl Into<String>) -> Self {
        ApiError::Application {
            code,
            message: or_fallback(message.into()),
        }
    }

    /// The user-facing text for this failure.
    pub fn message(&self) -> &str {
        match self {
            ApiError::Transport { message, .. } | ApiError::Application { message, .. } => message,
        }
    }

    /// HTTP status of the failed exchange, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Transport { status, .. } => *status,
            ApiError::Application { .. } => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport { .. })
    }
}

fn or_fallback(message: String) -> String {
    if message.trim().is_empty() {
        FALLBACK_MESSAGE.to_string()
    } else {
        message
    }
}
