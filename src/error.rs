// SPDX-License-Identifier: MIT

//! Adapter error types with structured JSON payloads.
//!
//! Every operation surfaces failures as a structured value rather than a
//! propagated fault: the tool layer renders an [`AdapterError`] with
//! [`AdapterError::to_value`] and returns it as an ordinary tool result.

use serde_json::{json, Value};
use std::path::PathBuf;

/// Adapter error type covering the four failure classes:
/// configuration, argument validation, upstream HTTP, and local I/O.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// Required credential missing or wrong type (client id/secret).
    #[error("{0}")]
    Config(String),

    /// Required argument missing, empty, or wrong shape.
    #[error("{0}")]
    Validation(String),

    /// Non-2xx response from Strava. Carries the raw body for diagnosis.
    #[error("{context}: HTTP {status_code}")]
    Upstream {
        context: &'static str,
        status_code: u16,
        response: String,
    },

    /// Request never produced a response (connect, TLS, body decode).
    #[error("{0}")]
    Transport(String),

    /// Token store read/write/decode failure.
    #[error("{message}")]
    Store { message: String, path: PathBuf },
}

impl AdapterError {
    /// Render the structured error payload returned to the caller.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Config(message) | Self::Validation(message) | Self::Transport(message) => {
                json!({ "error": message })
            }
            Self::Upstream {
                context,
                status_code,
                response,
            } => json!({
                "error": context,
                "status_code": status_code,
                "response": response,
            }),
            Self::Store { message, path } => json!({
                "error": message,
                "path": path.display().to_string(),
            }),
        }
    }
}

/// Result type alias for adapter operations.
pub type Result<T> = std::result::Result<T, AdapterError>;
