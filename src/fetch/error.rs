use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Structured rejection sent by the server in an error body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rejection {
    #[serde(default)]
    pub kind: Option<String>,
    /// Name of the form field the rejection applies to.
    #[serde(default, alias = "errorToken")]
    pub field_token: Option<String>,
    #[serde(default, alias = "errorMessage")]
    pub message: Option<String>,
}

impl Rejection {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.field_token.is_none() && self.message.is_none()
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (field: {}, kind: {})",
            self.message.as_deref().unwrap_or("no message"),
            self.field_token.as_deref().unwrap_or("-"),
            self.kind.as_deref().unwrap_or("-"),
        )
    }
}

/// Errors produced by a [`Fetcher`](super::Fetcher).
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The request never produced a response (connect, timeout, I/O).
    #[error("Request to '{url}' failed: {message}")]
    Transport { url: String, message: String },

    /// Non-2xx status without a structured body.
    #[error("Server answered with status {status}")]
    Status { status: u16 },

    /// The body could not be decoded.
    #[error("Malformed response body: {0}")]
    Malformed(String),

    /// Non-2xx status with a structured rejection body.
    #[error("Request rejected with status {status}: {rejection}")]
    Rejected { status: u16, rejection: Rejection },
}

/// How a failure should be surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureClass {
    /// Recoverable locally: mark the affected resource as errored.
    Transport,
    /// Show inline next to the named form field.
    FieldValidation { field: String, message: String },
    /// Show the global error modal.
    Unexpected,
}

impl FetchError {
    /// Build the error for a non-2xx response body.
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        match serde_json::from_slice::<Rejection>(body) {
            Ok(rejection) if !rejection.is_empty() => FetchError::Rejected { status, rejection },
            _ => FetchError::Status { status },
        }
    }

    /// Classify against the field tokens the calling form knows about.
    pub fn classify(&self, known_fields: &[&str]) -> FailureClass {
        match self {
            FetchError::Transport { .. } | FetchError::Status { .. } | FetchError::Malformed(_) => {
                FailureClass::Transport
            }
            FetchError::Rejected { rejection, .. } => match &rejection.field_token {
                Some(field) if known_fields.contains(&field.as_str()) => {
                    FailureClass::FieldValidation {
                        field: field.clone(),
                        message: rejection.message.clone().unwrap_or_default(),
                    }
                }
                _ => FailureClass::Unexpected,
            },
        }
    }
}
