//! Error types for the Nautes core

use thiserror::Error;

/// Errors raised while building, sending or rendering resource requests
#[derive(Error, Debug)]
pub enum NautesError {
    #[error("failed to decode {context}: {message}")]
    Decode { context: String, message: String },

    #[error("{field} field not found in {kind} spec")]
    FieldNotFound { kind: String, field: String },

    #[error("field {field} of {kind} must be a string, found {found}")]
    TypeMismatch {
        kind: String,
        field: String,
        found: String,
    },

    #[error("error sending {method} request to {url}: {message}")]
    Transport {
        method: String,
        url: String,
        message: String,
    },

    #[error("failed to operate {kind} ({method} {url}, status {status}):\n{body}")]
    RemoteRejected {
        kind: String,
        method: String,
        url: String,
        status: u16,
        body: String,
    },

    #[error("unknown output format: {0} (expected one of: json|yaml|wide)")]
    UnknownOutputFormat(String),

    #[error("unknown resource kind: {0}")]
    UnknownKind(String),

    #[error("column `{from}` merges into `{to}`, but no column is named `{to}`")]
    UnresolvedMerge { from: String, to: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NautesError {
    pub fn decode(context: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Decode {
            context: context.into(),
            message: err.to_string(),
        }
    }

    /// Malformed input that would corrupt every following request.
    ///
    /// Batch loops abort on these and keep going on everything else.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Decode { .. } | Self::FieldNotFound { .. } | Self::TypeMismatch { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, NautesError>;
