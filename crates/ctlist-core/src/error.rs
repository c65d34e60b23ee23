//! Error types for log-list conversion.

use crate::der::DerError;

/// Conversion errors.
///
/// Every variant is fatal to a run: no artifact is emitted once any of
/// them has been raised.
#[derive(Debug, thiserror::Error)]
pub enum CtListError {
    /// The log list or its signature could not be retrieved, or the
    /// signature did not verify.
    #[error("fetch/verify failed: {message}")]
    FetchOrVerify { message: String },

    /// The log list is not valid JSON, or a field is missing or mistyped.
    #[error("malformed log list: {message}")]
    JsonShape { message: String },

    /// A log references an operator id absent from `operators`.
    #[error("unknown operator reference {operator} in log {log:?}")]
    UnknownOperator { operator: String, log: String },

    /// A log's `key` field is not valid base64.
    #[error("invalid base64 key in log {log:?}: {message}")]
    Base64Decode { log: String, message: String },

    /// A log's key is not a well-formed SubjectPublicKeyInfo.
    #[error("invalid SPKI in log {log:?}")]
    Der {
        log: String,
        #[source]
        source: DerError,
    },

    /// Configuration error.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Local I/O failure outside fetching (e.g. writing the artifact).
    #[error("i/o error: {message}")]
    Io { message: String },
}

impl CtListError {
    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } => 1,

            // Untrusted or unavailable input
            Self::FetchOrVerify { .. } => 3,

            // Malformed input
            Self::JsonShape { .. } => 4,
            Self::UnknownOperator { .. } => 4,
            Self::Base64Decode { .. } => 4,
            Self::Der { .. } => 4,

            Self::Io { .. } => 5,
        }
    }

    /// Whether the error came from the log list content itself rather
    /// than from the environment.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            Self::JsonShape { .. }
                | Self::UnknownOperator { .. }
                | Self::Base64Decode { .. }
                | Self::Der { .. }
        )
    }
}

/// Result type for conversion operations.
pub type CtListResult<T> = Result<T, CtListError>;
