//! Error types for sigcheck-core

use std::path::PathBuf;

use crate::scope::ScopeLevel;

/// Result type for sigcheck-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error raised by an injected signature verifier.
pub type VerifierError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while resolving or enforcing a policy
///
/// A commit that fails verification is not an error: it is reported through
/// [`Verdict::Reject`](crate::enforce::Verdict::Reject).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A policy record violates the rules of its scope level
    #[error("Invalid {level} policy: {message}")]
    Configuration { level: ScopeLevel, message: String },

    /// The signature verifier could not determine a result for a commit
    #[error("Signature verification failed for commit {commit}: {source}")]
    VerificationCapability {
        commit: String,
        #[source]
        source: VerifierError,
    },

    /// I/O error while reading a policy or push document
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document extension is not one of the supported formats
    #[error("Unsupported document format: {extension}")]
    UnsupportedFormat { extension: String },

    /// JSON deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}

impl Error {
    pub fn configuration(level: ScopeLevel, message: impl Into<String>) -> Self {
        Self::Configuration {
            level,
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
