use std::path::PathBuf;

use thiserror::Error;

use crate::cli::orchestration::Step;

/// Unified error type for revbump operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Manifest {} has no version field", path.display())]
    MissingVersion { path: PathBuf },

    #[error(
        "Manifest {} has a version field that is not a string: {}",
        path.display(),
        found
    )]
    InvalidVersionField { path: PathBuf, found: String },

    #[error("Manifest {} is not a JSON object", path.display())]
    NotAnObject { path: PathBuf },

    #[error("Cannot access manifest {}: {}", path.display(), source)]
    ManifestIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse manifest {}: {}", path.display(), source)]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Step '{step}' failed: {message}")]
    VersionControl { step: Step, message: String },

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in revbump
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        ReleaseError::Remote(msg.into())
    }

    /// Create a manifest I/O error for the given path
    pub fn manifest_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReleaseError::ManifestIo {
            path: path.into(),
            source,
        }
    }

    /// Wrap a collaborator failure so the message names the workflow step
    pub fn version_control(step: Step, err: impl std::fmt::Display) -> Self {
        ReleaseError::VersionControl {
            step,
            message: err.to_string(),
        }
    }

    /// True when the error came out of a commit, push or tag operation
    pub fn is_version_control(&self) -> bool {
        matches!(self, ReleaseError::VersionControl { .. })
    }

    /// The workflow step that failed, if the error carries one
    pub fn failed_step(&self) -> Option<Step> {
        match self {
            ReleaseError::VersionControl { step, .. } => Some(*step),
            _ => None,
        }
    }
}
