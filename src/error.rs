//! Error types for yarn_release operations.
//!
//! Every failure surfaces synchronously to the immediate caller; nothing is
//! retried internally and nothing is silently swallowed.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for yarn_release operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all yarn_release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// Subprocess orchestration errors
    #[error("Subprocess error: {0}")]
    Process(#[from] ProcessError),

    /// Release preparation errors
    #[error("Prepare error: {0}")]
    Prepare(#[from] PrepareError),

    /// Registry authentication errors
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Package manifest errors
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Subprocess failures
#[derive(Error, Debug)]
pub enum ProcessError {
    /// Command exited with a non-zero status
    #[error("Command `{command}` failed with exit code {}: {stderr}", fmt_exit_code(.code))]
    Failed {
        /// Rendered command line
        command: String,
        /// Exit code, absent when the process was killed by a signal
        code: Option<i32>,
        /// Captured standard error
        stderr: String,
    },

    /// Command could not be spawned
    #[error("Failed to launch `{command}`: {source}")]
    Spawn {
        /// Rendered command line
        command: String,
        /// Underlying launch error
        #[source]
        source: std::io::Error,
    },

    /// Command not found on the search path
    #[error("Command `{command}` not found on PATH")]
    NotFound {
        /// Binary name that could not be resolved
        command: String,
    },
}

/// Release preparation errors
#[derive(Error, Debug)]
pub enum PrepareError {
    /// The pack output had no parseable tarball location
    #[error("Could not find the tarball path in the `yarn pack` output")]
    TarballPathNotFound,

    /// The produced tarball could not be moved into place
    #[error("Failed to move tarball from {} to {}: {source}", .from.display(), .to.display())]
    RelocationFailed {
        /// Path the pack command produced the tarball at
        from: PathBuf,
        /// Requested destination path
        to: PathBuf,
        /// Underlying filesystem error
        #[source]
        source: std::io::Error,
    },

    /// Prepare was invoked without a resolved release version
    #[error("No release version available to write into the manifest")]
    MissingReleaseVersion,
}

/// Registry authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Credentials failed identity verification against the registry
    #[error("Invalid npm token for registry {registry}: {detail}")]
    InvalidToken {
        /// Registry the identity check ran against
        registry: String,
        /// Preserved diagnostic of the underlying failure
        detail: String,
    },

    /// No usable credential source for the registry
    #[error(
        "No npm token specified for registry {registry}. Set NPM_TOKEN, or NPM_USERNAME, NPM_PASSWORD and NPM_EMAIL"
    )]
    MissingCredentials {
        /// Registry credentials were being staged for
        registry: String,
    },
}

/// Package manifest errors
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file could not be read
    #[error("Failed to read package.json at {}: {source}", .path.display())]
    Read {
        /// Path that was being read
        path: PathBuf,
        /// Underlying filesystem error
        #[source]
        source: std::io::Error,
    },

    /// Manifest file is not valid JSON
    #[error("Failed to parse package.json at {}: {source}", .path.display())]
    Parse {
        /// Path that was being parsed
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },
}

fn fmt_exit_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "unknown".to_string(),
    }
}

impl ReleaseError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ReleaseError::Auth(AuthError::MissingCredentials { .. }) => vec![
                "Export NPM_TOKEN with a token that has publish rights".to_string(),
                "Legacy registries accept NPM_USERNAME, NPM_PASSWORD and NPM_EMAIL instead"
                    .to_string(),
            ],
            ReleaseError::Auth(AuthError::InvalidToken { registry, .. }) => vec![
                format!("Verify the token is valid for {registry} and has not expired"),
                "Regenerate the token and update the NPM_TOKEN environment variable".to_string(),
            ],
            ReleaseError::Process(ProcessError::NotFound { command }) => vec![format!(
                "Install {command} or make sure it is reachable through PATH"
            )],
            ReleaseError::Prepare(PrepareError::TarballPathNotFound) => vec![
                "Check that the yarn version in use reports `Wrote tarball to \"...\"` on pack"
                    .to_string(),
            ],
            _ => vec![],
        }
    }
}
