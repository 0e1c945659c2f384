//! Runtime error types.

use autoapprove_config::ConfigError;
use autoapprove_github::GithubError;

/// Errors that abort an approval run.
///
/// Policy outcomes are never errors; these are missing or unreachable inputs.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// The policy file could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Pull request data could not be fetched, or the review not posted.
    #[error(transparent)]
    Github(#[from] GithubError),
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
