#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
//! Approval policy file loading for autoapprove.
//!
//! The policy file lives in the repository being checked. Its path is given
//! as a workflow input, relative to the workspace root, and is normalized to
//! the form GitHub reports changed files in, so the evaluator can refuse pull
//! requests that change the policy itself.
//!
//! # Usage
//!
//! ```rust,no_run
//! use autoapprove_config::Config;
//!
//! let resolved = Config::load(std::path::Path::new("."), ".github/auto-approve.json").unwrap();
//! println!("{} allowed authors", resolved.config.allowed_authors.len());
//! ```
//!
//! # Design
//!
//! This crate has **no dependencies on other internal autoapprove crates**.
//! Conversion into the evaluator's policy type happens at the runtime
//! boundary.

/// Configuration error types.
pub mod error;
/// Policy file discovery and loading.
pub mod loader;
/// Configuration struct definitions.
pub mod types;
/// Configuration validation rules.
pub mod validate;

// Re-export primary types at the crate root.
pub use error::{ConfigError, ConfigResult};
pub use types::*;

impl Config {
    /// Load the policy named by `config_path` under `workspace_root`.
    ///
    /// See [`loader::load`] for the full algorithm.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file is unreadable, malformed or
    /// fails validation.
    pub fn load(
        workspace_root: &std::path::Path,
        config_path: &str,
    ) -> ConfigResult<ResolvedConfig> {
        loader::load(workspace_root, config_path)
    }

    /// Load a policy from a single file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read, parsed, or fails
    /// validation.
    pub fn load_file(path: &std::path::Path) -> ConfigResult<Self> {
        loader::load_file(path)
    }
}
