//! Pull request metadata consumed by the evaluator.

use serde::{Deserialize, Serialize};

/// The parts of a pull request the policy looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// Pull request number within its repository.
    #[serde(default)]
    pub number: u64,
    /// Pull request title.
    #[serde(default)]
    pub title: String,
    /// Account login of the author.
    pub author_login: String,
}

impl PullRequest {
    /// Create pull request metadata with number 0.
    #[must_use]
    pub fn new(title: impl Into<String>, author_login: impl Into<String>) -> Self {
        Self {
            number: 0,
            title: title.into(),
            author_login: author_login.into(),
        }
    }

    /// Set the pull request number.
    #[must_use]
    pub fn with_number(mut self, number: u64) -> Self {
        self.number = number;
        self
    }

    /// Whether the title marks this as a revert (`Revert` prefix, case-sensitive).
    #[must_use]
    pub fn is_revert(&self) -> bool {
        self.title.starts_with("Revert")
    }
}
