//! Approval decisions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The policy rule that produced a [`Decision`], in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Title starts with `Revert`.
    Revert,
    /// The policy file itself is part of the change.
    ConfigChanged,
    /// The author is on the allow list.
    AllowedAuthor,
    /// Only whole co-change groups were modified.
    AllowedFiles,
    /// Nothing matched.
    Default,
}

impl Rule {
    /// Whether a match of this rule approves the pull request.
    #[must_use]
    pub fn approves(self) -> bool {
        matches!(self, Self::Revert | Self::AllowedAuthor | Self::AllowedFiles)
    }

    /// The human-readable reason reported for this rule.
    #[must_use]
    pub fn reason(self) -> &'static str {
        match self {
            Self::Revert => "Approved for revert pull request",
            Self::ConfigChanged => "Auto-approve config changed",
            Self::AllowedAuthor => "Approved for login",
            Self::AllowedFiles => "Approved for files",
            Self::Default => "Skip auto-approve",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Revert => "revert",
            Self::ConfigChanged => "config_changed",
            Self::AllowedAuthor => "allowed_author",
            Self::AllowedFiles => "allowed_files",
            Self::Default => "default",
        };
        f.write_str(name)
    }
}

/// Outcome of evaluating one pull request: approve or skip, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Whether to submit an approving review.
    pub approve: bool,
    /// Reason, used as the review body or printed on skip.
    pub reason: String,
    /// Rule that decided.
    pub rule: Rule,
}

impl Decision {
    /// Whether the pull request should be approved.
    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.approve
    }

    /// The decision as an `(approve, reason)` pair.
    #[must_use]
    pub fn as_pair(&self) -> (bool, &str) {
        (self.approve, &self.reason)
    }
}

impl From<Rule> for Decision {
    fn from(rule: Rule) -> Self {
        Self {
            approve: rule.approves(),
            reason: rule.reason().to_owned(),
            rule,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.approve { "approve" } else { "skip" };
        write!(f, "{verdict}: {}", self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_outcomes() {
        assert_eq!(
            Decision::from(Rule::Revert).as_pair(),
            (true, "Approved for revert pull request")
        );
        assert_eq!(
            Decision::from(Rule::ConfigChanged).as_pair(),
            (false, "Auto-approve config changed")
        );
        assert_eq!(
            Decision::from(Rule::AllowedAuthor).as_pair(),
            (true, "Approved for login")
        );
        assert_eq!(
            Decision::from(Rule::AllowedFiles).as_pair(),
            (true, "Approved for files")
        );
        assert_eq!(
            Decision::from(Rule::Default).as_pair(),
            (false, "Skip auto-approve")
        );
    }

    #[test]
    fn test_decision_display() {
        assert_eq!(
            Decision::from(Rule::AllowedFiles).to_string(),
            "approve: Approved for files"
        );
        assert_eq!(
            Decision::from(Rule::Default).to_string(),
            "skip: Skip auto-approve"
        );
    }

    #[test]
    fn test_decision_serialization() {
        let json = serde_json::to_string(&Decision::from(Rule::ConfigChanged)).unwrap();
        assert_eq!(
            json,
            r#"{"approve":false,"reason":"Auto-approve config changed","rule":"config_changed"}"#
        );
    }
}
