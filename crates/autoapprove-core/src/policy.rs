//! Approval policy: decides whether a pull request is auto-approved.
//!
//! The [`ApprovalPolicy`] is built once per run from the loaded policy file
//! and evaluated against the reduced [`FileState`] of the pull request.
//!
//! # Rule Order
//!
//! The first matching rule wins:
//!
//! 1. Title starts with `Revert`? -> approve
//! 2. Is the policy file itself added, modified, removed or renamed? -> skip
//! 3. Is the author in `allowed_authors`? -> approve
//! 4. Pure modifications that empty whole co-change groups only? -> approve
//! 5. Otherwise -> skip

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

use crate::change::Commit;
use crate::decision::{Decision, Rule};
use crate::history::{FileState, reduce};
use crate::request::PullRequest;

/// Approval policy for one repository.
///
/// # Example
///
/// ```
/// use autoapprove_core::{ApprovalPolicy, Commit, FileChangeEvent, PullRequest, evaluate};
///
/// let policy = ApprovalPolicy::new("policy.json")
///     .with_file_group(["schema.sql", "migration.sql"]);
///
/// let history = vec![Commit::new(vec![
///     FileChangeEvent::modified("schema.sql"),
///     FileChangeEvent::modified("migration.sql"),
/// ])];
///
/// let decision = evaluate(&history, &PullRequest::new("Update schema", "alice"), &policy);
/// assert!(decision.approve);
/// assert_eq!(decision.reason, "Approved for files");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalPolicy {
    /// Repository-relative path of the policy file. Changes to it are never
    /// auto-approved.
    pub config_path: String,

    /// Author logins that are approved regardless of the files touched.
    pub allowed_authors: Vec<String>,

    /// Co-change groups: each set must be modified completely or not at all.
    pub allowed_file_groups: Vec<BTreeSet<String>>,
}

impl ApprovalPolicy {
    /// A policy with no allowed authors and no file groups.
    #[must_use]
    pub fn new(config_path: impl Into<String>) -> Self {
        Self {
            config_path: config_path.into(),
            allowed_authors: Vec::new(),
            allowed_file_groups: Vec::new(),
        }
    }

    /// Add an allowed author login.
    #[must_use]
    pub fn with_author(mut self, login: impl Into<String>) -> Self {
        self.allowed_authors.push(login.into());
        self
    }

    /// Add a co-change group.
    #[must_use]
    pub fn with_file_group<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_file_groups
            .push(files.into_iter().map(Into::into).collect());
        self
    }

    /// Whether the history touches the policy file under its configured path.
    ///
    /// Matches the path in any of the three sets, or as either end of a rename.
    #[must_use]
    pub fn config_changed(&self, state: &FileState) -> bool {
        let path = self.config_path.as_str();
        state.modified.contains(path)
            || state.added.contains(path)
            || state.removed.contains(path)
            || state.renamed.contains_key(path)
            || state.renamed.values().any(|target| target == path)
    }

    /// Whether `login` exactly matches an allowed author.
    #[must_use]
    pub fn is_allowed_author(&self, login: &str) -> bool {
        self.allowed_authors.iter().any(|allowed| allowed == login)
    }

    /// Whether the change consists of whole co-change groups only.
    ///
    /// Fails when anything was added, removed or renamed, when a modified
    /// file belongs to no group, or when a group was only partly modified.
    #[must_use]
    pub fn allows_files(&self, state: &FileState) -> bool {
        if state.has_structural_changes() {
            debug!("structural file changes present");
            return false;
        }

        let mut groups: Vec<GroupProgress> = self
            .allowed_file_groups
            .iter()
            .map(GroupProgress::new)
            .collect();

        // A file listed in several groups belongs to the last of them.
        let mut owner: HashMap<&str, usize> = HashMap::new();
        for (index, group) in self.allowed_file_groups.iter().enumerate() {
            for file in group {
                owner.insert(file.as_str(), index);
            }
        }

        for file in &state.modified {
            let Some(group) = owner
                .get(file.as_str())
                .and_then(|&index| groups.get_mut(index))
            else {
                debug!(file = %file, "modified file outside all allowed groups");
                return false;
            };
            group.take(file);
        }

        if let Some(partial) = groups.iter().find(|g| g.is_partial()) {
            debug!(
                untouched = ?partial.remaining,
                "co-change group only partially modified"
            );
            return false;
        }

        true
    }

    /// Evaluate the rules against an already reduced file state.
    #[must_use]
    pub fn decide(&self, state: &FileState, pull_request: &PullRequest) -> Rule {
        if pull_request.is_revert() {
            Rule::Revert
        } else if self.config_changed(state) {
            Rule::ConfigChanged
        } else if self.is_allowed_author(&pull_request.author_login) {
            Rule::AllowedAuthor
        } else if self.allows_files(state) {
            Rule::AllowedFiles
        } else {
            Rule::Default
        }
    }
}

/// Working copy of one co-change group during [`ApprovalPolicy::allows_files`].
#[derive(Debug)]
struct GroupProgress {
    remaining: BTreeSet<String>,
    touched: bool,
}

impl GroupProgress {
    fn new(files: &BTreeSet<String>) -> Self {
        Self {
            remaining: files.clone(),
            touched: false,
        }
    }

    fn take(&mut self, file: &str) {
        if self.remaining.remove(file) {
            self.touched = true;
        }
    }

    /// Touched but not emptied.
    fn is_partial(&self) -> bool {
        self.touched && !self.remaining.is_empty()
    }
}

/// Evaluate a pull request against a policy.
///
/// Reduces `history` to its net [`FileState`] and applies the rules in order.
/// Every outcome, approve or skip, is a [`Decision`].
#[must_use]
pub fn evaluate(
    history: &[Commit],
    pull_request: &PullRequest,
    policy: &ApprovalPolicy,
) -> Decision {
    evaluate_state(&reduce(history), pull_request, policy)
}

/// Evaluate a pull request whose history was already reduced.
#[must_use]
pub fn evaluate_state(
    state: &FileState,
    pull_request: &PullRequest,
    policy: &ApprovalPolicy,
) -> Decision {
    let rule = policy.decide(state, pull_request);
    debug!(
        pull_request = pull_request.number,
        rule = %rule,
        added = state.added.len(),
        modified = state.modified.len(),
        removed = state.removed.len(),
        renamed = state.renamed.len(),
        "evaluated approval policy"
    );
    Decision::from(rule)
}
