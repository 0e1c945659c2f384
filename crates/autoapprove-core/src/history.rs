//! File history reduction.
//!
//! [`reduce`] replays every [`FileChangeEvent`] of a pull request, commit by
//! commit and file by file, into one [`FileState`]: the net classification
//! of each touched file once the whole history has been applied.
//!
//! # Transitions
//!
//! | event | effect |
//! |---|---|
//! | `added` | into `added`, out of `modified`/`removed` |
//! | `modified` | into `modified` unless already `added` or `removed` |
//! | `removed` | drops an `added` file entirely, otherwise into `removed`; invalidates renames onto it |
//! | `renamed` | carries `added`/`modified` over to the new name, records and collapses the rename |
//!
//! Later events override earlier ones for the same name, so the order of
//! the input is significant. Unknown statuses are skipped.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::trace;

use crate::change::{Commit, FileChangeEvent, FileStatus};

/// Net classification of every file touched by a history.
///
/// A name is in at most one of `added`, `modified` and `removed`. `renamed`
/// maps the original name to the current one with chains collapsed, so
/// `A -> B -> C` is stored once as `A -> C`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileState {
    /// Files introduced by the history and still present.
    pub added: BTreeSet<String>,
    /// Pre-existing files whose content changed.
    pub modified: BTreeSet<String>,
    /// Pre-existing files that were deleted.
    pub removed: BTreeSet<String>,
    /// Original name to current name.
    pub renamed: BTreeMap<String, String>,
}

impl FileState {
    /// An empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a single event into the state.
    pub fn apply(&mut self, event: &FileChangeEvent) {
        let name = event.filename.as_str();
        trace!(status = %event.status, filename = name, "applying file change");

        match &event.status {
            FileStatus::Added => self.mark_added(name),
            FileStatus::Modified => self.mark_modified(name),
            FileStatus::Removed => self.mark_removed(name),
            FileStatus::Renamed => match event.previous_filename.as_deref() {
                Some(previous) => self.mark_renamed(previous, name),
                None => trace!(filename = name, "rename without previous filename, skipping"),
            },
            FileStatus::Unknown(status) => {
                trace!(filename = name, status = status.as_str(), "untracked status, skipping");
            },
        }
    }

    /// Fold every file record of a commit, in order.
    pub fn apply_commit(&mut self, commit: &Commit) {
        for event in &commit.files {
            self.apply(event);
        }
    }

    /// Whether no file is classified at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.modified.is_empty()
            && self.removed.is_empty()
            && self.renamed.is_empty()
    }

    /// Whether the history adds, removes or renames anything.
    #[must_use]
    pub fn has_structural_changes(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty() || !self.renamed.is_empty()
    }

    /// Whether `name` is classified, either in one of the sets or as the
    /// source or destination of a rename.
    #[must_use]
    pub fn touches(&self, name: &str) -> bool {
        self.added.contains(name)
            || self.modified.contains(name)
            || self.removed.contains(name)
            || self.renamed.contains_key(name)
            || self.renamed.values().any(|target| target == name)
    }

    /// Total number of classified entries.
    #[must_use]
    pub fn len(&self) -> usize {
        [
            self.added.len(),
            self.modified.len(),
            self.removed.len(),
            self.renamed.len(),
        ]
        .into_iter()
        .fold(0, usize::saturating_add)
    }

    fn mark_added(&mut self, name: &str) {
        self.removed.remove(name);
        self.modified.remove(name);
        self.added.insert(name.to_owned());
    }

    fn mark_modified(&mut self, name: &str) {
        // An added file stays added, and a removed one stays removed, however
        // often it changes afterwards.
        if self.added.contains(name) || self.removed.contains(name) {
            return;
        }
        self.modified.insert(name.to_owned());
    }

    fn mark_removed(&mut self, name: &str) {
        let was_added = self.added.remove(name);
        self.modified.remove(name);

        // Added then removed: the file never existed before the history.
        if !was_added {
            self.removed.insert(name.to_owned());
        }

        self.renamed.retain(|_, target| target != name);
    }

    fn mark_renamed(&mut self, previous: &str, name: &str) {
        let was_added = self.added.remove(previous);
        let was_modified = self.modified.remove(previous);
        self.removed.remove(previous);

        if was_added {
            self.mark_added(name);
        } else if was_modified {
            self.mark_modified(name);
        }

        self.renamed.insert(previous.to_owned(), name.to_owned());

        let mut collapsed = false;
        for target in self.renamed.values_mut() {
            if target == previous {
                name.clone_into(target);
                collapsed = true;
            }
        }
        if collapsed {
            self.renamed.remove(previous);
        }
    }
}

/// Reduce an ordered commit history into its net file state.
///
/// All files of one commit are applied before the next commit. The input is
/// neither reordered nor deduplicated.
#[must_use]
pub fn reduce(commits: &[Commit]) -> FileState {
    commits.iter().fold(FileState::new(), |mut state, commit| {
        state.apply_commit(commit);
        state
    })
}
