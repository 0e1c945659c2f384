//! File-change records as reported per commit.
//!
//! A [`Commit`] carries one [`FileChangeEvent`] per touched file. The
//! records are produced by the hosting service and are immutable here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle transition of a single file within one commit.
///
/// Parsed from the lowercase status string. Statuses outside the four
/// tracked kinds (e.g. `copied`, `changed`) are kept as [`FileStatus::Unknown`]
/// and skipped during reduction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FileStatus {
    /// The file was created.
    Added,
    /// The file content changed.
    Modified,
    /// The file was deleted.
    Removed,
    /// The file moved from `previous_filename` to `filename`.
    Renamed,
    /// Any status this crate does not track.
    Unknown(String),
}

impl FileStatus {
    /// The wire representation of this status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Added => "added",
            Self::Modified => "modified",
            Self::Removed => "removed",
            Self::Renamed => "renamed",
            Self::Unknown(status) => status,
        }
    }
}

impl From<String> for FileStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "added" => Self::Added,
            "modified" => Self::Modified,
            "removed" => Self::Removed,
            "renamed" => Self::Renamed,
            _ => Self::Unknown(status),
        }
    }
}

impl From<&str> for FileStatus {
    fn from(status: &str) -> Self {
        Self::from(status.to_owned())
    }
}

impl From<FileStatus> for String {
    fn from(status: FileStatus) -> Self {
        status.as_str().to_owned()
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One file record of one commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChangeEvent {
    /// What happened to the file.
    pub status: FileStatus,
    /// Current name of the file.
    pub filename: String,
    /// Name before the change; only meaningful for renames.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_filename: Option<String>,
}

impl FileChangeEvent {
    /// A file created under `filename`.
    #[must_use]
    pub fn added(filename: impl Into<String>) -> Self {
        Self::new(FileStatus::Added, filename)
    }

    /// A file whose content changed.
    #[must_use]
    pub fn modified(filename: impl Into<String>) -> Self {
        Self::new(FileStatus::Modified, filename)
    }

    /// A file deleted from the tree.
    #[must_use]
    pub fn removed(filename: impl Into<String>) -> Self {
        Self::new(FileStatus::Removed, filename)
    }

    /// A file moved from `previous` to `filename`.
    #[must_use]
    pub fn renamed(previous: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            status: FileStatus::Renamed,
            filename: filename.into(),
            previous_filename: Some(previous.into()),
        }
    }

    /// A record with an arbitrary status and no previous name.
    #[must_use]
    pub fn new(status: FileStatus, filename: impl Into<String>) -> Self {
        Self {
            status,
            filename: filename.into(),
            previous_filename: None,
        }
    }
}

/// A commit of the pull request, in history order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Commit hash, when the source reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    /// File records in the order the source lists them.
    #[serde(default)]
    pub files: Vec<FileChangeEvent>,
}

impl Commit {
    /// A commit with the given file records.
    #[must_use]
    pub fn new(files: Vec<FileChangeEvent>) -> Self {
        Self { sha: None, files }
    }

    /// Attach a commit hash.
    #[must_use]
    pub fn with_sha(mut self, sha: impl Into<String>) -> Self {
        self.sha = Some(sha.into());
        self
    }
}
