//! Workflow event payload and repository coordinates.
//!
//! A `pull_request` (or `pull_request_target`) workflow receives the event
//! as JSON at `GITHUB_EVENT_PATH`. Only the fields needed for a decision
//! are extracted; their absence is a [`GithubError::MissingData`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use autoapprove_core::PullRequest;

use crate::error::{GithubError, GithubResult};

/// The pull request a workflow run was triggered for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestEvent {
    /// Pull request number.
    pub number: u64,
    /// Title; empty when the payload carries none.
    pub title: String,
    /// Login of the pull request author.
    pub author_login: String,
    /// API URL listing the pull request's commits.
    pub commits_url: String,
    /// Browser URL of the pull request.
    pub html_url: Option<String>,
}

#[derive(Deserialize)]
struct RawEvent {
    pull_request: Option<RawPullRequest>,
}

#[derive(Deserialize)]
struct RawPullRequest {
    number: Option<u64>,
    title: Option<String>,
    user: Option<RawUser>,
    commits_url: Option<String>,
    html_url: Option<String>,
}

#[derive(Deserialize)]
struct RawUser {
    login: Option<String>,
}

impl PullRequestEvent {
    /// Read and parse the event payload file.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::Io`] if the file cannot be read, and the errors
    /// of [`PullRequestEvent::from_json`] otherwise.
    pub fn from_path(path: &Path) -> GithubResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| GithubError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_json(&content)
    }

    /// Parse an event payload.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::InvalidPayload`] if the text is not a JSON
    /// object of the expected shape, and [`GithubError::MissingData`] if the
    /// payload has no pull request or the pull request lacks its number,
    /// author login or commits URL.
    pub fn from_json(content: &str) -> GithubResult<Self> {
        let raw: RawEvent = serde_json::from_str(content)
            .map_err(|e| GithubError::InvalidPayload(format!("event payload: {e}")))?;

        let pr = raw
            .pull_request
            .ok_or_else(|| missing("event payload missing `pull_request`"))?;

        let number = pr
            .number
            .ok_or_else(|| missing("pull request missing `number`"))?;
        let author_login = pr
            .user
            .and_then(|u| u.login)
            .filter(|login| !login.is_empty())
            .ok_or_else(|| missing("pull request missing `user.login`"))?;
        let commits_url = pr
            .commits_url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| missing("pull request missing `commits_url`"))?;

        Ok(Self {
            number,
            title: pr.title.unwrap_or_default(),
            author_login,
            commits_url,
            html_url: pr.html_url,
        })
    }

    /// The metadata the approval policy evaluates.
    #[must_use]
    pub fn to_pull_request(&self) -> PullRequest {
        PullRequest::new(self.title.clone(), self.author_login.clone()).with_number(self.number)
    }
}

fn missing(what: &str) -> GithubError {
    GithubError::MissingData(what.to_owned())
}

/// Repository coordinates, as in `GITHUB_REPOSITORY` (`owner/repo`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Repository {
    /// Owning user or organization.
    pub owner: String,
    /// Repository name.
    pub repo: String,
}

impl Repository {
    /// Create repository coordinates.
    #[must_use]
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl FromStr for Repository {
    type Err = GithubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
                Ok(Self::new(owner, repo))
            },
            _ => Err(GithubError::InvalidPayload(format!(
                "repository '{s}' is not of the form owner/repo"
            ))),
        }
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "action": "opened",
        "pull_request": {
            "number": 42,
            "title": "Bump serde",
            "user": {"login": "dependabot[bot]", "id": 1},
            "commits_url": "https://api.github.com/repos/o/r/pulls/42/commits",
            "html_url": "https://github.com/o/r/pull/42"
        }
    }"#;

    #[test]
    fn test_parse_event() {
        let event = PullRequestEvent::from_json(PAYLOAD).unwrap();
        assert_eq!(event.number, 42);
        assert_eq!(event.title, "Bump serde");
        assert_eq!(event.author_login, "dependabot[bot]");
        assert_eq!(
            event.commits_url,
            "https://api.github.com/repos/o/r/pulls/42/commits"
        );

        let pr = event.to_pull_request();
        assert_eq!(pr.number, 42);
        assert_eq!(pr.author_login, "dependabot[bot]");
    }

    #[test]
    fn test_missing_pull_request() {
        let err = PullRequestEvent::from_json(r#"{"action": "push"}"#).unwrap_err();
        assert!(matches!(err, GithubError::MissingData(ref m) if m.contains("pull_request")));
    }

    #[test]
    fn test_missing_login() {
        let json = r#"{"pull_request": {"number": 1, "user": {}, "commits_url": "u"}}"#;
        let err = PullRequestEvent::from_json(json).unwrap_err();
        assert!(matches!(err, GithubError::MissingData(ref m) if m.contains("user.login")));
    }

    #[test]
    fn test_missing_title_is_empty() {
        let json = r#"{"pull_request": {"number": 1, "user": {"login": "a"}, "commits_url": "u"}}"#;
        let event = PullRequestEvent::from_json(json).unwrap();
        assert_eq!(event.title, "");
        assert!(!event.to_pull_request().is_revert());
    }

    #[test]
    fn test_malformed_payload() {
        let err = PullRequestEvent::from_json("not json").unwrap_err();
        assert!(matches!(err, GithubError::InvalidPayload(_)));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("event.json");
        std::fs::write(&path, PAYLOAD).unwrap();

        let event = PullRequestEvent::from_path(&path).unwrap();
        assert_eq!(event.number, 42);

        let err = PullRequestEvent::from_path(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, GithubError::Io { .. }));
    }

    #[test]
    fn test_repository_parse() {
        let repo: Repository = "octo/widgets".parse().unwrap();
        assert_eq!(repo, Repository::new("octo", "widgets"));
        assert_eq!(repo.to_string(), "octo/widgets");

        assert!("octo".parse::<Repository>().is_err());
        assert!("/widgets".parse::<Repository>().is_err());
        assert!("octo/".parse::<Repository>().is_err());
        assert!("a/b/c".parse::<Repository>().is_err());
    }
}
