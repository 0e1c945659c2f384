//! Shared test harness for integration tests.

use std::sync::Mutex;

use autoapprove_core::Commit;
use autoapprove_github::{GithubError, GithubResult, PullRequestEvent, PullRequestHost, Repository};
use tempfile::TempDir;

/// An approving review recorded by [`InMemoryHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub repository: String,
    pub number: u64,
    pub body: String,
}

/// Hosting service double serving a fixed commit history.
pub struct InMemoryHost {
    commits: Vec<Commit>,
    fail_with_missing: Option<String>,
    reviews: Mutex<Vec<Review>>,
}

#[allow(dead_code)]
impl InMemoryHost {
    pub fn new(commits: Vec<Commit>) -> Self {
        Self {
            commits,
            fail_with_missing: None,
            reviews: Mutex::new(Vec::new()),
        }
    }

    /// Fail every commit fetch with a `MissingData` error.
    pub fn missing(what: &str) -> Self {
        Self {
            fail_with_missing: Some(what.to_string()),
            ..Self::new(Vec::new())
        }
    }

    pub fn reviews(&self) -> Vec<Review> {
        self.reviews.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl PullRequestHost for InMemoryHost {
    async fn pull_request_commits(&self, _event: &PullRequestEvent) -> GithubResult<Vec<Commit>> {
        match &self.fail_with_missing {
            Some(what) => Err(GithubError::MissingData(what.clone())),
            None => Ok(self.commits.clone()),
        }
    }

    async fn approve(
        &self,
        repository: &Repository,
        number: u64,
        reason: &str,
    ) -> GithubResult<()> {
        self.reviews.lock().unwrap().push(Review {
            repository: repository.to_string(),
            number,
            body: reason.to_string(),
        });
        Ok(())
    }
}

/// Build a workflow event payload for a pull request.
#[allow(dead_code)]
pub fn event(number: u64, title: &str, login: &str) -> PullRequestEvent {
    let commits_url = format!("https://api.github.com/repos/octo/widgets/pulls/{number}/commits");
    let payload = serde_json::json!({
        "action": "synchronize",
        "pull_request": {
            "number": number,
            "title": title,
            "user": { "login": login },
            "commits_url": commits_url,
        }
    });
    PullRequestEvent::from_json(&payload.to_string()).unwrap()
}

#[allow(dead_code)]
pub fn repository() -> Repository {
    Repository::new("octo", "widgets")
}

/// A temporary repository checkout holding a policy file.
#[allow(dead_code)]
pub fn workspace_with(config_path: &str, content: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(config_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
    dir
}
