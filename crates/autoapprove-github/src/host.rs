//! Hosting service trait.
//!
//! Defines what the approval run needs from the service that hosts the
//! pull request: its commit history and a way to approve it.

use async_trait::async_trait;

use autoapprove_core::Commit;

use crate::error::GithubResult;
use crate::event::{PullRequestEvent, Repository};

/// Access to a pull request on its hosting service.
#[async_trait]
pub trait PullRequestHost: Send + Sync {
    /// Get the commits of the pull request with their file records, oldest
    /// first, in the order the service reports them.
    async fn pull_request_commits(&self, event: &PullRequestEvent) -> GithubResult<Vec<Commit>>;

    /// Submit an approving review with `reason` as its body.
    async fn approve(
        &self,
        repository: &Repository,
        number: u64,
        reason: &str,
    ) -> GithubResult<()>;
}

/// Lets `Box<dyn PullRequestHost>` be used wherever `H: PullRequestHost` is required.
#[async_trait]
impl PullRequestHost for Box<dyn PullRequestHost> {
    async fn pull_request_commits(&self, event: &PullRequestEvent) -> GithubResult<Vec<Commit>> {
        (**self).pull_request_commits(event).await
    }

    async fn approve(
        &self,
        repository: &Repository,
        number: u64,
        reason: &str,
    ) -> GithubResult<()> {
        (**self).approve(repository, number, reason).await
    }
}
