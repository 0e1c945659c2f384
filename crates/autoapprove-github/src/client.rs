//! GitHub REST implementation of [`PullRequestHost`].

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

use autoapprove_core::{Commit, FileChangeEvent, FileStatus};

use crate::error::{GithubError, GithubResult};
use crate::event::{PullRequestEvent, Repository};
use crate::host::PullRequestHost;

/// Default REST endpoint, overridden by `GITHUB_API_URL` on GitHub Enterprise.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("autoapprove/", env!("CARGO_PKG_VERSION"));
const API_VERSION: &str = "2022-11-28";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Page size for the pull request commit list.
const PER_PAGE: usize = 100;

/// GitHub lists at most 250 commits per pull request.
const MAX_PAGES: u32 = 3;

/// Entry of the pull request commit list.
#[derive(Debug, Deserialize)]
struct CommitRef {
    sha: String,
    url: String,
}

/// Commit detail as returned by the API, before validation.
#[derive(Debug, Deserialize)]
struct RawCommit {
    sha: Option<String>,
    #[serde(default)]
    files: Vec<RawFile>,
}

#[derive(Debug, Deserialize)]
struct RawFile {
    filename: Option<String>,
    status: Option<String>,
    previous_filename: Option<String>,
}

#[derive(Debug, serde::Serialize)]
struct ReviewRequest<'a> {
    event: &'static str,
    body: &'a str,
}

/// Authenticated GitHub REST client.
pub struct GithubClient {
    client: Client,
    api_url: String,
    token: String,
}

impl fmt::Debug for GithubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GithubClient")
            .field("api_url", &self.api_url)
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl GithubClient {
    /// Create a client authenticating with `token` against [`DEFAULT_API_URL`].
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::MissingData`] for an empty token and
    /// [`GithubError::Http`] if the HTTP client cannot be built.
    pub fn new(token: impl Into<String>) -> GithubResult<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(GithubError::MissingData("GitHub token is empty".to_owned()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("X-GitHub-Api-Version", HeaderValue::from_static(API_VERSION));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            api_url: DEFAULT_API_URL.to_owned(),
            token,
        })
    }

    /// Use a different REST endpoint (GitHub Enterprise).
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// The REST endpoint in use.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn get(&self, url: &str) -> RequestBuilder {
        self.client.get(url).bearer_auth(&self.token)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        url: &str,
        request: RequestBuilder,
    ) -> GithubResult<T> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GithubError::Api {
                status: status.as_u16(),
                url: url.to_owned(),
                message: response.text().await.unwrap_or_default(),
            });
        }
        response
            .json()
            .await
            .map_err(|e| GithubError::InvalidPayload(format!("{url}: {e}")))
    }

    /// List the commits of a pull request, following pagination.
    async fn list_commits(&self, commits_url: &str) -> GithubResult<Vec<CommitRef>> {
        let mut commits = Vec::new();
        for page in 1..=MAX_PAGES {
            let request = self
                .get(commits_url)
                .query(&[("per_page", PER_PAGE.to_string()), ("page", page.to_string())]);
            let batch: Vec<CommitRef> = self.send_json(commits_url, request).await?;
            let last = batch.len() < PER_PAGE;
            commits.extend(batch);
            if last {
                break;
            }
        }
        Ok(commits)
    }

    /// Fetch one commit with its file records.
    async fn commit(&self, url: &str) -> GithubResult<Commit> {
        let raw: RawCommit = self.send_json(url, self.get(url)).await?;
        validate_commit(raw)
    }
}

/// Convert a commit detail into a [`Commit`], rejecting file records the
/// reducer cannot interpret.
fn validate_commit(raw: RawCommit) -> GithubResult<Commit> {
    let sha = raw.sha.as_deref().unwrap_or("<unknown>");
    let mut files = Vec::with_capacity(raw.files.len());

    for file in raw.files {
        let Some(filename) = file.filename.filter(|name| !name.is_empty()) else {
            return Err(GithubError::MissingData(format!(
                "commit {sha} has a file record without `filename`"
            )));
        };
        let Some(status) = file.status else {
            return Err(GithubError::MissingData(format!(
                "commit {sha} has no `status` for {filename}"
            )));
        };

        let status = FileStatus::from(status);
        let previous_filename = file.previous_filename.filter(|name| !name.is_empty());
        if status == FileStatus::Renamed && previous_filename.is_none() {
            return Err(GithubError::MissingData(format!(
                "commit {sha} renames {filename} without `previous_filename`"
            )));
        }

        files.push(FileChangeEvent {
            status,
            filename,
            previous_filename,
        });
    }

    let commit = Commit::new(files);
    Ok(match raw.sha {
        Some(sha) => commit.with_sha(sha),
        None => commit,
    })
}

#[async_trait]
impl PullRequestHost for GithubClient {
    async fn pull_request_commits(&self, event: &PullRequestEvent) -> GithubResult<Vec<Commit>> {
        let refs = self.list_commits(&event.commits_url).await?;
        debug!(pull_request = event.number, count = refs.len(), "listed pull request commits");

        let mut commits = Vec::with_capacity(refs.len());
        for commit_ref in refs {
            debug!(sha = %commit_ref.sha, "fetching commit");
            let commit = self.commit(&commit_ref.url).await?;
            commits.push(commit);
        }
        Ok(commits)
    }

    async fn approve(
        &self,
        repository: &Repository,
        number: u64,
        reason: &str,
    ) -> GithubResult<()> {
        let url = format!(
            "{}/repos/{}/{}/pulls/{number}/reviews",
            self.api_url, repository.owner, repository.repo
        );
        debug!(pull_request = number, "creating approving review");

        let request = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&ReviewRequest {
                event: "APPROVE",
                body: reason,
            });
        let _review: serde_json::Value = self.send_json(&url, request).await?;

        info!(pull_request = number, repository = %repository, "approved pull request");
        Ok(())
    }
}
