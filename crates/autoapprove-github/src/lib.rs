//! Autoapprove GitHub - pull request data in, approving reviews out.
//!
//! The I/O edge of autoapprove:
//!
//! - [`PullRequestEvent`] and [`Repository`]: what the workflow run is about,
//!   read from the event payload and `GITHUB_REPOSITORY`.
//! - [`PullRequestHost`]: the seam the approval run depends on.
//! - [`GithubClient`]: the REST implementation of that seam. It lists the
//!   pull request commits, fetches each commit's file records in order and
//!   submits `APPROVE` reviews.
//!
//! No request is retried; any failure ends the run.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod client;
/// Error types and results for GitHub access.
pub mod error;
pub mod event;
pub mod host;

pub use client::{DEFAULT_API_URL, GithubClient};
pub use error::{GithubError, GithubResult};
pub use event::{PullRequestEvent, Repository};
pub use host::PullRequestHost;
