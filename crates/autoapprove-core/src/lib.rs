//! Autoapprove Core - net file classification and approval policy.
//!
//! Decides whether a pull request is approved automatically, in two steps:
//!
//! 1. **File history reduction** ([`history`]): the per-commit file records
//!    of the pull request are replayed into a [`FileState`], the net set of
//!    added, modified, removed and renamed files.
//! 2. **Policy evaluation** ([`policy`]): the [`FileState`] and the pull
//!    request metadata are checked against an [`ApprovalPolicy`], producing
//!    a [`Decision`].
//!
//! Everything here is synchronous and free of I/O. Fetching commits, loading
//! the policy file and posting reviews live in the surrounding crates.
//!
//! # Example
//!
//! ```
//! use autoapprove_core::{ApprovalPolicy, Commit, FileChangeEvent, PullRequest, evaluate};
//!
//! let policy = ApprovalPolicy::new("policy.json").with_author("dependabot[bot]");
//!
//! let history = vec![
//!     Commit::new(vec![FileChangeEvent::added("notes.txt")]),
//!     Commit::new(vec![FileChangeEvent::removed("notes.txt")]),
//! ];
//!
//! let decision = evaluate(&history, &PullRequest::new("Bump deps", "dependabot[bot]"), &policy);
//! assert!(decision.approve);
//! assert_eq!(decision.reason, "Approved for login");
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod change;
pub mod decision;
pub mod history;
pub mod policy;
pub mod request;

pub use change::{Commit, FileChangeEvent, FileStatus};
pub use decision::{Decision, Rule};
pub use history::{FileState, reduce};
pub use policy::{ApprovalPolicy, evaluate, evaluate_state};
pub use request::PullRequest;
