//! Autoapprove Runtime - ties the policy to a hosting service.
//!
//! [`ApprovalRun`] fetches a pull request's commits through a
//! [`PullRequestHost`](autoapprove_github::PullRequestHost), folds them into a
//! [`FileState`](autoapprove_core::FileState), evaluates the policy and submits
//! an approving review when the policy allows it.
//!
//! [`policy_from_config`] converts the loaded policy file into the evaluator's
//! [`ApprovalPolicy`](autoapprove_core::ApprovalPolicy).

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod bridge;
pub mod error;
pub mod run;

pub use bridge::{load_policy, policy_from_config};
pub use error::{RuntimeError, RuntimeResult};
pub use run::{ApprovalRun, RunOutcome};
