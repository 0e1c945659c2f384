//! One approval run: fetch, fold, decide and review.

use serde::Serialize;
use tracing::{debug, info};

use autoapprove_core::{ApprovalPolicy, Decision, FileState, evaluate_state, reduce};
use autoapprove_github::{PullRequestEvent, PullRequestHost, Repository};

use crate::error::RuntimeResult;

/// What an approval run decided and did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunOutcome {
    /// The policy decision.
    pub decision: Decision,
    /// The folded file history the decision was made on.
    pub state: FileState,
    /// Whether an approving review was submitted.
    pub reviewed: bool,
}

/// Evaluates pull requests against a policy and approves the ones it allows.
#[derive(Debug)]
pub struct ApprovalRun<H> {
    host: H,
    policy: ApprovalPolicy,
    dry_run: bool,
}

impl<H: PullRequestHost> ApprovalRun<H> {
    /// Create a run that approves through `host`.
    pub fn new(host: H, policy: ApprovalPolicy) -> Self {
        Self {
            host,
            policy,
            dry_run: false,
        }
    }

    /// Decide without submitting reviews.
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// The policy in use.
    pub fn policy(&self) -> &ApprovalPolicy {
        &self.policy
    }

    /// The hosting service in use.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Run the pull request in `event` through the policy.
    ///
    /// The full commit history is fetched before any rule is checked. An
    /// approving decision submits a review with the decision's reason as its
    /// body unless this is a dry run; a skip never touches the pull request.
    ///
    /// # Errors
    ///
    /// Returns an error if the commits cannot be fetched or the review cannot
    /// be submitted. No partial decision is made in either case.
    #[tracing::instrument(skip_all, fields(pull_request = event.number, repository = %repository))]
    pub async fn execute(
        &self,
        event: &PullRequestEvent,
        repository: &Repository,
    ) -> RuntimeResult<RunOutcome> {
        let commits = self.host.pull_request_commits(event).await?;
        let state = reduce(&commits);
        debug!(commits = commits.len(), files = state.len(), "folded commit history");

        let decision = evaluate_state(&state, &event.to_pull_request(), &self.policy);
        info!(
            approve = decision.approve,
            rule = %decision.rule,
            reason = %decision.reason,
            "decision"
        );

        let reviewed = if decision.approve && !self.dry_run {
            self.host
                .approve(repository, event.number, &decision.reason)
                .await?;
            true
        } else {
            if decision.approve {
                info!("dry run, not submitting review");
            }
            false
        };

        Ok(RunOutcome {
            decision,
            state,
            reviewed,
        })
    }
}
