//! GitHub Action entry point.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use autoapprove_config::Config;
use autoapprove_github::{GithubClient, PullRequestEvent, Repository};
use autoapprove_runtime::{ApprovalRun, policy_from_config};

/// Arguments of `autoapprove run`. Every flag falls back to the variable
/// GitHub Actions sets for it.
#[derive(Debug, Args)]
pub(crate) struct RunArgs {
    /// Token used to read the pull request and submit the review
    /// [fallback: `GITHUB_TOKEN`]
    #[arg(long, env = "INPUT_GITHUB-TOKEN", hide_env_values = true)]
    pub(crate) github_token: Option<String>,

    /// Policy file, relative to the workspace; empty for the default policy
    #[arg(long, env = "INPUT_CONFIG", default_value = "")]
    pub(crate) config: String,

    /// Repository checkout the policy file is read from
    #[arg(long, env = "GITHUB_WORKSPACE", default_value = ".")]
    pub(crate) workspace: PathBuf,

    /// Workflow event payload
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub(crate) event_path: Option<PathBuf>,

    /// Repository as `owner/repo`
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub(crate) repository: Option<String>,

    /// REST API endpoint
    #[arg(long, env = "GITHUB_API_URL")]
    pub(crate) api_url: Option<String>,

    /// Decide without submitting a review
    #[arg(long)]
    pub(crate) dry_run: bool,
}

fn github_token(args: &RunArgs) -> Result<String> {
    args.github_token
        .clone()
        .or_else(|| std::env::var("GITHUB_TOKEN").ok())
        .filter(|token| !token.trim().is_empty())
        .context("no GitHub token: pass --github-token or set the `github-token` input")
}

/// Evaluate the workflow's pull request and approve it if the policy allows.
pub(crate) async fn run_action(args: &RunArgs) -> Result<()> {
    let event_path = args
        .event_path
        .as_deref()
        .context("no event payload: pass --event-path or set GITHUB_EVENT_PATH")?;
    let event = PullRequestEvent::from_path(event_path)?;

    let repository: Repository = args
        .repository
        .as_deref()
        .context("no repository: pass --repository or set GITHUB_REPOSITORY")?
        .parse()?;

    let resolved = Config::load(&args.workspace, &args.config)?;
    if resolved.is_default() {
        info!("no policy file configured, using the default policy");
    }
    let policy = policy_from_config(&resolved);

    let mut client = GithubClient::new(github_token(args)?)?;
    if let Some(api_url) = &args.api_url {
        client = client.with_api_url(api_url);
    }

    let run = ApprovalRun::new(client, policy).dry_run(args.dry_run);
    let outcome = run
        .execute(&event, &repository)
        .await
        .with_context(|| format!("evaluating pull request #{}", event.number))?;

    if !outcome.decision.approve {
        println!("{}", outcome.decision.reason);
    } else if !outcome.reviewed {
        println!("{} (dry run)", outcome.decision.reason);
    }

    Ok(())
}
