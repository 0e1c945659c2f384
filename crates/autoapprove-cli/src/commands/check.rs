//! Offline evaluation of a recorded pull request.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use autoapprove_core::{Commit, Decision, FileState, evaluate_state, reduce};
use autoapprove_github::PullRequestEvent;
use autoapprove_runtime::load_policy;

/// Arguments of `autoapprove check`.
#[derive(Debug, Args)]
pub(crate) struct CheckArgs {
    /// Workflow event payload containing the pull request
    #[arg(long)]
    pub(crate) event: PathBuf,

    /// JSON array of commits, each with its `files` records, oldest first
    #[arg(long)]
    pub(crate) commits: PathBuf,

    /// Policy file, relative to the workspace; empty for the default policy
    #[arg(long, default_value = "")]
    pub(crate) config: String,

    /// Directory the policy file is resolved against
    #[arg(long, default_value = ".")]
    pub(crate) workspace: PathBuf,

    /// Print the decision and file state as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
struct Report {
    decision: Decision,
    state: FileState,
}

fn read_commits(path: &Path) -> Result<Vec<Commit>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse commits from {}", path.display()))
}

fn evaluate_recorded(args: &CheckArgs) -> Result<Report> {
    let event = PullRequestEvent::from_path(&args.event)?;
    let commits = read_commits(&args.commits)?;
    let policy = load_policy(&args.workspace, &args.config)?;

    let state = reduce(&commits);
    let decision = evaluate_state(&state, &event.to_pull_request(), &policy);
    Ok(Report { decision, state })
}

fn print_files(label: &str, files: impl IntoIterator<Item = String>) {
    let files: Vec<String> = files.into_iter().collect();
    if !files.is_empty() {
        println!("  {} {}", format!("{label}:").dimmed(), files.join(", "));
    }
}

fn print_report(report: &Report) {
    let verdict = if report.decision.approve {
        "approve".green().bold()
    } else {
        "skip".yellow().bold()
    };
    println!(
        "{verdict} {} {}",
        report.decision.reason,
        format!("({})", report.decision.rule).dimmed()
    );

    let state = &report.state;
    print_files("added", state.added.iter().cloned());
    print_files("modified", state.modified.iter().cloned());
    print_files("removed", state.removed.iter().cloned());
    print_files(
        "renamed",
        state.renamed.iter().map(|(from, to)| format!("{from} -> {to}")),
    );
}

/// Evaluate recorded event and commit data and print the decision.
pub(crate) fn run_check(args: &CheckArgs) -> Result<()> {
    let report = evaluate_recorded(args)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}
