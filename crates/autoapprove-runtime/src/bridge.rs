//! Bridge between the policy file and the evaluator's policy type.

use std::collections::BTreeSet;
use std::path::Path;

use autoapprove_config::{Config, ResolvedConfig};
use autoapprove_core::ApprovalPolicy;

use crate::error::RuntimeResult;

/// Convert a loaded policy file into an [`ApprovalPolicy`].
///
/// The normalized config path is carried over so that changes to the policy
/// file itself are detected.
#[must_use]
pub fn policy_from_config(resolved: &ResolvedConfig) -> ApprovalPolicy {
    ApprovalPolicy {
        config_path: resolved.config_path.clone(),
        allowed_authors: resolved.config.allowed_authors.clone(),
        allowed_file_groups: resolved
            .config
            .allowed_files
            .iter()
            .map(|group| group.iter().cloned().collect::<BTreeSet<_>>())
            .collect(),
    }
}

/// Load the policy file `config_path` from `workspace_root` and convert it.
///
/// # Errors
///
/// Returns a config error if the file is unreadable, malformed or invalid.
pub fn load_policy(workspace_root: &Path, config_path: &str) -> RuntimeResult<ApprovalPolicy> {
    let resolved = Config::load(workspace_root, config_path)?;
    Ok(policy_from_config(&resolved))
}
