//! Prelude module - commonly used types for convenient import.
//!
//! Use `use autoapprove_core::prelude::*;` to import all essential types.

// File records
pub use crate::{Commit, FileChangeEvent, FileStatus};

// Reduction
pub use crate::{FileState, reduce};

// Evaluation
pub use crate::{ApprovalPolicy, Decision, PullRequest, Rule, evaluate, evaluate_state};
