//! Error types for autoforge collaborators using thiserror.
//!
//! The inference core never fails; only diff acquisition and applying the
//! results to a repository can.

use thiserror::Error;

/// Errors from obtaining diff text.
#[derive(Error, Debug)]
pub enum DiffError {
    #[error("Failed to open repository: {0}")]
    OpenRepository(#[source] git2::Error),

    #[error("No staged changes to describe. Stage files with `git add` first")]
    NoChanges,

    #[error("Failed to compute diff: {0}")]
    DiffFailed(#[source] git2::Error),

    #[error("Failed to read diff from {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from creating branches or commits.
#[derive(Error, Debug)]
pub enum ApplyError {
    #[error("Invalid branch name '{0}'")]
    InvalidBranchName(String),

    #[error("Branch '{0}' already exists")]
    BranchExists(String),

    #[error("Cannot create a branch before the first commit")]
    UnbornHead,

    #[error("Failed to create branch: {0}")]
    BranchFailed(#[source] git2::Error),

    #[error("Failed to checkout branch: {0}")]
    CheckoutFailed(#[source] git2::Error),

    #[error("Failed to read index: {0}")]
    IndexFailed(#[source] git2::Error),

    #[error("Failed to create commit: {0}")]
    CommitFailed(#[source] git2::Error),

    #[error("Git config error (user.name/user.email not set?): {0}")]
    ConfigError(#[source] git2::Error),
}
