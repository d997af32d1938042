//! Applying generated names to the repository: branch creation and commits.

use git2::{BranchType, ErrorCode, Oid, Repository, build::CheckoutBuilder};
use tracing::debug;

use crate::error::ApplyError;

/// Longest branch name accepted.
pub const MAX_BRANCH_NAME_LENGTH: usize = 200;

/// Reject names git would refuse or that are unreasonably long.
pub fn validate_branch_name(name: &str) -> Result<(), ApplyError> {
    let valid = name.len() <= MAX_BRANCH_NAME_LENGTH
        && git2::Branch::name_is_valid(name).unwrap_or(false);
    if valid {
        Ok(())
    } else {
        Err(ApplyError::InvalidBranchName(name.to_string()))
    }
}

/// Create `name` at HEAD and check it out.
pub fn create_branch(repo: &Repository, name: &str) -> Result<(), ApplyError> {
    validate_branch_name(name)?;

    if repo.find_branch(name, BranchType::Local).is_ok() {
        return Err(ApplyError::BranchExists(name.to_string()));
    }

    let head = match repo.head() {
        Ok(head) => head,
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Err(ApplyError::UnbornHead);
        }
        Err(e) => return Err(ApplyError::BranchFailed(e)),
    };
    let target = head.peel_to_commit().map_err(ApplyError::BranchFailed)?;

    let branch = repo
        .branch(name, &target, false)
        .map_err(ApplyError::BranchFailed)?;
    let refname = branch
        .get()
        .name()
        .ok_or_else(|| ApplyError::InvalidBranchName(name.to_string()))?
        .to_string();

    repo.set_head(&refname).map_err(ApplyError::CheckoutFailed)?;
    repo.checkout_head(Some(CheckoutBuilder::new().safe()))
        .map_err(ApplyError::CheckoutFailed)?;

    debug!("Created and checked out {refname}");
    Ok(())
}

/// Commit the current index on HEAD with the configured signature.
///
/// Only already-staged changes are committed. An unborn HEAD produces a
/// root commit.
pub fn commit_staged(repo: &Repository, message: &str) -> Result<Oid, ApplyError> {
    let mut index = repo.index().map_err(ApplyError::IndexFailed)?;
    let tree_id = index.write_tree().map_err(ApplyError::IndexFailed)?;
    let tree = repo.find_tree(tree_id).map_err(ApplyError::CommitFailed)?;

    let sig = repo.signature().map_err(ApplyError::ConfigError)?;

    let parent = match repo.head() {
        Ok(head) => Some(head.peel_to_commit().map_err(ApplyError::CommitFailed)?),
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => None,
        Err(e) => return Err(ApplyError::CommitFailed(e)),
    };
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

    let oid = repo
        .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .map_err(ApplyError::CommitFailed)?;

    debug!("Created commit {oid}");
    Ok(oid)
}
