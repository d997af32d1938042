//! Staged diff collection using git2.

use std::path::Path;

use git2::{Diff, DiffFormat, ErrorCode, Repository, Tree};
use tracing::{debug, warn};

use crate::error::DiffError;

/// Maximum characters for the unified diff text before truncation.
pub const MAX_DIFF_LENGTH: usize = 30_000;

/// Staged changes rendered as unified diff text.
#[derive(Debug, Clone)]
pub struct DiffSummary {
    pub diff_text: String,
    pub changed_files: Vec<String>,
    pub truncated: bool,
    pub additions: usize,
    pub deletions: usize,
}

/// Find the repository containing `path`.
pub fn discover_repository(path: &Path) -> Result<Repository, DiffError> {
    Repository::discover(path).map_err(DiffError::OpenRepository)
}

/// Resolve the HEAD tree, distinguishing empty-repo errors from real failures.
///
/// Returns `Ok(None)` for repos with no commits (unborn branch / not found).
fn resolve_head_tree(repo: &Repository) -> Result<Option<Tree<'_>>, DiffError> {
    let head_ref = match repo.head() {
        Ok(r) => r,
        Err(e)
            if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound =>
        {
            return Ok(None);
        }
        Err(e) => return Err(DiffError::DiffFailed(e)),
    };

    let tree = head_ref.peel_to_tree().map_err(DiffError::DiffFailed)?;
    Ok(Some(tree))
}

/// Collect the staged diff (HEAD tree → index), like `git diff --staged`.
///
/// Unstaged and untracked files are ignored: they are not part of the commit
/// the message will describe.
pub fn collect_staged_diff(repo: &Repository) -> Result<DiffSummary, DiffError> {
    let head_tree = resolve_head_tree(repo)?;

    let staged = repo
        .diff_tree_to_index(head_tree.as_ref(), None, None)
        .map_err(DiffError::DiffFailed)?;

    let changed_files = changed_paths(&staged);
    if changed_files.is_empty() {
        return Err(DiffError::NoChanges);
    }

    let mut summary = DiffSummary {
        diff_text: String::new(),
        changed_files,
        truncated: false,
        additions: 0,
        deletions: 0,
    };
    append_diff_text(&staged, &mut summary);

    debug!(
        "Staged diff: {} files, +{} -{}, truncated={}",
        summary.changed_files.len(),
        summary.additions,
        summary.deletions,
        summary.truncated
    );
    if summary.truncated {
        warn!("Diff truncated to {MAX_DIFF_LENGTH} characters; later files are not analyzed");
    }

    Ok(summary)
}

/// Paths touched by a diff, new path preferred over old.
fn changed_paths(diff: &Diff<'_>) -> Vec<String> {
    let mut paths: Vec<String> = diff
        .deltas()
        .filter_map(|delta| {
            delta
                .new_file()
                .path()
                .or_else(|| delta.old_file().path())
                .map(|p| p.to_string_lossy().to_string())
        })
        .filter(|p| !p.is_empty())
        .collect();
    paths.sort();
    paths.dedup();
    paths
}

/// Append unified diff text up to the length cap. Line counts cover the
/// whole diff.
///
/// File (`F`) and hunk (`H`) lines carry their full header text, so the
/// output keeps the `diff --git a/… b/…` markers the parser relies on.
fn append_diff_text(diff: &Diff<'_>, summary: &mut DiffSummary) {
    let result = diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        let origin = line.origin();
        match origin {
            '+' => summary.additions += 1,
            '-' => summary.deletions += 1,
            _ => {}
        }

        if summary.truncated {
            return true;
        }

        let content = String::from_utf8_lossy(line.content());
        if summary.diff_text.len() + content.len() + 2 > MAX_DIFF_LENGTH {
            summary.truncated = true;
            return true;
        }

        if matches!(origin, '+' | '-' | ' ') {
            summary.diff_text.push(origin);
        }
        summary.diff_text.push_str(&content);

        true
    });

    if let Err(e) = result {
        warn!("Failed to collect diff text: {e}");
        summary.truncated = true;
    }
}
