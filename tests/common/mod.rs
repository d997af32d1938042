//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::Path;

use git2::{Oid, Repository, Signature};

/// Build a single-file unified diff from `+`/`-`/` ` prefixed lines.
pub fn file_diff(path: &str, lines: &[&str]) -> String {
    let mut diff = format!("diff --git a/{path} b/{path}\n--- a/{path}\n+++ b/{path}\n@@ -1 +1 @@\n");
    for line in lines {
        diff.push_str(line);
        diff.push('\n');
    }
    diff
}

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository with a configured identity.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        {
            let mut config = repo.config().expect("Failed to open repo config");
            config.set_str("user.name", "Test User").expect("Failed to set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Failed to set user.email");
        }
        Self { dir, repo }
    }

    /// Create a repository with one commit containing `README.md`.
    pub fn with_initial_commit() -> Self {
        let test_repo = Self::new();
        test_repo.write_file("README.md", "# test\n");
        test_repo.stage("README.md");
        test_repo.commit("init");
        test_repo
    }

    fn signature(&self) -> Signature<'_> {
        Signature::now("Test User", "test@example.com").expect("Failed to create signature")
    }

    /// Write a file relative to the repository root, creating parent dirs.
    pub fn write_file(&self, rel: &str, content: &str) {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Add a path to the index.
    pub fn stage(&self, rel: &str) {
        let mut index = self.repo.index().expect("Failed to get index");
        index.add_path(Path::new(rel)).expect("Failed to add file");
        index.write().expect("Failed to write index");
    }

    /// Commit whatever is in the index. Returns the commit OID.
    pub fn commit(&self, message: &str) -> Oid {
        let sig = self.signature();
        let mut index = self.repo.index().expect("Failed to get index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Message of the commit HEAD points at.
    pub fn head_message(&self) -> String {
        self.repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .expect("Failed to resolve HEAD")
            .message()
            .unwrap_or_default()
            .to_string()
    }

    /// Short name of the checked-out branch.
    pub fn current_branch(&self) -> String {
        self.repo
            .head()
            .expect("Failed to resolve HEAD")
            .shorthand()
            .unwrap_or_default()
            .to_string()
    }
}
