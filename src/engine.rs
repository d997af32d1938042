//! Deterministic commit-message and branch-name engine.
//!
//! Ties the pipeline together: parse → detect → rank → infer → render.
//! Every entry point is infallible and pure for a given configuration.

use std::sync::LazyLock;

use regex_lite::Regex;
use serde::Serialize;
use tracing::debug;

use crate::config::EngineConfig;
use crate::diff::DiffContext;
use crate::infer::scope::clean_token;
use crate::infer::{CommitType, infer_commit_type};
use crate::render::{NO_CHANGES, fallback_description, synthesize};
use crate::signal::{RankedSignals, detect_all, rank_signals};

/// Commit message returned when a prompt carries no diff.
pub const EMPTY_DIFF_COMMIT: &str = "chore: empty diff";

/// Branch name returned when a prompt carries no diff.
pub const EMPTY_DIFF_BRANCH: &str = "chore/empty-diff";

/// Marker after which a prompt carries its diff, in any letter case.
static DIFF_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)diff:").expect("Invalid regex"));

/// What a prompt asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Commit,
    Branch,
}

impl OutputMode {
    /// Branch mode when the prompt mentions a "branch name"; commit otherwise.
    pub fn detect(prompt: &str) -> Self {
        if prompt.to_lowercase().contains("branch name") {
            OutputMode::Branch
        } else {
            OutputMode::Commit
        }
    }
}

/// Everything inferred from one diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    #[serde(rename = "type")]
    pub commit_type: CommitType,
    pub scope: String,
    pub description: String,
    pub branch_name: String,
    pub signals: RankedSignals,
    pub files: Vec<String>,
    pub line_delta: i64,
}

impl Analysis {
    /// `type(scope): description`, with `!` after the scope when breaking.
    pub fn commit_message(&self, breaking: bool) -> String {
        format_commit_message(self.commit_type, &self.scope, &self.description, breaking)
    }
}

/// Format a conventional commit header.
pub fn format_commit_message(
    commit_type: CommitType,
    scope: &str,
    description: &str,
    breaking: bool,
) -> String {
    let bang = if breaking { "!" } else { "" };
    format!("{commit_type}({scope}){bang}: {description}")
}

/// Rule-based stand-in for a generative model.
#[derive(Debug, Clone, Default)]
pub struct FallbackEngine {
    config: EngineConfig,
}

impl FallbackEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the full pipeline over raw unified diff text.
    pub fn analyze(&self, diff: &str) -> Analysis {
        let ctx = DiffContext::parse(diff);

        let signals = if diff.trim().is_empty() {
            RankedSignals::default()
        } else {
            rank_signals(detect_all(&ctx))
        };

        let commit_type = self
            .config
            .type_override
            .unwrap_or_else(|| infer_commit_type(signals.as_slice()));
        let scope = self
            .config
            .scope_override
            .as_deref()
            .and_then(clean_token)
            .unwrap_or_else(|| self.config.scope_rules.infer(&ctx.file_names, signals.as_slice()));

        let description = if diff.trim().is_empty() {
            NO_CHANGES.to_string()
        } else {
            synthesize(signals.as_slice()).unwrap_or_else(|| {
                fallback_description(&ctx, self.config.refactor_threshold).to_string()
            })
        };

        let branch_name = self
            .config
            .slug_rules
            .branch_name(signals.as_slice(), &scope, commit_type);

        debug!(
            "Analysis: {} signal(s), type={}, scope={}",
            signals.len(),
            commit_type,
            scope
        );

        Analysis {
            commit_type,
            scope,
            description,
            branch_name,
            signals,
            files: ctx.file_names,
            line_delta: ctx.line_delta,
        }
    }

    /// Human-readable summary of the change.
    pub fn describe(&self, diff: &str) -> String {
        self.analyze(diff).description
    }

    /// `type(scope): description`.
    pub fn commit_message(&self, diff: &str) -> String {
        self.analyze(diff).commit_message(false)
    }

    /// `type/scope-slug`.
    pub fn branch_name(&self, diff: &str) -> String {
        self.analyze(diff).branch_name
    }

    /// Answer a chat-style prompt that embeds a diff after a `Diff:` marker.
    ///
    /// The mode comes from the instruction text. A prompt without a diff
    /// yields [`EMPTY_DIFF_COMMIT`] or [`EMPTY_DIFF_BRANCH`].
    pub fn complete(&self, prompt: &str) -> String {
        let mode = OutputMode::detect(prompt);
        let diff = extract_diff(prompt);
        debug!("Completing prompt in {:?} mode ({} diff chars)", mode, diff.len());

        match (mode, diff.is_empty()) {
            (OutputMode::Commit, true) => EMPTY_DIFF_COMMIT.to_string(),
            (OutputMode::Branch, true) => EMPTY_DIFF_BRANCH.to_string(),
            (OutputMode::Commit, false) => self.commit_message(diff),
            (OutputMode::Branch, false) => self.branch_name(diff),
        }
    }
}

/// Trimmed text after the first `Diff:` marker, or empty when absent.
pub fn extract_diff(prompt: &str) -> &str {
    DIFF_MARKER
        .find(prompt)
        .map(|m| prompt[m.end()..].trim())
        .unwrap_or("")
}
