//! autoforge - Deterministic commit messages and branch names from git diffs.
//!
//! # Overview
//!
//! autoforge reads a unified diff, extracts weighted change signals with a
//! fixed set of pattern detectors, and renders a Conventional Commit header
//! (`type(scope): description`) or a git-safe branch name (`type/scope-slug`)
//! without any network or model dependency.

pub mod apply;
pub mod config;
pub mod diff;
pub mod engine;
pub mod error;
pub mod infer;
pub mod render;
pub mod signal;

// Re-export commonly used types
pub use config::EngineConfig;
pub use diff::DiffContext;
pub use engine::{Analysis, FallbackEngine, OutputMode};
pub use error::{ApplyError, DiffError};
pub use infer::{CommitType, ScopeRules};
pub use render::SlugRules;
pub use signal::{ChangeVerb, RankedSignals, Signal, SignalKind};
