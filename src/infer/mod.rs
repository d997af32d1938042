//! Commit type and scope inference from ranked signals and touched paths.

pub mod commit_type;
pub mod scope;

pub use commit_type::{CommitType, DEFAULT_TYPE, TYPE_RULES, TypeRule, infer_commit_type};
pub use scope::{DomainRule, FALLBACK_SCOPE, ScopeRules, infer_scope};
