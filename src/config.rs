//! Engine configuration.
//!
//! Built from CLI flags; there is no config file.

use crate::infer::scope::clean_token;
use crate::infer::{CommitType, ScopeRules};
use crate::render::{DEFAULT_REFACTOR_THRESHOLD, MIN_SLUG_LENGTH, SlugRules};

/// Tunables for one [`FallbackEngine`](crate::engine::FallbackEngine).
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub scope_rules: ScopeRules,
    pub slug_rules: SlugRules,
    /// Net line delta above which a mixed diff without signals reads as a refactor.
    pub refactor_threshold: i64,
    /// Replaces the inferred scope when set. Always a cleaned `[a-z0-9-]` token.
    pub scope_override: Option<String>,
    /// Replaces the inferred commit type when set.
    pub type_override: Option<CommitType>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scope_rules: ScopeRules::default(),
            slug_rules: SlugRules::default(),
            refactor_threshold: DEFAULT_REFACTOR_THRESHOLD,
            scope_override: None,
            type_override: None,
        }
    }
}

impl EngineConfig {
    /// Values below [`MIN_SLUG_LENGTH`] are raised to it.
    pub fn with_max_slug_length(mut self, max_length: usize) -> Self {
        self.slug_rules.max_length = max_length.max(MIN_SLUG_LENGTH);
        self
    }

    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.slug_rules = self.slug_rules.with_stop_words(words);
        self
    }

    /// The override is cleaned like an inferred scope (`My Shop` → `my-shop`).
    /// Overrides with nothing left after cleanup are ignored.
    pub fn with_scope(mut self, scope: Option<String>) -> Self {
        self.scope_override = scope.as_deref().and_then(clean_token);
        self
    }

    pub fn with_type(mut self, commit_type: Option<CommitType>) -> Self {
        self.type_override = commit_type;
        self
    }
}
