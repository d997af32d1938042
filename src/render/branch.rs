//! Git-safe branch names built directly from ranked signals.
//!
//! Branch names have different constraints than commit descriptions: no
//! camelCase, no conjunctions, bounded length. They are rendered from the
//! signals themselves, never from the prose description.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex_lite::Regex;

use crate::infer::CommitType;
use crate::signal::{ChangeVerb, Signal};

/// Longest slug (after the `type/` prefix) before trimming.
pub const MAX_SLUG_LENGTH: usize = 45;

/// A trailing hyphen at or before this index is too early to cut at.
const MIN_CUT_POSITION: usize = 10;

/// Shortest configurable slug cap; leaves room for a scope and one word.
pub const MIN_SLUG_LENGTH: usize = MIN_CUT_POSITION + 2;

/// Signals contributing to a branch name.
const MAX_BRANCH_SIGNALS: usize = 2;

/// Subjects per signal contributing to a branch name.
const MAX_SUBJECTS_PER_SIGNAL: usize = 2;

/// Words that add no value in a branch name.
const DEFAULT_STOP_WORDS: &[&str] = &[
    // conjunctions, articles, prepositions
    "and", "or", "the", "a", "an", "to", "of", "for", "in", "on", "with", "from", "by", "is",
    "are", "was", "be", "as", "at",
    // generic code nouns
    "function", "functions", "component", "components", "class", "classes", "hook", "hooks",
    "handler", "handlers", "module", "modules", "service", "services", "helper", "helpers",
    "util", "utils", "new", "existing", "current", "old",
    // async noise
    "promise", "chains", "chain",
    // other signal noise
    "handling", "logic", "based",
];

/// `XMLParser` → `XML-Parser`.
static ACRONYM_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("Invalid regex"));
/// `addTo` → `add-To`.
static CAMEL_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z\d])([A-Z])").expect("Invalid regex"));

/// Configuration for slug rendering.
#[derive(Debug, Clone)]
pub struct SlugRules {
    pub stop_words: HashSet<String>,
    pub max_length: usize,
}

impl Default for SlugRules {
    fn default() -> Self {
        Self {
            stop_words: DEFAULT_STOP_WORDS.iter().map(|w| (*w).to_string()).collect(),
            max_length: MAX_SLUG_LENGTH,
        }
    }
}

impl SlugRules {
    /// Add extra stop words (lowercased).
    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stop_words
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
        self
    }

    /// Build `type/scope-words` from ranked signals.
    ///
    /// Only the top two signals and the first two subjects of each are used.
    pub fn branch_name(&self, signals: &[Signal], scope: &str, commit_type: CommitType) -> String {
        if signals.is_empty() {
            return format!("{commit_type}/{scope}-update");
        }

        let words: Vec<String> = signals
            .iter()
            .take(MAX_BRANCH_SIGNALS)
            .flat_map(|signal| self.signal_words(signal, scope))
            .collect();

        let mut slug_words = vec![scope.to_string()];
        slug_words.extend(dedupe_words(words));

        format!("{commit_type}/{}", self.assemble(&slug_words))
    }

    /// Verb word followed by the slug words of the first subjects.
    fn signal_words(&self, signal: &Signal, scope: &str) -> Vec<String> {
        let mut words = vec![branch_verb(signal.verb).to_string()];
        for subject in signal.subjects.iter().take(MAX_SUBJECTS_PER_SIGNAL) {
            let mut subject_words = self.subject_words(subject);
            // scope="product", subject="ProductPage" → ["page"]
            if subject_words.first().is_some_and(|w| w == scope) {
                subject_words.remove(0);
            }
            words.extend(subject_words);
        }
        words
    }

    /// Convert a subject into clean slug words.
    ///
    /// `addToCart` → `["add", "cart"]`,
    /// `promise chains to async/await` → `["async", "await"]`.
    pub fn subject_words(&self, subject: &str) -> Vec<String> {
        subject
            .split(|c: char| c.is_whitespace() || matches!(c, '/' | '-' | '_' | '→'))
            .filter(|part| !part.is_empty())
            .flat_map(|part| {
                split_identifier(part)
                    .split('-')
                    .map(|w| w.chars().filter(char::is_ascii_alphanumeric).collect::<String>())
                    .collect::<Vec<_>>()
            })
            .filter(|w| w.len() > 1 && !self.stop_words.contains(w))
            .collect()
    }

    /// Join with hyphens and trim to the length cap at a word boundary.
    fn assemble(&self, words: &[String]) -> String {
        let full = words.join("-");
        if full.chars().count() <= self.max_length {
            return full;
        }

        let cut = full
            .char_indices()
            .nth(self.max_length)
            .map_or(full.len(), |(idx, _)| idx);
        let trimmed = &full[..cut];

        match trimmed.rfind('-') {
            Some(hyphen) if hyphen > MIN_CUT_POSITION => trimmed[..hyphen].to_string(),
            _ => trimmed.to_string(),
        }
    }
}

/// Generate a branch name with the default rules.
pub fn branch_name(signals: &[Signal], scope: &str, commit_type: CommitType) -> String {
    SlugRules::default().branch_name(signals, scope, commit_type)
}

/// Shorter, imperative verbs for branch names.
pub fn branch_verb(verb: ChangeVerb) -> &'static str {
    match verb {
        ChangeVerb::Implement | ChangeVerb::Create | ChangeVerb::Add => "add",
        ChangeVerb::Remove => "remove",
        ChangeVerb::Refactor => "refactor",
        ChangeVerb::Update => "update",
        ChangeVerb::Rename => "rename",
        ChangeVerb::Optimize => "optimize",
    }
}

/// Split camelCase / PascalCase into lowercase hyphenated words.
///
/// `addToCart` → `add-to-cart`, `HTMLParser` → `html-parser`.
pub fn split_identifier(name: &str) -> String {
    let spaced = ACRONYM_BOUNDARY.replace_all(name, "${1}-${2}");
    CAMEL_BOUNDARY
        .replace_all(&spaced, "${1}-${2}")
        .to_lowercase()
}

/// Keep the first occurrence of every word.
fn dedupe_words(words: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    words.into_iter().filter(|w| seen.insert(w.clone())).collect()
}
