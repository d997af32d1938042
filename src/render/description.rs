//! Fluent commit descriptions synthesized from ranked signals.
//!
//! Signals sharing a verb merge into one clause, so the output reads
//! "implement addToCart and calculateTotal, and create ProductPage" rather
//! than a flat list of labels.

use std::collections::HashSet;

use crate::diff::DiffContext;
use crate::signal::{ChangeVerb, Signal};

/// Description for an empty or whitespace-only diff.
pub const NO_CHANGES: &str = "no changes detected";

/// Net line delta above which a mixed diff reads as a refactor.
pub const DEFAULT_REFACTOR_THRESHOLD: i64 = 20;

/// Render signals as a single clause sequence.
///
/// Returns `None` when no signal keeps a subject after cross-signal dedup.
pub fn synthesize(signals: &[Signal]) -> Option<String> {
    // A subject claimed by one signal cannot reappear under another kind.
    let mut claimed: HashSet<&str> = HashSet::new();
    let mut groups: Vec<(ChangeVerb, Vec<&str>)> = Vec::new();

    for signal in signals {
        let fresh: Vec<&str> = signal
            .subjects
            .iter()
            .map(String::as_str)
            .filter(|subject| claimed.insert(*subject))
            .collect();
        if fresh.is_empty() {
            continue;
        }

        match groups.iter_mut().find(|(verb, _)| *verb == signal.verb) {
            Some((_, subjects)) => subjects.extend(fresh),
            None => groups.push((signal.verb, fresh)),
        }
    }

    if groups.is_empty() {
        return None;
    }

    let clauses: Vec<String> = groups
        .iter()
        .map(|(verb, subjects)| format!("{} {}", verb, join_with_and(subjects)))
        .collect();

    Some(join_clauses(&clauses))
}

/// Structural description for diffs without any recognised signal.
pub fn fallback_description(ctx: &DiffContext, refactor_threshold: i64) -> &'static str {
    let has_added = !ctx.added_lines.is_empty();
    let has_removed = !ctx.removed_lines.is_empty();

    match (has_added, has_removed) {
        (true, true) if ctx.line_delta > refactor_threshold => "refactor existing logic",
        (true, true) => "update logic",
        (true, false) => "add new functionality",
        (false, true) => "remove unused code",
        (false, false) => "modify files",
    }
}

/// `["a"]` → `a`, `["a","b"]` → `a and b`, `["a","b","c"]` → `a, b, and c`.
pub fn join_with_and<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [first, second] => format!("{} and {}", first.as_ref(), second.as_ref()),
        [head @ .., last] => {
            let head: Vec<&str> = head.iter().map(AsRef::as_ref).collect();
            format!("{}, and {}", head.join(", "), last.as_ref())
        }
    }
}

/// `c1, and c2` for two clauses; `c1; c2, and c3` for more.
pub fn join_clauses<S: AsRef<str>>(clauses: &[S]) -> String {
    match clauses {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [head @ .., last] => {
            let head: Vec<&str> = head.iter().map(AsRef::as_ref).collect();
            format!("{}, and {}", head.join("; "), last.as_ref())
        }
    }
}
