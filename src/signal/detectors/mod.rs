//! Ordered, stateless signal detectors.
//!
//! Every detector sees the same unmodified [`DiffContext`] and never sees
//! another detector's output. Order only matters for ranking ties: detectors
//! for more specific categories (UI components) come before generic ones
//! (plain functions) so they win when scores are equal.

mod behavior;
mod code;
mod project;

use std::collections::HashSet;

use regex_lite::Regex;
use tracing::debug;

use crate::diff::DiffContext;
use crate::signal::Signal;

/// A named detector in the pipeline.
#[derive(Clone, Copy)]
pub struct Detector {
    pub name: &'static str,
    pub detect: fn(&DiffContext) -> Vec<Signal>,
}

impl std::fmt::Debug for Detector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Detector").field("name", &self.name).finish()
    }
}

/// Ordered from most specific to least specific.
pub const DETECTORS: &[Detector] = &[
    // Must precede `functions` so PascalCase names are claimed as components.
    Detector { name: "components", detect: code::components_and_hooks },
    Detector { name: "functions", detect: code::functions },
    Detector { name: "classes", detect: code::classes },
    Detector { name: "types", detect: code::types },
    Detector { name: "auth", detect: behavior::auth },
    Detector { name: "middleware", detect: behavior::middleware },
    Detector { name: "routes", detect: behavior::routes },
    Detector { name: "error-handling", detect: behavior::error_handling },
    Detector { name: "async", detect: behavior::async_await },
    Detector { name: "validation", detect: behavior::validation },
    Detector { name: "database", detect: behavior::database },
    Detector { name: "tests", detect: project::tests },
    Detector { name: "dependencies", detect: project::dependencies },
    Detector { name: "config", detect: project::config },
    Detector { name: "logging", detect: behavior::logging },
    Detector { name: "performance", detect: behavior::performance },
];

/// Run every detector in pipeline order and concatenate their output.
pub fn detect_all(ctx: &DiffContext) -> Vec<Signal> {
    run_detectors(DETECTORS, ctx)
}

/// Run an explicit detector list in the given order.
pub fn run_detectors(detectors: &[Detector], ctx: &DiffContext) -> Vec<Signal> {
    let mut signals = Vec::new();
    for detector in detectors {
        let found = (detector.detect)(ctx);
        if !found.is_empty() {
            debug!("Detector '{}' emitted {} signal(s)", detector.name, found.len());
        }
        signals.extend(found);
    }
    signals
}

/// Compile a built-in pattern.
fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("Invalid regex")
}

/// Pattern hits added content but not removed (net new).
fn net_added(pattern: &Regex, ctx: &DiffContext) -> bool {
    pattern.is_match(&ctx.added_content) && !pattern.is_match(&ctx.removed_content)
}

/// Pattern hits removed content but not added (net deleted).
fn net_removed(pattern: &Regex, ctx: &DiffContext) -> bool {
    pattern.is_match(&ctx.removed_content) && !pattern.is_match(&ctx.added_content)
}

/// Pattern hits both sides (modification/refactor).
fn in_both(pattern: &Regex, ctx: &DiffContext) -> bool {
    pattern.is_match(&ctx.added_content) && pattern.is_match(&ctx.removed_content)
}

/// Non-empty first capture group of every match, deduplicated in order.
fn captures(pattern: &Regex, text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|name| !name.is_empty() && seen.insert(*name))
        .map(str::to_string)
        .collect()
}

/// First capture group of the first match.
fn first_capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
