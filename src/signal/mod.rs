//! Weighted evidence extracted from a diff.

pub mod detectors;
pub mod rank;

use std::fmt;

use serde::Serialize;

pub use detectors::{DETECTORS, Detector, detect_all};
pub use rank::{MAX_RANKED_SIGNALS, RankedSignals, rank_signals};

/// Category of change a signal describes. Used for grouping and dedup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignalKind {
    Function,
    Class,
    Component,
    Hook,
    Route,
    Middleware,
    Auth,
    Validation,
    ErrorHandling,
    Async,
    Database,
    Config,
    Dependency,
    Test,
    Logging,
    Performance,
    Type,
    Generic,
}

impl SignalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::Function => "function",
            SignalKind::Class => "class",
            SignalKind::Component => "component",
            SignalKind::Hook => "hook",
            SignalKind::Route => "route",
            SignalKind::Middleware => "middleware",
            SignalKind::Auth => "auth",
            SignalKind::Validation => "validation",
            SignalKind::ErrorHandling => "error-handling",
            SignalKind::Async => "async",
            SignalKind::Database => "database",
            SignalKind::Config => "config",
            SignalKind::Dependency => "dependency",
            SignalKind::Test => "test",
            SignalKind::Logging => "logging",
            SignalKind::Performance => "performance",
            SignalKind::Type => "type",
            SignalKind::Generic => "generic",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primary intent of a change: did we add, remove, update, or refactor it?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeVerb {
    Implement,
    Add,
    Remove,
    Refactor,
    Update,
    Rename,
    Optimize,
    Create,
}

impl ChangeVerb {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeVerb::Implement => "implement",
            ChangeVerb::Add => "add",
            ChangeVerb::Remove => "remove",
            ChangeVerb::Refactor => "refactor",
            ChangeVerb::Update => "update",
            ChangeVerb::Rename => "rename",
            ChangeVerb::Optimize => "optimize",
            ChangeVerb::Create => "create",
        }
    }
}

impl fmt::Display for ChangeVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An atomic piece of evidence about one kind of change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Signal {
    pub kind: SignalKind,
    /// Named entities or short phrases; the first one is primary.
    pub subjects: Vec<String>,
    pub verb: ChangeVerb,
    /// Confidence weight. Higher wins when signals of the same kind collide.
    pub score: u32,
}

impl Signal {
    pub fn new<S: Into<String>>(
        kind: SignalKind,
        subjects: impl IntoIterator<Item = S>,
        verb: ChangeVerb,
        score: u32,
    ) -> Self {
        Self {
            kind,
            subjects: subjects.into_iter().map(Into::into).collect(),
            verb,
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display_matches_serde_name() {
        let json = serde_json::to_string(&SignalKind::ErrorHandling).unwrap();
        assert_eq!(json, "\"error-handling\"");
        assert_eq!(SignalKind::ErrorHandling.to_string(), "error-handling");
    }

    #[test]
    fn test_verb_display() {
        assert_eq!(ChangeVerb::Implement.to_string(), "implement");
        assert_eq!(ChangeVerb::Optimize.to_string(), "optimize");
    }

    #[test]
    fn test_signal_serializes_fields() {
        let signal = Signal::new(SignalKind::Function, ["addToCart"], ChangeVerb::Implement, 8);
        let value = serde_json::to_value(&signal).unwrap();
        assert_eq!(value["kind"], "function");
        assert_eq!(value["subjects"][0], "addToCart");
        assert_eq!(value["verb"], "implement");
        assert_eq!(value["score"], 8);
    }
}
