//! Conventional commit types and rule-based type inference.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::signal::{ChangeVerb, Signal, SignalKind};

/// Conventional commit types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Perf,
    Test,
    Build,
    Ci,
    Chore,
}

impl CommitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Docs => "docs",
            CommitType::Style => "style",
            CommitType::Refactor => "refactor",
            CommitType::Perf => "perf",
            CommitType::Test => "test",
            CommitType::Build => "build",
            CommitType::Ci => "ci",
            CommitType::Chore => "chore",
        }
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CommitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "feat" => Ok(Self::Feat),
            "fix" => Ok(Self::Fix),
            "docs" => Ok(Self::Docs),
            "style" => Ok(Self::Style),
            "refactor" => Ok(Self::Refactor),
            "perf" => Ok(Self::Perf),
            "test" => Ok(Self::Test),
            "build" => Ok(Self::Build),
            "ci" => Ok(Self::Ci),
            "chore" => Ok(Self::Chore),
            _ => Err(format!("Unknown commit type: {}", s)),
        }
    }
}

/// One row of the inference table.
#[derive(Clone, Copy)]
pub struct TypeRule {
    pub matches: fn(&Signal) -> bool,
    pub commit_type: CommitType,
    pub priority: u8,
}

/// Type used when no rule matches any signal.
pub const DEFAULT_TYPE: CommitType = CommitType::Chore;

/// Inference rules. Specific, higher-risk classifications carry higher
/// priority so the broad feature rule can never override them.
pub const TYPE_RULES: &[TypeRule] = &[
    TypeRule {
        matches: |s| s.kind == SignalKind::ErrorHandling && s.verb != ChangeVerb::Remove,
        commit_type: CommitType::Fix,
        priority: 100,
    },
    TypeRule {
        matches: |s| s.kind == SignalKind::Performance || s.verb == ChangeVerb::Optimize,
        commit_type: CommitType::Perf,
        priority: 90,
    },
    TypeRule {
        matches: |s| s.kind == SignalKind::Test,
        commit_type: CommitType::Test,
        priority: 80,
    },
    TypeRule {
        matches: |s| s.kind == SignalKind::Dependency,
        commit_type: CommitType::Build,
        priority: 70,
    },
    TypeRule {
        matches: |s| s.kind == SignalKind::Config,
        commit_type: CommitType::Chore,
        priority: 60,
    },
    TypeRule {
        matches: |s| matches!(s.verb, ChangeVerb::Refactor | ChangeVerb::Rename),
        commit_type: CommitType::Refactor,
        priority: 50,
    },
    TypeRule {
        matches: |s| s.kind == SignalKind::Logging && s.verb == ChangeVerb::Remove,
        commit_type: CommitType::Style,
        priority: 40,
    },
    TypeRule {
        matches: |s| s.verb == ChangeVerb::Remove,
        commit_type: CommitType::Chore,
        priority: 30,
    },
    TypeRule {
        matches: |s| {
            matches!(
                s.verb,
                ChangeVerb::Implement | ChangeVerb::Create | ChangeVerb::Add | ChangeVerb::Update
            )
        },
        commit_type: CommitType::Feat,
        priority: 10,
    },
];

/// Infer the commit type from ranked signals.
///
/// Every rule is evaluated against every signal; the highest-priority match
/// wins and the first match found wins a priority tie.
pub fn infer_commit_type(signals: &[Signal]) -> CommitType {
    infer_with_rules(TYPE_RULES, signals)
}

/// Infer with an explicit rule table.
pub fn infer_with_rules(rules: &[TypeRule], signals: &[Signal]) -> CommitType {
    let mut best: Option<(CommitType, u8)> = None;

    for signal in signals {
        for rule in rules {
            if !(rule.matches)(signal) {
                continue;
            }
            if best.is_none_or(|(_, priority)| rule.priority > priority) {
                best = Some((rule.commit_type, rule.priority));
            }
        }
    }

    let commit_type = best.map_or(DEFAULT_TYPE, |(commit_type, _)| commit_type);
    debug!("Inferred commit type '{}' from {} signal(s)", commit_type, signals.len());
    commit_type
}
