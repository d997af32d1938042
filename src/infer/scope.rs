//! Scope inference from touched file paths.

use std::path::Path;

use regex_lite::Regex;
use tracing::debug;

use crate::signal::Signal;

/// Scope used when no other rule produces a token.
pub const FALLBACK_SCOPE: &str = "core";

/// Domain keyword table, tested in order against the joined lowercase paths.
const DEFAULT_DOMAINS: &[(&str, &str)] = &[
    (r"auth|login|logout|signin|signup|register|session|oauth|jwt|passw", "auth"),
    (r"cart|checkout|basket", "cart"),
    (r"\busers?\b|\buser[._-]|profile|account", "user"),
    (r"product|catalog|inventory", "product"),
    (r"payment|billing|invoice|stripe|subscription", "payment"),
    (r"\bapi\b|\broutes?\b|\bcontrollers?\b|\bendpoints?\b", "api"),
    (r"\bdb\b|database|migrations?|\bschemas?\b|\bmodels?\b|prisma|\bentit(?:y|ies)\b|\brepositor(?:y|ies)\b", "db"),
    (r"config|settings|\.env\b", "config"),
    (r"\btests?\b|__tests__|\.test\.|\.spec\.|\bspecs?\b", "test"),
    (r"\bcomponents?\b|\bui\b|\bviews?\b|\bpages?\b|\blayouts?\b|\bstyles?\b", "ui"),
    (r"\bstores?\b|redux|\bslices?\b|reducers?|\bstate\b", "store"),
    (r"\bhooks?\b", "hooks"),
    (r"\butils?\b|\bhelpers?\b", "utils"),
    (r"middlewares?", "middleware"),
    (r"notif|\bemails?\b|mailer|\bsms\b", "notify"),
    (r"search|elastic|algolia", "search"),
    (r"storage|\buploads?\b|\bs3\b|bucket", "storage"),
];

/// Top-level directories that say nothing about the domain.
const DEFAULT_NOISE_DIRS: &[&str] = &["src", "lib", "app", "dist", "build", "packages", "modules", ".", ""];

/// A domain keyword pattern and the scope it maps to.
#[derive(Debug, Clone)]
pub struct DomainRule {
    pub pattern: Regex,
    pub scope: String,
}

/// Configuration for the scope cascade.
#[derive(Debug, Clone)]
pub struct ScopeRules {
    pub domains: Vec<DomainRule>,
    pub noise_dirs: Vec<String>,
}

impl Default for ScopeRules {
    fn default() -> Self {
        let domains = DEFAULT_DOMAINS
            .iter()
            .map(|(pattern, scope)| DomainRule {
                pattern: Regex::new(pattern).expect("Invalid regex"),
                scope: (*scope).to_string(),
            })
            .collect();
        let noise_dirs = DEFAULT_NOISE_DIRS.iter().map(|d| (*d).to_string()).collect();
        Self { domains, noise_dirs }
    }
}

impl ScopeRules {
    /// Resolve a scope. First match wins:
    ///
    /// 1. domain keyword over all touched paths
    /// 2. first non-noise directory of the primary file
    /// 3. primary file stem, unless it is `index`
    /// 4. [`FALLBACK_SCOPE`]
    ///
    /// Signals are accepted for signal-aware scoping but not consulted yet.
    pub fn infer(&self, files: &[String], _signals: &[Signal]) -> String {
        let scope = self
            .domain_scope(files)
            .or_else(|| files.first().and_then(|f| self.directory_scope(f)))
            .or_else(|| files.first().and_then(|f| stem_scope(f)))
            .unwrap_or_else(|| FALLBACK_SCOPE.to_string());

        debug!("Inferred scope '{}' from {} file(s)", scope, files.len());
        scope
    }

    fn domain_scope(&self, files: &[String]) -> Option<String> {
        if files.is_empty() {
            return None;
        }
        let joined = files.join(" ").to_lowercase();
        self.domains
            .iter()
            .find(|rule| rule.pattern.is_match(&joined))
            .map(|rule| rule.scope.clone())
    }

    fn directory_scope(&self, path: &str) -> Option<String> {
        let mut segments: Vec<&str> = path.split('/').collect();
        segments.pop(); // file name
        segments
            .into_iter()
            .filter(|segment| !self.noise_dirs.iter().any(|noise| noise.eq_ignore_ascii_case(segment)))
            .find_map(clean_token)
    }
}

/// Infer a scope with the default rules.
pub fn infer_scope(files: &[String], signals: &[Signal]) -> String {
    ScopeRules::default().infer(files, signals)
}

fn stem_scope(path: &str) -> Option<String> {
    let stem = Path::new(path).file_stem()?.to_str()?;
    if stem.eq_ignore_ascii_case("index") {
        return None;
    }
    clean_token(stem)
}

/// Lowercase a path segment and reduce it to `[a-z0-9-]`.
pub fn clean_token(raw: &str) -> Option<String> {
    let mut token = String::with_capacity(raw.len());
    for ch in raw.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_alphanumeric() {
            token.push(ch);
        } else if !token.is_empty() && !token.ends_with('-') {
            token.push('-');
        }
    }
    let token = token.trim_end_matches('-');
    (!token.is_empty()).then(|| token.to_string())
}
