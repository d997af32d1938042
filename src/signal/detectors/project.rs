//! Detectors driven by project files: tests, dependency manifests, configuration.

use std::sync::LazyLock;

use regex_lite::Regex;

use super::{in_both, net_added, net_removed, regex};
use crate::diff::DiffContext;
use crate::signal::{ChangeVerb, Signal, SignalKind};

static TEST_FILE: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"\.(?:test|spec)\.(?:ts|js|tsx|jsx)$|(?:^|/)(?:__tests__|tests?)/")
});
static TEST_CALL: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"\b(?:describe|it|test|expect|beforeEach|afterEach)\(|#\[(?:tokio::)?test\]")
});

static MANIFEST_FILE: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"(?:^|/)(?:package\.json|yarn\.lock|package-lock\.json|pnpm-lock\.yaml|Cargo\.toml|Cargo\.lock)$")
});
/// A `"name": "^1.2.3"` JSON entry or a `name = "1.2"` TOML entry.
static VERSION_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    regex(r#"(?m)"[^"]+"\s*:\s*"[\^~]?\d|^\s*[A-Za-z0-9_-]+\s*=\s*(?:\{[^}\n]*version\s*=\s*)?"[\^~=]?\d"#)
});

static CONFIG_FILE: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"(?i)\.(?:env|config|conf|ya?ml|toml)$|\.config\.[cm]?[jt]s$|(?:^|/)config/")
});
static CONFIG_USAGE: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"process\.env\.|\bConfigModule\b|\bdotenv\b|@ConfigService\b")
});

/// Test additions or updates.
pub(super) fn tests(ctx: &DiffContext) -> Vec<Signal> {
    let touches_test_file = ctx.file_names.iter().any(|f| TEST_FILE.is_match(f));
    if !touches_test_file && !TEST_CALL.is_match(&ctx.added_content) {
        return Vec::new();
    }
    let verb = if net_added(&TEST_CALL, ctx) { ChangeVerb::Add } else { ChangeVerb::Update };
    vec![Signal::new(SignalKind::Test, ["unit tests"], verb, 7)]
}

/// Dependency manifest and lockfile changes.
pub(super) fn dependencies(ctx: &DiffContext) -> Vec<Signal> {
    if !ctx.file_names.iter().any(|f| MANIFEST_FILE.is_match(f)) {
        return Vec::new();
    }

    // A version bump keeps the same key on both sides, so it must be checked
    // before the net-added / net-removed cases.
    let verb = if in_both(&VERSION_PAIR, ctx) {
        ChangeVerb::Update
    } else if net_added(&VERSION_PAIR, ctx) {
        ChangeVerb::Add
    } else if net_removed(&VERSION_PAIR, ctx) {
        ChangeVerb::Remove
    } else {
        return Vec::new();
    };
    vec![Signal::new(SignalKind::Dependency, ["dependencies"], verb, 9)]
}

/// Configuration files or configuration access.
pub(super) fn config(ctx: &DiffContext) -> Vec<Signal> {
    let touches_config_file = ctx.file_names.iter().any(|f| CONFIG_FILE.is_match(f));
    if !touches_config_file && !CONFIG_USAGE.is_match(&ctx.added_content) {
        return Vec::new();
    }
    vec![Signal::new(SignalKind::Config, ["configuration"], ChangeVerb::Update, 7)]
}
