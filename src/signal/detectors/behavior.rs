//! Detectors for cross-cutting behavior: auth, middleware, routes, error
//! handling, async flow, validation, persistence, logging and performance.

use std::sync::LazyLock;

use regex_lite::Regex;

use super::{captures, first_capture, in_both, net_added, net_removed, regex};
use crate::diff::DiffContext;
use crate::signal::{ChangeVerb, Signal, SignalKind};

static AUTH: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"(?i)\b(?:authenticate|authorize|jwt|oauth|bearer|passport|session|permission|role(?:guard)?|isauthenticated)\b")
});

static MIDDLEWARE: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"(?i)\bmiddleware\b|\b(?:app|router)\.use\(|\b(?:cors|helmet|ratelimit|morgan)\(")
});
static MIDDLEWARE_NAME: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)\b(cors|helmet|ratelimit|morgan|compression)\b"));

static ROUTE_CALL: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)\b(?:router|app)\.(?:get|post|put|patch|delete)\b"));
static ADDED_ROUTE_PATH: LazyLock<Regex> = LazyLock::new(|| {
    regex(r#"(?im)^\+.*\b(?:router|app)\.(?:get|post|put|patch|delete)\s*\(\s*['"`]([^'"`]+)['"`]"#)
});
static ADDED_ROUTE_DECORATOR: LazyLock<Regex> = LazyLock::new(|| {
    regex(r#"(?m)^\+\s*@(?:Get|Post|Put|Patch|Delete)\s*\(\s*['"`]([^'"`]*)['"`]\s*\)"#)
});

static TRY_CATCH: LazyLock<Regex> = LazyLock::new(|| regex(r"try\s*\{[\s\S]*?\}\s*catch"));
static CUSTOM_ERROR: LazyLock<Regex> = LazyLock::new(|| regex(r"\bthrow\s+new\s+\w+Error"));

static AWAIT: LazyLock<Regex> = LazyLock::new(|| regex(r"\bawait\b"));
static THEN_CHAIN: LazyLock<Regex> = LazyLock::new(|| regex(r"\.then\s*\("));

static VALIDATION: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"(?i)\bz\.object\b|\bjoi\.|\byup\.|class-validator|@is(?:string|email|notempty)\b|\bzod\b|\bvalidate\(")
});

static DB_SCHEMA: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"(?i)\bschema\b|\bmigrations?\b|@(?:entity|column|table)\b|\bcreate\s+table\b|\balter\s+table\b|\bprisma\b|\bmongoose\.model\b")
});
static DB_QUERY: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"\bfindOne\b|\bfindAll\b|\bfindBy\w*|\.where\(|\b(?:createQueryBuilder|queryBuilder)\b")
});
static DB_OPTIMIZATION: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)\b(?:index|cache|eager)\b"));

static DEBUG_LOGGING: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"\bconsole\.(?:log|debug|warn|error)\b|\b(?:println|eprintln|dbg)!")
});

static PERFORMANCE: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"\b(?:useMemo|useCallback|React\.memo|memoize|debounce|throttle|cache|Suspense)\b|\blazy\(")
});

/// Authentication / authorization changes.
pub(super) fn auth(ctx: &DiffContext) -> Vec<Signal> {
    if !AUTH.is_match(&ctx.added_content) {
        return Vec::new();
    }
    let verb = if net_added(&AUTH, ctx) { ChangeVerb::Add } else { ChangeVerb::Update };
    vec![Signal::new(SignalKind::Auth, ["authentication"], verb, 9)]
}

/// Middleware registrations (cors, helmet, rate limiting, request logging).
pub(super) fn middleware(ctx: &DiffContext) -> Vec<Signal> {
    if !net_added(&MIDDLEWARE, ctx) {
        return Vec::new();
    }
    let name = first_capture(&MIDDLEWARE_NAME, &ctx.added_content)
        .unwrap_or_else(|| "middleware".to_string());
    vec![Signal::new(SignalKind::Middleware, [name], ChangeVerb::Add, 8)]
}

/// API route declarations, with up to two route paths as subjects.
pub(super) fn routes(ctx: &DiffContext) -> Vec<Signal> {
    let mut paths = captures(&ADDED_ROUTE_PATH, &ctx.raw);
    for path in captures(&ADDED_ROUTE_DECORATOR, &ctx.raw) {
        if !paths.contains(&path) {
            paths.push(path);
        }
    }

    let newly_routed = net_added(&ROUTE_CALL, ctx);
    if paths.is_empty() && !newly_routed {
        return Vec::new();
    }

    let verb = if newly_routed { ChangeVerb::Add } else { ChangeVerb::Update };
    let subjects = if paths.is_empty() {
        vec!["api routes".to_string()]
    } else {
        paths.into_iter().take(2).collect()
    };
    vec![Signal::new(SignalKind::Route, subjects, verb, 7)]
}

/// Error handling additions, removals, or restructuring.
pub(super) fn error_handling(ctx: &DiffContext) -> Vec<Signal> {
    let (verb, score) = if net_added(&TRY_CATCH, ctx) || net_added(&CUSTOM_ERROR, ctx) {
        (ChangeVerb::Add, 8)
    } else if in_both(&TRY_CATCH, ctx) {
        (ChangeVerb::Refactor, 7)
    } else if net_removed(&TRY_CATCH, ctx) {
        (ChangeVerb::Remove, 5)
    } else {
        return Vec::new();
    };
    vec![Signal::new(SignalKind::ErrorHandling, ["error handling"], verb, score)]
}

/// Promise chains converted to async/await.
pub(super) fn async_await(ctx: &DiffContext) -> Vec<Signal> {
    if net_added(&AWAIT, ctx) && net_removed(&THEN_CHAIN, ctx) {
        return vec![Signal::new(
            SignalKind::Async,
            ["promise chains to async/await"],
            ChangeVerb::Refactor,
            8,
        )];
    }
    Vec::new()
}

/// Input validation libraries and decorators.
pub(super) fn validation(ctx: &DiffContext) -> Vec<Signal> {
    if !net_added(&VALIDATION, ctx) {
        return Vec::new();
    }
    vec![Signal::new(SignalKind::Validation, ["input validation"], ChangeVerb::Add, 8)]
}

/// Database schema, model, or query changes.
pub(super) fn database(ctx: &DiffContext) -> Vec<Signal> {
    if net_added(&DB_SCHEMA, ctx) {
        return vec![Signal::new(SignalKind::Database, ["database schema"], ChangeVerb::Add, 8)];
    }
    if in_both(&DB_SCHEMA, ctx) {
        return vec![Signal::new(SignalKind::Database, ["database schema"], ChangeVerb::Update, 7)];
    }
    if net_added(&DB_QUERY, ctx) {
        let verb = if DB_OPTIMIZATION.is_match(&ctx.added_content) {
            ChangeVerb::Optimize
        } else {
            ChangeVerb::Add
        };
        return vec![Signal::new(SignalKind::Database, ["database queries"], verb, 7)];
    }
    Vec::new()
}

/// Debug logging removals (cleanup intent).
pub(super) fn logging(ctx: &DiffContext) -> Vec<Signal> {
    if net_removed(&DEBUG_LOGGING, ctx) {
        return vec![Signal::new(SignalKind::Logging, ["debug logging"], ChangeVerb::Remove, 5)];
    }
    Vec::new()
}

/// Memoization, caching, debouncing and lazy loading.
pub(super) fn performance(ctx: &DiffContext) -> Vec<Signal> {
    if !net_added(&PERFORMANCE, ctx) {
        return Vec::new();
    }
    vec![Signal::new(SignalKind::Performance, ["performance"], ChangeVerb::Optimize, 8)]
}
