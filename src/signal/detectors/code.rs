//! Detectors for named code entities: components, hooks, functions, classes, types.

use std::sync::LazyLock;

use regex_lite::Regex;

use super::{captures, regex};
use crate::diff::DiffContext;
use crate::signal::{ChangeVerb, Signal, SignalKind};

static JSX_OPEN_TAG: LazyLock<Regex> = LazyLock::new(|| regex(r"<[A-Za-z][\w.]*[\s/>]"));
static JSX_CLOSE_TAG: LazyLock<Regex> = LazyLock::new(|| regex(r"</[A-Za-z]"));

static ADDED_COMPONENT: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"(?m)^\+\s*(?:export\s+)?(?:default\s+)?(?:function|const)\s+([A-Z][A-Za-z0-9_$]*)")
});
static ADDED_HOOK: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"(?m)^\+\s*(?:export\s+)?(?:function|const)\s+(use[A-Z][A-Za-z0-9_$]*)")
});

static ADDED_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"(?m)^\+\s*(?:export\s+)?(?:async\s+)?function\s+([A-Za-z_$][A-Za-z0-9_$]*)")
});
static ADDED_ARROW: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"(?m)^\+\s*(?:export\s+)?(?:const|let)\s+([A-Za-z_$][A-Za-z0-9_$]*)\s*=\s*(?:async\s*)?\(")
});
static REMOVED_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"(?m)^-\s*(?:export\s+)?(?:async\s+)?function\s+([A-Za-z_$][A-Za-z0-9_$]*)")
});
static REMOVED_ARROW: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"(?m)^-\s*(?:export\s+)?(?:const|let)\s+([A-Za-z_$][A-Za-z0-9_$]*)\s*=\s*(?:async\s*)?\(")
});

static ADDED_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"(?m)^\+\s*(?:export\s+)?(?:default\s+)?(?:abstract\s+)?class\s+([A-Za-z_$][A-Za-z0-9_$]*)")
});
static REMOVED_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"(?m)^-\s*(?:export\s+)?(?:default\s+)?(?:abstract\s+)?class\s+([A-Za-z_$][A-Za-z0-9_$]*)")
});

static ADDED_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"(?m)^\+\s*(?:export\s+|pub\s+)?(?:declare\s+)?(?:interface|type|enum|struct|trait)\s+([A-Z][A-Za-z0-9_]*)")
});
static REMOVED_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"(?m)^-\s*(?:export\s+|pub\s+)?(?:declare\s+)?(?:interface|type|enum|struct|trait)\s+([A-Z][A-Za-z0-9_]*)")
});

/// Extracts UI components and custom hooks.
///
/// Components are only recognised when the added content contains tag
/// syntax, so a PascalCase factory function in plain code stays a function.
pub(super) fn components_and_hooks(ctx: &DiffContext) -> Vec<Signal> {
    let mut signals = Vec::new();

    let has_markup =
        JSX_OPEN_TAG.is_match(&ctx.added_content) || JSX_CLOSE_TAG.is_match(&ctx.added_content);

    if has_markup {
        let components = captures(&ADDED_COMPONENT, &ctx.raw);
        if !components.is_empty() {
            signals.push(Signal::new(SignalKind::Component, components, ChangeVerb::Create, 9));
        }
    }

    let hooks = captures(&ADDED_HOOK, &ctx.raw);
    if !hooks.is_empty() {
        signals.push(Signal::new(SignalKind::Hook, hooks, ChangeVerb::Implement, 8));
    }

    signals
}

/// Named function declarations and arrow-function bindings.
///
/// - names only on the added side: implement
/// - exactly one name vanished and exactly one appeared: rename `old → new`
/// - the same names declared on both sides: refactor
pub(super) fn functions(ctx: &DiffContext) -> Vec<Signal> {
    let added = union(
        captures(&ADDED_FUNCTION, &ctx.raw),
        captures(&ADDED_ARROW, &ctx.raw),
    );
    let removed = union(
        captures(&REMOVED_FUNCTION, &ctx.raw),
        captures(&REMOVED_ARROW, &ctx.raw),
    );

    let new_names: Vec<String> = added.iter().filter(|n| !removed.contains(n)).cloned().collect();
    let vanished: Vec<String> = removed.iter().filter(|n| !added.contains(n)).cloned().collect();

    if let ([old], [new]) = (vanished.as_slice(), new_names.as_slice()) {
        return vec![Signal::new(
            SignalKind::Function,
            [format!("{old} → {new}")],
            ChangeVerb::Rename,
            9,
        )];
    }

    if !new_names.is_empty() {
        return vec![Signal::new(SignalKind::Function, new_names, ChangeVerb::Implement, 8)];
    }

    let modified: Vec<String> = added.into_iter().filter(|n| removed.contains(n)).collect();
    if !modified.is_empty() {
        return vec![Signal::new(SignalKind::Function, modified, ChangeVerb::Refactor, 6)];
    }

    Vec::new()
}

/// Named class additions or refactors.
pub(super) fn classes(ctx: &DiffContext) -> Vec<Signal> {
    let added = captures(&ADDED_CLASS, &ctx.raw);
    let removed = captures(&REMOVED_CLASS, &ctx.raw);

    let new_classes: Vec<String> = added.iter().filter(|c| !removed.contains(c)).cloned().collect();

    if !new_classes.is_empty() {
        return vec![Signal::new(SignalKind::Class, new_classes, ChangeVerb::Implement, 7)];
    }
    if !added.is_empty() && !removed.is_empty() {
        return vec![Signal::new(SignalKind::Class, added, ChangeVerb::Refactor, 7)];
    }
    Vec::new()
}

/// Interfaces, type aliases, enums, structs and traits.
pub(super) fn types(ctx: &DiffContext) -> Vec<Signal> {
    let added = captures(&ADDED_TYPE, &ctx.raw);
    let removed = captures(&REMOVED_TYPE, &ctx.raw);

    let new_types: Vec<String> = added.iter().filter(|t| !removed.contains(t)).cloned().collect();

    if !new_types.is_empty() {
        return vec![Signal::new(SignalKind::Type, new_types, ChangeVerb::Add, 6)];
    }
    if !added.is_empty() && !removed.is_empty() {
        return vec![Signal::new(SignalKind::Type, added, ChangeVerb::Update, 5)];
    }
    Vec::new()
}

/// Order-preserving union of two name lists.
fn union(mut first: Vec<String>, second: Vec<String>) -> Vec<String> {
    for name in second {
        if !first.contains(&name) {
            first.push(name);
        }
    }
    first
}
