//! Integration tests for the engine facade and prompt completion.

mod common;

use std::collections::HashSet;

use autoforge::engine::{EMPTY_DIFF_BRANCH, EMPTY_DIFF_COMMIT};
use autoforge::{CommitType, EngineConfig, FallbackEngine, OutputMode};
use common::file_diff;

#[test]
fn test_commit_message_format() {
    let diff = file_diff("src/cart/cart.ts", &["+export function addToCart(item) {", "+}"]);
    assert_eq!(
        FallbackEngine::default().commit_message(&diff),
        "feat(cart): implement addToCart"
    );
}

#[test]
fn test_dependency_bump_is_build_not_feat() {
    let diff = file_diff("package.json", &["-  \"zod\": \"^3.21.0\",", "+  \"zod\": \"^3.22.0\","]);
    let analysis = FallbackEngine::default().analyze(&diff);
    assert_eq!(analysis.commit_type, CommitType::Build);
}

#[test]
fn test_logging_removal_is_style() {
    let diff = file_diff("src/checkout/summary.ts", &["-  console.log(\"total\", total);"]);
    let analysis = FallbackEngine::default().analyze(&diff);
    assert_eq!(analysis.commit_type, CommitType::Style);
    assert_eq!(analysis.commit_message(false), "style(cart): remove debug logging");
}

#[test]
fn test_error_handling_wins_over_feature() {
    let diff = file_diff(
        "src/orders/create.ts",
        &[
            "+export function createOrder(input) {",
            "+  try {",
            "+    return save(input);",
            "+  } catch (err) {",
            "+    throw new OrderError(err);",
            "+  }",
            "+}",
        ],
    );
    let analysis = FallbackEngine::default().analyze(&diff);
    assert_eq!(analysis.commit_type, CommitType::Fix);
    assert_eq!(analysis.scope, "orders");
}

#[test]
fn test_scope_from_auth_domain() {
    let diff = file_diff("src/auth/loginHandler.ts", &["+export function loginHandler() {}"]);
    let message = FallbackEngine::default().commit_message(&diff);
    assert!(message.contains("(auth)"), "{message}");
}

#[test]
fn test_branch_name_through_engine() {
    let diff = file_diff("src/cart/cart.ts", &["+export function addToCart(item) {", "+}"]);
    assert_eq!(FallbackEngine::default().branch_name(&diff), "feat/cart-add-cart");
}

#[test]
fn test_empty_diff_properties() {
    let engine = FallbackEngine::default();
    assert_eq!(engine.describe(""), "no changes detected");
    assert_eq!(engine.branch_name(""), "chore/core-update");
    assert_eq!(engine.commit_message(""), "chore(core): no changes detected");
}

#[test]
fn test_describe_is_never_empty() {
    let engine = FallbackEngine::default();
    for diff in ["", "garbage", "+", "-", "diff --git a/x b/x", "+++ b/x\n--- a/x"] {
        assert!(!engine.describe(diff).is_empty(), "empty description for {diff:?}");
    }
}

#[test]
fn test_analysis_is_deterministic() {
    let diff = file_diff(
        "src/api/routes.ts",
        &["+router.post(\"/orders\", create);", "+export function create(req, res) {}"],
    );
    let engine = FallbackEngine::default();
    assert_eq!(engine.analyze(&diff), engine.analyze(&diff));
}

#[test]
fn test_ranked_signals_are_bounded_and_unique() {
    let diff = file_diff(
        "src/app.ts",
        &[
            "+export function boot() {}",
            "+class Server {}",
            "+interface Options {}",
            "+app.use(helmet());",
            "+app.get(\"/health\", ok);",
            "+const token = jwt.sign(payload);",
            "+const schema = z.object({});",
            "+const v = useMemo(() => 1, []);",
        ],
    );
    let analysis = FallbackEngine::default().analyze(&diff);
    assert!(analysis.signals.len() <= 4);

    let kinds: HashSet<_> = analysis.signals.iter().map(|s| s.kind).collect();
    assert_eq!(kinds.len(), analysis.signals.len());
    assert!(
        analysis
            .signals
            .as_slice()
            .windows(2)
            .all(|w| w[0].score >= w[1].score)
    );
}

#[test]
fn test_custom_config() {
    let config = EngineConfig::default()
        .with_max_slug_length(20)
        .with_type(Some(CommitType::Feat));
    let engine = FallbackEngine::new(config);
    let diff = file_diff("src/cart/cart.ts", &["+export function calculateShippingTotal() {}"]);
    assert_eq!(engine.branch_name(&diff), "feat/cart-add-calculate");
}

#[test]
fn test_complete_commit_mode() {
    let prompt = "Generate a commit message please\nDiff:\ndiff --git a/src/cart/addToCart.ts b/src/cart/addToCart.ts\n+ function addToCart(){}\n";
    assert_eq!(
        FallbackEngine::default().complete(prompt),
        "feat(cart): implement addToCart"
    );
}

#[test]
fn test_complete_branch_mode() {
    let prompt = "Create branch name\nDiff:\ndiff --git a/src/cart/addToCart.ts b/src/cart/addToCart.ts\n+ function addToCart(){}\n";
    assert_eq!(FallbackEngine::default().complete(prompt), "feat/cart-add-cart");
}

#[test]
fn test_complete_defaults_to_commit_mode() {
    let prompt = "\n            Here is a diff:\n            diff --git a/a.ts b/a.ts\n            + new code\n            ";
    assert_eq!(OutputMode::detect(prompt), OutputMode::Commit);
    let result = FallbackEngine::default().complete(prompt);
    assert_ne!(result, EMPTY_DIFF_COMMIT);
    assert_eq!(result, "chore(a): modify files");

    let prompt = "Here is a diff:\ndiff --git a/a.ts b/a.ts\n+ export function run() {}\n";
    assert!(FallbackEngine::default().complete(prompt).starts_with("feat("));
}

#[test]
fn test_complete_without_diff() {
    let engine = FallbackEngine::default();
    assert_eq!(engine.complete("commit message please"), EMPTY_DIFF_COMMIT);
    assert_eq!(engine.complete("branch name please\nDiff:\n   "), EMPTY_DIFF_BRANCH);
}
