//! Integration tests for diff summarization through the full pipeline.

use autoforge::signal::{detect_all, rank_signals};
use autoforge::{DiffContext, FallbackEngine, SignalKind};

fn describe(diff: &str) -> String {
    FallbackEngine::default().describe(diff)
}

#[test]
fn test_new_function_implementation() {
    let diff = "\n+ export function addToCart(item) {\n+   return cart.push(item);\n+ }\n";
    assert!(describe(diff).contains("implement addToCart"));
}

#[test]
fn test_component_creation() {
    let diff = "\n+ export default function ProductPage() {\n+   return <div>Product</div>;\n+ }\n";
    assert!(describe(diff).contains("create ProductPage"));
}

#[test]
fn test_authentication_addition() {
    let diff = "\n+ router.use(authenticateUser);\n+ const token = jwt.sign(payload, SECRET);\n";
    let result = describe(diff);
    assert!(result.contains("authentication"));
    assert_eq!(result, "add authentication and middleware");
}

#[test]
fn test_async_await_refactor() {
    let diff = "\n- fetchData().then(res => handle(res));\n+ const res = await fetchData();\n+ handle(res);\n";
    assert_eq!(describe(diff), "refactor promise chains to async/await");
}

#[test]
fn test_database_schema_change() {
    let diff = "\n+ const UserSchema = new mongoose.Schema({\n+   name: String\n+ });\n";
    assert!(describe(diff).contains("database"));
}

#[test]
fn test_dependency_update() {
    let diff = "\ndiff --git a/package.json b/package.json\n+ \"zod\": \"^3.22.0\"\n- \"zod\": \"^3.21.0\"\n";
    assert_eq!(describe(diff), "update dependencies");
}

#[test]
fn test_test_addition() {
    let diff = "\ndiff --git a/user.service.test.ts b/user.service.test.ts\n+ describe(\"UserService\", () => {\n+   it(\"should create user\", () => {\n+     expect(true).toBe(true);\n+   });\n+ });\n";
    assert!(describe(diff).contains("unit tests"));
}

#[test]
fn test_logging_removal() {
    let diff = "\n- console.log(\"debug info\");\n";
    assert!(describe(diff).contains("remove debug logging"));
}

#[test]
fn test_fallback_without_semantic_signal() {
    let diff = "\n+ const a = 1;\n- const b = 2;\n";
    assert_eq!(describe(diff), "update logic");
}

#[test]
fn test_structural_fallbacks() {
    assert_eq!(describe("+ let a = 1;\n"), "add new functionality");
    assert_eq!(describe("- let a = 1;\n"), "remove unused code");
    assert_eq!(describe("diff --git a/x.txt b/x.txt\n unchanged\n"), "modify files");

    let mut large = String::new();
    for i in 0..30 {
        large.push_str(&format!("+ let a{i} = {i};\n"));
    }
    large.push_str("- let old = 0;\n");
    assert_eq!(describe(&large), "refactor existing logic");
}

#[test]
fn test_empty_diff() {
    assert_eq!(describe(""), "no changes detected");
    assert_eq!(describe("  \n\t\n"), "no changes detected");
}

#[test]
fn test_ranked_signals() {
    let diff = "\n+ export function calculateTotal() {}\n+ router.post(\"/orders\", handler);\n";
    let ranked = rank_signals(detect_all(&DiffContext::parse(diff)));

    assert!(!ranked.is_empty());
    let kinds: Vec<SignalKind> = ranked.iter().map(|s| s.kind).collect();
    assert_eq!(kinds, vec![SignalKind::Function, SignalKind::Route]);
    assert!(ranked.as_slice().windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn test_mixed_signals_group_by_verb() {
    let diff = "\n+ export function calculateTotal() {}\n+ router.post(\"/orders\", handler);\n";
    assert_eq!(describe(diff), "implement calculateTotal, and add /orders");
}
