//! Structured view of a raw unified diff.

use std::sync::LazyLock;

use regex_lite::Regex;

/// `diff --git a/<path> b/<path>` header; captures the left-hand path.
static FILE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^diff --git a/(.+?) b/").expect("Invalid regex"));

/// Facts extracted once from a diff and shared read-only by every detector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffContext {
    pub raw: String,
    pub lower: String,
    /// Added line bodies with the leading `+` stripped.
    pub added_lines: Vec<String>,
    /// Removed line bodies with the leading `-` stripped.
    pub removed_lines: Vec<String>,
    pub added_content: String,
    pub removed_content: String,
    /// Touched paths, taken from the `a/` side of each file header.
    pub file_names: Vec<String>,
    /// Net line delta: positive = more added, negative = more removed.
    pub line_delta: i64,
}

impl DiffContext {
    /// Parse raw diff text. Never fails: header-less or empty input simply
    /// yields empty sequences and a zero delta.
    pub fn parse(diff: &str) -> Self {
        let mut added_lines = Vec::new();
        let mut removed_lines = Vec::new();

        for line in diff.split('\n') {
            if let Some(body) = line.strip_prefix('+') {
                if !line.starts_with("+++") {
                    added_lines.push(body.to_string());
                }
            } else if let Some(body) = line.strip_prefix('-')
                && !line.starts_with("---")
            {
                removed_lines.push(body.to_string());
            }
        }

        let file_names = FILE_HEADER
            .captures_iter(diff)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect();

        let added_content = added_lines.join("\n");
        let removed_content = removed_lines.join("\n");
        let line_delta = added_lines.len() as i64 - removed_lines.len() as i64;

        Self {
            raw: diff.to_string(),
            lower: diff.to_lowercase(),
            added_lines,
            removed_lines,
            added_content,
            removed_content,
            file_names,
            line_delta,
        }
    }

    /// Whether the diff contains no added or removed lines at all.
    pub fn is_unchanged(&self) -> bool {
        self.added_lines.is_empty() && self.removed_lines.is_empty()
    }

    /// First touched file, if any header was present.
    pub fn primary_file(&self) -> Option<&str> {
        self.file_names.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "diff --git a/src/cart/cart.ts b/src/cart/cart.ts
index 3b18e51..a9c2f10 100644
--- a/src/cart/cart.ts
+++ b/src/cart/cart.ts
@@ -1,3 +1,4 @@
 import { Item } from './item';
-const total = 0;
+let total = 0;
+export function addToCart(item) {}
diff --git a/README.md b/README.md
--- a/README.md
+++ b/README.md
@@ -1 +1 @@
+# Cart
";

    #[test]
    fn test_parse_classifies_added_and_removed_lines() {
        let ctx = DiffContext::parse(SAMPLE);
        assert_eq!(
            ctx.added_lines,
            vec!["let total = 0;", "export function addToCart(item) {}", "# Cart"]
        );
        assert_eq!(ctx.removed_lines, vec!["const total = 0;"]);
        assert_eq!(ctx.line_delta, 2);
    }

    #[test]
    fn test_parse_skips_file_markers() {
        let ctx = DiffContext::parse(SAMPLE);
        assert!(!ctx.added_content.contains("b/src/cart/cart.ts"));
        assert!(!ctx.removed_content.contains("a/src/cart/cart.ts"));
    }

    #[test]
    fn test_parse_extracts_file_names_in_order() {
        let ctx = DiffContext::parse(SAMPLE);
        assert_eq!(ctx.file_names, vec!["src/cart/cart.ts", "README.md"]);
        assert_eq!(ctx.primary_file(), Some("src/cart/cart.ts"));
    }

    #[test]
    fn test_parse_joins_content_per_side() {
        let ctx = DiffContext::parse(SAMPLE);
        assert_eq!(
            ctx.added_content,
            "let total = 0;\nexport function addToCart(item) {}\n# Cart"
        );
        assert_eq!(ctx.removed_content, "const total = 0;");
    }

    #[test]
    fn test_parse_keeps_lowercase_copy() {
        let ctx = DiffContext::parse("+ addToCart");
        assert_eq!(ctx.lower, "+ addtocart");
        assert_eq!(ctx.raw, "+ addToCart");
    }

    #[test]
    fn test_parse_empty_input() {
        let ctx = DiffContext::parse("");
        assert!(ctx.added_lines.is_empty());
        assert!(ctx.removed_lines.is_empty());
        assert!(ctx.file_names.is_empty());
        assert_eq!(ctx.line_delta, 0);
        assert!(ctx.is_unchanged());
        assert_eq!(ctx.primary_file(), None);
    }

    #[test]
    fn test_parse_headerless_diff() {
        let ctx = DiffContext::parse("- console.log(\"debug\");\n");
        assert!(ctx.file_names.is_empty());
        assert_eq!(ctx.removed_lines, vec![" console.log(\"debug\");"]);
        assert_eq!(ctx.line_delta, -1);
    }
}
