//! Diff acquisition, redaction and parsing.

pub mod collect;
pub mod context;
pub mod redact;

pub use collect::{DiffSummary, collect_staged_diff};
pub use context::DiffContext;
pub use redact::{Redacted, is_fully_redacted, redact_diff};
