//! Rendering ranked signals as prose descriptions and branch slugs.

pub mod branch;
pub mod description;

pub use branch::{MAX_SLUG_LENGTH, MIN_SLUG_LENGTH, SlugRules, branch_name, split_identifier};
pub use description::{
    DEFAULT_REFACTOR_THRESHOLD, NO_CHANGES, fallback_description, join_with_and, synthesize,
};
