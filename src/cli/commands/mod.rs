//! CLI command implementations

pub mod completions;
pub mod fields;
pub mod submit;
pub mod validate;
