//! High-level operations.

pub mod disable;
pub mod errors;
pub mod remove_shims;
pub mod resolve_dir;
