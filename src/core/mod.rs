//! Core domain types.

pub mod package_manager;
pub mod yarn_switch;
