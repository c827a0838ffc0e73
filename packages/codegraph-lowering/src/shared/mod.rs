//! Shared module - Common types and utilities
//!
//! This module contains types that are shared across all features.
//! Only `utils::tree_sitter` touches the parser crate.

pub mod constants;
pub mod models;
pub mod utils;

// Re-exports for convenience
pub use models::*;
