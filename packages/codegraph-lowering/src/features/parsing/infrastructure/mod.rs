//! Parsing infrastructure - external dependencies

mod provider;
pub mod tree_sitter;

pub use provider::TreeSitterProvider;
pub use tree_sitter::{TreeSitterParser, TsDialect};
