//! Grammar-specific node kinds and predicates

pub mod typescript;

pub use typescript::node_kinds;
