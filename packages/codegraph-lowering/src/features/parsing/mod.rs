//! Parsing Feature
//!
//! Reads TypeScript sources, parses them with tree-sitter and hands the
//! trees, together with a type oracle, to the module driver.
//!
//! ## Structure
//! - `domain/` - ParsedFile, ProgramContext
//! - `ports/` - Parser, SourceProvider
//! - `infrastructure/` - TreeSitterParser, TreeSitterProvider, node kinds

pub mod domain;
pub mod infrastructure;
pub mod ports;

// Re-exports
pub use domain::{ParseError, ParsedFile, ProgramContext};
pub use infrastructure::{TreeSitterParser, TreeSitterProvider, TsDialect};
pub use ports::{Parser, SourceProvider};
