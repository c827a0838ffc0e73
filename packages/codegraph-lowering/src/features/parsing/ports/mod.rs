//! Parsing ports

mod parser;
mod source_provider;

pub use parser::Parser;
pub use source_provider::SourceProvider;
