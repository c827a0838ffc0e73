//! Parser port (interface)
//!
//! Defines the contract for parsing source code.

use crate::errors::Result;
use crate::features::parsing::domain::ParsedFile;

/// Parser trait - abstraction over parsing implementation
pub trait Parser: Send + Sync {
    /// Parse source code into a ParsedFile
    fn parse(&self, source: &str, file_path: &str) -> Result<ParsedFile>;

    /// Check if this parser supports the given file extension
    fn supports_extension(&self, ext: &str) -> bool;

    /// Get supported language name
    fn language_name(&self) -> &'static str;
}
