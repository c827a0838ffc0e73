//! Parsing domain models

mod parsed_file;

pub use parsed_file::{ParseError, ParsedFile, ProgramContext};
