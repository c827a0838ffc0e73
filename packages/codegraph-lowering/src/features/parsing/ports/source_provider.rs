//! Source provider port
//!
//! Turns source and library paths into a `ProgramContext`. The module driver
//! only talks to this trait, so tests can hand it in-memory programs.

use crate::errors::Result;
use crate::features::parsing::domain::ProgramContext;

pub trait SourceProvider: Send + Sync {
    /// Parse `sources` and build the type oracle from `libraries`
    fn load(&self, sources: &[String], libraries: &[String]) -> Result<ProgramContext>;

    /// Parse in-memory `(path, text)` pairs with no library declarations
    fn load_in_memory(&self, files: &[(String, String)]) -> Result<ProgramContext>;
}
