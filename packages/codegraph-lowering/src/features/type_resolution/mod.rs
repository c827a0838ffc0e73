//! Type Resolution Feature
//!
//! A syntactic, best-effort value → declared-type index. Library
//! declaration files (`.d.ts`) feed it; lowering consults it through the
//! `TypeOracle` port when a variable has no annotation.
//!
//! ## Structure
//! - `ports/` - TypeOracle trait, NoTypeOracle
//! - `infrastructure/` - DeclarationIndex (tree-sitter backed)

pub mod infrastructure;
pub mod ports;

pub use infrastructure::DeclarationIndex;
pub use ports::{NoTypeOracle, TypeOracle};
