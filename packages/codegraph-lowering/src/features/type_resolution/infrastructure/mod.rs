//! Type resolution infrastructure

mod declaration_index;

pub use declaration_index::DeclarationIndex;
