//! Type resolution ports

mod type_oracle;

pub use type_oracle::{NoTypeOracle, TypeOracle};
