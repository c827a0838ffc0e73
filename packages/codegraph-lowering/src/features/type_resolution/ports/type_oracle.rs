//! Type oracle port
//!
//! Best-effort lookup of the declared type of a value name. Lowering asks it
//! only for unannotated variable initializers; it never performs inference.

use crate::shared::models::Type;

pub trait TypeOracle: Send + Sync {
    /// Declared type of a top-level value, if known
    fn declared_type(&self, name: &str) -> Option<Type>;

    /// Number of names the oracle can answer for
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Oracle that knows nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTypeOracle;

impl TypeOracle for NoTypeOracle {
    fn declared_type(&self, _name: &str) -> Option<Type> {
        None
    }

    fn len(&self) -> usize {
        0
    }
}
