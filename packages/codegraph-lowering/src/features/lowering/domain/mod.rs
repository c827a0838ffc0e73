//! Lowering Domain - error kinds and the lambda hoisting port

mod error;

pub use error::{LoweringError, LoweringResult, NodeLocation};

use crate::shared::models::Expr;
use tree_sitter::Node;

/// Lambda hoisting port (implemented by statement lowering)
///
/// Expression lowering never inlines a function literal; it hands the node
/// over and receives a reference to the hoisted definition instead.
pub trait LambdaAllocator {
    /// Lower `node` (an arrow/function expression) into a hoisted `FuncDef`
    /// and return a `Var` naming it.
    fn allocate_lambda(&mut self, node: Node<'_>) -> LoweringResult<Expr>;
}
