//! Shared models
//!
//! The closed IR vocabulary every lowering stage produces.

pub mod expression;
pub mod ir_type;
pub mod module;
pub mod statement;

pub use expression::{Expr, SpecialVar};
pub use ir_type::Type;
pub use module::Module;
pub use statement::{
    flatten_block, strip_definitions, ClassDef, ClassField, ClassMethod, Constructor, FuncDef,
    Modifier, Modifiers, Param, Stmt, TypeAlias, VarDef,
};
