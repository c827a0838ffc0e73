//! Lowering infrastructure (tree-sitter-typescript → closed IR)

pub mod binding_resolver;
mod class_lowering;
pub mod expr_lowering;
mod function_lowering;
pub mod stmt_lowering;
pub mod type_lowering;

pub use binding_resolver::{resolve_pattern, Binding};
pub use expr_lowering::lower_expr;
pub use function_lowering::LoweredFunction;
pub use stmt_lowering::StatementLowerer;
pub use type_lowering::{collect_type_param_names, erase_type_params, lower_type, lower_type_annotation};
