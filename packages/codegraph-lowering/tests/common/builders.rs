//! IR builders for expected values

use codegraph_lowering::shared::models::{Modifiers, VarDef};
use codegraph_lowering::{Expr, Stmt};

/// `name(args)`
pub fn call(name: &str, args: Vec<Expr>) -> Expr {
    Expr::call(Expr::var(name), args)
}

/// `name();` as a statement
pub fn call_stmt(name: &str, args: Vec<Expr>) -> Stmt {
    Stmt::expr(call(name, args))
}

/// Untyped, unmodified variable definition
pub fn var_def(name: &str, init: Expr, is_const: bool) -> Stmt {
    Stmt::VarDef(VarDef {
        name: name.to_string(),
        ty: None,
        init,
        is_const,
        modifiers: Modifiers::new(),
    })
}

/// `this.field`
pub fn this_field(field: &str) -> Expr {
    Expr::access(Expr::var("this"), field)
}
