//! Custom assertions for lowered modules

use codegraph_lowering::shared::models::{ClassDef, FuncDef, TypeAlias, VarDef};
use codegraph_lowering::{Module, Stmt};

/// Top-level function named `name`
pub fn expect_func<'m>(module: &'m Module, name: &str) -> &'m FuncDef {
    match module.find(name) {
        Some(Stmt::FuncDef(def)) => def,
        other => panic!("expected function {}, got {:?}", name, other),
    }
}

/// Top-level class named `name`
pub fn expect_class<'m>(module: &'m Module, name: &str) -> &'m ClassDef {
    match module.find(name) {
        Some(Stmt::ClassDef(def)) => def,
        other => panic!("expected class {}, got {:?}", name, other),
    }
}

/// Top-level type alias named `name`
pub fn expect_alias<'m>(module: &'m Module, name: &str) -> &'m TypeAlias {
    match module.find(name) {
        Some(Stmt::TypeAlias(alias)) => alias,
        other => panic!("expected type alias {}, got {:?}", name, other),
    }
}

/// Top-level variable named `name`
pub fn expect_var<'m>(module: &'m Module, name: &str) -> &'m VarDef {
    match module.find(name) {
        Some(Stmt::VarDef(def)) => def,
        other => panic!("expected variable {}, got {:?}", name, other),
    }
}

/// Names defined at top level, in order
pub fn defined_names(stmts: &[Stmt]) -> Vec<&str> {
    stmts.iter().filter_map(Stmt::defined_name).collect()
}
