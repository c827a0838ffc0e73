//! Per-file lowering result

use serde::{Deserialize, Serialize};

use super::statement::Stmt;

/// One lowered source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    pub statements: Vec<Stmt>,
}

impl Module {
    pub fn new(name: impl Into<String>, statements: Vec<Stmt>) -> Self {
        Self {
            name: name.into(),
            statements,
        }
    }

    /// Number of statements, counting nested bodies
    pub fn statement_count(&self) -> usize {
        fn count(stmt: &Stmt) -> usize {
            1 + match stmt {
                Stmt::If {
                    then, otherwise, ..
                } => count(then) + count(otherwise),
                Stmt::While { body, .. } => count(body),
                Stmt::Block(stmts) => stmts.iter().map(count).sum(),
                Stmt::FuncDef(def) => count(&def.body),
                Stmt::ClassDef(class) => {
                    class.constructor.as_ref().map_or(0, |c| count(&c.def.body))
                        + class.methods.iter().map(|m| count(&m.def.body)).sum::<usize>()
                }
                _ => 0,
            }
        }
        self.statements.iter().map(count).sum()
    }

    /// Top-level definition by name
    pub fn find(&self, name: &str) -> Option<&Stmt> {
        self.statements
            .iter()
            .find(|s| s.defined_name() == Some(name))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::{Expr, Modifiers, VarDef};

    #[test]
    fn test_statement_count_and_find() {
        let module = Module::new(
            "a.ts",
            vec![
                Stmt::VarDef(VarDef {
                    name: "x".to_string(),
                    ty: None,
                    init: Expr::number(1),
                    is_const: true,
                    modifiers: Modifiers::new(),
                }),
                Stmt::while_stmt(
                    Expr::var("c"),
                    Stmt::Block(vec![Stmt::expr(Expr::var("a")), Stmt::expr(Expr::var("b"))]),
                ),
            ],
        );

        assert_eq!(module.statement_count(), 5);
        assert!(module.find("x").is_some());
        assert!(module.find("y").is_none());
    }

    #[test]
    fn test_json_export() {
        let module = Module::new("a.ts", vec![Stmt::comment("break;")]);
        let json = module.to_json().unwrap();
        assert!(json.contains("\"name\": \"a.ts\""));
        assert!(json.contains("break;"));
    }
}
