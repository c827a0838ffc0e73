//! Closed statement vocabulary

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::expression::Expr;
use super::ir_type::Type;
use crate::shared::constants::synthesized;

/// Declaration modifier tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Export,
    Default,
    Declare,
    Const,
    Abstract,
    Async,
    Static,
    Readonly,
    Public,
    Private,
    Protected,
    Override,
    Get,
    Set,
}

impl Modifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Modifier::Export => "export",
            Modifier::Default => "default",
            Modifier::Declare => "declare",
            Modifier::Const => "const",
            Modifier::Abstract => "abstract",
            Modifier::Async => "async",
            Modifier::Static => "static",
            Modifier::Readonly => "readonly",
            Modifier::Public => "public",
            Modifier::Private => "private",
            Modifier::Protected => "protected",
            Modifier::Override => "override",
            Modifier::Get => "get",
            Modifier::Set => "set",
        }
    }

    /// Parse a modifier keyword as it appears in source
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "export" => Some(Modifier::Export),
            "default" => Some(Modifier::Default),
            "declare" => Some(Modifier::Declare),
            "const" => Some(Modifier::Const),
            "abstract" => Some(Modifier::Abstract),
            "async" => Some(Modifier::Async),
            "static" => Some(Modifier::Static),
            "readonly" => Some(Modifier::Readonly),
            "public" => Some(Modifier::Public),
            "private" => Some(Modifier::Private),
            "protected" => Some(Modifier::Protected),
            "override" => Some(Modifier::Override),
            "get" => Some(Modifier::Get),
            "set" => Some(Modifier::Set),
            _ => None,
        }
    }
}

pub type Modifiers = BTreeSet<Modifier>;

/// Lowered statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stmt {
    VarDef(VarDef),
    Assign { lhs: Expr, rhs: Expr },
    Expr { expr: Expr, is_return: bool },
    If {
        cond: Expr,
        then: Box<Stmt>,
        otherwise: Box<Stmt>,
    },
    While { cond: Expr, body: Box<Stmt> },
    Block(Vec<Stmt>),
    Import(String),
    Export(String),
    /// Opaque placeholder for constructs the vocabulary does not model
    Comment(String),
    TypeAlias(TypeAlias),
    FuncDef(FuncDef),
    ClassDef(ClassDef),
}

impl Stmt {
    pub fn expr(expr: Expr) -> Self {
        Stmt::Expr {
            expr,
            is_return: false,
        }
    }

    pub fn ret(expr: Expr) -> Self {
        Stmt::Expr {
            expr,
            is_return: true,
        }
    }

    pub fn assign(lhs: Expr, rhs: Expr) -> Self {
        Stmt::Assign { lhs, rhs }
    }

    pub fn if_stmt(cond: Expr, then: Stmt, otherwise: Stmt) -> Self {
        Stmt::If {
            cond,
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        }
    }

    pub fn while_stmt(cond: Expr, body: Stmt) -> Self {
        Stmt::While {
            cond,
            body: Box::new(body),
        }
    }

    pub fn empty_block() -> Self {
        Stmt::Block(Vec::new())
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Stmt::Comment(text.into())
    }

    /// Name of the definition this statement introduces, if any
    pub fn defined_name(&self) -> Option<&str> {
        match self {
            Stmt::VarDef(def) => Some(&def.name),
            Stmt::TypeAlias(alias) => Some(&alias.name),
            Stmt::FuncDef(def) => Some(&def.name),
            Stmt::ClassDef(def) => Some(&def.name),
            _ => None,
        }
    }

    /// Same statement with nested function, class and type definitions
    /// removed; `None` when the statement is itself a definition
    pub fn without_definitions(self) -> Option<Stmt> {
        match self {
            Stmt::FuncDef(_) | Stmt::ClassDef(_) | Stmt::TypeAlias(_) => None,
            Stmt::Block(stmts) => Some(Stmt::Block(strip_definitions(stmts))),
            Stmt::If {
                cond,
                then,
                otherwise,
            } => Some(Stmt::If {
                cond,
                then: Box::new(then.without_definitions().unwrap_or_else(Stmt::empty_block)),
                otherwise: Box::new(
                    otherwise
                        .without_definitions()
                        .unwrap_or_else(Stmt::empty_block),
                ),
            }),
            Stmt::While { cond, body } => Some(Stmt::While {
                cond,
                body: Box::new(body.without_definitions().unwrap_or_else(Stmt::empty_block)),
            }),
            other => Some(other),
        }
    }
}

/// A single statement stays as-is; anything else becomes a block.
pub fn flatten_block(mut stmts: Vec<Stmt>) -> Stmt {
    if stmts.len() == 1 {
        stmts.remove(0)
    } else {
        Stmt::Block(stmts)
    }
}

/// Drop every definition from `stmts`, at any nesting depth
pub fn strip_definitions(stmts: Vec<Stmt>) -> Vec<Stmt> {
    stmts.into_iter().filter_map(Stmt::without_definitions).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarDef {
    pub name: String,
    pub ty: Option<Type>,
    pub init: Expr,
    pub is_const: bool,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeAlias {
    pub name: String,
    pub type_params: Vec<String>,
    pub ty: Type,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub ty: Option<Type>,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: Option<Type>) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuncDef {
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: Option<Type>,
    pub body: Box<Stmt>,
    pub modifiers: Modifiers,
    pub type_params: Vec<String>,
}

impl FuncDef {
    pub fn is_constructor(&self) -> bool {
        self.name == synthesized::CONSTRUCTOR_NAME
    }

    /// Constructors may only declare `void` (or nothing) as return type.
    pub fn has_valid_return(&self) -> bool {
        !self.is_constructor() || self.return_type.as_ref().map_or(true, Type::is_void)
    }
}

/// Constructor with the parameters promoted to fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constructor {
    pub def: FuncDef,
    pub public_vars: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassField {
    pub name: String,
    pub ty: Option<Type>,
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassMethod {
    pub def: FuncDef,
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDef {
    pub name: String,
    pub constructor: Option<Constructor>,
    pub fields: Vec<ClassField>,
    pub methods: Vec<ClassMethod>,
    pub superclass: Option<String>,
    pub modifiers: Modifiers,
    pub type_params: Vec<String>,
}

impl ClassDef {
    pub fn field(&self, name: &str) -> Option<&ClassField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn method(&self, name: &str) -> Option<&ClassMethod> {
        self.methods.iter().find(|m| m.def.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_single() {
        let stmt = Stmt::expr(Expr::var("x"));
        assert_eq!(flatten_block(vec![stmt.clone()]), stmt);
    }

    #[test]
    fn test_flatten_many_and_empty() {
        let a = Stmt::expr(Expr::var("a"));
        let b = Stmt::expr(Expr::var("b"));
        assert_eq!(
            flatten_block(vec![a.clone(), b.clone()]),
            Stmt::Block(vec![a, b])
        );
        assert_eq!(flatten_block(vec![]), Stmt::Block(vec![]));
    }

    #[test]
    fn test_strip_definitions_reaches_nested_branches() {
        let def = Stmt::FuncDef(FuncDef {
            name: "$Lambda0".to_string(),
            params: Vec::new(),
            return_type: None,
            body: Box::new(Stmt::empty_block()),
            modifiers: Modifiers::new(),
            type_params: Vec::new(),
        });
        let use_it = Stmt::expr(Expr::var("$Lambda0"));
        let nested = Stmt::if_stmt(
            Expr::var("c"),
            Stmt::Block(vec![def.clone(), use_it.clone()]),
            def.clone(),
        );

        assert_eq!(
            strip_definitions(vec![def, nested, use_it.clone()]),
            vec![
                Stmt::if_stmt(
                    Expr::var("c"),
                    Stmt::Block(vec![use_it.clone()]),
                    Stmt::empty_block(),
                ),
                use_it,
            ]
        );
    }

    #[test]
    fn test_constructor_return_rule() {
        let mut def = FuncDef {
            name: "Constructor".to_string(),
            params: vec![],
            return_type: None,
            body: Box::new(Stmt::empty_block()),
            modifiers: Modifiers::new(),
            type_params: vec![],
        };
        assert!(def.has_valid_return());

        def.return_type = Some(Type::tvar("void"));
        assert!(def.has_valid_return());

        def.return_type = Some(Type::tvar("number"));
        assert!(!def.has_valid_return());
    }

    #[test]
    fn test_modifier_keywords() {
        assert_eq!(Modifier::from_keyword("static"), Some(Modifier::Static));
        assert_eq!(Modifier::from_keyword("get"), Some(Modifier::Get));
        assert_eq!(Modifier::from_keyword("let"), None);
        assert_eq!(Modifier::Readonly.as_str(), "readonly");
    }
}
