//! Closed expression vocabulary
//!
//! Operators, `new`, element access and the special forms (`typeof`, spread,
//! ...) all collapse into `Call`, so downstream consumers see one shape.

use serde::{Deserialize, Serialize};

use super::ir_type::Type;
use crate::shared::constants::{placeholders, synthesized};

/// Lowered expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    Var(String),

    /// Placeholder literal; only the category survives lowering
    Const { value: String, ty: Type, line: u32 },

    Call { callee: Box<Expr>, args: Vec<Expr> },

    ObjLiteral { fields: Vec<(String, Expr)> },

    Access { base: Box<Expr>, field: String },

    If {
        cond: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }

    pub fn special(var: SpecialVar) -> Self {
        Expr::Var(var.as_str().to_string())
    }

    pub fn call(callee: Expr, args: Vec<Expr>) -> Self {
        Expr::Call {
            callee: Box::new(callee),
            args,
        }
    }

    /// `FuncCall(Var(sentinel), args)`
    pub fn special_call(var: SpecialVar, args: Vec<Expr>) -> Self {
        Expr::call(Expr::special(var), args)
    }

    pub fn access(base: Expr, field: impl Into<String>) -> Self {
        Expr::Access {
            base: Box::new(base),
            field: field.into(),
        }
    }

    pub fn if_expr(cond: Expr, then: Expr, otherwise: Expr) -> Self {
        Expr::If {
            cond: Box::new(cond),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        }
    }

    pub fn constant(value: impl Into<String>, ty: Type, line: u32) -> Self {
        Expr::Const {
            value: value.into(),
            ty,
            line,
        }
    }

    pub fn number(line: u32) -> Self {
        Expr::constant(placeholders::NUMBER, Type::tvar(placeholders::NUMBER_TYPE), line)
    }

    pub fn string(line: u32) -> Self {
        Expr::constant(placeholders::STRING, Type::tvar(placeholders::STRING_TYPE), line)
    }

    pub fn boolean(line: u32) -> Self {
        Expr::constant(placeholders::BOOL, Type::tvar(placeholders::BOOL_TYPE), line)
    }

    /// `null`, `undefined` and `void e`
    pub fn null(line: u32) -> Self {
        Expr::constant(placeholders::NULL, Type::Any, line)
    }

    /// `new callee(args)` is a call of the `CONSTRUCTOR` member
    pub fn construct(callee: Expr, args: Vec<Expr>) -> Self {
        Expr::call(Expr::access(callee, synthesized::CONSTRUCTOR_FIELD), args)
    }

    /// Name of a plain `Var`, if this is one
    pub fn as_var(&self) -> Option<&str> {
        match self {
            Expr::Var(name) => Some(name),
            _ => None,
        }
    }
}

/// Pre-interned special variables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialVar {
    This,
    Super,
    Switch,
    Case,
    Spread,
    TypeOf,
    Delete,
    Yield,
    Await,
    Throw,
    ArrayAccess,
}

impl SpecialVar {
    pub const ALL: [SpecialVar; 11] = [
        SpecialVar::This,
        SpecialVar::Super,
        SpecialVar::Switch,
        SpecialVar::Case,
        SpecialVar::Spread,
        SpecialVar::TypeOf,
        SpecialVar::Delete,
        SpecialVar::Yield,
        SpecialVar::Await,
        SpecialVar::Throw,
        SpecialVar::ArrayAccess,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpecialVar::This => "this",
            SpecialVar::Super => "super",
            SpecialVar::Switch => "$Switch",
            SpecialVar::Case => "$Case",
            SpecialVar::Spread => "$Spread",
            SpecialVar::TypeOf => "$TypeOf",
            SpecialVar::Delete => "$Delete",
            SpecialVar::Yield => "$Yield",
            SpecialVar::Await => "$Await",
            SpecialVar::Throw => "$Throw",
            SpecialVar::ArrayAccess => "$ArrayAccess",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == name)
    }
}

impl std::fmt::Display for SpecialVar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_var_names_are_distinct() {
        let mut names: Vec<_> = SpecialVar::ALL.iter().map(|v| v.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), SpecialVar::ALL.len());
    }

    #[test]
    fn test_special_var_roundtrip_by_name() {
        for var in SpecialVar::ALL {
            assert_eq!(SpecialVar::from_name(var.as_str()), Some(var));
        }
        assert_eq!(SpecialVar::from_name("foo"), None);
    }

    #[test]
    fn test_construct_shape() {
        let expr = Expr::construct(Expr::var("Foo"), vec![Expr::var("a")]);
        assert_eq!(
            expr,
            Expr::call(Expr::access(Expr::var("Foo"), "CONSTRUCTOR"), vec![Expr::var("a")])
        );
    }
}
