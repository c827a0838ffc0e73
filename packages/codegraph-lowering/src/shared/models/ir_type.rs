//! Closed type vocabulary
//!
//! Every TypeScript annotation lowers onto one of four shapes. Named
//! references stay unresolved (`TVar`), so the only cycles are through names.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Lowered type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    /// Named type reference (unresolved)
    TVar(String),

    /// Unknown / erased
    Any,

    /// Function type
    Func { args: Vec<Type>, to: Box<Type> },

    /// Structural object type; field names are not required to be unique
    Object { fields: Vec<(String, Type)> },
}

impl Type {
    pub fn tvar(name: impl Into<String>) -> Self {
        Type::TVar(name.into())
    }

    pub fn func(args: Vec<Type>, to: Type) -> Self {
        Type::Func {
            args,
            to: Box::new(to),
        }
    }

    pub fn object(fields: Vec<(String, Type)>) -> Self {
        Type::Object { fields }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Type::Any)
    }

    /// `void` return types are allowed on constructors
    pub fn is_void(&self) -> bool {
        matches!(self, Type::TVar(name) if name == "void")
    }

    /// Replace every `TVar` whose name is in `names` with `Any`.
    ///
    /// Pure name substitution, recursing through function and object types.
    pub fn erase_params(&self, names: &HashSet<String>) -> Type {
        if names.is_empty() {
            return self.clone();
        }
        match self {
            Type::TVar(name) if names.contains(name) => Type::Any,
            Type::TVar(_) | Type::Any => self.clone(),
            Type::Func { args, to } => Type::Func {
                args: args.iter().map(|a| a.erase_params(names)).collect(),
                to: Box::new(to.erase_params(names)),
            },
            Type::Object { fields } => Type::Object {
                fields: fields
                    .iter()
                    .map(|(name, ty)| (name.clone(), ty.erase_params(names)))
                    .collect(),
            },
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::TVar(name) => write!(f, "{}", name),
            Type::Any => write!(f, "*"),
            Type::Func { args, to } => {
                let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
                write!(f, "({}) -> {}", args.join(", "), to)
            }
            Type::Object { fields } => {
                let fields: Vec<String> = fields
                    .iter()
                    .map(|(name, ty)| format!("{}: {}", name, ty))
                    .collect();
                write!(f, "{{{}}}", fields.join(", "))
            }
        }
    }
}
