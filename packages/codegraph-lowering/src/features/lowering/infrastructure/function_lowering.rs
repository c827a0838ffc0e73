//! Function Lowering
//!
//! Declarations, methods, accessors, constructors and hoisted lambdas all go
//! through `lower_function`. Destructured parameters get a synthesized
//! `$Param{i}` name and are expanded at the head of the body.

use tree_sitter::Node;

use super::stmt_lowering::StatementLowerer;
use crate::features::lowering::domain::{LoweringError, LoweringResult};
use crate::features::lowering::infrastructure::binding_resolver::resolve_pattern;
use crate::features::lowering::infrastructure::expr_lowering::identifier_name;
use crate::features::parsing::infrastructure::tree_sitter::languages::typescript::node_kinds;
use crate::shared::constants::synthesized;
use crate::shared::models::{
    flatten_block, Expr, FuncDef, Modifier, Modifiers, Param, Stmt, Type, VarDef,
};
use crate::shared::utils::tree_sitter::{
    find_child_by_kind, first_named_child, has_keyword, named_children,
};

/// Keyword tokens that carry over to the lowered definition
const FUNCTION_KEYWORDS: [&str; 3] = ["async", "get", "set"];

/// A lowered function plus the parameters promoted to fields
#[derive(Debug, Clone)]
pub struct LoweredFunction {
    pub def: FuncDef,
    /// Parameters carrying `public`/`private`/`protected`/`readonly`, in order
    pub promoted: Vec<Param>,
}

impl<'a> StatementLowerer<'a> {
    /// Lower any function-shaped node under `name`
    pub(super) fn lower_function(
        &mut self,
        node: Node<'_>,
        name: String,
        mut modifiers: Modifiers,
    ) -> LoweringResult<LoweredFunction> {
        if name.is_empty() {
            return Err(LoweringError::structural(node, "function without a name"));
        }
        for keyword in FUNCTION_KEYWORDS {
            if has_keyword(node, keyword) {
                if let Some(modifier) = Modifier::from_keyword(keyword) {
                    modifiers.insert(modifier);
                }
            }
        }

        let type_params = self.enter_type_params(node);
        let lowered = self.lower_function_parts(node, name, modifiers, type_params);
        self.exit_type_params();

        let lowered = lowered?;
        if !lowered.def.has_valid_return() {
            return Err(LoweringError::structural(
                node,
                "constructor may only declare a void return type",
            ));
        }
        Ok(lowered)
    }

    fn lower_function_parts(
        &mut self,
        node: Node<'_>,
        name: String,
        modifiers: Modifiers,
        type_params: Vec<String>,
    ) -> LoweringResult<LoweredFunction> {
        let mut params = Vec::new();
        let mut promoted = Vec::new();
        let mut prelude = Vec::new();

        if let Some(parameters) = node.child_by_field_name("parameters") {
            for (index, param) in named_children(parameters).into_iter().enumerate() {
                let lowered = self.lower_parameter(param, index, &mut prelude)?;
                if is_promoted(param) {
                    promoted.push(lowered.clone());
                }
                params.push(lowered);
            }
        } else if let Some(single) = node.child_by_field_name("parameter") {
            // `x => ...`
            params.push(Param::new(identifier_name(single, self.source)?, None));
        }

        let return_type = self.annotation(node.child_by_field_name("return_type"))?;

        let mut body = prelude;
        match node.child_by_field_name("body") {
            Some(block) if block.kind() == node_kinds::STATEMENT_BLOCK => {
                body.extend(self.lower_body(block)?);
            }
            // Expression-bodied arrow: `=> e` returns `e`
            Some(expr) => {
                body.extend(self.hoisting_scope(|this| Ok(vec![Stmt::ret(this.expr(expr)?)]))?);
            }
            None => {}
        }

        Ok(LoweredFunction {
            def: FuncDef {
                name,
                params,
                return_type,
                body: Box::new(flatten_block(body)),
                modifiers,
                type_params,
            },
            promoted,
        })
    }

    /// One formal parameter; destructuring patterns push their bindings to `prelude`
    fn lower_parameter(
        &mut self,
        param: Node<'_>,
        index: usize,
        prelude: &mut Vec<Stmt>,
    ) -> LoweringResult<Param> {
        match param.kind() {
            node_kinds::REQUIRED_PARAMETER | node_kinds::OPTIONAL_PARAMETER => {}
            _ => return Err(LoweringError::unsupported(param, self.source)),
        }

        let ty = self.annotation(param.child_by_field_name("type"))?;
        let pattern = self.required(param, "pattern")?;
        let pattern = match pattern.kind() {
            node_kinds::REST_PATTERN => first_named_child(pattern)
                .ok_or_else(|| LoweringError::missing_child(pattern, "pattern"))?,
            _ => pattern,
        };

        match pattern.kind() {
            node_kinds::IDENTIFIER | node_kinds::THIS => {
                Ok(Param::new(identifier_name(pattern, self.source)?, ty))
            }
            node_kinds::OBJECT_PATTERN | node_kinds::ARRAY_PATTERN => {
                let name = format!("{}{}", synthesized::PARAM_PREFIX, index);
                for binding in resolve_pattern(pattern, Expr::var(name.clone()), self.source)? {
                    prelude.push(Stmt::VarDef(VarDef {
                        name: identifier_name(binding.target, self.source)?,
                        ty: None,
                        init: binding.init,
                        is_const: false,
                        modifiers: Modifiers::new(),
                    }));
                }
                Ok(Param::new(name, ty))
            }
            _ => Err(LoweringError::unsupported(pattern, self.source)),
        }
    }
}

/// `constructor(private x: T)` and `constructor(readonly x: T)` declare fields
fn is_promoted(param: Node<'_>) -> bool {
    find_child_by_kind(param, node_kinds::ACCESSIBILITY_MODIFIER).is_some()
        || has_keyword(param, "readonly")
}

impl LoweredFunction {
    pub fn promoted_names(&self) -> impl Iterator<Item = &str> {
        self.promoted.iter().map(|p| p.name.as_str())
    }

    /// Promoted parameters as `(name, type)` field entries
    pub fn promoted_fields(&self) -> Vec<(String, Option<Type>)> {
        self.promoted
            .iter()
            .map(|p| (p.name.clone(), p.ty.clone()))
            .collect()
    }
}
