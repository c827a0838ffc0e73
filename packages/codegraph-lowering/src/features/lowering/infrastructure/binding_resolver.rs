//! Binding Pattern Resolver
//!
//! Expands a destructuring pattern into flat `(target, init)` pairs:
//! - `{a, b: c}` binds `a ← Access(init, "a")`, `c ← Access(init, "b")`
//! - `[x, , y]` binds `x` and `y` to `$ArrayAccess(init)`; holes bind nothing
//! - defaults (`= d`) are ignored, rest elements bind the whole initializer
//!
//! Targets stay syntax nodes so callers decide whether they become `VarDef`
//! names or assignment left-hand sides.

use tree_sitter::Node;

use crate::features::lowering::domain::{LoweringError, LoweringResult};
use crate::features::lowering::infrastructure::type_lowering::property_name;
use crate::features::parsing::infrastructure::tree_sitter::languages::typescript::node_kinds;
use crate::shared::models::{Expr, SpecialVar};
use crate::shared::utils::tree_sitter::{first_named_child, named_children};

/// One leaf of an expanded pattern
#[derive(Debug, Clone)]
pub struct Binding<'t> {
    /// Identifier (declarations) or any assignable expression (assignments)
    pub target: Node<'t>,
    pub init: Expr,
}

/// Expand `pattern` bound to `init`, in source order
pub fn resolve_pattern<'t>(
    pattern: Node<'t>,
    init: Expr,
    source: &str,
) -> LoweringResult<Vec<Binding<'t>>> {
    let mut bindings = Vec::new();
    resolve_into(pattern, init, source, &mut bindings)?;
    Ok(bindings)
}

fn resolve_into<'t>(
    pattern: Node<'t>,
    init: Expr,
    source: &str,
    out: &mut Vec<Binding<'t>>,
) -> LoweringResult<()> {
    match pattern.kind() {
        node_kinds::IDENTIFIER
        | node_kinds::SHORTHAND_PROPERTY_IDENTIFIER_PATTERN
        | node_kinds::MEMBER_EXPRESSION
        | node_kinds::SUBSCRIPT_EXPRESSION
        | node_kinds::THIS => {
            out.push(Binding {
                target: pattern,
                init,
            });
            Ok(())
        }

        node_kinds::OBJECT_PATTERN => {
            for element in named_children(pattern) {
                resolve_object_element(element, &init, source, out)?;
            }
            Ok(())
        }

        node_kinds::ARRAY_PATTERN => {
            for element in named_children(pattern) {
                let element_init = match element.kind() {
                    node_kinds::REST_PATTERN => init.clone(),
                    _ => Expr::special_call(SpecialVar::ArrayAccess, vec![init.clone()]),
                };
                resolve_into(element, element_init, source, out)?;
            }
            Ok(())
        }

        node_kinds::ASSIGNMENT_PATTERN => {
            let left = pattern
                .child_by_field_name("left")
                .ok_or_else(|| LoweringError::missing_child(pattern, "left"))?;
            resolve_into(left, init, source, out)
        }

        node_kinds::REST_PATTERN => {
            let inner = first_named_child(pattern)
                .ok_or_else(|| LoweringError::missing_child(pattern, "pattern"))?;
            resolve_into(inner, init, source, out)
        }

        _ => Err(LoweringError::unsupported(pattern, source)),
    }
}

fn resolve_object_element<'t>(
    element: Node<'t>,
    init: &Expr,
    source: &str,
    out: &mut Vec<Binding<'t>>,
) -> LoweringResult<()> {
    match element.kind() {
        node_kinds::SHORTHAND_PROPERTY_IDENTIFIER_PATTERN => {
            let key = property_name(element, source)?;
            resolve_into(element, Expr::access(init.clone(), key), source, out)
        }

        node_kinds::PAIR_PATTERN => {
            let key = element
                .child_by_field_name("key")
                .ok_or_else(|| LoweringError::missing_child(element, "key"))?;
            let value = element
                .child_by_field_name("value")
                .ok_or_else(|| LoweringError::missing_child(element, "value"))?;
            let key = property_name(key, source)?;
            resolve_into(value, Expr::access(init.clone(), key), source, out)
        }

        // `{ a = 1 }`: the default is dropped
        node_kinds::OBJECT_ASSIGNMENT_PATTERN => {
            let left = element
                .child_by_field_name("left")
                .ok_or_else(|| LoweringError::missing_child(element, "left"))?;
            if left.kind() == node_kinds::SHORTHAND_PROPERTY_IDENTIFIER_PATTERN {
                resolve_object_element(left, init, source, out)
            } else {
                resolve_into(left, init.clone(), source, out)
            }
        }

        node_kinds::REST_PATTERN => resolve_into(element, init.clone(), source, out),

        _ => Err(LoweringError::unsupported(element, source)),
    }
}
