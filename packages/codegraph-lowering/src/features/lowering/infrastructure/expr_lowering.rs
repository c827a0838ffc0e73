//! Expression Lowering
//!
//! Maps tree-sitter-typescript expressions onto the closed expression
//! vocabulary. Operators become calls of a `Var` named by the operator
//! token; `typeof`, spread, `await` and friends call a sentinel `Var`.
//! Function literals are never inlined: they go to the `LambdaAllocator`.

use tree_sitter::Node;

use crate::features::lowering::domain::{LambdaAllocator, LoweringError, LoweringResult};
use crate::features::lowering::infrastructure::type_lowering::property_name;
use crate::features::parsing::infrastructure::tree_sitter::languages::typescript::{
    is_function_expression, node_kinds,
};
use crate::shared::constants::{placeholders, synthesized};
use crate::shared::models::{Expr, SpecialVar, Type};
use crate::shared::utils::tree_sitter::{
    extract_node_text, first_named_child, named_children, node_line,
};

/// Lower an expression node
///
/// `lambdas` receives every function literal encountered, in pre-order.
pub fn lower_expr(
    node: Node<'_>,
    source: &str,
    lambdas: &mut dyn LambdaAllocator,
) -> LoweringResult<Expr> {
    let kind = node.kind();
    let line = node_line(node);

    match kind {
        node_kinds::IDENTIFIER
        | node_kinds::SHORTHAND_PROPERTY_IDENTIFIER
        | node_kinds::SHORTHAND_PROPERTY_IDENTIFIER_PATTERN => {
            Ok(Expr::Var(identifier_name(node, source)?))
        }
        node_kinds::THIS => Ok(Expr::special(SpecialVar::This)),
        node_kinds::SUPER => Ok(Expr::special(SpecialVar::Super)),
        // Dynamic `import(...)` callee
        node_kinds::IMPORT => Ok(Expr::var(extract_node_text(node, source))),

        // Literals
        node_kinds::NUMBER => Ok(Expr::number(line)),
        node_kinds::STRING | node_kinds::TEMPLATE_STRING => Ok(Expr::string(line)),
        node_kinds::TRUE | node_kinds::FALSE => Ok(Expr::boolean(line)),
        node_kinds::NULL | node_kinds::UNDEFINED => Ok(Expr::null(line)),
        node_kinds::REGEX => Ok(Expr::constant(
            placeholders::REGEX,
            Type::tvar(placeholders::REGEX_TYPE),
            line,
        )),
        node_kinds::ARRAY => Ok(Expr::constant(
            placeholders::ARRAY,
            Type::tvar(placeholders::ARRAY_TYPE),
            line,
        )),

        node_kinds::CALL_EXPRESSION => {
            let callee = required(node, "function")?;
            let callee = lower_expr(callee, source, lambdas)?;
            let args = lower_arguments(node.child_by_field_name("arguments"), source, lambdas)?;
            Ok(Expr::call(callee, args))
        }

        node_kinds::NEW_EXPRESSION => {
            let constructor = lower_expr(required(node, "constructor")?, source, lambdas)?;
            let args = lower_arguments(node.child_by_field_name("arguments"), source, lambdas)?;
            Ok(Expr::construct(constructor, args))
        }

        node_kinds::MEMBER_EXPRESSION => {
            let base = lower_expr(required(node, "object")?, source, lambdas)?;
            let field = property_name(required(node, "property")?, source)?;
            Ok(Expr::access(base, field))
        }

        node_kinds::SUBSCRIPT_EXPRESSION => {
            let base = lower_expr(required(node, "object")?, source, lambdas)?;
            let index = lower_expr(required(node, "index")?, source, lambdas)?;
            Ok(Expr::call(
                Expr::access(base, synthesized::ACCESS_FIELD),
                vec![index],
            ))
        }

        node_kinds::OBJECT => lower_object(node, source, lambdas),

        node_kinds::TERNARY_EXPRESSION => {
            let cond = lower_expr(required(node, "condition")?, source, lambdas)?;
            let then = lower_expr(required(node, "consequence")?, source, lambdas)?;
            let otherwise = lower_expr(required(node, "alternative")?, source, lambdas)?;
            Ok(Expr::if_expr(cond, then, otherwise))
        }

        node_kinds::PARENTHESIZED_EXPRESSION
        | node_kinds::AS_EXPRESSION
        | node_kinds::SATISFIES_EXPRESSION
        | node_kinds::NON_NULL_EXPRESSION => {
            let inner = first_named_child(node)
                .ok_or_else(|| LoweringError::missing_child(node, "expression"))?;
            lower_expr(inner, source, lambdas)
        }

        // `<T>x`: the expression follows the type arguments
        node_kinds::TYPE_ASSERTION => {
            let inner = named_children(node)
                .into_iter()
                .last()
                .ok_or_else(|| LoweringError::missing_child(node, "expression"))?;
            lower_expr(inner, source, lambdas)
        }

        node_kinds::BINARY_EXPRESSION | node_kinds::AUGMENTED_ASSIGNMENT_EXPRESSION => {
            let operator = operator_text(node, source)?;
            let left = lower_expr(required(node, "left")?, source, lambdas)?;
            let right = lower_expr(required(node, "right")?, source, lambdas)?;
            Ok(Expr::call(Expr::var(operator), vec![left, right]))
        }

        node_kinds::ASSIGNMENT_EXPRESSION => {
            let left = lower_expr(required(node, "left")?, source, lambdas)?;
            let right = lower_expr(required(node, "right")?, source, lambdas)?;
            Ok(Expr::call(Expr::var("="), vec![left, right]))
        }

        node_kinds::SEQUENCE_EXPRESSION => {
            let mut parts = named_children(node).into_iter();
            let first = parts
                .next()
                .ok_or_else(|| LoweringError::missing_child(node, "left"))?;
            let mut acc = lower_expr(first, source, lambdas)?;
            for part in parts {
                let next = lower_expr(part, source, lambdas)?;
                acc = Expr::call(Expr::var(","), vec![acc, next]);
            }
            Ok(acc)
        }

        node_kinds::UNARY_EXPRESSION => lower_unary(node, source, lambdas),

        node_kinds::UPDATE_EXPRESSION => {
            let operator = operator_text(node, source)?;
            let argument = lower_expr(required(node, "argument")?, source, lambdas)?;
            let is_prefix = node.child(0).map_or(false, |c| !c.is_named());
            let callee = if is_prefix {
                operator.to_string()
            } else {
                format!("{}{}", synthesized::POSTFIX_PREFIX, operator)
            };
            Ok(Expr::call(Expr::var(callee), vec![argument]))
        }

        node_kinds::SPREAD_ELEMENT => sentinel_call(SpecialVar::Spread, node, source, lambdas),
        node_kinds::AWAIT_EXPRESSION => sentinel_call(SpecialVar::Await, node, source, lambdas),
        // A bare `yield` has no operand
        node_kinds::YIELD_EXPRESSION => sentinel_call(SpecialVar::Yield, node, source, lambdas),

        _ if is_function_expression(kind) => lambdas.allocate_lambda(node),

        _ => Err(LoweringError::unsupported(node, source)),
    }
}

/// Name of an identifier-like node; empty names are a structural violation
pub fn identifier_name(node: Node<'_>, source: &str) -> LoweringResult<String> {
    let name = extract_node_text(node, source);
    if name.is_empty() {
        return Err(LoweringError::structural(node, "empty identifier"));
    }
    Ok(name.to_string())
}

fn required<'t>(node: Node<'t>, field: &str) -> LoweringResult<Node<'t>> {
    node.child_by_field_name(field)
        .ok_or_else(|| LoweringError::missing_child(node, field))
}

fn operator_text<'s>(node: Node<'_>, source: &'s str) -> LoweringResult<&'s str> {
    let operator = required(node, "operator")?;
    Ok(extract_node_text(operator, source))
}

/// Argument list; a tagged template passes the template as its only argument
fn lower_arguments(
    arguments: Option<Node<'_>>,
    source: &str,
    lambdas: &mut dyn LambdaAllocator,
) -> LoweringResult<Vec<Expr>> {
    let Some(arguments) = arguments else {
        return Ok(Vec::new());
    };

    if arguments.kind() == node_kinds::TEMPLATE_STRING {
        return Ok(vec![Expr::string(node_line(arguments))]);
    }

    named_children(arguments)
        .into_iter()
        .map(|arg| lower_expr(arg, source, lambdas))
        .collect()
}

/// Only `key: value` pairs and shorthand properties survive
fn lower_object(
    node: Node<'_>,
    source: &str,
    lambdas: &mut dyn LambdaAllocator,
) -> LoweringResult<Expr> {
    let mut fields = Vec::new();

    for member in named_children(node) {
        match member.kind() {
            node_kinds::PAIR => {
                let key = required(member, "key")?;
                if key.kind() == node_kinds::COMPUTED_PROPERTY_NAME {
                    continue;
                }
                let name = property_name(key, source)?;
                let value = lower_expr(required(member, "value")?, source, lambdas)?;
                fields.push((name, value));
            }
            node_kinds::SHORTHAND_PROPERTY_IDENTIFIER => {
                let name = identifier_name(member, source)?;
                fields.push((name.clone(), Expr::Var(name)));
            }
            _ => {}
        }
    }

    Ok(Expr::ObjLiteral { fields })
}

fn lower_unary(
    node: Node<'_>,
    source: &str,
    lambdas: &mut dyn LambdaAllocator,
) -> LoweringResult<Expr> {
    let operator = operator_text(node, source)?;
    let argument = required(node, "argument")?;

    match operator {
        "void" => Ok(Expr::null(node_line(node))),
        "typeof" => Ok(Expr::special_call(
            SpecialVar::TypeOf,
            vec![lower_expr(argument, source, lambdas)?],
        )),
        "delete" => Ok(Expr::special_call(
            SpecialVar::Delete,
            vec![lower_expr(argument, source, lambdas)?],
        )),
        _ => {
            let argument = lower_expr(argument, source, lambdas)?;
            Ok(Expr::call(Expr::var(operator), vec![argument]))
        }
    }
}

fn sentinel_call(
    sentinel: SpecialVar,
    node: Node<'_>,
    source: &str,
    lambdas: &mut dyn LambdaAllocator,
) -> LoweringResult<Expr> {
    let args = match first_named_child(node) {
        Some(operand) => vec![lower_expr(operand, source, lambdas)?],
        None => Vec::new(),
    };
    Ok(Expr::special_call(sentinel, args))
}
