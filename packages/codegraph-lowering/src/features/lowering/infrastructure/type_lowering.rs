//! Type Lowering
//!
//! Maps tree-sitter-typescript type nodes onto the closed type vocabulary:
//! - Keyword and named references → `TVar`
//! - Function / constructor types → `Func`
//! - Object types and interface bodies → `Object` (via member lowering)
//! - Nullable two-member unions → the non-null member
//! - Everything the vocabulary cannot express → `Any`
//!
//! No hardcoded strings - uses constants from node_kinds

use std::collections::HashSet;
use tree_sitter::Node;

use crate::features::lowering::domain::{LoweringError, LoweringResult};
use crate::features::parsing::infrastructure::tree_sitter::languages::typescript::{
    is_erased_type, is_type_annotation, node_kinds, ERASED_TYPE_KEYWORDS,
};
use crate::shared::constants::synthesized;
use crate::shared::models::Type;
use crate::shared::utils::tree_sitter::{
    extract_node_text, find_child_by_kind, first_named_child, named_children, unquote,
};

const ARRAY_TYPE_NAME: &str = "Array";
const BOOLEAN_TYPE_NAME: &str = "boolean";
const NUMBER_TYPE_NAME: &str = "number";
const STRING_TYPE_NAME: &str = "string";

// ═══════════════════════════════════════════════════════════════════════════
// Type dispatch
// ═══════════════════════════════════════════════════════════════════════════

/// Lower a type node (not an annotation wrapper)
pub fn lower_type(node: Node<'_>, source: &str) -> LoweringResult<Type> {
    let kind = node.kind();

    match kind {
        node_kinds::PREDEFINED_TYPE => {
            let keyword = extract_node_text(node, source).trim();
            if ERASED_TYPE_KEYWORDS.contains(keyword) {
                Ok(Type::Any)
            } else {
                Ok(Type::tvar(keyword))
            }
        }

        node_kinds::TYPE_IDENTIFIER | node_kinds::NESTED_TYPE_IDENTIFIER => {
            let name = compact_text(node, source);
            if ERASED_TYPE_KEYWORDS.contains(name.as_str()) {
                Ok(Type::Any)
            } else {
                Ok(Type::tvar(name))
            }
        }

        // Type arguments are dropped: `Map<K, V>` → `Map`
        node_kinds::GENERIC_TYPE => {
            let name = node
                .child_by_field_name("name")
                .ok_or_else(|| LoweringError::missing_child(node, "name"))?;
            Ok(Type::tvar(compact_text(name, source)))
        }

        node_kinds::ARRAY_TYPE | node_kinds::TUPLE_TYPE => Ok(Type::tvar(ARRAY_TYPE_NAME)),

        node_kinds::READONLY_TYPE | node_kinds::PARENTHESIZED_TYPE => {
            let inner = first_named_child(node)
                .ok_or_else(|| LoweringError::missing_child(node, "type"))?;
            lower_type(inner, source)
        }

        node_kinds::FUNCTION_TYPE | node_kinds::CONSTRUCTOR_TYPE => lower_signature(node, source),

        node_kinds::OBJECT_TYPE | node_kinds::INTERFACE_BODY => lower_object_members(node, source),

        node_kinds::UNION_TYPE => lower_union(node, source),

        node_kinds::LITERAL_TYPE => Ok(lower_literal_type(node)),

        node_kinds::TYPE_PREDICATE | node_kinds::ASSERTS => Ok(Type::tvar(BOOLEAN_TYPE_NAME)),

        _ if is_erased_type(kind) => Ok(Type::Any),

        _ if is_type_annotation(kind) => lower_type_annotation(Some(node), source)
            .map(|ty| ty.unwrap_or(Type::Any)),

        _ => Err(LoweringError::unsupported(node, source)),
    }
}

/// Lower an optional annotation (`: T`, `?: T`, `x is T`, or a bare type node)
pub fn lower_type_annotation(node: Option<Node<'_>>, source: &str) -> LoweringResult<Option<Type>> {
    let Some(node) = node else {
        return Ok(None);
    };

    match node.kind() {
        node_kinds::TYPE_PREDICATE_ANNOTATION | node_kinds::ASSERTS_ANNOTATION => {
            Ok(Some(Type::tvar(BOOLEAN_TYPE_NAME)))
        }
        kind if is_type_annotation(kind) => match first_named_child(node) {
            Some(inner) => lower_type(inner, source).map(Some),
            None => Err(LoweringError::missing_child(node, "type")),
        },
        _ => lower_type(node, source).map(Some),
    }
}

/// Replace every occurrence of the named type parameters with `Any`
pub fn erase_type_params(ty: &Type, names: &[String]) -> Type {
    let names: HashSet<String> = names.iter().cloned().collect();
    ty.erase_params(&names)
}

/// Names declared by the `<...>` list of a declaration, in source order
pub fn collect_type_param_names(decl: Node<'_>, source: &str) -> Vec<String> {
    let params = decl
        .child_by_field_name("type_parameters")
        .or_else(|| find_child_by_kind(decl, node_kinds::TYPE_PARAMETERS));

    let Some(params) = params else {
        return Vec::new();
    };

    named_children(params)
        .into_iter()
        .filter(|p| p.kind() == node_kinds::TYPE_PARAMETER)
        .filter_map(|p| {
            p.child_by_field_name("name")
                .or_else(|| first_named_child(p))
                .map(|name| extract_node_text(name, source).to_string())
        })
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// Signatures
// ═══════════════════════════════════════════════════════════════════════════

/// `Func(param types, return type)` for anything with a `parameters` child
///
/// Untyped parameters and a missing return type become `Any`. Type
/// parameters declared on the signature itself are erased.
pub fn lower_signature(node: Node<'_>, source: &str) -> LoweringResult<Type> {
    let mut args = Vec::new();
    if let Some(params) = node.child_by_field_name("parameters") {
        for param in named_children(params) {
            args.push(parameter_type(param, source)?.unwrap_or(Type::Any));
        }
    }

    let ret = node
        .child_by_field_name("return_type")
        .or_else(|| node.child_by_field_name("type"));
    let ret = lower_type_annotation(ret, source)?.unwrap_or(Type::Any);

    let signature = Type::func(args, ret);
    let own_params = collect_type_param_names(node, source);
    Ok(erase_type_params(&signature, &own_params))
}

/// Declared type of a formal parameter, if annotated
pub fn parameter_type(param: Node<'_>, source: &str) -> LoweringResult<Option<Type>> {
    match param.kind() {
        node_kinds::REQUIRED_PARAMETER | node_kinds::OPTIONAL_PARAMETER => {
            lower_type_annotation(param.child_by_field_name("type"), source)
        }
        _ => Err(LoweringError::unsupported(param, source)),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Unions and literals
// ═══════════════════════════════════════════════════════════════════════════

fn lower_union(node: Node<'_>, source: &str) -> LoweringResult<Type> {
    let mut members = Vec::new();
    flatten_union(node, &mut members);

    match members.as_slice() {
        [single] => lower_type(*single, source),
        [a, b] if is_nullish(*b, source) => lower_type(*a, source),
        [a, b] if is_nullish(*a, source) => lower_type(*b, source),
        _ => Ok(Type::Any),
    }
}

/// Collect members of a (left-nested) union
fn flatten_union<'t>(node: Node<'t>, members: &mut Vec<Node<'t>>) {
    for child in named_children(node) {
        if child.kind() == node_kinds::UNION_TYPE {
            flatten_union(child, members);
        } else {
            members.push(child);
        }
    }
}

fn is_nullish(node: Node<'_>, source: &str) -> bool {
    matches!(extract_node_text(node, source).trim(), "null" | "undefined")
}

fn lower_literal_type(node: Node<'_>) -> Type {
    let Some(literal) = first_named_child(node) else {
        return Type::Any;
    };

    match literal.kind() {
        node_kinds::NUMBER | node_kinds::UNARY_EXPRESSION_TYPE => Type::tvar(NUMBER_TYPE_NAME),
        node_kinds::STRING | node_kinds::TEMPLATE_STRING => Type::tvar(STRING_TYPE_NAME),
        node_kinds::TRUE | node_kinds::FALSE => Type::tvar(BOOLEAN_TYPE_NAME),
        _ => Type::Any,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Member lowering (object types, interface bodies)
// ═══════════════════════════════════════════════════════════════════════════

/// `Object` over the members of an object type or interface body
///
/// A mapped type (`{ [K in keyof T]: X }`) has no field structure and
/// lowers to `Any`.
pub fn lower_object_members(body: Node<'_>, source: &str) -> LoweringResult<Type> {
    let members = named_children(body);

    if members.iter().any(|m| is_mapped_signature(*m)) {
        return Ok(Type::Any);
    }

    let mut fields = Vec::with_capacity(members.len());
    for member in members {
        fields.push(lower_member(member, source)?);
    }
    Ok(Type::object(fields))
}

/// One `(name, type)` field for an object-type member
pub fn lower_member(member: Node<'_>, source: &str) -> LoweringResult<(String, Type)> {
    match member.kind() {
        node_kinds::PROPERTY_SIGNATURE => {
            let name = member_name(member, source)?;
            let ty = lower_type_annotation(member.child_by_field_name("type"), source)?
                .unwrap_or(Type::Any);
            Ok((name, ty))
        }

        node_kinds::METHOD_SIGNATURE | node_kinds::ABSTRACT_METHOD_SIGNATURE => {
            let name = member_name(member, source)?;
            Ok((name, lower_signature(member, source)?))
        }

        node_kinds::CALL_SIGNATURE => Ok((
            synthesized::CALL_FIELD.to_string(),
            lower_signature(member, source)?,
        )),

        node_kinds::CONSTRUCT_SIGNATURE => Ok((
            synthesized::CONSTRUCTOR_FIELD.to_string(),
            lower_signature(member, source)?,
        )),

        node_kinds::INDEX_SIGNATURE => Ok((
            synthesized::ACCESS_FIELD.to_string(),
            lower_index_signature(member, source)?,
        )),

        _ => Err(LoweringError::unsupported(member, source)),
    }
}

/// `[key: K]: V` → `Func([K], V)`
pub fn lower_index_signature(node: Node<'_>, source: &str) -> LoweringResult<Type> {
    let key = node
        .child_by_field_name("index_type")
        .map(|k| lower_type(k, source))
        .transpose()?
        .unwrap_or(Type::Any);
    let value = lower_type_annotation(node.child_by_field_name("type"), source)?
        .unwrap_or(Type::Any);
    Ok(Type::func(vec![key], value))
}

fn is_mapped_signature(member: Node<'_>) -> bool {
    member.kind() == node_kinds::INDEX_SIGNATURE
        && find_child_by_kind(member, node_kinds::MAPPED_TYPE_CLAUSE).is_some()
}

/// Name of a member from its `name` field
pub fn member_name(member: Node<'_>, source: &str) -> LoweringResult<String> {
    let name = member
        .child_by_field_name("name")
        .ok_or_else(|| LoweringError::unsupported(member, source))?;
    property_name(name, source)
}

/// Identifier, string literal (unquoted) or number; computed names are rejected
pub fn property_name(name: Node<'_>, source: &str) -> LoweringResult<String> {
    let text = match name.kind() {
        node_kinds::PROPERTY_IDENTIFIER
        | node_kinds::PRIVATE_PROPERTY_IDENTIFIER
        | node_kinds::IDENTIFIER
        | node_kinds::SHORTHAND_PROPERTY_IDENTIFIER
        | node_kinds::SHORTHAND_PROPERTY_IDENTIFIER_PATTERN
        | node_kinds::TYPE_IDENTIFIER
        | node_kinds::NUMBER => extract_node_text(name, source),
        node_kinds::STRING => unquote(extract_node_text(name, source)),
        _ => return Err(LoweringError::unsupported(name, source)),
    };

    if text.is_empty() {
        return Err(LoweringError::structural(name, "empty member name"));
    }
    Ok(text.to_string())
}

/// Source text with whitespace removed (`A . B` → `A.B`)
fn compact_text(node: Node<'_>, source: &str) -> String {
    extract_node_text(node, source)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}
