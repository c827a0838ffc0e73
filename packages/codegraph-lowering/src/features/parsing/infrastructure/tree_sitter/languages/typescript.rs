//! TypeScript-specific tree-sitter configuration
//!
//! This module provides constants and helper predicates for lowering the
//! tree-sitter-typescript grammar.
//!
//! Design principles:
//! - No magic strings: All tree-sitter node types defined as constants
//! - Closed dispatch: lowering matches on these constants and fails on anything else

use lazy_static::lazy_static;
use std::collections::HashSet;

/// TypeScript tree-sitter node kinds
///
/// These constants match the exact node type names from tree-sitter-typescript grammar.
/// Source: https://github.com/tree-sitter/tree-sitter-typescript/blob/master/common/define-grammar.js
pub mod node_kinds {
    // Program structure
    pub const PROGRAM: &str = "program";
    pub const MODULE: &str = "module";
    pub const INTERNAL_MODULE: &str = "internal_module";
    pub const AMBIENT_DECLARATION: &str = "ambient_declaration";

    // Declarations
    pub const CLASS_DECLARATION: &str = "class_declaration";
    pub const ABSTRACT_CLASS_DECLARATION: &str = "abstract_class_declaration";
    pub const INTERFACE_DECLARATION: &str = "interface_declaration";
    pub const FUNCTION_DECLARATION: &str = "function_declaration";
    pub const GENERATOR_FUNCTION_DECLARATION: &str = "generator_function_declaration";
    pub const FUNCTION_SIGNATURE: &str = "function_signature";
    pub const LEXICAL_DECLARATION: &str = "lexical_declaration";
    pub const VARIABLE_DECLARATION: &str = "variable_declaration";
    pub const VARIABLE_DECLARATOR: &str = "variable_declarator";
    pub const ENUM_DECLARATION: &str = "enum_declaration";
    pub const ENUM_ASSIGNMENT: &str = "enum_assignment";
    pub const TYPE_ALIAS_DECLARATION: &str = "type_alias_declaration";

    // Class members
    pub const CLASS_HERITAGE: &str = "class_heritage";
    pub const EXTENDS_CLAUSE: &str = "extends_clause";
    pub const METHOD_DEFINITION: &str = "method_definition";
    pub const PUBLIC_FIELD_DEFINITION: &str = "public_field_definition";
    pub const ABSTRACT_METHOD_SIGNATURE: &str = "abstract_method_signature";
    pub const CLASS_STATIC_BLOCK: &str = "class_static_block";
    pub const DECORATOR: &str = "decorator";

    // Object type members
    pub const PROPERTY_SIGNATURE: &str = "property_signature";
    pub const METHOD_SIGNATURE: &str = "method_signature";
    pub const CALL_SIGNATURE: &str = "call_signature";
    pub const CONSTRUCT_SIGNATURE: &str = "construct_signature";
    pub const INDEX_SIGNATURE: &str = "index_signature";
    pub const MAPPED_TYPE_CLAUSE: &str = "mapped_type_clause";

    // Functions
    pub const ARROW_FUNCTION: &str = "arrow_function";
    pub const FUNCTION_EXPRESSION: &str = "function_expression";
    /// Older grammar releases name function expressions `function`
    pub const FUNCTION: &str = "function";
    pub const GENERATOR_FUNCTION: &str = "generator_function";

    // Parameters
    pub const REQUIRED_PARAMETER: &str = "required_parameter";
    pub const OPTIONAL_PARAMETER: &str = "optional_parameter";
    pub const ACCESSIBILITY_MODIFIER: &str = "accessibility_modifier";
    pub const OVERRIDE_MODIFIER: &str = "override_modifier";

    // Import/Export
    pub const IMPORT_STATEMENT: &str = "import_statement";
    pub const IMPORT_REQUIRE_CLAUSE: &str = "import_require_clause";
    pub const IMPORT_ALIAS: &str = "import_alias";
    pub const EXPORT_STATEMENT: &str = "export_statement";

    // Statements
    pub const EXPRESSION_STATEMENT: &str = "expression_statement";
    pub const STATEMENT_BLOCK: &str = "statement_block";
    pub const IF_STATEMENT: &str = "if_statement";
    pub const FOR_STATEMENT: &str = "for_statement";
    pub const FOR_IN_STATEMENT: &str = "for_in_statement";
    pub const WHILE_STATEMENT: &str = "while_statement";
    pub const DO_STATEMENT: &str = "do_statement";
    pub const TRY_STATEMENT: &str = "try_statement";
    pub const RETURN_STATEMENT: &str = "return_statement";
    pub const THROW_STATEMENT: &str = "throw_statement";
    pub const SWITCH_STATEMENT: &str = "switch_statement";
    pub const SWITCH_CASE: &str = "switch_case";
    pub const SWITCH_DEFAULT: &str = "switch_default";
    pub const BREAK_STATEMENT: &str = "break_statement";
    pub const CONTINUE_STATEMENT: &str = "continue_statement";
    pub const DEBUGGER_STATEMENT: &str = "debugger_statement";
    pub const EMPTY_STATEMENT: &str = "empty_statement";
    pub const LABELED_STATEMENT: &str = "labeled_statement";

    // Expressions
    pub const IDENTIFIER: &str = "identifier";
    pub const PROPERTY_IDENTIFIER: &str = "property_identifier";
    pub const PRIVATE_PROPERTY_IDENTIFIER: &str = "private_property_identifier";
    pub const SHORTHAND_PROPERTY_IDENTIFIER: &str = "shorthand_property_identifier";
    pub const THIS: &str = "this";
    pub const SUPER: &str = "super";
    pub const IMPORT: &str = "import";
    pub const CALL_EXPRESSION: &str = "call_expression";
    pub const NEW_EXPRESSION: &str = "new_expression";
    pub const MEMBER_EXPRESSION: &str = "member_expression";
    pub const SUBSCRIPT_EXPRESSION: &str = "subscript_expression";
    pub const OBJECT: &str = "object";
    pub const PAIR: &str = "pair";
    pub const ARRAY: &str = "array";
    pub const TERNARY_EXPRESSION: &str = "ternary_expression";
    pub const PARENTHESIZED_EXPRESSION: &str = "parenthesized_expression";
    pub const BINARY_EXPRESSION: &str = "binary_expression";
    pub const UNARY_EXPRESSION: &str = "unary_expression";
    pub const UPDATE_EXPRESSION: &str = "update_expression";
    pub const ASSIGNMENT_EXPRESSION: &str = "assignment_expression";
    pub const AUGMENTED_ASSIGNMENT_EXPRESSION: &str = "augmented_assignment_expression";
    pub const SEQUENCE_EXPRESSION: &str = "sequence_expression";
    pub const SPREAD_ELEMENT: &str = "spread_element";
    pub const YIELD_EXPRESSION: &str = "yield_expression";
    pub const AWAIT_EXPRESSION: &str = "await_expression";
    pub const AS_EXPRESSION: &str = "as_expression";
    pub const SATISFIES_EXPRESSION: &str = "satisfies_expression";
    pub const TYPE_ASSERTION: &str = "type_assertion";
    pub const NON_NULL_EXPRESSION: &str = "non_null_expression";
    pub const COMPUTED_PROPERTY_NAME: &str = "computed_property_name";

    // Literals
    pub const NUMBER: &str = "number";
    pub const STRING: &str = "string";
    pub const TEMPLATE_STRING: &str = "template_string";
    pub const REGEX: &str = "regex";
    pub const TRUE: &str = "true";
    pub const FALSE: &str = "false";
    pub const NULL: &str = "null";
    pub const UNDEFINED: &str = "undefined";

    // Patterns
    pub const OBJECT_PATTERN: &str = "object_pattern";
    pub const ARRAY_PATTERN: &str = "array_pattern";
    pub const PAIR_PATTERN: &str = "pair_pattern";
    pub const SHORTHAND_PROPERTY_IDENTIFIER_PATTERN: &str = "shorthand_property_identifier_pattern";
    pub const OBJECT_ASSIGNMENT_PATTERN: &str = "object_assignment_pattern";
    pub const ASSIGNMENT_PATTERN: &str = "assignment_pattern";
    pub const REST_PATTERN: &str = "rest_pattern";

    // Types
    pub const TYPE_ANNOTATION: &str = "type_annotation";
    pub const TYPE_PARAMETERS: &str = "type_parameters";
    pub const TYPE_PARAMETER: &str = "type_parameter";
    pub const TYPE_IDENTIFIER: &str = "type_identifier";
    pub const NESTED_TYPE_IDENTIFIER: &str = "nested_type_identifier";
    pub const PREDEFINED_TYPE: &str = "predefined_type";
    pub const GENERIC_TYPE: &str = "generic_type";
    pub const UNION_TYPE: &str = "union_type";
    pub const INTERSECTION_TYPE: &str = "intersection_type";
    pub const TUPLE_TYPE: &str = "tuple_type";
    pub const ARRAY_TYPE: &str = "array_type";
    pub const READONLY_TYPE: &str = "readonly_type";
    pub const FUNCTION_TYPE: &str = "function_type";
    pub const CONSTRUCTOR_TYPE: &str = "constructor_type";
    pub const OBJECT_TYPE: &str = "object_type";
    pub const INTERFACE_BODY: &str = "interface_body";
    pub const LITERAL_TYPE: &str = "literal_type";
    pub const PARENTHESIZED_TYPE: &str = "parenthesized_type";
    pub const TYPE_PREDICATE: &str = "type_predicate";
    pub const TYPE_PREDICATE_ANNOTATION: &str = "type_predicate_annotation";
    pub const ASSERTS: &str = "asserts";
    pub const ASSERTS_ANNOTATION: &str = "asserts_annotation";
    pub const OMITTING_TYPE_ANNOTATION: &str = "omitting_type_annotation";
    pub const OPTING_TYPE_ANNOTATION: &str = "opting_type_annotation";
    pub const ADDING_TYPE_ANNOTATION: &str = "adding_type_annotation";
    pub const UNARY_EXPRESSION_TYPE: &str = "unary_expression";
}

lazy_static! {
    /// Type forms that lower to `AnyType` regardless of their contents
    pub static ref ERASED_TYPE_KINDS: HashSet<&'static str> = {
        let mut set = HashSet::new();

        set.insert(node_kinds::INTERSECTION_TYPE);
        set.insert("conditional_type");
        set.insert("infer_type");
        set.insert("this_type");
        set.insert("lookup_type");
        set.insert("type_query");
        set.insert("index_type_query");
        set.insert("existential_type");
        set.insert("template_literal_type");
        set.insert("flow_maybe_type");

        set
    };

    /// Predefined keywords that carry no usable type information
    pub static ref ERASED_TYPE_KEYWORDS: HashSet<&'static str> = {
        let mut set = HashSet::new();

        set.insert("any");
        set.insert("unknown");
        set.insert("never");
        set.insert("undefined");

        set
    };

    /// Statements kept only as raw-text comments
    pub static ref RAW_COMMENT_STATEMENTS: HashSet<&'static str> = {
        let mut set = HashSet::new();

        set.insert(node_kinds::MODULE);
        set.insert(node_kinds::INTERNAL_MODULE);
        set.insert(node_kinds::AMBIENT_DECLARATION);
        set.insert(node_kinds::FOR_IN_STATEMENT);
        set.insert(node_kinds::IMPORT_ALIAS);
        set.insert(node_kinds::BREAK_STATEMENT);
        set.insert(node_kinds::CONTINUE_STATEMENT);
        set.insert(node_kinds::DEBUGGER_STATEMENT);
        set.insert(node_kinds::FUNCTION_SIGNATURE);

        set
    };
}

/// Node kind predicates

/// Check if a node is a function literal in expression position
pub fn is_function_expression(kind: &str) -> bool {
    matches!(
        kind,
        node_kinds::ARROW_FUNCTION
            | node_kinds::FUNCTION_EXPRESSION
            | node_kinds::FUNCTION
            | node_kinds::GENERATOR_FUNCTION
    )
}

/// Check if a node is a destructuring pattern
pub fn is_destructuring_pattern(kind: &str) -> bool {
    matches!(kind, node_kinds::OBJECT_PATTERN | node_kinds::ARRAY_PATTERN)
}

/// Check if a node is a class declaration (plain or abstract)
pub fn is_class_declaration(kind: &str) -> bool {
    matches!(
        kind,
        node_kinds::CLASS_DECLARATION | node_kinds::ABSTRACT_CLASS_DECLARATION
    )
}

/// Check if a type node lowers to `AnyType` unconditionally
pub fn is_erased_type(kind: &str) -> bool {
    ERASED_TYPE_KINDS.contains(kind)
}

/// Check if a statement is preserved as raw text only
pub fn is_raw_comment_statement(kind: &str) -> bool {
    RAW_COMMENT_STATEMENTS.contains(kind)
}

/// Check if a type annotation wrapper node (`: T`, `?: T`, `-?: T`)
pub fn is_type_annotation(kind: &str) -> bool {
    matches!(
        kind,
        node_kinds::TYPE_ANNOTATION
            | node_kinds::OMITTING_TYPE_ANNOTATION
            | node_kinds::OPTING_TYPE_ANNOTATION
            | node_kinds::ADDING_TYPE_ANNOTATION
            | node_kinds::TYPE_PREDICATE_ANNOTATION
            | node_kinds::ASSERTS_ANNOTATION
    )
}
