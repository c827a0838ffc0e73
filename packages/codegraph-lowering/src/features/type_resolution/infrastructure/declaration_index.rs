//! Declaration index
//!
//! Collects annotated top-level values and function signatures from parsed
//! files. Only explicit annotations are recorded; nothing is inferred.
//! Declarations whose types cannot be lowered are skipped.

use std::collections::HashMap;
use tree_sitter::Node;

use crate::features::lowering::infrastructure::type_lowering::{
    lower_signature, lower_type_annotation,
};
use crate::features::parsing::domain::ParsedFile;
use crate::features::parsing::infrastructure::tree_sitter::languages::typescript::node_kinds;
use crate::features::type_resolution::ports::TypeOracle;
use crate::shared::models::Type;
use crate::shared::utils::tree_sitter::{extract_node_text, named_children};

/// Name → declared type, first declaration wins
#[derive(Debug, Clone, Default)]
pub struct DeclarationIndex {
    entries: HashMap<String, Type>,
}

impl DeclarationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_files<'a>(files: impl IntoIterator<Item = &'a ParsedFile>) -> Self {
        let mut index = Self::new();
        for file in files {
            index.index_file(file);
        }
        index
    }

    /// Index the top-level declarations of one file; returns how many were added
    pub fn index_file(&mut self, file: &ParsedFile) -> usize {
        let before = self.entries.len();
        for stmt in named_children(file.root()) {
            self.index_statement(stmt, &file.source);
        }
        let added = self.entries.len() - before;
        tracing::debug!(file = %file.path, added, "indexed declarations");
        added
    }

    /// Record a declared type; an existing entry is kept (overloads resolve to the first)
    pub fn insert(&mut self, name: impl Into<String>, ty: Type) {
        self.entries.entry(name.into()).or_insert(ty);
    }

    fn index_statement(&mut self, node: Node<'_>, source: &str) {
        match node.kind() {
            node_kinds::EXPORT_STATEMENT => {
                if let Some(decl) = node.child_by_field_name("declaration") {
                    self.index_statement(decl, source);
                }
            }

            node_kinds::AMBIENT_DECLARATION => {
                for child in named_children(node) {
                    if child.kind() == node_kinds::STATEMENT_BLOCK {
                        for inner in named_children(child) {
                            self.index_statement(inner, source);
                        }
                    } else {
                        self.index_statement(child, source);
                    }
                }
            }

            node_kinds::LEXICAL_DECLARATION | node_kinds::VARIABLE_DECLARATION => {
                for declarator in named_children(node) {
                    if declarator.kind() == node_kinds::VARIABLE_DECLARATOR {
                        self.index_variable(declarator, source);
                    }
                }
            }

            node_kinds::FUNCTION_DECLARATION
            | node_kinds::GENERATOR_FUNCTION_DECLARATION
            | node_kinds::FUNCTION_SIGNATURE => self.index_function(node, source),

            _ => {}
        }
    }

    fn index_variable(&mut self, declarator: Node<'_>, source: &str) {
        let Some(name) = declarator.child_by_field_name("name") else {
            return;
        };
        if name.kind() != node_kinds::IDENTIFIER {
            return;
        }

        match lower_type_annotation(declarator.child_by_field_name("type"), source) {
            Ok(Some(ty)) => self.insert(extract_node_text(name, source), ty),
            Ok(None) => {}
            Err(err) => {
                tracing::debug!(name = extract_node_text(name, source), %err, "skipping declaration")
            }
        }
    }

    fn index_function(&mut self, node: Node<'_>, source: &str) {
        let Some(name) = node.child_by_field_name("name") else {
            return;
        };

        match lower_signature(node, source) {
            Ok(signature) => self.insert(extract_node_text(name, source), signature),
            Err(err) => {
                tracing::debug!(name = extract_node_text(name, source), %err, "skipping declaration")
            }
        }
    }
}

impl TypeOracle for DeclarationIndex {
    fn declared_type(&self, name: &str) -> Option<Type> {
        self.entries.get(name).cloned()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::infrastructure::TreeSitterParser;
    use crate::features::parsing::ports::Parser;
    use pretty_assertions::assert_eq;

    fn index(source: &str) -> DeclarationIndex {
        let file = TreeSitterParser::typescript()
            .parse(source, "lib.d.ts")
            .unwrap();
        DeclarationIndex::from_files([&file])
    }

    #[test]
    fn test_ambient_values_and_functions() {
        let index = index(
            "declare const VERSION: string;\n\
             declare function parse<T>(text: string, into: T): T;\n\
             export function size(xs: number[]): number;\n\
             let untyped = 1;\n",
        );

        assert_eq!(index.declared_type("VERSION"), Some(Type::tvar("string")));
        assert_eq!(
            index.declared_type("parse"),
            Some(Type::func(vec![Type::tvar("string"), Type::Any], Type::Any))
        );
        assert_eq!(
            index.declared_type("size"),
            Some(Type::func(vec![Type::tvar("Array")], Type::tvar("number")))
        );
        assert_eq!(index.declared_type("untyped"), None);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_first_overload_wins() {
        let index = index(
            "declare function pick(a: string): string;\n\
             declare function pick(a: number): number;\n",
        );
        assert_eq!(
            index.declared_type("pick"),
            Some(Type::func(vec![Type::tvar("string")], Type::tvar("string")))
        );
    }

    #[test]
    fn test_unlowerable_declarations_are_skipped() {
        let index = index("declare const weird: { [Symbol.iterator]: number };\ndeclare const ok: boolean;");
        assert_eq!(index.declared_type("weird"), None);
        assert_eq!(index.declared_type("ok"), Some(Type::tvar("boolean")));
    }
}
