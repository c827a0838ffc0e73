//! Parsed file representation
//!
//! Keeps the tree-sitter tree together with the source text it was built
//! from, so lowering can borrow nodes and slice text without re-reading.

use std::sync::Arc;
use tree_sitter::{Node, Tree};

use crate::features::type_resolution::TypeOracle;

/// One parsed source file
#[derive(Debug, Clone)]
pub struct ParsedFile {
    /// File path (also the lowered module name)
    pub path: String,

    /// Source code
    pub source: String,

    /// Concrete syntax tree
    pub tree: Tree,

    /// Grammar the file was parsed with
    pub language: &'static str,

    /// Recovered syntax errors (tree-sitter never fails hard)
    pub errors: Vec<ParseError>,
}

/// Parse error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    /// 1-indexed
    pub line: u32,
    pub column: u32,
}

impl ParsedFile {
    pub fn new(path: String, source: String, tree: Tree, language: &'static str) -> Self {
        Self {
            path,
            source,
            tree,
            language,
            errors: Vec::new(),
        }
    }

    pub fn with_errors(mut self, errors: Vec<ParseError>) -> Self {
        self.errors = errors;
        self
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Get line count
    pub fn line_count(&self) -> usize {
        self.source.lines().count()
    }

    /// Declaration files (`.d.ts`) only contribute to the type oracle
    pub fn is_declaration_file(&self) -> bool {
        self.path.ends_with(".d.ts")
    }
}

/// Everything the module driver needs for one batch: parsed sources plus a
/// shared, read-only type oracle.
#[derive(Clone)]
pub struct ProgramContext {
    pub files: Vec<ParsedFile>,
    pub oracle: Arc<dyn TypeOracle>,
}

impl ProgramContext {
    pub fn new(files: Vec<ParsedFile>, oracle: Arc<dyn TypeOracle>) -> Self {
        Self { files, oracle }
    }

    /// Parsed tree for a source path
    pub fn file(&self, path: &str) -> Option<&ParsedFile> {
        self.files.iter().find(|f| f.path == path)
    }
}

impl std::fmt::Debug for ProgramContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgramContext")
            .field("files", &self.files.len())
            .field("oracle_entries", &self.oracle.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::type_resolution::NoTypeOracle;

    fn parse(source: &str) -> Tree {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_typescript::language_typescript())
            .unwrap();
        parser.parse(source, None).unwrap()
    }

    #[test]
    fn test_parsed_file_accessors() {
        let source = "let a = 1;\nlet b = 2;\n";
        let file = ParsedFile::new("a.ts".to_string(), source.to_string(), parse(source), "typescript");

        assert_eq!(file.line_count(), 2);
        assert!(!file.has_errors());
        assert!(!file.is_declaration_file());
        assert_eq!(file.root().kind(), "program");
    }

    #[test]
    fn test_program_context_lookup() {
        let source = "declare const x: number;";
        let file = ParsedFile::new("lib.d.ts".to_string(), source.to_string(), parse(source), "typescript");
        let context = ProgramContext::new(vec![file], Arc::new(NoTypeOracle));

        assert!(context.file("lib.d.ts").unwrap().is_declaration_file());
        assert!(context.file("missing.ts").is_none());
    }
}
