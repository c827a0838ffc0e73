//! Tree-sitter parser implementation
//!
//! This is where tree-sitter dependency lives.

use tree_sitter::{Node, Parser as TSParser};

use crate::errors::{CodegraphError, Result};
use crate::features::parsing::domain::{ParseError, ParsedFile};
use crate::features::parsing::ports::Parser;

/// Tree-sitter based parser
#[derive(Debug, Clone, Copy)]
pub struct TreeSitterParser {
    dialect: TsDialect,
}

/// Supported tree-sitter-typescript grammars
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsDialect {
    TypeScript,
    Tsx,
}

impl TreeSitterParser {
    /// Create a TypeScript parser
    pub fn typescript() -> Self {
        Self {
            dialect: TsDialect::TypeScript,
        }
    }

    /// Create a TSX parser
    pub fn tsx() -> Self {
        Self {
            dialect: TsDialect::Tsx,
        }
    }

    pub fn dialect(&self) -> TsDialect {
        self.dialect
    }

    /// Get the tree-sitter language
    fn get_ts_language(&self) -> tree_sitter::Language {
        match self.dialect {
            TsDialect::TypeScript => tree_sitter_typescript::language_typescript(),
            TsDialect::Tsx => tree_sitter_typescript::language_tsx(),
        }
    }

    /// Collect parse errors
    fn collect_errors(node: Node<'_>, errors: &mut Vec<ParseError>) {
        if node.is_error() || node.is_missing() {
            let message = if node.is_missing() {
                format!("Missing {:?}", node.kind())
            } else {
                "Unexpected syntax".to_string()
            };
            errors.push(ParseError {
                message,
                line: node.start_position().row as u32 + 1,
                column: node.start_position().column as u32,
            });
        }

        if !node.has_error() {
            return;
        }
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            Self::collect_errors(child, errors);
        }
    }
}

impl Parser for TreeSitterParser {
    fn parse(&self, source: &str, file_path: &str) -> Result<ParsedFile> {
        let mut parser = TSParser::new();
        parser
            .set_language(&self.get_ts_language())
            .map_err(|e| CodegraphError::parse(format!("Failed to set language: {}", e)))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| CodegraphError::parse(format!("Failed to parse {}", file_path)))?;

        let mut errors = Vec::new();
        Self::collect_errors(tree.root_node(), &mut errors);

        if let Some(first) = errors.first() {
            tracing::warn!(
                file = file_path,
                count = errors.len(),
                line = first.line,
                "tree-sitter recovered from syntax errors"
            );
        }

        Ok(ParsedFile::new(
            file_path.to_string(),
            source.to_string(),
            tree,
            self.language_name(),
        )
        .with_errors(errors))
    }

    fn supports_extension(&self, ext: &str) -> bool {
        match self.dialect {
            TsDialect::TypeScript => matches!(ext, "ts" | "mts" | "cts"),
            TsDialect::Tsx => ext == "tsx",
        }
    }

    fn language_name(&self) -> &'static str {
        match self.dialect {
            TsDialect::TypeScript => "typescript",
            TsDialect::Tsx => "tsx",
        }
    }
}
