//! Lowering failure kinds
//!
//! Both kinds are unrecoverable at the point raised. The location is captured
//! from the offending tree-sitter node so the module driver can report the
//! source line and ancestor kinds without holding on to the tree.

use thiserror::Error;
use tree_sitter::Node;

use crate::shared::utils::tree_sitter::{extract_node_text, kind_path, node_line};

/// Where in the syntax tree a lowering failure was raised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeLocation {
    /// 1-indexed source line
    pub line: u32,
    /// Syntax kinds from the root down to the failing node
    pub kind_path: Vec<&'static str>,
}

impl NodeLocation {
    pub fn of(node: Node<'_>) -> Self {
        Self {
            line: node_line(node),
            kind_path: kind_path(node),
        }
    }

    pub fn path_string(&self) -> String {
        self.kind_path.join(" > ")
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoweringError {
    /// The node's syntactic kind has no lowering rule
    #[error("unsupported syntax `{kind}`: {text}")]
    UnsupportedSyntax {
        kind: String,
        text: String,
        location: NodeLocation,
    },

    /// A lowering invariant is broken (duplicate constructor, missing child, ...)
    #[error("structural violation: {message}")]
    StructuralViolation {
        message: String,
        location: NodeLocation,
    },
}

/// Longest source excerpt carried by an error
const MAX_EXCERPT_CHARS: usize = 120;

impl LoweringError {
    pub fn unsupported(node: Node<'_>, source: &str) -> Self {
        let text = extract_node_text(node, source);
        let text = match text.char_indices().nth(MAX_EXCERPT_CHARS) {
            Some((idx, _)) => format!("{}...", &text[..idx]),
            None => text.to_string(),
        };
        LoweringError::UnsupportedSyntax {
            kind: node.kind().to_string(),
            text,
            location: NodeLocation::of(node),
        }
    }

    pub fn structural(node: Node<'_>, message: impl Into<String>) -> Self {
        LoweringError::StructuralViolation {
            message: message.into(),
            location: NodeLocation::of(node),
        }
    }

    /// Required child `field` of `node` is absent
    pub fn missing_child(node: Node<'_>, field: &str) -> Self {
        Self::structural(node, format!("`{}` has no `{}`", node.kind(), field))
    }

    pub fn location(&self) -> &NodeLocation {
        match self {
            LoweringError::UnsupportedSyntax { location, .. } => location,
            LoweringError::StructuralViolation { location, .. } => location,
        }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, LoweringError::UnsupportedSyntax { .. })
    }
}

pub type LoweringResult<T> = std::result::Result<T, LoweringError>;
