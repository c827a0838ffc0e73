//! Tree-sitter Utility Functions
//!
//! Common utilities for working with tree-sitter AST nodes, shared by the
//! parser adapter, the declaration index and every lowering stage.
//! Nodes are `Copy`, so helpers take them by value and return nodes with the
//! tree's lifetime.

use tree_sitter::Node;

// ═══════════════════════════════════════════════════════════════════════════
// Node Traversal Utilities
// ═══════════════════════════════════════════════════════════════════════════

/// Find a direct child node by kind
///
/// # Example
/// ```ignore
/// let heritage = find_child_by_kind(class_node, "class_heritage");
/// ```
#[inline]
pub fn find_child_by_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|c| c.kind() == kind);
    found
}

/// Named children, skipping extras (comments)
pub fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| !c.is_extra())
        .collect()
}

/// First named, non-extra child
pub fn first_named_child(node: Node<'_>) -> Option<Node<'_>> {
    named_children(node).into_iter().next()
}

/// True if an anonymous keyword token (`static`, `get`, `async`, ...) is a direct child
pub fn has_keyword(node: Node<'_>, keyword: &str) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|c| !c.is_named() && c.kind() == keyword);
    found
}

// ═══════════════════════════════════════════════════════════════════════════
// Text Extraction Utilities
// ═══════════════════════════════════════════════════════════════════════════

/// Extract text content from a node
#[inline]
pub fn extract_node_text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    source.get(node.byte_range()).unwrap_or("")
}

/// Extract text content from a node as owned String
#[inline]
pub fn extract_node_text_owned(node: Node<'_>, source: &str) -> String {
    extract_node_text(node, source).to_string()
}

/// Strip matching quotes from a string literal (`"a"`, `'a'`, `` `a` ``)
pub fn unquote(text: &str) -> &str {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && matches!(first, b'"' | b'\'' | b'`') {
            return &text[1..text.len() - 1];
        }
    }
    text
}

// ═══════════════════════════════════════════════════════════════════════════
// Location Utilities
// ═══════════════════════════════════════════════════════════════════════════

/// 1-indexed source line of a node
#[inline]
pub fn node_line(node: Node<'_>) -> u32 {
    node.start_position().row as u32 + 1
}

/// Syntax kinds from the root down to `node` (inclusive)
pub fn kind_path(node: Node<'_>) -> Vec<&'static str> {
    let mut path = vec![node.kind()];
    let mut current = node.parent();
    while let Some(parent) = current {
        path.push(parent.kind());
        current = parent.parent();
    }
    path.reverse();
    path
}
