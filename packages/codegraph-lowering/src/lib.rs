/*
 * Codegraph Lowering - TypeScript → closed IR
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : IR models (Type, Expr, Stmt, Module), tree-sitter helpers
 * - features/    : Vertical slices (parsing → type_resolution → lowering)
 * - pipeline/    : Module driver (batch orchestration)
 * - config/      : LoweringConfig (builder + versioned YAML)
 *
 * Performance:
 * - Files lowered independently across a Rayon pool
 * - One tree-sitter parse per file, no re-walks
 */

#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and utilities
pub mod shared;

/// Feature modules (parsing, type resolution, lowering)
pub mod features;

/// Pipeline orchestration
pub mod pipeline;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{ConfigError, LoweringConfig};
pub use errors::{CodegraphError, Result};
pub use features::lowering::{LoweringError, NodeLocation, StatementLowerer};
pub use features::parsing::{ParsedFile, SourceProvider, TreeSitterProvider};
pub use features::type_resolution::{DeclarationIndex, NoTypeOracle, TypeOracle};
pub use pipeline::ModuleDriver;
pub use shared::models::{Expr, Module, Stmt, Type};

/// Lower one in-memory TypeScript file with default settings
///
/// ```rust,ignore
/// let module = codegraph_lowering::lower_source("a.ts", "let x = 1;")?;
/// assert_eq!(module.statements.len(), 1);
/// ```
pub fn lower_source(name: &str, text: &str) -> Result<Module> {
    ModuleDriver::with_config(LoweringConfig::sequential()).lower_source(name, text)
}
