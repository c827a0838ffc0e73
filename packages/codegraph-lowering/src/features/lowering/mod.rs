//! Lowering Feature
//!
//! TypeScript syntax trees → closed statement / expression / type IR.
//!
//! ## Architecture
//!
//! ```text
//! program
//!   ↓ StatementLowerer (one per file: lambda counter, hoisting, type params)
//!   ├─ function / class lowering
//!   ├─ binding resolver (destructuring)
//!   ├─ expression lowering ──→ LambdaAllocator (hoists function literals)
//!   └─ type lowering (erasure of generic parameters)
//! Module
//! ```
//!
//! Every dispatch is a closed `match` over node kinds; a kind without a rule
//! fails with `LoweringError::UnsupportedSyntax` rather than being skipped.

pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export application layer
pub use application::{LowerFileUseCase, LowerFileUseCaseImpl};

pub use domain::{LambdaAllocator, LoweringError, LoweringResult, NodeLocation};
pub use infrastructure::StatementLowerer;
