//! Pipeline orchestration
//!
//! `ModuleDriver` ties the parsing, type resolution and lowering features
//! together for a batch of files.

pub mod module_driver;

pub use module_driver::ModuleDriver;
