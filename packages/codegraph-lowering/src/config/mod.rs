//! Configuration
//!
//! `LoweringConfig` controls how the module driver schedules files and what
//! the type oracle indexes. It can be built in code or loaded from YAML:
//!
//! ```rust,ignore
//! use codegraph_lowering::config::LoweringConfig;
//!
//! let config = LoweringConfig::default().with_parallel(false);
//! let config = LoweringConfig::from_yaml_file("lowering.yaml")?;
//! ```

pub mod error;
pub mod io;
pub mod lowering_config;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use io::ConfigExportV1;
pub use lowering_config::LoweringConfig;
