//! Configuration I/O (YAML loading)
//!
//! Defines the versioned YAML schema. Conversion to and from
//! `LoweringConfig` lives in lowering_config.rs.

use serde::{Deserialize, Serialize};

/// YAML Schema v1
///
/// Every field except `version` is optional; missing fields keep the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1)
    pub version: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_threads: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tsx_for_tsx_files: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_library_declarations: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_source_declarations: Option<bool>,
}

/// Schema versions this build understands
pub const SUPPORTED_VERSIONS: &[u32] = &[1];
