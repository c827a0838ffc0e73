//! Error types for codegraph-lowering
//!
//! Provides unified error handling across the crate. Feature-level lowering
//! failures are wrapped with the file they occurred in by the module driver.

use thiserror::Error;

use crate::config::ConfigError;
use crate::features::lowering::domain::LoweringError;

/// Main error type for codegraph-lowering operations
#[derive(Debug, Error)]
pub enum CodegraphError {
    /// IO error while reading a source or library file
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Parse error (parser setup or a tree could not be produced)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Lowering of one file failed; the whole batch is aborted
    #[error("{file}:{line}: {source} [{}]", kind_path.join(" > "))]
    Lowering {
        file: String,
        line: u32,
        kind_path: Vec<&'static str>,
        #[source]
        source: LoweringError,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl CodegraphError {
    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        CodegraphError::Parse(msg.into())
    }

    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        CodegraphError::Io {
            path: path.into(),
            source,
        }
    }

    /// Attach the file a lowering failure happened in
    pub fn lowering(file: impl Into<String>, source: LoweringError) -> Self {
        let location = source.location().clone();
        CodegraphError::Lowering {
            file: file.into(),
            line: location.line,
            kind_path: location.kind_path,
            source,
        }
    }

    /// The underlying lowering failure, if this is one
    pub fn as_lowering(&self) -> Option<&LoweringError> {
        match self {
            CodegraphError::Lowering { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type alias for codegraph operations
pub type Result<T> = std::result::Result<T, CodegraphError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::lowering::domain::NodeLocation;

    #[test]
    fn test_lowering_error_display() {
        let inner = LoweringError::UnsupportedSyntax {
            kind: "with_statement".to_string(),
            text: "with (a) {}".to_string(),
            location: NodeLocation {
                line: 3,
                kind_path: vec!["program", "with_statement"],
            },
        };
        let err = CodegraphError::lowering("src/a.ts", inner);

        let msg = err.to_string();
        assert!(msg.contains("src/a.ts:3"));
        assert!(msg.contains("with_statement"));
        assert!(msg.contains("program > with_statement"));
        assert!(err.as_lowering().is_some());
    }
}
