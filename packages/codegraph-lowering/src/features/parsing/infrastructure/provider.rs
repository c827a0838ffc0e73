//! Tree-sitter source provider
//!
//! Reads source and library files from disk, parses them in parallel and
//! builds the declaration index the type oracle answers from.

use rayon::prelude::*;
use std::path::Path;
use std::sync::Arc;

use super::tree_sitter::TreeSitterParser;
use crate::config::LoweringConfig;
use crate::errors::{CodegraphError, Result};
use crate::features::parsing::domain::{ParsedFile, ProgramContext};
use crate::features::parsing::ports::{Parser, SourceProvider};
use crate::features::type_resolution::{DeclarationIndex, NoTypeOracle, TypeOracle};

/// Disk-backed `SourceProvider`
#[derive(Debug, Clone)]
pub struct TreeSitterProvider {
    typescript: TreeSitterParser,
    tsx: TreeSitterParser,
    config: LoweringConfig,
}

impl TreeSitterProvider {
    pub fn new(config: LoweringConfig) -> Self {
        Self {
            typescript: TreeSitterParser::typescript(),
            tsx: TreeSitterParser::tsx(),
            config,
        }
    }

    /// Parser for a path (TSX grammar for `.tsx` when enabled)
    fn parser_for(&self, path: &str) -> &TreeSitterParser {
        let ext = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        if self.config.tsx_for_tsx_files && self.tsx.supports_extension(ext) {
            &self.tsx
        } else {
            &self.typescript
        }
    }

    fn parse_text(&self, path: &str, text: &str) -> Result<ParsedFile> {
        self.parser_for(path).parse(text, path)
    }

    fn read_and_parse(&self, path: &str) -> Result<ParsedFile> {
        let text = std::fs::read_to_string(path).map_err(|e| CodegraphError::io(path, e))?;
        self.parse_text(path, &text)
    }

    fn parse_all(&self, paths: &[String]) -> Result<Vec<ParsedFile>> {
        if self.config.parallel {
            paths.par_iter().map(|p| self.read_and_parse(p)).collect()
        } else {
            paths.iter().map(|p| self.read_and_parse(p)).collect()
        }
    }

    fn build_oracle(&self, sources: &[ParsedFile], libraries: &[ParsedFile]) -> Arc<dyn TypeOracle> {
        let mut index = DeclarationIndex::new();

        if self.config.index_library_declarations {
            for library in libraries {
                index.index_file(library);
            }
        }
        if self.config.index_source_declarations {
            for source in sources {
                index.index_file(source);
            }
        }

        if index.is_empty() {
            Arc::new(NoTypeOracle)
        } else {
            Arc::new(index)
        }
    }
}

impl Default for TreeSitterProvider {
    fn default() -> Self {
        Self::new(LoweringConfig::default())
    }
}

impl SourceProvider for TreeSitterProvider {
    fn load(&self, sources: &[String], libraries: &[String]) -> Result<ProgramContext> {
        let files = self.parse_all(sources)?;
        let library_files = if self.config.index_library_declarations {
            self.parse_all(libraries)?
        } else {
            Vec::new()
        };

        let oracle = self.build_oracle(&files, &library_files);
        tracing::debug!(
            sources = files.len(),
            libraries = library_files.len(),
            declarations = oracle.len(),
            "loaded program"
        );

        Ok(ProgramContext::new(files, oracle))
    }

    fn load_in_memory(&self, files: &[(String, String)]) -> Result<ProgramContext> {
        let parsed = files
            .iter()
            .map(|(path, text)| self.parse_text(path, text))
            .collect::<Result<Vec<_>>>()?;

        let oracle = self.build_oracle(&parsed, &[]);
        Ok(ProgramContext::new(parsed, oracle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::Type;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, text: &str) -> String {
        let path = dir.path().join(name);
        fs::write(&path, text).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_load_sources_and_libraries() {
        let dir = TempDir::new().unwrap();
        let source = write(&dir, "main.ts", "const v = version;");
        let view = write(&dir, "view.tsx", "const el = <div />;");
        let lib = write(&dir, "lib.d.ts", "declare const version: string;");

        let provider = TreeSitterProvider::new(LoweringConfig::sequential());
        let context = provider.load(&[source.clone(), view.clone()], &[lib]).unwrap();

        assert_eq!(context.files.len(), 2);
        assert_eq!(context.files[0].path, source);
        assert_eq!(context.file(&view).unwrap().language, "tsx");
        assert!(!context.file(&view).unwrap().has_errors());
        assert_eq!(context.oracle.declared_type("version"), Some(Type::tvar("string")));
    }

    #[test]
    fn test_library_index_can_be_disabled() {
        let dir = TempDir::new().unwrap();
        let lib = write(&dir, "lib.d.ts", "declare const version: string;");

        let provider = TreeSitterProvider::new(LoweringConfig::sequential().with_library_index(false));
        let context = provider.load(&[], &[lib]).unwrap();

        assert!(context.oracle.is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let provider = TreeSitterProvider::default();
        let err = provider
            .load(&["/definitely/not/here.ts".to_string()], &[])
            .unwrap_err();
        assert!(matches!(err, CodegraphError::Io { .. }));
    }

    #[test]
    fn test_in_memory_source_index() {
        let provider = TreeSitterProvider::new(LoweringConfig::sequential().with_source_index(true));
        let context = provider
            .load_in_memory(&[("a.ts".to_string(), "let n: number = 1;".to_string())])
            .unwrap();
        assert_eq!(context.oracle.declared_type("n"), Some(Type::tvar("number")));
    }
}
