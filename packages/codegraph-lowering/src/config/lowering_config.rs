//! Lowering configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, ConfigResult};
use super::io::{ConfigExportV1, SUPPORTED_VERSIONS};
use crate::shared::constants::thread_pool;

/// Driver and provider settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoweringConfig {
    /// Lower files across a rayon pool (output order is unchanged)
    pub parallel: bool,

    /// Size of a dedicated pool; `None` uses the rayon global pool
    pub num_threads: Option<usize>,

    /// Parse `.tsx` files with the TSX grammar
    pub tsx_for_tsx_files: bool,

    /// Feed library declaration files into the type oracle
    pub index_library_declarations: bool,

    /// Also feed the source files themselves into the type oracle
    pub index_source_declarations: bool,
}

impl Default for LoweringConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            num_threads: None,
            tsx_for_tsx_files: true,
            index_library_declarations: true,
            index_source_declarations: false,
        }
    }
}

impl LoweringConfig {
    /// Single-threaded, deterministic scheduling (tests, debugging)
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    pub fn with_tsx(mut self, tsx_for_tsx_files: bool) -> Self {
        self.tsx_for_tsx_files = tsx_for_tsx_files;
        self
    }

    pub fn with_library_index(mut self, enabled: bool) -> Self {
        self.index_library_declarations = enabled;
        self
    }

    pub fn with_source_index(mut self, enabled: bool) -> Self {
        self.index_source_declarations = enabled;
        self
    }

    /// Thread count for a dedicated pool (75% of cores unless configured)
    pub fn effective_threads(&self) -> usize {
        self.num_threads.unwrap_or_else(|| {
            let cores = num_cpus::get() as f64;
            std::cmp::max(
                thread_pool::MIN_THREADS,
                (cores * thread_pool::CPU_UTILIZATION_PERCENT) as usize,
            )
        })
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.num_threads == Some(0) {
            return Err(ConfigError::below_minimum(
                "num_threads",
                0,
                1,
                "Omit num_threads to use the global rayon pool.",
            ));
        }
        Ok(())
    }

    /// Parse a v1 YAML document, starting from defaults
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let export: ConfigExportV1 = serde_yaml::from_str(content)?;

        let version = export.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let defaults = Self::default();
        let config = Self {
            parallel: export.parallel.unwrap_or(defaults.parallel),
            num_threads: export.num_threads.or(defaults.num_threads),
            tsx_for_tsx_files: export
                .tsx_for_tsx_files
                .unwrap_or(defaults.tsx_for_tsx_files),
            index_library_declarations: export
                .index_library_declarations
                .unwrap_or(defaults.index_library_declarations),
            index_source_declarations: export
                .index_source_declarations
                .unwrap_or(defaults.index_source_declarations),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigExportV1 {
            version: Some(1),
            parallel: Some(self.parallel),
            num_threads: self.num_threads,
            tsx_for_tsx_files: Some(self.tsx_for_tsx_files),
            index_library_declarations: Some(self.index_library_declarations),
            index_source_declarations: Some(self.index_source_declarations),
        };
        serde_yaml::to_string(&export).map_err(ConfigError::Yaml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let config = LoweringConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.parallel);
        assert!(config.effective_threads() >= 1);
    }

    #[test]
    fn test_zero_threads_rejected() {
        let config = LoweringConfig::default().with_num_threads(0);
        assert!(matches!(config.validate(), Err(ConfigError::BelowMinimum { .. })));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = LoweringConfig::sequential()
            .with_num_threads(2)
            .with_source_index(true);

        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("version: 1"));
        assert!(yaml.contains("num_threads: 2"));

        let loaded = LoweringConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_yaml_partial_uses_defaults() {
        let config = LoweringConfig::from_yaml_str("version: 1\nparallel: false\n").unwrap();
        assert!(!config.parallel);
        assert!(config.tsx_for_tsx_files);
        assert!(config.index_library_declarations);
    }

    #[test]
    fn test_yaml_errors() {
        assert!(matches!(
            LoweringConfig::from_yaml_str("parallel: true\n"),
            Err(ConfigError::MissingVersion)
        ));
        assert!(matches!(
            LoweringConfig::from_yaml_str("version: 2\n"),
            Err(ConfigError::UnsupportedVersion { found: 2, .. })
        ));
        assert!(matches!(
            LoweringConfig::from_yaml_str("version: 1\nfoo: 1\n"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_yaml_loading_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "version: 1\nnum_threads: 3\ntsx_for_tsx_files: false").unwrap();

        let config = LoweringConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.num_threads, Some(3));
        assert!(!config.tsx_for_tsx_files);
    }
}
