//! Module Driver
//!
//! Loads a program through a `SourceProvider` and lowers every source file
//! into a `Module`. Files are independent: with `config.parallel` they are
//! lowered across a rayon pool, and the output keeps the input order.
//!
//! ```text
//! paths → SourceProvider::load → ProgramContext { files, oracle }
//!       → LowerFileUseCase per file (rayon) → Vec<Module>
//! ```
//!
//! The first file that fails aborts the batch with
//! `CodegraphError::Lowering`, which names the file and the failing node.

use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;

use crate::config::LoweringConfig;
use crate::errors::{CodegraphError, Result};
use crate::features::lowering::{LowerFileUseCase, LowerFileUseCaseImpl};
use crate::features::parsing::{ParsedFile, ProgramContext, SourceProvider, TreeSitterProvider};
use crate::features::type_resolution::TypeOracle;
use crate::shared::models::Module;

/// Orchestrates parsing and lowering for a batch of files
pub struct ModuleDriver {
    config: LoweringConfig,
    provider: Arc<dyn SourceProvider>,
    use_case: Arc<dyn LowerFileUseCase>,
}

impl ModuleDriver {
    /// Driver over a custom provider
    pub fn new(config: LoweringConfig, provider: Arc<dyn SourceProvider>) -> Self {
        Self {
            config,
            provider,
            use_case: Arc::new(LowerFileUseCaseImpl::new()),
        }
    }

    /// Driver reading from disk with the tree-sitter provider
    pub fn with_config(config: LoweringConfig) -> Self {
        let provider = Arc::new(TreeSitterProvider::new(config.clone()));
        Self::new(config, provider)
    }

    pub fn config(&self) -> &LoweringConfig {
        &self.config
    }

    /// Lower `sources`, resolving unannotated globals against `libraries`
    pub fn lower_files(&self, sources: &[String], libraries: &[String]) -> Result<Vec<Module>> {
        self.config.validate()?;
        let start = Instant::now();

        let program = self.provider.load(sources, libraries)?;
        let modules = self.lower_program(&program)?;

        tracing::info!(
            files = modules.len(),
            statements = modules.iter().map(Module::statement_count).sum::<usize>(),
            declarations = program.oracle.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "lowering batch complete"
        );

        Ok(modules)
    }

    /// Lower one in-memory file named `name`
    pub fn lower_source(&self, name: &str, text: &str) -> Result<Module> {
        self.config.validate()?;

        let program = self
            .provider
            .load_in_memory(&[(name.to_string(), text.to_string())])?;
        let mut modules = self.lower_program(&program)?;

        modules
            .pop()
            .ok_or_else(|| CodegraphError::parse(format!("no module produced for {}", name)))
    }

    fn lower_program(&self, program: &ProgramContext) -> Result<Vec<Module>> {
        let oracle = program.oracle.as_ref();

        if !self.config.parallel {
            return program
                .files
                .iter()
                .map(|file| self.lower_one(file, oracle))
                .collect();
        }

        if self.config.num_threads.is_none() {
            return self.lower_parallel(&program.files, oracle);
        }

        let threads = self.config.effective_threads();
        match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => pool.install(|| self.lower_parallel(&program.files, oracle)),
            Err(e) => {
                tracing::warn!(threads, error = %e, "falling back to the global rayon pool");
                self.lower_parallel(&program.files, oracle)
            }
        }
    }

    fn lower_parallel(&self, files: &[ParsedFile], oracle: &dyn TypeOracle) -> Result<Vec<Module>> {
        // Indexed collect keeps input order
        files
            .par_iter()
            .map(|file| self.lower_one(file, oracle))
            .collect()
    }

    fn lower_one(&self, file: &ParsedFile, oracle: &dyn TypeOracle) -> Result<Module> {
        self.use_case
            .lower_file(file, oracle)
            .map_err(|err| CodegraphError::lowering(file.path.clone(), err))
    }
}

impl Default for ModuleDriver {
    fn default() -> Self {
        Self::with_config(LoweringConfig::default())
    }
}
