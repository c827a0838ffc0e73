//! Lower file use case

use crate::features::lowering::domain::LoweringResult;
use crate::features::lowering::infrastructure::StatementLowerer;
use crate::features::parsing::domain::ParsedFile;
use crate::features::type_resolution::TypeOracle;
use crate::shared::models::Module;

/// Lower one parsed file into a `Module`
pub trait LowerFileUseCase: Send + Sync {
    fn lower_file(&self, file: &ParsedFile, oracle: &dyn TypeOracle) -> LoweringResult<Module>;
}

/// Default implementation: a fresh `StatementLowerer` per file
#[derive(Debug, Default, Clone, Copy)]
pub struct LowerFileUseCaseImpl;

impl LowerFileUseCaseImpl {
    pub fn new() -> Self {
        Self
    }
}

impl LowerFileUseCase for LowerFileUseCaseImpl {
    fn lower_file(&self, file: &ParsedFile, oracle: &dyn TypeOracle) -> LoweringResult<Module> {
        let mut lowerer = StatementLowerer::new(&file.source, oracle);
        let statements = lowerer.lower_program(file.root())?;

        tracing::debug!(
            file = %file.path,
            statements = statements.len(),
            lambdas = lowerer.lambda_count(),
            "lowered file"
        );

        Ok(Module::new(file.path.clone(), statements))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::infrastructure::TreeSitterParser;
    use crate::features::parsing::ports::Parser;
    use crate::features::type_resolution::NoTypeOracle;

    #[test]
    fn test_lower_file_use_case() {
        let file = TreeSitterParser::typescript()
            .parse("let a = 1;\nfunction f() {}\n", "a.ts")
            .unwrap();

        let module = LowerFileUseCaseImpl::new()
            .lower_file(&file, &NoTypeOracle)
            .unwrap();

        assert_eq!(module.name, "a.ts");
        assert_eq!(module.statements.len(), 2);
        assert!(module.find("f").is_some());
    }

    #[test]
    fn test_lambda_counter_is_per_file() {
        let parser = TreeSitterParser::typescript();
        let a = parser.parse("const f = () => 1;", "a.ts").unwrap();
        let b = parser.parse("const g = () => 2;", "b.ts").unwrap();
        let use_case = LowerFileUseCaseImpl::new();

        let a = use_case.lower_file(&a, &NoTypeOracle).unwrap();
        let b = use_case.lower_file(&b, &NoTypeOracle).unwrap();

        assert!(a.find("$Lambda0").is_some());
        assert!(b.find("$Lambda0").is_some());
    }
}
