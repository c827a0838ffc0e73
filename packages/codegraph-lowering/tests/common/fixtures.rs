//! Test fixture loading and generation
//!
//! On-disk TypeScript fixtures live in `tests/fixtures/`.

use std::path::PathBuf;

use codegraph_lowering::{LoweringConfig, Module, ModuleDriver};

/// Absolute path of a fixture file
pub fn fixture_path(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
        .to_string_lossy()
        .into_owned()
}

/// Lower one fixture with a sequential driver
pub fn lower_fixture(name: &str) -> Module {
    let driver = ModuleDriver::with_config(LoweringConfig::sequential());
    let mut modules = driver
        .lower_files(&[fixture_path(name)], &[])
        .unwrap_or_else(|e| panic!("lowering {} failed: {}", name, e));
    modules.remove(0)
}

/// Lower an inline snippet with a sequential driver
pub fn lower_snippet(source: &str) -> Module {
    codegraph_lowering::lower_source("snippet.ts", source)
        .unwrap_or_else(|e| panic!("lowering snippet failed: {}", e))
}

/// A file with N small functions, each holding one arrow function
pub fn fixture_n_functions(n: usize) -> String {
    (0..n)
        .map(|i| {
            format!(
                "function func_{i}(a: number, b: number): number {{\n    const f = (x: number) => x + a;\n    return f(b);\n}}\n"
            )
        })
        .collect()
}

/// A file with N classes, each with a constructor and M methods
pub fn fixture_n_classes(n: usize, methods: usize) -> String {
    (0..n)
        .map(|i| {
            let body: String = (0..methods)
                .map(|j| format!("    method_{j}(arg: string): string {{ return arg; }}\n"))
                .collect();
            format!(
                "class Class_{i} {{\n    count = 0;\n    constructor(private name: string) {{}}\n{body}}}\n"
            )
        })
        .collect()
}
