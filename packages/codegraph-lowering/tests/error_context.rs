//! Error context tests
//!
//! A failing file aborts the batch; the error names the file, the line and
//! the syntax kinds from the root to the offending node.

mod common;

use std::fs;

use codegraph_lowering::{CodegraphError, LoweringConfig, LoweringError, ModuleDriver};
use common::*;
use tempfile::TempDir;

#[test]
fn test_unsupported_syntax_carries_location() {
    let path = fixture_path("unsupported.ts");
    let driver = ModuleDriver::with_config(LoweringConfig::sequential());
    let err = driver.lower_files(&[path.clone()], &[]).unwrap_err();

    match &err {
        CodegraphError::Lowering {
            file,
            line,
            kind_path,
            source,
        } => {
            assert_eq!(file, &path);
            assert_eq!(*line, 3);
            assert_eq!(
                kind_path,
                &vec!["program", "function_declaration", "statement_block", "with_statement"]
            );
            assert!(matches!(
                source,
                LoweringError::UnsupportedSyntax { kind, .. } if kind == "with_statement"
            ));
        }
        other => panic!("expected lowering error, got {:?}", other),
    }

    let message = err.to_string();
    assert!(message.contains("unsupported.ts:3"));
    assert!(message.contains("program > function_declaration"));
}

#[test]
fn test_first_failure_aborts_parallel_batch() {
    let driver = ModuleDriver::with_config(LoweringConfig::default().with_num_threads(2));
    let files = vec![
        fixture_path("control_flow.ts"),
        fixture_path("unsupported.ts"),
        fixture_path("lambdas.ts"),
    ];

    let err = driver.lower_files(&files, &[]).unwrap_err();
    assert!(err.as_lowering().is_some());
}

#[test]
fn test_unreadable_library_is_io_error() {
    let driver = ModuleDriver::with_config(LoweringConfig::sequential());
    let err = driver
        .lower_files(
            &[fixture_path("lambdas.ts")],
            &["/definitely/missing/lib.d.ts".to_string()],
        )
        .unwrap_err();

    match err {
        CodegraphError::Io { path, .. } => assert_eq!(path, "/definitely/missing/lib.d.ts"),
        other => panic!("expected io error, got {:?}", other),
    }
}

#[test]
fn test_config_file_drives_the_driver() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("lowering.yaml");
    fs::write(&config_path, "version: 1\nparallel: false\nindex_library_declarations: false\n")
        .unwrap();

    let config = LoweringConfig::from_yaml_file(&config_path).unwrap();
    assert!(!config.parallel);

    let driver = ModuleDriver::with_config(config);
    let modules = driver
        .lower_files(
            &[fixture_path("uses_globals.ts")],
            &["/definitely/missing/lib.d.ts".to_string()],
        )
        .unwrap();

    // Libraries are not even read when indexing is off
    assert_eq!(modules.len(), 1);
    assert_eq!(expect_var(&modules[0], "version").ty, None);
}
