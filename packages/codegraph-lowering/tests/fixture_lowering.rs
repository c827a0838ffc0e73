//! Fixture-based lowering tests
//!
//! Lowers the files in `tests/fixtures/` from disk and checks the parts of
//! the IR each fixture is written to exercise.

mod common;

use std::collections::BTreeSet;

use codegraph_lowering::shared::models::{ClassField, Modifier, Type};
use codegraph_lowering::{Expr, LoweringConfig, ModuleDriver, Stmt};
use common::*;
use pretty_assertions::assert_eq;

// ═══════════════════════════════════════════════════════════════════════════
// Classes
// ═══════════════════════════════════════════════════════════════════════════

fn field(name: &str, ty: &str, is_static: bool) -> ClassField {
    ClassField {
        name: name.to_string(),
        ty: Some(Type::tvar(ty)),
        is_static,
    }
}

#[test]
fn test_class_fields_and_promoted_parameters() {
    let module = lower_fixture("classes.ts");
    let point = expect_class(&module, "Point");

    assert_eq!(
        point.fields,
        vec![
            field("origin", "Point", true),
            field("label", "string", false),
            field("count", "number", false),
            field("x", "number", false),
            field("y", "number", false),
        ]
    );

    let constructor = point.constructor.as_ref().expect("constructor");
    let expected: BTreeSet<String> = ["x", "y"].iter().map(|s| s.to_string()).collect();
    assert_eq!(constructor.public_vars, expected);
}

#[test]
fn test_instance_initializers_lead_the_constructor() {
    let module = lower_fixture("classes.ts");
    let point = expect_class(&module, "Point");
    let constructor = point.constructor.as_ref().expect("constructor");

    assert_eq!(constructor.def.name, "Constructor");
    assert_eq!(
        *constructor.def.body,
        Stmt::Block(vec![
            Stmt::assign(this_field("label"), Expr::string(3)),
            Stmt::assign(this_field("count"), Expr::number(7)),
        ])
    );
}

#[test]
fn test_static_initializers_follow_the_class() {
    let module = lower_fixture("classes.ts");
    assert!(matches!(&module.statements[0], Stmt::ClassDef(c) if c.name == "Point"));
    assert_eq!(
        module.statements[1],
        Stmt::assign(
            Expr::access(Expr::var("Point"), "origin"),
            Expr::construct(Expr::var("Point"), vec![Expr::number(2), Expr::number(2)])
        )
    );
}

#[test]
fn test_methods_are_partitioned_by_staticness() {
    let module = lower_fixture("classes.ts");
    let point = expect_class(&module, "Point");

    let norm = point.method("norm").expect("norm");
    assert!(!norm.is_static);
    assert_eq!(*norm.def.body, Stmt::ret(this_field("x")));

    let zero = point.method("zero").expect("zero");
    assert!(zero.is_static);
    assert!(zero.def.modifiers.contains(&Modifier::Static));
}

#[test]
fn test_field_initializers_synthesize_a_constructor() {
    let module = lower_fixture("classes.ts");
    let counter = expect_class(&module, "Counter");

    assert_eq!(counter.superclass.as_deref(), Some("Base"));
    let constructor = counter.constructor.as_ref().expect("synthesized constructor");
    assert!(constructor.public_vars.is_empty());
    assert!(constructor.def.params.is_empty());
    assert_eq!(
        *constructor.def.body,
        Stmt::assign(this_field("total"), Expr::number(20))
    );

    let value = counter.method("value").expect("getter");
    assert!(value.def.modifiers.contains(&Modifier::Get));
}

#[test]
fn test_computed_members_are_skipped() {
    let module = lower_snippet(
        "class Bag {\n  [Symbol.iterator]() { return items(); }\n  [key] = 1;\n  size = 0;\n  get count() { return 0; }\n}\n",
    );
    let bag = expect_class(&module, "Bag");

    let methods: Vec<&str> = bag.methods.iter().map(|m| m.def.name.as_str()).collect();
    assert_eq!(methods, vec!["count"]);
    let fields: Vec<&str> = bag.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(fields, vec!["size"]);
}

// ═══════════════════════════════════════════════════════════════════════════
// Control flow
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_control_flow_fixture() {
    let module = lower_fixture("control_flow.ts");
    let i = || Expr::var("i");

    assert_eq!(
        module.statements,
        vec![
            var_def("i", Expr::number(1), false),
            Stmt::while_stmt(
                call("<", vec![i(), Expr::var("n")]),
                Stmt::Block(vec![
                    call_stmt("step", vec![i()]),
                    call_stmt("POST_++", vec![i()]),
                ])
            ),
            call_stmt("$Switch", vec![Expr::var("mode")]),
            call_stmt("$Case", vec![Expr::number(6)]),
            call_stmt("start", vec![]),
            call_stmt("$Case", vec![Expr::number(8)]),
            call_stmt("stop", vec![]),
            call_stmt("reset", vec![]),
            call_stmt("open", vec![]),
            call_stmt("close", vec![]),
            call_stmt("tick", vec![]),
            Stmt::while_stmt(Expr::var("running"), call_stmt("tick", vec![])),
        ]
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// Lambdas
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_lambda_fixture_hoisting_order() {
    let module = lower_fixture("lambdas.ts");
    assert_eq!(
        defined_names(&module.statements),
        vec!["$Lambda0", "first", "$Lambda1", "second", "named"]
    );

    // Nested lambdas are hoisted inside the enclosing body, counter continues
    let named = expect_func(&module, "named");
    match named.body.as_ref() {
        Stmt::Block(stmts) => {
            assert_eq!(stmts[0].defined_name(), Some("$Lambda2"));
            assert!(matches!(&stmts[1], Stmt::Expr { is_return: true, .. }));
        }
        other => panic!("expected block body, got {:?}", other),
    }
}

#[test]
fn test_arrow_expression_body_returns() {
    let module = lower_fixture("lambdas.ts");
    let lambda = expect_func(&module, "$Lambda0");
    assert_eq!(lambda.params.len(), 1);
    assert_eq!(lambda.params[0].name, "x");
    assert_eq!(
        *lambda.body,
        Stmt::ret(call("+", vec![Expr::var("x"), Expr::number(1)]))
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// Types, interfaces, enums
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_generic_alias_is_erased() {
    let module = lower_fixture("generics.ts");
    let boxed = expect_alias(&module, "Box");
    assert_eq!(boxed.type_params, vec!["T".to_string()]);
    assert_eq!(
        boxed.ty,
        Type::object(vec![
            ("value".to_string(), Type::Any),
            ("wrap".to_string(), Type::func(vec![Type::Any], Type::tvar("Box"))),
        ])
    );

    assert_eq!(expect_alias(&module, "MaybeName").ty, Type::tvar("string"));
    assert_eq!(expect_alias(&module, "Mixed").ty, Type::Any);
}

#[test]
fn test_generic_function_signature() {
    let module = lower_fixture("generics.ts");
    let identity = expect_func(&module, "identity");
    assert_eq!(identity.type_params, vec!["T".to_string()]);
    assert_eq!(identity.params[0].ty, Some(Type::Any));
    assert_eq!(identity.return_type, Some(Type::Any));
}

#[test]
fn test_interface_becomes_object_alias() {
    let module = lower_fixture("generics.ts");
    assert_eq!(
        expect_alias(&module, "Shape").ty,
        Type::object(vec![
            ("area".to_string(), Type::func(vec![], Type::tvar("number"))),
            ("sides".to_string(), Type::tvar("number")),
        ])
    );
}

#[test]
fn test_enum_becomes_class_of_static_fields() {
    let module = lower_fixture("generics.ts");
    let color = expect_class(&module, "Color");
    assert!(color.constructor.is_none());
    assert!(color.methods.is_empty());
    assert_eq!(
        color.fields,
        vec![
            field("Red", "Color", true),
            field("Green", "Color", true),
            field("Blue", "Color", true),
        ]
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// Library declarations
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_library_declarations_type_unannotated_variables() {
    let driver = ModuleDriver::with_config(LoweringConfig::sequential());
    let modules = driver
        .lower_files(
            &[fixture_path("uses_globals.ts")],
            &[fixture_path("globals.d.ts")],
        )
        .unwrap();
    let module = &modules[0];

    assert_eq!(expect_var(module, "version").ty, Some(Type::tvar("string")));
    assert_eq!(expect_var(module, "user").ty, Some(Type::tvar("User")));
    assert_eq!(expect_var(module, "local").ty, None);
}

#[test]
fn test_library_index_can_be_disabled() {
    let config = LoweringConfig::sequential().with_library_index(false);
    let modules = ModuleDriver::with_config(config)
        .lower_files(
            &[fixture_path("uses_globals.ts")],
            &[fixture_path("globals.d.ts")],
        )
        .unwrap();

    assert_eq!(expect_var(&modules[0], "version").ty, None);
}
