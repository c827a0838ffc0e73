//! Property-based tests for the IR helpers
//!
//! Invariants that hold for ALL inputs:
//! - flatten_block: a single statement is returned as-is, anything else is
//!   a block with the order preserved
//! - erasure: every named parameter becomes Any, other names survive, and
//!   erasing twice changes nothing

use std::collections::HashSet;

use codegraph_lowering::shared::models::flatten_block;
use codegraph_lowering::{Expr, Stmt, Type};
use proptest::prelude::*;

fn arb_stmt() -> impl Strategy<Value = Stmt> {
    "[a-z]{1,6}".prop_map(|name| Stmt::expr(Expr::var(name)))
}

fn arb_type() -> impl Strategy<Value = Type> {
    let leaf = prop_oneof![
        Just(Type::Any),
        "[A-Z]{1,2}".prop_map(Type::tvar),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            (prop::collection::vec(inner.clone(), 0..4), inner.clone())
                .prop_map(|(args, to)| Type::func(args, to)),
            prop::collection::vec(("[a-z]{1,4}", inner), 0..4).prop_map(Type::object),
        ]
    })
}

/// Every `TVar` name reachable from `ty`
fn names(ty: &Type, out: &mut Vec<String>) {
    match ty {
        Type::TVar(name) => out.push(name.clone()),
        Type::Any => {}
        Type::Func { args, to } => {
            args.iter().for_each(|a| names(a, out));
            names(to, out);
        }
        Type::Object { fields } => fields.iter().for_each(|(_, t)| names(t, out)),
    }
}

proptest! {
    #[test]
    fn prop_flatten_block(stmts in prop::collection::vec(arb_stmt(), 0..8)) {
        let flat = flatten_block(stmts.clone());
        if stmts.len() == 1 {
            prop_assert_eq!(flat, stmts[0].clone());
        } else {
            prop_assert_eq!(flat, Stmt::Block(stmts));
        }
    }

    #[test]
    fn prop_erasure_removes_only_named_params(
        ty in arb_type(),
        params in prop::collection::hash_set("[A-Z]{1,2}", 0..4),
    ) {
        let params: HashSet<String> = params;
        let erased = ty.erase_params(&params);

        let mut before = Vec::new();
        names(&ty, &mut before);
        let mut after = Vec::new();
        names(&erased, &mut after);

        let survivors: Vec<String> = before.into_iter().filter(|n| !params.contains(n)).collect();
        prop_assert_eq!(after, survivors);
        prop_assert_eq!(erased.erase_params(&params), erased);
    }

    #[test]
    fn prop_erasure_without_params_is_identity(ty in arb_type()) {
        prop_assert_eq!(ty.erase_params(&HashSet::new()), ty);
    }
}
