//! Class Lowering
//!
//! Partitions class members into an optional constructor, fields and
//! methods. Field initializers move out of the class body: instance ones to
//! the head of the constructor, static ones to assignments emitted right
//! after the `ClassDef`.

use std::collections::BTreeSet;
use tree_sitter::Node;

use super::function_lowering::LoweredFunction;
use super::stmt_lowering::StatementLowerer;
use crate::features::lowering::domain::{LoweringError, LoweringResult};
use crate::features::lowering::infrastructure::type_lowering::{
    lower_index_signature, property_name,
};
use crate::features::parsing::infrastructure::tree_sitter::languages::typescript::node_kinds;
use crate::shared::constants::synthesized;
use crate::shared::models::{
    flatten_block, ClassDef, ClassField, ClassMethod, Constructor, Expr, FuncDef, Modifier,
    Modifiers, SpecialVar, Stmt,
};
use crate::shared::utils::tree_sitter::{
    extract_node_text, find_child_by_kind, has_keyword, named_children, node_line,
};

/// Member keyword tokens recorded as modifiers
const MEMBER_KEYWORDS: [&str; 5] = ["static", "readonly", "abstract", "declare", "async"];

/// Mutable member lists for one class, frozen into a `ClassDef`
#[derive(Default)]
struct ClassBuilder {
    constructor: Option<LoweredFunction>,
    fields: Vec<ClassField>,
    methods: Vec<ClassMethod>,
    instance_inits: Vec<Stmt>,
    static_inits: Vec<Stmt>,
}

impl ClassBuilder {
    fn add_field(&mut self, field: ClassField) {
        if self.fields.iter().all(|f| f.name != field.name || f.is_static != field.is_static) {
            self.fields.push(field);
        }
    }
}

impl<'a> StatementLowerer<'a> {
    /// `ClassDef` followed by the static initializer assignments
    pub(super) fn lower_class(
        &mut self,
        node: Node<'_>,
        mut modifiers: Modifiers,
    ) -> LoweringResult<Vec<Stmt>> {
        let name = self.declared_name(node)?;
        if node.kind() == node_kinds::ABSTRACT_CLASS_DECLARATION {
            modifiers.insert(Modifier::Abstract);
        }

        let superclass = find_child_by_kind(node, node_kinds::CLASS_HERITAGE)
            .and_then(|heritage| find_child_by_kind(heritage, node_kinds::EXTENDS_CLAUSE))
            .and_then(|extends| extends.child_by_field_name("value"))
            .map(|value| self.text(value));

        let type_params = self.enter_type_params(node);
        let builder = self.lower_class_body(node, &name);
        self.exit_type_params();
        let builder = builder?;

        let mut fields = builder.fields;
        let constructor = match builder.constructor {
            Some(lowered) => {
                let mut seen: BTreeSet<String> = fields.iter().map(|f| f.name.clone()).collect();
                for (field, ty) in lowered.promoted_fields() {
                    if seen.insert(field.clone()) {
                        fields.push(ClassField {
                            name: field,
                            ty,
                            is_static: false,
                        });
                    }
                }
                let public_vars = lowered.promoted_names().map(str::to_string).collect();
                Some(Constructor {
                    def: prepend_to_body(lowered.def, builder.instance_inits),
                    public_vars,
                })
            }
            None if !builder.instance_inits.is_empty() => Some(Constructor {
                def: FuncDef {
                    name: synthesized::CONSTRUCTOR_NAME.to_string(),
                    params: Vec::new(),
                    return_type: None,
                    body: Box::new(flatten_block(builder.instance_inits)),
                    modifiers: Modifiers::new(),
                    type_params: Vec::new(),
                },
                public_vars: BTreeSet::new(),
            }),
            None => None,
        };

        let mut out = vec![Stmt::ClassDef(ClassDef {
            name,
            constructor,
            fields,
            methods: builder.methods,
            superclass,
            modifiers,
            type_params,
        })];
        out.extend(builder.static_inits);
        Ok(out)
    }

    fn lower_class_body(&mut self, node: Node<'_>, class_name: &str) -> LoweringResult<ClassBuilder> {
        let mut builder = ClassBuilder::default();
        let body = self.required(node, "body")?;

        for member in named_children(body) {
            match member.kind() {
                _ if has_computed_name(member) => {
                    tracing::debug!(
                        class = class_name,
                        line = node_line(member),
                        "skipping member with a computed name"
                    );
                }

                node_kinds::METHOD_DEFINITION | node_kinds::ABSTRACT_METHOD_SIGNATURE => {
                    self.lower_method(member, &mut builder)?;
                }

                node_kinds::METHOD_SIGNATURE => {
                    tracing::debug!(
                        class = class_name,
                        line = node_line(member),
                        "skipping method overload signature"
                    );
                }

                node_kinds::PUBLIC_FIELD_DEFINITION => {
                    self.lower_field(member, class_name, &mut builder)?;
                }

                node_kinds::INDEX_SIGNATURE => {
                    let ty = lower_index_signature(member, self.source)?;
                    builder.add_field(ClassField {
                        name: synthesized::ACCESS_FIELD.to_string(),
                        ty: Some(self.erase(ty)),
                        is_static: false,
                    });
                }

                node_kinds::CLASS_STATIC_BLOCK => {
                    let block = self.required(member, "body")?;
                    let stmts = self.lower_body(block)?;
                    builder.static_inits.extend(stmts);
                }

                node_kinds::DECORATOR => {}

                _ => return Err(LoweringError::unsupported(member, self.source)),
            }
        }
        Ok(builder)
    }

    fn lower_method(&mut self, member: Node<'_>, builder: &mut ClassBuilder) -> LoweringResult<()> {
        let name_node = self.required(member, "name")?;
        let name = property_name(name_node, self.source)?;
        let modifiers = self.member_modifiers(member);
        let is_static = modifiers.contains(&Modifier::Static);

        if name == "constructor" && !is_static {
            if builder.constructor.is_some() {
                return Err(LoweringError::structural(
                    member,
                    "class declares more than one constructor",
                ));
            }
            let lowered = self.lower_function(
                member,
                synthesized::CONSTRUCTOR_NAME.to_string(),
                modifiers,
            )?;
            builder.constructor = Some(lowered);
            return Ok(());
        }

        let lowered = self.lower_function(member, name, modifiers)?;
        builder.methods.push(ClassMethod {
            def: lowered.def,
            is_static,
        });
        Ok(())
    }

    fn lower_field(
        &mut self,
        member: Node<'_>,
        class_name: &str,
        builder: &mut ClassBuilder,
    ) -> LoweringResult<()> {
        let name = property_name(self.required(member, "name")?, self.source)?;
        let is_static = has_keyword(member, "static");
        let ty = self.annotation(member.child_by_field_name("type"))?;

        if let Some(value) = member.child_by_field_name("value") {
            let init = self.expr(value)?;
            if is_static {
                let target = Expr::access(Expr::var(class_name), name.clone());
                builder.static_inits.push(Stmt::assign(target, init));
            } else {
                let target = Expr::access(Expr::special(SpecialVar::This), name.clone());
                builder.instance_inits.push(Stmt::assign(target, init));
            }
        }

        builder.add_field(ClassField {
            name,
            ty,
            is_static,
        });
        Ok(())
    }

    /// Keyword and accessibility modifiers of a class member
    fn member_modifiers(&self, member: Node<'_>) -> Modifiers {
        let mut modifiers = Modifiers::new();
        for keyword in MEMBER_KEYWORDS {
            if has_keyword(member, keyword) {
                if let Some(modifier) = Modifier::from_keyword(keyword) {
                    modifiers.insert(modifier);
                }
            }
        }
        for child in named_children(member) {
            match child.kind() {
                node_kinds::ACCESSIBILITY_MODIFIER => {
                    if let Some(modifier) =
                        Modifier::from_keyword(extract_node_text(child, self.source).trim())
                    {
                        modifiers.insert(modifier);
                    }
                }
                node_kinds::OVERRIDE_MODIFIER => {
                    modifiers.insert(Modifier::Override);
                }
                _ => {}
            }
        }
        modifiers
    }
}

/// `[Symbol.iterator]() {}`, `[key] = 1`
fn has_computed_name(member: Node<'_>) -> bool {
    member
        .child_by_field_name("name")
        .map_or(false, |name| name.kind() == node_kinds::COMPUTED_PROPERTY_NAME)
}

/// Put field initializers in front of an existing constructor body
fn prepend_to_body(mut def: FuncDef, mut inits: Vec<Stmt>) -> FuncDef {
    if inits.is_empty() {
        return def;
    }
    match *def.body {
        Stmt::Block(stmts) => inits.extend(stmts),
        stmt => inits.push(stmt),
    }
    def.body = Box::new(flatten_block(inits));
    def
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepend_to_block_body() {
        let def = FuncDef {
            name: "Constructor".to_string(),
            params: vec![],
            return_type: None,
            body: Box::new(Stmt::Block(vec![Stmt::expr(Expr::var("a")), Stmt::expr(Expr::var("b"))])),
            modifiers: Modifiers::new(),
            type_params: vec![],
        };
        let init = Stmt::assign(Expr::access(Expr::var("this"), "x"), Expr::number(1));

        let def = prepend_to_body(def, vec![init.clone()]);
        assert_eq!(
            *def.body,
            Stmt::Block(vec![init, Stmt::expr(Expr::var("a")), Stmt::expr(Expr::var("b"))])
        );
    }

    #[test]
    fn test_prepend_to_single_statement_body() {
        let def = FuncDef {
            name: "Constructor".to_string(),
            params: vec![],
            return_type: None,
            body: Box::new(Stmt::expr(Expr::var("a"))),
            modifiers: Modifiers::new(),
            type_params: vec![],
        };
        let init = Stmt::assign(Expr::access(Expr::var("this"), "x"), Expr::number(1));

        let def = prepend_to_body(def, vec![init.clone()]);
        assert_eq!(*def.body, Stmt::Block(vec![init, Stmt::expr(Expr::var("a"))]));
    }
}
