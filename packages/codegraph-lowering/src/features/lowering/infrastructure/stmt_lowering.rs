//! Statement Lowering
//!
//! One `StatementLowerer` per file. It owns the per-file lambda counter, the
//! hoisting accumulator and the lexical stack of generic parameter names.
//! Function and class declarations are lowered in sibling modules through
//! additional `impl` blocks on the same type.
//!
//! ## Hoisting
//!
//! Every `lower_stmt` call opens a fresh hoisting scope. Lambdas met while
//! lowering that statement's own expressions come out first, ahead of the
//! statement itself. Nested bodies open their own scopes, so a lambda always
//! lands in front of the statement that mentions it.

use std::collections::HashSet;
use tree_sitter::Node;

use crate::features::lowering::domain::{LambdaAllocator, LoweringError, LoweringResult};
use crate::features::lowering::infrastructure::binding_resolver::resolve_pattern;
use crate::features::lowering::infrastructure::expr_lowering::{identifier_name, lower_expr};
use crate::features::lowering::infrastructure::type_lowering::{
    collect_type_param_names, lower_object_members, lower_type, lower_type_annotation,
    property_name,
};
use crate::features::parsing::infrastructure::tree_sitter::languages::typescript::{
    is_class_declaration, is_destructuring_pattern, is_raw_comment_statement, node_kinds,
};
use crate::features::type_resolution::TypeOracle;
use crate::shared::constants::synthesized;
use crate::shared::models::{
    flatten_block, strip_definitions, ClassDef, ClassField, Expr, Modifier, Modifiers, SpecialVar,
    Stmt, Type, TypeAlias, VarDef,
};
use crate::shared::utils::tree_sitter::{
    extract_node_text, extract_node_text_owned, find_child_by_kind,
    first_named_child, has_keyword, named_children, node_line,
};

/// Per-file statement lowering state
pub struct StatementLowerer<'a> {
    pub(super) source: &'a str,
    pub(super) oracle: &'a dyn TypeOracle,
    /// Next `$Lambda{n}` suffix
    pub(super) lambda_counter: usize,
    /// Definitions hoisted by the statement currently being lowered
    pub(super) hoisted: Vec<Stmt>,
    /// Generic parameter names of the enclosing declarations, innermost last
    pub(super) type_params: Vec<Vec<String>>,
}

impl<'a> StatementLowerer<'a> {
    pub fn new(source: &'a str, oracle: &'a dyn TypeOracle) -> Self {
        Self {
            source,
            oracle,
            lambda_counter: 0,
            hoisted: Vec::new(),
            type_params: Vec::new(),
        }
    }

    /// Number of anonymous lambdas named so far
    pub fn lambda_count(&self) -> usize {
        self.lambda_counter
    }

    /// Lower every top-level statement of a `program` node, in source order
    pub fn lower_program(&mut self, root: Node<'_>) -> LoweringResult<Vec<Stmt>> {
        if root.kind() != node_kinds::PROGRAM {
            return Err(LoweringError::structural(root, "expected a program root"));
        }
        let mut out = Vec::new();
        for stmt in named_children(root) {
            out.extend(self.lower_stmt(stmt)?);
        }
        Ok(out)
    }

    /// Lower one statement; hoisted definitions precede its output
    pub fn lower_stmt(&mut self, node: Node<'_>) -> LoweringResult<Vec<Stmt>> {
        self.hoisting_scope(|this| this.lower_declaration(node, Modifiers::new()))
    }

    /// Run `lower` with an empty hoisting accumulator and prepend what it hoisted
    pub(super) fn hoisting_scope(
        &mut self,
        lower: impl FnOnce(&mut Self) -> LoweringResult<Vec<Stmt>>,
    ) -> LoweringResult<Vec<Stmt>> {
        let outer = std::mem::take(&mut self.hoisted);
        let result = lower(self);
        let mut stmts = std::mem::replace(&mut self.hoisted, outer);

        stmts.extend(result?);
        Ok(stmts)
    }

    /// Lower a statement body: the children of a block, or a single statement
    pub(super) fn lower_body(&mut self, node: Node<'_>) -> LoweringResult<Vec<Stmt>> {
        if node.kind() == node_kinds::STATEMENT_BLOCK {
            let mut out = Vec::new();
            for child in named_children(node) {
                out.extend(self.lower_stmt(child)?);
            }
            Ok(out)
        } else {
            self.lower_stmt(node)
        }
    }

    fn lower_branch(&mut self, node: Node<'_>) -> LoweringResult<Stmt> {
        Ok(flatten_block(self.lower_body(node)?))
    }

    pub(super) fn expr(&mut self, node: Node<'_>) -> LoweringResult<Expr> {
        let source = self.source;
        lower_expr(node, source, self)
    }

    pub(super) fn text(&self, node: Node<'_>) -> String {
        extract_node_text_owned(node, self.source)
    }

    pub(super) fn required<'t>(&self, node: Node<'t>, field: &str) -> LoweringResult<Node<'t>> {
        node.child_by_field_name(field)
            .ok_or_else(|| LoweringError::missing_child(node, field))
    }

    /// Name from the `name` field; absent or empty names are structural errors
    pub(super) fn declared_name(&self, node: Node<'_>) -> LoweringResult<String> {
        let name = self.required(node, "name")?;
        identifier_name(name, self.source)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Type parameter scope
    // ═══════════════════════════════════════════════════════════════════════

    /// Push the generic parameters declared by `decl`; returns them
    pub(super) fn enter_type_params(&mut self, decl: Node<'_>) -> Vec<String> {
        let names = collect_type_param_names(decl, self.source);
        self.type_params.push(names.clone());
        names
    }

    pub(super) fn exit_type_params(&mut self) {
        self.type_params.pop();
    }

    /// Erase every generic parameter currently in scope
    pub(super) fn erase(&self, ty: Type) -> Type {
        let names: HashSet<String> = self.type_params.iter().flatten().cloned().collect();
        ty.erase_params(&names)
    }

    pub(super) fn annotation(&self, node: Option<Node<'_>>) -> LoweringResult<Option<Type>> {
        Ok(lower_type_annotation(node, self.source)?.map(|ty| self.erase(ty)))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Statement dispatch
    // ═══════════════════════════════════════════════════════════════════════

    /// Dispatch on the statement kind; `modifiers` come from an enclosing `export`
    fn lower_declaration(&mut self, node: Node<'_>, modifiers: Modifiers) -> LoweringResult<Vec<Stmt>> {
        let kind = node.kind();

        match kind {
            node_kinds::EXPRESSION_STATEMENT => {
                let expr = first_named_child(node)
                    .ok_or_else(|| LoweringError::missing_child(node, "expression"))?;
                self.lower_expression_statement(expr)
            }

            node_kinds::RETURN_STATEMENT => match first_named_child(node) {
                Some(value) => Ok(vec![Stmt::ret(self.expr(value)?)]),
                None => Ok(vec![Stmt::comment("return")]),
            },

            node_kinds::THROW_STATEMENT => {
                let value = first_named_child(node)
                    .ok_or_else(|| LoweringError::missing_child(node, "expression"))?;
                let value = self.expr(value)?;
                Ok(vec![Stmt::expr(Expr::special_call(SpecialVar::Throw, vec![value]))])
            }

            node_kinds::LEXICAL_DECLARATION | node_kinds::VARIABLE_DECLARATION => {
                self.lower_variable_declaration(node, modifiers)
            }

            node_kinds::IF_STATEMENT => {
                let cond = self.expr(self.required(node, "condition")?)?;
                let then = self.lower_branch(self.required(node, "consequence")?)?;
                let otherwise = match node.child_by_field_name("alternative") {
                    Some(alternative) => {
                        let branch = first_named_child(alternative)
                            .ok_or_else(|| LoweringError::missing_child(alternative, "body"))?;
                        self.lower_branch(branch)?
                    }
                    None => Stmt::empty_block(),
                };
                Ok(vec![Stmt::if_stmt(cond, then, otherwise)])
            }

            node_kinds::WHILE_STATEMENT => {
                let cond = self.expr(self.required(node, "condition")?)?;
                let body = self.lower_branch(self.required(node, "body")?)?;
                Ok(vec![Stmt::while_stmt(cond, body)])
            }

            // `do B while (c)` runs B once, then loops. Definitions in B,
            // hoisted lambdas included, stay in the leading copy only.
            node_kinds::DO_STATEMENT => {
                let body = self.lower_body(self.required(node, "body")?)?;
                let cond = self.expr(self.required(node, "condition")?)?;
                let repeated = strip_definitions(body.clone());
                let mut out = body;
                out.push(Stmt::while_stmt(cond, flatten_block(repeated)));
                Ok(out)
            }

            node_kinds::FOR_STATEMENT => self.lower_for(node),

            node_kinds::SWITCH_STATEMENT => self.lower_switch(node),

            // Exceptions are not modelled: the catch clause and its binding are
            // dropped, only the protected block and the finalizer remain.
            node_kinds::TRY_STATEMENT => {
                let mut out = self.lower_body(self.required(node, "body")?)?;
                if let Some(finalizer) = node.child_by_field_name("finalizer") {
                    let body = self.required(finalizer, "body")?;
                    out.extend(self.lower_body(body)?);
                }
                Ok(out)
            }

            node_kinds::STATEMENT_BLOCK => Ok(vec![self.lower_branch(node)?]),

            node_kinds::LABELED_STATEMENT => {
                let body = self.required(node, "body")?;
                self.lower_stmt(body)
            }

            node_kinds::EMPTY_STATEMENT => Ok(Vec::new()),

            node_kinds::IMPORT_STATEMENT => {
                if find_child_by_kind(node, node_kinds::IMPORT_REQUIRE_CLAUSE).is_some() {
                    Ok(vec![Stmt::comment(self.text(node))])
                } else {
                    Ok(vec![Stmt::Import(self.text(node))])
                }
            }

            node_kinds::EXPORT_STATEMENT => match node.child_by_field_name("declaration") {
                Some(declaration) => {
                    let mut modifiers = modifiers;
                    modifiers.insert(Modifier::Export);
                    if has_keyword(node, "default") {
                        modifiers.insert(Modifier::Default);
                    }
                    self.lower_declaration(declaration, modifiers)
                }
                None => Ok(vec![Stmt::Export(self.text(node))]),
            },

            node_kinds::FUNCTION_DECLARATION | node_kinds::GENERATOR_FUNCTION_DECLARATION => {
                let name = self.declared_name(node)?;
                let lowered = self.lower_function(node, name, modifiers)?;
                Ok(vec![Stmt::FuncDef(lowered.def)])
            }

            _ if is_class_declaration(kind) => self.lower_class(node, modifiers),

            node_kinds::INTERFACE_DECLARATION => {
                let name = self.declared_name(node)?;
                let type_params = self.enter_type_params(node);
                let body = self.required(node, "body");
                let ty = body.and_then(|body| lower_object_members(body, self.source));
                let ty = ty.map(|ty| self.erase(ty));
                self.exit_type_params();

                Ok(vec![Stmt::TypeAlias(TypeAlias {
                    name,
                    type_params,
                    ty: ty?,
                    modifiers,
                })])
            }

            node_kinds::TYPE_ALIAS_DECLARATION => {
                let name = self.declared_name(node)?;
                let type_params = self.enter_type_params(node);
                let value = self.required(node, "value");
                let ty = value.and_then(|value| lower_type(value, self.source));
                let ty = ty.map(|ty| self.erase(ty));
                self.exit_type_params();

                Ok(vec![Stmt::TypeAlias(TypeAlias {
                    name,
                    type_params,
                    ty: ty?,
                    modifiers,
                })])
            }

            node_kinds::ENUM_DECLARATION => self.lower_enum(node, modifiers),

            _ if is_raw_comment_statement(kind) => Ok(vec![Stmt::comment(self.text(node))]),

            _ => Err(LoweringError::unsupported(node, self.source)),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Expression statements
    // ═══════════════════════════════════════════════════════════════════════

    fn lower_expression_statement(&mut self, expr: Node<'_>) -> LoweringResult<Vec<Stmt>> {
        match expr.kind() {
            node_kinds::PARENTHESIZED_EXPRESSION => {
                let inner = first_named_child(expr)
                    .ok_or_else(|| LoweringError::missing_child(expr, "expression"))?;
                self.lower_expression_statement(inner)
            }

            node_kinds::ASSIGNMENT_EXPRESSION => {
                let left = self.required(expr, "left")?;
                let right = self.expr(self.required(expr, "right")?)?;

                if is_destructuring_pattern(left.kind()) {
                    let mut out = Vec::new();
                    for binding in resolve_pattern(left, right, self.source)? {
                        let target = self.expr(binding.target)?;
                        out.push(Stmt::assign(target, binding.init));
                    }
                    Ok(out)
                } else {
                    let target = self.expr(left)?;
                    Ok(vec![Stmt::assign(target, right)])
                }
            }

            node_kinds::SEQUENCE_EXPRESSION => {
                let mut out = Vec::new();
                for part in named_children(expr) {
                    out.extend(self.lower_expression_statement(part)?);
                }
                Ok(out)
            }

            node_kinds::YIELD_EXPRESSION => Ok(vec![Stmt::ret(self.expr(expr)?)]),

            // `namespace N {}` can parse in expression position
            kind if is_raw_comment_statement(kind) => Ok(vec![Stmt::comment(self.text(expr))]),

            _ => Ok(vec![Stmt::expr(self.expr(expr)?)]),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Variable declarations
    // ═══════════════════════════════════════════════════════════════════════

    fn lower_variable_declaration(
        &mut self,
        node: Node<'_>,
        modifiers: Modifiers,
    ) -> LoweringResult<Vec<Stmt>> {
        let is_const = node
            .child_by_field_name("kind")
            .map_or(false, |k| extract_node_text(k, self.source) == "const");

        let mut out = Vec::new();
        for declarator in named_children(node) {
            if declarator.kind() != node_kinds::VARIABLE_DECLARATOR {
                continue;
            }

            let pattern = self.required(declarator, "name")?;
            let value = declarator.child_by_field_name("value");
            let init = match value {
                Some(value) => self.expr(value)?,
                None => Expr::null(node_line(declarator)),
            };

            if pattern.kind() == node_kinds::IDENTIFIER {
                let declared = self.annotation(declarator.child_by_field_name("type"))?;
                let ty = declared.or_else(|| value.and_then(|v| self.oracle_type(v)));
                out.push(Stmt::VarDef(VarDef {
                    name: identifier_name(pattern, self.source)?,
                    ty,
                    init,
                    is_const,
                    modifiers: modifiers.clone(),
                }));
                continue;
            }

            for binding in resolve_pattern(pattern, init, self.source)? {
                out.push(Stmt::VarDef(VarDef {
                    name: identifier_name(binding.target, self.source)?,
                    ty: None,
                    init: binding.init,
                    is_const,
                    modifiers: modifiers.clone(),
                }));
            }
        }
        Ok(out)
    }

    /// Declared type of `x` or the return type of `f(...)` for an initializer
    fn oracle_type(&self, value: Node<'_>) -> Option<Type> {
        match value.kind() {
            node_kinds::IDENTIFIER => self.oracle.declared_type(extract_node_text(value, self.source)),
            node_kinds::CALL_EXPRESSION => {
                let callee = value.child_by_field_name("function")?;
                if callee.kind() != node_kinds::IDENTIFIER {
                    return None;
                }
                match self.oracle.declared_type(extract_node_text(callee, self.source))? {
                    Type::Func { to, .. } => Some(*to),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Loops and switch
    // ═══════════════════════════════════════════════════════════════════════

    /// `init; while (cond) { body; incr }`
    fn lower_for(&mut self, node: Node<'_>) -> LoweringResult<Vec<Stmt>> {
        let mut out = match node.child_by_field_name("initializer") {
            Some(init) => match init.kind() {
                node_kinds::LEXICAL_DECLARATION
                | node_kinds::VARIABLE_DECLARATION
                | node_kinds::EXPRESSION_STATEMENT
                | node_kinds::EMPTY_STATEMENT => self.lower_stmt(init)?,
                _ => self.lower_expression_statement(init)?,
            },
            None => Vec::new(),
        };

        let cond = match node.child_by_field_name("condition") {
            Some(cond) if cond.kind() == node_kinds::EXPRESSION_STATEMENT => {
                let inner = first_named_child(cond)
                    .ok_or_else(|| LoweringError::missing_child(cond, "expression"))?;
                self.expr(inner)?
            }
            Some(cond) if cond.kind() != node_kinds::EMPTY_STATEMENT => self.expr(cond)?,
            _ => Expr::boolean(node_line(node)),
        };

        let increment = node
            .child_by_field_name("increment")
            .map(|incr| self.expr(incr))
            .transpose()?;

        let mut body = self.lower_body(self.required(node, "body")?)?;
        if let Some(increment) = increment {
            body.push(Stmt::expr(increment));
        }

        out.push(Stmt::while_stmt(cond, flatten_block(body)));
        Ok(out)
    }

    /// `$Switch(x)`, then `$Case(c)` + body per case, then the default body
    fn lower_switch(&mut self, node: Node<'_>) -> LoweringResult<Vec<Stmt>> {
        let value = self.expr(self.required(node, "value")?)?;
        let mut out = vec![Stmt::expr(Expr::special_call(SpecialVar::Switch, vec![value]))];

        let body = self.required(node, "body")?;
        for clause in named_children(body) {
            let mut stmts = named_children(clause).into_iter();
            match clause.kind() {
                node_kinds::SWITCH_CASE => {
                    // First named child is the case value, the rest is the body
                    let value = stmts
                        .next()
                        .ok_or_else(|| LoweringError::missing_child(clause, "value"))?;
                    let case = self.expr(value)?;
                    out.push(Stmt::expr(Expr::special_call(SpecialVar::Case, vec![case])));
                }
                node_kinds::SWITCH_DEFAULT => {}
                _ => return Err(LoweringError::unsupported(clause, self.source)),
            }
            for stmt in stmts {
                out.extend(self.lower_stmt(stmt)?);
            }
        }
        Ok(out)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Enums
    // ═══════════════════════════════════════════════════════════════════════

    /// One static field per member, typed as the enum itself
    fn lower_enum(&mut self, node: Node<'_>, mut modifiers: Modifiers) -> LoweringResult<Vec<Stmt>> {
        let name = self.declared_name(node)?;
        if has_keyword(node, "const") {
            modifiers.insert(Modifier::Const);
        }

        let body = self.required(node, "body")?;
        let mut fields = Vec::new();
        for member in named_children(body) {
            let member_name = match member.kind() {
                node_kinds::ENUM_ASSIGNMENT => self.required(member, "name")?,
                _ => member,
            };
            fields.push(ClassField {
                name: property_name(member_name, self.source)?,
                ty: Some(Type::tvar(name.clone())),
                is_static: true,
            });
        }

        Ok(vec![Stmt::ClassDef(ClassDef {
            name,
            constructor: None,
            fields,
            methods: Vec::new(),
            superclass: None,
            modifiers,
            type_params: Vec::new(),
        })])
    }
}

impl LambdaAllocator for StatementLowerer<'_> {
    /// Hoist a function literal under its own name or the next `$Lambda{n}`
    fn allocate_lambda(&mut self, node: Node<'_>) -> LoweringResult<Expr> {
        let own_name = node
            .child_by_field_name("name")
            .map(|name| identifier_name(name, self.source))
            .transpose()?;

        let name = match own_name {
            Some(name) => name,
            None => {
                let name = format!("{}{}", synthesized::LAMBDA_PREFIX, self.lambda_counter);
                self.lambda_counter += 1;
                name
            }
        };

        let lowered = self.lower_function(node, name.clone(), Modifiers::new())?;
        tracing::debug!(name = %name, line = node_line(node), "hoisted lambda");

        self.hoisted.push(Stmt::FuncDef(lowered.def));
        Ok(Expr::Var(name))
    }
}
