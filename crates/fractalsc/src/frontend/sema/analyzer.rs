//! Fractals semantic analyzer
//!
//! Analysis runs in two passes over the whole tree. Collect opens a scope
//! for every block, function and type definition, declares what each scope
//! directly contains and closes the scope into the node table. Visit then
//! reopens those scopes in the same order and binds names and types.

use super::scope::{FunctionSymbol, Reach, ScopeId, ScopeTable, TypeSymbol, VariableSymbol};
use super::types::{TypeId, TypeRegistry};
use crate::common::{CompileError, CompileResult, Diagnostics, Span};
use crate::frontend::ast::*;
use std::collections::HashMap;

/// Fractals semantic analyzer
pub struct SemanticAnalyzer {
    pub(super) types: TypeRegistry,
    pub(super) scopes: ScopeTable,
    /// Scopes currently open for resolution, innermost last
    pub(super) active: Vec<ScopeId>,
    /// Number of function bodies around the current node
    function_depth: usize,
    /// Resolved declared types of variables, parameters and function
    /// returns, keyed by the declaring node. `None` records a type that
    /// failed to resolve, so it is reported once.
    declared_types: HashMap<NodeId, Option<TypeId>>,
    /// Types of variables declared without an explicit type
    pub(super) variable_types: HashMap<NodeId, TypeId>,
    /// Return types of the enclosing functions
    return_types: Vec<Option<TypeId>>,
    /// Type registered for each `TypeDef`
    type_of_node: HashMap<NodeId, TypeId>,
    pub(super) diagnostics: Diagnostics,
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self {
            types: TypeRegistry::new(),
            scopes: ScopeTable::new(),
            active: Vec::new(),
            function_depth: 0,
            declared_types: HashMap::new(),
            variable_types: HashMap::new(),
            return_types: Vec::new(),
            type_of_node: HashMap::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Analyze a parsed tree, binding names and types in place.
    ///
    /// Problems in the program go to `diagnostics`; an `Err` means an
    /// internal error in the analyzer itself.
    #[tracing::instrument(skip_all, fields(file = %tree.file_path))]
    pub fn analyze(&mut self, tree: &mut SyntaxTree, diagnostics: &mut Diagnostics) -> CompileResult<()> {
        let result = self.run(tree);
        tracing::debug!(
            scopes = self.scopes.len(),
            types = self.types.len(),
            diagnostics = self.diagnostics.len(),
            "analyzed"
        );
        diagnostics.extend(std::mem::take(&mut self.diagnostics));
        result
    }

    fn run(&mut self, tree: &mut SyntaxTree) -> CompileResult<()> {
        self.collect_block(&tree.root)?;
        tracing::debug!(scopes = self.scopes.len(), "collected");
        self.visit_block(&mut tree.root)
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    pub fn scopes(&self) -> &ScopeTable {
        &self.scopes
    }

    pub fn scope_of(&self, node: NodeId) -> Option<ScopeId> {
        self.scopes.scope_of(node)
    }

    // ==================== Helpers ====================

    /// Innermost open scope
    pub(super) fn scope(&self) -> CompileResult<ScopeId> {
        self.active
            .last()
            .copied()
            .ok_or_else(|| CompileError::internal("no scope is open"))
    }

    pub(super) fn semantic(&mut self, message: impl Into<String>, span: Span) {
        self.diagnostics.semantic(message, span);
    }

    fn duplicate(&mut self, what: &str, name: &Span, existing: &Span) {
        let message = format!(
            "The {what} {} is already defined at {existing}.",
            name.text()
        );
        self.semantic(message, name.clone());
    }

    // ==================== Collect ====================

    fn collect_block(&mut self, block: &Block) -> CompileResult<()> {
        let scope = self.scopes.open(self.active.last().copied());
        self.active.push(scope);
        for child in &block.children {
            self.collect_syntax(child)?;
        }
        self.active.pop();
        self.scopes.close(block.id, scope)
    }

    fn collect_syntax(&mut self, syntax: &Syntax) -> CompileResult<()> {
        match syntax {
            Syntax::TypeDef(t) if self.function_depth > 0 => {
                self.semantic("Types cannot be declared inside functions.", t.span.clone());
            }
            Syntax::TypeDef(t) => self.collect_type(t)?,
            Syntax::FunctionDef(f) if self.function_depth > 0 => {
                self.semantic("Functions cannot be declared inside functions.", f.span.clone());
            }
            Syntax::FunctionDef(f) => self.collect_function(f)?,
            Syntax::VarDecl(v) => self.declare_variable(v.id, &v.name, v.declared_type.as_ref())?,
            Syntax::While(w) => self.collect_block(&w.body)?,
            Syntax::If(i) => self.collect_if(i)?,
            Syntax::Return(_)
            | Syntax::Break(_)
            | Syntax::Continue(_)
            | Syntax::Import(_)
            | Syntax::Path(_)
            | Syntax::Expression(_) => {}
        }
        Ok(())
    }

    fn collect_if(&mut self, i: &If) -> CompileResult<()> {
        self.collect_block(&i.body)?;
        match i.else_branch.as_deref() {
            Some(ElseBranch::If(next)) => self.collect_if(next),
            Some(ElseBranch::Else(block)) => self.collect_block(block),
            None => Ok(()),
        }
    }

    fn collect_type(&mut self, t: &TypeDef) -> CompileResult<()> {
        let scope = self.scope()?;
        let ty = self.types.register_user(t.name.text(), t.id);
        self.type_of_node.insert(t.id, ty);

        let symbol = TypeSymbol {
            ty,
            span: t.name.clone(),
        };
        if let Err(existing) = self
            .scopes
            .declare_type(scope, &mangle(t.name.text(), t.arity()), symbol)
        {
            self.duplicate("type", &t.name, &existing);
        }

        let own = self.scopes.open(Some(scope));
        self.active.push(own);
        self.declare_type_params(own, t.type_params.as_deref())?;
        for field in &t.fields {
            self.declare_variable(field.id, &field.name, field.declared_type.as_ref())?;
        }
        for method in &t.methods {
            self.collect_function(method)?;
        }
        self.active.pop();
        self.scopes.close(t.id, own)
    }

    fn collect_function(&mut self, f: &FunctionDef) -> CompileResult<()> {
        let scope = self.scope()?;
        let own = self.scopes.open(Some(scope));

        let symbol = FunctionSymbol {
            id: f.id,
            span: f.name.clone(),
            scope: own,
            params: f
                .parameters
                .iter()
                .map(|p| (p.id, p.ty.clone()))
                .collect(),
            return_type: f.return_type.clone(),
        };
        if let Err(existing) = self
            .scopes
            .declare_function(scope, &mangle(f.name.text(), f.arity()), symbol)
        {
            self.duplicate("function", &f.name, &existing);
        }

        self.active.push(own);
        self.declare_type_params(own, f.type_params.as_deref())?;
        for parameter in &f.parameters {
            self.declare_variable(parameter.id, &parameter.name, Some(&parameter.ty))?;
        }

        self.function_depth += 1;
        let body = self.collect_block(&f.body);
        self.function_depth -= 1;
        body?;

        self.active.pop();
        self.scopes.close(f.id, own)
    }

    fn declare_type_params(&mut self, scope: ScopeId, params: Option<&[Span]>) -> CompileResult<()> {
        for param in params.unwrap_or_default() {
            let ty = self.types.register_generic(param.text());
            let symbol = TypeSymbol {
                ty,
                span: param.clone(),
            };
            if let Err(existing) = self.scopes.declare_type(scope, param.text(), symbol) {
                self.duplicate("type", param, &existing);
            }
        }
        Ok(())
    }

    fn declare_variable(&mut self, id: NodeId, name: &Span, declared: Option<&TypeRef>) -> CompileResult<()> {
        let scope = self.scope()?;
        let symbol = VariableSymbol {
            id,
            span: name.clone(),
            scope,
            declared: declared.cloned(),
        };
        if let Err(existing) = self.scopes.declare_variable(scope, name.text(), symbol) {
            self.duplicate("variable", name, &existing);
        }
        Ok(())
    }

    // ==================== Visit ====================

    fn visit_block(&mut self, block: &mut Block) -> CompileResult<()> {
        let scope = self.scopes.reopen(block.id)?;
        self.active.push(scope);
        for child in &mut block.children {
            self.visit_syntax(child)?;
        }
        self.active.pop();
        Ok(())
    }

    fn visit_syntax(&mut self, syntax: &mut Syntax) -> CompileResult<()> {
        match syntax {
            // Already reported during collection
            Syntax::TypeDef(_) | Syntax::FunctionDef(_) if self.function_depth > 0 => {}
            Syntax::TypeDef(t) => self.visit_type(t)?,
            Syntax::FunctionDef(f) => self.visit_function(f)?,
            Syntax::VarDecl(v) => self.visit_var_decl(v)?,
            Syntax::Return(r) => self.visit_return(r)?,
            Syntax::While(w) => {
                self.visit_expression(&mut w.cond)?;
                self.visit_block(&mut w.body)?;
            }
            Syntax::If(i) => self.visit_if(i)?,
            Syntax::Expression(e) => {
                self.visit_expression(e)?;
            }
            Syntax::Break(_) | Syntax::Continue(_) | Syntax::Import(_) | Syntax::Path(_) => {}
        }
        Ok(())
    }

    fn visit_if(&mut self, i: &mut If) -> CompileResult<()> {
        self.visit_expression(&mut i.cond)?;
        self.visit_block(&mut i.body)?;
        match i.else_branch.as_deref_mut() {
            Some(ElseBranch::If(next)) => self.visit_if(next),
            Some(ElseBranch::Else(block)) => self.visit_block(block),
            None => Ok(()),
        }
    }

    fn visit_type(&mut self, t: &mut TypeDef) -> CompileResult<()> {
        t.binding = self.type_of_node.get(&t.id).copied();

        let scope = self.scopes.reopen(t.id)?;
        self.active.push(scope);
        for field in &mut t.fields {
            self.visit_var_decl(field)?;
        }
        for method in &mut t.methods {
            self.visit_function(method)?;
        }
        self.active.pop();
        Ok(())
    }

    fn visit_function(&mut self, f: &mut FunctionDef) -> CompileResult<()> {
        let scope = self.scopes.reopen(f.id)?;
        self.active.push(scope);

        for parameter in &mut f.parameters {
            self.bind_declared(parameter.id, scope, &mut parameter.ty);
        }
        let return_type = match &mut f.return_type {
            Some(ty) => self.bind_declared(f.id, scope, ty),
            None => Some(TypeId::NOTHING),
        };

        self.return_types.push(return_type);
        self.function_depth += 1;
        let body = self.visit_block(&mut f.body);
        self.function_depth -= 1;
        self.return_types.pop();
        body?;

        self.active.pop();
        Ok(())
    }

    fn visit_var_decl(&mut self, v: &mut VarDecl) -> CompileResult<()> {
        let scope = self.scope()?;
        let declared = match &mut v.declared_type {
            Some(ty) => Some(self.bind_declared(v.id, scope, ty)),
            None => None,
        };
        let init = match &mut v.init {
            Some(init) => self.visit_expression(init)?,
            None => None,
        };

        v.resolved_type = match declared {
            Some(declared) => {
                if let (Some(expected), Some(found), Some(expr)) = (declared, init, &v.init) {
                    if !self.compatible(expected, found) {
                        let message = format!(
                            "Type mismatch in variable declaration: expected {} but found {}.",
                            self.types.name(expected),
                            self.types.name(found)
                        );
                        self.semantic(message, expr.root.span().clone());
                    }
                }
                declared
            }
            None => {
                if let Some(ty) = init {
                    self.variable_types.insert(v.id, ty);
                }
                init
            }
        };
        Ok(())
    }

    fn visit_return(&mut self, r: &mut Return) -> CompileResult<()> {
        let found = match &mut r.expr {
            Some(expr) => self.visit_expression(expr)?,
            None => Some(TypeId::NOTHING),
        };
        let expected = self.return_types.last().copied().flatten();

        if let (Some(expected), Some(found)) = (expected, found) {
            if !self.compatible(expected, found) {
                let message = format!(
                    "Return type mismatch: expected {} but found {}.",
                    self.types.name(expected),
                    self.types.name(found)
                );
                self.semantic(message, r.span.clone());
            }
        }
        Ok(())
    }

    /// Whether a value of type `found` may be stored where `expected` is
    /// declared. Type parameters accept anything.
    pub(super) fn compatible(&self, expected: TypeId, found: TypeId) -> bool {
        expected == found || self.types.is_generic(expected) || self.types.is_generic(found)
    }

    // ==================== Declared types ====================

    /// Resolve and record the declared type of `node`, written in `scope`
    fn bind_declared(&mut self, node: NodeId, scope: ScopeId, ty: &mut TypeRef) -> Option<TypeId> {
        let resolved = self.declared_type(node, scope, ty);
        ty.binding = resolved;
        self.bind_generics(scope, ty);
        resolved
    }

    /// Declared type of a variable, parameter or function return.
    ///
    /// Resolved on first use, from the scope the declaration was written in,
    /// so uses may precede the declaration.
    pub(super) fn declared_type(&mut self, node: NodeId, scope: ScopeId, ty: &TypeRef) -> Option<TypeId> {
        if let Some(cached) = self.declared_types.get(&node) {
            return *cached;
        }
        let resolved = self.resolve_type(scope, ty);
        self.declared_types.insert(node, resolved);
        resolved
    }

    /// Resolve a written type in `scope`, reporting names that are not found
    pub(super) fn resolve_type(&mut self, scope: ScopeId, ty: &TypeRef) -> Option<TypeId> {
        let resolved = self.lookup_type(scope, ty);
        if resolved.is_none() {
            let message = format!("Cannot find type {}.", ty.name.text());
            self.semantic(message, ty.name.clone());
        }
        for generic in &ty.generics {
            self.resolve_type(scope, generic);
        }
        resolved
    }

    fn lookup_type(&mut self, scope: ScopeId, ty: &TypeRef) -> Option<TypeId> {
        let base = if ty.builtin {
            TypeRegistry::builtin(ty.name.text())
        } else {
            self.scopes
                .find_type(scope, &ty.mangled_name(), Reach::Parents)
                .map(|symbol| symbol.ty)
        };
        let base = base?;
        Some(if ty.array { self.types.array_of(base) } else { base })
    }

    /// Fill in the bindings of generic arguments, already reported by
    /// [`Self::resolve_type`]
    pub(super) fn bind_generics(&mut self, scope: ScopeId, ty: &mut TypeRef) {
        for generic in &mut ty.generics {
            generic.binding = self.lookup_type(scope, generic);
            self.bind_generics(scope, generic);
        }
    }
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::lexer::Lexer;
    use crate::frontend::parser::Parser;
    use pretty_assertions::assert_eq;

    fn parse(source: &str, diagnostics: &mut Diagnostics) -> SyntaxTree {
        let tokens = Lexer::new(source, "test.fr").tokenize(diagnostics);
        Parser::new(tokens).parse(diagnostics)
    }

    fn analyze(source: &str) -> (SyntaxTree, SemanticAnalyzer, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let mut tree = parse(source, &mut diagnostics);
        assert_eq!(diagnostics.messages(), Vec::<&str>::new());

        let mut analyzer = SemanticAnalyzer::new();
        analyzer.analyze(&mut tree, &mut diagnostics).unwrap();
        (tree, analyzer, diagnostics)
    }

    fn errors(source: &str) -> Vec<String> {
        let (_, _, diagnostics) = analyze(source);
        diagnostics.iter().map(|d| d.message.clone()).collect()
    }

    fn var_decl(tree: &SyntaxTree, index: usize) -> &VarDecl {
        match &tree.root.children[index] {
            Syntax::VarDecl(v) => v,
            other => panic!("expected a variable declaration, got {other:?}"),
        }
    }

    fn first_link(expr: &Expression) -> &Link {
        match &expr.root {
            Expr::Chain(chain) => &chain.links[0],
            other => panic!("expected an accessor chain, got {other:?}"),
        }
    }

    /// Every block, function and type definition in the tree
    fn scope_owners(block: &Block, owners: &mut Vec<NodeId>) {
        owners.push(block.id);
        for child in &block.children {
            match child {
                Syntax::TypeDef(t) => {
                    owners.push(t.id);
                    for method in &t.methods {
                        owners.push(method.id);
                        scope_owners(&method.body, owners);
                    }
                }
                Syntax::FunctionDef(f) => {
                    owners.push(f.id);
                    scope_owners(&f.body, owners);
                }
                Syntax::While(w) => scope_owners(&w.body, owners),
                Syntax::If(i) => if_owners(i, owners),
                _ => {}
            }
        }
    }

    fn if_owners(i: &If, owners: &mut Vec<NodeId>) {
        scope_owners(&i.body, owners);
        match i.else_branch.as_deref() {
            Some(ElseBranch::If(next)) => if_owners(next, owners),
            Some(ElseBranch::Else(block)) => scope_owners(block, owners),
            None => {}
        }
    }

    #[test]
    fn test_empty_program() {
        let (tree, analyzer, diagnostics) = analyze("");
        assert!(diagnostics.is_empty());
        assert!(analyzer.scope_of(tree.root.id).is_some());
        assert_eq!(analyzer.scopes().closed_count(), 1);
    }

    #[test]
    fn test_every_scope_owner_is_closed() {
        let source = "type Point {\n  x: int\n  function get(): int {\n    return x\n  }\n}\nfunction f(a: int) {\n  while true {\n    if a == 1 {\n    } else if a == 2 {\n    } else {\n    }\n  }\n}\n";
        let (tree, analyzer, diagnostics) = analyze(source);
        assert_eq!(diagnostics.messages(), Vec::<&str>::new());

        let mut owners = Vec::new();
        scope_owners(&tree.root, &mut owners);
        for owner in &owners {
            assert!(analyzer.scope_of(*owner).is_some(), "{owner:?} has no scope");
        }
        assert_eq!(analyzer.scopes().closed_count(), owners.len());
    }

    #[test]
    fn test_duplicate_type() {
        assert_eq!(
            errors("type Foo {\n  x: int\n}\ntype Foo {\n  y: int\n}\n"),
            vec!["The type Foo is already defined at test.fr:(1,6)."]
        );
    }

    #[test]
    fn test_duplicate_type_keeps_first_binding() {
        let source = "type Foo {\n  x: int\n}\ntype Foo {\n  y: int\n}\nf: Foo\nf.x -> 1\nf.y -> 2\n";
        let (tree, _, diagnostics) = analyze(source);
        assert_eq!(
            diagnostics.messages(),
            vec![
                "The type Foo is already defined at test.fr:(1,6).",
                "Missing variable y on type Foo.",
            ]
        );

        let Syntax::TypeDef(first) = &tree.root.children[0] else {
            panic!("expected a type definition");
        };
        assert_eq!(var_decl(&tree, 2).resolved_type, first.binding);
    }

    #[test]
    fn test_duplicate_variable_and_function() {
        assert_eq!(
            errors("x: int\nx: str\nfunction f() {\n}\nfunction f() {\n}\n"),
            vec![
                "The variable x is already defined at test.fr:(1,1).",
                "The function f is already defined at test.fr:(3,10).",
            ]
        );
    }

    #[test]
    fn test_undeclared_variable() {
        assert_eq!(errors("x -> 1\n"), vec!["Missing variable x."]);
    }

    #[test]
    fn test_unresolved_link_stops_the_chain() {
        assert_eq!(errors("a.b.c -> 1\n"), vec!["Missing variable a."]);
    }

    #[test]
    fn test_chain_through_call_result() {
        let source = "type Point {\n  x: int\n}\nfunction make(): Point {\n  return new Point()\n}\ny: -> make().x\n";
        let (tree, analyzer, diagnostics) = analyze(source);
        assert_eq!(diagnostics.messages(), Vec::<&str>::new());

        let y = var_decl(&tree, 2);
        assert_eq!(y.resolved_type, Some(TypeId::INT));
        let Syntax::TypeDef(point) = &tree.root.children[0] else {
            panic!("expected a type definition");
        };
        assert_eq!(point.binding.map(|ty| analyzer.types().name(ty)), Some("Point"));
    }

    #[test]
    fn test_binary_mismatch_keeps_left_type() {
        let (tree, _, diagnostics) = analyze("x: -> 1 == \"a\"\n");
        assert_eq!(diagnostics.messages(), vec!["Type mismatch in expression: int <-> str."]);
        assert_eq!(var_decl(&tree, 0).resolved_type, Some(TypeId::INT));
    }

    #[test]
    fn test_analysis_continues_after_mismatch() {
        assert_eq!(
            errors("x: -> 1 == \"a\"\ny: str -> 5\n"),
            vec![
                "Type mismatch in expression: int <-> str.",
                "Type mismatch in variable declaration: expected str but found int.",
            ]
        );
    }

    #[test]
    fn test_operator_result_types() {
        let (tree, _, diagnostics) = analyze("a: -> 1 + 2\nb: -> 1 < 2\nc: -> true and false\nd: -> -1.5\n");
        assert!(diagnostics.is_empty());
        assert_eq!(var_decl(&tree, 0).resolved_type, Some(TypeId::INT));
        assert_eq!(var_decl(&tree, 1).resolved_type, Some(TypeId::BOOL));
        assert_eq!(var_decl(&tree, 2).resolved_type, Some(TypeId::BOOL));
        assert_eq!(var_decl(&tree, 3).resolved_type, Some(TypeId::DECIMAL));
    }

    #[test]
    fn test_generic_arity_selects_overload() {
        let source = "function id(value: int): int {\n  return value\n}\nfunction id<T>(value: T): T {\n  return value\n}\na: -> id(1)\nb: -> id<int>(2)\n";
        let (tree, _, diagnostics) = analyze(source);
        assert_eq!(diagnostics.messages(), Vec::<&str>::new());

        let (Syntax::FunctionDef(plain), Syntax::FunctionDef(generic)) =
            (&tree.root.children[0], &tree.root.children[1])
        else {
            panic!("expected two functions");
        };
        let a = var_decl(&tree, 2).init.as_ref().unwrap();
        let b = var_decl(&tree, 3).init.as_ref().unwrap();

        assert_eq!(first_link(a).identifier().binding, Some(Binding::Function(plain.id)));
        assert_eq!(first_link(b).identifier().binding, Some(Binding::Function(generic.id)));
        assert_eq!(var_decl(&tree, 2).resolved_type, Some(TypeId::INT));
    }

    #[test]
    fn test_use_before_declaration() {
        let (tree, _, diagnostics) = analyze("a: -> later()\nfunction later(): str {\n  return \"s\"\n}\n");
        assert!(diagnostics.is_empty());
        assert_eq!(var_decl(&tree, 0).resolved_type, Some(TypeId::STR));
    }

    #[test]
    fn test_members_resolve_in_the_type_scope() {
        let source = "type Point {\n  x: int\n}\np: Point -> new Point()\np.z -> 1\np.move()\nq: int -> 1\nq.x -> 2\n";
        assert_eq!(
            errors(source),
            vec![
                "Missing variable z on type Point.",
                "Missing function move on type Point.",
                "Missing variable x on type int.",
            ]
        );
    }

    #[test]
    fn test_unknown_types() {
        assert_eq!(
            errors("p: Shape\nq: -> new Shape()\n"),
            vec!["Cannot find type Shape.", "Cannot find type Shape."]
        );
    }

    #[test]
    fn test_variable_declaration_mismatch() {
        let (tree, _, diagnostics) = analyze("x: int -> \"s\"\n");
        assert_eq!(
            diagnostics.messages(),
            vec!["Type mismatch in variable declaration: expected int but found str."]
        );
        assert_eq!(var_decl(&tree, 0).resolved_type, Some(TypeId::INT));
    }

    #[test]
    fn test_arrays() {
        let (tree, analyzer, diagnostics) =
            analyze("list: int[] -> new int[3]\nfirst: -> list[0]\nwrapped: -> new [first]\n");
        assert!(diagnostics.is_empty());
        let list = var_decl(&tree, 0).resolved_type.unwrap();
        assert_eq!(analyzer.types().name(list), "int[]");
        assert_eq!(var_decl(&tree, 1).resolved_type, Some(TypeId::INT));
        assert_eq!(var_decl(&tree, 2).resolved_type, Some(list));
    }

    #[test]
    fn test_index_and_argument_checks() {
        let source = "function f(a: int) {\n}\nlist: int[] -> new int[3]\nlist[\"a\"] -> 1\nf(\"s\")\nf()\n";
        assert_eq!(
            errors(source),
            vec![
                "Index must be int but found str.",
                "Argument 1 of f expects int but found str.",
                "Function f expects 1 argument(s) but got 0.",
            ]
        );
    }

    #[test]
    fn test_spaced_generic_call_resolves_as_call() {
        assert_eq!(
            errors("z: -> x < y > (3)\n"),
            vec!["Cannot find type y.", "Missing function x."]
        );
    }

    #[test]
    fn test_conditions_are_not_restricted_to_bool() {
        let source = "count: int -> 3\nwhile count {\n}\nif 1 == \"a\" {\n}\n";
        assert_eq!(errors(source), vec!["Type mismatch in expression: int <-> str."]);
    }

    #[test]
    fn test_return_mismatch() {
        let source = "function f(): int {\n  return \"s\"\n}\nfunction g() {\n  return 1\n}\n";
        assert_eq!(
            errors(source),
            vec![
                "Return type mismatch: expected int but found str.",
                "Return type mismatch: expected nothing but found int.",
            ]
        );
    }

    #[test]
    fn test_assign_to_call_result() {
        let source = "function f(): int {\n  return 1\n}\nf() -> 2\n";
        assert_eq!(errors(source), vec!["Cannot assign to the result of a function call."]);
    }

    #[test]
    fn test_nested_definitions() {
        let source = "function f() {\n  function g() {\n  }\n  type T {\n    x: int\n  }\n}\n";
        assert_eq!(
            errors(source),
            vec![
                "Functions cannot be declared inside functions.",
                "Types cannot be declared inside functions.",
            ]
        );
    }

    #[test]
    fn test_methods_see_fields_and_parameters() {
        let source = "type Counter {\n  count: int -> 0\n  function add(step: int): int {\n    count -> count + step\n    return count\n  }\n}\nc: -> new Counter()\nn: int -> c.add(1)\n";
        assert_eq!(errors(source), Vec::<String>::new());
    }

    #[test]
    fn test_malformed_input_never_fails_internally() {
        let sources = [
            "function f( {\n",
            "type {\n",
            "x -> new\n",
            "a.b(.c\n",
            "if {\n} else {\n",
            "}}}\n",
            "function f() {\n  function g() {\n    x -> 1\n  }\n}\n",
            "type A<T, T> {\n  f: T\n}\n",
            "while x[ {\n",
        ];
        for source in sources {
            let mut diagnostics = Diagnostics::new();
            let mut tree = parse(source, &mut diagnostics);
            let result = SemanticAnalyzer::new().analyze(&mut tree, &mut diagnostics);
            assert!(result.is_ok(), "{source:?}: {result:?}");
        }
    }
}
