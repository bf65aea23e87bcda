//! Expression typing and accessor chain resolution

use super::analyzer::SemanticAnalyzer;
use super::scope::{FunctionSymbol, Reach};
use super::types::{TypeId, TypeRegistry};
use crate::common::{CompileResult, Span};
use crate::frontend::ast::*;

impl SemanticAnalyzer {
    /// Type an expression, recording the result on it
    pub(super) fn visit_expression(&mut self, expression: &mut Expression) -> CompileResult<Option<TypeId>> {
        let ty = self.visit_expr(&mut expression.root)?;
        expression.resolved_type = ty;
        Ok(ty)
    }

    fn visit_expr(&mut self, expr: &mut Expr) -> CompileResult<Option<TypeId>> {
        let ty = match expr {
            Expr::Binary(binary) => self.visit_binary(binary)?,
            Expr::Unary(unary) => {
                let ty = self.visit_expr(&mut unary.operand)?;
                unary.resolved_type = ty;
                ty
            }
            Expr::Chain(chain) => self.visit_chain(chain)?,
            Expr::Integer(literal) => literal_type(literal, TypeId::INT),
            Expr::Decimal(literal) => literal_type(literal, TypeId::DECIMAL),
            Expr::Boolean(literal) => literal_type(literal, TypeId::BOOL),
            Expr::StringLiteral(literal) => literal_type(literal, TypeId::STR),
            Expr::New(new) => self.visit_new(new)?,
            Expr::ArrayInitializer(init) => self
                .visit_expression(&mut init.expr)?
                .map(|element| self.types.array_of(element)),
            Expr::Nothing(_) => Some(TypeId::NOTHING),
            Expr::Missing(_) => None,
        };
        Ok(ty)
    }

    fn visit_binary(&mut self, binary: &mut BinaryOp) -> CompileResult<Option<TypeId>> {
        let left = if binary.kind == BinaryKind::Assign {
            self.visit_assign_target(&mut binary.left)?
        } else {
            self.visit_expr(&mut binary.left)?
        };
        let right = self.visit_expr(&mut binary.right)?;

        let ty = match (left, right) {
            (Some(l), Some(r)) if l != r => {
                let message = format!(
                    "Type mismatch in expression: {} <-> {}.",
                    self.types.name(l),
                    self.types.name(r)
                );
                self.semantic(message, binary.op_span.clone());
                Some(l)
            }
            _ if binary.kind.is_boolean() => Some(TypeId::BOOL),
            (Some(l), Some(_)) => Some(l),
            _ => None,
        };
        binary.resolved_type = ty;
        Ok(ty)
    }

    fn visit_assign_target(&mut self, target: &mut Expr) -> CompileResult<Option<TypeId>> {
        match target {
            Expr::Chain(chain) => {
                let ty = self.visit_chain(chain)?;
                if let Some(last) = chain.last().filter(|link| link.is_call()) {
                    let span = chain.span.combine(last.end())?;
                    self.semantic("Cannot assign to the result of a function call.", span);
                }
                Ok(ty)
            }
            other => self.visit_expr(other),
        }
    }

    // ==================== Accessor chains ====================

    fn visit_chain(&mut self, chain: &mut AccessorChain) -> CompileResult<Option<TypeId>> {
        let ty = self.walk_links(&mut chain.links, None)?;
        chain.resolved_type = ty;
        Ok(ty)
    }

    /// Resolve links left to right. `owner` is the type the first link is a
    /// member of, or `None` to start from the current scope.
    fn walk_links(&mut self, links: &mut [Link], owner: Option<TypeId>) -> CompileResult<Option<TypeId>> {
        let mut ty = owner;
        for link in links {
            ty = self.visit_link(link, ty)?;
            if ty.is_none() {
                // Already reported; later links are not looked at
                return Ok(None);
            }
        }
        Ok(ty)
    }

    fn visit_link(&mut self, link: &mut Link, owner: Option<TypeId>) -> CompileResult<Option<TypeId>> {
        match link {
            Link::Identifier(identifier) => self.resolve_variable(identifier, owner),
            Link::Indexor {
                identifier, index, ..
            } => {
                self.visit_index(index)?;
                let ty = self.resolve_variable(identifier, owner)?;
                Ok(ty.map(|ty| self.types.element(ty).unwrap_or(ty)))
            }
            Link::FunctionCall {
                identifier,
                type_args,
                args,
                ..
            } => {
                let mut arguments = Vec::with_capacity(args.len());
                for arg in args.iter_mut() {
                    let ty = self.visit_expression(arg)?;
                    arguments.push((ty, arg.root.span().clone()));
                }
                let arity = self.bind_type_args(type_args.as_deref_mut())?;
                self.resolve_call(identifier, arity, owner, &arguments)
            }
        }
    }

    fn visit_index(&mut self, index: &mut Expression) -> CompileResult<()> {
        if let Some(ty) = self.visit_expression(index)? {
            if ty != TypeId::INT && !self.types.is_generic(ty) {
                let message = format!("Index must be int but found {}.", self.types.name(ty));
                self.semantic(message, index.root.span().clone());
            }
        }
        Ok(())
    }

    /// Resolve explicit generic arguments in the current scope and return
    /// how many there are
    fn bind_type_args(&mut self, type_args: Option<&mut [TypeRef]>) -> CompileResult<usize> {
        let Some(type_args) = type_args else {
            return Ok(0);
        };
        let scope = self.scope()?;
        for ty in type_args.iter_mut() {
            ty.binding = self.resolve_type(scope, ty);
            self.bind_generics(scope, ty);
        }
        Ok(type_args.len())
    }

    /// Run `lookup` where members of `owner` live: the current scope and its
    /// parents when there is no owner, the owner's own scope otherwise.
    /// Only user types have members.
    fn find_member<T>(
        &mut self,
        owner: Option<TypeId>,
        lookup: impl FnOnce(&Self, Reach) -> CompileResult<Option<T>>,
    ) -> CompileResult<Option<T>> {
        let Some(owner) = owner else {
            return lookup(self, Reach::Parents);
        };
        let Some(node) = self.types.user_node(owner) else {
            return Ok(None);
        };
        let scope = self.scopes.reopen(node)?;
        self.active.push(scope);
        let found = lookup(self, Reach::Local);
        self.active.pop();
        found
    }

    fn missing(&mut self, what: &str, identifier: &Identifier, owner: Option<TypeId>) {
        let message = match owner {
            Some(owner) => format!(
                "Missing {what} {} on type {}.",
                identifier.name(),
                self.types.name(owner)
            ),
            None => format!("Missing {what} {}.", identifier.name()),
        };
        self.semantic(message, identifier.span.clone());
    }

    fn resolve_variable(&mut self, identifier: &mut Identifier, owner: Option<TypeId>) -> CompileResult<Option<TypeId>> {
        let name = identifier.name().to_string();
        let found = self.find_member(owner, |this, reach| {
            let scope = this.scope()?;
            Ok(this
                .scopes
                .find_variable(scope, &name, reach)
                .map(|v| (v.id, v.scope, v.declared.clone())))
        })?;

        let Some((id, scope, declared)) = found else {
            self.missing("variable", identifier, owner);
            return Ok(None);
        };
        identifier.binding = Some(Binding::Variable(id));

        Ok(match declared {
            Some(ty) => self.declared_type(id, scope, &ty),
            None => self.variable_types.get(&id).copied(),
        })
    }

    fn resolve_call(
        &mut self,
        identifier: &mut Identifier,
        arity: usize,
        owner: Option<TypeId>,
        arguments: &[(Option<TypeId>, Span)],
    ) -> CompileResult<Option<TypeId>> {
        let name = mangle(identifier.name(), arity);
        let found = self.find_member(owner, |this, reach| {
            let scope = this.scope()?;
            Ok(this.scopes.find_function(scope, &name, reach).cloned())
        })?;

        let Some(function) = found else {
            self.missing("function", identifier, owner);
            return Ok(None);
        };
        identifier.binding = Some(Binding::Function(function.id));

        self.check_arguments(identifier, &function, arguments);

        Ok(match &function.return_type {
            Some(ty) => self.declared_type(function.id, function.scope, ty),
            None => Some(TypeId::NOTHING),
        })
    }

    fn check_arguments(
        &mut self,
        identifier: &Identifier,
        function: &FunctionSymbol,
        arguments: &[(Option<TypeId>, Span)],
    ) {
        if arguments.len() != function.params.len() {
            let message = format!(
                "Function {} expects {} argument(s) but got {}.",
                identifier.name(),
                function.params.len(),
                arguments.len()
            );
            self.semantic(message, identifier.span.clone());
        }

        for (position, ((param, ty), (found, span))) in function.params.iter().zip(arguments).enumerate() {
            let expected = self.declared_type(*param, function.scope, ty);
            let (Some(expected), Some(found)) = (expected, *found) else {
                continue;
            };
            if !self.compatible(expected, found) {
                let message = format!(
                    "Argument {} of {} expects {} but found {}.",
                    position + 1,
                    identifier.name(),
                    self.types.name(expected),
                    self.types.name(found)
                );
                self.semantic(message, span.clone());
            }
        }
    }

    // ==================== Construction ====================

    fn visit_new(&mut self, new: &mut New) -> CompileResult<Option<TypeId>> {
        let Some((first, rest)) = new.chain.links.split_first_mut() else {
            return Ok(None);
        };
        let ty = match self.visit_constructed(first)? {
            Some(ty) => self.walk_links(rest, Some(ty))?,
            None => None,
        };
        new.chain.resolved_type = ty;
        Ok(ty)
    }

    /// The type built by the first link of a `new` chain
    fn visit_constructed(&mut self, link: &mut Link) -> CompileResult<Option<TypeId>> {
        match link {
            Link::FunctionCall {
                identifier,
                type_args,
                args,
                ..
            } => {
                for arg in args.iter_mut() {
                    self.visit_expression(arg)?;
                }
                let arity = self.bind_type_args(type_args.as_deref_mut())?;
                self.resolve_constructed(identifier, arity)
            }
            Link::Indexor {
                identifier, index, ..
            } => {
                self.visit_index(index)?;
                let element = self.resolve_constructed(identifier, 0)?;
                Ok(element.map(|element| self.types.array_of(element)))
            }
            // Rejected by the parser
            Link::Identifier(_) => Ok(None),
        }
    }

    fn resolve_constructed(&mut self, identifier: &mut Identifier, arity: usize) -> CompileResult<Option<TypeId>> {
        let scope = self.scope()?;
        let builtin = TypeRegistry::builtin(identifier.name()).filter(|_| arity == 0);
        let ty = builtin.or_else(|| {
            self.scopes
                .find_type(scope, &mangle(identifier.name(), arity), Reach::Parents)
                .map(|symbol| symbol.ty)
        });

        match ty {
            Some(ty) => identifier.binding = Some(Binding::Type(ty)),
            None => {
                let message = format!("Cannot find type {}.", identifier.name());
                self.semantic(message, identifier.span.clone());
            }
        }
        Ok(ty)
    }
}

fn literal_type(literal: &mut Literal, ty: TypeId) -> Option<TypeId> {
    literal.resolved_type = Some(ty);
    Some(ty)
}
