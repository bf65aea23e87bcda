//! Fractals recursive descent parser
//!
//! Every `parse_*` routine starts on the first token of its construct and
//! returns positioned on the construct's last token; the caller moves past
//! it. Problems are reported to the diagnostic sink and parsing carries on
//! as if the expected token had been there.

use crate::common::{Diagnostics, Span};
use crate::frontend::ast::*;
use crate::frontend::lexer::{Token, TokenKind};
use std::sync::Arc;

/// Which trivia tokens a cursor move stops on. Comments are always skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sensitivity {
    pub whitespace: bool,
    pub new_lines: bool,
}

impl Sensitivity {
    pub const NONE: Self = Self {
        whitespace: false,
        new_lines: false,
    };
    pub const NEW_LINES: Self = Self {
        whitespace: false,
        new_lines: true,
    };
    pub const ALL: Self = Self {
        whitespace: true,
        new_lines: true,
    };

    fn skips(self, kind: TokenKind) -> bool {
        match kind {
            TokenKind::Comment => true,
            TokenKind::Whitespace => !self.whitespace,
            TokenKind::EndOfLine => !self.new_lines,
            _ => false,
        }
    }
}

/// Fractals parser
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    next_id: u32,
    file_path: Arc<str>,
    diagnostics: Diagnostics,
}

impl Parser {
    /// Create a parser over a token stream.
    ///
    /// The stream is expected to end with `EndOfFile`; one is appended if it
    /// does not.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().is_none_or(|t| t.kind != TokenKind::EndOfFile) {
            let span = match tokens.last() {
                Some(last) => Span::new(
                    None,
                    Arc::clone(&last.span.file_path),
                    last.span.end(),
                    0,
                    last.span.line,
                    last.span.column + last.span.len,
                ),
                None => Span::new(None, Arc::from(""), 0, 0, 1, 1),
            };
            tokens.push(Token::new(TokenKind::EndOfFile, span));
        }

        let file_path = Arc::clone(&tokens[0].span.file_path);
        let mut parser = Self {
            tokens,
            position: 0,
            next_id: 0,
            file_path,
            diagnostics: Diagnostics::new(),
        };
        parser.skip(Sensitivity::NONE);
        parser
    }

    /// Parse the whole token stream into a tree rooted at a top-level block
    #[tracing::instrument(skip_all, fields(file = %self.file_path, tokens = self.tokens.len()))]
    pub fn parse(mut self, diagnostics: &mut Diagnostics) -> SyntaxTree {
        let id = self.node_id();
        let span = self.span();
        let children = self.parse_statements(BlockKind::TopLevel);
        let root = Block {
            id,
            kind: BlockKind::TopLevel,
            children,
            span,
        };

        tracing::debug!(
            statements = root.children.len(),
            diagnostics = self.diagnostics.len(),
            "parsed"
        );
        diagnostics.extend(self.diagnostics);
        SyntaxTree::new(self.file_path, root)
    }

    // ==================== Cursor ====================

    fn token(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(super) fn kind(&self) -> TokenKind {
        self.token().kind
    }

    pub(super) fn at(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    pub(super) fn span(&self) -> Span {
        self.token().span.clone()
    }

    /// Advance one token, then skip trivia. Returns `false` when already on
    /// the last token.
    pub(super) fn move_next(&mut self) -> bool {
        self.move_next_with(Sensitivity::NONE)
    }

    pub(super) fn move_next_with(&mut self, sensitivity: Sensitivity) -> bool {
        if self.position + 1 >= self.tokens.len() {
            return false;
        }
        self.position += 1;
        self.skip(sensitivity);
        true
    }

    fn skip(&mut self, sensitivity: Sensitivity) {
        while self.position + 1 < self.tokens.len() && sensitivity.skips(self.kind()) {
            self.position += 1;
        }
    }

    fn peek_index(&self, sensitivity: Sensitivity) -> Option<usize> {
        (self.position + 1..self.tokens.len()).find(|&i| !sensitivity.skips(self.tokens[i].kind))
    }

    /// Kind of the next token past whitespace, line ends and comments
    pub(super) fn peek(&self) -> TokenKind {
        self.peek_with(Sensitivity::NONE)
    }

    pub(super) fn peek_with(&self, sensitivity: Sensitivity) -> TokenKind {
        self.peek_index(sensitivity)
            .map_or(TokenKind::EndOfFile, |i| self.tokens[i].kind)
    }

    pub(super) fn peek_span(&self) -> Span {
        self.peek_index(Sensitivity::NONE)
            .map_or_else(|| self.span(), |i| self.tokens[i].span.clone())
    }

    /// Significant token kinds after the current one
    pub(super) fn lookahead(&self) -> impl Iterator<Item = TokenKind> + '_ {
        self.tokens[self.position + 1..]
            .iter()
            .map(|t| t.kind)
            .filter(|k| !k.is_trivia())
    }

    pub(super) fn node_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    // ==================== Diagnostics ====================

    pub(super) fn error(&mut self, message: impl Into<String>) {
        let span = self.span();
        self.diagnostics.syntax(message, span);
    }

    pub(super) fn error_at(&mut self, message: impl Into<String>, span: Span) {
        self.diagnostics.syntax(message, span);
    }

    /// Report `message` unless the current token is `kind`
    pub(super) fn expect(&mut self, kind: TokenKind, message: &str) -> bool {
        if self.at(kind) {
            true
        } else {
            self.error(message);
            false
        }
    }

    // ==================== Blocks ====================

    fn is_end_of_statement(kind: TokenKind) -> bool {
        matches!(
            kind,
            TokenKind::EndOfLine | TokenKind::EndOfFile | TokenKind::RBrace
        )
    }

    fn parse_statements(&mut self, kind: BlockKind) -> Vec<Syntax> {
        let mut children = Vec::new();
        loop {
            match self.kind() {
                TokenKind::EndOfFile => break,
                TokenKind::RBrace if kind == BlockKind::Block => break,
                _ => {}
            }

            if let Some(statement) = self.parse_statement() {
                children.push(statement);
                self.finish_statement();
            } else if !self.move_next() {
                break;
            }
        }
        children
    }

    /// Step off a statement's last token onto the start of the next one
    fn finish_statement(&mut self) {
        self.move_next_with(Sensitivity::NEW_LINES);
        match self.kind() {
            TokenKind::EndOfLine => {
                self.move_next();
            }
            TokenKind::EndOfFile | TokenKind::RBrace => {}
            _ => self.error("Statements must end with a new line."),
        }
    }

    /// Parse `{ statements }`, reporting `missing_open` when the `{` is absent
    pub(super) fn parse_block(&mut self, missing_open: &str) -> Block {
        let id = self.node_id();
        let span = self.span();
        self.expect(TokenKind::LBrace, missing_open);
        self.move_next();

        let children = self.parse_statements(BlockKind::Block);
        self.expect(TokenKind::RBrace, "Block must end with }.");

        Block {
            id,
            kind: BlockKind::Block,
            children,
            span,
        }
    }

    // ==================== Statements ====================

    fn parse_statement(&mut self) -> Option<Syntax> {
        match self.kind() {
            TokenKind::Type => Some(Syntax::TypeDef(self.parse_type_def())),
            TokenKind::Function => Some(Syntax::FunctionDef(self.parse_function_def())),
            TokenKind::Return => Some(self.parse_return()),
            TokenKind::Break => Some(Syntax::Break(self.span())),
            TokenKind::Continue => Some(Syntax::Continue(self.span())),
            TokenKind::While => Some(Syntax::While(self.parse_while())),
            TokenKind::If => Some(Syntax::If(self.parse_if())),
            TokenKind::Import => self.parse_import(),
            TokenKind::Path => self.parse_path(),
            TokenKind::Identifier => self.parse_identifier_statement(),
            TokenKind::BuiltInType => {
                self.error("Type should not be here.");
                None
            }
            _ => {
                self.error("Invalid statement.");
                None
            }
        }
    }

    /// Statements led by an identifier: declarations, assignments and calls
    fn parse_identifier_statement(&mut self) -> Option<Syntax> {
        let chain = self.parse_accessor_chain()?;

        match self.peek() {
            TokenKind::Colon => {
                self.move_next();
                if !chain.is_single_identifier() {
                    self.error("Expected the name of a variable.");
                    return None;
                }
                Some(Syntax::VarDecl(self.parse_var_decl(chain.span)))
            }
            TokenKind::Assign => {
                self.move_next();
                let op_span = self.span();
                self.move_next();
                let value = self.parse_expression();
                let assign = BinaryOp {
                    kind: BinaryKind::Assign,
                    left: Expr::Chain(chain),
                    right: value.root,
                    op_span,
                    resolved_type: None,
                };
                Some(Syntax::Expression(Expression::new(Expr::Binary(Box::new(
                    assign,
                )))))
            }
            _ if chain.last().is_some_and(Link::is_call) => {
                Some(Syntax::Expression(Expression::new(Expr::Chain(chain))))
            }
            _ => {
                self.error("A solitary accessor chain is not allowed.");
                None
            }
        }
    }

    /// Parse the rest of a variable declaration, starting on its `:`
    fn parse_var_decl(&mut self, name: Span) -> VarDecl {
        let id = self.node_id();

        let declared_type = if self.peek_with(Sensitivity::NEW_LINES).is_type_name() {
            self.move_next();
            Some(self.parse_type())
        } else {
            None
        };

        let init = if self.peek_with(Sensitivity::NEW_LINES) == TokenKind::Assign {
            self.move_next();
            self.move_next();
            Some(self.parse_expression())
        } else {
            if declared_type.is_none() {
                self.error("Auto variables require an assignment.");
            }
            None
        };

        VarDecl {
            id,
            name,
            declared_type,
            init,
            resolved_type: None,
        }
    }

    fn parse_return(&mut self) -> Syntax {
        let span = self.span();
        let expr = if Self::is_end_of_statement(self.peek_with(Sensitivity::NEW_LINES)) {
            None
        } else {
            self.move_next();
            Some(self.parse_expression())
        };
        Syntax::Return(Return { expr, span })
    }

    fn parse_while(&mut self) -> While {
        let span = self.span();
        self.move_next();
        let cond = self.parse_expression();
        self.move_next();
        let body = self.parse_block("While statement does not have a body because it is missing {.");
        While { cond, body, span }
    }

    fn parse_if(&mut self) -> If {
        let span = self.span();
        self.move_next();
        let cond = self.parse_expression();
        self.move_next();
        let body = self.parse_block("If statement does not have a body because it is missing {.");

        let mut else_branch = None;
        if self.peek() == TokenKind::Else {
            self.move_next();
            self.move_next();
            match self.kind() {
                TokenKind::If => else_branch = Some(Box::new(ElseBranch::If(self.parse_if()))),
                TokenKind::LBrace => {
                    let block = self.parse_block("Invalid if conditional branch.");
                    else_branch = Some(Box::new(ElseBranch::Else(block)));
                }
                _ => self.error("Invalid if conditional branch."),
            }
        }

        If {
            cond,
            body,
            else_branch,
            span,
        }
    }

    fn parse_import(&mut self) -> Option<Syntax> {
        let span = self.span();
        let chain = self.parse_declared_chain("Import could not be found.")?;
        if !chain.links.iter().all(|l| matches!(l, Link::Identifier(_))) {
            self.error("Invalid import.");
        }
        Some(Syntax::Import(Import { chain, span }))
    }

    fn parse_path(&mut self) -> Option<Syntax> {
        let span = self.span();
        let chain = self.parse_declared_chain("Path could not be found.")?;
        if !chain.links.iter().all(|l| matches!(l, Link::Identifier(_))) {
            self.error("Invalid path.");
        }
        Some(Syntax::Path(PathDecl { chain, span }))
    }

    /// Chain after an `import` or `path` keyword, on the same line
    fn parse_declared_chain(&mut self, missing: &str) -> Option<AccessorChain> {
        if Self::is_end_of_statement(self.peek_with(Sensitivity::NEW_LINES)) {
            self.error(missing);
            return None;
        }
        self.move_next();
        let chain = self.parse_accessor_chain();
        if chain.is_none() {
            self.error(missing);
        }
        chain
    }

    // ==================== Definitions ====================

    pub(super) fn parse_function_def(&mut self) -> FunctionDef {
        let span = self.span();
        let id = self.node_id();
        self.move_next();

        self.expect(TokenKind::Identifier, "Function is missing a name.");
        let name = self.span();
        self.move_next();

        let type_params = if self.at(TokenKind::Lt) {
            let params = self.parse_type_params();
            self.move_next();
            Some(params)
        } else {
            None
        };

        self.expect(TokenKind::LParen, "Function is missing (.");
        self.move_next();

        let mut parameters = Vec::new();
        if !self.at(TokenKind::RParen) {
            loop {
                self.expect(TokenKind::Identifier, "Expected a parameter name.");
                let name = self.span();
                self.move_next();

                self.expect(
                    TokenKind::Colon,
                    "Expected a colon between the parameter name and its type.",
                );
                self.move_next();

                let ty = self.parse_type();
                let id = self.node_id();
                parameters.push(Parameter { id, name, ty });
                self.move_next();

                if self.at(TokenKind::RParen) {
                    break;
                }
                self.expect(TokenKind::Comma, "Expected a comma between parameters.");
                if !self.move_next() {
                    break;
                }
            }
            self.expect(TokenKind::RParen, "Function is missing ).");
        }
        self.move_next();

        let return_type = if self.at(TokenKind::Colon) {
            self.move_next();
            let ty = self.parse_type();
            self.move_next();
            Some(ty)
        } else {
            None
        };

        let body = self.parse_block("Function should have a body but is missing {.");

        FunctionDef {
            id,
            name,
            type_params,
            parameters,
            return_type,
            body,
            span,
        }
    }

    fn parse_type_def(&mut self) -> TypeDef {
        let span = self.span();
        let id = self.node_id();
        self.move_next();

        self.expect(TokenKind::Identifier, "Expected type definition name.");
        let name = self.span();
        self.move_next();

        let type_params = if self.at(TokenKind::Lt) {
            let params = self.parse_type_params();
            self.move_next();
            Some(params)
        } else {
            None
        };

        self.expect(
            TokenKind::LBrace,
            "Type definition does not have a body because it is missing {.",
        );
        self.move_next();

        let mut fields = Vec::new();
        let mut methods = Vec::new();
        while !self.at(TokenKind::EndOfFile) && !self.at(TokenKind::RBrace) {
            match self.kind() {
                TokenKind::Identifier => match self.parse_identifier_statement() {
                    Some(Syntax::VarDecl(field)) => fields.push(field),
                    Some(_) => self.error("Expected variable declaration."),
                    None => {}
                },
                TokenKind::Function => methods.push(self.parse_function_def()),
                _ => self.error("Expected function or variable declaration."),
            }
            self.move_next();
        }

        if !self.at(TokenKind::RBrace) {
            let message = format!(
                "The body for the type definition {} should end with }}.",
                name.text()
            );
            self.error(message);
        }

        TypeDef {
            id,
            name,
            type_params,
            fields,
            methods,
            span,
            binding: None,
        }
    }

    /// `<T, U>` after a function or type name, starting on `<`
    fn parse_type_params(&mut self) -> Vec<Span> {
        let mut params = Vec::new();
        self.move_next();

        if self.at(TokenKind::Gt) {
            self.error("Generics list definition should have at least one generic type.");
            return params;
        }

        loop {
            self.expect(TokenKind::Identifier, "Expected generic name.");
            params.push(self.span());
            self.move_next();

            if self.at(TokenKind::Gt) {
                break;
            }
            self.expect(TokenKind::Comma, "Expected comma.");
            if !self.move_next() {
                break;
            }
        }

        self.expect(TokenKind::Gt, "Generics list definition should end with >.");
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::lexer::Lexer;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> (SyntaxTree, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let tokens = Lexer::new(source, "test.fr").tokenize(&mut diagnostics);
        let tree = Parser::new(tokens).parse(&mut diagnostics);
        (tree, diagnostics)
    }

    fn parse_ok(source: &str) -> SyntaxTree {
        let (tree, diagnostics) = parse(source);
        assert_eq!(diagnostics.messages(), Vec::<&str>::new());
        tree
    }

    fn errors(source: &str) -> Vec<String> {
        let (_, diagnostics) = parse(source);
        diagnostics.iter().map(|d| d.message.clone()).collect()
    }

    #[test]
    fn test_empty_source() {
        let tree = parse_ok("");
        assert_eq!(tree.root.kind, BlockKind::TopLevel);
        assert!(tree.root.children.is_empty());
        assert_eq!(&*tree.file_path, "test.fr");
    }

    #[test]
    fn test_variable_declarations() {
        let tree = parse_ok("x: int -> 1\ny: -> 2\nz: str\nw: int[]\n");
        assert_eq!(tree.root.children.len(), 4);

        let Syntax::VarDecl(x) = &tree.root.children[0] else {
            panic!("expected a variable declaration");
        };
        assert_eq!(x.name.text(), "x");
        assert_eq!(x.declared_type.as_ref().unwrap().name.text(), "int");
        assert!(x.init.is_some());

        let Syntax::VarDecl(y) = &tree.root.children[1] else {
            panic!("expected a variable declaration");
        };
        assert!(y.declared_type.is_none());
        assert!(matches!(y.init.as_ref().unwrap().root, Expr::Integer(_)));

        let Syntax::VarDecl(z) = &tree.root.children[2] else {
            panic!("expected a variable declaration");
        };
        assert!(z.init.is_none());

        let Syntax::VarDecl(w) = &tree.root.children[3] else {
            panic!("expected a variable declaration");
        };
        assert!(w.declared_type.as_ref().unwrap().array);
    }

    #[test]
    fn test_generic_type_reference() {
        let tree = parse_ok("m: Map<str, List<int>> -> make()\n");
        let Syntax::VarDecl(m) = &tree.root.children[0] else {
            panic!("expected a variable declaration");
        };
        let ty = m.declared_type.as_ref().unwrap();
        assert_eq!(ty.mangled_name(), "Map'2");
        assert_eq!(ty.generics[1].mangled_name(), "List'1");
        assert!(ty.generics[0].builtin);
    }

    #[test]
    fn test_auto_variable_requires_assignment() {
        assert_eq!(errors("x:\n"), vec!["Auto variables require an assignment."]);
    }

    #[test]
    fn test_chain_must_be_single_name_in_declaration() {
        // The failed statement only discards one token, so the type is reported too
        assert_eq!(
            errors("a.b: int\n"),
            vec!["Expected the name of a variable.", "Type should not be here."]
        );
    }

    #[test]
    fn test_statements_must_end_with_new_line() {
        let (tree, diagnostics) = parse("x -> 1 y -> 2\n");
        assert_eq!(diagnostics.messages(), vec!["Statements must end with a new line."]);
        assert_eq!(tree.root.children.len(), 2);
    }

    #[test]
    fn test_comment_before_line_end() {
        let tree = parse_ok("x -> 1 // one\ny -> 2\n");
        assert_eq!(tree.root.children.len(), 2);
    }

    #[test]
    fn test_expression_spans_lines() {
        let tree = parse_ok("x -> 1 +\n  2 *\n  3\ny -> 4\n");
        assert_eq!(tree.root.children.len(), 2);

        let Syntax::Expression(e) = &tree.root.children[0] else {
            panic!("expected an expression statement");
        };
        let Expr::Binary(assign) = &e.root else {
            panic!("expected an assignment");
        };
        assert_eq!(assign.kind, BinaryKind::Assign);
        let Expr::Binary(add) = &assign.right else {
            panic!("expected an addition");
        };
        assert_eq!(add.kind, BinaryKind::Add);
        assert!(matches!(&add.right, Expr::Binary(mul) if mul.kind == BinaryKind::Multiply));
    }

    #[test]
    fn test_solitary_chain_is_rejected() {
        assert_eq!(errors("a.b\n"), vec!["A solitary accessor chain is not allowed."]);
    }

    #[test]
    fn test_call_statement() {
        let tree = parse_ok("a.b[0].c()\n");
        let Syntax::Expression(e) = &tree.root.children[0] else {
            panic!("expected an expression statement");
        };
        let Expr::Chain(chain) = &e.root else {
            panic!("expected an accessor chain");
        };
        assert_eq!(chain.links.len(), 3);
        assert!(matches!(chain.links[0], Link::Identifier(_)));
        assert!(matches!(chain.links[1], Link::Indexor { .. }));
        assert!(matches!(chain.links[2], Link::FunctionCall { .. }));
        assert_eq!(chain.links[2].identifier().name(), "c");
    }

    #[test]
    fn test_break_continue_return() {
        let tree = parse_ok("while true {\n  break\n  continue\n  return\n  return 1\n}\n");
        let Syntax::While(w) = &tree.root.children[0] else {
            panic!("expected a while loop");
        };
        assert_eq!(w.body.children.len(), 4);
        assert!(matches!(w.body.children[2], Syntax::Return(Return { expr: None, .. })));
        assert!(matches!(w.body.children[3], Syntax::Return(Return { expr: Some(_), .. })));
    }

    #[test]
    fn test_return_before_closing_brace() {
        let tree = parse_ok("function f() { return }\n");
        let Syntax::FunctionDef(f) = &tree.root.children[0] else {
            panic!("expected a function");
        };
        assert!(matches!(f.body.children[0], Syntax::Return(Return { expr: None, .. })));
    }

    #[test]
    fn test_if_else_chain() {
        let tree = parse_ok("if a {\n} else if b {\n}\nelse {\n  x -> 1\n}\n");
        let Syntax::If(first) = &tree.root.children[0] else {
            panic!("expected an if statement");
        };
        let Some(branch) = &first.else_branch else {
            panic!("expected an else branch");
        };
        let ElseBranch::If(second) = branch.as_ref() else {
            panic!("expected else if");
        };
        let Some(last) = &second.else_branch else {
            panic!("expected a final else");
        };
        assert!(matches!(last.as_ref(), ElseBranch::Else(block) if block.children.len() == 1));
    }

    #[test]
    fn test_invalid_else_branch() {
        assert_eq!(errors("if a {\n} else x\n"), vec!["Invalid if conditional branch."]);
    }

    #[test]
    fn test_missing_bodies() {
        assert_eq!(
            errors("while a\n"),
            vec![
                "While statement does not have a body because it is missing {.",
                "Block must end with }.",
            ]
        );
    }

    #[test]
    fn test_function_definition() {
        let tree = parse_ok("function add(a: int, b: int): int {\n  return a + b\n}\n");
        let Syntax::FunctionDef(f) = &tree.root.children[0] else {
            panic!("expected a function");
        };
        assert_eq!(f.name.text(), "add");
        assert_eq!(f.parameters.len(), 2);
        assert_eq!(f.parameters[1].name.text(), "b");
        assert_eq!(f.return_type.as_ref().unwrap().name.text(), "int");
        assert_eq!(f.body.children.len(), 1);
        assert_eq!(f.arity(), 0);
    }

    #[test]
    fn test_generic_function_definition() {
        let tree = parse_ok("function id<T>(value: T): T {\n  return value\n}\n");
        let Syntax::FunctionDef(f) = &tree.root.children[0] else {
            panic!("expected a function");
        };
        assert_eq!(f.arity(), 1);
        assert_eq!(f.type_params.as_ref().unwrap()[0].text(), "T");
    }

    #[test]
    fn test_function_errors() {
        assert_eq!(errors("function 1() {\n}\n"), vec!["Function is missing a name."]);
        assert_eq!(
            errors("function f(): int\n"),
            vec![
                "Function should have a body but is missing {.",
                "Block must end with }.",
            ]
        );
        assert_eq!(
            errors("function f<>() {\n}\n"),
            vec!["Generics list definition should have at least one generic type."]
        );
    }

    #[test]
    fn test_type_definition() {
        let source = "type Point {\n  x: int\n  y: int -> 0\n  function length(): int {\n    return x\n  }\n}\n";
        let tree = parse_ok(source);
        let Syntax::TypeDef(t) = &tree.root.children[0] else {
            panic!("expected a type definition");
        };
        assert_eq!(t.name.text(), "Point");
        assert_eq!(t.fields.len(), 2);
        assert_eq!(t.methods.len(), 1);
        assert_eq!(t.methods[0].name.text(), "length");
    }

    #[test]
    fn test_type_definition_members_must_be_declarations() {
        let messages = errors("type Point {\n  x -> 1\n  return\n}\n");
        assert_eq!(
            messages,
            vec![
                "Expected variable declaration.",
                "Expected function or variable declaration.",
            ]
        );
    }

    #[test]
    fn test_unterminated_type_definition() {
        let messages = errors("type Point {\n  x: int\n");
        assert_eq!(messages, vec!["The body for the type definition Point should end with }."]);
    }

    #[test]
    fn test_import_and_path() {
        let tree = parse_ok("import std.io\npath lib.core\n");
        assert!(matches!(&tree.root.children[0], Syntax::Import(i) if i.chain.links.len() == 2));
        assert!(matches!(&tree.root.children[1], Syntax::Path(p) if p.chain.links.len() == 2));

        assert_eq!(errors("import a.b()\n"), vec!["Invalid import."]);
        assert_eq!(errors("import\n"), vec!["Import could not be found."]);
        assert_eq!(errors("path a[0]\n"), vec!["Invalid path."]);
    }

    #[test]
    fn test_misplaced_statements() {
        assert_eq!(errors("int\n"), vec!["Type should not be here."]);
        assert_eq!(errors("}\n"), vec!["Invalid statement."]);
    }

    #[test]
    fn test_node_ids_are_unique() {
        let tree = parse_ok("function f(a: int) {\n  b: -> a\n}\ntype T {\n  c: int\n}\n");
        let Syntax::FunctionDef(f) = &tree.root.children[0] else {
            panic!("expected a function");
        };
        let Syntax::TypeDef(t) = &tree.root.children[1] else {
            panic!("expected a type definition");
        };
        let Syntax::VarDecl(b) = &f.body.children[0] else {
            panic!("expected a variable declaration");
        };

        let mut ids = vec![
            tree.root.id,
            f.id,
            f.parameters[0].id,
            f.body.id,
            b.id,
            t.id,
            t.fields[0].id,
        ];
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 7);
    }

    #[test]
    fn test_malformed_input_terminates() {
        let inputs = [
            "function",
            "function f(",
            "function f(a: int, ",
            "type",
            "type T { x",
            "if",
            "if (",
            "x -> (1 + ",
            "x -> new",
            "x -> f<int",
            "a.b.",
            "x: Map<int",
            "}}}}",
            "while { { {",
            "x -> [1, 2]",
            "f(,,,)",
            "import .",
        ];
        for input in inputs {
            let (tree, diagnostics) = parse(input);
            assert!(!diagnostics.is_empty(), "expected diagnostics for {input:?}");
            assert_eq!(tree.root.kind, BlockKind::TopLevel);
        }
    }
}
