//! Compilation driver and pipeline orchestration

use crate::common::{CompileError, CompileResult, Diagnostics, Stage};
use crate::frontend::ast::SyntaxTree;
use crate::frontend::lexer::Lexer;
use crate::frontend::parser::Parser;
use crate::frontend::sema::SemanticAnalyzer;
use crate::frontend::FrontendConfig;

/// Output of a successful front end run
pub struct Compilation {
    /// The analyzed tree, with bindings and resolved types filled in
    pub tree: SyntaxTree,
    /// Owns the types and scopes the tree refers to
    pub analyzer: SemanticAnalyzer,
}

/// Runs the front end stages in order, stopping after the first stage that
/// reports diagnostics
pub struct Pipeline;

impl Pipeline {
    #[tracing::instrument(skip(source, config))]
    pub fn compile_source(
        source: &str,
        path: &str,
        config: &FrontendConfig,
    ) -> CompileResult<Compilation> {
        let mut diagnostics = Diagnostics::new();

        // Phase 1: Lexing
        let tokens = Lexer::new(source, path).tokenize(&mut diagnostics);
        if config.dump_tokens {
            eprintln!("=== Tokens ===");
            for token in &tokens {
                eprintln!("{token:?}");
            }
            eprintln!("=== End Tokens ===\n");
        }
        halt_on(Stage::Lex, &mut diagnostics)?;

        // Phase 2: Parsing
        if config.verbose {
            eprintln!("Parsing {path}...");
        }
        let mut tree = Parser::new(tokens).parse(&mut diagnostics);
        halt_on(Stage::Parse, &mut diagnostics)?;

        // Phase 3: Semantic analysis
        if config.verbose {
            eprintln!("Analyzing {path}...");
        }
        let mut analyzer = SemanticAnalyzer::new();
        analyzer.analyze(&mut tree, &mut diagnostics)?;

        if config.dump_ast {
            eprintln!("=== AST ===");
            eprintln!("{tree:#?}");
            eprintln!("=== End AST ===\n");
        }
        halt_on(Stage::Analyze, &mut diagnostics)?;

        Ok(Compilation { tree, analyzer })
    }
}

fn halt_on(stage: Stage, diagnostics: &mut Diagnostics) -> CompileResult<()> {
    if diagnostics.is_empty() {
        return Ok(());
    }
    tracing::debug!(%stage, count = diagnostics.len(), "halting");
    Err(CompileError::halted(stage, std::mem::take(diagnostics)))
}
