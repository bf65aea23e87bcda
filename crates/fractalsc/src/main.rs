//! Fractals compiler front end
//!
//! Usage: fractalsc [OPTIONS] <input>

use anyhow::Context;
use clap::{Parser as ClapParser, ValueEnum};
use fractals_compiler::{CompileError, DiagnosticReporter, FrontendConfig, Pipeline};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// How diagnostics are printed
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Default)]
enum Format {
    /// `file:(line,column)` followed by the message
    Plain,
    /// Annotated source snippets
    #[default]
    Pretty,
}

#[derive(ClapParser, Debug)]
#[command(name = "fractalsc")]
#[command(author = "Fractals Team")]
#[command(version)]
#[command(about = "Front end for the Fractals scripting language", long_about = None)]
struct Args {
    /// Input source file
    #[arg(required = true)]
    input: PathBuf,

    /// Diagnostic output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    format: Format,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Dump AST (for debugging)
    #[arg(long)]
    dump_ast: bool,

    /// Dump tokens (for debugging)
    #[arg(long)]
    dump_tokens: bool,
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` overrides the default level
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run(args: &Args) -> anyhow::Result<()> {
    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("cannot read {}", args.input.display()))?;
    let filename = args.input.display().to_string();

    let mut reporter = DiagnosticReporter::new();
    let file_id = reporter.add_file(&filename, &source);

    if args.verbose {
        eprintln!("Compiling {filename}");
    }

    let config = FrontendConfig {
        dump_tokens: args.dump_tokens,
        dump_ast: args.dump_ast,
        verbose: args.verbose,
    };

    match Pipeline::compile_source(&source, &filename, &config) {
        Ok(compilation) => {
            if args.verbose {
                eprintln!(
                    "No problems found ({} statements, {} types)",
                    compilation.tree.root.children.len(),
                    compilation.analyzer.types().len()
                );
            }
            Ok(())
        }
        Err(CompileError::Halted { stage, diagnostics }) => {
            match args.format {
                Format::Pretty => reporter.report_all(file_id, &diagnostics),
                Format::Plain => diagnostics.dump(&mut io::stderr().lock())?,
            }
            anyhow::bail!("compilation stopped during {stage}")
        }
        Err(other) => {
            reporter.report_error(&other);
            Err(other.into())
        }
    }
}
