//! Error types and diagnostic reporting

use codespan_reporting::diagnostic::{Diagnostic as Report, Label};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use std::fmt;
use thiserror::Error;

use super::{Diagnostic, Diagnostics};

/// Pipeline stage, used to say where compilation stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Lex,
    Parse,
    Analyze,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Lex => write!(f, "lexing"),
            Stage::Parse => write!(f, "parsing"),
            Stage::Analyze => write!(f, "semantic analysis"),
        }
    }
}

/// Fatal compile error.
///
/// Problems in the user's program are not errors, they are collected in
/// [`Diagnostics`]. `Internal` means the compiler itself is broken.
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("internal compiler error: {message}")]
    Internal { message: String },

    #[error("{stage} reported {} diagnostic(s)", diagnostics.len())]
    Halted { stage: Stage, diagnostics: Diagnostics },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompileError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn halted(stage: Stage, diagnostics: Diagnostics) -> Self {
        Self::Halted { stage, diagnostics }
    }
}

pub type CompileResult<T> = Result<T, CompileError>;

/// Diagnostic reporter for pretty error output
pub struct DiagnosticReporter {
    files: SimpleFiles<String, String>,
    writer: StandardStream,
    config: term::Config,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self {
            files: SimpleFiles::new(),
            writer: StandardStream::stderr(ColorChoice::Auto),
            config: term::Config::default(),
        }
    }

    pub fn add_file(&mut self, name: impl Into<String>, source: impl Into<String>) -> usize {
        self.files.add(name.into(), source.into())
    }

    pub fn report(&self, file_id: usize, diagnostic: &Diagnostic) {
        let span = &diagnostic.span;
        let report = Report::error()
            .with_message(diagnostic.kind.to_string())
            .with_labels(vec![
                Label::primary(file_id, span.offset..span.end()).with_message(&diagnostic.message),
            ]);

        let _ = term::emit(&mut self.writer.lock(), &self.config, &self.files, &report);
    }

    pub fn report_all(&self, file_id: usize, diagnostics: &Diagnostics) {
        for diagnostic in diagnostics {
            self.report(file_id, diagnostic);
        }
    }

    pub fn report_error(&self, error: &CompileError) {
        let report = match error {
            CompileError::Halted { stage, diagnostics } => Report::error()
                .with_message(format!("aborting after {stage}"))
                .with_notes(vec![format!("{} diagnostic(s) reported", diagnostics.len())]),
            other => Report::bug().with_message(other.to_string()),
        };

        let _ = term::emit(&mut self.writer.lock(), &self.config, &self.files, &report);
    }
}

impl Default for DiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}
