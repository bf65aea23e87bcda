//! Shared diagnostic sink
//!
//! Every stage appends user-facing problems here instead of failing. The
//! driver inspects the sink between stages and stops the pipeline as soon as
//! it is non-empty.

use std::fmt;
use std::io::{self, Write};

use super::Span;

/// Which stage produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Lexical,
    Syntax,
    Semantic,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::Lexical => write!(f, "Lexer error"),
            DiagnosticKind::Syntax => write!(f, "Syntax error"),
            DiagnosticKind::Semantic => write!(f, "Semantic error"),
        }
    }
}

/// A single message attached to a source location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub span: Span,
}

/// Ordered list of diagnostics for one compilation
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: DiagnosticKind, message: impl Into<String>, span: Span) {
        let message = message.into();
        tracing::debug!(%kind, %span, %message, "diagnostic");
        self.items.push(Diagnostic { kind, message, span });
    }

    pub fn lexical(&mut self, message: impl Into<String>, span: Span) {
        self.push(DiagnosticKind::Lexical, message, span);
    }

    pub fn syntax(&mut self, message: impl Into<String>, span: Span) {
        self.push(DiagnosticKind::Syntax, message, span);
    }

    pub fn semantic(&mut self, message: impl Into<String>, span: Span) {
        self.push(DiagnosticKind::Semantic, message, span);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    /// Messages only, in report order. Mostly useful in tests.
    pub fn messages(&self) -> Vec<&str> {
        self.items.iter().map(|d| d.message.as_str()).collect()
    }

    /// Print every diagnostic as `file:(line,column)` followed by the
    /// tab-indented message and a blank line.
    pub fn dump(&self, out: &mut impl Write) -> io::Result<()> {
        for diagnostic in &self.items {
            writeln!(out, "{}", diagnostic.span)?;
            writeln!(out, "\t{}", diagnostic.message)?;
            writeln!(out)?;
        }
        Ok(())
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
