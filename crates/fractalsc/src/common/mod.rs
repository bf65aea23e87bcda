//! Common infrastructure shared by every stage

mod diagnostics;
mod error;
mod span;

pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use error::{CompileError, CompileResult, DiagnosticReporter, Stage};
pub use span::Span;
