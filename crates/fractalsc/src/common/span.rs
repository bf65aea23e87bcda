//! Source locations

use std::fmt;
use std::sync::Arc;

use super::{CompileError, CompileResult};

/// Location of a token or node in a source file.
///
/// `line` and `column` are 1-based, `offset` and `len` are byte based.
/// `text` holds the source slice the span covers, when there is one
/// (the end-of-file token has none).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: Option<String>,
    pub file_path: Arc<str>,
    pub offset: usize,
    pub len: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(
        text: Option<String>,
        file_path: Arc<str>,
        offset: usize,
        len: usize,
        line: usize,
        column: usize,
    ) -> Self {
        Self {
            text,
            file_path,
            offset,
            len,
            line,
            column,
        }
    }

    /// Source text of the span, or an empty string.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Merge `self` with a later span of the same file into one covering span.
    ///
    /// The text is only kept when the two spans touch.
    pub fn combine(&self, other: &Span) -> CompileResult<Span> {
        if self.file_path != other.file_path {
            return Err(CompileError::internal(format!(
                "cannot combine spans of different files: {} and {}",
                self.file_path, other.file_path
            )));
        }

        let text = match (&self.text, &other.text) {
            (Some(a), Some(b)) if self.end() == other.offset => Some(format!("{a}{b}")),
            (Some(a), _) if self == other => Some(a.clone()),
            _ => None,
        };

        Ok(Span {
            text,
            file_path: Arc::clone(&self.file_path),
            offset: self.offset,
            len: other.end().saturating_sub(self.offset),
            line: self.line,
            column: self.column,
        })
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:({},{})", self.file_path, self.line, self.column)
    }
}
