//! Fractals compiler front end
//!
//! This library lexes, parses and semantically analyzes Fractals source
//! files.
//!
//! ## Architecture
//!
//! The compiler is organized into:
//! - **Front end** (`frontend/`): lexer, parser, syntax tree and semantic analysis
//! - **Driver** (`driver/`): runs the stages in order and stops at the first failing one
//! - **Common** (`common/`): shared infrastructure (errors, diagnostics, spans)

pub mod common;
pub mod driver;
pub mod frontend;

// Re-exports for convenience
pub use common::{CompileError, CompileResult, DiagnosticReporter, Diagnostics, Span};
pub use driver::{Compilation, Pipeline};
pub use frontend::FrontendConfig;
