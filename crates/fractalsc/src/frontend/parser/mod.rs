//! Fractals parser module

mod expr;
mod parser;

pub use parser::{Parser, Sensitivity};
