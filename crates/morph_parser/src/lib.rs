//! morph_parser: Recursive descent parser for the TypeScript subset that
//! declares ts-morph style structures.
//!
//! Produces an arena-allocated AST from source text. Syntax errors become
//! diagnostics; the parser itself never fails.

mod parser;
mod precedence;
mod utilities;

pub use parser::Parser;
