//! morph_ast: Abstract Syntax Tree definitions for the supported TypeScript subset.
//!
//! This crate defines the AST node types, the SyntaxKind enum, modifier and
//! node flags, and the visitor used for reference analysis.

pub mod node;
pub mod syntax_kind;
pub mod types;
pub mod visitor;

// Re-export key types
pub use node::*;
pub use syntax_kind::SyntaxKind;
pub use types::*;
