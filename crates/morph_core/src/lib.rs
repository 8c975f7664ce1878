//! morph_core: Core utilities for the morphgen code generator.
//!
//! Provides text spans and edits, string interning, and the hash collections
//! used throughout the syntax and generation pipeline.

pub mod collections;
pub mod intern;
pub mod text;

// Re-export commonly used types
pub use intern::{InternedString, StringInterner};
pub use text::{TextChange, TextRange, TextSpan};
