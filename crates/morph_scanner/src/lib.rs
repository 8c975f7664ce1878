//! morph_scanner: Lexer/tokenizer for TypeScript source code.
//!
//! Produces tokens from source text with byte offsets, skipping whitespace
//! and comments as trivia. Supports:
//! - Punctuation and operators, with `>` rescanning for the parser
//! - String, numeric, bigint and template literals
//! - Regular expression literals on request
//! - Unicode identifiers

mod char_codes;
mod scanner;
mod token;

pub use scanner::{Scanner, ScannerState};
pub use token::TokenInfo;
