//! Tree-sitter integration for Java sources.
//!
//! This module supplies the literal token stream the range locator works on:
//! integer literal tokens with their text and 1-based source spans, plus a
//! structural check that a literal rewrite left the rest of the tree alone.

pub mod errors;
pub mod literals;
pub mod parser;
pub mod validator;

pub use errors::TreeSitterError;
pub use literals::{extract_literals, extract_literals_from_file, LiteralKind, LiteralToken};
pub use parser::{JavaParser, ParsedSource};
pub use validator::validate_structure;
