//! Thread-local Java parser reuse.
//!
//! Creates the parser on first use per thread and hands the same instance to
//! every later caller on that thread.

use crate::ts::{JavaParser, TreeSitterError};
use std::cell::RefCell;

thread_local! {
    static JAVA_PARSER: RefCell<Option<JavaParser>> = const { RefCell::new(None) };
}

/// Execute function with pooled parser instance.
///
/// # Example
///
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use long_literal_fixer::pool::with_parser;
///
/// let tree = with_parser(|parser| parser.parse("class A {}"))??;
/// assert_eq!(tree.root_node().kind(), "program");
/// # Ok(())
/// # }
/// ```
pub fn with_parser<F, R>(f: F) -> Result<R, TreeSitterError>
where
    F: FnOnce(&mut JavaParser) -> R,
{
    JAVA_PARSER.with(|cell| {
        let mut slot = cell.borrow_mut();
        let parser = match slot.take() {
            Some(parser) => parser,
            None => JavaParser::new()?,
        };
        Ok(f(slot.insert(parser)))
    })
}
