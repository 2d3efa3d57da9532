use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeSitterError {
    #[error("failed to set Java language for parser")]
    LanguageSet,

    #[error("failed to parse source code")]
    ParseFailed,

    #[error("syntax error detected at byte {byte_start}..{byte_end}")]
    SyntaxError { byte_start: usize, byte_end: usize },

    #[error("multiple syntax errors detected: {count} ERROR nodes")]
    MultipleSyntaxErrors { count: usize },

    #[error("rewrite changed document structure: {before} nodes before, {after} after")]
    StructureChanged { before: usize, after: usize },

    #[error("rewrite changed node kind at position {index}: {before} -> {after}")]
    NodeKindChanged {
        index: usize,
        before: &'static str,
        after: &'static str,
    },

    #[error("literal token at byte {byte_start} has an invalid span")]
    InvalidSpan { byte_start: usize },

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
