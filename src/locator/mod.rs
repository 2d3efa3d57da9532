//! Violation locators.
//!
//! A locator turns a reported [`ViolationPosition`] into a verified
//! [`LineEdit`], or explains why the position cannot be fixed. Two strategies
//! exist: [`CoordinateLocator`] inspects the raw text at the coordinate, and
//! [`RangeLocator`] matches the coordinate against parsed literal token spans.
//! The batch coordinator only ever talks to [`Locator`].

pub mod coordinate;
pub mod range;

pub use coordinate::CoordinateLocator;
pub use range::{RangeLocator, TokenRewrite};

use crate::content::LineIndexedContent;
use crate::patch::{LineEdit, LOWER_SUFFIX};
use crate::position::{SourceSpan, ViolationPosition};
use thiserror::Error;

/// Why a position does not address any character of the content.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressingError {
    #[error("line {line} is outside content of {line_count} lines")]
    LineOutOfRange { line: usize, line_count: usize },

    #[error("column {column} is outside line {line} of length {line_length}")]
    ColumnOutOfRange {
        line: usize,
        column: usize,
        line_length: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnsupportedReason {
    #[error("literal spans multiple lines ({span})")]
    MultiLine { span: SourceSpan },
}

/// Result of resolving one position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocateOutcome {
    /// Position addresses a fixable suffix; apply this edit
    Valid(LineEdit),
    /// Position lies outside the content
    OutOfBounds(AddressingError),
    /// Position is inside the content but does not address a lowercase suffix
    NoMatch { found: Option<char> },
    /// Position addresses a token the fixer does not handle
    Unsupported(UnsupportedReason),
}

/// A locator strategy.
#[derive(Debug, Clone)]
pub enum Locator<'a> {
    Coordinate(CoordinateLocator),
    Range(RangeLocator<'a>),
}

impl<'a> Locator<'a> {
    pub fn coordinate() -> Self {
        Locator::Coordinate(CoordinateLocator)
    }

    pub fn range(tokens: &'a [crate::ts::LiteralToken]) -> Self {
        Locator::Range(RangeLocator::new(tokens))
    }

    pub fn locate(&self, content: &LineIndexedContent, position: ViolationPosition) -> LocateOutcome {
        match self {
            Locator::Coordinate(locator) => locator.locate(content, position),
            Locator::Range(locator) => locator.locate(content, position),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Locator::Coordinate(_) => "coordinate",
            Locator::Range(_) => "range",
        }
    }
}

/// Whether `text` is exactly one or more ASCII digits followed by a single `l`.
pub fn is_lowercase_long_literal(text: &str) -> bool {
    match text.strip_suffix(LOWER_SUFFIX) {
        Some(digits) => !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

/// Bounds-check a position against the content.
///
/// Returns the addressed line and the character at the position.
pub(crate) fn resolve(
    content: &LineIndexedContent,
    position: ViolationPosition,
) -> Result<(&str, char), AddressingError> {
    let line = content
        .line(position.line_index())
        .ok_or(AddressingError::LineOutOfRange {
            line: position.line(),
            line_count: content.line_count(),
        })?;

    let found = line
        .chars()
        .nth(position.column_index())
        .ok_or_else(|| AddressingError::ColumnOutOfRange {
            line: position.line(),
            column: position.column(),
            line_length: line.chars().count(),
        })?;

    Ok((line, found))
}
