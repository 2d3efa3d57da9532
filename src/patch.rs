use crate::content::LineIndexedContent;
use std::ops::Range;
use thiserror::Error;

/// Lowercase long suffix the fixer looks for.
pub const LOWER_SUFFIX: char = 'l';
/// Canonical replacement suffix.
pub const UPPER_SUFFIX: char = 'L';

/// The edit primitive: a verified replacement of a character range inside one line.
///
/// Both locator strategies compile down to this. Columns are 0-based character
/// indices; `column_end` is exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "LineEdit does nothing until applied"]
pub struct LineEdit {
    /// 0-based index of the line to edit
    pub line_index: usize,
    /// First character replaced (inclusive)
    pub column_start: usize,
    /// End of the replaced range (exclusive)
    pub column_end: usize,
    /// Text written into [column_start, column_end)
    pub new_text: String,
    /// Text that must currently occupy the range
    pub expected_before: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("line {line} is outside content of {line_count} lines")]
    LineOutOfRange { line: usize, line_count: usize },

    #[error("invalid column range [{column_start}, {column_end}) on line {line} of length {line_length}")]
    InvalidColumnRange {
        line: usize,
        column_start: usize,
        column_end: usize,
        line_length: usize,
    },

    #[error("before-text verification failed at {line}:{column}: expected {expected:?}, found {found:?}")]
    BeforeTextMismatch {
        line: usize,
        column: usize,
        expected: String,
        found: String,
    },
}

/// Outcome of patching a single line: either exactly the target range
/// changed, or nothing did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchResult {
    pub applied: bool,
    pub line: String,
}

/// Result of applying an edit to line-indexed content.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "EditResult should be checked for applied/already-applied"]
pub enum EditResult {
    /// Edit changed the content (1-based coordinates of the first replaced character)
    Applied { line: usize, column: usize },
    /// Range already held the new text
    AlreadyApplied { line: usize },
}

impl LineEdit {
    pub fn new(
        line_index: usize,
        column_start: usize,
        column_end: usize,
        new_text: impl Into<String>,
        expected_before: impl Into<String>,
    ) -> Self {
        Self {
            line_index,
            column_start,
            column_end,
            new_text: new_text.into(),
            expected_before: expected_before.into(),
        }
    }

    /// Single-character `l` -> `L` replacement at a 0-based column.
    pub fn suffix(line_index: usize, column_index: usize) -> Self {
        Self::new(
            line_index,
            column_index,
            column_index + 1,
            UPPER_SUFFIX.to_string(),
            LOWER_SUFFIX.to_string(),
        )
    }

    /// Whole-token rewrite: `before` currently spans [column_start, column_end).
    pub fn token(
        line_index: usize,
        column_start: usize,
        column_end: usize,
        before: impl Into<String>,
        after: impl Into<String>,
    ) -> Self {
        Self::new(line_index, column_start, column_end, after, before)
    }

    /// Validate the edit against the current line.
    ///
    /// Returns the byte range of the target if it holds either the expected
    /// before-text or (already applied) the new text.
    fn validate(&self, line: &str) -> Result<Range<usize>, EditError> {
        let range = char_byte_range(line, self.column_start, self.column_end).ok_or_else(|| {
            EditError::InvalidColumnRange {
                line: self.line_index + 1,
                column_start: self.column_start,
                column_end: self.column_end,
                line_length: line.chars().count(),
            }
        })?;

        let current = &line[range.clone()];
        if current == self.new_text || current == self.expected_before {
            return Ok(range);
        }

        Err(EditError::BeforeTextMismatch {
            line: self.line_index + 1,
            column: self.column_start + 1,
            expected: self.expected_before.clone(),
            found: current.to_string(),
        })
    }

    /// Produce the patched copy of `line`.
    ///
    /// Every character outside the target range is carried over unchanged.
    pub fn apply_to_line(&self, line: &str) -> Result<PatchResult, EditError> {
        let range = self.validate(line)?;

        if line[range.clone()] == self.new_text {
            return Ok(PatchResult {
                applied: false,
                line: line.to_string(),
            });
        }

        let mut patched = String::with_capacity(line.len() - range.len() + self.new_text.len());
        patched.push_str(&line[..range.start]);
        patched.push_str(&self.new_text);
        patched.push_str(&line[range.end..]);

        Ok(PatchResult {
            applied: true,
            line: patched,
        })
    }

    /// Apply this edit in place by replacing the addressed line.
    pub fn apply(&self, content: &mut LineIndexedContent) -> Result<EditResult, EditError> {
        let line = content
            .line(self.line_index)
            .ok_or(EditError::LineOutOfRange {
                line: self.line_index + 1,
                line_count: content.line_count(),
            })?;

        let result = self.apply_to_line(line)?;
        if !result.applied {
            return Ok(EditResult::AlreadyApplied {
                line: self.line_index + 1,
            });
        }

        // The index was just read successfully, so the replacement cannot miss.
        content.replace_line(self.line_index, result.line);

        Ok(EditResult::Applied {
            line: self.line_index + 1,
            column: self.column_start + 1,
        })
    }
}

/// Rewrite a literal's text, uppercasing a trailing `l` only.
///
/// Returns `None` when the text does not end in a lowercase suffix; interior
/// and leading `l`s are never touched.
pub fn uppercase_suffix(text: &str) -> Option<String> {
    text.strip_suffix(LOWER_SUFFIX)
        .map(|stem| format!("{stem}{UPPER_SUFFIX}"))
}

/// Map a 0-based character range of `line` onto byte offsets.
fn char_byte_range(line: &str, column_start: usize, column_end: usize) -> Option<Range<usize>> {
    if column_start > column_end {
        return None;
    }
    let mut offsets = line
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(line.len()));

    let start = offsets.nth(column_start)?;
    let end = if column_end == column_start {
        start
    } else {
        offsets.nth(column_end - column_start - 1)?
    };
    Some(start..end)
}
