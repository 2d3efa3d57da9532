use crate::content::LineIndexedContent;
use crate::locator::{resolve, LocateOutcome};
use crate::patch::{LineEdit, LOWER_SUFFIX};
use crate::position::ViolationPosition;

/// Resolves raw `line:column` coordinates against the text itself.
///
/// The addressed character must be a lowercase `l` closing a numeric
/// literal: the word it ends starts with an ASCII digit, so `1000000l`,
/// `0xCAFEl` and `1_000l` qualify while the `l` of `long` or of an
/// identifier like `deal` does not. Anything else (already fixed, stale, or
/// mis-reported coordinates) is a [`LocateOutcome::NoMatch`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoordinateLocator;

impl CoordinateLocator {
    pub fn locate(&self, content: &LineIndexedContent, position: ViolationPosition) -> LocateOutcome {
        let (line, found) = match resolve(content, position) {
            Ok(resolved) => resolved,
            Err(e) => return LocateOutcome::OutOfBounds(e),
        };

        let column_index = position.column_index();
        if found == LOWER_SUFFIX && ends_numeric_literal(line, column_index) {
            LocateOutcome::Valid(LineEdit::suffix(position.line_index(), column_index))
        } else {
            LocateOutcome::NoMatch { found: Some(found) }
        }
    }
}

/// Whether the word ending just before `column_index` starts with a digit.
fn ends_numeric_literal(line: &str, column_index: usize) -> bool {
    let before: Vec<char> = line.chars().take(column_index).collect();
    before
        .iter()
        .rev()
        .take_while(|c| c.is_ascii_alphanumeric() || **c == '_')
        .last()
        .is_some_and(|c| c.is_ascii_digit())
}
