use crate::content::LineIndexedContent;
use crate::locator::{is_lowercase_long_literal, resolve, LocateOutcome, UnsupportedReason};
use crate::patch::{uppercase_suffix, LineEdit};
use crate::position::ViolationPosition;
use crate::ts::LiteralToken;

/// Outcome of matching one token against the reported positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenRewrite {
    /// A position addressed the token's suffix; `text` is the fixed token
    Rewritten {
        position: ViolationPosition,
        text: String,
    },
    /// No position addressed this token (the common case)
    Unchanged,
    Unsupported(UnsupportedReason),
}

/// Matches reported positions against parsed literal token spans.
///
/// A position fixes a token only when the token reads `<digits>l`, the
/// position is on the token's start line, and its column is the token's
/// last character (`span.end.column - 1`).
#[derive(Debug, Clone, Copy)]
pub struct RangeLocator<'a> {
    tokens: &'a [LiteralToken],
}

impl<'a> RangeLocator<'a> {
    pub fn new(tokens: &'a [LiteralToken]) -> Self {
        Self { tokens }
    }

    /// Decide whether any candidate position fixes `token`.
    ///
    /// Candidates are tried in iteration order; the first match wins.
    pub fn rewrite<'p, I>(token: &LiteralToken, candidates: I) -> TokenRewrite
    where
        I: IntoIterator<Item = &'p ViolationPosition>,
    {
        if !is_lowercase_long_literal(&token.text) {
            return TokenRewrite::Unchanged;
        }
        let Some(last_column) = token.span.last_column() else {
            return TokenRewrite::Unchanged;
        };

        let span = token.span;
        for position in candidates {
            if position.column() != last_column {
                continue;
            }

            if !span.is_single_line() {
                if position.line() == span.start.line() || position.line() == span.end.line() {
                    return TokenRewrite::Unsupported(UnsupportedReason::MultiLine { span });
                }
                continue;
            }

            if position.line() == span.start.line() {
                return match uppercase_suffix(&token.text) {
                    Some(text) => TokenRewrite::Rewritten {
                        position: *position,
                        text,
                    },
                    None => TokenRewrite::Unchanged,
                };
            }
        }

        TokenRewrite::Unchanged
    }

    pub fn locate(&self, content: &LineIndexedContent, position: ViolationPosition) -> LocateOutcome {
        let found = match resolve(content, position) {
            Ok((_, found)) => found,
            Err(e) => return LocateOutcome::OutOfBounds(e),
        };

        for token in self.tokens {
            match Self::rewrite(token, [&position]) {
                TokenRewrite::Unchanged => continue,
                TokenRewrite::Unsupported(reason) => return LocateOutcome::Unsupported(reason),
                TokenRewrite::Rewritten { text, .. } => {
                    let span = token.span;
                    return LocateOutcome::Valid(LineEdit::token(
                        span.start.line_index(),
                        span.start.column_index(),
                        span.end.column_index(),
                        token.text.clone(),
                        text,
                    ));
                }
            }
        }

        LocateOutcome::NoMatch { found: Some(found) }
    }
}
