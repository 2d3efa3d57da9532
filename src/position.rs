//! Source coordinates: reported violation positions and token spans.
//!
//! Lines and columns are 1-based everywhere in this module. Columns count
//! characters (Unicode scalar values) of the decoded line, not bytes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("line number must be positive, got {0}")]
    LineNotPositive(usize),

    #[error("column number must be positive, got {0}")]
    ColumnNotPositive(usize),

    #[error("invalid position '{input}': expected LINE:COLUMN")]
    Malformed { input: String },

    #[error("span end {end} precedes span start {start}")]
    InvertedSpan {
        start: ViolationPosition,
        end: ViolationPosition,
    },
}

/// A reported violation coordinate (e.g. from a linter report).
///
/// Ordering is by line, then column, so a `BTreeSet` of positions iterates
/// top-to-bottom through the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPosition")]
pub struct ViolationPosition {
    line: usize,
    column: usize,
}

#[derive(Deserialize)]
struct RawPosition {
    line: usize,
    column: usize,
}

impl TryFrom<RawPosition> for ViolationPosition {
    type Error = PositionError;

    fn try_from(raw: RawPosition) -> Result<Self, Self::Error> {
        ViolationPosition::new(raw.line, raw.column)
    }
}

impl ViolationPosition {
    pub fn new(line: usize, column: usize) -> Result<Self, PositionError> {
        if line < 1 {
            return Err(PositionError::LineNotPositive(line));
        }
        if column < 1 {
            return Err(PositionError::ColumnNotPositive(column));
        }
        Ok(Self { line, column })
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// 0-based line index into a line-indexed view.
    pub fn line_index(&self) -> usize {
        self.line - 1
    }

    /// 0-based character index into the addressed line.
    pub fn column_index(&self) -> usize {
        self.column - 1
    }
}

impl fmt::Display for ViolationPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl FromStr for ViolationPosition {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || PositionError::Malformed {
            input: s.to_string(),
        };
        let (line, column) = s.trim().split_once(':').ok_or_else(malformed)?;
        let line = line.trim().parse().map_err(|_| malformed())?;
        let column = column.trim().parse().map_err(|_| malformed())?;
        ViolationPosition::new(line, column)
    }
}

/// Start/end boundaries of a lexical token.
///
/// The end column is exclusive: the token's last character sits at
/// `end.column() - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SourceSpan {
    pub start: ViolationPosition,
    pub end: ViolationPosition,
}

impl SourceSpan {
    pub fn new(start: ViolationPosition, end: ViolationPosition) -> Result<Self, PositionError> {
        if end < start {
            return Err(PositionError::InvertedSpan { start, end });
        }
        Ok(Self { start, end })
    }

    /// Build a span from raw 1-based `(line, column)` pairs.
    pub fn from_coords(
        start: (usize, usize),
        end: (usize, usize),
    ) -> Result<Self, PositionError> {
        Self::new(
            ViolationPosition::new(start.0, start.1)?,
            ViolationPosition::new(end.0, end.1)?,
        )
    }

    pub fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }

    /// Column of the token's last character, `None` for an empty span.
    pub fn last_column(&self) -> Option<usize> {
        self.end.column.checked_sub(1).filter(|c| *c >= 1)
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn rejects_non_positive_coordinates() {
        assert_eq!(
            ViolationPosition::new(0, 3),
            Err(PositionError::LineNotPositive(0))
        );
        assert_eq!(
            ViolationPosition::new(3, 0),
            Err(PositionError::ColumnNotPositive(0))
        );
        assert!(ViolationPosition::new(1, 1).is_ok());
    }

    #[test]
    fn zero_based_indices() {
        let pos = ViolationPosition::new(6, 50).unwrap();
        assert_eq!(pos.line_index(), 5);
        assert_eq!(pos.column_index(), 49);
    }

    #[test]
    fn set_collapses_duplicates_and_orders_by_line_then_column() {
        let set: BTreeSet<_> = [(13, 25), (6, 50), (6, 50), (6, 2)]
            .into_iter()
            .map(|(l, c)| ViolationPosition::new(l, c).unwrap())
            .collect();
        let ordered: Vec<_> = set.iter().map(|p| (p.line(), p.column())).collect();
        assert_eq!(ordered, vec![(6, 2), (6, 50), (13, 25)]);
    }

    #[test]
    fn parse_line_column() {
        let pos: ViolationPosition = "6:50".parse().unwrap();
        assert_eq!(pos, ViolationPosition::new(6, 50).unwrap());
        assert_eq!(pos.to_string(), "6:50");

        assert!(matches!(
            "6".parse::<ViolationPosition>(),
            Err(PositionError::Malformed { .. })
        ));
        assert!(matches!(
            "x:1".parse::<ViolationPosition>(),
            Err(PositionError::Malformed { .. })
        ));
        assert_eq!(
            "0:1".parse::<ViolationPosition>(),
            Err(PositionError::LineNotPositive(0))
        );
    }

    #[test]
    fn deserialize_validates() {
        let ok: ViolationPosition = serde_json::from_str(r#"{"line": 2, "column": 12}"#).unwrap();
        assert_eq!(ok, ViolationPosition::new(2, 12).unwrap());

        let err = serde_json::from_str::<ViolationPosition>(r#"{"line": 0, "column": 12}"#);
        assert!(err.is_err());
    }

    #[test]
    fn span_last_column() {
        let span = SourceSpan::from_coords((6, 10), (6, 13)).unwrap();
        assert!(span.is_single_line());
        assert_eq!(span.last_column(), Some(12));
    }

    #[test]
    fn inverted_span_rejected() {
        let err = SourceSpan::from_coords((6, 13), (6, 10)).unwrap_err();
        assert!(matches!(err, PositionError::InvertedSpan { .. }));
    }
}
