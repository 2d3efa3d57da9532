use crate::pool::with_parser;
use crate::position::{SourceSpan, ViolationPosition};
use crate::ts::errors::TreeSitterError;
use std::path::Path;
use tree_sitter::{Node, Point};

/// Integer literal node kinds of the Java grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Decimal,
    Hex,
    Octal,
    Binary,
}

impl LiteralKind {
    pub fn from_node_kind(kind: &str) -> Option<Self> {
        match kind {
            "decimal_integer_literal" => Some(LiteralKind::Decimal),
            "hex_integer_literal" => Some(LiteralKind::Hex),
            "octal_integer_literal" => Some(LiteralKind::Octal),
            "binary_integer_literal" => Some(LiteralKind::Binary),
            _ => None,
        }
    }
}

/// An integer literal token: its printed form and where it sits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralToken {
    pub kind: LiteralKind,
    pub text: String,
    pub span: SourceSpan,
}

impl LiteralToken {
    pub fn new(kind: LiteralKind, text: impl Into<String>, span: SourceSpan) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    /// Whether the token is written `<digits>l`.
    pub fn is_lowercase_long(&self) -> bool {
        crate::locator::is_lowercase_long_literal(&self.text)
    }

    /// Position of the token's last character, the suffix letter for long literals.
    pub fn suffix_position(&self) -> Option<ViolationPosition> {
        let column = self.span.last_column()?;
        ViolationPosition::new(self.span.end.line(), column).ok()
    }
}

/// Parse Java source and collect every integer literal token in document order.
pub fn extract_literals(source: &str) -> Result<Vec<LiteralToken>, TreeSitterError> {
    let tree = with_parser(|parser| parser.parse(source))??;
    let lines: Vec<&str> = source.split('\n').collect();

    let mut tokens = Vec::new();
    collect_literals(tree.root_node(), source, &lines, &mut tokens)?;
    Ok(tokens)
}

/// Read a file and extract its integer literal tokens.
pub fn extract_literals_from_file(path: &Path) -> Result<Vec<LiteralToken>, TreeSitterError> {
    let source = std::fs::read_to_string(path).map_err(|e| TreeSitterError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    extract_literals(&source)
}

fn collect_literals(
    node: Node<'_>,
    source: &str,
    lines: &[&str],
    out: &mut Vec<LiteralToken>,
) -> Result<(), TreeSitterError> {
    if let Some(kind) = LiteralKind::from_node_kind(node.kind()) {
        let invalid = || TreeSitterError::InvalidSpan {
            byte_start: node.start_byte(),
        };
        let start = to_position(lines, node.start_position()).ok_or_else(invalid)?;
        let end = to_position(lines, node.end_position()).ok_or_else(invalid)?;
        let span = SourceSpan::new(start, end).map_err(|_| invalid())?;

        out.push(LiteralToken::new(kind, &source[node.byte_range()], span));
        // Literals are leaves
        return Ok(());
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_literals(child, source, lines, out)?;
    }
    Ok(())
}

/// Convert a tree-sitter point (0-based row, byte column) to a 1-based
/// line and character column.
fn to_position(lines: &[&str], point: Point) -> Option<ViolationPosition> {
    let line = lines.get(point.row)?;
    let chars_before = line.get(..point.column)?.chars().count();
    ViolationPosition::new(point.row + 1, chars_before + 1).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "class Test {\n    private static final long BAD = 1000000l;\n    long ok = 0xFFL;\n    void m() { long v = 42l; int i = 7; }\n}\n";

    #[test]
    fn extracts_integer_literals_in_order() {
        let tokens = extract_literals(SAMPLE).unwrap();
        let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["1000000l", "0xFFL", "42l", "7"]);
        assert_eq!(tokens[1].kind, LiteralKind::Hex);
    }

    #[test]
    fn spans_are_one_based_with_exclusive_end() {
        let tokens = extract_literals(SAMPLE).unwrap();
        let bad = &tokens[0];
        // "    private static final long BAD = " is 36 chars
        assert_eq!(bad.span, SourceSpan::from_coords((2, 37), (2, 45)).unwrap());
        assert_eq!(
            bad.suffix_position(),
            Some(ViolationPosition::new(2, 44).unwrap())
        );
    }

    #[test]
    fn lowercase_long_detection() {
        let tokens = extract_literals(SAMPLE).unwrap();
        let flagged: Vec<_> = tokens
            .iter()
            .filter(|t| t.is_lowercase_long())
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(flagged, vec!["1000000l", "42l"]);
    }

    #[test]
    fn columns_count_characters() {
        let source = "class A { String s = \"é\"; long v = 7l; }";
        let tokens = extract_literals(source).unwrap();
        assert_eq!(tokens.len(), 1);
        let column = source.chars().position(|c| c == '7').unwrap() + 1;
        assert_eq!(tokens[0].span.start.column(), column);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = extract_literals_from_file(Path::new("/nonexistent/Test.java")).unwrap_err();
        assert!(matches!(err, TreeSitterError::Io { .. }));
    }
}
