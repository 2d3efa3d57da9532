use crate::pool::with_parser;
use crate::ts::errors::TreeSitterError;
use crate::ts::parser::ErrorNode;

/// Check that a token-text rewrite preserved the document's structure.
///
/// Node count and pre-order node kinds must be identical, and the rewrite
/// must not introduce ERROR nodes that were absent before.
pub fn validate_structure(before: &str, after: &str) -> Result<(), TreeSitterError> {
    let (before_kinds, before_errors) = fingerprint(before)?;
    let (after_kinds, after_errors) = fingerprint(after)?;

    if before_kinds.len() != after_kinds.len() {
        return Err(TreeSitterError::StructureChanged {
            before: before_kinds.len(),
            after: after_kinds.len(),
        });
    }

    if let Some((index, (b, a))) = before_kinds
        .iter()
        .zip(&after_kinds)
        .enumerate()
        .find(|(_, (b, a))| b != a)
    {
        return Err(TreeSitterError::NodeKindChanged {
            index,
            before: *b,
            after: *a,
        });
    }

    // Comparing by position is enough: rewrites never shift byte offsets.
    let introduced: Vec<&ErrorNode> = after_errors
        .iter()
        .filter(|e| {
            !before_errors
                .iter()
                .any(|o| o.byte_start == e.byte_start && o.byte_end == e.byte_end)
        })
        .collect();

    match introduced.len() {
        0 => Ok(()),
        1 => Err(TreeSitterError::SyntaxError {
            byte_start: introduced[0].byte_start,
            byte_end: introduced[0].byte_end,
        }),
        n => Err(TreeSitterError::MultipleSyntaxErrors { count: n }),
    }
}

fn fingerprint(source: &str) -> Result<(Vec<&'static str>, Vec<ErrorNode>), TreeSitterError> {
    with_parser(|parser| {
        parser
            .parse_document(source)
            .map(|parsed| (parsed.node_kinds(), parsed.error_nodes()))
    })?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_rewrite_preserves_structure() {
        let before = "class T { long a = 42l; long b = 42l; }";
        let after = "class T { long a = 42L; long b = 42l; }";
        assert!(validate_structure(before, after).is_ok());
    }

    #[test]
    fn structural_change_detected() {
        let before = "class T { long a = 42l; }";
        let after = "class T { long a = 42 + 1; }";
        assert!(matches!(
            validate_structure(before, after),
            Err(TreeSitterError::StructureChanged { .. })
        ));
    }

    #[test]
    fn rewrite_introducing_syntax_error_rejected() {
        let before = "class T { long a = 42l; }";
        let after = "class T { long a = 42l }";
        assert!(validate_structure(before, after).is_err());
        assert!(validate_structure(before, before).is_ok());
    }

    #[test]
    fn kind_change_detected() {
        let before = "class T { long a = 42l; }";
        let after = "class T { long a = abc; }";
        assert!(matches!(
            validate_structure(before, after),
            Err(TreeSitterError::NodeKindChanged { .. })
        ));
    }
}
