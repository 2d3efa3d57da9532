//! Property tests for the batch fixer.

use long_literal_fixer::{
    extract_literals, fix_content, FixStatus, LineIndexedContent, Locator, ViolationPosition,
};
use proptest::prelude::*;
use std::collections::BTreeSet;

/// A Java field declaration with a random long literal.
fn java_line() -> impl Strategy<Value = String> {
    (
        "[a-z]{1,6}",
        "[1-9][0-9]{0,6}",
        prop_oneof![Just("l"), Just("L"), Just("")],
    )
        .prop_map(|(name, digits, suffix)| format!("    long v_{name} = {digits}{suffix};"))
}

fn java_lines() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(java_line(), 1..8)
}

fn coords() -> impl Strategy<Value = BTreeSet<(usize, usize)>> {
    prop::collection::btree_set((1usize..12, 1usize..32), 1..10)
}

fn to_positions(coords: &BTreeSet<(usize, usize)>) -> BTreeSet<ViolationPosition> {
    coords
        .iter()
        .map(|&(l, c)| ViolationPosition::new(l, c).unwrap())
        .collect()
}

proptest! {
    #[test]
    fn positions_require_positive_coordinates(line in 0usize..4, column in 0usize..4) {
        let result = ViolationPosition::new(line, column);
        prop_assert_eq!(result.is_ok(), line >= 1 && column >= 1);
        if let Ok(position) = result {
            prop_assert_eq!(position.to_string().parse::<ViolationPosition>(), Ok(position));
        }
    }

    #[test]
    fn second_pass_fixes_nothing(lines in java_lines(), coords in coords()) {
        let set = to_positions(&coords);
        let mut content = LineIndexedContent::from_lines(lines);

        fix_content(&mut content, &set, &Locator::coordinate()).unwrap();
        let once = content.clone();

        let report = fix_content(&mut content, &set, &Locator::coordinate()).unwrap();
        prop_assert_eq!(report.fixed_count(), 0);
        prop_assert_eq!(content, once);
    }

    #[test]
    fn each_fix_changes_exactly_one_l(lines in java_lines(), coords in coords()) {
        let set = to_positions(&coords);
        let mut content = LineIndexedContent::from_lines(lines);
        let before = content.render();
        let line_count = content.line_count();

        let report = fix_content(&mut content, &set, &Locator::coordinate()).unwrap();
        let after = content.render();

        prop_assert_eq!(content.line_count(), line_count);
        prop_assert_eq!(before.len(), after.len());

        let changed: Vec<(char, char)> = before
            .chars()
            .zip(after.chars())
            .filter(|(a, b)| a != b)
            .collect();
        prop_assert_eq!(changed.len(), report.fixed_count());
        for (a, b) in changed {
            prop_assert_eq!(a, 'l');
            prop_assert_eq!(b, 'L');
        }
    }

    #[test]
    fn lines_past_the_end_never_modify(
        lines in java_lines(),
        extra in 1usize..5,
        column in 1usize..50,
    ) {
        let mut content = LineIndexedContent::from_lines(lines);
        let original = content.clone();
        let position = ViolationPosition::new(content.line_count() + extra, column).unwrap();

        let report = fix_content(&mut content, &BTreeSet::from([position]), &Locator::coordinate()).unwrap();

        prop_assert_eq!(report.fixed_count(), 0);
        prop_assert!(matches!(report.outcomes[0].status, FixStatus::OutOfBounds(_)));
        prop_assert_eq!(content, original);
    }

    #[test]
    fn columns_past_the_end_never_modify(lines in java_lines(), extra in 1usize..5) {
        let mut content = LineIndexedContent::from_lines(lines);
        let original = content.clone();
        let length = content.line(0).unwrap().chars().count();
        let position = ViolationPosition::new(1, length + extra).unwrap();

        let report = fix_content(&mut content, &BTreeSet::from([position]), &Locator::coordinate()).unwrap();

        prop_assert!(matches!(report.outcomes[0].status, FixStatus::OutOfBounds(_)));
        prop_assert_eq!(content, original);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn range_and_coordinate_locators_agree(lines in java_lines(), coords in coords()) {
        let mut source = vec!["class T {".to_string()];
        source.extend(lines);
        source.push("}".to_string());
        let original = source.join("\n");

        let set = to_positions(&coords);
        let tokens = extract_literals(&original).unwrap();

        let mut by_coordinate = LineIndexedContent::parse(&original);
        let mut by_range = by_coordinate.clone();
        let a = fix_content(&mut by_coordinate, &set, &Locator::coordinate()).unwrap();
        let b = fix_content(&mut by_range, &set, &Locator::range(&tokens)).unwrap();

        prop_assert_eq!(a.fixed_count(), b.fixed_count());
        prop_assert_eq!(by_coordinate, by_range);
    }
}
