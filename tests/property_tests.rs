use pagediff::engine::{DiffType, compare};
use proptest::prelude::*;

/// Short multi-line text drawn from a small alphabet so lines repeat
fn text() -> impl Strategy<Value = String> {
    prop::collection::vec("[aAbB ]{0,4}", 0..12).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn test_count_consistency(a in text(), b in text()) {
        let result = compare(&a, &b);
        prop_assert_eq!(result.total_differences(), result.diffs().len());
        prop_assert_eq!(result.is_identical(), result.diffs().is_empty());
        prop_assert_eq!(
            result.added_count() + result.removed_count(),
            result.total_differences()
        );
    }

    #[test]
    fn test_reflexive(a in text()) {
        prop_assert!(compare(&a, &a).is_identical());
        prop_assert!(compare(&a, &a.to_uppercase()).is_identical());
    }

    #[test]
    fn test_deterministic(a in text(), b in text()) {
        prop_assert_eq!(compare(&a, &b), compare(&a, &b));
    }

    #[test]
    fn test_swap_mirrors_record_types(a in text(), b in text()) {
        let forward = compare(&a, &b);
        let backward = compare(&b, &a);
        prop_assert_eq!(forward.removed_count(), backward.added_count());
        prop_assert_eq!(forward.added_count(), backward.removed_count());
    }

    #[test]
    fn test_line_numbers_in_range(a in text(), b in text()) {
        let a_lines = a.split('\n').count();
        let b_lines = b.split('\n').count();
        for record in compare(&a, &b).diffs() {
            prop_assert!(record.line_number >= 1);
            match record.diff_type {
                DiffType::Removed => prop_assert!(record.line_number <= a_lines),
                DiffType::Added => prop_assert!(record.line_number <= b_lines),
                other => prop_assert!(false, "unexpected record type {:?}", other),
            }
        }
    }

    #[test]
    fn test_never_panics(a in any::<String>(), b in any::<String>()) {
        let _ = compare(&a, &b);
    }
}
