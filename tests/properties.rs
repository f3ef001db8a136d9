//! Property tests for the verification and diff engines.

use proptest::prelude::*;

use veracity::{diff_strings, expect_slice, expect_str};

proptest! {
    // Any permutation of a slice contains exactly its elements in any order.
    #[test]
    fn permutations_contain_exactly_in_any_order(values in proptest::collection::vec(-100i32..100, 0..12)) {
        let mut permuted = values.clone();
        permuted.reverse();
        if let Some(first) = permuted.first().copied() {
            permuted.remove(0);
            permuted.push(first);
        }
        if !values.is_empty() {
            expect_slice(&values).contains_exactly_in_any_order(&permuted);
        }
    }

    // A non-empty slice is a contiguous sequence of itself and is anchored
    // by its first and last elements.
    #[test]
    fn slice_contains_itself_as_sequence(values in proptest::collection::vec(any::<i16>(), 1..16)) {
        expect_slice(&values)
            .contains_sequence(&values)
            .starts_with(&[values[0]])
            .ends_with(&[*values.last().unwrap()]);
    }

    // Same inputs, same verdict and same text.
    #[test]
    fn verification_is_idempotent(
        actual in proptest::collection::vec(0i32..20, 0..8),
        expected in proptest::collection::vec(0i32..20, 1..8),
    ) {
        let first = expect_slice(&actual).try_contains(&expected);
        let second = expect_slice(&actual).try_contains(&expected);
        match (first, second) {
            (Ok(()), Ok(())) => {}
            (Err(a), Err(b)) => prop_assert_eq!(a.to_string(), b.to_string()),
            (a, b) => prop_assert!(false, "diverging outcomes: {:?} vs {:?}", a, b),
        }
    }

    // Empty and singleton slices are sorted under any comparison strategy.
    #[test]
    fn singletons_are_always_sorted(value in any::<i64>()) {
        expect_slice(&[value]).is_sorted();
        expect_slice(&[value])
            .using_comparator(|a: &i64, b: &i64| b.cmp(a))
            .is_sorted();
        expect_slice(&[] as &[i64]).is_sorted();
    }

    // Diffing a source against itself yields zero records.
    #[test]
    fn self_diff_is_empty(text in "(\\PC{0,40}\n){0,6}\\PC{0,40}") {
        prop_assert!(diff_strings(&text, &text).is_empty());
    }

    // Sorting then checking is_sorted always passes.
    #[test]
    fn sorted_input_passes_is_sorted(mut values in proptest::collection::vec(any::<i32>(), 0..32)) {
        values.sort();
        expect_slice(&values).is_sorted();
    }

    // A slice always contains every one of its own elements.
    #[test]
    fn slice_contains_each_of_its_elements(values in proptest::collection::vec(any::<u8>(), 1..16)) {
        for value in &values {
            expect_slice(&values).contains(&[*value]);
        }
    }
}

#[test]
fn equal_multiline_strings_compare_clean() {
    expect_str("a\nb\nc").is_equal_to("a\nb\nc");
}
