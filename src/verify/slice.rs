//! Reusable verification algorithms for slices.
//!
//! One verifier instance serves any element type the injected strategy can
//! compare. `actual` is always an `Option`: `None` stands for a missing
//! actual value and is reported as its own failure, distinct from every
//! content mismatch. Argument validation (empty expected-values, bad
//! ranges) happens before `actual` is touched and surfaces as
//! [`CheckError::Usage`].

use std::cmp::Ordering;

use crate::comparison::{ComparatorBasedComparisonStrategy, ComparisonStrategy};
use crate::error::{CheckError, CheckResult};
use crate::message;
use crate::representation::{to_text, Group, Represent, Representation};
use crate::verify::Index;

const VALUES_EMPTY: &str = "the values to look for should not be empty";
const SEQUENCE_EMPTY: &str = "the sequence to look for should not be empty";

/// Slice checks under one comparison strategy and one representation.
pub struct SliceVerifier<'a, S> {
    strategy: S,
    repr: &'a dyn Representation,
}

impl<'a, S> SliceVerifier<'a, S> {
    /// Build a verifier from its two collaborators.
    pub fn new(strategy: S, repr: &'a dyn Representation) -> Self {
        Self { strategy, repr }
    }

    /// The strategy description used in message suffixes.
    fn strategy_description<T>(&self) -> Option<&str>
    where
        S: ComparisonStrategy<T>,
    {
        ComparisonStrategy::<T>::description(&self.strategy)
    }
}

impl<'a, S> SliceVerifier<'a, S> {
    // =========================================================================
    // Containment
    // =========================================================================

    /// Fails unless every element of `values` appears in `actual`
    /// (order-independent). Reports the missing subset.
    pub fn assert_contains<T>(&self, actual: Option<&[T]>, values: &[T]) -> CheckResult
    where
        T: Represent,
        S: ComparisonStrategy<T>,
    {
        self.values_not_empty(values)?;
        let actual = self.actual_not_null(actual)?;
        let missing = self.missing_from(actual, values);
        if missing.is_empty() {
            return Ok(());
        }
        self.fail(message::should_contain(
            &Group(actual),
            &Group(values),
            &Group(&missing),
            self.strategy_description::<T>(),
            self.repr,
        ))
    }

    /// Fails unless `actual` contains every element of `values` and nothing
    /// else.
    pub fn assert_contains_only<T>(&self, actual: Option<&[T]>, values: &[T]) -> CheckResult
    where
        T: Represent,
        S: ComparisonStrategy<T>,
    {
        self.values_not_empty(values)?;
        let actual = self.actual_not_null(actual)?;
        let missing = self.missing_from(actual, values);
        let unexpected = self.missing_from(values, actual);
        if missing.is_empty() && unexpected.is_empty() {
            return Ok(());
        }
        self.fail(message::should_contain_only(
            &Group(actual),
            &Group(values),
            &Group(&missing),
            &Group(&unexpected),
            self.strategy_description::<T>(),
            self.repr,
        ))
    }

    /// Element-for-element equality, order included. A multiset mismatch
    /// reports missing and unexpected elements; a pure order mismatch
    /// reports the first differing index.
    pub fn assert_contains_exactly<T>(&self, actual: Option<&[T]>, values: &[T]) -> CheckResult
    where
        T: Represent,
        S: ComparisonStrategy<T>,
    {
        self.values_not_empty(values)?;
        let actual = self.actual_not_null(actual)?;
        let missing = self.multiset_difference(values, actual);
        let unexpected = self.multiset_difference(actual, values);
        if !missing.is_empty() || !unexpected.is_empty() {
            return self.fail(message::should_contain_exactly(
                &Group(actual),
                &Group(values),
                &Group(&missing),
                &Group(&unexpected),
                self.strategy_description::<T>(),
                self.repr,
            ));
        }
        // Same multiset, so same length; any difference left is order.
        for (index, (a, e)) in actual.iter().zip(values.iter()).enumerate() {
            if !self.strategy.are_equal(a, e) {
                return self.fail(message::elements_differ_at_index(
                    a,
                    e,
                    index,
                    self.strategy_description::<T>(),
                    self.repr,
                ));
            }
        }
        Ok(())
    }

    /// Multiset equality: same elements with same counts, in any order.
    pub fn assert_contains_exactly_in_any_order<T>(
        &self,
        actual: Option<&[T]>,
        values: &[T],
    ) -> CheckResult
    where
        T: Represent,
        S: ComparisonStrategy<T>,
    {
        self.values_not_empty(values)?;
        let actual = self.actual_not_null(actual)?;
        let missing = self.multiset_difference(values, actual);
        let unexpected = self.multiset_difference(actual, values);
        if missing.is_empty() && unexpected.is_empty() {
            return Ok(());
        }
        self.fail(message::should_contain_exactly_in_any_order(
            &Group(actual),
            &Group(values),
            &Group(&missing),
            &Group(&unexpected),
            self.strategy_description::<T>(),
            self.repr,
        ))
    }

    /// Fails if any requested value is missing or present more than once;
    /// both sets are reported separately.
    pub fn assert_contains_only_once<T>(&self, actual: Option<&[T]>, values: &[T]) -> CheckResult
    where
        T: Represent,
        S: ComparisonStrategy<T>,
    {
        self.values_not_empty(values)?;
        let actual = self.actual_not_null(actual)?;
        let mut not_found: Vec<&T> = Vec::new();
        let mut not_only_once: Vec<&T> = Vec::new();
        for value in self.distinct(values) {
            match actual
                .iter()
                .filter(|a| self.strategy.are_equal(a, value))
                .count()
            {
                0 => not_found.push(value),
                1 => {}
                _ => not_only_once.push(value),
            }
        }
        if not_found.is_empty() && not_only_once.is_empty() {
            return Ok(());
        }
        self.fail(message::should_contain_only_once(
            &Group(actual),
            &Group(values),
            &Group(&not_found),
            &Group(&not_only_once),
            self.strategy_description::<T>(),
            self.repr,
        ))
    }

    /// Fails if the intersection of `actual` and `values` is non-empty;
    /// reports the found subset.
    pub fn assert_does_not_contain<T>(&self, actual: Option<&[T]>, values: &[T]) -> CheckResult
    where
        T: Represent,
        S: ComparisonStrategy<T>,
    {
        self.values_not_empty(values)?;
        let actual = self.actual_not_null(actual)?;
        let found: Vec<&T> = self
            .distinct(values)
            .into_iter()
            .filter(|v| self.strategy.contains(actual, v))
            .collect();
        if found.is_empty() {
            return Ok(());
        }
        self.fail(message::should_not_contain(
            &Group(actual),
            &Group(values),
            &Group(&found),
            self.strategy_description::<T>(),
            self.repr,
        ))
    }

    /// Passes if at least one of `values` appears in `actual`.
    pub fn assert_contains_any_of<T>(&self, actual: Option<&[T]>, values: &[T]) -> CheckResult
    where
        T: Represent,
        S: ComparisonStrategy<T>,
    {
        self.values_not_empty(values)?;
        let actual = self.actual_not_null(actual)?;
        if values.iter().any(|v| self.strategy.contains(actual, v)) {
            return Ok(());
        }
        self.fail(message::should_contain_any_of(
            &Group(actual),
            &Group(values),
            self.strategy_description::<T>(),
            self.repr,
        ))
    }

    // =========================================================================
    // Sequences
    // =========================================================================

    /// The sequence must appear contiguously somewhere in `actual`.
    pub fn assert_contains_sequence<T>(&self, actual: Option<&[T]>, sequence: &[T]) -> CheckResult
    where
        T: Represent,
        S: ComparisonStrategy<T>,
    {
        self.sequence_not_empty(sequence)?;
        let actual = self.actual_not_null(actual)?;
        if self.find_sequence(actual, sequence).is_some() {
            return Ok(());
        }
        self.fail(message::should_contain_sequence(
            &Group(actual),
            &Group(sequence),
            self.strategy_description::<T>(),
            self.repr,
        ))
    }

    /// The subsequence's elements must appear in `actual` in the same
    /// relative order, gaps allowed.
    pub fn assert_contains_subsequence<T>(
        &self,
        actual: Option<&[T]>,
        subsequence: &[T],
    ) -> CheckResult
    where
        T: Represent,
        S: ComparisonStrategy<T>,
    {
        self.sequence_not_empty(subsequence)?;
        let actual = self.actual_not_null(actual)?;
        let mut wanted = subsequence.iter();
        let mut next = wanted.next();
        for element in actual {
            match next {
                Some(expected) if self.strategy.are_equal(element, expected) => {
                    next = wanted.next();
                }
                Some(_) => {}
                None => break,
            }
        }
        if next.is_none() {
            return Ok(());
        }
        self.fail(message::should_contain_subsequence(
            &Group(actual),
            &Group(subsequence),
            self.strategy_description::<T>(),
            self.repr,
        ))
    }

    /// The sequence check anchored at position 0.
    pub fn assert_starts_with<T>(&self, actual: Option<&[T]>, sequence: &[T]) -> CheckResult
    where
        T: Represent,
        S: ComparisonStrategy<T>,
    {
        self.sequence_not_empty(sequence)?;
        let actual = self.actual_not_null(actual)?;
        if sequence.len() <= actual.len() && self.matches_at(actual, sequence, 0) {
            return Ok(());
        }
        self.fail(message::should_start_with(
            &Group(actual),
            &Group(sequence),
            self.strategy_description::<T>(),
            self.repr,
        ))
    }

    /// The sequence check anchored at the tail.
    pub fn assert_ends_with<T>(&self, actual: Option<&[T]>, sequence: &[T]) -> CheckResult
    where
        T: Represent,
        S: ComparisonStrategy<T>,
    {
        self.sequence_not_empty(sequence)?;
        let actual = self.actual_not_null(actual)?;
        if sequence.len() <= actual.len()
            && self.matches_at(actual, sequence, actual.len() - sequence.len())
        {
            return Ok(());
        }
        self.fail(message::should_end_with(
            &Group(actual),
            &Group(sequence),
            self.strategy_description::<T>(),
            self.repr,
        ))
    }

    // =========================================================================
    // Duplicates and order
    // =========================================================================

    /// Fails if any group of mutually equal elements has two or more
    /// members; every group is reported.
    pub fn assert_does_not_have_duplicates<T>(&self, actual: Option<&[T]>) -> CheckResult
    where
        T: Represent,
        S: ComparisonStrategy<T>,
    {
        let actual = self.actual_not_null(actual)?;
        let groups = self.duplicate_groups(actual);
        if groups.is_empty() {
            return Ok(());
        }
        let rendered_groups = groups
            .iter()
            .map(|group| to_text(self.repr, &Group(group)))
            .collect::<Vec<_>>()
            .join(", ");
        self.fail(message::should_not_have_duplicates(
            &Group(actual),
            format!("[{}]", rendered_groups),
            self.strategy_description::<T>(),
            self.repr,
        ))
    }

    /// Single scan; fails at the first adjacent pair where the left element
    /// is greater than the right one under the strategy's ordering. Empty
    /// and singleton slices always pass.
    pub fn assert_is_sorted<T>(&self, actual: Option<&[T]>) -> CheckResult
    where
        T: Represent,
        S: ComparisonStrategy<T>,
    {
        let actual = self.actual_not_null(actual)?;
        match self.first_out_of_order(actual) {
            None => Ok(()),
            Some(index) => self.fail(message::should_be_sorted(index, &Group(actual), self.repr)),
        }
    }

    /// Like `assert_is_sorted` but under an ad-hoc comparator instead of
    /// this verifier's strategy.
    pub fn assert_is_sorted_according_to_comparator<T, F>(
        &self,
        actual: Option<&[T]>,
        comparator: F,
    ) -> CheckResult
    where
        T: Represent,
        F: Fn(&T, &T) -> Ordering,
    {
        let actual = self.actual_not_null(actual)?;
        let strategy = ComparatorBasedComparisonStrategy::new(comparator);
        let out_of_order = (1..actual.len())
            .find(|&i| strategy.is_greater_than(&actual[i - 1], &actual[i]))
            .map(|i| i - 1);
        match out_of_order {
            None => Ok(()),
            Some(index) => self.fail(message::should_be_sorted_according_to_comparator(
                index,
                &Group(actual),
                strategy.description(),
                self.repr,
            )),
        }
    }

    // =========================================================================
    // Positional checks
    // =========================================================================

    /// The element at `index` must equal `value`. The index is validated
    /// against the slice length before any comparison.
    pub fn assert_contains_at_index<T>(
        &self,
        actual: Option<&[T]>,
        value: &T,
        index: Index,
    ) -> CheckResult
    where
        T: Represent,
        S: ComparisonStrategy<T>,
    {
        let actual = self.actual_not_null(actual)?;
        if actual.is_empty() {
            return self.fail(message::should_not_be_empty());
        }
        self.index_in_bounds(index, actual.len())?;
        let found = &actual[index.value];
        if self.strategy.are_equal(found, value) {
            return Ok(());
        }
        self.fail(message::should_contain_at_index(
            &Group(actual),
            value,
            index.value,
            found,
            self.strategy_description::<T>(),
            self.repr,
        ))
    }

    /// The element at `index`, if any, must not equal `value`. An index
    /// beyond the slice trivially passes.
    pub fn assert_does_not_contain_at_index<T>(
        &self,
        actual: Option<&[T]>,
        value: &T,
        index: Index,
    ) -> CheckResult
    where
        T: Represent,
        S: ComparisonStrategy<T>,
    {
        let actual = self.actual_not_null(actual)?;
        if index.value >= actual.len() {
            return Ok(());
        }
        if !self.strategy.are_equal(&actual[index.value], value) {
            return Ok(());
        }
        self.fail(message::should_not_contain_at_index(
            &Group(actual),
            value,
            index.value,
            self.strategy_description::<T>(),
            self.repr,
        ))
    }

    // =========================================================================
    // Size
    // =========================================================================

    pub fn assert_empty<T>(&self, actual: Option<&[T]>) -> CheckResult
    where
        T: Represent,
    {
        let actual = self.actual_not_null(actual)?;
        if actual.is_empty() {
            return Ok(());
        }
        self.fail(message::should_be_empty(&Group(actual), self.repr))
    }

    pub fn assert_not_empty<T>(&self, actual: Option<&[T]>) -> CheckResult
    where
        T: Represent,
    {
        let actual = self.actual_not_null(actual)?;
        if !actual.is_empty() {
            return Ok(());
        }
        self.fail(message::should_not_be_empty())
    }

    /// Passes for a missing actual as well as for an empty one.
    pub fn assert_null_or_empty<T>(&self, actual: Option<&[T]>) -> CheckResult
    where
        T: Represent,
    {
        match actual {
            None => Ok(()),
            Some([]) => Ok(()),
            Some(actual) => {
                self.fail(message::should_be_null_or_empty(&Group(actual), self.repr))
            }
        }
    }

    pub fn assert_has_size<T>(&self, actual: Option<&[T]>, expected: usize) -> CheckResult
    where
        T: Represent,
    {
        let actual = self.actual_not_null(actual)?;
        if actual.len() == expected {
            return Ok(());
        }
        self.fail(message::should_have_size(
            &Group(actual),
            actual.len(),
            expected,
            self.repr,
        ))
    }

    pub fn assert_has_size_greater_than<T>(
        &self,
        actual: Option<&[T]>,
        boundary: usize,
    ) -> CheckResult
    where
        T: Represent,
    {
        self.assert_size_comparison(actual, boundary, "greater than", |size| size > boundary)
    }

    pub fn assert_has_size_greater_than_or_equal_to<T>(
        &self,
        actual: Option<&[T]>,
        boundary: usize,
    ) -> CheckResult
    where
        T: Represent,
    {
        self.assert_size_comparison(actual, boundary, "greater than or equal to", |size| {
            size >= boundary
        })
    }

    pub fn assert_has_size_less_than<T>(&self, actual: Option<&[T]>, boundary: usize) -> CheckResult
    where
        T: Represent,
    {
        self.assert_size_comparison(actual, boundary, "less than", |size| size < boundary)
    }

    pub fn assert_has_size_less_than_or_equal_to<T>(
        &self,
        actual: Option<&[T]>,
        boundary: usize,
    ) -> CheckResult
    where
        T: Represent,
    {
        self.assert_size_comparison(actual, boundary, "less than or equal to", |size| {
            size <= boundary
        })
    }

    /// Inclusive on both ends. `lower > higher` is a usage error.
    pub fn assert_has_size_between<T>(
        &self,
        actual: Option<&[T]>,
        lower: usize,
        higher: usize,
    ) -> CheckResult
    where
        T: Represent,
    {
        if lower > higher {
            return Err(CheckError::usage(format!(
                "the lower boundary <{}> must not be greater than the higher boundary <{}>",
                lower, higher
            )));
        }
        let actual = self.actual_not_null(actual)?;
        let size = actual.len();
        if size >= lower && size <= higher {
            return Ok(());
        }
        self.fail(message::should_have_size_between(
            &Group(actual),
            size,
            lower,
            higher,
            self.repr,
        ))
    }

    pub fn assert_has_same_size_as<T, U>(
        &self,
        actual: Option<&[T]>,
        other: &[U],
    ) -> CheckResult
    where
        T: Represent,
    {
        let actual = self.actual_not_null(actual)?;
        if actual.len() == other.len() {
            return Ok(());
        }
        self.fail(message::should_have_same_size_as(
            &Group(actual),
            actual.len(),
            other.len(),
            self.repr,
        ))
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    fn fail(&self, factory: message::ErrorMessageFactory) -> CheckResult {
        Err(CheckError::AssertionFailed(factory.create()))
    }

    fn actual_not_null<'t, T>(&self, actual: Option<&'t [T]>) -> Result<&'t [T], CheckError> {
        actual.ok_or_else(|| CheckError::AssertionFailed(message::actual_is_null()))
    }

    fn values_not_empty<T>(&self, values: &[T]) -> CheckResult {
        if values.is_empty() {
            return Err(CheckError::usage(VALUES_EMPTY));
        }
        Ok(())
    }

    fn sequence_not_empty<T>(&self, sequence: &[T]) -> CheckResult {
        if sequence.is_empty() {
            return Err(CheckError::usage(SEQUENCE_EMPTY));
        }
        Ok(())
    }

    fn index_in_bounds(&self, index: Index, len: usize) -> CheckResult {
        if index.value >= len {
            return Err(CheckError::usage(format!(
                "index should be between <0> and <{}> (inclusive) but was <{}>",
                len.saturating_sub(1),
                index.value
            )));
        }
        Ok(())
    }

    /// Elements of `values` with no match in `candidates`, first
    /// occurrences only, in `values` order.
    fn missing_from<'t, T>(&self, candidates: &[T], values: &'t [T]) -> Vec<&'t T>
    where
        S: ComparisonStrategy<T>,
    {
        let mut missing: Vec<&T> = Vec::new();
        for value in values {
            if self.strategy.contains(candidates, value) {
                continue;
            }
            if !missing.iter().any(|m| self.strategy.are_equal(m, value)) {
                missing.push(value);
            }
        }
        missing
    }

    /// Multiset difference `from \ remove`: each element of `remove`
    /// cancels at most one equal element of `from`.
    fn multiset_difference<'t, T>(&self, from: &'t [T], remove: &[T]) -> Vec<&'t T>
    where
        S: ComparisonStrategy<T>,
    {
        let mut used = vec![false; remove.len()];
        let mut difference: Vec<&T> = Vec::new();
        for item in from {
            let matched = remove
                .iter()
                .enumerate()
                .find(|(i, r)| !used[*i] && self.strategy.are_equal(item, r))
                .map(|(i, _)| i);
            match matched {
                Some(i) => used[i] = true,
                None => difference.push(item),
            }
        }
        difference
    }

    /// First occurrences of `values` under the strategy's equality.
    fn distinct<'t, T>(&self, values: &'t [T]) -> Vec<&'t T>
    where
        S: ComparisonStrategy<T>,
    {
        let mut seen: Vec<&T> = Vec::new();
        for value in values {
            if !seen.iter().any(|s| self.strategy.are_equal(s, value)) {
                seen.push(value);
            }
        }
        seen
    }

    /// Groups of mutually equal elements with two or more members, in
    /// first-occurrence order.
    fn duplicate_groups<'t, T>(&self, actual: &'t [T]) -> Vec<Vec<&'t T>>
    where
        S: ComparisonStrategy<T>,
    {
        let mut grouped = vec![false; actual.len()];
        let mut groups: Vec<Vec<&T>> = Vec::new();
        for (i, element) in actual.iter().enumerate() {
            if grouped[i] {
                continue;
            }
            let mut group = vec![element];
            for (j, candidate) in actual.iter().enumerate().skip(i + 1) {
                if !grouped[j] && self.strategy.are_equal(element, candidate) {
                    grouped[j] = true;
                    group.push(candidate);
                }
            }
            if group.len() > 1 {
                groups.push(group);
            }
        }
        groups
    }

    fn find_sequence<T>(&self, actual: &[T], sequence: &[T]) -> Option<usize>
    where
        S: ComparisonStrategy<T>,
    {
        if sequence.len() > actual.len() {
            return None;
        }
        (0..=actual.len() - sequence.len()).find(|&start| self.matches_at(actual, sequence, start))
    }

    fn matches_at<T>(&self, actual: &[T], sequence: &[T], start: usize) -> bool
    where
        S: ComparisonStrategy<T>,
    {
        sequence
            .iter()
            .enumerate()
            .all(|(i, expected)| self.strategy.are_equal(&actual[start + i], expected))
    }

    fn first_out_of_order<T>(&self, actual: &[T]) -> Option<usize>
    where
        S: ComparisonStrategy<T>,
    {
        (1..actual.len())
            .find(|&i| self.strategy.is_greater_than(&actual[i - 1], &actual[i]))
            .map(|i| i - 1)
    }

    fn assert_size_comparison<T>(
        &self,
        actual: Option<&[T]>,
        boundary: usize,
        relation: &str,
        holds: impl Fn(usize) -> bool,
    ) -> CheckResult
    where
        T: Represent,
    {
        let actual = self.actual_not_null(actual)?;
        if holds(actual.len()) {
            return Ok(());
        }
        self.fail(message::should_have_size_comparison(
            &Group(actual),
            actual.len(),
            relation,
            boundary,
            self.repr,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::StandardComparisonStrategy;
    use crate::representation::StandardRepresentation;
    use crate::verify::at_index;

    const REPR: StandardRepresentation = StandardRepresentation;

    fn standard<'a>() -> SliceVerifier<'a, StandardComparisonStrategy> {
        SliceVerifier::new(StandardComparisonStrategy, &REPR)
    }

    fn by_abs<'a>() -> SliceVerifier<
        'a,
        ComparatorBasedComparisonStrategy<i32, fn(&i32, &i32) -> Ordering>,
    > {
        fn compare(a: &i32, b: &i32) -> Ordering {
            a.abs().cmp(&b.abs())
        }
        SliceVerifier::new(
            ComparatorBasedComparisonStrategy::new(compare as fn(&i32, &i32) -> Ordering)
                .named("absolute value"),
            &REPR,
        )
    }

    fn failure_message(result: CheckResult) -> String {
        match result {
            Err(CheckError::AssertionFailed(message)) => message,
            other => panic!("expected an assertion failure, got {:?}", other),
        }
    }

    #[test]
    fn contains_passes_in_any_order() {
        let verifier = standard();
        verifier
            .assert_contains(Some(&[6, 8, 10]), &[10, 6])
            .unwrap();
    }

    #[test]
    fn contains_reports_the_missing_subset() {
        let message = failure_message(standard().assert_contains(Some(&[6, 8, 10]), &[6, 20, 30]));
        assert!(message.contains("<[6, 8, 10]>"));
        assert!(message.contains("but could not find\n  <[20, 30]>"));
    }

    #[test]
    fn contains_with_empty_values_is_a_usage_error() {
        let result = standard().assert_contains(Some(&[6, 8, 10]), &[]);
        assert!(matches!(result, Err(CheckError::Usage(_))));
    }

    #[test]
    fn usage_errors_are_raised_before_actual_is_inspected() {
        let result = standard().assert_contains::<i32>(None, &[]);
        assert!(matches!(result, Err(CheckError::Usage(_))));
    }

    #[test]
    fn missing_actual_is_its_own_failure() {
        let message = failure_message(standard().assert_contains(None, &[1]));
        assert_eq!(message, "\nExpecting actual not to be null");
    }

    #[test]
    fn contains_only_reports_missing_and_unexpected() {
        let message =
            failure_message(standard().assert_contains_only(Some(&[6, 8, 10]), &[6, 20]));
        assert!(message.contains("elements not found\n  <[20]>"));
        assert!(message.contains("elements not expected\n  <[8, 10]>"));
    }

    #[test]
    fn contains_only_ignores_duplicates() {
        standard()
            .assert_contains_only(Some(&[6, 6, 8]), &[8, 6])
            .unwrap();
    }

    #[test]
    fn contains_exactly_checks_order() {
        let verifier = standard();
        verifier
            .assert_contains_exactly(Some(&[1, 2, 3]), &[1, 2, 3])
            .unwrap();
        let message = failure_message(verifier.assert_contains_exactly(Some(&[1, 3, 2]), &[1, 2, 3]));
        assert!(message.contains("at index 1"));
    }

    #[test]
    fn contains_exactly_reports_multiset_mismatch() {
        let message =
            failure_message(standard().assert_contains_exactly(Some(&[1, 2, 2]), &[1, 2, 3]));
        assert!(message.contains("not found\n  <[3]>"));
        assert!(message.contains("not expected\n  <[2]>"));
    }

    #[test]
    fn contains_exactly_in_any_order_accepts_permutations() {
        standard()
            .assert_contains_exactly_in_any_order(Some(&[3, 1, 2]), &[1, 2, 3])
            .unwrap();
    }

    #[test]
    fn contains_exactly_in_any_order_respects_counts() {
        let result =
            standard().assert_contains_exactly_in_any_order(Some(&[1, 1, 2]), &[1, 2, 2]);
        assert!(result.is_err());
    }

    #[test]
    fn contains_only_once_reports_not_found_and_duplicates() {
        // Short array: 20 is not found, nothing is duplicated.
        let message =
            failure_message(standard().assert_contains_only_once(Some(&[6, 8, 10]), &[6, 8, 20]));
        assert!(message.contains("were not found\n  <[20]>"));
        assert!(message.contains("more than once\n  <[]>"));
    }

    #[test]
    fn contains_only_once_under_absolute_value_strategy() {
        let actual = [6, -8, 10, -6, -8, 10, -8, 6];
        let message =
            failure_message(by_abs().assert_contains_only_once(Some(&actual), &[6, -8, 20]));
        assert!(message.contains("were not found\n  <[20]>"));
        assert!(message.contains("more than once\n  <[6, -8]>"));
        assert!(message.ends_with("when comparing values using absolute value"));
    }

    #[test]
    fn sequence_must_be_contiguous() {
        let verifier = standard();
        verifier
            .assert_contains_sequence(Some(&[1, 2, 3, 4]), &[2, 3])
            .unwrap();
        assert!(verifier
            .assert_contains_sequence(Some(&[1, 2, 3, 4]), &[2, 4])
            .is_err());
    }

    #[test]
    fn whole_slice_is_a_sequence_of_itself() {
        standard()
            .assert_contains_sequence(Some(&[1, 2, 3]), &[1, 2, 3])
            .unwrap();
    }

    #[test]
    fn subsequence_allows_gaps_but_not_reordering() {
        let verifier = standard();
        verifier
            .assert_contains_subsequence(Some(&[1, 2, 3, 4]), &[1, 3])
            .unwrap();
        assert!(verifier
            .assert_contains_subsequence(Some(&[1, 2, 3, 4]), &[3, 1])
            .is_err());
    }

    #[test]
    fn starts_with_anchors_at_zero() {
        let verifier = standard();
        verifier.assert_starts_with(Some(&[1, 2, 3]), &[1]).unwrap();
        assert!(verifier.assert_starts_with(Some(&[1, 2, 3]), &[2]).is_err());
    }

    #[test]
    fn ends_with_anchors_at_the_tail() {
        let verifier = standard();
        verifier.assert_ends_with(Some(&[1, 2, 3]), &[3]).unwrap();
        verifier.assert_ends_with(Some(&[1, 2, 3]), &[2, 3]).unwrap();
        assert!(verifier.assert_ends_with(Some(&[1, 2, 3]), &[1]).is_err());
    }

    #[test]
    fn sequence_longer_than_actual_fails() {
        assert!(standard()
            .assert_starts_with(Some(&[1]), &[1, 2])
            .is_err());
        assert!(standard()
            .assert_contains_sequence(Some(&[1]), &[1, 2])
            .is_err());
    }

    #[test]
    fn does_not_contain_reports_the_found_subset() {
        let message =
            failure_message(standard().assert_does_not_contain(Some(&[6, 8, 10]), &[8, 20]));
        assert!(message.contains("but found\n  <[8]>"));
    }

    #[test]
    fn duplicates_are_reported_as_groups() {
        let message =
            failure_message(standard().assert_does_not_have_duplicates(Some(&[1, 2, 1, 3, 2, 1])));
        assert!(message.contains("[[1, 1, 1], [2, 2]]"));
    }

    #[test]
    fn duplicates_respect_the_comparison_strategy() {
        assert!(by_abs()
            .assert_does_not_have_duplicates(Some(&[6, -6]))
            .is_err());
        by_abs()
            .assert_does_not_have_duplicates(Some(&[6, 8, 10]))
            .unwrap();
    }

    #[test]
    fn is_sorted_reports_the_first_out_of_order_index() {
        let message = failure_message(standard().assert_is_sorted(Some(&[1.0f32, 3.0, 2.0])));
        assert!(message.contains("index 1"));
    }

    #[test]
    fn is_sorted_accepts_equal_neighbors() {
        standard()
            .assert_is_sorted(Some(&[1, 2, 2, 3]))
            .unwrap();
    }

    #[test]
    fn empty_and_singleton_slices_are_always_sorted() {
        let verifier = standard();
        verifier.assert_is_sorted(Some(&[] as &[i32])).unwrap();
        verifier.assert_is_sorted(Some(&[7])).unwrap();
    }

    // Values with no order between them make no sortedness claim: the scan
    // never sees a "greater than" pair, so the check passes.
    #[test]
    fn unordered_values_claim_no_order() {
        standard()
            .assert_is_sorted(Some(&[1.0f64, f64::NAN, 0.0]))
            .unwrap();
    }

    #[test]
    fn sorted_according_to_comparator_uses_that_comparator() {
        let verifier = standard();
        verifier
            .assert_is_sorted_according_to_comparator(Some(&[3, 2, 1]), |a: &i32, b: &i32| {
                b.cmp(a)
            })
            .unwrap();
        assert!(verifier
            .assert_is_sorted_according_to_comparator(Some(&[1, 2, 3]), |a: &i32, b: &i32| {
                b.cmp(a)
            })
            .is_err());
    }

    #[test]
    fn contains_at_index_validates_the_index_first() {
        let result = standard().assert_contains_at_index(Some(&[6, 8]), &8, at_index(5));
        assert!(matches!(result, Err(CheckError::Usage(_))));
    }

    #[test]
    fn contains_at_index_compares_the_element() {
        let verifier = standard();
        verifier
            .assert_contains_at_index(Some(&[6, 8]), &8, at_index(1))
            .unwrap();
        let message = failure_message(verifier.assert_contains_at_index(
            Some(&[6, 8]),
            &8,
            at_index(0),
        ));
        assert!(message.contains("at index <0> but found\n  <6>"));
    }

    #[test]
    fn does_not_contain_at_index_passes_out_of_bounds() {
        standard()
            .assert_does_not_contain_at_index(Some(&[6, 8]), &8, at_index(9))
            .unwrap();
        assert!(standard()
            .assert_does_not_contain_at_index(Some(&[6, 8]), &8, at_index(1))
            .is_err());
    }

    #[test]
    fn size_checks() {
        let verifier = standard();
        verifier.assert_has_size(Some(&[1, 2, 3]), 3).unwrap();
        assert!(verifier.assert_has_size(Some(&[1, 2, 3]), 2).is_err());
        verifier
            .assert_has_size_greater_than(Some(&[1, 2, 3]), 2)
            .unwrap();
        verifier
            .assert_has_size_less_than_or_equal_to(Some(&[1, 2, 3]), 3)
            .unwrap();
        verifier
            .assert_has_size_between(Some(&[1, 2, 3]), 2, 4)
            .unwrap();
        assert!(verifier
            .assert_has_size_between(Some(&[1]), 2, 4)
            .is_err());
        verifier
            .assert_has_same_size_as(Some(&[1, 2]), &["a", "b"])
            .unwrap();
    }

    #[test]
    fn size_between_with_inverted_bounds_is_a_usage_error() {
        let result = standard().assert_has_size_between(Some(&[1]), 4, 2);
        assert!(matches!(result, Err(CheckError::Usage(_))));
    }

    #[test]
    fn emptiness_checks() {
        let verifier = standard();
        verifier.assert_empty(Some(&[] as &[i32])).unwrap();
        assert!(verifier.assert_empty(Some(&[1])).is_err());
        verifier.assert_not_empty(Some(&[1])).unwrap();
        verifier.assert_null_or_empty(None::<&[i32]>).unwrap();
        verifier.assert_null_or_empty(Some(&[] as &[i32])).unwrap();
        assert!(verifier.assert_null_or_empty(Some(&[1])).is_err());
    }

    #[test]
    fn identical_inputs_give_identical_outcomes_and_text() {
        let first = failure_message(standard().assert_contains(Some(&[1, 2]), &[3]));
        let second = failure_message(standard().assert_contains(Some(&[1, 2]), &[3]));
        assert_eq!(first, second);
    }
}
