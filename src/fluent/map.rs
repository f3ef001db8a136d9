//! Fluent assertion builder for maps.

use std::cmp::Ordering;

use crate::comparison::{
    ComparatorBasedComparisonStrategy, ComparisonStrategy, StandardComparisonStrategy,
};
use crate::error::CheckResult;
use crate::representation::{Represent, Representation, StandardRepresentation};
use crate::verify::{MapLike, MapVerifier};

use super::unwrap_check;

/// Create an expectation on a map (`HashMap` or `BTreeMap`).
///
/// # Example
///
/// ```rust,ignore
/// use veracity::expect_map;
///
/// expect_map(&ages)
///     .contains_keys(&["alice".to_string()])
///     .contains_values(&[31]);
/// ```
pub fn expect_map<M: MapLike>(actual: &M) -> MapAssert<'_, M> {
    MapAssert {
        actual: Some(actual),
        strategy: StandardComparisonStrategy,
        repr: Box::new(StandardRepresentation),
    }
}

/// Builder for assertions on a map.
pub struct MapAssert<'a, M, S = StandardComparisonStrategy> {
    actual: Option<&'a M>,
    strategy: S,
    repr: Box<dyn Representation + 'a>,
}

impl<'a, M, S> MapAssert<'a, M, S>
where
    M: MapLike + Represent,
{
    /// Compare keys and values with the given comparator. The comparator
    /// applies to whichever side an assertion checks.
    pub fn using_comparator<V, F>(
        self,
        comparator: F,
    ) -> MapAssert<'a, M, ComparatorBasedComparisonStrategy<V, F>>
    where
        F: Fn(&V, &V) -> Ordering,
    {
        MapAssert {
            actual: self.actual,
            strategy: ComparatorBasedComparisonStrategy::new(comparator),
            repr: self.repr,
        }
    }

    /// Render values in failure messages with the given representation;
    /// combine with
    /// [`MapRepresentation`](crate::representation::MapRepresentation) to
    /// highlight unequal entries.
    pub fn using_representation(mut self, repr: impl Representation + 'a) -> Self {
        self.repr = Box::new(repr);
        self
    }

    fn verifier(&self) -> MapVerifier<'_, &S> {
        MapVerifier::new(&self.strategy, self.repr.as_ref())
    }

    // =========================================================================
    // Assertion methods (panic on failure)
    // =========================================================================

    /// Assert every given key is present.
    pub fn contains_keys(&self, keys: &[M::Key]) -> &Self
    where
        S: ComparisonStrategy<M::Key>,
    {
        unwrap_check(self.try_contains_keys(keys));
        self
    }

    /// Assert every given value is present; missing values are reported as
    /// a set.
    pub fn contains_values(&self, values: &[M::Value]) -> &Self
    where
        S: ComparisonStrategy<M::Value>,
    {
        unwrap_check(self.try_contains_values(values));
        self
    }

    /// Assert every given `(key, value)` entry is present.
    pub fn contains_entries(&self, entries: &[(M::Key, M::Value)]) -> &Self
    where
        S: ComparisonStrategy<M::Key> + ComparisonStrategy<M::Value>,
    {
        unwrap_check(self.try_contains_entries(entries));
        self
    }

    /// Assert the map holds exactly `expected` entries.
    pub fn has_size(&self, expected: usize) -> &Self {
        unwrap_check(self.try_has_size(expected));
        self
    }

    pub fn is_empty(&self) -> &Self {
        unwrap_check(self.try_is_empty());
        self
    }

    pub fn is_not_empty(&self) -> &Self {
        unwrap_check(self.try_is_not_empty());
        self
    }

    // =========================================================================
    // Non-panicking evaluation
    // =========================================================================

    pub fn try_contains_keys(&self, keys: &[M::Key]) -> CheckResult
    where
        S: ComparisonStrategy<M::Key>,
    {
        self.verifier().assert_contains_keys(self.actual, keys)
    }

    pub fn try_contains_values(&self, values: &[M::Value]) -> CheckResult
    where
        S: ComparisonStrategy<M::Value>,
    {
        self.verifier().assert_contains_values(self.actual, values)
    }

    pub fn try_contains_entries(&self, entries: &[(M::Key, M::Value)]) -> CheckResult
    where
        S: ComparisonStrategy<M::Key> + ComparisonStrategy<M::Value>,
    {
        self.verifier().assert_contains_entries(self.actual, entries)
    }

    pub fn try_has_size(&self, expected: usize) -> CheckResult {
        self.verifier().assert_has_size(self.actual, expected)
    }

    pub fn try_is_empty(&self) -> CheckResult {
        self.verifier().assert_empty(self.actual)
    }

    pub fn try_is_not_empty(&self) -> CheckResult {
        self.verifier().assert_not_empty(self.actual)
    }
}
