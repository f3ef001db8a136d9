//! Reusable verification algorithms for maps.

use std::collections::{BTreeMap, HashMap};

use crate::comparison::ComparisonStrategy;
use crate::error::{CheckError, CheckResult};
use crate::message;
use crate::representation::{Group, Represent, Representation};

const KEYS_EMPTY: &str = "the keys to look for should not be empty";
const VALUES_EMPTY: &str = "the values to look for should not be empty";
const ENTRIES_EMPTY: &str = "the entries to look for should not be empty";

/// Read access the map checks need. Implemented for the std maps so one
/// verifier serves both `HashMap` and `BTreeMap`.
pub trait MapLike {
    type Key: Represent;
    type Value: Represent;

    fn size(&self) -> usize;
    fn entries(&self) -> Vec<(&Self::Key, &Self::Value)>;
}

impl<K: Represent, V: Represent, H> MapLike for HashMap<K, V, H> {
    type Key = K;
    type Value = V;

    fn size(&self) -> usize {
        self.len()
    }

    fn entries(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }
}

impl<K: Represent, V: Represent> MapLike for BTreeMap<K, V> {
    type Key = K;
    type Value = V;

    fn size(&self) -> usize {
        self.len()
    }

    fn entries(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }
}

/// Map checks under one comparison strategy and one representation.
///
/// The strategy applies to whichever side a check compares: keys for key
/// checks, values for value checks, both for entry checks.
pub struct MapVerifier<'a, S> {
    strategy: S,
    repr: &'a dyn Representation,
}

impl<'a, S> MapVerifier<'a, S> {
    pub fn new(strategy: S, repr: &'a dyn Representation) -> Self {
        Self { strategy, repr }
    }

    /// Fails unless every key in `keys` is present. Missing keys are
    /// reported as a set.
    pub fn assert_contains_keys<M>(&self, actual: Option<&M>, keys: &[M::Key]) -> CheckResult
    where
        M: MapLike + Represent,
        S: ComparisonStrategy<M::Key>,
    {
        if keys.is_empty() {
            return Err(CheckError::usage(KEYS_EMPTY));
        }
        let actual = self.actual_not_null(actual)?;
        let present: Vec<&M::Key> = actual.entries().into_iter().map(|(k, _)| k).collect();
        let missing: Vec<&M::Key> = keys
            .iter()
            .filter(|key| !present.iter().any(|p| self.strategy.are_equal(p, key)))
            .collect();
        if missing.is_empty() {
            return Ok(());
        }
        Err(CheckError::AssertionFailed(
            message::should_contain_keys(actual, &Group(&missing), self.repr).create(),
        ))
    }

    /// Fails unless every value in `values` is present somewhere in the
    /// map. Missing values are reported as a set.
    pub fn assert_contains_values<M>(&self, actual: Option<&M>, values: &[M::Value]) -> CheckResult
    where
        M: MapLike + Represent,
        S: ComparisonStrategy<M::Value>,
    {
        if values.is_empty() {
            return Err(CheckError::usage(VALUES_EMPTY));
        }
        let actual = self.actual_not_null(actual)?;
        let present: Vec<&M::Value> = actual.entries().into_iter().map(|(_, v)| v).collect();
        let missing: Vec<&M::Value> = values
            .iter()
            .filter(|value| !present.iter().any(|p| self.strategy.are_equal(p, value)))
            .collect();
        if missing.is_empty() {
            return Ok(());
        }
        Err(CheckError::AssertionFailed(
            message::should_contain_values(actual, &Group(&missing), self.repr).create(),
        ))
    }

    /// Fails unless every `(key, value)` pair is present: the key must
    /// exist and map to an equal value.
    pub fn assert_contains_entries<M>(
        &self,
        actual: Option<&M>,
        expected: &[(M::Key, M::Value)],
    ) -> CheckResult
    where
        M: MapLike + Represent,
        S: ComparisonStrategy<M::Key> + ComparisonStrategy<M::Value>,
    {
        if expected.is_empty() {
            return Err(CheckError::usage(ENTRIES_EMPTY));
        }
        let actual = self.actual_not_null(actual)?;
        let entries = actual.entries();
        let missing: Vec<Entry<'_, M>> = expected
            .iter()
            .filter(|(key, value)| {
                !entries.iter().any(|(k, v)| {
                    self.strategy.are_equal(*k, key) && self.strategy.are_equal(*v, value)
                })
            })
            .map(|(key, value)| Entry { key, value })
            .collect();
        if missing.is_empty() {
            return Ok(());
        }
        Err(CheckError::AssertionFailed(
            message::should_contain_entries(actual, &Group(&missing), self.repr).create(),
        ))
    }

    pub fn assert_has_size<M>(&self, actual: Option<&M>, expected: usize) -> CheckResult
    where
        M: MapLike + Represent,
    {
        let actual = self.actual_not_null(actual)?;
        if actual.size() == expected {
            return Ok(());
        }
        Err(CheckError::AssertionFailed(
            message::should_have_size(actual, actual.size(), expected, self.repr).create(),
        ))
    }

    pub fn assert_empty<M>(&self, actual: Option<&M>) -> CheckResult
    where
        M: MapLike + Represent,
    {
        let actual = self.actual_not_null(actual)?;
        if actual.size() == 0 {
            return Ok(());
        }
        Err(CheckError::AssertionFailed(
            message::should_be_empty(actual, self.repr).create(),
        ))
    }

    pub fn assert_not_empty<M>(&self, actual: Option<&M>) -> CheckResult
    where
        M: MapLike + Represent,
    {
        let actual = self.actual_not_null(actual)?;
        if actual.size() > 0 {
            return Ok(());
        }
        Err(CheckError::AssertionFailed(
            message::should_not_be_empty().create(),
        ))
    }

    fn actual_not_null<'m, M>(&self, actual: Option<&'m M>) -> Result<&'m M, CheckError> {
        actual.ok_or_else(|| CheckError::AssertionFailed(message::actual_is_null()))
    }
}

/// One expected entry, rendered as `key=value` inside failure messages.
struct Entry<'e, M: MapLike> {
    key: &'e M::Key,
    value: &'e M::Value,
}

impl<M: MapLike> Represent for Entry<'_, M> {
    fn render(&self, renderer: &mut crate::representation::Renderer<'_>) {
        renderer.entry(self.key, self.value)
    }
}
