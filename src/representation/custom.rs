//! User-registered per-type formatting overrides.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use super::Representation;

type FormatFn = Box<dyn Fn(&dyn Any) -> Option<String> + Send + Sync>;

/// A rendering policy with per-type overrides.
///
/// Overrides are looked up by the exact runtime type of the value, before
/// any default rendering runs; values of unregistered types fall back to the
/// standard rules.
///
/// # Example
///
/// ```rust,ignore
/// let repr = CustomRepresentation::new()
///     .with(|n: &f64| format!("{n:.2}"))
///     .with(|s: &String| format!("<{s}>"));
/// ```
#[derive(Default)]
pub struct CustomRepresentation {
    overrides: HashMap<TypeId, FormatFn>,
}

impl CustomRepresentation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an override for values of type `T`. Replaces any previous
    /// override for the same type.
    pub fn with<T, F>(mut self, format: F) -> Self
    where
        T: Any,
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.overrides.insert(
            TypeId::of::<T>(),
            Box::new(move |any| any.downcast_ref::<T>().map(&format)),
        );
        self
    }
}

impl Representation for CustomRepresentation {
    fn override_for(&self, value: &dyn Any) -> Option<String> {
        self.overrides
            .get(&value.type_id())
            .and_then(|format| format(value))
    }
}
