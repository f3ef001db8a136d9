//! The `Represent` trait and its implementations for common value shapes.

use std::any::Any;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use super::Representation;

/// A value the representation engine can render.
///
/// Implementations write themselves through the [`Renderer`], which carries
/// the active [`Representation`] (for per-type overrides and map-entry
/// decoration) and the set of shared containers currently being rendered
/// (for cycle cut-off).
pub trait Represent {
    /// Write this value's display text.
    fn render(&self, renderer: &mut Renderer<'_>);

    /// Placeholder emitted when this value turns out to be its own ancestor
    /// in the render tree.
    fn cycle_token(&self) -> &'static str {
        "(this Collection)"
    }

    /// The value as `Any`, for exact-type override lookup. Only leaf values
    /// with a `'static` type participate; containers return `None`.
    fn as_any(&self) -> Option<&dyn Any> {
        None
    }
}

/// Rendering state: output buffer, active representation, and the addresses
/// of the shared containers currently on the render stack.
pub struct Renderer<'a> {
    repr: &'a dyn Representation,
    visited: Vec<usize>,
    out: String,
}

impl<'a> Renderer<'a> {
    pub fn new(repr: &'a dyn Representation) -> Self {
        Self {
            repr,
            visited: Vec::new(),
            out: String::new(),
        }
    }

    /// Render one value, consulting the representation's per-type override
    /// first.
    pub fn value(&mut self, value: &dyn Represent) {
        if let Some(any) = value.as_any() {
            if let Some(text) = self.repr.override_for(any) {
                self.out.push_str(&text);
                return;
            }
        }
        value.render(self);
    }

    /// Append literal text.
    pub fn push(&mut self, text: &str) {
        self.out.push_str(text);
    }

    /// Render `value` and return its text instead of appending it.
    /// Cycle state is shared with the surrounding render.
    pub fn capture(&mut self, value: &dyn Represent) -> String {
        let mark = self.out.len();
        self.value(value);
        self.out.split_off(mark)
    }

    /// Render one map entry through the representation's entry hook.
    pub fn entry(&mut self, key: &dyn Represent, value: &dyn Represent) {
        let key_text = self.capture(key);
        let value_text = self.capture(value);
        let entry = self.repr.format_entry(&key_text, &value_text);
        self.out.push_str(&entry);
    }

    /// Track a shared container; `false` means it is already being rendered
    /// and the caller must emit its cycle token instead of recursing.
    pub fn enter(&mut self, address: usize) -> bool {
        if self.visited.contains(&address) {
            return false;
        }
        self.visited.push(address);
        true
    }

    /// Forget a shared container once its render completes.
    pub fn leave(&mut self, address: usize) {
        if let Some(position) = self.visited.iter().rposition(|&a| a == address) {
            self.visited.remove(position);
        }
    }

    pub fn finish(self) -> String {
        self.out
    }
}

/// Renders a borrowed slice as `[a, b, c]`. The engines use this to put
/// element groups (missing values, duplicates, sequences) into messages.
pub struct Group<'t, T>(pub &'t [T]);

impl<T: Represent> Represent for Group<'_, T> {
    fn render(&self, renderer: &mut Renderer<'_>) {
        renderer.push("[");
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                renderer.push(", ");
            }
            renderer.value(item);
        }
        renderer.push("]");
    }
}

// Scalars render through their Debug form, which is already the natural
// textual form for numbers and booleans.
macro_rules! represent_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Represent for $ty {
                fn render(&self, renderer: &mut Renderer<'_>) {
                    renderer.push(&format!("{:?}", self));
                }

                fn as_any(&self) -> Option<&dyn Any> {
                    Some(self)
                }
            }
        )*
    };
}

represent_scalar!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

impl Represent for str {
    fn render(&self, renderer: &mut Renderer<'_>) {
        renderer.push("\"");
        renderer.push(self);
        renderer.push("\"");
    }
}

impl Represent for String {
    fn render(&self, renderer: &mut Renderer<'_>) {
        self.as_str().render(renderer);
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

impl<T: Represent + ?Sized> Represent for &T {
    fn render(&self, renderer: &mut Renderer<'_>) {
        (**self).render(renderer);
    }

    fn cycle_token(&self) -> &'static str {
        (**self).cycle_token()
    }

    fn as_any(&self) -> Option<&dyn Any> {
        (**self).as_any()
    }
}

impl<T: Represent> Represent for Option<T> {
    fn render(&self, renderer: &mut Renderer<'_>) {
        match self {
            Some(value) => {
                renderer.push("Some(");
                renderer.value(value);
                renderer.push(")");
            }
            None => renderer.push("None"),
        }
    }
}

impl<T: Represent> Represent for Vec<T> {
    fn render(&self, renderer: &mut Renderer<'_>) {
        Group(self.as_slice()).render(renderer);
    }
}

impl<T: Represent, const N: usize> Represent for [T; N] {
    fn render(&self, renderer: &mut Renderer<'_>) {
        Group(self.as_slice()).render(renderer);
    }
}

fn render_entries(
    renderer: &mut Renderer<'_>,
    entries: Vec<(&dyn Represent, &dyn Represent)>,
    sort: bool,
) {
    renderer.push("{");
    let repr = renderer.repr;
    let mut rendered: Vec<String> = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        let key_text = renderer.capture(key);
        let value_text = renderer.capture(value);
        rendered.push(repr.format_entry(&key_text, &value_text));
    }
    if sort {
        rendered.sort();
    }
    renderer.push(&rendered.join(", "));
    renderer.push("}");
}

impl<K: Represent, V: Represent, H> Represent for HashMap<K, V, H> {
    fn render(&self, renderer: &mut Renderer<'_>) {
        // Hash iteration order is arbitrary; sort rendered entries so the
        // output is deterministic run to run.
        let entries: Vec<(&dyn Represent, &dyn Represent)> = self
            .iter()
            .map(|(k, v)| (k as &dyn Represent, v as &dyn Represent))
            .collect();
        render_entries(renderer, entries, true);
    }

    fn cycle_token(&self) -> &'static str {
        "(this Map)"
    }
}

impl<K: Represent, V: Represent> Represent for BTreeMap<K, V> {
    fn render(&self, renderer: &mut Renderer<'_>) {
        let entries: Vec<(&dyn Represent, &dyn Represent)> = self
            .iter()
            .map(|(k, v)| (k as &dyn Represent, v as &dyn Represent))
            .collect();
        render_entries(renderer, entries, false);
    }

    fn cycle_token(&self) -> &'static str {
        "(this Map)"
    }
}

// Shared containers are the one place cycles can occur; cut them off by
// pointer identity.
impl<T: Represent + ?Sized> Represent for Rc<T> {
    fn render(&self, renderer: &mut Renderer<'_>) {
        let address = Rc::as_ptr(self) as *const () as usize;
        if !renderer.enter(address) {
            renderer.push(self.cycle_token());
            return;
        }
        (**self).render(renderer);
        renderer.leave(address);
    }

    fn cycle_token(&self) -> &'static str {
        (**self).cycle_token()
    }
}

impl<T: Represent> Represent for RefCell<T> {
    fn render(&self, renderer: &mut Renderer<'_>) {
        let inner = self.borrow();
        renderer.value(&*inner);
    }

    fn cycle_token(&self) -> &'static str {
        self.borrow().cycle_token()
    }
}

impl Represent for serde_json::Value {
    fn render(&self, renderer: &mut Renderer<'_>) {
        match self {
            serde_json::Value::Null => renderer.push("null"),
            serde_json::Value::Bool(b) => renderer.value(b),
            serde_json::Value::Number(n) => renderer.push(&n.to_string()),
            serde_json::Value::String(s) => renderer.value(&s.as_str()),
            serde_json::Value::Array(items) => {
                renderer.push("[");
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        renderer.push(", ");
                    }
                    renderer.value(item);
                }
                renderer.push("]");
            }
            serde_json::Value::Object(entries) => {
                renderer.push("{");
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        renderer.push(", ");
                    }
                    renderer.entry(&key.as_str(), value);
                }
                renderer.push("}");
            }
        }
    }

    fn cycle_token(&self) -> &'static str {
        "(this Map)"
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

/// Implement [`Represent`] for a type through its `Debug` form.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Debug)]
/// struct Point { x: i32, y: i32 }
///
/// represent_via_debug!(Point);
/// ```
#[macro_export]
macro_rules! represent_via_debug {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::representation::Represent for $ty {
                fn render(&self, renderer: &mut $crate::representation::Renderer<'_>) {
                    renderer.push(&format!("{:?}", self));
                }

                fn as_any(&self) -> Option<&dyn ::std::any::Any> {
                    Some(self)
                }
            }
        )*
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::representation::{to_text, StandardRepresentation};
    use serde_json::json;

    #[test]
    fn option_renders_both_variants() {
        assert_eq!(to_text(&StandardRepresentation, &Some(3)), "Some(3)");
        assert_eq!(to_text(&StandardRepresentation, &None::<i32>), "None");
    }

    #[test]
    fn nested_values_are_re_represented_recursively() {
        let nested = vec![vec!["a", "b"], vec!["c"]];
        assert_eq!(
            to_text(&StandardRepresentation, &nested),
            "[[\"a\", \"b\"], [\"c\"]]"
        );
    }

    #[test]
    fn self_containing_collection_renders_placeholder() {
        #[derive(Clone)]
        enum Item {
            Int(i32),
            List(Rc<RefCell<Vec<Item>>>),
        }

        impl Represent for Item {
            fn render(&self, renderer: &mut Renderer<'_>) {
                match self {
                    Item::Int(i) => renderer.value(i),
                    Item::List(list) => renderer.value(list),
                }
            }
        }

        let list = Rc::new(RefCell::new(vec![Item::Int(1)]));
        list.borrow_mut().push(Item::List(Rc::clone(&list)));

        assert_eq!(
            to_text(&StandardRepresentation, &list),
            "[1, (this Collection)]"
        );
    }

    #[test]
    fn self_containing_map_renders_map_placeholder() {
        #[derive(Clone)]
        enum Value {
            Text(&'static str),
            Map(Rc<RefCell<BTreeMap<String, Value>>>),
        }

        impl Represent for Value {
            fn render(&self, renderer: &mut Renderer<'_>) {
                match self {
                    Value::Text(s) => renderer.value(s),
                    Value::Map(m) => renderer.value(m),
                }
            }
        }

        let map = Rc::new(RefCell::new(BTreeMap::new()));
        map.borrow_mut()
            .insert("Myself".to_string(), Value::Map(Rc::clone(&map)));
        map.borrow_mut()
            .insert("One".to_string(), Value::Text("First"));

        assert_eq!(
            to_text(&StandardRepresentation, &map),
            "{\"Myself\"=(this Map), \"One\"=\"First\"}"
        );
    }

    #[test]
    fn shared_container_seen_twice_without_a_cycle_still_renders() {
        let shared = Rc::new(vec![1, 2]);
        let pair = vec![Rc::clone(&shared), shared];
        assert_eq!(
            to_text(&StandardRepresentation, &pair),
            "[[1, 2], [1, 2]]"
        );
    }

    #[test]
    fn json_values_render_like_containers() {
        let value = json!({"name": "veracity", "sizes": [1, 2], "ok": true});
        assert_eq!(
            to_text(&StandardRepresentation, &value),
            "{\"name\"=\"veracity\", \"ok\"=true, \"sizes\"=[1, 2]}"
        );
    }

    #[test]
    fn debug_macro_renders_through_debug() {
        #[derive(Debug)]
        struct Point {
            x: i32,
            y: i32,
        }

        represent_via_debug!(Point);

        assert_eq!(
            to_text(&StandardRepresentation, &Point { x: 1, y: 2 }),
            "Point { x: 1, y: 2 }"
        );
    }
}
