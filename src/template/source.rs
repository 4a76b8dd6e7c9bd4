//! Caller-supplied values for `${name}` references
//!
//! A pattern such as `user-${names}-[\d]{4}` pulls part of its output from
//! the bindings passed to each render call. Each binding is one of a closed
//! set of shapes, resolved at render time:
//!
//! | Shape | Render result |
//! |-------|---------------|
//! | [`SourceValue::Text`] | the text itself |
//! | [`SourceValue::Choices`] | one element, chosen uniformly |
//! | [`SourceValue::Function`] | the return value of one call |
//! | [`SourceValue::Lazy`] | the next value pulled from the iterator |
//!
//! Unbound names, empty choice lists and exhausted iterators render as the
//! empty string.

use super::random::{choose, Randomness};
use hashbrown::HashMap;
use std::cell::RefCell;
use std::fmt;

/// A zero-argument value producer
pub type SourceFn = Box<dyn FnMut() -> String>;

/// A lazily evaluated sequence of values
pub type SourceIter = Box<dyn Iterator<Item = String>>;

/// One bound value
pub enum SourceValue {
    /// Rendered as-is
    Text(String),
    /// One element chosen uniformly per render
    Choices(Vec<String>),
    /// Invoked once per render
    Function(RefCell<SourceFn>),
    /// Advanced by exactly one value per render
    Lazy(RefCell<SourceIter>),
}

impl SourceValue {
    /// Produce the text for one render
    pub fn resolve(&self, randomness: &mut dyn Randomness) -> String {
        match self {
            SourceValue::Text(text) => text.clone(),
            SourceValue::Choices(choices) => {
                choose(randomness, choices).cloned().unwrap_or_default()
            }
            SourceValue::Function(f) => (*f.borrow_mut())(),
            SourceValue::Lazy(iter) => match iter.borrow_mut().next() {
                Some(value) => value,
                None => {
                    log_debug!("lazy source exhausted, rendering empty string");
                    String::new()
                }
            },
        }
    }

    fn shape(&self) -> &'static str {
        match self {
            SourceValue::Text(_) => "Text",
            SourceValue::Choices(_) => "Choices",
            SourceValue::Function(_) => "Function",
            SourceValue::Lazy(_) => "Lazy",
        }
    }
}

impl fmt::Debug for SourceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceValue::Text(text) => f.debug_tuple("Text").field(text).finish(),
            SourceValue::Choices(choices) => f.debug_tuple("Choices").field(choices).finish(),
            other => write!(f, "{}(<function>)", other.shape()),
        }
    }
}

/// Named values available to `${name}` references during a render
///
/// ```rust
/// use strgen::{Bindings, StringGenerator};
///
/// let bindings = Bindings::new()
///     .with_choices("tld", ["com", "net", "org"])
///     .with_text("user", "admin");
///
/// let mut generator = StringGenerator::new("${user}@example.${tld}").unwrap();
/// let email = generator.render_with(&bindings);
/// assert!(email.starts_with("admin@example."));
/// ```
#[derive(Debug, Default)]
pub struct Bindings {
    values: HashMap<String, SourceValue>,
}

impl Bindings {
    /// Create an empty set of bindings
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a raw [`SourceValue`]
    pub fn insert(&mut self, name: impl Into<String>, value: SourceValue) -> &mut Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Bind a fixed value, stringified once
    pub fn insert_text(&mut self, name: impl Into<String>, value: impl ToString) -> &mut Self {
        self.insert(name, SourceValue::Text(value.to_string()))
    }

    /// Bind a list of values to choose from
    pub fn insert_choices<I, T>(&mut self, name: impl Into<String>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        let choices = values.into_iter().map(|v| v.to_string()).collect();
        self.insert(name, SourceValue::Choices(choices))
    }

    /// Bind a function invoked on every render
    pub fn insert_fn<F, T>(&mut self, name: impl Into<String>, mut f: F) -> &mut Self
    where
        F: FnMut() -> T + 'static,
        T: ToString,
    {
        let wrapped: SourceFn = Box::new(move || f().to_string());
        self.insert(name, SourceValue::Function(RefCell::new(wrapped)))
    }

    /// Bind an iterator advanced once per render
    pub fn insert_iter<I, T>(&mut self, name: impl Into<String>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
        T: ToString,
    {
        let iter: SourceIter = Box::new(values.into_iter().map(|v| v.to_string()));
        self.insert(name, SourceValue::Lazy(RefCell::new(iter)))
    }

    /// Builder form of [`insert_text`](Self::insert_text)
    pub fn with_text(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.insert_text(name, value);
        self
    }

    /// Builder form of [`insert_choices`](Self::insert_choices)
    pub fn with_choices<I, T>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        self.insert_choices(name, values);
        self
    }

    /// Builder form of [`insert_fn`](Self::insert_fn)
    pub fn with_fn<F, T>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: FnMut() -> T + 'static,
        T: ToString,
    {
        self.insert_fn(name, f);
        self
    }

    /// Builder form of [`insert_iter`](Self::insert_iter)
    pub fn with_iter<I, T>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
        T: ToString,
    {
        self.insert_iter(name, values);
        self
    }

    /// Look up a binding
    pub fn get(&self, name: &str) -> Option<&SourceValue> {
        self.values.get(name)
    }

    /// Resolve a name for one render; unbound names yield an empty string
    pub fn resolve(&self, name: &str, randomness: &mut dyn Randomness) -> String {
        self.get(name)
            .map(|value| value.resolve(randomness))
            .unwrap_or_default()
    }

    /// Number of bound names
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when nothing is bound
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::random::seeded;

    #[test]
    fn test_text_binding() {
        let bindings = Bindings::new().with_text("n", 42);
        let mut rng = seeded(1);
        assert_eq!(bindings.resolve("n", rng.as_mut()), "42");
    }

    #[test]
    fn test_choices_binding() {
        let bindings = Bindings::new().with_choices("c", ["a", "b", "c"]);
        let mut rng = seeded(1);
        for _ in 0..50 {
            let v = bindings.resolve("c", rng.as_mut());
            assert!(["a", "b", "c"].contains(&v.as_str()));
        }
    }

    #[test]
    fn test_empty_choices_and_unbound() {
        let bindings = Bindings::new().with_choices("c", Vec::<String>::new());
        let mut rng = seeded(1);
        assert_eq!(bindings.resolve("c", rng.as_mut()), "");
        assert_eq!(bindings.resolve("missing", rng.as_mut()), "");
    }

    #[test]
    fn test_function_binding_called_each_time() {
        let mut counter = 0;
        let bindings = Bindings::new().with_fn("f", move || {
            counter += 1;
            counter
        });
        let mut rng = seeded(1);
        assert_eq!(bindings.resolve("f", rng.as_mut()), "1");
        assert_eq!(bindings.resolve("f", rng.as_mut()), "2");
    }

    #[test]
    fn test_lazy_binding_pulls_one_value() {
        let bindings = Bindings::new().with_iter("g", vec!["x", "y"]);
        let mut rng = seeded(1);
        assert_eq!(bindings.resolve("g", rng.as_mut()), "x");
        assert_eq!(bindings.resolve("g", rng.as_mut()), "y");
        assert_eq!(bindings.resolve("g", rng.as_mut()), "");
    }

    #[test]
    fn test_debug_hides_closures() {
        let bindings = Bindings::new().with_fn("f", || 1);
        let debug = format!("{:?}", bindings.get("f").unwrap());
        assert_eq!(debug, "Function(<function>)");
    }
}
