// File: src/store.rs
// Purpose: Minimal lookup/write capabilities the engine binds against

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Read side of an external key/value store.
///
/// `None` and an empty string both mean the key is absent.
pub trait QueryLookup {
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>>;
}

/// Write side of an external key/value store
pub trait QueryWriter {
    fn write(&mut self, key: &str, value: &str);
}

impl<T: QueryLookup + ?Sized> QueryLookup for &T {
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>> {
        (**self).lookup(key)
    }
}

impl<T: QueryLookup + ?Sized> QueryLookup for &mut T {
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>> {
        (**self).lookup(key)
    }
}

impl<T: QueryWriter + ?Sized> QueryWriter for &mut T {
    fn write(&mut self, key: &str, value: &str) {
        (**self).write(key, value)
    }
}

impl<S: BuildHasher> QueryLookup for HashMap<String, String, S> {
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).map(|value| Cow::Borrowed(value.as_str()))
    }
}

impl<S: BuildHasher> QueryWriter for HashMap<String, String, S> {
    fn write(&mut self, key: &str, value: &str) {
        self.insert(key.to_string(), value.to_string());
    }
}

impl QueryLookup for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).map(|value| Cow::Borrowed(value.as_str()))
    }
}

impl QueryWriter for BTreeMap<String, String> {
    fn write(&mut self, key: &str, value: &str) {
        self.insert(key.to_string(), value.to_string());
    }
}

/// Pairs keep insertion order; lookup returns the first match.
impl QueryLookup for Vec<(String, String)> {
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>> {
        self.iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| Cow::Borrowed(value.as_str()))
    }
}

impl QueryWriter for Vec<(String, String)> {
    fn write(&mut self, key: &str, value: &str) {
        self.push((key.to_string(), value.to_string()));
    }
}

/// Adapts a closure into a [`QueryLookup`]
#[derive(Clone)]
pub struct FnLookup<F>(F);

impl<F> QueryLookup for FnLookup<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>> {
        (self.0)(key).map(Cow::Owned)
    }
}

/// Wraps a closure so it can back a decode.
///
/// ```
/// use rusty_query::{lookup_fn, QueryLookup};
///
/// let lookup = lookup_fn(|key| (key == "w").then(|| "10".to_string()));
/// assert_eq!(lookup.lookup("w").as_deref(), Some("10"));
/// assert_eq!(lookup.lookup("h"), None);
/// ```
pub fn lookup_fn<F>(f: F) -> FnLookup<F>
where
    F: Fn(&str) -> Option<String>,
{
    FnLookup(f)
}
