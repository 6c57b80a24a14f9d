use std::collections::HashMap;

use super::Value;

/// Read-only key/value source queried during matching.
///
/// This is the only capability the evaluator needs from a property store;
/// implementors never have to support mutation. Each attribute is fetched
/// independently, so a store that is safe for concurrent reads can be
/// matched from multiple threads.
pub trait Dictionary {
    /// Exact-key lookup.
    fn get(&self, key: &str) -> Option<&Value>;

    /// ASCII case-insensitive key lookup, used by
    /// [`Filter::matches`](crate::Filter::matches). The default falls back
    /// to exact lookup for stores that cannot enumerate their keys.
    fn get_ignore_case(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

/// A hash-map backed property set with a chained builder API.
///
/// # Example
///
/// ```
/// use propmatch::Properties;
///
/// let props = Properties::new()
///     .set("cn", "Babs Jensen")
///     .set("age", 35_i64);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Properties {
    data: HashMap<String, Value>,
}

impl Properties {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, consuming and returning the set for chaining.
    #[must_use]
    pub fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.insert(key, value.into());
        self
    }

    /// Insert a property (mutable reference version).
    pub fn insert(&mut self, key: &str, value: Value) {
        self.data.insert(key.to_owned(), value);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Dictionary for Properties {
    fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    fn get_ignore_case(&self, key: &str) -> Option<&Value> {
        self.data.get(key).or_else(|| {
            self.data
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v)
        })
    }
}

impl Dictionary for HashMap<String, Value> {
    fn get(&self, key: &str) -> Option<&Value> {
        HashMap::get(self, key)
    }

    fn get_ignore_case(&self, key: &str) -> Option<&Value> {
        HashMap::get(self, key).or_else(|| {
            self.iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v)
        })
    }
}

impl FromIterator<(String, Value)> for Properties {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}
