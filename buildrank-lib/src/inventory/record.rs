use indexmap::IndexMap;
use serde::Serialize;

/// Separator placed between values that land on the same key.
pub const COLLISION_SEPARATOR: &str = " | ";

/// An ordered mapping from dotted path to string value.
///
/// Insertion order is the order in which the flattener visited the source document. Inserting an
/// existing key never overwrites: the new value is appended to the old one with [`COLLISION_SEPARATOR`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FlatRecord {
    fields: IndexMap<String, String>,
}

impl FlatRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, appending to any value already stored under `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl AsRef<str>) {
        let value = value.as_ref();
        match self.fields.entry(key.into()) {
            indexmap::map::Entry::Occupied(mut existing) => {
                let existing = existing.get_mut();
                existing.push_str(COLLISION_SEPARATOR);
                existing.push_str(value);
            }
            indexmap::map::Entry::Vacant(slot) => {
                let _ = slot.insert(value.to_string());
            }
        }
    }

    /// Fold every field of `other` into this record, in `other`'s order.
    pub fn absorb(&mut self, other: Self) {
        for (key, value) in other.fields {
            self.insert(key, value);
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: AsRef<str>> FromIterator<(K, V)> for FlatRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}
