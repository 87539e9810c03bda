use alloc::string::String;

use indexmap::IndexMap;

// -----------------------------------------------------------------------------
// Value

/// A node of the serialized representation.
///
/// The representation model is a tree of keyed containers: every composite
/// level is a [`KeyedMap`] whose keys are distinct and whose order is the
/// order of first insertion. Leaves are scalars.
///
/// There is deliberately no sequence variant; fields route into nested
/// keyed groups, never into arrays of nested objects.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    Map(KeyedMap),
}

impl Value {
    /// The [kind](ValueKind) of this node, used in error reporting.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) | Value::UInt(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Str(_) => ValueKind::Str,
            Value::Map(_) => ValueKind::Map,
        }
    }

    /// Returns the keyed container if this node is one.
    #[inline]
    pub fn as_map(&self) -> Option<&KeyedMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }
}

/// The shape of a [`Value`] node, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    Str,
    Map,
}

impl core::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Int => "integer",
            ValueKind::Float => "float",
            ValueKind::Str => "string",
            ValueKind::Map => "keyed container",
        };
        f.write_str(name)
    }
}

// -----------------------------------------------------------------------------
// Keyed Map

/// An insertion-ordered keyed container.
///
/// Keys at one nesting level are distinct; inserting an existing key
/// replaces its value in place without disturbing the order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyedMap {
    entries: IndexMap<String, Value, FixedState>,
}

impl KeyedMap {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` under `key`, returning the previous value if the key
    /// was already present.
    #[inline]
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates keys in insertion order.
    #[inline]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl FromIterator<(String, Value)> for KeyedMap {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            entries: IndexMap::from_iter(iter),
        }
    }
}

// -----------------------------------------------------------------------------
// Fixed hashing

pub(crate) struct FixedHasher(u64);

impl core::hash::Hasher for FixedHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for b in bytes {
            self.0 = self.0.rotate_right(8).wrapping_add(*b as u64);
        }
        for b in bytes {
            self.0 = self.0.rotate_right(7).wrapping_add((*b % 41) as u64);
        }
    }
}

/// A fixed, seedless hash state.
///
/// Containers hold at most a handful of keys (one per field or path
/// segment), so hash quality is irrelevant here; a fixed state keeps the
/// crate free of `std`'s random state and keeps iteration deterministic.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub(crate) struct FixedState;

impl core::hash::BuildHasher for FixedState {
    type Hasher = FixedHasher;

    #[inline]
    fn build_hasher(&self) -> Self::Hasher {
        FixedHasher(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_order_preserved() {
        let mut map = KeyedMap::new();
        map.insert("z", Value::Int(1));
        map.insert("a", Value::Int(2));
        map.insert("m", Value::Int(3));

        let keys: alloc::vec::Vec<&str> = map.keys().collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn insert_replaces_without_reordering() {
        let mut map = KeyedMap::new();
        map.insert("a", Value::Int(1));
        map.insert("b", Value::Int(2));

        let old = map.insert("a", Value::Int(10));
        assert_eq!(old, Some(Value::Int(1)));

        let keys: alloc::vec::Vec<&str> = map.keys().collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(map.get("a"), Some(&Value::Int(10)));
    }
}
