use alloc::borrow::Cow;
use alloc::vec::Vec;

use crate::codable::Decode;
use crate::error::DecodeError;
use crate::key::CodingKey;
use crate::value::{KeyedMap, Value};

/// A read-only view over one keyed container of a [`Value`] tree.
///
/// The container remembers the path of group keys walked from the root,
/// so terminal-key failures report the full offending path.
#[derive(Debug, Clone)]
pub struct KeyedDecodeContainer<'de> {
    map: &'de KeyedMap,
    path: Vec<&'static str>,
}

impl<'de> KeyedDecodeContainer<'de> {
    /// Acquires the root container of `value`.
    ///
    /// The root is mandatory: a non-container value is a hard decode
    /// failure.
    pub fn root(value: &'de Value) -> Result<Self, DecodeError> {
        match value {
            Value::Map(map) => Ok(Self {
                map,
                path: Vec::new(),
            }),
            other => Err(DecodeError::ExpectedContainer {
                found: other.kind(),
            }),
        }
    }

    /// Descends into the nested container under `key`, tolerantly.
    ///
    /// An absent key, or a present key holding a non-container value,
    /// yields `None`; callers branch on presence.
    pub fn nested_container<K: CodingKey>(&self, key: K) -> Option<KeyedDecodeContainer<'de>> {
        match self.map.get(key.as_str()) {
            Some(Value::Map(map)) => {
                let mut path = self.path.clone();
                path.push(key.as_str());
                Some(Self { map, path })
            }
            _ => None,
        }
    }

    /// Decodes the required value under `key`.
    ///
    /// Fails with [`DecodeError::KeyNotFound`] (carrying this container's
    /// coding path) when the key is absent.
    pub fn decode<T: Decode, K: CodingKey>(&self, key: K) -> Result<T, DecodeError> {
        match self.map.get(key.as_str()) {
            Some(value) => T::decode(value),
            None => Err(DecodeError::KeyNotFound {
                key: Cow::Borrowed(key.as_str()),
                path: self
                    .path
                    .iter()
                    .map(|segment| Cow::Borrowed(*segment))
                    .collect(),
            }),
        }
    }

    /// Decodes the value under `key` if the key is present.
    ///
    /// An absent key or an explicit `null` yields `Ok(None)`.
    pub fn decode_if_present<T: Decode, K: CodingKey>(
        &self,
        key: K,
    ) -> Result<Option<T>, DecodeError> {
        match self.map.get(key.as_str()) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => T::decode(value).map(Some),
        }
    }

    /// The group keys walked from the root to this container.
    #[inline]
    pub fn coding_path(&self) -> &[&'static str] {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;

    fn sample() -> Value {
        let mut person = KeyedMap::new();
        person.insert("name", Value::Str(String::from("A")));

        let mut info = KeyedMap::new();
        info.insert("person", Value::Map(person));

        let mut root = KeyedMap::new();
        root.insert("id", Value::Int(100));
        root.insert("info", Value::Map(info));
        Value::Map(root)
    }

    #[test]
    fn root_requires_container() {
        let err = KeyedDecodeContainer::root(&Value::Int(3)).unwrap_err();
        assert!(matches!(err, DecodeError::ExpectedContainer { .. }));
    }

    #[test]
    fn nested_acquisition_is_tolerant() {
        let value = sample();
        let root = KeyedDecodeContainer::root(&value).unwrap();

        assert!(root.nested_container("info").is_some());
        assert!(root.nested_container("missing").is_none());
        // A scalar under the key is "no container", not an error.
        assert!(root.nested_container("id").is_none());
    }

    #[test]
    fn decode_reports_full_path() {
        let value = sample();
        let root = KeyedDecodeContainer::root(&value).unwrap();
        let person = root
            .nested_container("info")
            .and_then(|c| c.nested_container("person"))
            .unwrap();

        assert_eq!(person.coding_path(), ["info", "person"]);

        let err = person.decode::<i64, _>("age").unwrap_err();
        assert_eq!(err, DecodeError::key_not_found("age", &["info", "person"]));
    }

    #[test]
    fn decode_if_present_tolerates_absence_and_null() {
        let mut map = KeyedMap::new();
        map.insert("gone", Value::Null);
        let value = Value::Map(map);
        let root = KeyedDecodeContainer::root(&value).unwrap();

        assert_eq!(root.decode_if_present::<i64, _>("missing"), Ok(None));
        assert_eq!(root.decode_if_present::<i64, _>("gone"), Ok(None));
    }
}
