use alloc::borrow::Cow;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

use indexmap::IndexMap;

use crate::codable::Encode;
use crate::error::EncodeError;
use crate::key::CodingKey;
use crate::value::{FixedState, KeyedMap, Value};

/// A handle to one in-construction container inside a [`KeyedEncoder`].
///
/// Handles are plain indices, so generated code can keep several of them
/// alive at once and revisit a parent container after writing into a
/// nested one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerId(usize);

#[derive(Debug)]
enum Slot {
    Leaf(Value),
    Child(usize),
}

#[derive(Debug, Default)]
struct Node {
    entries: IndexMap<String, Slot, FixedState>,
}

/// Builds a [`Value`] tree container by container.
///
/// Unlike decoding, nested-container acquisition never fails: the group is
/// created on demand, and acquiring the same `(parent, key)` pair again
/// returns the container created the first time. Key order at every level
/// is the order of first writes.
#[derive(Debug)]
pub struct KeyedEncoder {
    nodes: Vec<Node>,
}

impl KeyedEncoder {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
        }
    }

    /// The root writable container.
    #[inline]
    pub fn root(&self) -> ContainerId {
        ContainerId(0)
    }

    /// Acquires the nested container under `key`, creating it on first use.
    ///
    /// Repeated acquisition of the same `(parent, key)` pair yields the
    /// same container, so shared path prefixes collapse to one group.
    pub fn nested_container<K: CodingKey>(&mut self, parent: ContainerId, key: K) -> ContainerId {
        if let Some(Slot::Child(child)) = self.nodes[parent.0].entries.get(key.as_str()) {
            return ContainerId(*child);
        }

        let child = self.nodes.len();
        self.nodes.push(Node::default());
        self.nodes[parent.0]
            .entries
            .insert(key.as_str().to_string(), Slot::Child(child));
        ContainerId(child)
    }

    /// Writes `value` under `key` in the given container.
    ///
    /// Each key may be written at most once per container.
    pub fn encode<T, K>(&mut self, container: ContainerId, key: K, value: &T) -> Result<(), EncodeError>
    where
        T: Encode + ?Sized,
        K: CodingKey,
    {
        if self.nodes[container.0].entries.contains_key(key.as_str()) {
            return Err(EncodeError::DuplicateKey {
                key: Cow::Borrowed(key.as_str()),
            });
        }

        let encoded = value.encode()?;
        self.nodes[container.0]
            .entries
            .insert(key.as_str().to_string(), Slot::Leaf(encoded));
        Ok(())
    }

    /// Writes `value` under `key` when it is present; skips `None` entirely
    /// (no key, no explicit null).
    pub fn encode_if_present<T, K>(
        &mut self,
        container: ContainerId,
        key: K,
        value: &Option<T>,
    ) -> Result<(), EncodeError>
    where
        T: Encode,
        K: CodingKey,
    {
        match value {
            Some(value) => self.encode(container, key, value),
            None => Ok(()),
        }
    }

    /// Assembles the finished [`Value`] tree.
    pub fn finish(self) -> Value {
        let mut nodes: Vec<Option<Node>> = self.nodes.into_iter().map(Some).collect();
        build(&mut nodes, 0)
    }
}

fn build(nodes: &mut [Option<Node>], index: usize) -> Value {
    let Some(node) = nodes[index].take() else {
        return Value::Map(KeyedMap::new());
    };

    let mut map = KeyedMap::new();
    for (key, slot) in node.entries {
        match slot {
            Slot::Leaf(value) => map.insert(key, value),
            Slot::Child(child) => map.insert(key, build(nodes, child)),
        };
    }
    Value::Map(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_container_reuses_shared_prefix() {
        let mut encoder = KeyedEncoder::new();
        let root = encoder.root();

        let info_a = encoder.nested_container(root, "info");
        let info_b = encoder.nested_container(root, "info");
        assert_eq!(info_a, info_b);

        let person = encoder.nested_container(info_a, "person");
        assert_ne!(person, info_a);
    }

    #[test]
    fn duplicate_key_is_rejected() {
        let mut encoder = KeyedEncoder::new();
        let root = encoder.root();

        encoder.encode(root, "id", &1_i64).unwrap();
        let err = encoder.encode(root, "id", &2_i64).unwrap_err();
        assert!(matches!(err, EncodeError::DuplicateKey { .. }));
    }

    #[test]
    fn finish_preserves_first_write_order() {
        let mut encoder = KeyedEncoder::new();
        let root = encoder.root();

        encoder.encode(root, "id", &100_i64).unwrap();
        let info = encoder.nested_container(root, "info");
        let person = encoder.nested_container(info, "person");
        encoder.encode(person, "name", &"A").unwrap();
        encoder.encode(info, "address", &"B").unwrap();
        encoder.encode(root, "tail", &true).unwrap();

        let Value::Map(map) = encoder.finish() else {
            panic!("root must be a container");
        };
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, ["id", "info", "tail"]);

        let info = map.get("info").and_then(Value::as_map).unwrap();
        let keys: Vec<&str> = info.keys().collect();
        assert_eq!(keys, ["person", "address"]);
    }

    #[test]
    fn none_is_skipped_entirely() {
        let mut encoder = KeyedEncoder::new();
        let root = encoder.root();
        encoder
            .encode_if_present(root, "gone", &None::<i64>)
            .unwrap();

        let Value::Map(map) = encoder.finish() else {
            panic!("root must be a container");
        };
        assert!(!map.contains_key("gone"));
    }
}
