use alloc::borrow::Cow;
use alloc::vec::Vec;
use core::{error, fmt};

use crate::value::ValueKind;

// -----------------------------------------------------------------------------
// Decode errors

/// Errors raised while decoding a [`Value`](crate::Value) tree.
///
/// `KeyNotFound` is the only error the generated decode routines construct
/// themselves; the others come out of the container and leaf primitives.
#[derive(Debug, PartialEq)]
pub enum DecodeError {
    /// A required key was absent: either an ancestor group on the field's
    /// nesting path was missing, or the terminal key was missing inside a
    /// present container. `path` is the ordered list of group keys walked
    /// (or attempted) before `key`.
    KeyNotFound {
        key: Cow<'static, str>,
        path: Vec<Cow<'static, str>>,
    },
    /// The root of a decode was not a keyed container.
    ExpectedContainer { found: ValueKind },
    /// A leaf value had the wrong shape for the requested type.
    WrongType {
        expected: ValueKind,
        found: ValueKind,
    },
    /// An integer leaf did not fit the requested integer type.
    IntOutOfRange { value: i128, target: &'static str },
}

impl DecodeError {
    /// Builds the structured key-not-found error the generated code throws
    /// when a required field's nesting path cannot be resolved.
    pub fn key_not_found(key: &'static str, path: &[&'static str]) -> Self {
        DecodeError::KeyNotFound {
            key: Cow::Borrowed(key),
            path: path.iter().map(|segment| Cow::Borrowed(*segment)).collect(),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeyNotFound { key, path } => {
                if path.is_empty() {
                    write!(f, "key `{key}` not found")
                } else {
                    write!(f, "key `{key}` not found at path `")?;
                    for (i, segment) in path.iter().enumerate() {
                        if i > 0 {
                            f.write_str(".")?;
                        }
                        f.write_str(segment)?;
                    }
                    f.write_str("`")
                }
            }
            Self::ExpectedContainer { found } => {
                write!(f, "expected a keyed container, found {found}")
            }
            Self::WrongType { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            Self::IntOutOfRange { value, target } => {
                write!(f, "integer {value} does not fit in `{target}`")
            }
        }
    }
}

impl error::Error for DecodeError {}

// -----------------------------------------------------------------------------
// Encode errors

/// Errors raised while building a [`Value`](crate::Value) tree.
#[derive(Debug, PartialEq)]
pub enum EncodeError {
    /// A key was written twice into the same container. Every key at a
    /// given nesting level must be distinct.
    DuplicateKey { key: Cow<'static, str> },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateKey { key } => {
                write!(f, "key `{key}` was written twice into one container")
            }
        }
    }
}

impl error::Error for EncodeError {}
