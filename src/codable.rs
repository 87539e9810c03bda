use crate::error::{DecodeError, EncodeError};
use crate::value::Value;

/// Types that can render themselves into a [`Value`] tree.
///
/// Scalars return a leaf; `#[derive(Codable)]` types return a keyed
/// container built through a [`KeyedEncoder`](crate::KeyedEncoder).
pub trait Encode {
    fn encode(&self) -> Result<Value, EncodeError>;
}

/// Types that can be rebuilt from a [`Value`] tree.
///
/// For `#[derive(Codable)]` types the root value must be a keyed
/// container; anything else is a hard [`DecodeError::ExpectedContainer`]
/// failure.
pub trait Decode: Sized {
    fn decode(value: &Value) -> Result<Self, DecodeError>;
}
