//! `Encode`/`Decode` implementations for scalar leaf types.

use alloc::string::{String, ToString};

use crate::codable::{Decode, Encode};
use crate::error::{DecodeError, EncodeError};
use crate::value::{Value, ValueKind};

// -----------------------------------------------------------------------------
// Forwarding

impl<T: Encode + ?Sized> Encode for &T {
    #[inline]
    fn encode(&self) -> Result<Value, EncodeError> {
        (**self).encode()
    }
}

impl Encode for Value {
    #[inline]
    fn encode(&self) -> Result<Value, EncodeError> {
        Ok(self.clone())
    }
}

impl Decode for Value {
    #[inline]
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        Ok(value.clone())
    }
}

// -----------------------------------------------------------------------------
// Integers

macro_rules! impl_codable_int {
    ($($ty:ty => $variant:ident as $wide:ty),* $(,)?) => {
        $(
            impl Encode for $ty {
                #[inline]
                fn encode(&self) -> Result<Value, EncodeError> {
                    Ok(Value::$variant(*self as $wide))
                }
            }

            impl Decode for $ty {
                fn decode(value: &Value) -> Result<Self, DecodeError> {
                    let wide: i128 = match value {
                        Value::Int(v) => (*v).into(),
                        Value::UInt(v) => (*v).into(),
                        other => {
                            return Err(DecodeError::WrongType {
                                expected: ValueKind::Int,
                                found: other.kind(),
                            });
                        }
                    };
                    <$ty>::try_from(wide).map_err(|_| DecodeError::IntOutOfRange {
                        value: wide,
                        target: stringify!($ty),
                    })
                }
            }
        )*
    };
}

impl_codable_int! {
    i8 => Int as i64,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int as i64,
    isize => Int as i64,
    u8 => UInt as u64,
    u16 => UInt as u64,
    u32 => UInt as u64,
    u64 => UInt as u64,
    usize => UInt as u64,
}

// -----------------------------------------------------------------------------
// Floats

impl Encode for f64 {
    #[inline]
    fn encode(&self) -> Result<Value, EncodeError> {
        Ok(Value::Float(*self))
    }
}

impl Decode for f64 {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        match value {
            Value::Float(v) => Ok(*v),
            Value::Int(v) => Ok(*v as f64),
            Value::UInt(v) => Ok(*v as f64),
            other => Err(DecodeError::WrongType {
                expected: ValueKind::Float,
                found: other.kind(),
            }),
        }
    }
}

impl Encode for f32 {
    #[inline]
    fn encode(&self) -> Result<Value, EncodeError> {
        Ok(Value::Float((*self).into()))
    }
}

impl Decode for f32 {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        f64::decode(value).map(|v| v as f32)
    }
}

// -----------------------------------------------------------------------------
// Bool, strings

impl Encode for bool {
    #[inline]
    fn encode(&self) -> Result<Value, EncodeError> {
        Ok(Value::Bool(*self))
    }
}

impl Decode for bool {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        match value {
            Value::Bool(v) => Ok(*v),
            other => Err(DecodeError::WrongType {
                expected: ValueKind::Bool,
                found: other.kind(),
            }),
        }
    }
}

impl Encode for str {
    #[inline]
    fn encode(&self) -> Result<Value, EncodeError> {
        Ok(Value::Str(self.to_string()))
    }
}

impl Encode for String {
    #[inline]
    fn encode(&self) -> Result<Value, EncodeError> {
        Ok(Value::Str(self.clone()))
    }
}

impl Decode for String {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        match value {
            Value::Str(v) => Ok(v.clone()),
            other => Err(DecodeError::WrongType {
                expected: ValueKind::Str,
                found: other.kind(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_range_checks() {
        assert_eq!(u8::decode(&Value::Int(255)), Ok(255));
        assert!(matches!(
            u8::decode(&Value::Int(256)),
            Err(DecodeError::IntOutOfRange { value: 256, .. })
        ));
        assert!(matches!(
            u32::decode(&Value::Int(-1)),
            Err(DecodeError::IntOutOfRange { .. })
        ));
        assert_eq!(i64::decode(&Value::UInt(7)), Ok(7));
    }

    #[test]
    fn wrong_leaf_shape() {
        assert!(matches!(
            String::decode(&Value::Int(1)),
            Err(DecodeError::WrongType { .. })
        ));
        assert!(matches!(
            bool::decode(&Value::Str("true".into())),
            Err(DecodeError::WrongType { .. })
        ));
    }

    #[test]
    fn floats_accept_integers() {
        assert_eq!(f64::decode(&Value::Int(3)), Ok(3.0));
        assert_eq!(f64::decode(&Value::UInt(4)), Ok(4.0));
        assert_eq!(f64::decode(&Value::Float(0.5)), Ok(0.5));
    }
}
