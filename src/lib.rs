#![doc = include_str!("../README.md")]
#![no_std]

// -----------------------------------------------------------------------------
// Extern Self

// Library code uses `crate`, while doc tests and the derive macro's generated
// code use the absolute path `::keyed_codable`. The alias keeps both valid.
extern crate self as keyed_codable;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod codable;
mod error;
mod impls;
mod key;
mod value;

pub mod containers;
pub mod serde;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use codable::{Decode, Encode};
pub use containers::{ContainerId, KeyedDecodeContainer, KeyedEncoder};
pub use error::{DecodeError, EncodeError};
pub use key::CodingKey;
pub use value::{KeyedMap, Value, ValueKind};

pub use keyed_codable_derive::Codable;
