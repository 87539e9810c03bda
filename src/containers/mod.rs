//! Keyed container access for generated encode/decode routines.
//!
//! Decoding reads through [`KeyedDecodeContainer`], a borrowed view over a
//! [`KeyedMap`](crate::KeyedMap) that carries the coding path walked so
//! far. Acquiring the *root* container is mandatory and fails hard when
//! the value is not a keyed container; every *nested* acquisition is
//! best-effort and yields `None` instead of failing.
//!
//! Encoding writes through a [`KeyedEncoder`], an arena of
//! in-construction containers addressed by [`ContainerId`] handles.
//! Nested containers are created on demand and never fail to acquire.

// -----------------------------------------------------------------------------
// Modules

mod decode;
mod encode;

// -----------------------------------------------------------------------------
// Exports

pub use decode::KeyedDecodeContainer;
pub use encode::{ContainerId, KeyedEncoder};
