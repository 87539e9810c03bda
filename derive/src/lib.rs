//! Derive macro for `keyed_codable`. See [`Codable`].
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod plan;
mod schema;

// -----------------------------------------------------------------------------
// Macros

/// # Keyed Encode/Decode Derivation
///
/// `#[derive(Codable)]` implements `keyed_codable::Encode` and
/// `keyed_codable::Decode` for a struct with named fields, together with a
/// hidden key enumeration covering every field name and every distinct
/// nesting-path segment.
///
/// ```rust, ignore
/// #[derive(Codable)]
/// struct Person {
///     id: i64,
///     #[nested_in("info", "person")]
///     name: String,
///     #[nested_in("info")]
///     address: Option<String>,
/// }
/// ```
///
/// ## Nesting
///
/// `#[nested_in("a", "b")]` routes a field through the nested groups `a`
/// then `b` of the serialized representation, outermost first. Fields
/// sharing a path prefix share the nested container: it is acquired
/// exactly once per generated routine.
///
/// During decoding the root container is mandatory, while every nested
/// group is acquired best-effort. A missing group (or terminal key) makes
/// an `Option` field decode to `None`; for a required field it produces a
/// `DecodeError::KeyNotFound` carrying the full offending path. During
/// encoding nested groups are created on demand and never fail.
///
/// ## Skipping
///
/// `#[codable(skip)]` excludes a field from the key enumeration and from
/// both routines. Skipped fields are filled from `#[codable(default = ...)]`
/// when given, otherwise from `Default::default()`, when decoding
/// constructs the value.
///
/// ## Constructor
///
/// `#[codable(constructor)]` at the type level additionally emits a
/// memberwise `fn new`. Fields with `#[codable(default = ...)]` are
/// omitted from the parameter list and initialized in place:
///
/// ```rust, ignore
/// #[derive(Codable)]
/// #[codable(constructor)]
/// struct Job {
///     title: String,
///     #[codable(default = 40)]
///     hours: u32,
/// }
///
/// let job = Job::new("mason".into()); // hours = 40
/// ```
///
/// ## Supported declarations
///
/// Only structs with named fields (and unit structs, which merely declare
/// the conformance). Enums, unions and tuple structs are rejected with a
/// diagnostic; so are `#[nested_in]`/`#[codable]` attributes attached to
/// anything other than the positions described above.
#[proc_macro_derive(Codable, attributes(nested_in, codable))]
pub fn derive_codable(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match impls::expand(&ast) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}
