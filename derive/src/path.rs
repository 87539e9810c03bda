//! This independent module is used to provide the required paths.
//! So as to minimize changes when the `keyed_codable` structure is modified.
//!
//! The only special feature is the path of keyed_codable itself,
//! see [`keyed_codable`] function doc.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `keyed_codable` crate.
///
/// Not every builder can reach the runtime crate as `keyed_codable` (it may
/// be renamed in their `Cargo.toml`), so the builder's manifest is scanned.
/// When nothing matches, `::keyed_codable` is returned, which may be wrong.
///
/// The cost of this function is relatively high (accessing files, obtaining
/// read-write lock permissions, querying content...), so the crate path is
/// mainly obtained through parameter passing rather than reacquiring.
pub(crate) fn keyed_codable() -> syn::Path {
    keyed_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("keyed_codable"))
}

// -----------------------------------------------------------------------------
// Runtime Items

#[inline(always)]
pub(crate) fn coding_key_(keyed_codable_path: &syn::Path) -> TokenStream {
    quote! {
        #keyed_codable_path::CodingKey
    }
}

#[inline(always)]
pub(crate) fn encode_(keyed_codable_path: &syn::Path) -> TokenStream {
    quote! {
        #keyed_codable_path::Encode
    }
}

#[inline(always)]
pub(crate) fn decode_(keyed_codable_path: &syn::Path) -> TokenStream {
    quote! {
        #keyed_codable_path::Decode
    }
}

#[inline(always)]
pub(crate) fn value_(keyed_codable_path: &syn::Path) -> TokenStream {
    quote! {
        #keyed_codable_path::Value
    }
}

#[inline(always)]
pub(crate) fn decode_error_(keyed_codable_path: &syn::Path) -> TokenStream {
    quote! {
        #keyed_codable_path::DecodeError
    }
}

#[inline(always)]
pub(crate) fn encode_error_(keyed_codable_path: &syn::Path) -> TokenStream {
    quote! {
        #keyed_codable_path::EncodeError
    }
}

#[inline(always)]
pub(crate) fn keyed_encoder_(keyed_codable_path: &syn::Path) -> TokenStream {
    quote! {
        #keyed_codable_path::KeyedEncoder
    }
}

#[inline(always)]
pub(crate) fn keyed_decode_container_(keyed_codable_path: &syn::Path) -> TokenStream {
    quote! {
        #keyed_codable_path::KeyedDecodeContainer
    }
}

// -----------------------------------------------------------------------------
// Fully-qualified Prelude Items

/// Unit tokens for prelude items the generated code must spell out in
/// full, immune to shadowing at the expansion site.
pub(crate) mod fp {
    use proc_macro2::TokenStream;
    use quote::{ToTokens, quote};

    pub(crate) struct OptionFP;

    impl ToTokens for OptionFP {
        fn to_tokens(&self, tokens: &mut TokenStream) {
            quote!(::core::option::Option).to_tokens(tokens);
        }
    }

    pub(crate) struct ResultFP;

    impl ToTokens for ResultFP {
        fn to_tokens(&self, tokens: &mut TokenStream) {
            quote!(::core::result::Result).to_tokens(tokens);
        }
    }

    pub(crate) struct DefaultFP;

    impl ToTokens for DefaultFP {
        fn to_tokens(&self, tokens: &mut TokenStream) {
            quote!(::core::default::Default).to_tokens(tokens);
        }
    }
}
