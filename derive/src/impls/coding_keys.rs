use proc_macro2::TokenStream;
use quote::quote;

use super::CodableMeta;

/// The hidden key enumeration, one variant per schema key.
///
/// Variant names mirror the key strings, so the `as_str` arms read like
/// the serialized representation. The enumeration is scoped to the
/// anonymous block the expansion lives in and never reaches user code.
pub(super) fn key_enum_tokens(meta: &CodableMeta) -> TokenStream {
    if meta.schema.is_empty() {
        return TokenStream::new();
    }

    let coding_key_ = crate::path::coding_key_(&meta.keyed_codable_path);

    let variants = meta.schema.keys().iter().map(|key| &key.variant);
    let arms = meta.schema.keys().iter().map(|key| {
        let variant = &key.variant;
        let name = key.name.as_str();
        quote!(CodingKeys::#variant => #name)
    });

    quote! {
        #[allow(non_camel_case_types)]
        #[derive(Clone, Copy)]
        enum CodingKeys {
            #(#variants,)*
        }

        impl #coding_key_ for CodingKeys {
            fn as_str(&self) -> &'static str {
                match self {
                    #(#arms,)*
                }
            }
        }
    }
}
