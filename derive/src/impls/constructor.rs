use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::DefaultExpr;
use crate::path::fp::DefaultFP;

use super::CodableMeta;

/// The opt-in memberwise constructor, `#[codable(constructor)]`.
///
/// Parameters follow declaration order and cover every field without a
/// `#[codable(default = ...)]`; defaulted and skipped fields are
/// initialized in place instead of being passed in.
pub(super) fn constructor_tokens(meta: &CodableMeta) -> TokenStream {
    if !meta.decl.attrs.constructor || meta.decl.persistable.is_empty() {
        return TokenStream::new();
    }

    let mut params = Vec::new();
    let mut inits = Vec::new();

    for field in meta
        .decl
        .persistable
        .iter()
        .chain(meta.decl.excluded.iter())
    {
        let ident = &field.ident;
        match &field.default_expr {
            None if field.kind.is_persistable() => {
                let ty = &field.ty;
                params.push(quote!(#ident: #ty));
                inits.push(quote!(#ident));
            }
            Some(DefaultExpr::Expr(expr)) => inits.push(quote!(#ident: #expr)),
            Some(DefaultExpr::Trait) | None => inits.push(quote!(#ident: #DefaultFP::default())),
        }
    }

    let real_ident = meta.decl.ident;
    let (impl_generics, ty_generics, where_clause) = meta.decl.generics.split_for_impl();

    quote! {
        impl #impl_generics #real_ident #ty_generics #where_clause {
            /// Memberwise constructor.
            pub fn new(#(#params),*) -> Self {
                Self {
                    #(#inits,)*
                }
            }
        }
    }
}
