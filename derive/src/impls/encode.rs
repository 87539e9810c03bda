use proc_macro2::TokenStream;
use quote::quote;

use crate::path::fp::ResultFP;
use crate::plan::{ContainerId, ContainerPlan, Direction};

use super::{CodableMeta, container_ident};

/// The `Encode` implementation.
///
/// Encoding is the tolerant direction: nested containers are created on
/// demand and acquisition never fails, so the routine is a straight-line
/// sequence of acquisitions and writes mirroring the decode plan.
pub(super) fn impl_encode(meta: &CodableMeta) -> TokenStream {
    let encode_ = crate::path::encode_(&meta.keyed_codable_path);
    let value_ = crate::path::value_(&meta.keyed_codable_path);
    let encode_error_ = crate::path::encode_error_(&meta.keyed_codable_path);
    let encoder_ = crate::path::keyed_encoder_(&meta.keyed_codable_path);

    let real_ident = meta.decl.ident;
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(Direction::Encode);

    if meta.decl.persistable.is_empty() {
        return quote! {
            impl #impl_generics #encode_ for #real_ident #ty_generics #where_clause {
                fn encode(&self) -> #ResultFP<#value_, #encode_error_> {
                    #ResultFP::Ok(#encoder_::new().finish())
                }
            }
        };
    }

    let plan = ContainerPlan::build(&meta.decl.persistable, Direction::Encode);

    let root = container_ident(ContainerId::ROOT);
    let mut statements = quote! {
        let mut __encoder = #encoder_::new();
        let #root = __encoder.root();
    };

    for field_plan in &plan.fields {
        for step in &field_plan.steps {
            let parent = container_ident(step.parent);
            let produced = container_ident(step.produces);
            let key = meta.schema.variant(&step.key);
            statements.extend(quote! {
                let #produced = __encoder.nested_container(#parent, CodingKeys::#key);
            });
        }

        let field = field_plan.field;
        let ident = &field.ident;
        let key = meta.schema.variant(&field.name);
        let terminal = container_ident(field_plan.terminal);

        if field.is_optional {
            statements.extend(quote! {
                __encoder.encode_if_present(#terminal, CodingKeys::#key, &self.#ident)?;
            });
        } else {
            statements.extend(quote! {
                __encoder.encode(#terminal, CodingKeys::#key, &self.#ident)?;
            });
        }
    }

    quote! {
        impl #impl_generics #encode_ for #real_ident #ty_generics #where_clause {
            fn encode(&self) -> #ResultFP<#value_, #encode_error_> {
                #statements
                #ResultFP::Ok(__encoder.finish())
            }
        }
    }
}
