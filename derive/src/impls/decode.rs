use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{DeclKind, DefaultExpr};
use crate::path::fp::{DefaultFP, OptionFP, ResultFP};
use crate::plan::{ContainerId, ContainerPlan, Direction};

use super::{CodableMeta, container_ident, field_local};

/// The `Decode` implementation.
///
/// The routine acquires the mandatory root container, then every nested
/// container the plan names, in order and exactly once. Nested acquisition
/// is tolerant: each container local is an `Option`, chained from its
/// parent's. A required field behind an unreachable container turns into a
/// `KeyNotFound` carrying the full nesting path.
pub(super) fn impl_decode(meta: &CodableMeta) -> TokenStream {
    let decode_ = crate::path::decode_(&meta.keyed_codable_path);
    let value_ = crate::path::value_(&meta.keyed_codable_path);
    let decode_error_ = crate::path::decode_error_(&meta.keyed_codable_path);
    let container_ = crate::path::keyed_decode_container_(&meta.keyed_codable_path);

    let real_ident = meta.decl.ident;
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(Direction::Decode);

    let plan = ContainerPlan::build(&meta.decl.persistable, Direction::Decode);

    let mut statements = TokenStream::new();
    if plan.container_count > 1 || !plan.fields.is_empty() {
        let root = container_ident(ContainerId::ROOT);
        statements.extend(quote! {
            let #root = #container_::root(value)?;
        });
    } else {
        // Conformance only. The root is still required to be a container.
        statements.extend(quote! {
            let _ = #container_::root(value)?;
        });
    }

    for field_plan in &plan.fields {
        for step in &field_plan.steps {
            let parent = container_ident(step.parent);
            let produced = container_ident(step.produces);
            let key = meta.schema.variant(&step.key);

            if step.parent == ContainerId::ROOT {
                statements.extend(quote! {
                    let #produced = #parent.nested_container(CodingKeys::#key);
                });
            } else {
                statements.extend(quote! {
                    let #produced =
                        #parent.as_ref().and_then(|__c| __c.nested_container(CodingKeys::#key));
                });
            }
        }

        let field = field_plan.field;
        let local = field_local(&field.ident);
        let ty = &field.ty;
        let key = meta.schema.variant(&field.name);
        let terminal = container_ident(field_plan.terminal);

        let binding = match (&field_plan.failure, field_plan.terminal == ContainerId::ROOT) {
            (None, true) if field.is_optional => quote! {
                let #local: #ty = #terminal.decode_if_present(CodingKeys::#key)?;
            },
            (None, true) => quote! {
                let #local: #ty = #terminal.decode(CodingKeys::#key)?;
            },
            (None, false) => quote! {
                let #local: #ty = match &#terminal {
                    #OptionFP::Some(__c) => __c.decode_if_present(CodingKeys::#key)?,
                    #OptionFP::None => #OptionFP::None,
                };
            },
            (Some(failure), _) => {
                let key_str = failure.key.as_str();
                let path = failure.path.iter().map(String::as_str);
                quote! {
                    let #local: #ty = match &#terminal {
                        #OptionFP::Some(__c) => __c.decode(CodingKeys::#key)?,
                        #OptionFP::None => {
                            return #ResultFP::Err(#decode_error_::key_not_found(
                                #key_str,
                                &[#(#path),*],
                            ));
                        }
                    };
                }
            }
        };
        statements.extend(binding);
    }

    let construction = construction_tokens(meta);

    quote! {
        impl #impl_generics #decode_ for #real_ident #ty_generics #where_clause {
            fn decode(value: &#value_) -> #ResultFP<Self, #decode_error_> {
                #statements
                #ResultFP::Ok(#construction)
            }
        }
    }
}

// Unit structs construct as a bare `Self`; everything else lists decoded
// fields from their locals and skipped fields from their defaults.
fn construction_tokens(meta: &CodableMeta) -> TokenStream {
    if meta.decl.kind == DeclKind::UnitStruct {
        return quote!(Self);
    }

    let decoded = meta.decl.persistable.iter().map(|field| {
        let ident = &field.ident;
        let local = field_local(ident);
        quote!(#ident: #local)
    });
    let defaulted = meta.decl.excluded.iter().map(|field| {
        let ident = &field.ident;
        match &field.default_expr {
            Some(DefaultExpr::Expr(expr)) => quote!(#ident: #expr),
            Some(DefaultExpr::Trait) | None => quote!(#ident: #DefaultFP::default()),
        }
    });

    quote! {
        Self {
            #(#decoded,)*
            #(#defaulted,)*
        }
    }
}
