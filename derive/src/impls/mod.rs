//! Generation of the `Encode`/`Decode` implementations, the hidden key
//! enumeration, and the optional memberwise constructor.

use proc_macro2::{Ident, TokenStream};
use quote::{ToTokens, format_ident, quote};
use syn::DeriveInput;

use crate::derive_data::{DeclInfo, DefaultExpr};
use crate::path::fp::DefaultFP;
use crate::plan::{ContainerId, Direction};
use crate::schema::KeySchema;

// -----------------------------------------------------------------------------
// Modules

mod coding_keys;
mod constructor;
mod decode;
mod encode;

// -----------------------------------------------------------------------------
// Entry

pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let decl = DeclInfo::extract(input)?;
    let schema = KeySchema::build(&decl.persistable);
    let meta = CodableMeta {
        decl,
        schema,
        keyed_codable_path: crate::path::keyed_codable(),
    };

    let key_enum = coding_keys::key_enum_tokens(&meta);
    let decode_impl = decode::impl_decode(&meta);
    let encode_impl = encode::impl_encode(&meta);
    let constructor = constructor::constructor_tokens(&meta);

    // Everything lives in an anonymous scope so the key enumeration never
    // collides with user items. The inherent `new` impl still applies to
    // the type from inside it.
    Ok(quote! {
        const _: () = {
            #key_enum
            #decode_impl
            #encode_impl
            #constructor
        };
    })
}

// -----------------------------------------------------------------------------
// Meta

/// Everything the individual generators share.
pub(super) struct CodableMeta<'a> {
    pub decl: DeclInfo<'a>,
    pub schema: KeySchema,
    pub keyed_codable_path: syn::Path,
}

impl CodableMeta<'_> {
    /// The three parameters returned are `impl_generics`, `ty_generics`,
    /// `where_clause`.
    ///
    /// The original where clause is kept and, for each persistable field
    /// whose coding type involves a type parameter, the routine's trait
    /// bound is added. Decoding additionally needs `Default` for skipped
    /// generic fields it fills itself.
    pub fn split_generics(
        &self,
        direction: Direction,
    ) -> (syn::ImplGenerics<'_>, syn::TypeGenerics<'_>, TokenStream) {
        let generics = self.decl.generics;
        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

        let mut generic_where_clause = quote! { where };

        // Maintain existing where clause bounds, if any.
        if let Some(where_clause) = where_clause {
            let predicates = where_clause.predicates.iter();
            generic_where_clause.extend(quote! { #(#predicates,)* });
        }

        let type_param_idents = generics
            .type_params()
            .map(|param| param.ident.clone())
            .collect::<Vec<Ident>>();
        if type_param_idents.is_empty() {
            return (impl_generics, ty_generics, generic_where_clause);
        }

        let bound = match direction {
            Direction::Decode => crate::path::decode_(&self.keyed_codable_path),
            Direction::Encode => crate::path::encode_(&self.keyed_codable_path),
        };
        for field in &self.decl.persistable {
            let ty = &field.coding_ty;
            if is_any_ident_in_token_stream(&type_param_idents, ty.to_token_stream()) {
                generic_where_clause.extend(quote! { #ty: #bound, });
            }
        }

        if direction == Direction::Decode {
            for field in &self.decl.excluded {
                if matches!(field.default_expr, Some(DefaultExpr::Expr(_))) {
                    continue;
                }
                let ty = &field.ty;
                if is_any_ident_in_token_stream(&type_param_idents, ty.to_token_stream()) {
                    generic_where_clause.extend(quote! { #ty: #DefaultFP, });
                }
            }
        }

        (impl_generics, ty_generics, generic_where_clause)
    }
}

// -----------------------------------------------------------------------------
// Shared Naming

/// The local holding a planned container. Double-underscored so generated
/// locals cannot shadow or capture user field names.
pub(super) fn container_ident(id: ContainerId) -> Ident {
    if id == ContainerId::ROOT {
        format_ident!("__container")
    } else {
        format_ident!("__container_{}", id.0)
    }
}

pub(super) fn field_local(ident: &Ident) -> Ident {
    format_ident!("__field_{}", ident)
}

// Do any of the identifiers in `idents` appear in `token_stream`?
fn is_any_ident_in_token_stream(idents: &[Ident], token_stream: TokenStream) -> bool {
    for token_tree in token_stream {
        match token_tree {
            proc_macro2::TokenTree::Ident(ident) => {
                if idents.contains(&ident) {
                    return true;
                }
            }
            proc_macro2::TokenTree::Group(group) => {
                if is_any_ident_in_token_stream(idents, group.stream()) {
                    return true;
                }
            }
            _ => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn expand_ok(input: DeriveInput) -> String {
        expand(&input).unwrap().to_string()
    }

    fn person() -> DeriveInput {
        parse_quote! {
            struct Person {
                id: i64,
                #[nested_in("info", "person")]
                name: String,
                #[nested_in("info")]
                address: Option<String>,
                #[nested_in("info", "person", "privacy")]
                gender: Option<String>,
            }
        }
    }

    #[test]
    fn expansion_is_deterministic() {
        assert_eq!(expand_ok(person()), expand_ok(person()));
    }

    #[test]
    fn shared_prefixes_acquire_each_container_once() {
        let expanded = expand_ok(person());
        // Three nested groups (info, person, privacy), opened once per
        // routine: three acquisitions decoding, three encoding.
        assert_eq!(expanded.matches("nested_container").count(), 6);
    }

    #[test]
    fn skipped_fields_leave_no_trace_in_the_key_enum() {
        let expanded = expand_ok(parse_quote! {
            struct S {
                kept: u32,
                #[codable(skip)]
                hidden_cache: u32,
            }
        });
        assert!(!expanded.contains("\"hidden_cache\""));
        // The field itself is still constructed when decoding.
        assert!(expanded.contains("hidden_cache"));
    }

    #[test]
    fn optional_fields_use_presence_variants() {
        let expanded = expand_ok(person());
        assert!(expanded.contains("decode_if_present"));
        assert!(expanded.contains("encode_if_present"));
    }

    #[test]
    fn required_nested_fields_report_key_not_found() {
        let expanded = expand_ok(person());
        assert!(expanded.contains("key_not_found"));
        assert!(expanded.contains("\"name\""));
    }

    #[test]
    fn unit_struct_expands_to_conformances_only() {
        let expanded = expand_ok(parse_quote!(struct Marker;));
        assert!(!expanded.contains("enum CodingKeys"));
        assert!(!expanded.contains("nested_container"));
        assert!(expanded.contains("impl"));
    }

    #[test]
    fn unsupported_shapes_fail_to_expand() {
        let input: DeriveInput = parse_quote!(enum E { A });
        assert!(expand(&input).is_err());
    }

    #[test]
    fn constructor_is_opt_in() {
        let without = expand_ok(person());
        assert!(!without.contains("fn new"));

        let with = expand_ok(parse_quote! {
            #[codable(constructor)]
            struct Job {
                title: String,
                #[codable(default = 40)]
                hours: u32,
            }
        });
        // Defaulted fields stay out of the parameter list. Check the `new`
        // signature itself; `hours : u32` also legitimately appears as a
        // decode-routine local binding.
        let start = with.find("fn new").unwrap();
        let len = with[start..].find(')').unwrap();
        let signature = &with[start..start + len + 1];
        assert!(signature.contains("title : String"));
        assert!(!signature.contains("hours"));
    }
}
