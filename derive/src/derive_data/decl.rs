use syn::{Data, DeriveInput, Fields, Generics, Ident};

use super::{FieldDescriptor, TypeAttributes};

// -----------------------------------------------------------------------------
// Declaration kind

/// The shape of the derive target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DeclKind {
    Struct,
    TupleStruct,
    UnitStruct,
    Enum,
    Union,
}

impl DeclKind {
    fn of(input: &DeriveInput) -> DeclKind {
        match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(_) => DeclKind::Struct,
                Fields::Unnamed(_) => DeclKind::TupleStruct,
                Fields::Unit => DeclKind::UnitStruct,
            },
            Data::Enum(_) => DeclKind::Enum,
            Data::Union(_) => DeclKind::Union,
        }
    }
}

// -----------------------------------------------------------------------------
// Declaration info

/// The derive target, lowered to the descriptor model.
pub(crate) struct DeclInfo<'a> {
    pub ident: &'a Ident,
    pub generics: &'a Generics,
    pub kind: DeclKind,
    pub attrs: TypeAttributes,
    /// Fields taking part in the key schema and coding routines, in
    /// declaration order.
    pub persistable: Vec<FieldDescriptor>,
    /// Skipped fields. They still need construction when decoding.
    pub excluded: Vec<FieldDescriptor>,
}

impl<'a> DeclInfo<'a> {
    pub fn extract(input: &'a DeriveInput) -> syn::Result<DeclInfo<'a>> {
        let kind = DeclKind::of(input);
        match kind {
            DeclKind::Struct | DeclKind::UnitStruct => {}
            DeclKind::TupleStruct => {
                return Err(syn::Error::new_spanned(
                    input,
                    "`Codable` requires named fields; tuple structs are not supported",
                ));
            }
            DeclKind::Enum => {
                return Err(syn::Error::new_spanned(
                    input,
                    "`Codable` can only be derived for structs, not enums",
                ));
            }
            DeclKind::Union => {
                return Err(syn::Error::new_spanned(
                    input,
                    "`Codable` can only be derived for structs, not unions",
                ));
            }
        }

        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;

        let mut persistable = Vec::new();
        let mut excluded = Vec::new();
        if let Data::Struct(data) = &input.data {
            for field in &data.fields {
                let descriptor = FieldDescriptor::extract(field)?;
                if descriptor.kind.is_persistable() {
                    persistable.push(descriptor);
                } else {
                    excluded.push(descriptor);
                }
            }
        }

        Ok(DeclInfo {
            ident: &input.ident,
            generics: &input.generics,
            kind,
            attrs,
            persistable,
            excluded,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn partitions_skipped_fields() {
        let input: DeriveInput = parse_quote! {
            struct Person {
                id: i64,
                #[codable(skip)]
                cached: u32,
            }
        };
        let info = DeclInfo::extract(&input).unwrap();
        assert_eq!(info.kind, DeclKind::Struct);
        assert_eq!(info.persistable.len(), 1);
        assert_eq!(info.persistable[0].name, "id");
        assert_eq!(info.excluded.len(), 1);
        assert_eq!(info.excluded[0].name, "cached");
    }

    #[test]
    fn unit_struct_has_no_fields() {
        let input: DeriveInput = parse_quote!(struct Marker;);
        let info = DeclInfo::extract(&input).unwrap();
        assert_eq!(info.kind, DeclKind::UnitStruct);
        assert!(info.persistable.is_empty());
        assert!(info.excluded.is_empty());
    }

    #[test]
    fn rejects_unsupported_shapes() {
        let cases: [DeriveInput; 3] = [
            parse_quote!(enum E { A }),
            parse_quote!(union U { a: u32 }),
            parse_quote!(struct T(u32);),
        ];
        for input in cases {
            assert!(DeclInfo::extract(&input).is_err());
        }
    }
}
