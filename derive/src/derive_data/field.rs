use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::{GenericArgument, Ident, PathArguments, Type};

use super::{DefaultExpr, FieldAttributes};

// -----------------------------------------------------------------------------
// Classification

/// What kind of member a field is, and therefore whether it takes part in
/// generated coding logic.
///
/// Struct bodies cannot declare computed or type-level members, so the only
/// excluded kind a derive input can produce is an explicit
/// `#[codable(skip)]` field. The generated logic treats those as if they
/// did not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldKind {
    Stored,
    Skipped,
}

impl FieldKind {
    /// Whether a member of this kind appears in the key schema and the
    /// encode/decode routines.
    pub fn is_persistable(self) -> bool {
        match self {
            FieldKind::Stored => true,
            FieldKind::Skipped => false,
        }
    }
}

// -----------------------------------------------------------------------------
// Extraction errors

/// Failure to lower one member declaration into a [`FieldDescriptor`].
///
/// Both are fatal for the whole type: the key schema depends on every
/// field being resolvable, so there is no best-effort output.
#[derive(Debug)]
pub(crate) enum ExtractionError {
    /// The member has no usable identifier (an unnamed field).
    MissingName(Span),
    /// The member's type must be inferred (`_`); inference is not
    /// supported, the key/type derivation is purely syntactic.
    MissingType(Span),
}

impl From<ExtractionError> for syn::Error {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::MissingName(span) => {
                syn::Error::new(span, "cannot determine a name for this field")
            }
            ExtractionError::MissingType(span) => syn::Error::new(
                span,
                "cannot determine this field's type; spell it out instead of `_`",
            ),
        }
    }
}

// -----------------------------------------------------------------------------
// Field descriptor

/// Everything the compiler pipeline needs to know about one member.
#[derive(Debug, Clone)]
pub(crate) struct FieldDescriptor {
    pub ident: Ident,
    /// `ident` as the key string.
    pub name: String,
    pub ty: Type,
    /// Whether `ty` is syntactically an `Option<...>` wrapper.
    pub is_optional: bool,
    /// The type driving leaf encode/decode: the wrapped type for optional
    /// fields, `ty` itself otherwise.
    pub coding_ty: Type,
    pub kind: FieldKind,
    /// Only feeds constructor synthesis (and skipped-field fill-in);
    /// irrelevant to coding.
    pub default_expr: Option<DefaultExpr>,
    /// Nested group keys to traverse before the field's own key,
    /// outermost first. Empty means top-level.
    pub nesting_path: Vec<String>,
}

impl FieldDescriptor {
    pub fn extract(field: &syn::Field) -> syn::Result<FieldDescriptor> {
        let ident = field
            .ident
            .clone()
            .ok_or(ExtractionError::MissingName(field.span()))?;

        if matches!(field.ty, Type::Infer(_)) {
            return Err(ExtractionError::MissingType(field.ty.span()).into());
        }

        let attrs = FieldAttributes::parse_attrs(&field.attrs)?;
        let kind = if attrs.skip {
            FieldKind::Skipped
        } else {
            FieldKind::Stored
        };

        let (is_optional, coding_ty) = match option_inner(&field.ty) {
            Some(inner) => (true, inner.clone()),
            None => (false, field.ty.clone()),
        };

        Ok(FieldDescriptor {
            name: ident.to_string(),
            ident,
            ty: field.ty.clone(),
            is_optional,
            coding_ty,
            kind,
            default_expr: attrs.default_expr,
            nesting_path: attrs.nesting_path,
        })
    }
}

/// The `T` of a syntactic `Option<T>` annotation.
///
/// This is a check on the written type, not its semantics: only the plain
/// `Option`/`option::Option` wrapper forms count.
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }

    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }

    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }

    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse::Parser;
    use syn::parse_quote;

    fn named_field(tokens: syn::Field) -> FieldDescriptor {
        FieldDescriptor::extract(&tokens).unwrap()
    }

    #[test]
    fn optionality_is_syntactic() {
        let field = named_field(parse_quote!(pub address: Option<String>));
        assert!(field.is_optional);
        assert_eq!(field.coding_ty, parse_quote!(String));

        let field = named_field(parse_quote!(pub address: std::option::Option<String>));
        assert!(field.is_optional);

        // A renamed wrapper does not count.
        let field = named_field(parse_quote!(pub address: Maybe<String>));
        assert!(!field.is_optional);
    }

    #[test]
    fn skip_classifies_as_not_persistable() {
        let field = named_field(parse_quote! {
            #[codable(skip)]
            cached: u32
        });
        assert_eq!(field.kind, FieldKind::Skipped);
        assert!(!field.kind.is_persistable());

        let field = named_field(parse_quote!(plain: u32));
        assert_eq!(field.kind, FieldKind::Stored);
        assert!(field.kind.is_persistable());
    }

    #[test]
    fn nesting_path_is_ordered() {
        let field = named_field(parse_quote! {
            #[nested_in("info", "person")]
            name: String
        });
        assert_eq!(field.nesting_path, ["info", "person"]);
    }

    #[test]
    fn unnamed_field_is_missing_name() {
        let field: syn::Field = syn::Field::parse_unnamed
            .parse2(quote::quote!(String))
            .unwrap();
        let err = FieldDescriptor::extract(&field).unwrap_err();
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn inferred_type_is_missing_type() {
        let err = FieldDescriptor::extract(&parse_quote!(x: _)).unwrap_err();
        assert!(err.to_string().contains("type"));
    }
}
