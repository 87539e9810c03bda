//! The closed registry of custom attributes this macro recognizes.
//!
//! Every attribute is parsed into a [`CustomAttribute`] variant by the one
//! parser registered for its name; call sites never match on raw attribute
//! strings.

use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, LitStr, Token};

pub(crate) const NESTED_IN_ATTRIBUTE_NAME: &str = "nested_in";
pub(crate) const CODABLE_ATTRIBUTE_NAME: &str = "codable";

// -----------------------------------------------------------------------------
// Registry

/// A recognized custom attribute, already argument-checked.
#[derive(Debug, Clone)]
pub(crate) enum CustomAttribute {
    /// `#[nested_in("a", "b")]`: the field's nesting path, outermost first.
    Nested(Vec<String>),
    /// `#[codable(skip)]`: exclude the field from all generated logic.
    Skip,
    /// `#[codable(default = expr)]` or `#[codable(default)]`.
    Default(DefaultExpr),
    /// `#[codable(constructor)]`: emit a memberwise `fn new` (type level).
    Constructor,
}

/// The default used for a field the generated code must fill itself.
#[derive(Debug, Clone)]
pub(crate) enum DefaultExpr {
    /// Bare `default`: use `Default::default()`.
    Trait,
    /// `default = expr`: use the given expression.
    Expr(Expr),
}

impl CustomAttribute {
    /// Runs the parser registered for `attr`'s name, if any.
    ///
    /// Unrecognized attribute names yield `Ok(vec![])`; they belong to
    /// other macros. Recognized names with malformed arguments are errors.
    pub fn parse(attr: &Attribute) -> syn::Result<Vec<CustomAttribute>> {
        if attr.path().is_ident(NESTED_IN_ATTRIBUTE_NAME) {
            return Self::parse_nested_in(attr);
        }
        if attr.path().is_ident(CODABLE_ATTRIBUTE_NAME) {
            return Self::parse_codable(attr);
        }
        Ok(Vec::new())
    }

    // `#[nested_in("a", "b", ...)]`: unlabeled string literals, in order.
    fn parse_nested_in(attr: &Attribute) -> syn::Result<Vec<CustomAttribute>> {
        let segments =
            attr.parse_args_with(Punctuated::<LitStr, Token![,]>::parse_terminated)?;
        Ok(vec![CustomAttribute::Nested(
            segments.iter().map(LitStr::value).collect(),
        )])
    }

    // `#[codable(skip, default = expr, constructor, ...)]`.
    fn parse_codable(attr: &Attribute) -> syn::Result<Vec<CustomAttribute>> {
        let mut parsed = Vec::new();
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                parsed.push(CustomAttribute::Skip);
                return Ok(());
            }
            if meta.path.is_ident("default") {
                let default = if meta.input.peek(Token![=]) {
                    DefaultExpr::Expr(meta.value()?.parse()?)
                } else {
                    DefaultExpr::Trait
                };
                parsed.push(CustomAttribute::Default(default));
                return Ok(());
            }
            if meta.path.is_ident("constructor") {
                parsed.push(CustomAttribute::Constructor);
                return Ok(());
            }
            Err(meta.error("unknown `codable` attribute"))
        })?;
        Ok(parsed)
    }
}

// -----------------------------------------------------------------------------
// Field attributes

/// The custom attributes legal on a field.
#[derive(Debug, Default)]
pub(crate) struct FieldAttributes {
    pub nesting_path: Vec<String>,
    pub skip: bool,
    pub default_expr: Option<DefaultExpr>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = FieldAttributes::default();
        for attr in attrs {
            for custom in CustomAttribute::parse(attr)? {
                match custom {
                    CustomAttribute::Nested(path) => result.nesting_path = path,
                    CustomAttribute::Skip => result.skip = true,
                    CustomAttribute::Default(default) => {
                        result.default_expr = Some(default);
                    }
                    CustomAttribute::Constructor => {
                        return Err(syn::Error::new_spanned(
                            attr,
                            "`codable(constructor)` can only be attached to the type",
                        ));
                    }
                }
            }
        }
        Ok(result)
    }
}

// -----------------------------------------------------------------------------
// Type attributes

/// The custom attributes legal on the derive target itself.
#[derive(Debug, Default)]
pub(crate) struct TypeAttributes {
    pub constructor: bool,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = TypeAttributes::default();
        for attr in attrs {
            for custom in CustomAttribute::parse(attr)? {
                match custom {
                    CustomAttribute::Constructor => result.constructor = true,
                    CustomAttribute::Nested(_) => {
                        return Err(syn::Error::new_spanned(
                            attr,
                            "`nested_in` can only be attached to fields",
                        ));
                    }
                    CustomAttribute::Skip | CustomAttribute::Default(_) => {
                        return Err(syn::Error::new_spanned(
                            attr,
                            "this `codable` attribute can only be attached to fields",
                        ));
                    }
                }
            }
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn nested_in_collects_segments_in_order() {
        let attr: Attribute = parse_quote!(#[nested_in("info", "person")]);
        let parsed = CustomAttribute::parse(&attr).unwrap();
        assert!(
            matches!(&parsed[..], [CustomAttribute::Nested(path)] if path == &["info", "person"])
        );
    }

    #[test]
    fn foreign_attributes_are_ignored() {
        let attr: Attribute = parse_quote!(#[serde(rename = "x")]);
        assert!(CustomAttribute::parse(&attr).unwrap().is_empty());
    }

    #[test]
    fn constructor_is_rejected_on_fields() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[codable(constructor)])];
        assert!(FieldAttributes::parse_attrs(&attrs).is_err());
    }

    #[test]
    fn nested_in_is_rejected_on_types() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[nested_in("info")])];
        assert!(TypeAttributes::parse_attrs(&attrs).is_err());
    }

    #[test]
    fn unknown_codable_argument_is_an_error() {
        let attr: Attribute = parse_quote!(#[codable(rename = "x")]);
        assert!(CustomAttribute::parse(&attr).is_err());
    }
}
