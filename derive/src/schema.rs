//! The key schema: the deduplicated, ordered set of coding keys a type
//! needs, covering field names and nesting-path segments alike.

use std::collections::BTreeSet;

use proc_macro2::Ident;
use quote::format_ident;

use crate::derive_data::FieldDescriptor;

// -----------------------------------------------------------------------------
// Keys

/// One coding key, with the enum variant that will stand for it.
#[derive(Debug, Clone)]
pub(crate) struct Key {
    pub name: String,
    pub variant: Ident,
}

/// All coding keys of a type, in first-use order.
///
/// Order is the fields' declaration order, and within one field the field's
/// own name followed by its nesting-path segments from outermost to
/// innermost. Duplicates are dropped on later sightings, so a segment
/// shared between fields appears exactly once, where it was first needed.
#[derive(Debug, Default)]
pub(crate) struct KeySchema {
    keys: Vec<Key>,
}

impl KeySchema {
    pub fn build(fields: &[FieldDescriptor]) -> KeySchema {
        let mut seen = BTreeSet::new();
        let mut names = Vec::new();

        let mut record = |name: &str| {
            if seen.insert(name.to_owned()) {
                names.push(name.to_owned());
            }
        };
        for field in fields {
            record(&field.name);
            for segment in &field.nesting_path {
                record(segment);
            }
        }

        // Variants are assigned after the full name set is known, so the
        // fallback names can steer around a key that is itself literally
        // `__key<N>`.
        let mut fallback = FallbackVariants::new(&seen);
        let keys = names
            .into_iter()
            .map(|name| {
                let variant = variant_ident(&name).unwrap_or_else(|| fallback.next());
                Key { name, variant }
            })
            .collect();
        KeySchema { keys }
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The variant standing for `name`.
    ///
    /// Callers only ask for names the schema was built from, so a miss is
    /// a bug in the pipeline rather than bad input.
    pub fn variant(&self, name: &str) -> &Ident {
        self.keys
            .iter()
            .find(|key| key.name == name)
            .map(|key| &key.variant)
            .expect("key missing from schema")
    }
}

// Key strings are taken verbatim as variant names when they are legal
// identifiers, so the generated match arms read like the serialized keys.
// Anything else (keywords, exotic segment strings) falls back to a
// counter-derived name.
fn variant_ident(name: &str) -> Option<Ident> {
    syn::parse_str::<Ident>(name)
        .ok()
        .map(|_| Ident::new(name, proc_macro2::Span::call_site()))
}

/// `__key0`, `__key1`, ... skipping any candidate that is itself a key
/// string in the schema. Verbatim variants are exactly the key names, so
/// steering around the name set keeps every variant distinct.
struct FallbackVariants<'a> {
    taken: &'a BTreeSet<String>,
    next: usize,
}

impl<'a> FallbackVariants<'a> {
    fn new(taken: &'a BTreeSet<String>) -> Self {
        Self { taken, next: 0 }
    }

    fn next(&mut self) -> Ident {
        loop {
            let candidate = format!("__key{}", self.next);
            self.next += 1;
            if !self.taken.contains(&candidate) {
                return format_ident!("{}", candidate);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    use crate::derive_data::DeclInfo;

    fn schema_of(input: syn::DeriveInput) -> KeySchema {
        let info = DeclInfo::extract(&input).unwrap();
        KeySchema::build(&info.persistable)
    }

    #[test]
    fn first_use_order_with_dedup() {
        let schema = schema_of(parse_quote! {
            struct Person {
                id: i64,
                #[nested_in("info", "person")]
                name: String,
                #[nested_in("info")]
                address: Option<String>,
                #[nested_in("info", "person", "privacy")]
                gender: Option<String>,
            }
        });
        let names: Vec<&str> = schema.keys().iter().map(|k| k.name.as_str()).collect();
        assert_eq!(
            names,
            ["id", "name", "info", "person", "address", "gender", "privacy"]
        );
    }

    #[test]
    fn variants_mirror_key_names() {
        let schema = schema_of(parse_quote! {
            struct S {
                #[nested_in("outer")]
                value: u32,
            }
        });
        assert_eq!(schema.variant("value"), "value");
        assert_eq!(schema.variant("outer"), "outer");
    }

    #[test]
    fn non_identifier_segment_gets_fallback_variant() {
        let schema = schema_of(parse_quote! {
            struct S {
                #[nested_in("per-user")]
                value: u32,
            }
        });
        assert_eq!(schema.variant("per-user"), "__key0");
    }

    #[test]
    fn fallback_variants_steer_around_colliding_field_names() {
        let schema = schema_of(parse_quote! {
            struct S {
                __key0: u32,
                #[nested_in("per-user")]
                value: u32,
            }
        });
        assert_eq!(schema.variant("__key0"), "__key0");
        assert_eq!(schema.variant("per-user"), "__key1");

        let variants: BTreeSet<String> = schema
            .keys()
            .iter()
            .map(|key| key.variant.to_string())
            .collect();
        assert_eq!(variants.len(), schema.keys().len());
    }

    #[test]
    fn skipped_fields_never_reach_the_schema() {
        let schema = schema_of(parse_quote! {
            struct S {
                kept: u32,
                #[codable(skip)]
                dropped: u32,
            }
        });
        let names: Vec<&str> = schema.keys().iter().map(|k| k.name.as_str()).collect();
        assert_eq!(names, ["kept"]);
    }
}
