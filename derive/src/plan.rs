//! Container plans: which nested containers each coding routine acquires,
//! in what order, and which one each field reads from or writes to.
//!
//! Planning happens once per routine so that fields sharing a nesting-path
//! prefix share the container acquired for it, instead of re-walking the
//! path per field.

use std::collections::BTreeMap;

use crate::derive_data::FieldDescriptor;

// -----------------------------------------------------------------------------
// Identifiers

/// A planned container. Id 0 is always the root container of the routine;
/// nested containers are numbered in order of first need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct ContainerId(pub usize);

impl ContainerId {
    pub const ROOT: ContainerId = ContainerId(0);
}

/// Which routine a plan is for. Decode plans carry failure contexts for
/// required nested fields; encode plans never fail on missing containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Decode,
    Encode,
}

// -----------------------------------------------------------------------------
// Steps

/// One container acquisition: open the group `key` inside `parent`,
/// yielding `produces`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ContainerStep {
    pub parent: ContainerId,
    pub key: String,
    pub produces: ContainerId,
}

/// The error context reported when a required nested field's key cannot
/// be reached while decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FailureContext {
    pub path: Vec<String>,
    pub key: String,
}

/// One field's slice of the plan.
#[derive(Debug)]
pub(crate) struct FieldPlan<'a> {
    pub field: &'a FieldDescriptor,
    /// The acquisitions this field is the first to need, in traversal
    /// order. Empty when every container on its path already exists.
    pub steps: Vec<ContainerStep>,
    /// The container the field's own key lives in.
    pub terminal: ContainerId,
    /// Present for required fields behind a nesting path.
    pub failure: Option<FailureContext>,
}

// -----------------------------------------------------------------------------
// Plan

#[derive(Debug)]
pub(crate) struct ContainerPlan<'a> {
    pub fields: Vec<FieldPlan<'a>>,
    /// Total number of containers, the root included.
    pub container_count: usize,
}

impl<'a> ContainerPlan<'a> {
    pub fn build(fields: &'a [FieldDescriptor], direction: Direction) -> ContainerPlan<'a> {
        // (parent, key) -> container index. Identity of a nested container
        // is its whole path from the root, not its key alone, so `a.b` and
        // `c.b` stay distinct.
        let mut known: BTreeMap<(usize, String), usize> = BTreeMap::new();
        let mut next_id = 1;
        let mut plans = Vec::with_capacity(fields.len());

        for field in fields {
            let mut steps = Vec::new();
            let mut current = ContainerId::ROOT;

            for segment in &field.nesting_path {
                let slot = (current.0, segment.clone());
                current = match known.get(&slot) {
                    Some(&existing) => ContainerId(existing),
                    None => {
                        let produced = ContainerId(next_id);
                        known.insert(slot, next_id);
                        next_id += 1;
                        steps.push(ContainerStep {
                            parent: current,
                            key: segment.clone(),
                            produces: produced,
                        });
                        produced
                    }
                };
            }

            let failure = (direction == Direction::Decode
                && !field.is_optional
                && !field.nesting_path.is_empty())
            .then(|| FailureContext {
                path: field.nesting_path.clone(),
                key: field.name.clone(),
            });

            plans.push(FieldPlan {
                field,
                steps,
                terminal: current,
                failure,
            });
        }

        ContainerPlan {
            fields: plans,
            container_count: next_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    use crate::derive_data::DeclInfo;

    fn fields_of(input: &syn::DeriveInput) -> Vec<FieldDescriptor> {
        DeclInfo::extract(input).unwrap().persistable
    }

    #[test]
    fn shared_prefixes_reuse_containers() {
        let input = parse_quote! {
            struct Person {
                #[nested_in("info", "person")]
                name: String,
                #[nested_in("info")]
                address: Option<String>,
                #[nested_in("info", "person", "privacy")]
                gender: Option<String>,
            }
        };
        let fields = fields_of(&input);
        let plan = ContainerPlan::build(&fields, Direction::Decode);

        // info, person, privacy, plus the root.
        assert_eq!(plan.container_count, 4);

        // `name` opens info then person; `address` reuses info with no new
        // steps; `gender` only adds privacy under the existing person.
        assert_eq!(plan.fields[0].steps.len(), 2);
        assert_eq!(plan.fields[0].terminal, ContainerId(2));
        assert!(plan.fields[1].steps.is_empty());
        assert_eq!(plan.fields[1].terminal, ContainerId(1));
        assert_eq!(plan.fields[2].steps.len(), 1);
        assert_eq!(plan.fields[2].steps[0].parent, ContainerId(2));
        assert_eq!(plan.fields[2].terminal, ContainerId(3));
    }

    #[test]
    fn same_key_under_different_parents_stays_distinct() {
        let input = parse_quote! {
            struct S {
                #[nested_in("a", "shared")]
                x: u32,
                #[nested_in("b", "shared")]
                y: u32,
            }
        };
        let fields = fields_of(&input);
        let plan = ContainerPlan::build(&fields, Direction::Encode);
        assert_eq!(plan.container_count, 5);
        assert_ne!(plan.fields[0].terminal, plan.fields[1].terminal);
    }

    #[test]
    fn failure_context_only_for_required_nested_decodes() {
        let input = parse_quote! {
            struct S {
                id: i64,
                #[nested_in("info")]
                name: String,
                #[nested_in("info")]
                address: Option<String>,
            }
        };
        let fields = fields_of(&input);

        let decode = ContainerPlan::build(&fields, Direction::Decode);
        assert!(decode.fields[0].failure.is_none());
        let failure = decode.fields[1].failure.as_ref().unwrap();
        assert_eq!(failure.path, ["info"]);
        assert_eq!(failure.key, "name");
        assert!(decode.fields[2].failure.is_none());

        let encode = ContainerPlan::build(&fields, Direction::Encode);
        assert!(encode.fields.iter().all(|f| f.failure.is_none()));
    }
}
