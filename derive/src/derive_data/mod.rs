//! Parsing of the derive input into the descriptor model the compiler
//! pipeline consumes.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod decl;
mod field;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{DefaultExpr, FieldAttributes, TypeAttributes};
pub(crate) use decl::{DeclInfo, DeclKind};
pub(crate) use field::FieldDescriptor;
