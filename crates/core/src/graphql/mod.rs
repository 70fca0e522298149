//! GraphQL type grammar.
//!
//! Parses type strings such as `"[String!]!"` into a structured [`TypeRef`] and
//! normalizes type names so that GraphQL-facing and storage-facing projections
//! agree on what a name refers to.

mod scalar;
mod type_ref;

pub use scalar::{is_valid_name, normalize_type_name, Scalar};
pub use type_ref::TypeRef;
