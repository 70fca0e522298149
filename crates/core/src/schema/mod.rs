//! Schema synthesis: type registry, root fields and deferred SDL rendering.

mod auxiliary;
mod builder;
mod intermediate;
mod registry;
mod render;

pub use auxiliary::{AuxiliaryTypes, TypeDefinition, TypeShape};
pub use builder::SchemaBuilder;
pub use intermediate::{
    fields_from_map, ArgumentDefinition, FieldDefinition, IntermediateType, TypeBody, TypeCategory,
};
pub use registry::TypeRegistry;
