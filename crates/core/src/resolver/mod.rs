//! Resolver binding: maps each planned operation to a storage action and its
//! mapping templates.

mod binding;
mod template;

pub use binding::{bind_table, data_source_name, ResolverBinding};
pub use template::{
    KeyAssignment, KeyCondition, KeyShape, KeyValue, RequestTemplate, ResponseTemplate,
    StorageAction, TEMPLATE_VERSION,
};
