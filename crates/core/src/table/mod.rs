//! Table model: raw declarations and their validated, canonical form.

mod declaration;
mod props;
mod types;
mod validation;

pub use declaration::{
    AttributeSpec, GlobalIndexDeclaration, GlobalIndexSpec, KeyRef, KeySpec,
    LocalIndexDeclaration, LocalIndexSpec, TableDeclaration,
};
pub use props::{BillingMode, RemovalPolicy, StreamViewType, TableProps};
pub use types::{Table, TableFlags};
pub use validation::{validate_table, validate_table_name};
