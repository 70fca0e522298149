//! Provisioning descriptors handed to the storage and API provisioners.

mod api;
mod table;

pub use api::{
    api_name, ApiDescriptor, AuthorizationConfig, AuthorizationMode, DataSourceDescriptor,
    UserPoolOptions, USER_POOL_AUTHORIZATION,
};
pub use table::{describe_table, format_table_plan, GsiDescriptor, LsiDescriptor, TableDescriptor};
