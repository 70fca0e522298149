//! Index model: primary keys, local and global secondary indexes.

mod global;
mod local;
mod primary;
mod projection;

pub use global::{Capacity, GlobalIndex};
pub use local::LocalIndex;
pub use primary::PrimaryKey;
pub use projection::Projection;
