//! Key model: named key fields and their storage attribute encoding.

mod attribute;
mod instance;

pub use attribute::{AttributeType, KeyAttribute};
pub use instance::{KeyInstance, KeyRole};
