//! dynasync_core - schema synthesis and resolver binding for key-value backed GraphQL APIs.
//!
//! Turns declarative table descriptions into a GraphQL schema, a matching set of
//! storage resolver bindings, and the storage/API descriptors needed to provision them.
//! Everything in this crate is a pure, synchronous transformation over in-memory data;
//! the only I/O lives in [`config`], which reads the declarative config document.

pub mod config;
pub mod error;
pub mod graphql;
pub mod index;
pub mod key;
pub mod naming;
pub mod provision;
pub mod resolver;
pub mod schema;
pub mod synth;
pub mod table;

pub use config::DynasyncConfig;
pub use error::{DynasyncError, Result};
pub use synth::{synthesize, SynthesisOutput, Synthesizer};
pub use table::{Table, TableDeclaration};
