use serde::Serialize;

use crate::key::{KeyAttribute, KeyInstance};

/// The table's primary key: partition key plus optional sort key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryKey {
    partition_key: KeyInstance,
    sort_key: Option<KeyInstance>,
}

impl PrimaryKey {
    pub fn new(partition_key: KeyInstance, sort_key: Option<KeyInstance>) -> Self {
        Self {
            partition_key,
            sort_key,
        }
    }

    pub fn partition_key(&self) -> &KeyInstance {
        &self.partition_key
    }

    pub fn sort_key(&self) -> Option<&KeyInstance> {
        self.sort_key.as_ref()
    }

    pub fn partition_name(&self) -> &str {
        self.partition_key.name()
    }

    pub fn sort_name(&self) -> Option<&str> {
        self.sort_key.as_ref().map(KeyInstance::name)
    }

    /// Key names in key-schema order (partition first).
    pub fn key_names(&self) -> Vec<&str> {
        std::iter::once(self.partition_name())
            .chain(self.sort_name())
            .collect()
    }

    /// Storage key schema: partition attribute and optional sort attribute.
    pub fn key_schema(&self) -> (KeyAttribute, Option<KeyAttribute>) {
        (
            self.partition_key.attribute(),
            self.sort_key.as_ref().map(KeyInstance::attribute),
        )
    }
}
