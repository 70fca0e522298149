use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::Projection;
use crate::error::Result;
use crate::key::KeyInstance;
use crate::naming::capitalize;

/// Provisioned read/write capacity. Absent values mean on-demand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capacity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write: Option<u32>,
}

/// Global secondary index: its own partition key and optional sort key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalIndex {
    name: String,
    partition_key: KeyInstance,
    sort_key: Option<KeyInstance>,
    list: bool,
    projection: Projection,
    capacity: Capacity,
}

impl GlobalIndex {
    pub fn new(
        name: impl Into<String>,
        partition_key: KeyInstance,
        sort_key: Option<KeyInstance>,
        list: bool,
        include: &[String],
        capacity: Capacity,
    ) -> Self {
        Self {
            name: name.into(),
            partition_key,
            sort_key,
            list,
            projection: Projection::from_include(include),
            capacity,
        }
    }

    /// `global<TableName><PartitionKey>[<SortKey>]`
    pub fn default_name(table_name: &str, partition_key: &str, sort_key: Option<&str>) -> String {
        let mut name = format!(
            "global{}{}",
            capitalize(table_name),
            capitalize(partition_key)
        );
        if let Some(sort_key) = sort_key {
            name.push_str(&capitalize(sort_key));
        }
        name
    }

    pub(crate) fn retype(mut self, attributes: &IndexMap<String, String>) -> Result<Self> {
        self.partition_key = self.partition_key.retype(attributes)?;
        self.sort_key = self.sort_key.map(|key| key.retype(attributes)).transpose()?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn partition_key(&self) -> &KeyInstance {
        &self.partition_key
    }

    pub fn sort_key(&self) -> Option<&KeyInstance> {
        self.sort_key.as_ref()
    }

    /// Whether the index was explicitly declared as list-producing.
    pub fn is_list_flagged(&self) -> bool {
        self.list
    }

    /// Natural result cardinality: a list unless a sort key narrows it down,
    /// or whenever the index is explicitly list-flagged.
    pub fn is_list(&self) -> bool {
        self.list || self.sort_key.is_none()
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KeyRole;

    fn key(name: &str) -> KeyInstance {
        KeyInstance::new(name, Some("String!"), KeyRole::Partition).unwrap()
    }

    #[test]
    fn test_default_name() {
        assert_eq!(GlobalIndex::default_name("Dog", "name", None), "globalDogName");
        assert_eq!(
            GlobalIndex::default_name("Dog", "name", Some("age")),
            "globalDogNameAge"
        );
    }

    #[test]
    fn test_projection_from_include() {
        let plain = GlobalIndex::new("first", key("MyKey"), None, false, &[], Capacity::default());
        assert_eq!(plain.projection(), &Projection::All);

        let keys_only = GlobalIndex::new(
            "second",
            key("MyKey"),
            None,
            false,
            &["keyonly".to_string()],
            Capacity::default(),
        );
        assert_eq!(keys_only.projection(), &Projection::KeysOnly);

        let include = GlobalIndex::new(
            "third",
            key("MyKey"),
            None,
            false,
            &["include".to_string()],
            Capacity::default(),
        );
        assert_eq!(
            include.projection(),
            &Projection::Include(vec!["include".to_string()])
        );
    }

    #[test]
    fn test_is_list_cardinality() {
        let no_sort = GlobalIndex::new("a", key("name"), None, false, &[], Capacity::default());
        assert!(no_sort.is_list());
        assert!(!no_sort.is_list_flagged());

        let with_sort = GlobalIndex::new(
            "b",
            key("name"),
            Some(key("age").with_role(KeyRole::Sort)),
            false,
            &[],
            Capacity::default(),
        );
        assert!(!with_sort.is_list());

        let flagged = GlobalIndex::new(
            "c",
            key("name"),
            Some(key("age").with_role(KeyRole::Sort)),
            true,
            &[],
            Capacity::default(),
        );
        assert!(flagged.is_list());
    }

    #[test]
    fn test_capacity_is_recorded() {
        let capacity = Capacity {
            read: Some(5),
            write: None,
        };
        let index = GlobalIndex::new("a", key("name"), None, false, &[], capacity);
        assert_eq!(index.capacity().read, Some(5));
        assert_eq!(index.capacity().write, None);
    }
}
