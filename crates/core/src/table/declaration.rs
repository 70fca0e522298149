use indexmap::IndexMap;
use serde::Deserialize;

use super::TableProps;
use crate::error::Result;
use crate::index::{Capacity, GlobalIndex, LocalIndex};
use crate::key::{KeyInstance, KeyRole};

/// A key as it appears in a declaration: a bare name, a structured
/// reference, or an already-built key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum KeySpec {
    Name(String),
    Key(KeyRef),
    #[serde(skip)]
    Built(KeyInstance),
}

/// Structured key reference.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyRef {
    pub name: String,
    #[serde(default, rename = "type")]
    pub type_name: Option<String>,
    #[serde(default)]
    pub key_type: Option<KeyRole>,
}

impl KeySpec {
    pub fn name(&self) -> &str {
        match self {
            KeySpec::Name(name) => name,
            KeySpec::Key(key) => &key.name,
            KeySpec::Built(key) => key.name(),
        }
    }

    /// Builds the key, taking its semantic type from `attributes` unless the
    /// declaration names one. Built keys always take the attribute type.
    pub(crate) fn into_key(
        self,
        role: KeyRole,
        attributes: &IndexMap<String, String>,
    ) -> Result<KeyInstance> {
        let declared = |name: &str| attributes.get(name).map(String::as_str);
        match self {
            KeySpec::Name(name) => {
                let type_name = declared(&name);
                KeyInstance::new(name, type_name, role)
            }
            KeySpec::Key(KeyRef {
                name,
                type_name,
                key_type,
            }) => {
                let type_name = type_name.as_deref().or_else(|| declared(&name));
                KeyInstance::new(name.as_str(), type_name, key_type.unwrap_or(role))
            }
            KeySpec::Built(key) => key.retype(attributes),
        }
    }
}

impl From<&str> for KeySpec {
    fn from(name: &str) -> Self {
        KeySpec::Name(name.to_string())
    }
}

impl From<String> for KeySpec {
    fn from(name: String) -> Self {
        KeySpec::Name(name)
    }
}

impl From<KeyRef> for KeySpec {
    fn from(key: KeyRef) -> Self {
        KeySpec::Key(key)
    }
}

impl From<KeyInstance> for KeySpec {
    fn from(key: KeyInstance) -> Self {
        KeySpec::Built(key)
    }
}

/// Attribute declarations: a single name, a list of names, or a
/// name-to-type map. Bare names are typed `string`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AttributeSpec {
    Single(String),
    List(Vec<String>),
    Map(IndexMap<String, String>),
}

impl AttributeSpec {
    pub fn into_map(self) -> IndexMap<String, String> {
        match self {
            AttributeSpec::Single(name) => IndexMap::from([(name, "string".to_string())]),
            AttributeSpec::List(names) => names
                .into_iter()
                .map(|name| (name, "string".to_string()))
                .collect(),
            AttributeSpec::Map(map) => map,
        }
    }
}

/// A global secondary index entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum GlobalIndexSpec {
    Name(String),
    Declared(GlobalIndexDeclaration),
    #[serde(skip)]
    Built(GlobalIndex),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalIndexDeclaration {
    pub partition_key: KeySpec,
    #[serde(default)]
    pub sort_key: Option<KeySpec>,
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub index_name: Option<String>,
    #[serde(default)]
    pub list: bool,
    #[serde(default)]
    pub capacity: Capacity,
}

impl GlobalIndexDeclaration {
    pub fn new(partition_key: impl Into<KeySpec>) -> Self {
        Self {
            partition_key: partition_key.into(),
            sort_key: None,
            include: Vec::new(),
            index_name: None,
            list: false,
            capacity: Capacity::default(),
        }
    }

    pub fn with_sort_key(mut self, sort_key: impl Into<KeySpec>) -> Self {
        self.sort_key = Some(sort_key.into());
        self
    }

    pub fn with_include<I, S>(mut self, include: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = include.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.index_name = Some(name.into());
        self
    }

    pub fn with_list(mut self, list: bool) -> Self {
        self.list = list;
        self
    }

    pub fn with_capacity(mut self, capacity: Capacity) -> Self {
        self.capacity = capacity;
        self
    }
}

impl GlobalIndexSpec {
    pub(crate) fn into_index(
        self,
        table_name: &str,
        attributes: &IndexMap<String, String>,
    ) -> Result<GlobalIndex> {
        let declaration = match self {
            GlobalIndexSpec::Built(index) => return index.retype(attributes),
            GlobalIndexSpec::Name(name) => GlobalIndexDeclaration::new(name),
            GlobalIndexSpec::Declared(declaration) => declaration,
        };

        let partition_key = declaration
            .partition_key
            .into_key(KeyRole::Partition, attributes)?;
        let sort_key = declaration
            .sort_key
            .map(|key| key.into_key(KeyRole::Sort, attributes))
            .transpose()?;
        let name = declaration.index_name.unwrap_or_else(|| {
            GlobalIndex::default_name(
                table_name,
                partition_key.name(),
                sort_key.as_ref().map(KeyInstance::name),
            )
        });

        Ok(GlobalIndex::new(
            name,
            partition_key,
            sort_key,
            declaration.list,
            &declaration.include,
            declaration.capacity,
        ))
    }
}

impl From<&str> for GlobalIndexSpec {
    fn from(partition_key: &str) -> Self {
        GlobalIndexSpec::Name(partition_key.to_string())
    }
}

impl From<GlobalIndexDeclaration> for GlobalIndexSpec {
    fn from(declaration: GlobalIndexDeclaration) -> Self {
        GlobalIndexSpec::Declared(declaration)
    }
}

impl From<GlobalIndex> for GlobalIndexSpec {
    fn from(index: GlobalIndex) -> Self {
        GlobalIndexSpec::Built(index)
    }
}

/// A local secondary index entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LocalIndexSpec {
    Name(String),
    Declared(LocalIndexDeclaration),
    #[serde(skip)]
    Built(LocalIndex),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalIndexDeclaration {
    pub sort_key: KeySpec,
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub index_name: Option<String>,
}

impl LocalIndexDeclaration {
    pub fn new(sort_key: impl Into<KeySpec>) -> Self {
        Self {
            sort_key: sort_key.into(),
            include: Vec::new(),
            index_name: None,
        }
    }

    pub fn with_include<I, S>(mut self, include: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = include.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.index_name = Some(name.into());
        self
    }
}

impl LocalIndexSpec {
    pub(crate) fn into_index(
        self,
        table_name: &str,
        attributes: &IndexMap<String, String>,
    ) -> Result<LocalIndex> {
        let declaration = match self {
            LocalIndexSpec::Built(index) => return index.retype(attributes),
            LocalIndexSpec::Name(name) => LocalIndexDeclaration::new(name),
            LocalIndexSpec::Declared(declaration) => declaration,
        };

        let sort_key = declaration.sort_key.into_key(KeyRole::Sort, attributes)?;
        let name = declaration
            .index_name
            .unwrap_or_else(|| LocalIndex::default_name(table_name, sort_key.name()));

        Ok(LocalIndex::new(name, sort_key, &declaration.include))
    }
}

impl From<&str> for LocalIndexSpec {
    fn from(sort_key: &str) -> Self {
        LocalIndexSpec::Name(sort_key.to_string())
    }
}

impl From<LocalIndexDeclaration> for LocalIndexSpec {
    fn from(declaration: LocalIndexDeclaration) -> Self {
        LocalIndexSpec::Declared(declaration)
    }
}

impl From<LocalIndex> for LocalIndexSpec {
    fn from(index: LocalIndex) -> Self {
        LocalIndexSpec::Built(index)
    }
}

/// Raw table declaration, as written in the config document or assembled
/// through the `with_*` builders.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDeclaration {
    pub table_name: String,
    pub partition_key: KeySpec,
    #[serde(default)]
    pub sort_key: Option<KeySpec>,
    #[serde(default)]
    pub attributes: Option<AttributeSpec>,
    #[serde(default)]
    pub global_secondary_indexes: Vec<GlobalIndexSpec>,
    #[serde(default)]
    pub local_secondary_indexes: Vec<LocalIndexSpec>,
    #[serde(default)]
    pub scan: bool,
    #[serde(default)]
    pub auto: bool,
    #[serde(default)]
    pub subscription: bool,
    #[serde(default)]
    pub query: Option<bool>,
    #[serde(default)]
    pub mutation: Option<bool>,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default, alias = "props")]
    pub table_props: Option<TableProps>,
}

impl TableDeclaration {
    pub fn new(table_name: impl Into<String>, partition_key: impl Into<KeySpec>) -> Self {
        Self {
            table_name: table_name.into(),
            partition_key: partition_key.into(),
            sort_key: None,
            attributes: None,
            global_secondary_indexes: Vec::new(),
            local_secondary_indexes: Vec::new(),
            scan: false,
            auto: false,
            subscription: false,
            query: None,
            mutation: None,
            prefix: None,
            table_props: None,
        }
    }

    pub fn with_sort_key(mut self, sort_key: impl Into<KeySpec>) -> Self {
        self.sort_key = Some(sort_key.into());
        self
    }

    /// Sets the attribute map from `(name, type)` pairs, keeping their order.
    pub fn with_attributes<I, K, V>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.attributes = Some(AttributeSpec::Map(
            attributes
                .into_iter()
                .map(|(name, type_name)| (name.into(), type_name.into()))
                .collect(),
        ));
        self
    }

    pub fn with_global_index(mut self, index: impl Into<GlobalIndexSpec>) -> Self {
        self.global_secondary_indexes.push(index.into());
        self
    }

    pub fn with_local_index(mut self, index: impl Into<LocalIndexSpec>) -> Self {
        self.local_secondary_indexes.push(index.into());
        self
    }

    pub fn with_scan(mut self, scan: bool) -> Self {
        self.scan = scan;
        self
    }

    pub fn with_auto(mut self, auto: bool) -> Self {
        self.auto = auto;
        self
    }

    pub fn with_subscription(mut self, subscription: bool) -> Self {
        self.subscription = subscription;
        self
    }

    pub fn with_query(mut self, query: bool) -> Self {
        self.query = Some(query);
        self
    }

    pub fn with_mutation(mut self, mutation: bool) -> Self {
        self.mutation = Some(mutation);
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_table_props(mut self, props: TableProps) -> Self {
        self.table_props = Some(props);
        self
    }
}
