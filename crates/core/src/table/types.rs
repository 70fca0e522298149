use indexmap::IndexMap;

use super::declaration::TableDeclaration;
use super::props::TableProps;
use super::validation::validate_table;
use crate::error::Result;
use crate::index::{GlobalIndex, LocalIndex, PrimaryKey};
use crate::key::KeyRole;

/// Resolved feature flags for a table.
///
/// `scan` implies `query` and `auto` implies `mutation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableFlags {
    pub scan: bool,
    pub auto: bool,
    pub query: bool,
    pub mutation: bool,
    pub subscription: bool,
}

impl TableFlags {
    pub fn resolve(
        scan: bool,
        auto: bool,
        query: Option<bool>,
        mutation: Option<bool>,
        subscription: bool,
    ) -> Self {
        Self {
            scan,
            auto,
            query: scan || query.unwrap_or(true),
            mutation: auto || mutation.unwrap_or(true),
            subscription,
        }
    }
}

impl Default for TableFlags {
    fn default() -> Self {
        Self::resolve(false, false, None, None, false)
    }
}

/// A validated, canonical table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    base_name: String,
    table_name: String,
    primary_key: PrimaryKey,
    local_indexes: Vec<LocalIndex>,
    global_indexes: Vec<GlobalIndex>,
    attributes: IndexMap<String, String>,
    flags: TableFlags,
    props: TableProps,
}

impl Table {
    /// Normalizes and validates a declaration.
    ///
    /// `label` namespaces the display name as `<label>.<tableName>`; it
    /// falls back to the declaration's `prefix`.
    pub fn from_declaration(declaration: TableDeclaration, label: Option<&str>) -> Result<Self> {
        let TableDeclaration {
            table_name,
            partition_key,
            sort_key,
            attributes,
            global_secondary_indexes,
            local_secondary_indexes,
            scan,
            auto,
            subscription,
            query,
            mutation,
            prefix,
            table_props,
        } = declaration;

        let display_name = match label.map(str::to_string).or(prefix) {
            Some(label) => format!("{label}.{table_name}"),
            None => table_name.clone(),
        };
        let attributes = attributes.map(|spec| spec.into_map()).unwrap_or_default();

        let partition_key = partition_key.into_key(KeyRole::Partition, &attributes)?;
        let sort_key = sort_key
            .map(|key| key.into_key(KeyRole::Sort, &attributes))
            .transpose()?;

        let local_indexes = local_secondary_indexes
            .into_iter()
            .map(|spec| spec.into_index(&table_name, &attributes))
            .collect::<Result<Vec<_>>>()?;
        let global_indexes = global_secondary_indexes
            .into_iter()
            .map(|spec| spec.into_index(&table_name, &attributes))
            .collect::<Result<Vec<_>>>()?;

        let table = Self {
            base_name: table_name,
            table_name: display_name,
            primary_key: PrimaryKey::new(partition_key, sort_key),
            local_indexes,
            global_indexes,
            attributes,
            flags: TableFlags::resolve(scan, auto, query, mutation, subscription),
            props: table_props.unwrap_or_default(),
        };
        validate_table(&table)?;
        Ok(table)
    }

    /// Replaces the storage props.
    pub fn with_props(mut self, props: TableProps) -> Self {
        self.props = props;
        self
    }

    /// The declared table name. Used for type and operation names.
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// The display name, `<label>.<tableName>` when labelled.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn primary_key(&self) -> &PrimaryKey {
        &self.primary_key
    }

    pub fn local_indexes(&self) -> &[LocalIndex] {
        &self.local_indexes
    }

    pub fn global_indexes(&self) -> &[GlobalIndex] {
        &self.global_indexes
    }

    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    pub fn attribute_type(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn flags(&self) -> TableFlags {
        self.flags
    }

    pub fn props(&self) -> &TableProps {
        &self.props
    }

    /// Attributes written through the input type: everything except the
    /// primary key fields.
    pub fn input_attributes(&self) -> IndexMap<String, String> {
        let keys = self.primary_key.key_names();
        self.attributes
            .iter()
            .filter(|(name, _)| !keys.contains(&name.as_str()))
            .map(|(name, type_name)| (name.clone(), type_name.clone()))
            .collect()
    }

    /// `<Table>Input`, present only when the table has non-key attributes.
    pub fn input_type_name(&self) -> Option<String> {
        let keys = self.primary_key.key_names();
        self.attributes
            .keys()
            .any(|name| !keys.contains(&name.as_str()))
            .then(|| format!("{}Input", self.base_name))
    }
}
