//! Storage table descriptors (Functional Core - pure data).

use serde::Serialize;

use crate::index::{Capacity, Projection};
use crate::key::KeyAttribute;
use crate::table::{BillingMode, Table, TableProps};

/// Everything the storage provisioner needs to create one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDescriptor {
    pub table_name: String,
    pub partition_key: KeyAttribute,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_key: Option<KeyAttribute>,
    /// Every attribute used as a key anywhere on the table, listed once.
    pub attribute_definitions: Vec<KeyAttribute>,
    pub global_secondary_indexes: Vec<GsiDescriptor>,
    pub local_secondary_indexes: Vec<LsiDescriptor>,
    pub props: TableProps,
}

/// Global secondary index descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GsiDescriptor {
    pub index_name: String,
    pub partition_key: KeyAttribute,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_key: Option<KeyAttribute>,
    pub projection: Projection,
    pub capacity: Capacity,
}

/// Local secondary index descriptor. Shares the table's partition key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LsiDescriptor {
    pub index_name: String,
    pub sort_key: KeyAttribute,
    pub projection: Projection,
}

/// Builds the storage descriptor for a validated table.
pub fn describe_table(table: &Table) -> TableDescriptor {
    let (partition_key, sort_key) = table.primary_key().key_schema();

    let global_secondary_indexes: Vec<GsiDescriptor> = table
        .global_indexes()
        .iter()
        .map(|index| GsiDescriptor {
            index_name: index.name().to_string(),
            partition_key: index.partition_key().attribute(),
            sort_key: index.sort_key().map(|key| key.attribute()),
            projection: index.projection().clone(),
            capacity: index.capacity(),
        })
        .collect();

    let local_secondary_indexes: Vec<LsiDescriptor> = table
        .local_indexes()
        .iter()
        .map(|index| LsiDescriptor {
            index_name: index.name().to_string(),
            sort_key: index.sort_key().attribute(),
            projection: index.projection().clone(),
        })
        .collect();

    let mut attribute_definitions: Vec<KeyAttribute> = Vec::new();
    let candidates = std::iter::once(&partition_key)
        .chain(sort_key.as_ref())
        .chain(global_secondary_indexes.iter().flat_map(|gsi| {
            std::iter::once(&gsi.partition_key).chain(gsi.sort_key.as_ref())
        }))
        .chain(local_secondary_indexes.iter().map(|lsi| &lsi.sort_key));
    for attribute in candidates {
        if !attribute_definitions
            .iter()
            .any(|known| known.name == attribute.name)
        {
            attribute_definitions.push(attribute.clone());
        }
    }

    TableDescriptor {
        table_name: table.table_name().to_string(),
        partition_key,
        sort_key,
        attribute_definitions,
        global_secondary_indexes,
        local_secondary_indexes,
        props: table.props().clone(),
    }
}

/// Pure function: Format a table descriptor for display.
pub fn format_table_plan(descriptor: &TableDescriptor) -> Vec<String> {
    let mut lines = vec![
        format!("+ Create table: {}", descriptor.table_name),
        format!(
            "  Partition key: {} ({})",
            descriptor.partition_key.name,
            descriptor.partition_key.attribute_type.as_str()
        ),
    ];
    if let Some(sk) = &descriptor.sort_key {
        lines.push(format!(
            "  Sort key: {} ({})",
            sk.name,
            sk.attribute_type.as_str()
        ));
    }
    for gsi in &descriptor.global_secondary_indexes {
        lines.push(format!(
            "  + GSI: {} [{}]",
            gsi.index_name,
            gsi.projection.projection_type()
        ));
        lines.push(format!(
            "    Partition key: {} ({})",
            gsi.partition_key.name,
            gsi.partition_key.attribute_type.as_str()
        ));
        if let Some(sk) = &gsi.sort_key {
            lines.push(format!(
                "    Sort key: {} ({})",
                sk.name,
                sk.attribute_type.as_str()
            ));
        }
        push_included(&mut lines, &gsi.projection);
    }
    for lsi in &descriptor.local_secondary_indexes {
        lines.push(format!(
            "  + LSI: {} [{}]",
            lsi.index_name,
            lsi.projection.projection_type()
        ));
        lines.push(format!(
            "    Sort key: {} ({})",
            lsi.sort_key.name,
            lsi.sort_key.attribute_type.as_str()
        ));
        push_included(&mut lines, &lsi.projection);
    }
    let props = &descriptor.props;
    match props.billing_mode {
        BillingMode::PayPerRequest => lines.push("  Billing: PAY_PER_REQUEST".to_string()),
        BillingMode::Provisioned => lines.push(format!(
            "  Billing: PROVISIONED (read {}, write {})",
            props.read_capacity.unwrap_or_default(),
            props.write_capacity.unwrap_or_default()
        )),
    }
    if let Some(ttl) = &props.time_to_live_attribute {
        lines.push(format!("  TTL: {ttl}"));
    }
    lines
}

fn push_included(lines: &mut Vec<String>, projection: &Projection) {
    if let Some(attributes) = projection.non_key_attributes() {
        lines.push(format!("    Include: {}", attributes.join(", ")));
    }
}
