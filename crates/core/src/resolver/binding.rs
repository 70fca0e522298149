use serde::Serialize;

use super::template::{
    KeyAssignment, KeyCondition, KeyShape, RequestTemplate, ResponseTemplate, StorageAction,
};
use crate::key::KeyRole;
use crate::naming::{Cardinality, KeyArgument, OperationDescriptor, OperationKind, RootType};
use crate::table::Table;

/// A root field bound to a storage operation on a table's data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverBinding {
    pub operation_name: String,
    pub root_type: RootType,
    pub storage_action: StorageAction,
    pub key_shape: KeyShape,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_name: Option<String>,
    pub data_source: String,
    pub cardinality: Cardinality,
    pub key_args: Vec<KeyArgument>,
    pub request_mapping_template: String,
    pub response_mapping_template: String,
}

/// Name of the data source serving `table`.
pub fn data_source_name(table: &Table) -> String {
    format!("{}DataSource", table.table_name().replace('.', "_"))
}

/// Binds every planned operation of `table` to a storage action.
pub fn bind_table(table: &Table, operations: &[OperationDescriptor]) -> Vec<ResolverBinding> {
    let data_source = data_source_name(table);
    let partition_name = table.primary_key().partition_name();
    operations
        .iter()
        .map(|operation| bind_operation(operation, partition_name, &data_source))
        .collect()
}

fn bind_operation(
    operation: &OperationDescriptor,
    partition_name: &str,
    data_source: &str,
) -> ResolverBinding {
    let supplied_key = key_shape(&operation.key_args);
    let project_input = operation.input.is_some();

    let (request, key_shape) = match operation.kind {
        OperationKind::Scan => (RequestTemplate::Scan, KeyShape::None),
        OperationKind::GetItem => (
            RequestTemplate::GetItem {
                key: supplied_key.clone(),
            },
            supplied_key,
        ),
        OperationKind::Query => {
            let mut names = operation.key_args.iter().map(|arg| arg.name.as_str());
            let first = names.next().unwrap_or(partition_name);
            let condition = names.fold(KeyCondition::eq(first), KeyCondition::and);
            (
                RequestTemplate::Query {
                    index: operation.index_name.clone(),
                    condition,
                },
                supplied_key,
            )
        }
        OperationKind::Create => {
            let key = KeyShape::Partition {
                partition: KeyAssignment::auto_id(partition_name),
            };
            (
                RequestTemplate::PutItem {
                    key: key.clone(),
                    project_input,
                },
                key,
            )
        }
        OperationKind::Put | OperationKind::Subscribe => (
            RequestTemplate::PutItem {
                key: supplied_key.clone(),
                project_input,
            },
            supplied_key,
        ),
        OperationKind::Delete => (
            RequestTemplate::DeleteItem {
                key: supplied_key.clone(),
            },
            supplied_key,
        ),
    };

    let response = match operation.cardinality {
        Cardinality::Single => ResponseTemplate::Item,
        Cardinality::List => ResponseTemplate::ItemList,
    };

    ResolverBinding {
        operation_name: operation.name.clone(),
        root_type: operation.root,
        storage_action: request.action(),
        key_shape,
        index_name: operation.index_name.clone(),
        data_source: data_source.to_string(),
        cardinality: operation.cardinality,
        key_args: operation.key_args.clone(),
        request_mapping_template: request.render(),
        response_mapping_template: response.render().to_string(),
    }
}

fn key_shape(args: &[KeyArgument]) -> KeyShape {
    let partition = args.iter().find(|arg| arg.role == KeyRole::Partition);
    let sort = args.iter().find(|arg| arg.role == KeyRole::Sort);
    match (partition, sort) {
        (Some(partition), Some(sort)) => KeyShape::Composite {
            partition: KeyAssignment::argument(&partition.name),
            sort: KeyAssignment::argument(&sort.name),
        },
        (Some(partition), None) => KeyShape::Partition {
            partition: KeyAssignment::argument(&partition.name),
        },
        _ => KeyShape::None,
    }
}
