//! Operation naming.
//!
//! [`plan_operations`] derives every root operation a table exposes. The
//! schema builder and the resolver binder both consume the same plan, so a
//! root field and its binding always agree on name, arguments and cardinality.

use std::collections::HashSet;

use serde::Serialize;

use crate::graphql::TypeRef;
use crate::key::{KeyInstance, KeyRole};
use crate::table::Table;

/// Uppercases the first character, leaving the rest untouched.
///
/// ```
/// use dynasync_core::naming::capitalize;
///
/// assert_eq!(capitalize("dogId"), "DogId");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// GraphQL root object types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RootType {
    Query,
    Mutation,
    Subscription,
}

impl RootType {
    pub const ALL: [RootType; 3] = [
        RootType::Query,
        RootType::Mutation,
        RootType::Subscription,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RootType::Query => "Query",
            RootType::Mutation => "Mutation",
            RootType::Subscription => "Subscription",
        }
    }
}

/// Whether an operation returns one item or a list of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    Single,
    List,
}

/// What an operation does, independent of how it is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationKind {
    Scan,
    GetItem,
    Query,
    Create,
    Put,
    Delete,
    Subscribe,
}

/// A key argument of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyArgument {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    pub role: KeyRole,
}

impl KeyArgument {
    fn from_key(key: &KeyInstance, role: KeyRole) -> Self {
        Self {
            name: key.name().to_string(),
            type_ref: key.type_ref().clone(),
            role,
        }
    }
}

/// One root operation of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationDescriptor {
    pub name: String,
    pub root: RootType,
    pub kind: OperationKind,
    pub cardinality: Cardinality,
    pub key_args: Vec<KeyArgument>,
    /// Input type taken as the `input` argument, if any.
    pub input: Option<String>,
    /// Secondary index the operation runs against.
    pub index_name: Option<String>,
}

impl OperationDescriptor {
    fn new(name: String, root: RootType, kind: OperationKind, cardinality: Cardinality) -> Self {
        Self {
            name,
            root,
            kind,
            cardinality,
            key_args: Vec::new(),
            input: None,
            index_name: None,
        }
    }

    fn with_key_args(mut self, key_args: Vec<KeyArgument>) -> Self {
        self.key_args = key_args;
        self
    }

    fn with_input(mut self, input: Option<String>) -> Self {
        self.input = input;
        self
    }

    fn with_index(mut self, index_name: &str) -> Self {
        self.index_name = Some(index_name.to_string());
        self
    }
}

/// Collects operations, skipping names already taken within the table.
struct Plan {
    used: HashSet<String>,
    operations: Vec<OperationDescriptor>,
}

impl Plan {
    fn push(&mut self, operation: OperationDescriptor) {
        if self.used.insert(operation.name.clone()) {
            self.operations.push(operation);
        }
    }
}

/// Derives the operations of `table`, in emission order.
///
/// Queries come first (scan, primary get, primary list, global indexes,
/// local indexes), then mutations (create, put, delete), then the change
/// subscription. Local index queries are only planned when the table also has
/// at least one global index.
pub fn plan_operations(table: &Table) -> Vec<OperationDescriptor> {
    let base = table.base_name();
    let flags = table.flags();
    let primary = table.primary_key();
    let partition = primary.partition_key();
    let cap_partition = capitalize(partition.name());

    let primary_args: Vec<KeyArgument> =
        std::iter::once(KeyArgument::from_key(partition, KeyRole::Partition))
            .chain(
                primary
                    .sort_key()
                    .map(|key| KeyArgument::from_key(key, KeyRole::Sort)),
            )
            .collect();

    let mut plan = Plan {
        used: HashSet::new(),
        operations: Vec::new(),
    };

    if flags.query {
        if flags.scan {
            plan.push(OperationDescriptor::new(
                format!("scan{base}"),
                RootType::Query,
                OperationKind::Scan,
                Cardinality::List,
            ));
        }

        let get_name = match primary.sort_key() {
            Some(sort) => format!("get{base}By{cap_partition}And{}", capitalize(sort.name())),
            None => format!("get{base}By{cap_partition}"),
        };
        plan.push(
            OperationDescriptor::new(
                get_name,
                RootType::Query,
                OperationKind::GetItem,
                Cardinality::Single,
            )
            .with_key_args(primary_args.clone()),
        );

        if primary.sort_key().is_some() {
            plan.push(
                OperationDescriptor::new(
                    format!("list{base}By{cap_partition}"),
                    RootType::Query,
                    OperationKind::Query,
                    Cardinality::List,
                )
                .with_key_args(vec![KeyArgument::from_key(partition, KeyRole::Partition)]),
            );
        }

        for index in table.global_indexes() {
            let index_partition = index.partition_key();
            let cap_index_partition = capitalize(index_partition.name());
            let partition_arg = KeyArgument::from_key(index_partition, KeyRole::Partition);

            let (prefix, cardinality) = if index.sort_key().is_some() || index.is_list_flagged() {
                ("list", Cardinality::List)
            } else {
                ("get", Cardinality::Single)
            };
            plan.push(
                OperationDescriptor::new(
                    format!("{prefix}{base}By{cap_index_partition}"),
                    RootType::Query,
                    OperationKind::Query,
                    cardinality,
                )
                .with_key_args(vec![partition_arg.clone()])
                .with_index(index.name()),
            );

            if let Some(index_sort) = index.sort_key() {
                plan.push(
                    OperationDescriptor::new(
                        format!(
                            "get{base}By{cap_index_partition}And{}",
                            capitalize(index_sort.name())
                        ),
                        RootType::Query,
                        OperationKind::Query,
                        Cardinality::Single,
                    )
                    .with_key_args(vec![
                        partition_arg,
                        KeyArgument::from_key(index_sort, KeyRole::Sort),
                    ])
                    .with_index(index.name()),
                );
            }
        }

        if !table.global_indexes().is_empty() {
            for index in table.local_indexes() {
                let index_sort = index.sort_key();
                plan.push(
                    OperationDescriptor::new(
                        format!(
                            "get{base}By{cap_partition}And{}",
                            capitalize(index_sort.name())
                        ),
                        RootType::Query,
                        OperationKind::Query,
                        Cardinality::Single,
                    )
                    .with_key_args(vec![
                        KeyArgument::from_key(partition, KeyRole::Partition),
                        KeyArgument::from_key(index_sort, KeyRole::Sort),
                    ])
                    .with_index(index.name()),
                );
            }
        }
    }

    if flags.mutation {
        let input = table.input_type_name();
        if flags.auto {
            plan.push(
                OperationDescriptor::new(
                    format!("create{base}"),
                    RootType::Mutation,
                    OperationKind::Create,
                    Cardinality::Single,
                )
                .with_input(input.clone()),
            );
        }
        plan.push(
            OperationDescriptor::new(
                format!("put{base}"),
                RootType::Mutation,
                OperationKind::Put,
                Cardinality::Single,
            )
            .with_key_args(primary_args.clone())
            .with_input(input),
        );
        plan.push(
            OperationDescriptor::new(
                format!("delete{base}"),
                RootType::Mutation,
                OperationKind::Delete,
                Cardinality::Single,
            )
            .with_key_args(primary_args.clone()),
        );
    }

    if flags.subscription {
        plan.push(
            OperationDescriptor::new(
                format!("on{base}Change"),
                RootType::Subscription,
                OperationKind::Subscribe,
                Cardinality::Single,
            )
            .with_key_args(primary_args),
        );
    }

    plan.operations
}
