//! Synthesis pass: runs every table through the schema builder and the
//! resolver binder, then checks that both sides agree.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::DynasyncConfig;
use crate::error::{DynasyncError, Result};
use crate::naming::{plan_operations, Cardinality, RootType};
use crate::provision::{
    describe_table, ApiDescriptor, AuthorizationConfig, DataSourceDescriptor, TableDescriptor,
    UserPoolOptions,
};
use crate::resolver::{bind_table, ResolverBinding};
use crate::schema::{AuxiliaryTypes, SchemaBuilder};
use crate::table::Table;

/// Artifacts of a completed pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisOutput {
    pub schema: String,
    pub bindings: Vec<ResolverBinding>,
    pub tables: Vec<TableDescriptor>,
    pub data_sources: Vec<DataSourceDescriptor>,
    pub api: ApiDescriptor,
}

/// Drives one synthesis pass.
///
/// Tables are processed in the order they are added; any error leaves the
/// pass unusable and no output is produced.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    id: String,
    builder: SchemaBuilder,
    tables: Vec<Table>,
    bindings: Vec<ResolverBinding>,
    authorization: Option<AuthorizationConfig>,
    api_props: Map<String, Value>,
}

impl Synthesizer {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            builder: SchemaBuilder::new(),
            tables: Vec::new(),
            bindings: Vec::new(),
            authorization: None,
            api_props: Map::new(),
        }
    }

    pub fn with_authorization(mut self, authorization: AuthorizationConfig) -> Self {
        self.authorization = Some(authorization);
        self
    }

    pub fn with_api_props(mut self, api_props: Map<String, Value>) -> Self {
        self.api_props = api_props;
        self
    }

    /// Adds a table's types, root fields and resolver bindings.
    pub fn add_table(&mut self, table: Table) -> Result<()> {
        let operations = plan_operations(&table);
        self.builder.add_table(&table, &operations)?;
        self.bindings.extend(bind_table(&table, &operations));
        self.tables.push(table);
        Ok(())
    }

    pub fn add_types(&mut self, types: &AuxiliaryTypes) -> Result<()> {
        types.register(&mut self.builder)
    }

    /// Appends free-form schema text and returns the re-rendered definition.
    pub fn add_to_schema(&mut self, addition: impl Into<String>) -> Result<String> {
        self.builder.add_to_schema(addition);
        self.definition()
    }

    /// Current schema text.
    pub fn definition(&self) -> Result<String> {
        self.builder.render()
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn bindings(&self) -> &[ResolverBinding] {
        &self.bindings
    }

    /// Verifies the pass and produces its artifacts.
    pub fn finish(self) -> Result<SynthesisOutput> {
        verify_bindings(&self.builder, &self.bindings)?;
        let schema = self.builder.render()?;

        let authorization = self.authorization.unwrap_or_else(|| {
            AuthorizationConfig::resolve(&self.id, &UserPoolOptions::default(), Vec::new())
        });
        let api = ApiDescriptor::new(&self.id, authorization).with_api_props(self.api_props);

        Ok(SynthesisOutput {
            schema,
            bindings: self.bindings,
            tables: self.tables.iter().map(describe_table).collect(),
            data_sources: self.tables.iter().map(DataSourceDescriptor::for_table).collect(),
            api,
        })
    }
}

/// Every binding must have a root field with the same name, key arguments
/// and cardinality, and every root field must have a binding.
fn verify_bindings(builder: &SchemaBuilder, bindings: &[ResolverBinding]) -> Result<()> {
    for binding in bindings {
        let root = binding.root_type;
        let field = builder
            .root_fields(root)
            .iter()
            .find(|field| field.name == binding.operation_name)
            .ok_or_else(|| {
                DynasyncError::conflict(format!(
                    "Resolver {} has no field on {}",
                    binding.operation_name,
                    root.as_str()
                ))
            })?;

        let field_keys: Vec<_> = field
            .args
            .iter()
            .filter(|arg| arg.name != "input")
            .map(|arg| (arg.name.as_str(), &arg.type_ref))
            .collect();
        let binding_keys: Vec<_> = binding
            .key_args
            .iter()
            .map(|arg| (arg.name.as_str(), &arg.type_ref))
            .collect();
        if field_keys != binding_keys {
            return Err(DynasyncError::conflict(format!(
                "Field {}.{} and its resolver disagree on key arguments",
                root.as_str(),
                binding.operation_name
            )));
        }

        if field.type_ref.is_list() != (binding.cardinality == Cardinality::List) {
            return Err(DynasyncError::conflict(format!(
                "Field {}.{} and its resolver disagree on cardinality",
                root.as_str(),
                binding.operation_name
            )));
        }
    }

    for root in RootType::ALL {
        for field in builder.root_fields(root) {
            let bound = bindings
                .iter()
                .any(|binding| binding.root_type == root && binding.operation_name == field.name);
            if !bound {
                return Err(DynasyncError::conflict(format!(
                    "Field {}.{} has no resolver",
                    root.as_str(),
                    field.name
                )));
            }
        }
    }
    Ok(())
}

/// Runs a full pass over a merged config document.
///
/// `label` namespaces every table's display name.
pub fn synthesize(id: &str, config: DynasyncConfig, label: Option<&str>) -> Result<SynthesisOutput> {
    let authorization = config.authorization(id);
    let api_props = config.api_props.clone();
    let types = config.types.clone();
    let tables = config.build_tables(label)?;

    let mut synthesizer = Synthesizer::new(id)
        .with_authorization(authorization)
        .with_api_props(api_props);
    for table in tables {
        synthesizer.add_table(table)?;
    }
    synthesizer.add_types(&types)?;
    synthesizer.finish()
}
