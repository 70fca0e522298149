//! Declarative config document.
//!
//! The only I/O in this crate: reading `dynasync.json` (or an explicit path)
//! and merging it with programmatic settings.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{DynasyncError, Result};
use crate::provision::{AuthorizationConfig, AuthorizationMode, UserPoolOptions};
use crate::schema::AuxiliaryTypes;
use crate::table::{RemovalPolicy, Table, TableDeclaration, TableProps};

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "dynasync.json";

/// A table entry: a raw declaration or an already-built table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TableSpec {
    Declared(TableDeclaration),
    #[serde(skip)]
    Built(Table),
}

impl From<TableDeclaration> for TableSpec {
    fn from(declaration: TableDeclaration) -> Self {
        TableSpec::Declared(declaration)
    }
}

impl From<Table> for TableSpec {
    fn from(table: Table) -> Self {
        TableSpec::Built(table)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DynasyncConfig {
    pub tables: Vec<TableSpec>,
    pub types: AuxiliaryTypes,
    /// Existing user pool. Without one, the API descriptor asks for a new pool.
    pub user_pool: Option<String>,
    pub user_pool_regex: Option<String>,
    pub user_pool_deny: bool,
    pub auth: Vec<AuthorizationMode>,
    pub api_props: Map<String, Value>,
    /// Defaults for every declared table without its own props.
    pub table_props: Option<TableProps>,
    pub delete_tables_with_stack: bool,
}

impl DynasyncConfig {
    pub fn with_table(mut self, table: impl Into<TableSpec>) -> Self {
        self.tables.push(table.into());
        self
    }

    pub fn with_tables<I, T>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TableSpec>,
    {
        self.tables.extend(tables.into_iter().map(Into::into));
        self
    }

    pub fn with_types(mut self, types: AuxiliaryTypes) -> Self {
        self.types = types;
        self
    }

    pub fn with_user_pool(mut self, user_pool: impl Into<String>) -> Self {
        self.user_pool = Some(user_pool.into());
        self
    }

    pub fn with_auth(mut self, mode: AuthorizationMode) -> Self {
        self.auth.push(mode);
        self
    }

    pub fn with_table_props(mut self, props: TableProps) -> Self {
        self.table_props = Some(props);
        self
    }

    pub fn with_delete_tables_with_stack(mut self, delete: bool) -> Self {
        self.delete_tables_with_stack = delete;
        self
    }

    /// Merges a file-loaded config with programmatic settings.
    ///
    /// Settings from `props` win. Tables are concatenated with the file's
    /// first, auxiliary types are merged per category.
    pub fn merge(file: DynasyncConfig, props: DynasyncConfig) -> DynasyncConfig {
        let mut tables = file.tables;
        tables.extend(props.tables);
        let mut types = file.types;
        types.merge(props.types);

        DynasyncConfig {
            tables,
            types,
            user_pool: props.user_pool.or(file.user_pool),
            user_pool_regex: props.user_pool_regex.or(file.user_pool_regex),
            user_pool_deny: props.user_pool_deny || file.user_pool_deny,
            auth: if props.auth.is_empty() {
                file.auth
            } else {
                props.auth
            },
            api_props: if props.api_props.is_empty() {
                file.api_props
            } else {
                props.api_props
            },
            table_props: props.table_props.or(file.table_props),
            delete_tables_with_stack: props.delete_tables_with_stack
                || file.delete_tables_with_stack,
        }
    }

    /// Authorization settings for the API named after `id`.
    pub fn authorization(&self, id: &str) -> AuthorizationConfig {
        let options = UserPoolOptions {
            user_pool: self.user_pool.clone(),
            app_id_client_regex: self.user_pool_regex.clone(),
            deny: self.user_pool_deny,
        };
        AuthorizationConfig::resolve(id, &options, self.auth.clone())
    }

    /// Validates and builds every table, in declaration order.
    pub fn build_tables(self, label: Option<&str>) -> Result<Vec<Table>> {
        if self.tables.is_empty() {
            return Err(DynasyncError::configuration(
                "No tables provided. Cannot build API and Database without tables. Please configure parameters or provide 'dynasync.json' config file",
            ));
        }

        let destroy = self.delete_tables_with_stack;
        self.tables
            .into_iter()
            .map(|spec| match spec {
                TableSpec::Declared(mut declaration) => {
                    if declaration.table_props.is_none() {
                        declaration.table_props = self.table_props.clone();
                    }
                    if destroy {
                        let props = declaration.table_props.take().unwrap_or_default();
                        declaration.table_props =
                            Some(props.with_removal_policy(RemovalPolicy::Destroy));
                    }
                    Table::from_declaration(declaration, label)
                }
                TableSpec::Built(table) => {
                    if self.table_props.is_some() {
                        return Err(DynasyncError::conflict(format!(
                            "Cannot pass additional table props when using already-instantiated table instance for table {}",
                            table.base_name()
                        )));
                    }
                    if destroy {
                        let props = table.props().clone();
                        Ok(table.with_props(props.with_removal_policy(RemovalPolicy::Destroy)))
                    } else {
                        Ok(table)
                    }
                }
            })
            .collect()
    }
}

/// Reads a config document from an explicit path.
pub fn load_config_file(path: &Path) -> Result<DynasyncConfig> {
    if !path.exists() {
        return Err(DynasyncError::configuration(format!(
            "Config file {} does not exist",
            path.display()
        )));
    }
    let is_json = path
        .extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension.contains("json"));
    if !is_json {
        return Err(DynasyncError::configuration(format!(
            "File at {} is not JSON file",
            path.display()
        )));
    }
    read_config(path)
}

/// Loads the explicit config file, or `dynasync.json` in `cwd` when it
/// exists, or an empty config.
pub fn resolve_config(explicit: Option<&Path>, cwd: &Path) -> Result<DynasyncConfig> {
    if let Some(path) = explicit {
        return load_config_file(path);
    }
    let default_path = default_config_path(cwd);
    if default_path.exists() {
        read_config(&default_path)
    } else {
        Ok(DynasyncConfig::default())
    }
}

pub fn default_config_path(cwd: &Path) -> PathBuf {
    cwd.join(DEFAULT_CONFIG_FILE)
}

fn read_config(path: &Path) -> Result<DynasyncConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        DynasyncError::configuration(format!("Failed to read {}: {e}", path.display()))
    })?;
    serde_json::from_str(&contents).map_err(|e| {
        DynasyncError::configuration(format!("Failed to parse {}: {e}", path.display()))
    })
}
