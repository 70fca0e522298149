//! API and authorization descriptors.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::resolver::data_source_name;
use crate::table::Table;

/// Authorization type of the user-pool default mode.
pub const USER_POOL_AUTHORIZATION: &str = "AMAZON_COGNITO_USER_POOLS";

/// One authorization mode. Settings other than the type are passed through
/// to the API provisioner untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationMode {
    pub authorization_type: String,
    #[serde(flatten)]
    pub settings: Map<String, Value>,
}

impl AuthorizationMode {
    pub fn new(authorization_type: impl Into<String>) -> Self {
        Self {
            authorization_type: authorization_type.into(),
            settings: Map::new(),
        }
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: Value) -> Self {
        self.settings.insert(key.into(), value);
        self
    }

    /// User-pool mode. Without an explicit pool the provisioner is asked to
    /// create `<id>UserPool`.
    pub fn user_pool(id: &str, options: &UserPoolOptions) -> Self {
        let user_pool = options
            .user_pool
            .clone()
            .unwrap_or_else(|| format!("{id}UserPool"));
        let default_action = if options.deny { "DENY" } else { "ALLOW" };
        let mut config = json!({
            "userPool": user_pool,
            "defaultAction": default_action,
        });
        if let Some(regex) = &options.app_id_client_regex {
            config["appIdClientRegex"] = Value::String(regex.clone());
        }
        Self::new(USER_POOL_AUTHORIZATION).with_setting("userPoolConfig", config)
    }
}

/// Inputs for the user-pool authorization mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPoolOptions {
    pub user_pool: Option<String>,
    pub app_id_client_regex: Option<String>,
    pub deny: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationConfig {
    pub default_authorization: AuthorizationMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_authorization_modes: Option<Vec<AuthorizationMode>>,
}

impl AuthorizationConfig {
    /// Picks the default and additional modes.
    ///
    /// A configured user pool, or no explicit modes at all, makes the user
    /// pool the default and keeps every explicit mode as additional.
    /// Otherwise the first explicit mode is the default.
    pub fn resolve(id: &str, options: &UserPoolOptions, modes: Vec<AuthorizationMode>) -> Self {
        let mut modes = modes.into_iter();
        let default_authorization = if options.user_pool.is_some() {
            AuthorizationMode::user_pool(id, options)
        } else {
            modes
                .next()
                .unwrap_or_else(|| AuthorizationMode::user_pool(id, options))
        };
        let rest: Vec<AuthorizationMode> = modes.collect();
        Self {
            default_authorization,
            additional_authorization_modes: (!rest.is_empty()).then_some(rest),
        }
    }
}

/// Storage data source backing one table's resolvers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceDescriptor {
    pub name: String,
    pub table_name: String,
}

impl DataSourceDescriptor {
    pub fn for_table(table: &Table) -> Self {
        Self {
            name: data_source_name(table),
            table_name: table.table_name().to_string(),
        }
    }
}

/// The GraphQL API to provision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDescriptor {
    pub name: String,
    pub xray_enabled: bool,
    pub authorization: AuthorizationConfig,
    /// Extra API settings passed through unmodified.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub api_props: Map<String, Value>,
}

impl ApiDescriptor {
    pub fn new(id: &str, authorization: AuthorizationConfig) -> Self {
        Self {
            name: api_name(id),
            xray_enabled: true,
            authorization,
            api_props: Map::new(),
        }
    }

    pub fn with_api_props(mut self, api_props: Map<String, Value>) -> Self {
        self.api_props = api_props;
        self
    }
}

/// `<id>-GraphQlApi`
pub fn api_name(id: &str) -> String {
    format!("{id}-GraphQlApi")
}
