use serde::{Deserialize, Serialize};

use crate::error::{DynasyncError, Result};

/// Billing mode for the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillingMode {
    #[default]
    PayPerRequest,
    Provisioned,
}

/// Which item images are written to the table stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StreamViewType {
    NewImage,
    OldImage,
    NewAndOldImages,
    KeysOnly,
}

/// What the provisioning layer does with the table when the stack goes away.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemovalPolicy {
    #[default]
    Retain,
    Snapshot,
    Destroy,
}

/// Storage-level table settings carried through to the table descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableProps {
    pub billing_mode: BillingMode,
    pub point_in_time_recovery: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_live_attribute: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<StreamViewType>,
    pub deletion_protection: bool,
    pub removal_policy: RemovalPolicy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_capacity: Option<u32>,
}

impl Default for TableProps {
    fn default() -> Self {
        Self {
            billing_mode: BillingMode::PayPerRequest,
            point_in_time_recovery: true,
            time_to_live_attribute: None,
            stream: None,
            deletion_protection: false,
            removal_policy: RemovalPolicy::Retain,
            read_capacity: None,
            write_capacity: None,
        }
    }
}

impl TableProps {
    /// Sets the removal policy.
    pub fn with_removal_policy(mut self, policy: RemovalPolicy) -> Self {
        self.removal_policy = policy;
        self
    }

    /// Provisioned billing needs both capacities; on-demand billing takes none.
    pub fn validate(&self, table_name: &str) -> Result<()> {
        let has_capacity = self.read_capacity.is_some() || self.write_capacity.is_some();
        match self.billing_mode {
            BillingMode::Provisioned
                if self.read_capacity.is_none() || self.write_capacity.is_none() =>
            {
                Err(DynasyncError::validation(format!(
                    "Table {table_name} uses PROVISIONED billing but is missing read or write capacity"
                )))
            }
            BillingMode::PayPerRequest if has_capacity => Err(DynasyncError::validation(format!(
                "Table {table_name} uses PAY_PER_REQUEST billing and cannot set read or write capacity"
            ))),
            _ => Ok(()),
        }
    }
}
