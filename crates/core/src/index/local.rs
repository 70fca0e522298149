use indexmap::IndexMap;
use serde::Serialize;

use super::Projection;
use crate::error::Result;
use crate::key::KeyInstance;
use crate::naming::capitalize;

/// Local secondary index: an alternate sort key on the table's partition key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalIndex {
    name: String,
    sort_key: KeyInstance,
    projection: Projection,
}

impl LocalIndex {
    pub fn new(name: impl Into<String>, sort_key: KeyInstance, include: &[String]) -> Self {
        Self {
            name: name.into(),
            sort_key,
            projection: Projection::from_include(include),
        }
    }

    /// `local<TableName><SortKey>`
    pub fn default_name(table_name: &str, sort_key: &str) -> String {
        format!("local{}{}", capitalize(table_name), capitalize(sort_key))
    }

    pub(crate) fn retype(mut self, attributes: &IndexMap<String, String>) -> Result<Self> {
        self.sort_key = self.sort_key.retype(attributes)?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sort_key(&self) -> &KeyInstance {
        &self.sort_key
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_name() {
        assert_eq!(LocalIndex::default_name("Dog", "age"), "localDogAge");
        assert_eq!(
            LocalIndex::default_name("eventSignup", "category"),
            "localEventSignupCategory"
        );
    }

    #[test]
    fn test_projection_from_include() {
        let index = LocalIndex::new(
            "localDogAge",
            KeyInstance::sort("age").unwrap(),
            &["breed".to_string()],
        );
        assert_eq!(index.sort_key().name(), "age");
        assert_eq!(index.projection().projection_type(), "INCLUDE");
    }
}
