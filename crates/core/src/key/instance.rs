use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{AttributeType, KeyAttribute};
use crate::error::Result;
use crate::graphql::TypeRef;

/// Default semantic type for keys declared by name only.
pub const DEFAULT_KEY_TYPE: &str = "String";

/// Structural role of a key within an index or table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyRole {
    #[default]
    Partition,
    Sort,
}

/// A named key field with a semantic type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyInstance {
    name: String,
    #[serde(rename = "type")]
    type_ref: TypeRef,
    role: KeyRole,
}

impl KeyInstance {
    /// Creates a key, defaulting the semantic type to `String`.
    pub fn new(name: impl Into<String>, type_name: Option<&str>, role: KeyRole) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            type_ref: TypeRef::parse(type_name.unwrap_or(DEFAULT_KEY_TYPE))?,
            role,
        })
    }

    pub fn partition(name: impl Into<String>) -> Result<Self> {
        Self::new(name, None, KeyRole::Partition)
    }

    pub fn sort(name: impl Into<String>) -> Result<Self> {
        Self::new(name, None, KeyRole::Sort)
    }

    /// Derives a new key from this one.
    ///
    /// The type and role are inherited unless overridden; the name defaults to
    /// this key's name. Indexes use this to reuse a table key under another role.
    pub fn rebind(
        &self,
        name: Option<&str>,
        type_name: Option<&str>,
        role: Option<KeyRole>,
    ) -> Result<Self> {
        let type_ref = match type_name {
            Some(raw) => TypeRef::parse(raw)?,
            None => self.type_ref.clone(),
        };
        Ok(Self {
            name: name.map_or_else(|| self.name.clone(), str::to_string),
            type_ref,
            role: role.unwrap_or(self.role),
        })
    }

    /// Takes the semantic type from `attributes` when the key is listed there.
    pub(crate) fn retype(self, attributes: &IndexMap<String, String>) -> Result<Self> {
        match attributes.get(&self.name) {
            Some(raw) => Ok(Self {
                type_ref: TypeRef::parse(raw)?,
                ..self
            }),
            None => Ok(self),
        }
    }

    /// Same key with a different structural role.
    pub fn with_role(mut self, role: KeyRole) -> Self {
        self.role = role;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> KeyRole {
        self.role
    }

    pub fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }

    /// Storage-template projection: `(name, primitive)`.
    ///
    /// `int`/`float` map to `number`, `id`/`string` to `string`, `boolean` to
    /// `boolean`; anything else is an opaque `record`. Primitive lists get a `[]` suffix.
    pub fn template_type(&self) -> (String, String) {
        let primitive = match self.type_ref.name().to_lowercase().as_str() {
            "int" | "float" => "number",
            "id" | "string" => "string",
            "boolean" => "boolean",
            _ => return (self.name.clone(), "record".to_string()),
        };
        let primitive = if self.type_ref.is_list() {
            format!("{primitive}[]")
        } else {
            primitive.to_string()
        };
        (self.name.clone(), primitive)
    }

    /// GraphQL-facing projection: `(name, declared type string)`.
    pub fn object_type(&self) -> (String, String) {
        (self.name.clone(), self.type_ref.to_string())
    }

    /// Storage attribute definition for this key.
    pub fn attribute(&self) -> KeyAttribute {
        KeyAttribute {
            name: self.name.clone(),
            attribute_type: AttributeType::classify(self.type_ref.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_instance_projections() {
        let key = KeyInstance::new("MyKey", Some("String!"), KeyRole::Partition).unwrap();
        assert_eq!(key.name(), "MyKey");
        assert_eq!(key.template_type(), ("MyKey".to_string(), "string".to_string()));
        assert_eq!(key.object_type(), ("MyKey".to_string(), "String!".to_string()));
    }

    #[test]
    fn test_key_instance_defaults_to_string_partition() {
        let key = KeyInstance::partition("dogId").unwrap();
        assert_eq!(key.type_ref().name(), "String");
        assert_eq!(key.role(), KeyRole::Partition);
        assert_eq!(key.attribute().attribute_type, AttributeType::String);
    }

    #[test]
    fn test_rebind_inherits_type_and_role() {
        let key = KeyInstance::new("MyKey", Some("String!"), KeyRole::Sort).unwrap();
        let rebound = key.rebind(None, None, None).unwrap();
        assert_eq!(rebound.name(), "MyKey");
        assert_eq!(rebound.object_type(), ("MyKey".to_string(), "String!".to_string()));
        assert_eq!(rebound.role(), KeyRole::Sort);
    }

    #[test]
    fn test_rebind_overrides() {
        let key = KeyInstance::new("age", Some("Int!"), KeyRole::Sort).unwrap();
        let rebound = key
            .rebind(Some("years"), None, Some(KeyRole::Partition))
            .unwrap();
        assert_eq!(rebound.name(), "years");
        assert_eq!(rebound.type_ref().name(), "Int");
        assert_eq!(rebound.role(), KeyRole::Partition);
    }

    #[test]
    fn test_retype_from_attributes() {
        let attributes = IndexMap::from([("age".to_string(), "Int!".to_string())]);
        let age = KeyInstance::sort("age").unwrap().retype(&attributes).unwrap();
        assert_eq!(age.type_ref().to_string(), "Int!");
        assert_eq!(age.role(), KeyRole::Sort);

        let name = KeyInstance::partition("name").unwrap().retype(&attributes).unwrap();
        assert_eq!(name.type_ref().to_string(), "String");
    }

    #[test]
    fn test_template_type_mapping() {
        let cases = [
            ("Int!", "number"),
            ("Float", "number"),
            ("ID!", "string"),
            ("Boolean", "boolean"),
            ("[String]", "string[]"),
            ("AWS_TIMESTAMP", "record"),
            ("[Dog]", "record"),
        ];
        for (raw, expected) in cases {
            let key = KeyInstance::new("field", Some(raw), KeyRole::Partition).unwrap();
            assert_eq!(key.template_type().1, expected, "type {raw}");
        }
    }

    #[test]
    fn test_attribute_encoding_follows_type() {
        let age = KeyInstance::new("age", Some("Int!"), KeyRole::Sort).unwrap();
        assert_eq!(age.attribute().attribute_type, AttributeType::Number);
        let flag = KeyInstance::new("active", Some("Boolean"), KeyRole::Sort).unwrap();
        assert_eq!(flag.attribute().attribute_type, AttributeType::Binary);
    }

    #[test]
    fn test_invalid_type_is_rejected() {
        assert!(KeyInstance::new("broken", Some("[String"), KeyRole::Partition).is_err());
    }
}
