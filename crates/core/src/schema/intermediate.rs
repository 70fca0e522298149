use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{DynasyncError, Result};
use crate::graphql::{is_valid_name, TypeRef};

/// Kind of a registered type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeCategory {
    Type,
    Input,
    Interface,
    Union,
    Enum,
}

impl TypeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeCategory::Type => "type",
            TypeCategory::Input => "input",
            TypeCategory::Interface => "interface",
            TypeCategory::Union => "union",
            TypeCategory::Enum => "enum",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArgumentDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<ArgumentDefinition>,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            type_ref,
        }
    }

    pub fn with_arg(mut self, name: impl Into<String>, type_ref: TypeRef) -> Self {
        self.args.push(ArgumentDefinition {
            name: name.into(),
            type_ref,
        });
        self
    }
}

/// Parses a `name -> type string` map into field definitions.
pub fn fields_from_map(fields: &IndexMap<String, String>) -> Result<Vec<FieldDefinition>> {
    fields
        .iter()
        .map(|(name, raw)| Ok(FieldDefinition::new(name.clone(), TypeRef::parse(raw)?)))
        .collect()
}

/// Body of a registered type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TypeBody {
    Fields(Vec<FieldDefinition>),
    Members(Vec<String>),
    Values(Vec<String>),
}

/// A user-declared or synthesized GraphQL type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntermediateType {
    name: String,
    category: TypeCategory,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    interfaces: Vec<String>,
    body: TypeBody,
}

impl IntermediateType {
    fn with_fields(
        name: &str,
        category: TypeCategory,
        fields: Vec<FieldDefinition>,
    ) -> Result<Self> {
        Ok(Self {
            name: sanitize_name(name)?,
            category,
            interfaces: Vec::new(),
            body: TypeBody::Fields(fields),
        })
    }

    pub fn object(name: &str, fields: Vec<FieldDefinition>) -> Result<Self> {
        Self::with_fields(name, TypeCategory::Type, fields)
    }

    pub fn input(name: &str, fields: Vec<FieldDefinition>) -> Result<Self> {
        Self::with_fields(name, TypeCategory::Input, fields)
    }

    pub fn interface(name: &str, fields: Vec<FieldDefinition>) -> Result<Self> {
        Self::with_fields(name, TypeCategory::Interface, fields)
    }

    pub fn union(name: &str, members: Vec<String>) -> Result<Self> {
        Ok(Self {
            name: sanitize_name(name)?,
            category: TypeCategory::Union,
            interfaces: Vec::new(),
            body: TypeBody::Members(members),
        })
    }

    pub fn enumeration(name: &str, values: Vec<String>) -> Result<Self> {
        let name = sanitize_name(name)?;
        if let Some(value) = values.iter().find(|value| !is_valid_name(value)) {
            return Err(DynasyncError::validation(format!(
                "Enum {name} value '{value}' must be a valid GraphQL name"
            )));
        }
        Ok(Self {
            name,
            category: TypeCategory::Enum,
            interfaces: Vec::new(),
            body: TypeBody::Values(values),
        })
    }

    /// Declares the interfaces an object type implements.
    pub fn implementing(mut self, interfaces: Vec<String>) -> Self {
        self.interfaces = interfaces;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> TypeCategory {
        self.category
    }

    pub fn interfaces(&self) -> &[String] {
        &self.interfaces
    }

    pub fn body(&self) -> &TypeBody {
        &self.body
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        match &self.body {
            TypeBody::Fields(fields) => fields,
            _ => &[],
        }
    }

    pub(crate) fn fields_mut(&mut self) -> Option<&mut Vec<FieldDefinition>> {
        match &mut self.body {
            TypeBody::Fields(fields) => Some(fields),
            _ => None,
        }
    }
}

/// Strips characters that cannot appear in a type name.
fn sanitize_name(raw: &str) -> Result<String> {
    let name: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if !is_valid_name(&name) {
        return Err(DynasyncError::validation(format!(
            "'{raw}' is not a usable type name"
        )));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_from_map_keeps_order() {
        let map: IndexMap<String, String> = [("b", "Int!"), ("a", "[String]")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let fields = fields_from_map(&map).unwrap();
        assert_eq!(fields[0].name, "b");
        assert_eq!(fields[1].type_ref.to_string(), "[String]");
    }

    #[test]
    fn test_fields_from_map_rejects_bad_type() {
        let map: IndexMap<String, String> =
            IndexMap::from([("a".to_string(), "[[Int]]".to_string())]);
        assert!(fields_from_map(&map).is_err());
    }

    #[test]
    fn test_name_is_sanitized() {
        let ty = IntermediateType::object("My-Type2", Vec::new()).unwrap();
        assert_eq!(ty.name(), "MyType2");
        assert!(IntermediateType::object("123", Vec::new()).is_err());
    }

    #[test]
    fn test_enum_values_are_checked() {
        let err = IntermediateType::enumeration("Terms", vec!["Term 1".to_string()]).unwrap_err();
        assert!(err.to_string().contains("Term 1"));
    }

    #[test]
    fn test_fields_mut_only_on_field_types() {
        let mut union =
            IntermediateType::union("DogAndCat", vec!["Dog".to_string(), "Cat".to_string()])
                .unwrap();
        assert!(union.fields_mut().is_none());
        assert!(union.fields().is_empty());

        let mut object = IntermediateType::object("Query", Vec::new()).unwrap();
        object
            .fields_mut()
            .unwrap()
            .push(FieldDefinition::new("getDog", TypeRef::named("Dog")));
        assert_eq!(object.fields().len(), 1);
    }
}
