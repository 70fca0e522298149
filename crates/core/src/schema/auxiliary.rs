use indexmap::IndexMap;
use serde::Deserialize;

use super::builder::SchemaBuilder;
use super::intermediate::TypeCategory;
use crate::error::{DynasyncError, Result};

/// Shape of an auxiliary type declaration.
///
/// Arrays are only valid for unions (member names) and enums (values);
/// field maps, optionally wrapped in `{"definition": ...}`, are only valid
/// for types, inputs and interfaces.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TypeShape {
    Members(Vec<String>),
    Definition(TypeDefinition),
    Fields(IndexMap<String, String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDefinition {
    pub definition: IndexMap<String, String>,
    #[serde(default, alias = "interfaceTypes")]
    pub interfaces: Vec<String>,
}

/// User-declared types grouped by category, as found under `types` in the
/// config document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AuxiliaryTypes {
    pub types: IndexMap<String, TypeShape>,
    pub inputs: IndexMap<String, TypeShape>,
    pub interfaces: IndexMap<String, TypeShape>,
    pub unions: IndexMap<String, TypeShape>,
    pub enums: IndexMap<String, TypeShape>,
}

impl AuxiliaryTypes {
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
            && self.inputs.is_empty()
            && self.interfaces.is_empty()
            && self.unions.is_empty()
            && self.enums.is_empty()
    }

    pub fn with_type<I, K, V>(mut self, name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.types.insert(name.into(), field_shape(fields));
        self
    }

    pub fn with_input<I, K, V>(mut self, name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.inputs.insert(name.into(), field_shape(fields));
        self
    }

    pub fn with_interface<I, K, V>(mut self, name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.interfaces.insert(name.into(), field_shape(fields));
        self
    }

    pub fn with_union<I, S>(mut self, name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unions.insert(name.into(), list_shape(members));
        self
    }

    pub fn with_enum<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enums.insert(name.into(), list_shape(values));
        self
    }

    /// Merges `other` into `self`; on a name clash within a category the
    /// entry from `other` wins.
    pub fn merge(&mut self, other: AuxiliaryTypes) {
        self.types.extend(other.types);
        self.inputs.extend(other.inputs);
        self.interfaces.extend(other.interfaces);
        self.unions.extend(other.unions);
        self.enums.extend(other.enums);
    }

    /// Registers every declared type, category by category: enums, unions,
    /// types, interfaces, inputs.
    pub fn register(&self, builder: &mut SchemaBuilder) -> Result<()> {
        let groups = [
            (TypeCategory::Enum, &self.enums),
            (TypeCategory::Union, &self.unions),
            (TypeCategory::Type, &self.types),
            (TypeCategory::Interface, &self.interfaces),
            (TypeCategory::Input, &self.inputs),
        ];
        for (category, group) in groups {
            for (name, shape) in group {
                register_one(builder, category, name, shape)?;
            }
        }
        Ok(())
    }
}

fn register_one(
    builder: &mut SchemaBuilder,
    category: TypeCategory,
    name: &str,
    shape: &TypeShape,
) -> Result<()> {
    let (fields, interfaces) = match (category, shape) {
        (TypeCategory::Enum, TypeShape::Members(values)) => {
            builder.add_enum(name, values)?;
            return Ok(());
        }
        (TypeCategory::Union, TypeShape::Members(members)) => {
            builder.add_union(name, members)?;
            return Ok(());
        }
        (TypeCategory::Enum | TypeCategory::Union, _) => {
            return Err(DynasyncError::validation(format!(
                "Type \"{}\" is not compatible with props provided",
                category.as_str()
            )));
        }
        (_, TypeShape::Members(_)) => {
            return Err(DynasyncError::validation(format!(
                "Only Union and Enum types can be passed as an array, Type: {}",
                category.as_str()
            )));
        }
        (_, TypeShape::Definition(definition)) => {
            (&definition.definition, definition.interfaces.clone())
        }
        (_, TypeShape::Fields(fields)) => (fields, Vec::new()),
    };

    match category {
        TypeCategory::Type => builder.add_type_implementing(name, fields, interfaces)?,
        TypeCategory::Input => builder.add_input(name, fields)?,
        _ => builder.add_interface(name, fields)?,
    };
    Ok(())
}

fn field_shape<I, K, V>(fields: I) -> TypeShape
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    TypeShape::Fields(
        fields
            .into_iter()
            .map(|(name, type_name)| (name.into(), type_name.into()))
            .collect(),
    )
}

fn list_shape<I, S>(entries: I) -> TypeShape
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    TypeShape::Members(entries.into_iter().map(Into::into).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::IntermediateType;

    #[test]
    fn test_deserialize_all_shapes() {
        let types: AuxiliaryTypes = serde_json::from_str(
            r#"{
                "types": {
                    "Owner": {"name": "String"},
                    "Dog": {"definition": {"place": "String"}, "interfaces": ["MyInterface"]}
                },
                "interfaces": {"MyInterface": {"place": "String"}},
                "unions": {"DogAndCat": ["Dog", "Cat"]},
                "enums": {"Terms": ["Term1", "Term2"]}
            }"#,
        )
        .unwrap();
        assert!(matches!(types.types["Owner"], TypeShape::Fields(_)));
        assert!(matches!(types.types["Dog"], TypeShape::Definition(_)));
        assert!(matches!(types.unions["DogAndCat"], TypeShape::Members(_)));
        assert!(types.inputs.is_empty());
    }

    #[test]
    fn test_registration_order() {
        let types = AuxiliaryTypes::default()
            .with_input("OwnerInput", [("name", "String")])
            .with_interface("MyInterface", [("place", "String")])
            .with_type("Owner", [("name", "String")])
            .with_union("Pets", ["Owner"])
            .with_enum("Terms", ["Term1"]);
        let mut builder = SchemaBuilder::new();
        types.register(&mut builder).unwrap();
        let order: Vec<_> = builder.registry().iter().map(IntermediateType::name).collect();
        assert_eq!(order, vec!["Terms", "Pets", "Owner", "MyInterface", "OwnerInput"]);
    }

    #[test]
    fn test_array_rejected_for_field_categories() {
        for (types, category) in [
            (
                AuxiliaryTypes {
                    interfaces: IndexMap::from([(
                        "MyInterface".to_string(),
                        list_shape(["place"]),
                    )]),
                    ..AuxiliaryTypes::default()
                },
                "interface",
            ),
            (
                AuxiliaryTypes {
                    types: IndexMap::from([("Owner".to_string(), list_shape(["name"]))]),
                    ..AuxiliaryTypes::default()
                },
                "type",
            ),
            (
                AuxiliaryTypes {
                    inputs: IndexMap::from([("OwnerInput".to_string(), list_shape(["name"]))]),
                    ..AuxiliaryTypes::default()
                },
                "input",
            ),
        ] {
            let err = types.register(&mut SchemaBuilder::new()).unwrap_err();
            assert_eq!(
                err.to_string(),
                format!(
                    "Validation error: Only Union and Enum types can be passed as an array, Type: {category}"
                )
            );
        }
    }

    #[test]
    fn test_field_map_rejected_for_unions() {
        let types = AuxiliaryTypes {
            unions: IndexMap::from([("Pets".to_string(), field_shape([("a", "String")]))]),
            ..AuxiliaryTypes::default()
        };
        let err = types.register(&mut SchemaBuilder::new()).unwrap_err();
        assert!(err
            .to_string()
            .contains("Type \"union\" is not compatible with props provided"));
    }

    #[test]
    fn test_merge_prefers_incoming_entries() {
        let mut base = AuxiliaryTypes::default()
            .with_enum("Terms", ["Old"])
            .with_type("Owner", [("name", "String")]);
        base.merge(AuxiliaryTypes::default().with_enum("Terms", ["New"]));
        assert_eq!(base.enums["Terms"], list_shape(["New"]));
        assert!(base.types.contains_key("Owner"));
        assert!(!base.is_empty());
    }

    #[test]
    fn test_definition_shape_carries_interfaces() {
        let types = AuxiliaryTypes {
            types: IndexMap::from([(
                "Dog".to_string(),
                TypeShape::Definition(TypeDefinition {
                    definition: IndexMap::from([("place".to_string(), "String".to_string())]),
                    interfaces: vec!["MyInterface".to_string()],
                }),
            )]),
            ..AuxiliaryTypes::default()
        }
        .with_interface("MyInterface", [("place", "String")]);
        let mut builder = SchemaBuilder::new();
        types.register(&mut builder).unwrap();
        assert!(builder
            .render()
            .unwrap()
            .contains("type Dog implements MyInterface {\n  place: String\n}\n"));
    }
}
