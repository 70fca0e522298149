use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use super::Table;
use crate::error::{DynasyncError, Result};
use crate::graphql::{is_valid_name, TypeRef};
use crate::naming::RootType;

// Storage index naming rule: 3 to 255 of `[A-Za-z0-9_.-]`.
static INDEX_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.-]{3,255}$").unwrap());

/// Checks a normalized table before anything is derived from it.
pub fn validate_table(table: &Table) -> Result<()> {
    validate_table_name(table.base_name())?;

    let attributes = table.attributes();
    let primary_key = table.primary_key();
    require_attribute("Partition Key", primary_key.partition_name(), attributes)?;
    if let Some(sort_name) = primary_key.sort_name() {
        require_attribute("Sort Key", sort_name, attributes)?;
    }

    validate_attribute_types(attributes)?;

    for index in table.global_indexes() {
        validate_index_name(index.name())?;
        let label = format!("Index {} key", index.name());
        require_attribute(&label, index.partition_key().name(), attributes)?;
        if let Some(sort_key) = index.sort_key() {
            require_attribute(&label, sort_key.name(), attributes)?;
        }
    }
    for index in table.local_indexes() {
        validate_index_name(index.name())?;
        let label = format!("Index {} key", index.name());
        require_attribute(&label, index.sort_key().name(), attributes)?;
    }

    table.props().validate(table.base_name())
}

/// Table names become type names, so they must be legal GraphQL names and
/// must not shadow a root type.
pub fn validate_table_name(name: &str) -> Result<()> {
    if !is_valid_name(name) {
        return Err(DynasyncError::validation(format!(
            "Table name '{name}' must be a valid GraphQL name"
        )));
    }
    if RootType::ALL.iter().any(|root| root.as_str() == name) {
        return Err(DynasyncError::validation(format!(
            "Table name '{name}' is reserved for a root type"
        )));
    }
    Ok(())
}

/// Index names end up in storage requests and query templates.
fn validate_index_name(name: &str) -> Result<()> {
    if INDEX_NAME_RE.is_match(name) {
        Ok(())
    } else {
        Err(DynasyncError::validation(format!(
            "Index name '{name}' must be 3 to 255 letters, digits, '_', '-' or '.'"
        )))
    }
}

fn require_attribute(what: &str, name: &str, attributes: &IndexMap<String, String>) -> Result<()> {
    if attributes.contains_key(name) {
        return Ok(());
    }
    let dump = serde_json::to_string_pretty(attributes).unwrap_or_default();
    Err(DynasyncError::validation(format!(
        "{what} {name} must be present in attributes {dump}"
    )))
}

fn validate_attribute_types(attributes: &IndexMap<String, String>) -> Result<()> {
    for (name, type_name) in attributes {
        if !is_valid_name(name) {
            return Err(DynasyncError::validation(format!(
                "Attribute name '{name}' must be a valid GraphQL name"
            )));
        }
        TypeRef::parse(type_name)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::error::DynasyncError;
    use crate::table::{
        BillingMode, GlobalIndexDeclaration, LocalIndexDeclaration, Table, TableDeclaration,
        TableProps,
    };

    fn declaration() -> TableDeclaration {
        TableDeclaration::new("Dog", "dogId")
            .with_attributes([("dogId", "ID!"), ("breed", "String")])
    }

    #[test]
    fn test_missing_partition_key_names_key() {
        let err = Table::from_declaration(
            TableDeclaration::new("Fish", "id").with_attributes([("name", "String")]),
            None,
        )
        .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Partition Key id must be present in attributes"));
        assert!(message.contains("\"name\""));
    }

    #[test]
    fn test_missing_sort_key() {
        let err = Table::from_declaration(declaration().with_sort_key("type"), None).unwrap_err();
        assert!(err.to_string().contains("Sort Key type must be present in attributes"));
    }

    #[test]
    fn test_missing_index_key() {
        let err = Table::from_declaration(
            declaration()
                .with_global_index(GlobalIndexDeclaration::new("breed").with_sort_key("age")),
            None,
        )
        .unwrap_err();
        assert!(err
            .to_string()
            .contains("Index globalDogBreedAge key age must be present in attributes"));
    }

    #[test]
    fn test_missing_local_index_key() {
        let err = Table::from_declaration(declaration().with_local_index("age"), None).unwrap_err();
        assert!(err.to_string().contains("Index localDogAge key age"));
    }

    #[test]
    fn test_malformed_attribute_type() {
        let err = Table::from_declaration(
            TableDeclaration::new("Dog", "dogId")
                .with_attributes([("dogId", "ID!"), ("tags", "[String")]),
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("[String"));
    }

    #[test]
    fn test_invalid_table_name() {
        let err = Table::from_declaration(
            TableDeclaration::new("my-table", "id").with_attributes([("id", "ID!")]),
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("my-table"));
    }

    #[test]
    fn test_root_type_table_names_are_reserved() {
        for name in ["Query", "Mutation", "Subscription"] {
            let err = Table::from_declaration(
                TableDeclaration::new(name, "id").with_attributes([("id", "ID!")]),
                None,
            )
            .unwrap_err();
            assert!(matches!(err, DynasyncError::Validation(_)));
            assert_eq!(
                err.to_string(),
                format!("Validation error: Table name '{name}' is reserved for a root type")
            );
        }
    }

    #[test]
    fn test_declared_index_names_are_checked() {
        let err = Table::from_declaration(
            declaration().with_global_index(
                GlobalIndexDeclaration::new("breed").with_name("by\"breed\" $ctx"),
            ),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, DynasyncError::Validation(_)));
        assert!(err.to_string().contains("Index name"));

        let err = Table::from_declaration(
            declaration().with_local_index(LocalIndexDeclaration::new("breed").with_name("lb")),
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Index name 'lb'"));
    }

    #[test]
    fn test_declared_index_name_is_kept() {
        let table = Table::from_declaration(
            declaration()
                .with_global_index(GlobalIndexDeclaration::new("breed").with_name("by-breed.v1")),
            None,
        )
        .unwrap();
        assert_eq!(table.global_indexes()[0].name(), "by-breed.v1");
    }

    #[test]
    fn test_props_are_validated() {
        let props = TableProps {
            billing_mode: BillingMode::Provisioned,
            ..TableProps::default()
        };
        assert!(Table::from_declaration(declaration().with_table_props(props), None).is_err());
    }
}
