use indexmap::IndexMap;

use super::intermediate::{fields_from_map, FieldDefinition, IntermediateType};
use super::registry::TypeRegistry;
use super::render::render_schema;
use crate::error::{DynasyncError, Result};
use crate::graphql::TypeRef;
use crate::naming::{Cardinality, OperationDescriptor, RootType};
use crate::table::Table;

/// Accumulates schema descriptors; text is produced by [`SchemaBuilder::render`].
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    registry: TypeRegistry,
    roots: Vec<RootType>,
    tables: Vec<String>,
    additions: Vec<String>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_type(
        &mut self,
        name: &str,
        fields: &IndexMap<String, String>,
    ) -> Result<&IntermediateType> {
        self.add_type_implementing(name, fields, Vec::new())
    }

    /// Registers an object type that implements the named interfaces.
    pub fn add_type_implementing(
        &mut self,
        name: &str,
        fields: &IndexMap<String, String>,
        interfaces: Vec<String>,
    ) -> Result<&IntermediateType> {
        let ty = IntermediateType::object(name, fields_from_map(fields)?)?.implementing(interfaces);
        self.registry.register(ty)
    }

    pub fn add_input(
        &mut self,
        name: &str,
        fields: &IndexMap<String, String>,
    ) -> Result<&IntermediateType> {
        let ty = IntermediateType::input(name, fields_from_map(fields)?)?;
        self.registry.register(ty)
    }

    pub fn add_interface(
        &mut self,
        name: &str,
        fields: &IndexMap<String, String>,
    ) -> Result<&IntermediateType> {
        let ty = IntermediateType::interface(name, fields_from_map(fields)?)?;
        self.registry.register(ty)
    }

    pub fn add_union(&mut self, name: &str, members: &[String]) -> Result<&IntermediateType> {
        let ty = IntermediateType::union(name, members.to_vec())?;
        self.registry.register(ty)
    }

    pub fn add_enum(&mut self, name: &str, values: &[String]) -> Result<&IntermediateType> {
        let ty = IntermediateType::enumeration(name, values.to_vec())?;
        self.registry.register(ty)
    }

    /// Adds a table's object type, its input type and one root field per
    /// planned operation.
    pub fn add_table(&mut self, table: &Table, operations: &[OperationDescriptor]) -> Result<()> {
        let base = table.base_name();
        if self.tables.iter().any(|name| name == base) {
            return Err(DynasyncError::conflict(format!(
                "Table {base} is already part of the schema"
            )));
        }

        self.add_type(base, table.attributes())?;
        if let Some(input) = table.input_type_name() {
            self.add_input(&input, &table.input_attributes())?;
        }

        for operation in operations {
            self.add_root_field(operation.root, root_field(base, operation))?;
        }

        self.tables.push(base.to_string());
        Ok(())
    }

    /// Adds a field to a root type, registering the root on first use.
    pub fn add_root_field(&mut self, root: RootType, field: FieldDefinition) -> Result<()> {
        if !self.roots.contains(&root) {
            self.registry
                .register(IntermediateType::object(root.as_str(), Vec::new())?)?;
            self.roots.push(root);
        }

        let fields = self
            .registry
            .get_mut(root.as_str())
            .and_then(IntermediateType::fields_mut)
            .ok_or_else(|| {
                DynasyncError::conflict(format!("{} is not an object type", root.as_str()))
            })?;
        if fields.iter().any(|existing| existing.name == field.name) {
            return Err(DynasyncError::conflict(format!(
                "Field {} is already defined on {}",
                field.name,
                root.as_str()
            )));
        }
        fields.push(field);
        Ok(())
    }

    /// Appends free-form schema text, emitted after the registered types.
    pub fn add_to_schema(&mut self, addition: impl Into<String>) {
        self.additions.push(addition.into());
    }

    pub fn root_fields(&self, root: RootType) -> &[FieldDefinition] {
        if !self.roots.contains(&root) {
            return &[];
        }
        self.registry
            .get(root.as_str())
            .map(IntermediateType::fields)
            .unwrap_or_default()
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Names of the tables added so far, in order.
    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    /// Renders the schema text. Type references are resolved here, so types
    /// may be referenced before they are registered.
    pub fn render(&self) -> Result<String> {
        render_schema(&self.registry, &self.roots, &self.additions)
    }
}

fn root_field(base: &str, operation: &OperationDescriptor) -> FieldDefinition {
    let returns = match operation.cardinality {
        Cardinality::Single => TypeRef::named(base),
        Cardinality::List => TypeRef::list_of(base),
    };
    let field = operation
        .key_args
        .iter()
        .fold(FieldDefinition::new(operation.name.clone(), returns), |field, arg| {
            field.with_arg(arg.name.clone(), arg.type_ref.clone())
        });
    match &operation.input {
        Some(input) => field.with_arg("input", TypeRef::named(input.clone())),
        None => field,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::plan_operations;
    use crate::table::{GlobalIndexDeclaration, TableDeclaration};

    fn fields(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn add(builder: &mut SchemaBuilder, declaration: TableDeclaration) -> Result<()> {
        let table = Table::from_declaration(declaration, None)?;
        builder.add_table(&table, &plan_operations(&table))
    }

    fn dog() -> TableDeclaration {
        TableDeclaration::new("Dog", "dogId")
            .with_attributes([("dogId", "ID!"), ("breed", "String!")])
            .with_auto(true)
    }

    #[test]
    fn test_dog_schema() {
        let mut builder = SchemaBuilder::new();
        add(&mut builder, dog()).unwrap();
        assert_eq!(
            builder.render().unwrap(),
            "schema {\n  query: Query\n  mutation: Mutation\n}\n\
             type Dog {\n  dogId: ID!\n  breed: String!\n}\n\
             input DogInput {\n  breed: String!\n}\n\
             type Query {\n  getDogByDogId(dogId: ID!): Dog\n}\n\
             type Mutation {\n  createDog(input: DogInput): Dog\n  \
             putDog(dogId: ID! input: DogInput): Dog\n  deleteDog(dogId: ID!): Dog\n}\n"
        );
    }

    #[test]
    fn test_global_index_fields() {
        let mut builder = SchemaBuilder::new();
        add(
            &mut builder,
            TableDeclaration::new("Dog", "dogId")
                .with_attributes([("dogId", "ID!"), ("name", "String"), ("age", "Int")])
                .with_global_index("name")
                .with_global_index(GlobalIndexDeclaration::new("name").with_sort_key("age")),
        )
        .unwrap();
        let text = builder.render().unwrap();
        assert!(text.contains("  getDogByName(name: String): Dog\n"));
        assert!(text.contains("  getDogByNameAndAge(name: String age: Int): Dog\n"));
    }

    #[test]
    fn test_duplicate_table_is_a_conflict() {
        let mut builder = SchemaBuilder::new();
        add(&mut builder, dog()).unwrap();
        let err = add(&mut builder, dog()).unwrap_err();
        assert!(matches!(err, DynasyncError::Conflict(_)));
    }

    #[test]
    fn test_duplicate_root_field_is_a_conflict() {
        let mut builder = SchemaBuilder::new();
        let field = FieldDefinition::new("ping", TypeRef::named("String"));
        builder.add_root_field(RootType::Query, field.clone()).unwrap();
        assert!(builder.add_root_field(RootType::Query, field).is_err());
        assert_eq!(builder.root_fields(RootType::Query).len(), 1);
        assert!(builder.root_fields(RootType::Mutation).is_empty());
    }

    #[test]
    fn test_roots_are_registered_at_first_use() {
        let mut builder = SchemaBuilder::new();
        add(&mut builder, dog()).unwrap();
        add(
            &mut builder,
            TableDeclaration::new("Cat", "catId")
                .with_attributes([("catId", "ID!")])
                .with_subscription(true),
        )
        .unwrap();
        let order: Vec<_> = builder.registry().iter().map(IntermediateType::name).collect();
        assert_eq!(
            order,
            vec!["Dog", "DogInput", "Query", "Mutation", "Cat", "Subscription"]
        );
        let expected =
            "schema {\n  query: Query\n  mutation: Mutation\n  subscription: Subscription\n}\n";
        assert!(builder.render().unwrap().starts_with(expected));
    }

    #[test]
    fn test_auxiliary_registration_is_idempotent() {
        let mut builder = SchemaBuilder::new();
        builder.add_type("Owner", &fields(&[("name", "String")])).unwrap();
        let again = builder.add_type("Owner", &fields(&[("other", "Int")])).unwrap();
        assert_eq!(again.fields()[0].name, "name");
        assert_eq!(builder.registry().len(), 1);
    }

    #[test]
    fn test_forward_references_resolve_at_render() {
        let mut builder = SchemaBuilder::new();
        builder.add_type("Dog", &fields(&[("owner", "Owner")])).unwrap();
        assert!(builder.render().is_err());
        builder.add_type("Owner", &fields(&[("name", "String")])).unwrap();
        assert!(builder.render().unwrap().contains("  owner: Owner\n"));
    }

    #[test]
    fn test_free_form_additions_follow_types() {
        let mut builder = SchemaBuilder::new();
        builder.add_enum("Terms", &["Term1".to_string()]).unwrap();
        builder.add_to_schema("scalar Extra\n");
        assert_eq!(
            builder.render().unwrap(),
            "enum Terms {\n  Term1\n}\nscalar Extra\n"
        );
    }

    #[test]
    fn test_table_without_input_type() {
        let mut builder = SchemaBuilder::new();
        add(
            &mut builder,
            TableDeclaration::new("Tag", "tagId").with_attributes([("tagId", "ID!")]),
        )
        .unwrap();
        let text = builder.render().unwrap();
        assert!(!text.contains("input "));
        assert!(text.contains("  putTag(tagId: ID!): Tag\n"));
    }
}
