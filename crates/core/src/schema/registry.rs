use std::collections::HashMap;

use super::intermediate::IntermediateType;
use crate::error::{DynasyncError, Result};
use crate::graphql::{normalize_type_name, Scalar};

/// Ordered registry of named types, keyed by normalized name.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: Vec<IntermediateType>,
    by_name: HashMap<String, usize>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a type and returns the registered entry.
    ///
    /// Registering a name again under the same category returns the existing
    /// entry untouched. A different category is a conflict.
    pub fn register(&mut self, ty: IntermediateType) -> Result<&IntermediateType> {
        if Scalar::from_name(ty.name()).is_some() {
            return Err(DynasyncError::validation(format!(
                "Type {} collides with a built-in scalar",
                ty.name()
            )));
        }

        let key = normalize_type_name(ty.name());
        if let Some(&position) = self.by_name.get(&key) {
            let existing = &self.types[position];
            if existing.category() != ty.category() {
                return Err(DynasyncError::conflict(format!(
                    "Type {} is already registered as {}, cannot register it as {}",
                    existing.name(),
                    existing.category().as_str(),
                    ty.category().as_str()
                )));
            }
            return Ok(existing);
        }

        self.by_name.insert(key, self.types.len());
        self.types.push(ty);
        Ok(&self.types[self.types.len() - 1])
    }

    pub fn get(&self, name: &str) -> Option<&IntermediateType> {
        self.by_name
            .get(&normalize_type_name(name))
            .map(|&position| &self.types[position])
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut IntermediateType> {
        self.by_name
            .get(&normalize_type_name(name))
            .map(|&position| &mut self.types[position])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(&normalize_type_name(name))
    }

    /// Registered types in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &IntermediateType> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Resolves a declared type name to its rendered name.
    pub fn resolve(&self, name: &str) -> Result<String> {
        if let Some(scalar) = Scalar::from_name(name) {
            return Ok(scalar.as_str().to_string());
        }
        self.get(name)
            .map(|ty| ty.name().to_string())
            .ok_or_else(|| DynasyncError::validation(format!("{name} is not a valid Type")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::TypeRef;
    use crate::schema::intermediate::FieldDefinition;

    fn object(name: &str, field: &str) -> IntermediateType {
        let fields = vec![FieldDefinition::new(field, TypeRef::named("String"))];
        IntermediateType::object(name, fields).unwrap()
    }

    #[test]
    fn test_register_is_idempotent_per_category() {
        let mut registry = TypeRegistry::new();
        registry.register(object("Dog", "name")).unwrap();
        let again = registry.register(object("Dog", "other")).unwrap();
        assert_eq!(again.fields()[0].name, "name");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_conflicting_category() {
        let mut registry = TypeRegistry::new();
        registry.register(object("Dog", "name")).unwrap();
        let err = registry
            .register(IntermediateType::enumeration("Dog", vec!["A".to_string()]).unwrap())
            .unwrap_err();
        assert!(matches!(err, DynasyncError::Conflict(_)));
        assert!(err.to_string().contains("enum"));
    }

    #[test]
    fn test_lookup_uses_normalized_name() {
        let mut registry = TypeRegistry::new();
        registry.register(object("My_Type", "name")).unwrap();
        assert!(registry.contains("MY_TYPE"));
        assert_eq!(registry.resolve("my_type").unwrap(), "My_Type");
    }

    #[test]
    fn test_scalar_names_are_reserved() {
        let mut registry = TypeRegistry::new();
        assert!(registry.register(object("String", "name")).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_resolve_scalars_and_unknowns() {
        let registry = TypeRegistry::new();
        assert_eq!(registry.resolve("AWS_TIMESTAMP").unwrap(), "AWSTimestamp");
        assert_eq!(registry.resolve("id").unwrap(), "ID");
        let err = registry.resolve("Cat").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Cat is not a valid Type");
    }

    #[test]
    fn test_iteration_follows_registration_order() {
        let mut registry = TypeRegistry::new();
        registry.register(object("Dog", "name")).unwrap();
        registry.register(object("Cat", "name")).unwrap();
        let names: Vec<_> = registry.iter().map(IntermediateType::name).collect();
        assert_eq!(names, vec!["Dog", "Cat"]);
    }
}
