use std::fmt;

use serde::{Serialize, Serializer};

use super::scalar::is_valid_name;
use crate::error::{DynasyncError, Result};

/// A parsed GraphQL type reference.
///
/// Accepted forms are `Name`, `Name!`, `[Name]`, `[Name!]`, `[Name]!` and
/// `[Name!]!`. Nested lists are not part of the grammar.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    name: String,
    is_list: bool,
    is_required: bool,
    is_required_list: bool,
}

impl TypeRef {
    /// Parses a type string.
    ///
    /// ```
    /// use dynasync_core::graphql::TypeRef;
    ///
    /// let ty = TypeRef::parse("[Dog!]!").unwrap();
    /// assert_eq!(ty.name(), "Dog");
    /// assert!(ty.is_list() && ty.is_required() && ty.is_required_list());
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = || DynasyncError::validation(format!("Invalid type string '{raw}'"));

        let trimmed = raw.trim();
        let (body, outer_required) = match trimmed.strip_suffix('!') {
            Some(rest) => (rest.trim_end(), true),
            None => (trimmed, false),
        };

        if let Some(inner) = body.strip_prefix('[') {
            let inner = inner.strip_suffix(']').ok_or_else(invalid)?.trim();
            let (name, inner_required) = match inner.strip_suffix('!') {
                Some(rest) => (rest.trim_end(), true),
                None => (inner, false),
            };
            if !is_valid_name(name) {
                return Err(invalid());
            }
            return Ok(Self {
                name: name.to_string(),
                is_list: true,
                is_required: inner_required,
                is_required_list: outer_required,
            });
        }

        if !is_valid_name(body) {
            return Err(invalid());
        }
        Ok(Self {
            name: body.to_string(),
            is_list: false,
            is_required: outer_required,
            is_required_list: false,
        })
    }

    /// A nullable, non-list reference to `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_list: false,
            is_required: false,
            is_required_list: false,
        }
    }

    /// A nullable list of nullable `name` items.
    pub fn list_of(name: impl Into<String>) -> Self {
        Self {
            is_list: true,
            ..Self::named(name)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_list(&self) -> bool {
        self.is_list
    }

    /// Whether the named type (or each list item) is non-null.
    pub fn is_required(&self) -> bool {
        self.is_required
    }

    /// Whether the list itself is non-null.
    pub fn is_required_list(&self) -> bool {
        self.is_required_list
    }

    /// Renders the reference with `resolved` substituted for the declared name.
    pub fn render_as(&self, resolved: &str) -> String {
        let mut out = resolved.to_string();
        if self.is_required {
            out.push('!');
        }
        if self.is_list {
            out = format!("[{out}]");
            if self.is_required_list {
                out.push('!');
            }
        }
        out
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_as(&self.name))
    }
}

impl Serialize for TypeRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
