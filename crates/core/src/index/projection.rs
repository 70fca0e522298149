use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Which attributes an index copies from the base table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "projectionType",
    content = "nonKeyAttributes",
    rename_all = "SCREAMING_SNAKE_CASE"
)]
pub enum Projection {
    #[default]
    All,
    KeysOnly,
    Include(Vec<String>),
}

impl Projection {
    /// Derives the projection from an index `include` list.
    ///
    /// An empty list projects everything. A "keys only" marker anywhere in the
    /// list wins over the other entries. Otherwise the list is taken literally.
    ///
    /// ```
    /// use dynasync_core::index::Projection;
    ///
    /// assert_eq!(Projection::from_include(&[]), Projection::All);
    /// assert_eq!(
    ///     Projection::from_include(&["name".to_string(), "KEYS_ONLY".to_string()]),
    ///     Projection::KeysOnly
    /// );
    /// ```
    pub fn from_include(include: &[String]) -> Self {
        if include.is_empty() {
            Projection::All
        } else if include.iter().any(|entry| is_keys_only_marker(entry)) {
            Projection::KeysOnly
        } else {
            Projection::Include(include.to_vec())
        }
    }

    pub fn projection_type(&self) -> &'static str {
        match self {
            Projection::All => "ALL",
            Projection::KeysOnly => "KEYS_ONLY",
            Projection::Include(_) => "INCLUDE",
        }
    }

    pub fn non_key_attributes(&self) -> Option<&[String]> {
        match self {
            Projection::Include(attributes) => Some(attributes),
            _ => None,
        }
    }
}

static KEYS_ONLY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)keys?.?only").unwrap());

fn is_keys_only_marker(entry: &str) -> bool {
    KEYS_ONLY_RE.is_match(entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn include(entries: &[&str]) -> Vec<String> {
        entries.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn test_empty_include_projects_all() {
        assert_eq!(Projection::from_include(&[]), Projection::All);
        assert_eq!(Projection::All.non_key_attributes(), None);
    }

    #[test]
    fn test_keys_only_marker_variants() {
        for marker in ["keyonly", "keysonly", "KEYS_ONLY", "Keys Only", "key-only", "keys.only"] {
            assert_eq!(
                Projection::from_include(&include(&[marker])),
                Projection::KeysOnly,
                "marker {marker:?}"
            );
        }
    }

    #[test]
    fn test_keys_only_wins_over_attributes() {
        let projection = Projection::from_include(&include(&["breed", "keys_only", "age"]));
        assert_eq!(projection, Projection::KeysOnly);
        assert_eq!(projection.non_key_attributes(), None);
    }

    #[test]
    fn test_include_keeps_literal_list() {
        let projection = Projection::from_include(&include(&["include"]));
        assert_eq!(projection.projection_type(), "INCLUDE");
        assert_eq!(projection.non_key_attributes(), Some(&include(&["include"])[..]));
    }

    #[test]
    fn test_non_marker_words_are_attributes() {
        let projection = Projection::from_include(&include(&["keystone", "monkey"]));
        assert_eq!(projection, Projection::Include(include(&["keystone", "monkey"])));
    }

    #[test]
    fn test_projection_serialization() {
        assert_eq!(
            serde_json::to_string(&Projection::Include(include(&["name"]))).unwrap(),
            r#"{"projectionType":"INCLUDE","nonKeyAttributes":["name"]}"#
        );
        assert_eq!(
            serde_json::to_string(&Projection::KeysOnly).unwrap(),
            r#"{"projectionType":"KEYS_ONLY"}"#
        );
    }
}
