use serde::{Deserialize, Serialize};

/// Storage attribute types for key attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeType {
    #[serde(rename = "S")]
    String,
    #[serde(rename = "N")]
    Number,
    #[serde(rename = "B")]
    Binary,
}

impl AttributeType {
    /// Classifies a semantic type name into its storage encoding.
    ///
    /// Names containing `int`, `float` or `timestamp` (any case) are numeric,
    /// names containing `boolean` are binary, everything else is a string.
    ///
    /// ```
    /// use dynasync_core::key::AttributeType;
    ///
    /// assert_eq!(AttributeType::classify("AWS_TIMESTAMP"), AttributeType::Number);
    /// assert_eq!(AttributeType::classify("Boolean"), AttributeType::Binary);
    /// assert_eq!(AttributeType::classify("ID"), AttributeType::String);
    /// ```
    pub fn classify(type_name: &str) -> Self {
        let lower = type_name.to_lowercase();
        if ["int", "float", "timestamp"]
            .iter()
            .any(|needle| lower.contains(needle))
        {
            AttributeType::Number
        } else if lower.contains("boolean") {
            AttributeType::Binary
        } else {
            AttributeType::String
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeType::String => "S",
            AttributeType::Number => "N",
            AttributeType::Binary => "B",
        }
    }
}

/// A key attribute definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyAttribute {
    pub name: String,
    pub attribute_type: AttributeType,
}
