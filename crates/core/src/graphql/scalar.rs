/// Built-in scalar types understood by the API layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scalar {
    Id,
    String,
    Int,
    Float,
    Boolean,
    AwsDate,
    AwsTime,
    AwsDateTime,
    AwsTimestamp,
    AwsEmail,
    AwsJson,
    AwsUrl,
    AwsPhone,
    AwsIpAddress,
}

impl Scalar {
    pub const ALL: [Scalar; 14] = [
        Scalar::Id,
        Scalar::String,
        Scalar::Int,
        Scalar::Float,
        Scalar::Boolean,
        Scalar::AwsDate,
        Scalar::AwsTime,
        Scalar::AwsDateTime,
        Scalar::AwsTimestamp,
        Scalar::AwsEmail,
        Scalar::AwsJson,
        Scalar::AwsUrl,
        Scalar::AwsPhone,
        Scalar::AwsIpAddress,
    ];

    /// The name as it appears in schema text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scalar::Id => "ID",
            Scalar::String => "String",
            Scalar::Int => "Int",
            Scalar::Float => "Float",
            Scalar::Boolean => "Boolean",
            Scalar::AwsDate => "AWSDate",
            Scalar::AwsTime => "AWSTime",
            Scalar::AwsDateTime => "AWSDateTime",
            Scalar::AwsTimestamp => "AWSTimestamp",
            Scalar::AwsEmail => "AWSEmail",
            Scalar::AwsJson => "AWSJSON",
            Scalar::AwsUrl => "AWSURL",
            Scalar::AwsPhone => "AWSPhone",
            Scalar::AwsIpAddress => "AWSIPAddress",
        }
    }

    /// The normalized lookup key, see [`normalize_type_name`].
    pub fn normalized(&self) -> &'static str {
        match self {
            Scalar::Id => "id",
            Scalar::String => "string",
            Scalar::Int => "int",
            Scalar::Float => "float",
            Scalar::Boolean => "boolean",
            Scalar::AwsDate => "awsDate",
            Scalar::AwsTime => "awsTime",
            Scalar::AwsDateTime => "awsDateTime",
            Scalar::AwsTimestamp => "awsTimestamp",
            Scalar::AwsEmail => "awsEmail",
            Scalar::AwsJson => "awsJson",
            Scalar::AwsUrl => "awsUrl",
            Scalar::AwsPhone => "awsPhone",
            Scalar::AwsIpAddress => "awsIpAddress",
        }
    }

    /// Resolves a declared type name to a built-in scalar.
    ///
    /// Both the snake-ish declaration form (`AWS_TIMESTAMP`, `string`) and the
    /// rendered form (`AWSTimestamp`, `String`) are accepted.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = normalize_type_name(name);
        Self::ALL.into_iter().find(|scalar| {
            scalar.normalized() == normalized || scalar.as_str().eq_ignore_ascii_case(name)
        })
    }
}

/// Normalizes a type name for registry lookups.
///
/// The name is split on `_`; the first word is lowercased and every following
/// word is capitalized with a lowercase tail.
///
/// ```
/// use dynasync_core::graphql::normalize_type_name;
///
/// assert_eq!(normalize_type_name("AWS_TIMESTAMP"), "awsTimestamp");
/// assert_eq!(normalize_type_name("String"), "string");
/// assert_eq!(normalize_type_name("ID"), "id");
/// ```
pub fn normalize_type_name(name: &str) -> String {
    let mut words = name.split('_');
    let mut normalized = words.next().unwrap_or_default().to_lowercase();
    for word in words {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            normalized.extend(first.to_uppercase());
            normalized.push_str(&chars.as_str().to_lowercase());
        }
    }
    normalized
}

/// Returns true if `name` is a legal GraphQL name (`[_A-Za-z][_0-9A-Za-z]*`).
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => {
            chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    }
}
