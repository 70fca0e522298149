//! Request/response mapping templates for the storage data source.

use serde::Serialize;

/// Mapping template format version.
pub const TEMPLATE_VERSION: &str = "2017-02-28";

/// Storage call a resolver performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StorageAction {
    GetItem,
    Query,
    Scan,
    PutItem,
    DeleteItem,
}

impl StorageAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageAction::GetItem => "GetItem",
            StorageAction::Query => "Query",
            StorageAction::Scan => "Scan",
            StorageAction::PutItem => "PutItem",
            StorageAction::DeleteItem => "DeleteItem",
        }
    }
}

/// Where a key value comes from at request time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "argument", rename_all = "camelCase")]
pub enum KeyValue {
    Argument(String),
    AutoId,
}

impl KeyValue {
    fn render(&self) -> String {
        match self {
            KeyValue::Argument(name) => format!("$ctx.args.{name}"),
            KeyValue::AutoId => "$util.autoId()".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyAssignment {
    pub name: String,
    pub value: KeyValue,
}

impl KeyAssignment {
    pub fn argument(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: KeyValue::Argument(name.to_string()),
        }
    }

    pub fn auto_id(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: KeyValue::AutoId,
        }
    }

    fn render(&self) -> String {
        format!(
            "\"{}\": $util.dynamodb.toDynamoDBJson({})",
            self.name,
            self.value.render()
        )
    }
}

/// Key a request addresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "shape", rename_all = "camelCase")]
pub enum KeyShape {
    None,
    Partition {
        partition: KeyAssignment,
    },
    Composite {
        partition: KeyAssignment,
        sort: KeyAssignment,
    },
}

impl KeyShape {
    fn assignments(&self) -> Vec<&KeyAssignment> {
        match self {
            KeyShape::None => Vec::new(),
            KeyShape::Partition { partition } => vec![partition],
            KeyShape::Composite { partition, sort } => vec![partition, sort],
        }
    }

    fn render(&self) -> String {
        let entries: Vec<String> = self
            .assignments()
            .into_iter()
            .map(KeyAssignment::render)
            .collect();
        format!("\"key\": {{{}}}", entries.join(", "))
    }
}

/// Equality conditions on key attributes, joined with `AND`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyCondition {
    keys: Vec<String>,
}

impl KeyCondition {
    pub fn eq(name: &str) -> Self {
        Self {
            keys: vec![name.to_string()],
        }
    }

    pub fn and(mut self, name: &str) -> Self {
        self.keys.push(name.to_string());
        self
    }

    fn render(&self) -> String {
        let expression = self
            .keys
            .iter()
            .map(|key| format!("#{key} = :{key}"))
            .collect::<Vec<_>>()
            .join(" AND ");
        let names = self
            .keys
            .iter()
            .map(|key| format!("\"#{key}\": \"{key}\""))
            .collect::<Vec<_>>()
            .join(", ");
        let values = self
            .keys
            .iter()
            .map(|key| format!("\":{key}\": $util.dynamodb.toDynamoDBJson($ctx.args.{key})"))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "\"query\": {{\"expression\": \"{expression}\", \"expressionNames\": {{{names}}}, \"expressionValues\": {{{values}}}}}"
        )
    }
}

/// A request mapping template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestTemplate {
    Scan,
    GetItem {
        key: KeyShape,
    },
    Query {
        index: Option<String>,
        condition: KeyCondition,
    },
    PutItem {
        key: KeyShape,
        project_input: bool,
    },
    DeleteItem {
        key: KeyShape,
    },
}

impl RequestTemplate {
    pub fn action(&self) -> StorageAction {
        match self {
            RequestTemplate::Scan => StorageAction::Scan,
            RequestTemplate::GetItem { .. } => StorageAction::GetItem,
            RequestTemplate::Query { .. } => StorageAction::Query,
            RequestTemplate::PutItem { .. } => StorageAction::PutItem,
            RequestTemplate::DeleteItem { .. } => StorageAction::DeleteItem,
        }
    }

    /// Renders the template text.
    ///
    /// ```
    /// use dynasync_core::resolver::{KeyAssignment, KeyShape, RequestTemplate};
    ///
    /// let template = RequestTemplate::GetItem {
    ///     key: KeyShape::Partition { partition: KeyAssignment::argument("dogId") },
    /// };
    /// assert_eq!(
    ///     template.render(),
    ///     r#"{"version": "2017-02-28", "operation": "GetItem", "key": {"dogId": $util.dynamodb.toDynamoDBJson($ctx.args.dogId)}}"#
    /// );
    /// ```
    pub fn render(&self) -> String {
        let head = format!(
            "\"version\": \"{TEMPLATE_VERSION}\", \"operation\": \"{}\"",
            self.action().as_str()
        );
        match self {
            RequestTemplate::Scan => format!("{{{head}}}"),
            RequestTemplate::GetItem { key } | RequestTemplate::DeleteItem { key } => {
                format!("{{{head}, {}}}", key.render())
            }
            RequestTemplate::Query { index, condition } => {
                let index = index
                    .as_ref()
                    .map(|name| format!(", \"index\": \"{name}\""))
                    .unwrap_or_default();
                format!("{{{head}{index}, {}}}", condition.render())
            }
            RequestTemplate::PutItem { key, project_input } => {
                if *project_input {
                    format!(
                        "#set($input = $ctx.args.input)\n{{{head}, {}, \"attributeValues\": $util.dynamodb.toMapValuesJson($input)}}",
                        key.render()
                    )
                } else {
                    format!("{{{head}, {}}}", key.render())
                }
            }
        }
    }
}

/// A response mapping template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ResponseTemplate {
    Item,
    ItemList,
}

impl ResponseTemplate {
    pub fn render(&self) -> &'static str {
        match self {
            ResponseTemplate::Item => "$util.toJson($ctx.result)",
            ResponseTemplate::ItemList => "$util.toJson($ctx.result.items)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_template() {
        assert_eq!(
            RequestTemplate::Scan.render(),
            r#"{"version": "2017-02-28", "operation": "Scan"}"#
        );
    }

    #[test]
    fn test_composite_delete_template() {
        let template = RequestTemplate::DeleteItem {
            key: KeyShape::Composite {
                partition: KeyAssignment::argument("eventName"),
                sort: KeyAssignment::argument("startTime"),
            },
        };
        assert_eq!(
            template.render(),
            concat!(
                r#"{"version": "2017-02-28", "operation": "DeleteItem", "key": {"#,
                r#""eventName": $util.dynamodb.toDynamoDBJson($ctx.args.eventName), "#,
                r#""startTime": $util.dynamodb.toDynamoDBJson($ctx.args.startTime)}}"#
            )
        );
    }

    #[test]
    fn test_query_template_with_index() {
        let template = RequestTemplate::Query {
            index: Some("globalDogNameAge".to_string()),
            condition: KeyCondition::eq("name").and("age"),
        };
        let text = template.render();
        assert!(text.contains(r#""operation": "Query", "index": "globalDogNameAge""#));
        assert!(text.contains(r##""expression": "#name = :name AND #age = :age""##));
        assert!(text.contains(r#"":age": $util.dynamodb.toDynamoDBJson($ctx.args.age)"#));
    }

    #[test]
    fn test_query_template_without_index() {
        let template = RequestTemplate::Query {
            index: None,
            condition: KeyCondition::eq("dogId"),
        };
        assert!(!template.render().contains("\"index\""));
    }

    #[test]
    fn test_put_template_with_auto_id() {
        let template = RequestTemplate::PutItem {
            key: KeyShape::Partition {
                partition: KeyAssignment::auto_id("dogId"),
            },
            project_input: true,
        };
        let text = template.render();
        assert!(text.starts_with("#set($input = $ctx.args.input)\n"));
        assert!(text.contains(r#""dogId": $util.dynamodb.toDynamoDBJson($util.autoId())"#));
        assert!(text.ends_with(r#""attributeValues": $util.dynamodb.toMapValuesJson($input)}"#));
    }

    #[test]
    fn test_put_template_without_input() {
        let template = RequestTemplate::PutItem {
            key: KeyShape::Partition {
                partition: KeyAssignment::argument("tagId"),
            },
            project_input: false,
        };
        assert!(!template.render().contains("attributeValues"));
    }

    #[test]
    fn test_response_templates() {
        assert_eq!(ResponseTemplate::Item.render(), "$util.toJson($ctx.result)");
        assert_eq!(
            ResponseTemplate::ItemList.render(),
            "$util.toJson($ctx.result.items)"
        );
    }
}
