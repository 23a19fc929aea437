use axum::http::Method;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::routing::route::unique_operation_id;

/// Document-level settings of a generated OpenAPI specification.
#[derive(Debug, Clone)]
pub struct OpenApiConfig {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
    /// Mount point of the application, emitted as the single `servers` entry.
    pub server_url: Option<String>,
}

impl OpenApiConfig {
    pub fn new(title: &str, version: &str) -> Self {
        Self {
            title: title.to_string(),
            version: version.to_string(),
            description: None,
            server_url: None,
        }
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        if !desc.is_empty() {
            self.description = Some(desc.to_string());
        }
        self
    }

    pub fn with_server_url(mut self, url: &str) -> Self {
        if !url.is_empty() {
            self.server_url = Some(url.to_string());
        }
        self
    }
}

/// Metadata about a single documented operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationInfo {
    pub path: String,
    pub method: String,
    pub operation_id: String,
    pub summary: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub deprecated: bool,
}

impl OperationInfo {
    /// Documentation-only `GET` entry, used for per-version doc links.
    pub fn alias(path: impl Into<String>, name: &str, tag: &str) -> Self {
        let path = path.into();
        Self {
            operation_id: unique_operation_id(name, &path, &Method::GET),
            summary: humanize(name),
            path,
            method: Method::GET.to_string(),
            description: None,
            tags: vec![tag.to_string()],
            deprecated: false,
        }
    }
}

/// `read_items` → `Read Items`.
pub(crate) fn humanize(name: &str) -> String {
    name.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Build an OpenAPI 3.1.0 JSON spec from config and operation metadata.
pub fn build_spec(config: &OpenApiConfig, operations: &[OperationInfo]) -> Value {
    let mut paths: Map<String, Value> = Map::new();

    for op in operations {
        let mut operation: Map<String, Value> = Map::new();

        if !op.tags.is_empty() {
            operation.insert("tags".into(), json!(op.tags));
        }
        operation.insert("summary".into(), json!(op.summary));
        if let Some(ref description) = op.description {
            operation.insert("description".into(), json!(description));
        }
        operation.insert("operationId".into(), json!(op.operation_id));
        operation.insert(
            "responses".into(),
            json!({
                "200": {
                    "description": "Successful Response",
                    "content": { "application/json": { "schema": {} } }
                }
            }),
        );
        if op.deprecated {
            operation.insert("deprecated".into(), json!(true));
        }

        let path_entry = paths.entry(op.path.clone()).or_insert_with(|| json!({}));
        if let Some(obj) = path_entry.as_object_mut() {
            obj.insert(op.method.to_lowercase(), Value::Object(operation));
        }
    }

    let mut info: Map<String, Value> = Map::new();
    info.insert("title".into(), json!(config.title));
    info.insert("version".into(), json!(config.version));
    if let Some(ref desc) = config.description {
        info.insert("description".into(), json!(desc));
    }

    let mut spec: Map<String, Value> = Map::new();
    spec.insert("openapi".into(), json!("3.1.0"));
    spec.insert("info".into(), Value::Object(info));
    if let Some(ref url) = config.server_url {
        spec.insert("servers".into(), json!([{ "url": url }]));
    }
    spec.insert("paths".into(), Value::Object(paths));
    Value::Object(spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(path: &str, method: &str, name: &str) -> OperationInfo {
        OperationInfo {
            path: path.into(),
            method: method.into(),
            operation_id: format!("{name}_{}", method.to_lowercase()),
            summary: humanize(name),
            description: None,
            tags: vec![],
            deprecated: false,
        }
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("read_items"), "Read Items");
        assert_eq!(humanize("2.1"), "2.1");
        assert_eq!(humanize("__private"), "Private");
    }

    #[test]
    fn test_spec_shape() {
        let config = OpenApiConfig::new("Shop", "2.0").with_description("Shop API");
        let spec = build_spec(
            &config,
            &[op("/items", "GET", "list_items"), op("/items", "POST", "create_item")],
        );

        assert_eq!(spec["openapi"], "3.1.0");
        assert_eq!(spec["info"]["title"], "Shop");
        assert_eq!(spec["info"]["version"], "2.0");
        assert_eq!(spec["info"]["description"], "Shop API");
        assert!(spec.get("servers").is_none());
        assert_eq!(spec["paths"]["/items"]["get"]["summary"], "List Items");
        assert_eq!(spec["paths"]["/items"]["post"]["operationId"], "create_item_post");
    }

    #[test]
    fn test_server_url_and_alias() {
        let config = OpenApiConfig::new("Shop", "1.0").with_server_url("/v1_0");
        let alias = OperationInfo::alias("/v1_0/docs", "1.0", "Documentations");
        let spec = build_spec(&config, &[alias]);

        assert_eq!(spec["servers"][0]["url"], "/v1_0");
        let get = &spec["paths"]["/v1_0/docs"]["get"];
        assert_eq!(get["tags"][0], "Documentations");
        assert_eq!(get["operationId"], "1_0_v1_0_docs_get");
    }
}
