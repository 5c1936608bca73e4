//! OpenAPI 3.1 document types and the document builder.

use std::collections::BTreeMap;

use gantry_router::{
    Converter, OperationMeta, ParamInfo, RouteDescriptor, default_operation_id,
    extract_path_params, strip_converters,
};
use gantry_types::Method;
use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::schema::Schema;

/// The OpenAPI version emitted by [`OpenApiBuilder`].
pub const OPENAPI_VERSION: &str = "3.1.0";

/// OpenAPI 3.1 document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenApi {
    /// OpenAPI version.
    pub openapi: String,
    /// API information.
    pub info: Info,
    /// Server list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,
    /// Path items, keyed by documented path.
    #[serde(default)]
    pub paths: BTreeMap<String, PathItem>,
    /// API tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

impl OpenApi {
    /// Serializes the document to compact JSON.
    pub fn to_json(&self) -> Result<String, SchemaError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes the document to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, SchemaError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Looks up the operation documented for `method` at `path`.
    #[must_use]
    pub fn operation(&self, path: &str, method: Method) -> Option<&Operation> {
        self.paths.get(path).and_then(|item| item.operation(method))
    }
}

/// API information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    /// API title.
    pub title: String,
    /// API version.
    pub version: String,
    /// API description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Server information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    /// Server URL.
    pub url: String,
    /// Server description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Server {
    /// Creates a server entry.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// API tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Tag name.
    pub name: String,
    /// Tag description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Link to external documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,
}

impl Tag {
    /// Creates a tag.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            external_docs: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// External documentation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalDocs {
    /// Target URL.
    pub url: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Path item (operations for a path).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    /// GET operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    /// POST operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    /// PUT operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    /// DELETE operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    /// PATCH operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    /// OPTIONS operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    /// HEAD operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
    /// TRACE operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<Operation>,
}

impl PathItem {
    fn slot(&mut self, method: Method) -> &mut Option<Operation> {
        match method {
            Method::Get => &mut self.get,
            Method::Post => &mut self.post,
            Method::Put => &mut self.put,
            Method::Delete => &mut self.delete,
            Method::Patch => &mut self.patch,
            Method::Options => &mut self.options,
            Method::Head => &mut self.head,
            Method::Trace => &mut self.trace,
        }
    }

    /// Returns the operation for `method`, if documented.
    #[must_use]
    pub fn operation(&self, method: Method) -> Option<&Operation> {
        match method {
            Method::Get => self.get.as_ref(),
            Method::Post => self.post.as_ref(),
            Method::Put => self.put.as_ref(),
            Method::Delete => self.delete.as_ref(),
            Method::Patch => self.patch.as_ref(),
            Method::Options => self.options.as_ref(),
            Method::Head => self.head.as_ref(),
            Method::Trace => self.trace.as_ref(),
        }
    }
}

/// API operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Operation ID.
    pub operation_id: String,
    /// Parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    /// Responses keyed by status code.
    pub responses: BTreeMap<String, Response>,
    /// Deprecated flag.
    #[serde(default, skip_serializing_if = "is_false")]
    pub deprecated: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Operation parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Parameter location.
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Required flag.
    #[serde(default)]
    pub required: bool,
    /// Parameter schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

/// Parameter location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// Path parameter.
    Path,
    /// Query parameter.
    Query,
    /// Header parameter.
    Header,
    /// Cookie parameter.
    Cookie,
}

/// Media type content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    /// Schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
    /// Example value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
}

/// Response definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Description.
    pub description: String,
    /// Content by media type.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub content: BTreeMap<String, MediaType>,
}

impl Response {
    fn json(description: impl Into<String>) -> Self {
        let mut content = BTreeMap::new();
        content.insert(
            "application/json".to_string(),
            MediaType {
                schema: Some(Schema::any()),
                example: None,
            },
        );
        Self {
            description: description.into(),
            content,
        }
    }
}

/// Map a path converter to the schema documented for the parameter.
#[must_use]
pub fn converter_to_schema(converter: Converter) -> Schema {
    match converter {
        Converter::Int => Schema::integer(None),
        Converter::Float => Schema::number(None),
        Converter::Uuid => Schema::string_format("uuid"),
        Converter::Path => Schema::string_format("path"),
        Converter::Str => Schema::string(),
    }
}

fn title_case(name: &str) -> String {
    name.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn param_to_parameter(param: &ParamInfo) -> Parameter {
    Parameter {
        name: param.name.clone(),
        location: ParameterLocation::Path,
        required: true,
        schema: Some(converter_to_schema(param.converter).with_title(title_case(&param.name))),
    }
}

/// OpenAPI document builder.
///
/// # Example
///
/// ```
/// use gantry_openapi::{OpenApiBuilder, Server, Tag};
/// use gantry_router::ApiRoute;
/// use gantry_types::Method;
///
/// let mut builder = OpenApiBuilder::new("Inventory", "2.0.0")
///     .description("Stock levels")
///     .server(Server::new("https://api.example.com"))
///     .tag(Tag::new("items"));
/// builder.add_route(&ApiRoute::new(Method::Get, "/items").name("list_items"))?;
///
/// let doc = builder.build();
/// assert!(doc.operation("/items", Method::Get).is_some());
/// # Ok::<(), gantry_openapi::SchemaError>(())
/// ```
#[derive(Debug)]
pub struct OpenApiBuilder {
    info: Info,
    servers: Vec<Server>,
    paths: BTreeMap<String, PathItem>,
    tags: Vec<Tag>,
    operation_ids: BTreeMap<String, String>,
}

impl OpenApiBuilder {
    /// Create a new builder.
    #[must_use]
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            info: Info {
                title: title.into(),
                version: version.into(),
                description: None,
            },
            servers: Vec::new(),
            paths: BTreeMap::new(),
            tags: Vec::new(),
            operation_ids: BTreeMap::new(),
        }
    }

    /// Add a description. An empty description is left out of the document.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.info.description = (!description.is_empty()).then_some(description);
        self
    }

    /// Add a server.
    #[must_use]
    pub fn server(mut self, server: Server) -> Self {
        self.servers.push(server);
        self
    }

    /// Add a tag.
    #[must_use]
    pub fn tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    /// Add a route to the document.
    ///
    /// Each of the route's methods becomes one operation under the route's
    /// path (with converter suffixes stripped). Routes excluded from the
    /// schema, and routes without methods, are skipped.
    ///
    /// # Errors
    ///
    /// [`SchemaError::InvalidPath`] if the path does not start with `/`.
    ///
    /// A method already documented for the path keeps its first operation;
    /// the later one is logged and dropped.
    pub fn add_route(&mut self, route: &dyn RouteDescriptor) -> Result<(), SchemaError> {
        if !route.include_in_schema() || route.methods().is_empty() {
            return Ok(());
        }
        let raw_path = route.path();
        if !raw_path.starts_with('/') {
            return Err(SchemaError::InvalidPath {
                path: raw_path.to_string(),
            });
        }

        let path = strip_converters(raw_path);
        let params = extract_path_params(raw_path);
        let default_meta = OperationMeta::default();
        let meta = route.operation().unwrap_or(&default_meta);

        for &method in route.methods() {
            if self
                .paths
                .get(&path)
                .is_some_and(|item| item.operation(method).is_some())
            {
                tracing::warn!(
                    %method,
                    path = %path,
                    route = ?route.name(),
                    "operation already documented; keeping the first"
                );
                continue;
            }

            let operation_id = meta
                .operation_id
                .clone()
                .unwrap_or_else(|| default_operation_id(route.name(), &path, method));
            self.check_operation_id(&operation_id, &path, method);

            let operation = Self::operation(meta, operation_id, &params);
            *self.paths.entry(path.clone()).or_default().slot(method) = Some(operation);
        }
        Ok(())
    }

    fn check_operation_id(&mut self, operation_id: &str, path: &str, method: Method) {
        let location = format!("{} {}", method, path);
        if let Some(previous) = self
            .operation_ids
            .insert(operation_id.to_string(), location.clone())
        {
            tracing::warn!(
                operation_id,
                first = %previous,
                duplicate = %location,
                "duplicate operation id"
            );
        }
    }

    fn operation(meta: &OperationMeta, operation_id: String, params: &[ParamInfo]) -> Operation {
        let mut responses = BTreeMap::new();
        responses.insert("200".to_string(), Response::json("Successful Response"));
        if !params.is_empty() {
            responses.insert("422".to_string(), Response::json("Validation Error"));
        }
        for (status, def) in &meta.responses {
            let content_type = def.content_type.as_deref().unwrap_or("application/json");
            let mut content = BTreeMap::new();
            content.insert(
                content_type.to_string(),
                MediaType {
                    schema: Some(Schema::any()),
                    example: def.example.clone(),
                },
            );
            responses.insert(
                status.to_string(),
                Response {
                    description: def.description.clone(),
                    content,
                },
            );
        }

        Operation {
            tags: meta.tags.clone(),
            summary: meta.summary.clone(),
            description: meta.description.clone(),
            operation_id,
            parameters: params.iter().map(param_to_parameter).collect(),
            responses,
            deprecated: meta.deprecated,
        }
    }

    /// Build the OpenAPI document.
    #[must_use]
    pub fn build(self) -> OpenApi {
        OpenApi {
            openapi: OPENAPI_VERSION.to_string(),
            info: self.info,
            servers: self.servers,
            paths: self.paths,
            tags: self.tags,
        }
    }
}
