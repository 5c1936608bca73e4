//! Route descriptors.
//!
//! A route descriptor is an opaque record for one addressable endpoint. The
//! registry stores descriptors in order and hands them, unchanged, to the
//! schema generator; it never matches or dispatches on them.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use gantry_types::Method;

/// A shared, type-erased route descriptor.
pub type SharedRoute = Arc<dyn RouteDescriptor>;

/// The contract every route descriptor satisfies.
///
/// Only [`path`](Self::path) is required. A descriptor with no methods (a
/// mount point, a websocket endpoint) is stored like any other route but is
/// never documented.
pub trait RouteDescriptor: fmt::Debug + Send + Sync {
    /// The path pattern the route carries internally.
    fn path(&self) -> &str;

    /// The methods served by this route.
    fn methods(&self) -> &[Method] {
        &[]
    }

    /// The route name (usually the endpoint function name).
    fn name(&self) -> Option<&str> {
        None
    }

    /// Whether the route appears in the generated schema.
    fn include_in_schema(&self) -> bool {
        true
    }

    /// Documentation metadata for the route's operations.
    fn operation(&self) -> Option<&OperationMeta> {
        None
    }
}

/// Conversion into a [`SharedRoute`].
///
/// Implemented for every concrete descriptor (which gets wrapped in an
/// [`Arc`]) and for [`SharedRoute`] itself (which is stored as-is, so the
/// same allocation can be registered in several places).
pub trait IntoRoute {
    /// Performs the conversion.
    fn into_route(self) -> SharedRoute;
}

impl<R: RouteDescriptor + 'static> IntoRoute for R {
    fn into_route(self) -> SharedRoute {
        Arc::new(self)
    }
}

impl IntoRoute for SharedRoute {
    fn into_route(self) -> SharedRoute {
        self
    }
}

/// Response definition for schema documentation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseDef {
    /// Human readable description of the response.
    pub description: String,
    /// Optional example response body.
    pub example: Option<serde_json::Value>,
    /// Content type for this response.
    pub content_type: Option<String>,
}

impl ResponseDef {
    /// Create a new response definition with a description.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            example: None,
            content_type: None,
        }
    }

    /// Set an example response body.
    #[must_use]
    pub fn with_example(mut self, example: serde_json::Value) -> Self {
        self.example = Some(example);
        self
    }

    /// Set the content type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Documentation metadata attached to a route.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationMeta {
    /// Explicit operation id. When unset, one is derived from the route.
    pub operation_id: Option<String>,
    /// Short summary.
    pub summary: Option<String>,
    /// Long description.
    pub description: Option<String>,
    /// Tags for grouping in documentation.
    pub tags: Vec<String>,
    /// Deprecated flag.
    pub deprecated: bool,
    /// Declared responses keyed by status code.
    pub responses: BTreeMap<u16, ResponseDef>,
}

/// Derives an operation id from a route's name, path and method.
///
/// Every non-alphanumeric character becomes `_`, and the lowercase method
/// is appended: `list_items` on `GET /items/{id}` yields
/// `list_items_items__id__get`.
#[must_use]
pub fn default_operation_id(name: Option<&str>, path: &str, method: Method) -> String {
    let raw = format!("{}{}", name.unwrap_or_default(), path);
    let mut id: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    id.push('_');
    id.push_str(method.as_lower_str());
    id
}

/// The default response rendering for a route or application.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseClass {
    /// JSON body (the default).
    #[default]
    Json,
    /// HTML body.
    Html,
    /// Plain text body.
    PlainText,
    /// Redirect response.
    Redirect,
    /// Streaming body.
    Stream,
    /// Any other response type, by name.
    Custom(String),
}

/// An endpoint descriptor: one path served by one or more methods.
///
/// # Example
///
/// ```
/// use gantry_router::{ApiRoute, RouteDescriptor};
/// use gantry_types::Method;
///
/// let route = ApiRoute::new(Method::Get, "/items/{id:int}")
///     .name("read_item")
///     .summary("Read one item")
///     .tag("items");
///
/// assert_eq!(route.path(), "/items/{id:int}");
/// assert_eq!(route.methods(), &[Method::Get]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRoute {
    path: String,
    methods: Vec<Method>,
    name: Option<String>,
    meta: OperationMeta,
    include_in_schema: bool,
    response_class: ResponseClass,
}

impl ApiRoute {
    /// Creates a route serving a single method.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self::with_methods([method], path)
    }

    /// Creates a route serving several methods. Duplicates are dropped.
    #[must_use]
    pub fn with_methods(methods: impl IntoIterator<Item = Method>, path: impl Into<String>) -> Self {
        let mut unique: Vec<Method> = Vec::new();
        for method in methods {
            if !unique.contains(&method) {
                unique.push(method);
            }
        }
        Self {
            path: path.into(),
            methods: unique,
            name: None,
            meta: OperationMeta::default(),
            include_in_schema: true,
            response_class: ResponseClass::default(),
        }
    }

    /// Sets the route name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets an explicit operation id.
    #[must_use]
    pub fn operation_id(mut self, id: impl Into<String>) -> Self {
        self.meta.operation_id = Some(id.into());
        self
    }

    /// Sets the summary.
    #[must_use]
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.meta.summary = Some(summary.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.meta.description = Some(description.into());
        self
    }

    /// Adds a tag.
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.meta.tags.push(tag.into());
        self
    }

    /// Adds several tags.
    #[must_use]
    pub fn tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.meta.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Marks the route as deprecated.
    #[must_use]
    pub fn deprecated(mut self, deprecated: bool) -> Self {
        self.meta.deprecated = deprecated;
        self
    }

    /// Sets whether the route is documented.
    #[must_use]
    pub fn include_in_schema(mut self, include: bool) -> Self {
        self.include_in_schema = include;
        self
    }

    /// Declares a response.
    #[must_use]
    pub fn response(mut self, status: u16, def: ResponseDef) -> Self {
        self.meta.responses.insert(status, def);
        self
    }

    /// Sets the response class.
    #[must_use]
    pub fn response_class(mut self, class: ResponseClass) -> Self {
        self.response_class = class;
        self
    }

    /// Returns the response class.
    #[must_use]
    pub fn get_response_class(&self) -> &ResponseClass {
        &self.response_class
    }

    /// Wraps the route in an [`Arc`].
    #[must_use]
    pub fn shared(self) -> SharedRoute {
        Arc::new(self)
    }
}

impl RouteDescriptor for ApiRoute {
    fn path(&self) -> &str {
        &self.path
    }

    fn methods(&self) -> &[Method] {
        &self.methods
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn include_in_schema(&self) -> bool {
        self.include_in_schema
    }

    fn operation(&self) -> Option<&OperationMeta> {
        Some(&self.meta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct BarePath(&'static str);

    impl RouteDescriptor for BarePath {
        fn path(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn bare_descriptor_uses_defaults() {
        let route = BarePath("/static");
        assert!(route.methods().is_empty());
        assert!(route.name().is_none());
        assert!(route.include_in_schema());
        assert!(route.operation().is_none());
    }

    #[test]
    fn with_methods_drops_duplicates() {
        let route = ApiRoute::with_methods([Method::Get, Method::Head, Method::Get], "/");
        assert_eq!(route.methods(), &[Method::Get, Method::Head]);
    }

    #[test]
    fn builder_populates_operation_meta() {
        let route = ApiRoute::new(Method::Post, "/items")
            .operation_id("create")
            .summary("Create")
            .description("Creates an item")
            .tags(["items", "write"])
            .deprecated(true)
            .response(201, ResponseDef::new("Created"));

        let meta = route.operation().unwrap();
        assert_eq!(meta.operation_id.as_deref(), Some("create"));
        assert_eq!(meta.summary.as_deref(), Some("Create"));
        assert_eq!(meta.tags, vec!["items", "write"]);
        assert!(meta.deprecated);
        assert_eq!(meta.responses[&201].description, "Created");
    }

    #[test]
    fn default_operation_id_replaces_non_word_chars() {
        assert_eq!(
            default_operation_id(Some("read_item"), "/items/{id}", Method::Get),
            "read_item_items__id__get"
        );
        assert_eq!(default_operation_id(None, "/", Method::Delete), "__delete");
    }

    #[test]
    fn into_route_keeps_shared_allocation() {
        let shared = ApiRoute::new(Method::Get, "/").shared();
        let again = Arc::clone(&shared).into_route();
        assert!(Arc::ptr_eq(&shared, &again));
    }

    #[test]
    fn response_def_builder() {
        let def = ResponseDef::new("Success")
            .with_example(serde_json::json!({"id": 1}))
            .with_content_type("application/json");

        assert_eq!(def.description, "Success");
        assert_eq!(def.example, Some(serde_json::json!({"id": 1})));
        assert_eq!(def.content_type.as_deref(), Some("application/json"));
    }
}
