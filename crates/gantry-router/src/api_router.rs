//! APIRouter for modular route organization.
//!
//! An [`APIRouter`] is an ordered collection of route descriptors. Routes
//! added through its method helpers (`get`, `post`, ...) pick up the
//! router's prefix, tags and responses at the time they are added, so a
//! router's routes always carry their final paths.
//!
//! # Example
//!
//! ```
//! use gantry_router::{APIRouter, RouteCollection};
//!
//! let router = APIRouter::new()
//!     .prefix("/users")
//!     .tags(vec!["users"])
//!     .get("", "list_users")
//!     .post("", "create_user")
//!     .get("/{id:int}", "read_user");
//!
//! let paths: Vec<_> = router.routes().iter().map(|r| r.path().to_string()).collect();
//! assert_eq!(paths, ["/users", "/users", "/users/{id:int}"]);
//! ```

use std::collections::BTreeMap;

use gantry_types::Method;

use crate::depends::Dependency;
use crate::params::combine_paths;
use crate::route::{ApiRoute, IntoRoute, ResponseClass, ResponseDef, SharedRoute};

/// Anything exposing an ordered sequence of route descriptors.
pub trait RouteCollection {
    /// The routes, in registration order.
    fn routes(&self) -> &[SharedRoute];
}

impl RouteCollection for Vec<SharedRoute> {
    fn routes(&self) -> &[SharedRoute] {
        self
    }
}

impl RouteCollection for [SharedRoute] {
    fn routes(&self) -> &[SharedRoute] {
        self
    }
}

/// Router for grouping related routes with shared configuration.
#[derive(Debug)]
pub struct APIRouter {
    /// URL prefix applied to routes added through the method helpers.
    prefix: String,
    /// Tags applied to routes added through the method helpers.
    tags: Vec<String>,
    /// Dependencies declared for this router.
    dependencies: Vec<Dependency>,
    /// Shared response definitions.
    responses: BTreeMap<u16, ResponseDef>,
    deprecated: bool,
    include_in_schema: bool,
    routes: Vec<SharedRoute>,
}

impl Default for APIRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl APIRouter {
    /// Creates a new empty router.
    #[must_use]
    pub fn new() -> Self {
        Self {
            prefix: String::new(),
            tags: Vec::new(),
            dependencies: Vec::new(),
            responses: BTreeMap::new(),
            deprecated: false,
            include_in_schema: true,
            routes: Vec::new(),
        }
    }

    /// Creates a new router with the given prefix.
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::new().prefix(prefix)
    }

    /// Sets the URL prefix for routes added afterwards.
    ///
    /// A leading slash is added and a trailing slash removed.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        let p = prefix.into();
        if !p.is_empty() && !p.starts_with('/') {
            self.prefix = format!("/{}", p);
        } else {
            self.prefix = p;
        }
        if self.prefix.ends_with('/') && self.prefix.len() > 1 {
            self.prefix.pop();
        }
        self
    }

    /// Sets the default tags.
    #[must_use]
    pub fn tags(mut self, tags: Vec<impl Into<String>>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a single tag to the default tags.
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Declares a router-level dependency.
    #[must_use]
    pub fn dependency(mut self, dep: Dependency) -> Self {
        self.dependencies.push(dep);
        self
    }

    /// Adds a response definition applied to helper-built routes.
    #[must_use]
    pub fn response(mut self, status_code: u16, def: ResponseDef) -> Self {
        self.responses.insert(status_code, def);
        self
    }

    /// Marks helper-built routes as deprecated.
    #[must_use]
    pub fn deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    /// Sets whether helper-built routes are documented.
    #[must_use]
    pub fn include_in_schema(mut self, include: bool) -> Self {
        self.include_in_schema = include;
        self
    }

    /// Appends a route descriptor as-is.
    ///
    /// The router's prefix and tags are not applied: the descriptor already
    /// carries its own path.
    #[must_use]
    pub fn route(mut self, route: impl IntoRoute) -> Self {
        self.add_route(route);
        self
    }

    /// Appends a route descriptor as-is (mutable reference version).
    pub fn add_route(&mut self, route: impl IntoRoute) {
        self.routes.push(route.into_route());
    }

    /// Adds an endpoint named `name` serving `method` at `prefix + path`.
    #[must_use]
    pub fn api_route(mut self, method: Method, path: &str, name: impl Into<String>) -> Self {
        let mut route = ApiRoute::new(method, combine_paths(&self.prefix, path))
            .name(name)
            .tags(self.tags.iter().cloned())
            .deprecated(self.deprecated)
            .include_in_schema(self.include_in_schema);
        for (status, def) in &self.responses {
            route = route.response(*status, def.clone());
        }
        self.routes.push(route.shared());
        self
    }

    /// Adds a GET endpoint.
    #[must_use]
    pub fn get(self, path: &str, name: impl Into<String>) -> Self {
        self.api_route(Method::Get, path, name)
    }

    /// Adds a POST endpoint.
    #[must_use]
    pub fn post(self, path: &str, name: impl Into<String>) -> Self {
        self.api_route(Method::Post, path, name)
    }

    /// Adds a PUT endpoint.
    #[must_use]
    pub fn put(self, path: &str, name: impl Into<String>) -> Self {
        self.api_route(Method::Put, path, name)
    }

    /// Adds a DELETE endpoint.
    #[must_use]
    pub fn delete(self, path: &str, name: impl Into<String>) -> Self {
        self.api_route(Method::Delete, path, name)
    }

    /// Adds a PATCH endpoint.
    #[must_use]
    pub fn patch(self, path: &str, name: impl Into<String>) -> Self {
        self.api_route(Method::Patch, path, name)
    }

    /// Returns the prefix for this router.
    #[must_use]
    pub fn get_prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the tags for this router.
    #[must_use]
    pub fn get_tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the dependencies for this router.
    #[must_use]
    pub fn get_dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// Returns the number of routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if the router holds no routes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl RouteCollection for APIRouter {
    fn routes(&self) -> &[SharedRoute] {
        &self.routes
    }
}

/// Options accepted when including a router into an application.
///
/// The registry records these but does not apply them to the merged routes.
/// [`is_inert`](Self::is_inert) reports whether anything was set, so the
/// caller can be told that it was ignored.
#[derive(Debug, Clone)]
pub struct IncludeOptions {
    /// Path prefix.
    pub prefix: String,
    /// Tags.
    pub tags: Vec<String>,
    /// Dependencies.
    pub dependencies: Vec<Dependency>,
    /// Additional responses.
    pub responses: BTreeMap<u16, ResponseDef>,
    /// Default response class.
    pub default_response_class: Option<ResponseClass>,
    /// Callback routes.
    pub callbacks: Vec<SharedRoute>,
    /// Whether the routes are documented.
    pub include_in_schema: bool,
}

impl Default for IncludeOptions {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            tags: Vec::new(),
            dependencies: Vec::new(),
            responses: BTreeMap::new(),
            default_response_class: None,
            callbacks: Vec::new(),
            include_in_schema: true,
        }
    }
}

impl IncludeOptions {
    /// Creates the default (inert) options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the prefix.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a dependency.
    #[must_use]
    pub fn dependency(mut self, dep: Dependency) -> Self {
        self.dependencies.push(dep);
        self
    }

    /// Adds a response definition.
    #[must_use]
    pub fn response(mut self, status: u16, def: ResponseDef) -> Self {
        self.responses.insert(status, def);
        self
    }

    /// Sets the default response class.
    #[must_use]
    pub fn default_response_class(mut self, class: ResponseClass) -> Self {
        self.default_response_class = Some(class);
        self
    }

    /// Adds a callback route.
    #[must_use]
    pub fn callback(mut self, route: impl IntoRoute) -> Self {
        self.callbacks.push(route.into_route());
        self
    }

    /// Sets whether the routes are documented.
    #[must_use]
    pub fn include_in_schema(mut self, include: bool) -> Self {
        self.include_in_schema = include;
        self
    }

    /// Returns true when no option differs from its default.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.prefix.is_empty()
            && self.tags.is_empty()
            && self.dependencies.is_empty()
            && self.responses.is_empty()
            && self.default_response_class.is_none()
            && self.callbacks.is_empty()
            && self.include_in_schema
    }
}
