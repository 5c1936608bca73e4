//! The application registry.
//!
//! [`App`] aggregates everything an application declares up front:
//! configuration, routes, middleware descriptors, exception handlers and
//! lifecycle hooks. It also owns the OpenAPI schema for those routes, which
//! is generated on first request and cached.
//!
//! The registry executes none of what it stores. Routing, dispatch,
//! middleware execution and dependency resolution belong to collaborators
//! that read the registry.
//!
//! # Example
//!
//! ```
//! use gantry_core::{App, AppConfig};
//! use gantry_router::{APIRouter, ApiRoute, IncludeOptions};
//! use gantry_types::Method;
//!
//! let mut app = App::new(AppConfig::new().title("Inventory").version("1.2.0"));
//! app.add_route("/health", ApiRoute::new(Method::Get, "/health").name("health"));
//!
//! let items = APIRouter::new()
//!     .prefix("/items")
//!     .get("", "list_items")
//!     .get("/{id:int}", "read_item");
//! app.include_router(&items, IncludeOptions::default());
//!
//! let schema = app.openapi()?;
//! assert_eq!(schema.info.title, "Inventory");
//! assert!(schema.paths.contains_key("/items/{id}"));
//! # Ok::<(), gantry_openapi::SchemaError>(())
//! ```

use std::fmt;
use std::sync::Arc;

use gantry_openapi::{OpenApi, OpenApiGenerator, SchemaError, SchemaGenerator, SchemaInput, Server, Tag};
use gantry_router::{Dependency, IncludeOptions, IntoRoute, RouteCollection, SharedRoute};
use parking_lot::Mutex;
use serde_json::Value;

use crate::config::{AppConfig, SchemaCachePolicy};
use crate::docs;
use crate::error::{AppError, HookError};
use crate::exception::{ErrorClass, ErrorResponse, ExceptionHandlers};
use crate::hooks::{self, LifecycleHook};
use crate::middleware::{Middleware, MiddlewareOptions};

// ============================================================================
// Schema overrides
// ============================================================================

/// Per-call replacements for the registry's own schema inputs.
///
/// An unset field, an empty string, or an empty list falls back to the value
/// stored in the registry.
#[derive(Debug, Clone, Default)]
pub struct SchemaOverrides {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement version.
    pub version: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement routes.
    pub routes: Option<Vec<SharedRoute>>,
    /// Replacement tags.
    pub tags: Option<Vec<Tag>>,
    /// Replacement servers.
    pub servers: Option<Vec<Server>>,
}

impl SchemaOverrides {
    /// No overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Overrides the version.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Overrides the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Overrides the routes.
    #[must_use]
    pub fn routes(mut self, routes: Vec<SharedRoute>) -> Self {
        self.routes = Some(routes);
        self
    }

    /// Overrides the tags.
    #[must_use]
    pub fn tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Overrides the servers.
    #[must_use]
    pub fn servers(mut self, servers: Vec<Server>) -> Self {
        self.servers = Some(servers);
        self
    }

    /// Returns true if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.version.is_none()
            && self.description.is_none()
            && self.routes.is_none()
            && self.tags.is_none()
            && self.servers.is_none()
    }
}

fn pick_str<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => fallback,
    }
}

fn pick_slice<'a, T>(value: Option<&'a [T]>, fallback: &'a [T]) -> &'a [T] {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => fallback,
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for constructing an [`App`] with initial contents.
///
/// # Example
///
/// ```
/// use gantry_core::{App, AppConfig, LifecycleHook};
/// use gantry_core::middleware::GZip;
/// use gantry_router::ApiRoute;
/// use gantry_types::Method;
///
/// let app = App::builder()
///     .config(AppConfig::new().title("My API"))
///     .route(ApiRoute::new(Method::Get, "/").name("index"))
///     .middleware(GZip::new())
///     .on_startup(LifecycleHook::new("warm_cache", || Ok(())))
///     .build();
///
/// assert_eq!(app.routes().len(), 1);
/// assert_eq!(app.middleware().len(), 1);
/// assert_eq!(app.startup_hooks().len(), 1);
/// ```
#[derive(Default)]
pub struct AppBuilder {
    config: AppConfig,
    routes: Vec<SharedRoute>,
    middleware: Vec<Middleware>,
    exception_handlers: ExceptionHandlers,
    on_startup: Vec<LifecycleHook>,
    on_shutdown: Vec<LifecycleHook>,
    generator: Option<Arc<dyn SchemaGenerator>>,
}

impl AppBuilder {
    /// Creates a new application builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the application configuration.
    ///
    /// Dependencies added earlier through [`dependency`](Self::dependency)
    /// are kept.
    #[must_use]
    pub fn config(mut self, config: AppConfig) -> Self {
        let earlier = std::mem::take(&mut self.config.dependencies);
        self.config = config;
        self.config.dependencies.extend(earlier);
        self
    }

    /// Adds an initial route.
    #[must_use]
    pub fn route(mut self, route: impl IntoRoute) -> Self {
        self.routes.push(route.into_route());
        self
    }

    /// Adds several initial routes, in order.
    #[must_use]
    pub fn routes<I>(mut self, routes: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoRoute,
    {
        self.routes.extend(routes.into_iter().map(IntoRoute::into_route));
        self
    }

    /// Adds initial middleware.
    #[must_use]
    pub fn middleware(mut self, middleware: impl Into<Middleware>) -> Self {
        self.middleware.push(middleware.into());
        self
    }

    /// Merges a set of exception handlers. Later registrations win.
    #[must_use]
    pub fn exception_handlers(mut self, handlers: ExceptionHandlers) -> Self {
        self.exception_handlers.merge(handlers);
        self
    }

    /// Adds a startup hook.
    #[must_use]
    pub fn on_startup(mut self, hook: LifecycleHook) -> Self {
        self.on_startup.push(hook);
        self
    }

    /// Adds a shutdown hook.
    #[must_use]
    pub fn on_shutdown(mut self, hook: LifecycleHook) -> Self {
        self.on_shutdown.push(hook);
        self
    }

    /// Adds an application-wide dependency.
    #[must_use]
    pub fn dependency(mut self, dependency: Dependency) -> Self {
        self.config.dependencies.push(dependency);
        self
    }

    /// Replaces the schema generator.
    #[must_use]
    pub fn generator(mut self, generator: impl SchemaGenerator + 'static) -> Self {
        self.generator = Some(Arc::new(generator));
        self
    }

    /// Builds the application.
    #[must_use]
    pub fn build(self) -> App {
        tracing::debug!(
            title = %self.config.title,
            routes = self.routes.len(),
            middleware = self.middleware.len(),
            exception_handlers = self.exception_handlers.len(),
            "application registry created"
        );
        App {
            config: self.config,
            routes: self.routes,
            middleware: self.middleware,
            exception_handlers: self.exception_handlers,
            on_startup: self.on_startup,
            on_shutdown: self.on_shutdown,
            generator: self
                .generator
                .unwrap_or_else(|| Arc::new(OpenApiGenerator)),
            openapi_schema: Mutex::new(None),
        }
    }
}

impl fmt::Debug for AppBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppBuilder")
            .field("config", &self.config)
            .field("routes", &self.routes.len())
            .field("middleware", &self.middleware.len())
            .field("exception_handlers", &self.exception_handlers)
            .field("on_startup", &self.on_startup.len())
            .field("on_shutdown", &self.on_shutdown.len())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// App
// ============================================================================

/// The application registry.
///
/// Collections are mutated through `&mut self` while the application is
/// being set up. Afterwards the registry can be shared across threads; the
/// schema cache is the only state written through `&self`.
pub struct App {
    config: AppConfig,
    routes: Vec<SharedRoute>,
    middleware: Vec<Middleware>,
    exception_handlers: ExceptionHandlers,
    on_startup: Vec<LifecycleHook>,
    on_shutdown: Vec<LifecycleHook>,
    generator: Arc<dyn SchemaGenerator>,
    openapi_schema: Mutex<Option<Arc<OpenApi>>>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl App {
    /// Creates an empty registry with `config`.
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        AppBuilder::new().config(config).build()
    }

    /// Creates a new application builder.
    #[must_use]
    pub fn builder() -> AppBuilder {
        AppBuilder::new()
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the application configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the routes, in registration order.
    #[must_use]
    pub fn routes(&self) -> &[SharedRoute] {
        &self.routes
    }

    /// Returns the middleware descriptors, in registration order.
    #[must_use]
    pub fn middleware(&self) -> &[Middleware] {
        &self.middleware
    }

    /// Returns the exception handlers.
    #[must_use]
    pub fn exception_handlers(&self) -> &ExceptionHandlers {
        &self.exception_handlers
    }

    /// Returns the startup hooks, in registration order.
    #[must_use]
    pub fn startup_hooks(&self) -> &[LifecycleHook] {
        &self.on_startup
    }

    /// Returns the shutdown hooks, in registration order.
    #[must_use]
    pub fn shutdown_hooks(&self) -> &[LifecycleHook] {
        &self.on_shutdown
    }

    /// Returns the application-wide dependencies.
    #[must_use]
    pub fn dependencies(&self) -> &[Dependency] {
        &self.config.dependencies
    }

    /// Returns the cached schema without generating one.
    #[must_use]
    pub fn cached_schema(&self) -> Option<Arc<OpenApi>> {
        self.openapi_schema.lock().clone()
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Appends middleware of handler type `T` with `options`.
    pub fn add_middleware<T: ?Sized + 'static>(&mut self, options: MiddlewareOptions) {
        self.push_middleware(Middleware::new::<T>(options));
    }

    /// Appends a middleware descriptor.
    pub fn push_middleware(&mut self, middleware: impl Into<Middleware>) {
        let middleware = middleware.into();
        tracing::debug!(handler = %middleware.handler, "middleware added");
        self.middleware.push(middleware);
        self.mutated();
    }

    /// Appends `route`.
    ///
    /// The route carries its own path; `path` is only compared against it,
    /// and a mismatch is logged.
    pub fn add_route(&mut self, path: &str, route: impl IntoRoute) {
        let route = route.into_route();
        if path != route.path() {
            tracing::warn!(
                path,
                route_path = route.path(),
                "add_route path differs from the route's own path; the route's path is used"
            );
        }
        tracing::debug!(path = route.path(), methods = ?route.methods(), "route added");
        self.routes.push(route);
        self.mutated();
    }

    /// Appends every route of `router`, in the router's order.
    ///
    /// `options` are accepted but not applied to the merged routes: no
    /// prefix, tag, dependency or response is added to them.
    pub fn include_router<R>(&mut self, router: &R, options: IncludeOptions)
    where
        R: RouteCollection + ?Sized,
    {
        if !options.is_inert() {
            tracing::warn!(
                prefix = %options.prefix,
                tags = ?options.tags,
                "include_router options are not applied to merged routes"
            );
        }
        let routes = router.routes();
        self.routes.extend(routes.iter().cloned());
        tracing::debug!(count = routes.len(), total = self.routes.len(), "router included");
        self.mutated();
    }

    /// Registers an exception handler, replacing any handler for `class`.
    pub fn add_exception_handler<F>(&mut self, class: ErrorClass, handler: F)
    where
        F: Fn(&(dyn std::error::Error + 'static)) -> ErrorResponse + Send + Sync + 'static,
    {
        self.exception_handlers.register(class, handler);
    }

    /// Appends a startup hook.
    pub fn on_startup(&mut self, hook: LifecycleHook) {
        tracing::debug!(hook = hook.name(), "startup hook registered");
        self.on_startup.push(hook);
    }

    /// Appends a shutdown hook.
    pub fn on_shutdown(&mut self, hook: LifecycleHook) {
        tracing::debug!(hook = hook.name(), "shutdown hook registered");
        self.on_shutdown.push(hook);
    }

    fn mutated(&mut self) {
        if self.config.schema_cache == SchemaCachePolicy::InvalidateOnMutation
            && self.openapi_schema.get_mut().take().is_some()
        {
            tracing::debug!("cached schema discarded");
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Runs the startup hooks in registration order.
    ///
    /// # Errors
    ///
    /// [`AppError::Hook`] with the first failure. Later hooks do not run.
    pub fn run_startup_hooks(&self) -> Result<(), AppError> {
        hooks::run_until_failure(&self.on_startup)?;
        Ok(())
    }

    /// Runs every shutdown hook in registration order and returns the
    /// failures.
    pub fn run_shutdown_hooks(&self) -> Vec<HookError> {
        hooks::run_all(&self.on_shutdown)
    }

    // ------------------------------------------------------------------
    // Schema
    // ------------------------------------------------------------------

    /// Returns the schema, generating it with `overrides` if none is cached.
    ///
    /// A cached schema is returned as-is and `overrides` are ignored.
    ///
    /// # Errors
    ///
    /// Whatever the generator returns. The cache stays empty on failure.
    pub fn compute_schema(&self, overrides: SchemaOverrides) -> Result<Arc<OpenApi>, SchemaError> {
        let mut slot = self.openapi_schema.lock();
        if let Some(schema) = slot.as_ref() {
            if !overrides.is_empty() {
                tracing::warn!("schema already generated; overrides ignored");
            }
            return Ok(Arc::clone(schema));
        }

        let input = SchemaInput {
            title: pick_str(overrides.title.as_deref(), &self.config.title),
            version: pick_str(overrides.version.as_deref(), &self.config.version),
            description: pick_str(overrides.description.as_deref(), &self.config.description),
            routes: pick_slice(overrides.routes.as_deref(), self.routes.as_slice()),
            tags: pick_slice(overrides.tags.as_deref(), self.config.openapi_tags.as_slice()),
            servers: pick_slice(overrides.servers.as_deref(), self.config.servers.as_slice()),
        };
        if self.config.debug {
            tracing::debug!(
                title = input.title,
                version = input.version,
                routes = input.routes.len(),
                tags = input.tags.len(),
                servers = input.servers.len(),
                "generating schema"
            );
        }

        let schema = Arc::new(self.generator.generate(input)?);
        tracing::info!(
            title = %schema.info.title,
            paths = schema.paths.len(),
            "OpenAPI schema generated"
        );
        *slot = Some(Arc::clone(&schema));
        Ok(schema)
    }

    /// Returns the cached schema, generating it from the registry's own
    /// state on first use.
    ///
    /// # Errors
    ///
    /// Whatever the generator returns.
    pub fn openapi(&self) -> Result<Arc<OpenApi>, SchemaError> {
        self.compute_schema(SchemaOverrides::default())
    }

    /// Serializes the schema to JSON.
    ///
    /// # Errors
    ///
    /// Generator or serialization failures.
    pub fn openapi_json(&self) -> Result<String, SchemaError> {
        self.openapi()?.to_json()
    }

    // ------------------------------------------------------------------
    // Documentation pages
    // ------------------------------------------------------------------

    /// Renders the Swagger UI page, or `None` if it or the schema is disabled.
    #[must_use]
    pub fn docs_html(&self) -> Option<String> {
        let openapi_url = self.config.openapi_path()?;
        self.config.docs_url.as_ref()?;
        let redirect = self
            .config
            .swagger_ui_oauth2_redirect_url
            .as_deref()
            .map(|url| format!("{}{}", self.config.openapi_prefix, url));
        Some(docs::swagger_ui_html(
            &openapi_url,
            &format!("{} - Swagger UI", self.config.title),
            redirect.as_deref(),
            self.config.swagger_ui_init_oauth.as_ref(),
        ))
    }

    /// Renders the ReDoc page, or `None` if it or the schema is disabled.
    #[must_use]
    pub fn redoc_html(&self) -> Option<String> {
        let openapi_url = self.config.openapi_path()?;
        self.config.redoc_url.as_ref()?;
        Some(docs::redoc_html(
            &openapi_url,
            &format!("{} - ReDoc", self.config.title),
        ))
    }

    /// The OAuth2 redirect page, when Swagger UI and its redirect URL are
    /// both enabled.
    #[must_use]
    pub fn oauth2_redirect_html(&self) -> Option<&'static str> {
        self.config.openapi_url.as_ref()?;
        self.config.docs_url.as_ref()?;
        self.config.swagger_ui_oauth2_redirect_url.as_ref()?;
        Some(docs::oauth2_redirect_html())
    }

    // ------------------------------------------------------------------
    // Extension points
    // ------------------------------------------------------------------

    /// Mounts a sub-application under `path`.
    ///
    /// # Errors
    ///
    /// Always [`AppError::Unsupported`].
    pub fn mount<A>(&mut self, path: &str, _app: A, name: Option<&str>) -> Result<(), AppError>
    where
        A: Send + Sync + 'static,
    {
        tracing::debug!(path, name, "mount requested");
        Err(AppError::Unsupported { operation: "mount" })
    }

    /// Serves the application on `host:port`.
    ///
    /// # Errors
    ///
    /// Always [`AppError::Unsupported`].
    pub fn host(
        &mut self,
        host: &str,
        port: u16,
        options: serde_json::Map<String, Value>,
    ) -> Result<(), AppError> {
        tracing::debug!(host, port, options = options.len(), "host requested");
        Err(AppError::Unsupported { operation: "host" })
    }

    /// Registers the built-in documentation routes.
    ///
    /// # Errors
    ///
    /// Always [`AppError::Unsupported`]; use [`docs_html`](Self::docs_html)
    /// and [`openapi_json`](Self::openapi_json) directly.
    pub fn setup(&mut self) -> Result<(), AppError> {
        Err(AppError::Unsupported { operation: "setup" })
    }
}

impl RouteCollection for App {
    fn routes(&self) -> &[SharedRoute] {
        &self.routes
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("config", &self.config)
            .field("routes", &self.routes.len())
            .field("middleware", &self.middleware)
            .field("exception_handlers", &self.exception_handlers)
            .field("on_startup", &self.on_startup)
            .field("on_shutdown", &self.on_shutdown)
            .field("schema_cached", &self.openapi_schema.lock().is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantry_router::{APIRouter, ApiRoute};
    use gantry_types::Method;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn get(path: &str) -> ApiRoute {
        ApiRoute::new(Method::Get, path)
    }

    #[test]
    fn app_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<App>();
    }

    #[test]
    fn empty_registry() {
        let app = App::default();
        assert!(app.routes().is_empty());
        assert!(app.middleware().is_empty());
        assert!(app.exception_handlers().is_empty());
        assert!(app.startup_hooks().is_empty());
        assert!(app.cached_schema().is_none());
    }

    #[test]
    fn add_route_keeps_the_route_path() {
        let mut app = App::default();
        app.add_route("/ignored", get("/items"));
        assert_eq!(app.routes()[0].path(), "/items");
    }

    #[test]
    fn include_router_ignores_options() {
        let router = APIRouter::new().get("/a", "a").post("/b", "b");
        let mut app = App::default();
        app.add_route("/", get("/"));
        app.include_router(
            &router,
            IncludeOptions::new().prefix("/v1").tags(["ignored"]),
        );

        let paths: Vec<&str> = app.routes().iter().map(|r| r.path()).collect();
        assert_eq!(paths, ["/", "/a", "/b"]);
        assert!(Arc::ptr_eq(&app.routes()[1], &router.routes()[0]));
    }

    #[test]
    fn one_app_can_include_another() {
        let mut inner = App::default();
        inner.add_route("/inner", get("/inner"));
        let mut outer = App::default();
        outer.include_router(&inner, IncludeOptions::default());
        assert_eq!(outer.routes()[0].path(), "/inner");
    }

    #[test]
    fn overrides_fall_back_when_empty() {
        let app = App::new(AppConfig::new().title("Stored").version("9"));
        let schema = app
            .compute_schema(SchemaOverrides::new().title("").version("1.0").routes(Vec::new()))
            .unwrap();
        assert_eq!(schema.info.title, "Stored");
        assert_eq!(schema.info.version, "1.0");
    }

    #[test]
    fn generator_runs_once_while_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let app = App::builder()
            .generator(move |input: SchemaInput<'_>| {
                counter.fetch_add(1, Ordering::SeqCst);
                OpenApiGenerator.generate(input)
            })
            .build();

        let first = app.openapi().unwrap();
        let second = app.openapi().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn invalidating_policy_regenerates_after_mutation() {
        let mut app = App::new(AppConfig::new().schema_cache(SchemaCachePolicy::InvalidateOnMutation));
        let first = app.openapi().unwrap();
        assert!(first.paths.is_empty());

        app.add_route("/items", get("/items"));
        assert!(app.cached_schema().is_none());
        let second = app.openapi().unwrap();
        assert!(second.paths.contains_key("/items"));

        app.add_middleware::<String>(MiddlewareOptions::new());
        assert!(app.cached_schema().is_none());
    }

    #[test]
    fn builder_config_keeps_earlier_dependencies() {
        let app = App::builder()
            .dependency(Dependency::new("db"))
            .config(AppConfig::new().dependency(Dependency::new("auth")))
            .build();
        let names: Vec<&str> = app.dependencies().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["auth", "db"]);
    }

    #[test]
    fn docs_pages_follow_config() {
        let app = App::new(AppConfig::new().title("Shop").openapi_prefix("/api"));
        let docs = app.docs_html().unwrap();
        assert!(docs.contains("<title>Shop - Swagger UI</title>"));
        assert!(docs.contains(r#"url: "/api/openapi.json""#));
        assert!(docs.contains(r#""/api/docs/oauth2-redirect""#));
        assert!(app.redoc_html().unwrap().contains(r#"spec-url="/api/openapi.json""#));
        assert!(app.oauth2_redirect_html().is_some());

        let no_docs = App::new(AppConfig::new().without_docs());
        assert!(no_docs.docs_html().is_none());
        assert!(no_docs.oauth2_redirect_html().is_none());
        assert!(no_docs.redoc_html().is_some());

        let no_schema = App::new(AppConfig::new().without_openapi());
        assert!(no_schema.docs_html().is_none());
        assert!(no_schema.redoc_html().is_none());
    }

    #[test]
    fn openapi_json_serializes_the_cached_schema() {
        let mut app = App::new(AppConfig::new().title("Shop"));
        app.add_route("/items", get("/items").name("list_items"));
        let json: Value = serde_json::from_str(&app.openapi_json().unwrap()).unwrap();
        assert_eq!(json["info"]["title"], "Shop");
        assert_eq!(
            json["paths"]["/items"]["get"]["operationId"],
            "list_items_items_get"
        );
    }

    #[test]
    fn extension_points_are_unsupported() {
        let mut app = App::default();
        assert!(matches!(
            app.mount("/static", App::default(), Some("static")),
            Err(AppError::Unsupported { operation: "mount" })
        ));
        assert!(matches!(
            app.host("127.0.0.1", 8000, serde_json::Map::new()),
            Err(AppError::Unsupported { operation: "host" })
        ));
        assert!(matches!(
            app.setup(),
            Err(AppError::Unsupported { operation: "setup" })
        ));
        assert!(app.routes().is_empty());
    }
}
