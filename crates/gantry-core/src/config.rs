//! Application configuration.

use gantry_openapi::{Server, Tag};
use gantry_router::{Dependency, ResponseClass};
use serde::Deserialize;
use serde_json::Value;

use crate::error::AppError;

/// When a generated schema stops being served from the cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaCachePolicy {
    /// Once generated, the schema is kept for the life of the registry.
    #[default]
    Sticky,
    /// Adding routes, routers or middleware discards the cached schema.
    InvalidateOnMutation,
}

/// Application configuration.
///
/// Loadable from JSON; missing keys take their defaults, and a `null` URL
/// disables the corresponding page.
///
/// ```
/// use gantry_core::AppConfig;
///
/// let config = AppConfig::from_json_str(r#"{"title": "Shop", "docs_url": null}"#)?;
/// assert_eq!(config.title, "Shop");
/// assert_eq!(config.version, "0.1.0");
/// assert!(config.docs_url.is_none());
/// # Ok::<(), gantry_core::AppError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Enable debug mode.
    pub debug: bool,
    /// API title.
    pub title: String,
    /// API description.
    pub description: String,
    /// API version.
    pub version: String,
    /// Where the schema is served. `None` disables the schema and both
    /// documentation pages.
    pub openapi_url: Option<String>,
    /// Tag metadata for the schema.
    pub openapi_tags: Vec<Tag>,
    /// Servers listed in the schema.
    pub servers: Vec<Server>,
    /// Where Swagger UI is served. `None` disables it.
    pub docs_url: Option<String>,
    /// Where ReDoc is served. `None` disables it.
    pub redoc_url: Option<String>,
    /// Swagger UI's OAuth2 redirect page.
    pub swagger_ui_oauth2_redirect_url: Option<String>,
    /// Settings passed to Swagger UI's `initOAuth`.
    pub swagger_ui_init_oauth: Option<Value>,
    /// Response class used by routes that do not set one.
    pub default_response_class: ResponseClass,
    /// Application-wide dependencies.
    pub dependencies: Vec<Dependency>,
    /// Prefix prepended to `openapi_url` when the app sits behind a proxy.
    pub openapi_prefix: String,
    /// Schema cache behavior.
    pub schema_cache: SchemaCachePolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            debug: false,
            title: String::from("FastAPI"),
            description: String::new(),
            version: String::from("0.1.0"),
            openapi_url: Some(String::from("/openapi.json")),
            openapi_tags: Vec::new(),
            servers: Vec::new(),
            docs_url: Some(String::from("/docs")),
            redoc_url: Some(String::from("/redoc")),
            swagger_ui_oauth2_redirect_url: Some(String::from("/docs/oauth2-redirect")),
            swagger_ui_init_oauth: None,
            default_response_class: ResponseClass::Json,
            dependencies: Vec::new(),
            openapi_prefix: String::new(),
            schema_cache: SchemaCachePolicy::Sticky,
        }
    }
}

impl AppConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// [`AppError::Config`] if the input is not valid JSON or a value has
    /// the wrong type.
    pub fn from_json_str(json: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Enables or disables debug mode.
    #[must_use]
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Sets the API title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the API description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Sets where the schema is served.
    #[must_use]
    pub fn openapi_url(mut self, url: impl Into<String>) -> Self {
        self.openapi_url = Some(url.into());
        self
    }

    /// Disables the schema endpoint and the documentation pages.
    #[must_use]
    pub fn without_openapi(mut self) -> Self {
        self.openapi_url = None;
        self
    }

    /// Adds tag metadata.
    #[must_use]
    pub fn openapi_tag(mut self, tag: Tag) -> Self {
        self.openapi_tags.push(tag);
        self
    }

    /// Adds a server.
    #[must_use]
    pub fn server(mut self, server: Server) -> Self {
        self.servers.push(server);
        self
    }

    /// Sets where Swagger UI is served.
    #[must_use]
    pub fn docs_url(mut self, url: impl Into<String>) -> Self {
        self.docs_url = Some(url.into());
        self
    }

    /// Disables Swagger UI.
    #[must_use]
    pub fn without_docs(mut self) -> Self {
        self.docs_url = None;
        self
    }

    /// Sets where ReDoc is served.
    #[must_use]
    pub fn redoc_url(mut self, url: impl Into<String>) -> Self {
        self.redoc_url = Some(url.into());
        self
    }

    /// Disables ReDoc.
    #[must_use]
    pub fn without_redoc(mut self) -> Self {
        self.redoc_url = None;
        self
    }

    /// Sets Swagger UI's OAuth2 redirect page.
    #[must_use]
    pub fn swagger_ui_oauth2_redirect_url(mut self, url: impl Into<String>) -> Self {
        self.swagger_ui_oauth2_redirect_url = Some(url.into());
        self
    }

    /// Sets Swagger UI's `initOAuth` settings.
    #[must_use]
    pub fn swagger_ui_init_oauth(mut self, settings: Value) -> Self {
        self.swagger_ui_init_oauth = Some(settings);
        self
    }

    /// Sets the default response class.
    #[must_use]
    pub fn default_response_class(mut self, class: ResponseClass) -> Self {
        self.default_response_class = class;
        self
    }

    /// Adds an application-wide dependency.
    #[must_use]
    pub fn dependency(mut self, dependency: Dependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// Sets the schema URL prefix.
    #[must_use]
    pub fn openapi_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.openapi_prefix = prefix.into();
        self
    }

    /// Sets the schema cache behavior.
    #[must_use]
    pub fn schema_cache(mut self, policy: SchemaCachePolicy) -> Self {
        self.schema_cache = policy;
        self
    }

    /// The full URL the schema is served at, prefix included.
    #[must_use]
    pub fn openapi_path(&self) -> Option<String> {
        self.openapi_url
            .as_deref()
            .map(|url| format!("{}{}", self.openapi_prefix, url))
    }
}
