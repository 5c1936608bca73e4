//! Middleware descriptors.
//!
//! The registry does not run middleware. It records, in registration order,
//! which handler type should wrap the application and the options it should
//! be constructed with. The request pipeline that consumes these descriptors
//! lives outside this crate.
//!
//! # Example
//!
//! ```
//! use gantry_core::middleware::{Cors, GZip, Middleware};
//!
//! let cors: Middleware = Cors::new()
//!     .allow_origin("https://example.com")
//!     .allow_credentials(true)
//!     .into();
//! assert!(cors.is::<Cors>());
//! assert_eq!(cors.option("allow_credentials"), Some(&serde_json::json!(true)));
//!
//! let gzip: Middleware = GZip::new().minimum_size(1024).into();
//! assert_eq!(gzip.option("minimum_size"), Some(&serde_json::json!(1024)));
//! ```

use std::any::TypeId;
use std::fmt;

use gantry_types::Method;
use serde_json::Value;

/// Options a middleware is constructed with, in insertion order.
pub type MiddlewareOptions = serde_json::Map<String, Value>;

/// Identifies a middleware handler type.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerType {
    type_id: TypeId,
    name: &'static str,
}

impl HandlerType {
    /// Returns the identifier for `T`.
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Returns true if this identifies `T`.
    #[must_use]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// The type's [`TypeId`].
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The fully qualified type name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for HandlerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HandlerType").field(&self.name).finish()
    }
}

impl fmt::Display for HandlerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A middleware descriptor: a handler type paired with its options.
#[derive(Debug, Clone, PartialEq)]
pub struct Middleware {
    /// The handler type to instantiate.
    pub handler: HandlerType,
    /// Construction options for the handler.
    pub options: MiddlewareOptions,
}

impl Middleware {
    /// Describes middleware of type `T` constructed with `options`.
    #[must_use]
    pub fn new<T: ?Sized + 'static>(options: MiddlewareOptions) -> Self {
        Self {
            handler: HandlerType::of::<T>(),
            options,
        }
    }

    /// Returns true if the handler type is `T`.
    #[must_use]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.handler.is::<T>()
    }

    /// Looks up a single option.
    #[must_use]
    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }
}

fn strings(values: &[String]) -> Value {
    Value::Array(values.iter().cloned().map(Value::String).collect())
}

// ============================================================================
// CORS
// ============================================================================

/// Cross-origin resource sharing options.
#[derive(Debug, Clone, PartialEq)]
pub struct Cors {
    allow_origins: Vec<String>,
    allow_origin_regex: Option<String>,
    allow_methods: Vec<Method>,
    allow_headers: Vec<String>,
    allow_credentials: bool,
    expose_headers: Vec<String>,
    max_age: u32,
}

impl Default for Cors {
    fn default() -> Self {
        Self {
            allow_origins: Vec::new(),
            allow_origin_regex: None,
            allow_methods: vec![Method::Get],
            allow_headers: Vec::new(),
            allow_credentials: false,
            expose_headers: Vec::new(),
            max_age: 600,
        }
    }
}

impl Cors {
    /// CORS with no allowed origins, `GET` only, and a 600 second max age.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow any origin.
    #[must_use]
    pub fn allow_any_origin(mut self) -> Self {
        self.allow_origins = vec!["*".to_string()];
        self
    }

    /// Allow a single exact origin.
    #[must_use]
    pub fn allow_origin(mut self, origin: impl Into<String>) -> Self {
        self.allow_origins.push(origin.into());
        self
    }

    /// Allow origins matching a regular expression.
    #[must_use]
    pub fn allow_origin_regex(mut self, pattern: impl Into<String>) -> Self {
        self.allow_origin_regex = Some(pattern.into());
        self
    }

    /// Override allowed methods.
    #[must_use]
    pub fn allow_methods<I>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = Method>,
    {
        self.allow_methods = methods.into_iter().collect();
        self
    }

    /// Override allowed request headers.
    #[must_use]
    pub fn allow_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allow_headers = headers.into_iter().map(Into::into).collect();
        self
    }

    /// Allow credentials.
    #[must_use]
    pub fn allow_credentials(mut self, allow: bool) -> Self {
        self.allow_credentials = allow;
        self
    }

    /// Set the headers exposed to the browser.
    #[must_use]
    pub fn expose_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expose_headers = headers.into_iter().map(Into::into).collect();
        self
    }

    /// Set the preflight max-age in seconds.
    #[must_use]
    pub fn max_age(mut self, seconds: u32) -> Self {
        self.max_age = seconds;
        self
    }

    fn options(&self) -> MiddlewareOptions {
        let mut options = MiddlewareOptions::new();
        options.insert("allow_origins".into(), strings(&self.allow_origins));
        if let Some(regex) = &self.allow_origin_regex {
            options.insert("allow_origin_regex".into(), Value::String(regex.clone()));
        }
        options.insert(
            "allow_methods".into(),
            Value::Array(
                self.allow_methods
                    .iter()
                    .map(|m| Value::String(m.as_str().to_string()))
                    .collect(),
            ),
        );
        options.insert("allow_headers".into(), strings(&self.allow_headers));
        options.insert(
            "allow_credentials".into(),
            Value::Bool(self.allow_credentials),
        );
        options.insert("expose_headers".into(), strings(&self.expose_headers));
        options.insert("max_age".into(), Value::from(self.max_age));
        options
    }
}

impl From<Cors> for Middleware {
    fn from(cors: Cors) -> Self {
        Middleware::new::<Cors>(cors.options())
    }
}

// ============================================================================
// Compression
// ============================================================================

/// Gzip response compression options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GZip {
    minimum_size: u64,
}

impl Default for GZip {
    fn default() -> Self {
        Self { minimum_size: 500 }
    }
}

impl GZip {
    /// Compress responses of at least 500 bytes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the smallest body size, in bytes, that gets compressed.
    #[must_use]
    pub fn minimum_size(mut self, bytes: u64) -> Self {
        self.minimum_size = bytes;
        self
    }
}

impl From<GZip> for Middleware {
    fn from(gzip: GZip) -> Self {
        let mut options = MiddlewareOptions::new();
        options.insert("minimum_size".into(), Value::from(gzip.minimum_size));
        Middleware::new::<GZip>(options)
    }
}

// ============================================================================
// HTTPS redirect
// ============================================================================

/// Redirects plain HTTP requests to HTTPS. Takes no options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HttpsRedirect;

impl From<HttpsRedirect> for Middleware {
    fn from(_: HttpsRedirect) -> Self {
        Middleware::new::<HttpsRedirect>(MiddlewareOptions::new())
    }
}

// ============================================================================
// Trusted hosts
// ============================================================================

/// Rejects requests whose `Host` header is not in the allowed list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedHost {
    allowed_hosts: Vec<String>,
    www_redirect: bool,
}

impl Default for TrustedHost {
    fn default() -> Self {
        Self {
            allowed_hosts: vec!["*".to_string()],
            www_redirect: true,
        }
    }
}

impl TrustedHost {
    /// Trust the given hosts. Wildcard subdomains (`*.example.com`) are allowed.
    #[must_use]
    pub fn new<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_hosts: hosts.into_iter().map(Into::into).collect(),
            www_redirect: true,
        }
    }

    /// Redirect `example.com` to `www.example.com` when only the latter is trusted.
    #[must_use]
    pub fn www_redirect(mut self, redirect: bool) -> Self {
        self.www_redirect = redirect;
        self
    }
}

impl From<TrustedHost> for Middleware {
    fn from(trusted: TrustedHost) -> Self {
        let mut options = MiddlewareOptions::new();
        options.insert("allowed_hosts".into(), strings(&trusted.allowed_hosts));
        options.insert("www_redirect".into(), Value::Bool(trusted.www_redirect));
        Middleware::new::<TrustedHost>(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Timing;

    #[test]
    fn descriptor_records_type_and_options() {
        let mut options = MiddlewareOptions::new();
        options.insert("opt".into(), json!(1));
        let mw = Middleware::new::<Timing>(options.clone());

        assert!(mw.is::<Timing>());
        assert!(!mw.is::<Cors>());
        assert_eq!(mw.options, options);
        assert!(mw.handler.name().ends_with("Timing"));
    }

    #[test]
    fn options_keep_insertion_order() {
        let mut options = MiddlewareOptions::new();
        options.insert("zeta".into(), json!(1));
        options.insert("alpha".into(), json!(2));
        let mw = Middleware::new::<Timing>(options);
        let keys: Vec<&str> = mw.options.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha"]);
    }

    #[test]
    fn cors_defaults() {
        let mw: Middleware = Cors::new().into();
        assert_eq!(mw.option("allow_origins"), Some(&json!([])));
        assert_eq!(mw.option("allow_methods"), Some(&json!(["GET"])));
        assert_eq!(mw.option("max_age"), Some(&json!(600)));
        assert!(mw.option("allow_origin_regex").is_none());
    }

    #[test]
    fn cors_builder_options() {
        let mw: Middleware = Cors::new()
            .allow_any_origin()
            .allow_origin_regex(r"https://.*\.example\.com")
            .allow_methods([Method::Get, Method::Post])
            .allow_headers(["x-token"])
            .expose_headers(["x-request-id"])
            .max_age(60)
            .into();

        assert_eq!(mw.option("allow_origins"), Some(&json!(["*"])));
        assert_eq!(mw.option("allow_methods"), Some(&json!(["GET", "POST"])));
        assert_eq!(mw.option("allow_headers"), Some(&json!(["x-token"])));
        assert_eq!(mw.option("expose_headers"), Some(&json!(["x-request-id"])));
        assert_eq!(mw.option("max_age"), Some(&json!(60)));
    }

    #[test]
    fn trusted_host_and_redirect() {
        let mw: Middleware = TrustedHost::new(["example.com", "*.example.com"])
            .www_redirect(false)
            .into();
        assert!(mw.is::<TrustedHost>());
        assert_eq!(
            mw.option("allowed_hosts"),
            Some(&json!(["example.com", "*.example.com"]))
        );
        assert_eq!(mw.option("www_redirect"), Some(&json!(false)));

        let https: Middleware = HttpsRedirect.into();
        assert!(https.is::<HttpsRedirect>());
        assert!(https.options.is_empty());
    }

    #[test]
    fn gzip_minimum_size() {
        let mw: Middleware = GZip::new().into();
        assert_eq!(mw.option("minimum_size"), Some(&json!(500)));
    }
}
