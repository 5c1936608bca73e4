//! FastAPI-style application registry for Rust.
//!
//! gantry provides the top-level application object of a web framework:
//!
//! - **Registry**: Configuration, routes, middleware descriptors, exception
//!   handlers and lifecycle hooks, kept in registration order
//! - **Cached OpenAPI**: A 3.1 schema generated on first use and cached
//! - **Pluggable generation**: Any [`SchemaGenerator`] can replace the default
//! - **Documentation pages**: Swagger UI and ReDoc rendered from the config
//!
//! # Quick Start
//!
//! ```
//! use gantry::prelude::*;
//!
//! let mut app = App::new(AppConfig::new().title("My API").version("1.0.0"));
//! app.add_route("/items/{id}", ApiRoute::new(Method::Get, "/items/{id:int}").name("get_item"));
//! app.push_middleware(Cors::new().allow_any_origin());
//!
//! let schema = app.openapi()?;
//! assert!(schema.paths.contains_key("/items/{id}"));
//! # Ok::<(), gantry::SchemaError>(())
//! ```
//!
//! # Crate Structure
//!
//! - [`gantry_core`]: The registry, config, middleware, handlers, hooks, docs
//! - [`gantry_router`]: Route descriptors and routers
//! - [`gantry_openapi`]: OpenAPI 3.1 types and generation
//! - [`gantry_types`]: Shared primitive types

#![forbid(unsafe_code)]

// Re-export crates
pub use gantry_core as core;
pub use gantry_openapi as openapi;
pub use gantry_router as router;
pub use gantry_types as types;

// Re-export commonly used types
pub use gantry_core::middleware::{Cors, GZip, HttpsRedirect, TrustedHost};
pub use gantry_core::{
    App, AppBuilder, AppConfig, AppError, ErrorClass, ErrorResponse, ExceptionHandler,
    ExceptionHandlers, HandlerType, HookError, LifecycleHook, Middleware, MiddlewareOptions,
    SchemaCachePolicy, SchemaOverrides, logging,
};
pub use gantry_openapi::{
    OpenApi, OpenApiBuilder, OpenApiGenerator, SchemaError, SchemaGenerator, SchemaInput, Server,
    Tag,
};
pub use gantry_router::{
    APIRouter, ApiRoute, Dependency, DependencyScope, IncludeOptions, IntoRoute, OperationMeta,
    ResponseClass, ResponseDef, RouteCollection, RouteDescriptor, SharedRoute,
};
pub use gantry_types::Method;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        // Registry
        App, AppBuilder, AppConfig, AppError, LifecycleHook, SchemaCachePolicy, SchemaOverrides,
        // Routes
        APIRouter, ApiRoute, IncludeOptions, Method, RouteCollection, RouteDescriptor,
        // Middleware
        Cors, GZip, HttpsRedirect, Middleware, TrustedHost,
        // Exceptions
        ErrorClass, ErrorResponse, ExceptionHandlers,
        // OpenAPI
        OpenApi, SchemaError, SchemaGenerator,
    };
}
