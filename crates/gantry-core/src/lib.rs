//! The gantry application registry.
//!
//! This crate provides the top-level application object:
//! - [`App`], which stores configuration, routes, middleware descriptors,
//!   exception handlers and lifecycle hooks
//! - the lazily generated, cached OpenAPI schema for those routes
//! - documentation pages rendered from the registry's configuration
//! - [`logging`] setup for processes that do not install a subscriber
//!
//! # Design Principles
//!
//! - The registry stores; it never routes, dispatches or runs middleware
//! - Collaborators are trait contracts: route descriptors, routers and the
//!   schema generator are injected, never hard-wired
//! - Declared-but-unimplemented extension points fail loudly
//! - All types support `Send + Sync`

#![forbid(unsafe_code)]
// Pedantic clippy lints allowed (style suggestions, not correctness issues)
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::type_complexity)]
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod config;
pub mod docs;
pub mod error;
pub mod exception;
pub mod hooks;
pub mod logging;
pub mod middleware;

pub use app::{App, AppBuilder, SchemaOverrides};
pub use config::{AppConfig, SchemaCachePolicy};
pub use error::{AppError, HookError};
pub use exception::{ErrorClass, ErrorResponse, ExceptionHandler, ExceptionHandlers};
pub use hooks::LifecycleHook;
pub use middleware::{HandlerType, Middleware, MiddlewareOptions};
