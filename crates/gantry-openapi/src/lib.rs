//! OpenAPI 3.1 documents and schema generation.
//!
//! This crate provides:
//!
//! - OpenAPI 3.1 document types ([`OpenApi`] and friends)
//! - [`OpenApiBuilder`], which turns route descriptors into operations
//! - the [`SchemaGenerator`] contract and its default [`OpenApiGenerator`]
//!
//! # Example
//!
//! ```
//! use gantry_openapi::{OpenApiGenerator, SchemaGenerator, SchemaInput};
//! use gantry_router::ApiRoute;
//! use gantry_types::Method;
//!
//! let routes = vec![ApiRoute::new(Method::Get, "/items").name("list_items").shared()];
//! let doc = OpenApiGenerator.generate(SchemaInput {
//!     title: "My API",
//!     version: "1.0.0",
//!     description: "",
//!     routes: &routes,
//!     tags: &[],
//!     servers: &[],
//! })?;
//! assert!(doc.paths.contains_key("/items"));
//! # Ok::<(), gantry_openapi::SchemaError>(())
//! ```

#![forbid(unsafe_code)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]

mod error;
mod generator;
mod schema;
mod spec;

pub use error::SchemaError;
pub use generator::{OpenApiGenerator, SchemaGenerator, SchemaInput};
pub use schema::{AnySchema, PrimitiveSchema, RefSchema, Schema, SchemaType};
pub use spec::{
    ExternalDocs, Info, MediaType, OPENAPI_VERSION, OpenApi, OpenApiBuilder, Operation,
    Parameter, ParameterLocation, PathItem, Response, Server, Tag, converter_to_schema,
};
