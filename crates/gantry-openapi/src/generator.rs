//! Schema generation contract.
//!
//! The registry never builds documents itself. It resolves its inputs into a
//! [`SchemaInput`] and hands them to a [`SchemaGenerator`]. Whatever the
//! generator returns, document or error, reaches the caller unchanged.

use gantry_router::SharedRoute;

use crate::error::SchemaError;
use crate::spec::{OpenApi, OpenApiBuilder, Server, Tag};

/// The resolved inputs of one schema generation.
#[derive(Debug, Clone, Copy)]
pub struct SchemaInput<'a> {
    /// Document title.
    pub title: &'a str,
    /// Document version.
    pub version: &'a str,
    /// Document description. Empty means none.
    pub description: &'a str,
    /// Routes to document, in registration order.
    pub routes: &'a [SharedRoute],
    /// Tag metadata.
    pub tags: &'a [Tag],
    /// Servers.
    pub servers: &'a [Server],
}

/// Produces a schema document from resolved inputs.
///
/// Closures of the right shape are generators too:
///
/// ```
/// use gantry_openapi::{OpenApiBuilder, SchemaError, SchemaGenerator, SchemaInput};
///
/// let title_only = |input: SchemaInput<'_>| -> Result<_, SchemaError> {
///     Ok(OpenApiBuilder::new(input.title, input.version).build())
/// };
/// let doc = title_only
///     .generate(SchemaInput {
///         title: "Bare",
///         version: "1",
///         description: "",
///         routes: &[],
///         tags: &[],
///         servers: &[],
///     })?;
/// assert_eq!(doc.info.title, "Bare");
/// # Ok::<(), SchemaError>(())
/// ```
pub trait SchemaGenerator: Send + Sync {
    /// Generates the document.
    ///
    /// # Errors
    ///
    /// Any error the generator cannot recover from.
    fn generate(&self, input: SchemaInput<'_>) -> Result<OpenApi, SchemaError>;
}

impl<F> SchemaGenerator for F
where
    F: for<'a> Fn(SchemaInput<'a>) -> Result<OpenApi, SchemaError> + Send + Sync,
{
    fn generate(&self, input: SchemaInput<'_>) -> Result<OpenApi, SchemaError> {
        self(input)
    }
}

/// The default generator: one OpenAPI 3.1 operation per route method.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenApiGenerator;

impl SchemaGenerator for OpenApiGenerator {
    fn generate(&self, input: SchemaInput<'_>) -> Result<OpenApi, SchemaError> {
        let mut builder =
            OpenApiBuilder::new(input.title, input.version).description(input.description);
        for server in input.servers {
            builder = builder.server(server.clone());
        }
        for tag in input.tags {
            builder = builder.tag(tag.clone());
        }
        for route in input.routes {
            builder.add_route(route.as_ref())?;
        }
        let doc = builder.build();
        tracing::debug!(
            title = %doc.info.title,
            paths = doc.paths.len(),
            "generated OpenAPI document"
        );
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantry_router::ApiRoute;
    use gantry_types::Method;

    fn input<'a>(routes: &'a [SharedRoute], tags: &'a [Tag], servers: &'a [Server]) -> SchemaInput<'a> {
        SchemaInput {
            title: "Shop",
            version: "3.2.1",
            description: "Storefront",
            routes,
            tags,
            servers,
        }
    }

    #[test]
    fn default_generator_documents_every_route() {
        let routes = vec![
            ApiRoute::new(Method::Get, "/items").name("list_items").shared(),
            ApiRoute::new(Method::Post, "/items").name("create_item").shared(),
            ApiRoute::new(Method::Get, "/items/{id}").name("read_item").shared(),
        ];
        let tags = [Tag::new("items")];
        let servers = [Server::new("/")];

        let doc = OpenApiGenerator.generate(input(&routes, &tags, &servers)).unwrap();

        assert_eq!(doc.info.title, "Shop");
        assert_eq!(doc.info.version, "3.2.1");
        assert_eq!(doc.info.description.as_deref(), Some("Storefront"));
        assert_eq!(doc.paths.len(), 2);
        assert!(doc.operation("/items", Method::Post).is_some());
        assert_eq!(doc.tags, tags);
        assert_eq!(doc.servers, servers);
    }

    #[test]
    fn default_generator_propagates_route_errors() {
        let routes = vec![ApiRoute::new(Method::Get, "relative").shared()];
        let err = OpenApiGenerator.generate(input(&routes, &[], &[])).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidPath { .. }));
    }

    #[test]
    fn closures_are_generators() {
        let count_routes = |input: SchemaInput<'_>| -> Result<OpenApi, SchemaError> {
            let title = format!("{} routes", input.routes.len());
            Ok(OpenApiBuilder::new(title, input.version).build())
        };
        let routes = vec![ApiRoute::new(Method::Get, "/").shared()];
        assert_eq!(routes[0].path(), "/");

        let doc = count_routes.generate(input(&routes, &[], &[])).unwrap();
        assert_eq!(doc.info.title, "1 routes");
    }
}
