//! Integration tests for the application registry.
//!
//! This test suite covers:
//! - Construction defaults
//! - Route and router registration order
//! - Schema caching and overrides
//! - Generator failures
//! - Middleware descriptors

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use gantry_core::middleware::{Cors, MiddlewareOptions};
use gantry_core::{App, AppConfig, SchemaCachePolicy, SchemaOverrides};
use gantry_openapi::{
    OpenApi, OpenApiBuilder, OpenApiGenerator, SchemaError, SchemaGenerator, SchemaInput, Server,
    Tag,
};
use gantry_router::{APIRouter, ApiRoute, IncludeOptions, ResponseDef, SharedRoute};
use gantry_types::Method;
use proptest::prelude::*;
use serde_json::json;

fn route(path: &str) -> SharedRoute {
    ApiRoute::new(Method::Get, path).shared()
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

mod construction {
    use super::*;

    #[test]
    fn default_registry_is_empty() {
        let app = App::default();
        assert!(app.routes().is_empty());
        assert!(app.middleware().is_empty());
        assert!(app.exception_handlers().is_empty());
        assert!(app.startup_hooks().is_empty());
        assert!(app.shutdown_hooks().is_empty());
        assert!(app.dependencies().is_empty());
        assert!(app.cached_schema().is_none());
    }

    #[test]
    fn builder_accepts_initial_collections() {
        let app = App::builder()
            .routes([route("/a"), route("/b")])
            .middleware(Cors::new().allow_any_origin())
            .build();

        let paths: Vec<&str> = app.routes().iter().map(|r| r.path()).collect();
        assert_eq!(paths, ["/a", "/b"]);
        assert!(app.middleware()[0].is::<Cors>());
        assert!(app.cached_schema().is_none());
    }

    #[test]
    fn registries_do_not_share_collections() {
        let mut first = App::default();
        let second = App::default();
        first.add_route("/only-here", route("/only-here"));
        assert_eq!(first.routes().len(), 1);
        assert!(second.routes().is_empty());
    }
}

// ============================================================================
// ROUTE REGISTRATION
// ============================================================================

mod registration {
    use super::*;

    #[test]
    fn path_argument_has_no_effect() {
        let shared = route("/items");
        let mut with_path = App::default();
        let mut with_other = App::default();
        with_path.add_route("/items", Arc::clone(&shared));
        with_other.add_route("not even a path", Arc::clone(&shared));

        assert!(Arc::ptr_eq(&with_path.routes()[0], &with_other.routes()[0]));
    }

    #[test]
    fn duplicates_are_kept() {
        let shared = route("/dup");
        let mut app = App::default();
        app.add_route("/dup", Arc::clone(&shared));
        app.add_route("/dup", Arc::clone(&shared));
        assert_eq!(app.routes().len(), 2);
    }

    #[test]
    fn include_router_options_do_not_alter_routes() {
        let router = APIRouter::new()
            .tag("items")
            .get("/items", "list_items")
            .post("/items", "create_item");

        let options = IncludeOptions::new()
            .prefix("/v2")
            .tags(["extra"])
            .response(404, ResponseDef::new("Missing"))
            .include_in_schema(false);

        let mut app = App::default();
        app.include_router(&router, options);

        let schema = app.openapi().unwrap();
        assert_eq!(schema.paths.len(), 1);
        let op = schema.operation("/items", Method::Get).unwrap();
        assert_eq!(op.tags, vec!["items"]);
        assert!(!op.responses.contains_key("404"));
    }

    proptest! {
        #[test]
        fn add_route_preserves_call_order(paths in prop::collection::vec("/[a-z]{1,8}", 0..16)) {
            let mut app = App::default();
            for path in &paths {
                app.add_route(path, route(path));
            }
            let stored: Vec<String> = app.routes().iter().map(|r| r.path().to_string()).collect();
            prop_assert_eq!(stored, paths);
        }

        #[test]
        fn include_router_appends_in_router_order(
            before in prop::collection::vec("/[a-z]{1,8}", 0..8),
            included in prop::collection::vec("/[a-z]{1,8}", 0..8),
        ) {
            let mut app = App::default();
            for path in &before {
                app.add_route(path, route(path));
            }
            let router: Vec<SharedRoute> = included.iter().map(|p| route(p)).collect();
            app.include_router(&router, IncludeOptions::new().prefix("/ignored"));

            let stored: Vec<String> = app.routes().iter().map(|r| r.path().to_string()).collect();
            let expected: Vec<String> = before.iter().chain(included.iter()).cloned().collect();
            prop_assert_eq!(stored, expected);
        }
    }
}

// ============================================================================
// SCHEMA CACHE
// ============================================================================

mod schema_cache {
    use super::*;

    #[test]
    fn repeated_calls_return_the_same_schema() {
        let app = App::default();
        let first = app.openapi().unwrap();
        let second = app.openapi().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&first, &app.cached_schema().unwrap()));
    }

    #[test]
    fn sticky_cache_survives_mutation() {
        let mut app = App::default();
        let first = app.openapi().unwrap();

        app.add_route("/late", route("/late"));
        app.include_router(&vec![route("/later")], IncludeOptions::default());
        app.add_middleware::<Cors>(MiddlewareOptions::new());

        let second = app.openapi().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(!second.paths.contains_key("/late"));
    }

    #[test]
    fn invalidating_cache_regenerates_after_add_route() {
        let mut app =
            App::new(AppConfig::new().schema_cache(SchemaCachePolicy::InvalidateOnMutation));
        let first = app.openapi().unwrap();

        app.add_route("/late", route("/late"));
        let second = app.openapi().unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert!(second.paths.contains_key("/late"));
    }

    #[test]
    fn overrides_apply_only_before_caching() {
        let app = App::default();
        let x = app.compute_schema(SchemaOverrides::new().title("X")).unwrap();
        assert_eq!(x.info.title, "X");

        let y = app.compute_schema(SchemaOverrides::new().title("Y")).unwrap();
        assert_eq!(y.info.title, "X");
        assert!(Arc::ptr_eq(&x, &y));
    }

    #[test]
    fn overrides_replace_stored_inputs() {
        let mut app = App::new(
            AppConfig::new()
                .title("Stored")
                .openapi_tag(Tag::new("stored"))
                .server(Server::new("/stored")),
        );
        app.add_route("/stored", route("/stored"));

        let schema = app
            .compute_schema(
                SchemaOverrides::new()
                    .version("7.0.0")
                    .description("Overridden")
                    .routes(vec![route("/override")])
                    .tags(vec![Tag::new("override")])
                    .servers(vec![Server::new("/override")]),
            )
            .unwrap();

        assert_eq!(schema.info.title, "Stored");
        assert_eq!(schema.info.version, "7.0.0");
        assert_eq!(schema.info.description.as_deref(), Some("Overridden"));
        assert!(schema.paths.contains_key("/override"));
        assert!(!schema.paths.contains_key("/stored"));
        assert_eq!(schema.tags, vec![Tag::new("override")]);
        assert_eq!(schema.servers, vec![Server::new("/override")]);
    }

    #[test]
    fn concurrent_readers_share_one_schema() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let app = Arc::new(
            App::builder()
                .route(route("/items"))
                .generator(move |input: SchemaInput<'_>| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    OpenApiGenerator.generate(input)
                })
                .build(),
        );

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let app = Arc::clone(&app);
                std::thread::spawn(move || app.openapi().unwrap())
            })
            .collect();
        let schemas: Vec<Arc<OpenApi>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(schemas.iter().all(|s| Arc::ptr_eq(s, &schemas[0])));
    }
}

// ============================================================================
// GENERATOR FAILURES
// ============================================================================

mod generator_failures {
    use super::*;

    struct Flaky {
        calls: AtomicUsize,
    }

    impl SchemaGenerator for Flaky {
        fn generate(&self, input: SchemaInput<'_>) -> Result<OpenApi, SchemaError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                return Err(SchemaError::generator("first call fails"));
            }
            Ok(OpenApiBuilder::new(input.title, input.version).build())
        }
    }

    #[test]
    fn errors_propagate_unchanged_and_leave_cache_empty() {
        let app = App::builder()
            .generator(Flaky {
                calls: AtomicUsize::new(0),
            })
            .build();

        let err = app.openapi().unwrap_err();
        assert!(matches!(err, SchemaError::Generator(ref m) if m == "first call fails"));
        assert!(app.cached_schema().is_none());

        let schema = app.openapi().unwrap();
        assert_eq!(schema.info.title, "FastAPI");
        assert!(app.cached_schema().is_some());
    }

    #[test]
    fn default_generator_errors_surface() {
        let mut app = App::default();
        app.add_route("relative", route("relative"));

        let err = app.openapi().unwrap_err();
        assert!(matches!(err, SchemaError::InvalidPath { ref path } if path == "relative"));
        assert!(app.openapi_json().is_err());
    }

    #[test]
    fn router_included_twice_still_documents() {
        let router = APIRouter::new().get("/items", "list_items");
        let mut app = App::default();
        app.include_router(&router, IncludeOptions::default());
        app.include_router(&router, IncludeOptions::default());

        assert_eq!(app.routes().len(), 2);
        let schema = app.openapi().unwrap();
        assert_eq!(schema.paths.len(), 1);
        assert!(schema.operation("/items", Method::Get).is_some());
    }
}

// ============================================================================
// MIDDLEWARE
// ============================================================================

mod middleware {
    use super::*;

    struct RateLimit;

    #[test]
    fn add_middleware_records_type_and_options() {
        let mut options = MiddlewareOptions::new();
        options.insert("opt".into(), json!(1));

        let mut app = App::default();
        app.add_middleware::<RateLimit>(options.clone());

        assert_eq!(app.middleware().len(), 1);
        assert!(app.middleware()[0].is::<RateLimit>());
        assert_eq!(app.middleware()[0].options, options);
    }

    #[test]
    fn middleware_order_is_registration_order() {
        let mut app = App::default();
        app.add_middleware::<RateLimit>(MiddlewareOptions::new());
        app.push_middleware(Cors::new());
        app.add_middleware::<RateLimit>(MiddlewareOptions::new());

        let kinds: Vec<bool> = app.middleware().iter().map(|m| m.is::<Cors>()).collect();
        assert_eq!(kinds, [false, true, false]);
    }
}
