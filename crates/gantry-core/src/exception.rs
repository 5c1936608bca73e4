//! Exception handler registry.
//!
//! Handlers are keyed either by HTTP status code or by error type, and turn an
//! error into an [`ErrorResponse`]. Registering a second handler for the same
//! key replaces the first.
//!
//! # Example
//!
//! ```
//! use gantry_core::exception::{ErrorResponse, ExceptionHandlers};
//!
//! #[derive(Debug)]
//! struct OutOfStock(u32);
//!
//! impl std::fmt::Display for OutOfStock {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         write!(f, "item {} is out of stock", self.0)
//!     }
//! }
//!
//! impl std::error::Error for OutOfStock {}
//!
//! let handlers = ExceptionHandlers::new().handler(|err: &OutOfStock| {
//!     ErrorResponse::detail(409, err.to_string())
//! });
//!
//! let response = handlers.handle(&OutOfStock(7)).unwrap();
//! assert_eq!(response.status, 409);
//! assert_eq!(response.body["detail"], "item 7 is out of stock");
//! ```

use std::any::TypeId;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

use serde_json::{Value, json};

/// What a handler is registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// An HTTP status code.
    Status(u16),
    /// A concrete error type.
    Kind {
        /// The error's type id.
        type_id: TypeId,
        /// The error's type name.
        name: &'static str,
    },
}

impl ErrorClass {
    /// The class of error type `E`.
    #[must_use]
    pub fn of<E: Error + 'static>() -> Self {
        Self::Kind {
            type_id: TypeId::of::<E>(),
            name: std::any::type_name::<E>(),
        }
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(code) => write!(f, "status {}", code),
            Self::Kind { name, .. } => f.write_str(name),
        }
    }
}

/// The response an exception handler produces.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorResponse {
    /// HTTP status code.
    pub status: u16,
    /// JSON body.
    pub body: Value,
}

impl ErrorResponse {
    /// Creates a response.
    #[must_use]
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// A `{"detail": ...}` body.
    #[must_use]
    pub fn detail(status: u16, detail: impl Into<String>) -> Self {
        Self::new(status, json!({ "detail": detail.into() }))
    }

    /// The response used when no handler matches.
    #[must_use]
    pub fn internal_server_error() -> Self {
        Self::detail(500, "Internal Server Error")
    }
}

/// A shared exception handler.
pub type ExceptionHandler = Arc<dyn Fn(&(dyn Error + 'static)) -> ErrorResponse + Send + Sync>;

/// Registry of exception handlers.
#[derive(Clone, Default)]
pub struct ExceptionHandlers {
    handlers: HashMap<ErrorClass, ExceptionHandler>,
}

impl ExceptionHandlers {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `class`, replacing any previous handler.
    pub fn register<F>(&mut self, class: ErrorClass, handler: F)
    where
        F: Fn(&(dyn Error + 'static)) -> ErrorResponse + Send + Sync + 'static,
    {
        if self.handlers.insert(class, Arc::new(handler)).is_some() {
            tracing::debug!(%class, "replaced exception handler");
        }
    }

    /// Registers a handler for an HTTP status code.
    pub fn for_status<F>(&mut self, status: u16, handler: F)
    where
        F: Fn(&(dyn Error + 'static)) -> ErrorResponse + Send + Sync + 'static,
    {
        self.register(ErrorClass::Status(status), handler);
    }

    /// Registers a typed handler for error type `E`.
    pub fn for_error<E, F>(&mut self, handler: F)
    where
        E: Error + 'static,
        F: Fn(&E) -> ErrorResponse + Send + Sync + 'static,
    {
        self.register(ErrorClass::of::<E>(), move |err| match err.downcast_ref::<E>() {
            Some(typed) => handler(typed),
            None => ErrorResponse::internal_server_error(),
        });
    }

    /// Registers a typed handler (builder pattern).
    #[must_use]
    pub fn handler<E, F>(mut self, handler: F) -> Self
    where
        E: Error + 'static,
        F: Fn(&E) -> ErrorResponse + Send + Sync + 'static,
    {
        self.for_error::<E, F>(handler);
        self
    }

    /// Returns the handler registered for `class`.
    #[must_use]
    pub fn get(&self, class: &ErrorClass) -> Option<&ExceptionHandler> {
        self.handlers.get(class)
    }

    /// Returns true if a handler is registered for `class`.
    #[must_use]
    pub fn contains(&self, class: &ErrorClass) -> bool {
        self.handlers.contains_key(class)
    }

    /// Returns the number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns true if no handlers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Merges another registry into this one. Handlers from `other` win.
    pub fn merge(&mut self, other: ExceptionHandlers) {
        self.handlers.extend(other.handlers);
    }

    /// Invokes the handler registered for `status`.
    pub fn handle_status(&self, status: u16, err: &(dyn Error + 'static)) -> Option<ErrorResponse> {
        self.handlers
            .get(&ErrorClass::Status(status))
            .map(|handler| handler(err))
    }

    /// Invokes the handler registered for `E`.
    pub fn handle<E: Error + 'static>(&self, err: &E) -> Option<ErrorResponse> {
        self.handlers
            .get(&ErrorClass::of::<E>())
            .map(|handler| handler(err))
    }

    /// Invokes the handler registered for `E`, or returns a 500 response.
    pub fn handle_or_default<E: Error + 'static>(&self, err: &E) -> ErrorResponse {
        self.handle(err)
            .unwrap_or_else(ErrorResponse::internal_server_error)
    }
}

impl fmt::Debug for ExceptionHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}
