//! Dependency descriptors.
//!
//! Dependencies are resolved by an external injector. The registry and the
//! routers only record them, by name, in declaration order.

use serde::{Deserialize, Serialize};

/// Resolution scope requested for a dependency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyScope {
    /// Resolve on each use.
    Function,
    /// Resolve once per request.
    #[default]
    Request,
}

/// An opaque dependency declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Name of the provider, used by the injector to look it up.
    pub name: String,
    /// Requested resolution scope.
    #[serde(default)]
    pub scope: DependencyScope,
    /// Whether the resolved value may be cached within its scope.
    #[serde(default = "default_use_cache")]
    pub use_cache: bool,
}

fn default_use_cache() -> bool {
    true
}

impl Dependency {
    /// Declares a request-scoped, cached dependency.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scope: DependencyScope::Request,
            use_cache: true,
        }
    }

    /// Sets the resolution scope.
    #[must_use]
    pub fn scope(mut self, scope: DependencyScope) -> Self {
        self.scope = scope;
        self
    }

    /// Disables caching.
    #[must_use]
    pub fn no_cache(mut self) -> Self {
        self.use_cache = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_dependency_is_request_scoped_and_cached() {
        let dep = Dependency::new("db");
        assert_eq!(dep.scope, DependencyScope::Request);
        assert!(dep.use_cache);
    }

    #[test]
    fn deserializes_with_defaults() {
        let dep: Dependency = serde_json::from_str(r#"{"name":"auth"}"#).unwrap();
        assert_eq!(dep, Dependency::new("auth"));

        let dep: Dependency =
            serde_json::from_str(r#"{"name":"clock","scope":"function","use_cache":false}"#)
                .unwrap();
        assert_eq!(
            dep,
            Dependency::new("clock")
                .scope(DependencyScope::Function)
                .no_cache()
        );
    }
}
