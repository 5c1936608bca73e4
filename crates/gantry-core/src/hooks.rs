//! Lifecycle hooks.
//!
//! A hook is a named, zero-argument callable registered to run at startup or
//! shutdown. Hooks are only ever appended; the registry never removes them.

use std::fmt;
use std::sync::Arc;

use crate::error::HookError;

type HookFn = dyn Fn() -> Result<(), HookError> + Send + Sync;

/// A named startup or shutdown callable.
#[derive(Clone)]
pub struct LifecycleHook {
    name: String,
    f: Arc<HookFn>,
}

impl LifecycleHook {
    /// Creates a hook.
    pub fn new<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn() -> Result<(), HookError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            f: Arc::new(f),
        }
    }

    /// The hook name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the hook. A returned error is tagged with the hook name unless
    /// it already carries one.
    pub fn run(&self) -> Result<(), HookError> {
        (self.f)().map_err(|err| match err.hook {
            Some(_) => err,
            None => err.with_hook_name(&self.name),
        })
    }
}

impl fmt::Debug for LifecycleHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleHook")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Runs `hooks` in order and stops at the first failure.
pub(crate) fn run_until_failure(hooks: &[LifecycleHook]) -> Result<(), HookError> {
    for hook in hooks {
        tracing::debug!(hook = hook.name(), "running startup hook");
        if let Err(err) = hook.run() {
            tracing::error!(hook = hook.name(), error = %err, "startup hook failed");
            return Err(err);
        }
    }
    Ok(())
}

/// Runs every hook in order and collects the failures.
pub(crate) fn run_all(hooks: &[LifecycleHook]) -> Vec<HookError> {
    let mut errors = Vec::new();
    for hook in hooks {
        tracing::debug!(hook = hook.name(), "running shutdown hook");
        if let Err(err) = hook.run() {
            tracing::error!(hook = hook.name(), error = %err, "shutdown hook failed");
            errors.push(err);
        }
    }
    errors
}
