//! Registry errors.

use std::fmt;

/// Errors raised by the application registry.
///
/// Schema generation failures are not wrapped here; they surface as
/// [`SchemaError`](gantry_openapi::SchemaError) exactly as the generator
/// returned them.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An extension point that is declared but not implemented.
    #[error("`{operation}` is not supported by this registry")]
    Unsupported {
        /// Name of the operation.
        operation: &'static str,
    },

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A lifecycle hook failed.
    #[error(transparent)]
    Hook(#[from] HookError),
}

impl AppError {
    /// Returns true for [`AppError::Unsupported`].
    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}

/// Error returned by a lifecycle hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookError {
    /// Name of the hook that failed, once known.
    pub hook: Option<String>,
    /// What went wrong.
    pub message: String,
}

impl HookError {
    /// Creates a hook error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            hook: None,
            message: message.into(),
        }
    }

    /// Records the name of the failing hook.
    #[must_use]
    pub fn with_hook_name(mut self, name: impl Into<String>) -> Self {
        self.hook = Some(name.into());
        self
    }
}

impl fmt::Display for HookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.hook {
            Some(name) => write!(f, "lifecycle hook '{}' failed: {}", name, self.message),
            None => write!(f, "lifecycle hook failed: {}", self.message),
        }
    }
}

impl std::error::Error for HookError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hook_error_display() {
        assert_eq!(
            HookError::new("db offline").to_string(),
            "lifecycle hook failed: db offline"
        );
        assert_eq!(
            HookError::new("db offline")
                .with_hook_name("connect")
                .to_string(),
            "lifecycle hook 'connect' failed: db offline"
        );
    }

    #[test]
    fn app_error_wraps_hook_error_transparently() {
        let err = AppError::from(HookError::new("boom").with_hook_name("warmup"));
        assert_eq!(err.to_string(), "lifecycle hook 'warmup' failed: boom");
        assert!(!err.is_unsupported());
    }

    #[test]
    fn unsupported_names_the_operation() {
        let err = AppError::Unsupported { operation: "mount" };
        assert!(err.is_unsupported());
        assert_eq!(err.to_string(), "`mount` is not supported by this registry");
    }
}
