//! Schema generation errors.

/// Errors raised while generating or serializing a schema document.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// A documented route path does not start with `/`.
    #[error("route path `{path}` must start with '/'")]
    InvalidPath {
        /// The offending path.
        path: String,
    },

    /// The document could not be serialized.
    #[error("failed to serialize schema document: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A custom generator failed.
    #[error("schema generation failed: {0}")]
    Generator(String),
}

impl SchemaError {
    /// Creates an error for a custom generator.
    pub fn generator(message: impl Into<String>) -> Self {
        Self::Generator(message.into())
    }
}
