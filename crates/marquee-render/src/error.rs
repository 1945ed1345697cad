//! Error types for template lookup and rendering.
//!
//! This module provides [`RenderError`], the error type for all rendering
//! operations. It abstracts over the underlying template engine's errors,
//! providing a stable public API.

use std::fmt;
use std::path::PathBuf;

/// Error type for template lookup and rendering operations.
#[derive(Debug)]
pub enum RenderError {
    /// No template matched under any view path root.
    MissingTemplate {
        /// The candidate path that was looked up (e.g. `"me3/index"`)
        path: String,
        /// The formats that were requested
        formats: Vec<String>,
        /// Descriptions of the roots that were searched, in order
        searched: Vec<String>,
    },

    /// `render` was called after a response body had already been set.
    DoubleRender,

    /// Template syntax error or evaluation failure.
    TemplateError(String),

    /// A resolved template file could not be read.
    ReadError {
        /// Path that failed to read
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// Assigns could not be serialized into the template context.
    SerializationError(String),

    /// Invalid view configuration.
    ConfigError(String),

    /// Other operational error.
    OperationError(String),
}

impl RenderError {
    /// Returns true for [`RenderError::MissingTemplate`].
    pub fn is_missing_template(&self) -> bool {
        matches!(self, RenderError::MissingTemplate { .. })
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::MissingTemplate {
                path,
                formats,
                searched,
            } => {
                write!(f, "missing template {}", path)?;
                if !formats.is_empty() {
                    write!(f, " with formats [{}]", formats.join(", "))?;
                }
                write!(f, " in view paths [{}]", searched.join(", "))
            }
            RenderError::DoubleRender => {
                write!(f, "render called after the response body was already set")
            }
            RenderError::TemplateError(msg) => write!(f, "template error: {}", msg),
            RenderError::ReadError { path, message } => {
                write!(f, "failed to read template \"{}\": {}", path.display(), message)
            }
            RenderError::SerializationError(msg) => write!(f, "serialization error: {}", msg),
            RenderError::ConfigError(msg) => write!(f, "config error: {}", msg),
            RenderError::OperationError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<serde_yaml::Error> for RenderError {
    fn from(err: serde_yaml::Error) -> Self {
        RenderError::ConfigError(err.to_string())
    }
}

// Lookups never go through minijinja's loader, so a TemplateNotFound here
// comes from an include or extends inside a template.
impl From<minijinja::Error> for RenderError {
    fn from(err: minijinja::Error) -> Self {
        use minijinja::ErrorKind;

        match err.kind() {
            ErrorKind::BadSerialization => RenderError::SerializationError(err.to_string()),
            ErrorKind::SyntaxError
            | ErrorKind::BadEscape
            | ErrorKind::UndefinedError
            | ErrorKind::UnknownTest
            | ErrorKind::UnknownFunction
            | ErrorKind::UnknownFilter
            | ErrorKind::UnknownMethod
            | ErrorKind::TemplateNotFound => RenderError::TemplateError(err.to_string()),
            _ => RenderError::OperationError(err.to_string()),
        }
    }
}
