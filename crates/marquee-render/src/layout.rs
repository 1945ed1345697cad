//! Layout lookup and wrapping.
//!
//! A layout is an outer template that embeds an already-rendered body at
//! `{{ content }}`. Layouts live under their own namespace directory
//! (`layouts/` by default) and are found with the same mechanism as regular
//! templates.
//!
//! The implicit chain tries the controller's own layout
//! (`layouts/<controller_path>`) and then the shared default
//! (`layouts/application`). Only in this chain is a missing template
//! swallowed: if neither exists the body is returned unwrapped. A layout
//! requested by name must exist.

use serde_json::{Map, Value};

use crate::error::RenderError;
use crate::template::{ResolvedTemplate, TemplateEngine, TemplateQuery, ViewPaths};

/// Default directory that holds layouts.
pub const DEFAULT_LAYOUT_NAMESPACE: &str = "layouts";

/// Default layout used when the controller has none of its own.
pub const DEFAULT_LAYOUT: &str = "application";

/// Context key under which the inner body is exposed to the layout.
pub const LAYOUT_CONTENT_KEY: &str = "content";

/// Per-render layout request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Layout {
    /// Use the controller's layout resolution, if it has layout support.
    #[default]
    Default,
    /// Render without any layout.
    Disabled,
    /// Use this layout; it must exist.
    Named(String),
}

impl Layout {
    /// A named layout.
    pub fn named(name: impl Into<String>) -> Self {
        Layout::Named(name.into())
    }
}

impl From<bool> for Layout {
    /// `false` disables layouts; `true` keeps the default behavior.
    fn from(enabled: bool) -> Self {
        if enabled {
            Layout::Default
        } else {
            Layout::Disabled
        }
    }
}

impl From<&str> for Layout {
    fn from(name: &str) -> Self {
        Layout::Named(name.to_string())
    }
}

/// How a render call ended up with respect to layouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutOutcome {
    /// No layout was requested.
    NotRequested,
    /// The body was wrapped in this layout.
    Wrapped(String),
    /// A layout was requested but none was found; the body is unwrapped.
    Unwrapped,
}

/// Layout support for a controller type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layouts {
    namespace: String,
    default_layout: Option<String>,
}

impl Default for Layouts {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_LAYOUT_NAMESPACE.to_string(),
            default_layout: Some(DEFAULT_LAYOUT.to_string()),
        }
    }
}

impl Layouts {
    /// Layout support with the `layouts/` namespace and `application` fallback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the namespace directory.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Sets (or clears) the fallback layout.
    pub fn default_layout(mut self, name: Option<impl Into<String>>) -> Self {
        self.default_layout = name.map(Into::into);
        self
    }

    /// The namespace directory.
    pub fn namespace_dir(&self) -> &str {
        &self.namespace
    }

    /// The fallback layout name.
    pub fn fallback(&self) -> Option<&str> {
        self.default_layout.as_deref()
    }

    /// The lookup query for layout `name`.
    ///
    /// Layouts only match the given formats; with none given, only a
    /// formatless layout matches.
    pub fn query(&self, name: &str, formats: &[String]) -> TemplateQuery {
        TemplateQuery::new(name)
            .prefix(self.namespace.as_str())
            .formats(formats.iter().cloned())
            .exact_formats(true)
    }

    /// Finds the layout named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MissingTemplate`] if it does not exist.
    pub fn find_named(
        &self,
        view_paths: &ViewPaths,
        name: &str,
        formats: &[String],
    ) -> Result<ResolvedTemplate, RenderError> {
        view_paths.find_template(&self.query(name, formats))
    }

    /// Runs the implicit chain: the controller's own layout, then the fallback.
    ///
    /// Returns `Ok(None)` when neither exists. Errors other than a missing
    /// template propagate.
    pub fn find(
        &self,
        view_paths: &ViewPaths,
        controller_path: &str,
        formats: &[String],
    ) -> Result<Option<ResolvedTemplate>, RenderError> {
        match self.find_named(view_paths, controller_path, formats) {
            Ok(layout) => return Ok(Some(layout)),
            Err(err) if err.is_missing_template() => {
                tracing::trace!(controller = controller_path, "no controller layout");
            }
            Err(err) => return Err(err),
        }

        let Some(fallback) = self.default_layout.as_deref() else {
            return Ok(None);
        };

        match self.find_named(view_paths, fallback, formats) {
            Ok(layout) => Ok(Some(layout)),
            Err(err) if err.is_missing_template() => {
                tracing::trace!(layout = fallback, "no fallback layout");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}

/// Renders `layout` around `body`.
///
/// The layout sees `assigns` plus the body under [`LAYOUT_CONTENT_KEY`]; the
/// body wins over an assign of the same name.
pub fn wrap(
    engine: &dyn TemplateEngine,
    layout: &ResolvedTemplate,
    assigns: &Map<String, Value>,
    body: &str,
) -> Result<String, RenderError> {
    let mut context = assigns.clone();
    context.insert(LAYOUT_CONTENT_KEY.to_string(), Value::String(body.to_string()));
    engine.render(layout, &Value::Object(context))
}
