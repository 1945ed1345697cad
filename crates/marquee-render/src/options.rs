//! Render options.
//!
//! A render call is configured either with a bare template name or with a
//! [`RenderOptions`] value:
//!
//! ```rust
//! use marquee_render::{Layout, RenderOptions};
//!
//! let named: RenderOptions = "index".into();
//! assert_eq!(named.template.as_deref(), Some("index"));
//!
//! let custom = RenderOptions::new()
//!     .prefix("admin/posts")
//!     .formats(["html"])
//!     .layout("admin");
//! assert_eq!(custom.layout, Layout::Named("admin".into()));
//! ```

use crate::error::RenderError;
use crate::layout::Layout;
use crate::template::TemplateQuery;

/// Options for a single render call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Explicit template name; the current action name is used when absent.
    pub template: Option<String>,
    /// Namespace override; the controller's prefix is used when absent.
    pub prefix: Option<String>,
    /// Layout request.
    pub layout: Layout,
    /// Format override; the controller's formats are used when absent.
    pub formats: Option<Vec<String>>,
    /// Render a partial (`_name`). Partials never get a layout.
    pub partial: bool,
}

impl RenderOptions {
    /// Options for a "naked" render: action-named template, default layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the template name.
    pub fn template(mut self, name: impl Into<String>) -> Self {
        self.template = Some(name.into());
        self
    }

    /// Sets the namespace prefix.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Sets the layout request.
    pub fn layout(mut self, layout: impl Into<Layout>) -> Self {
        self.layout = layout.into();
        self
    }

    /// Renders without a layout.
    pub fn without_layout(self) -> Self {
        self.layout(Layout::Disabled)
    }

    /// Overrides the requested formats.
    pub fn formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.formats = Some(formats.into_iter().map(Into::into).collect());
        self
    }

    /// Marks the render as a partial.
    pub fn partial(mut self, partial: bool) -> Self {
        self.partial = partial;
        self
    }

    /// Builds the lookup query.
    ///
    /// `action_name`, `default_prefix` and `default_formats` fill in whatever
    /// the options leave unset.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::OperationError`] when neither a template name nor
    /// an action name is available.
    pub fn to_query(
        &self,
        action_name: Option<&str>,
        default_prefix: Option<String>,
        default_formats: &[String],
    ) -> Result<TemplateQuery, RenderError> {
        let name = self
            .template
            .as_deref()
            .or(action_name)
            .ok_or_else(|| {
                RenderError::OperationError(
                    "render needs a template name outside of an action".to_string(),
                )
            })?;

        let formats = self.formats.as_deref().unwrap_or(default_formats);

        Ok(TemplateQuery::new(name)
            .maybe_prefix(self.prefix.clone().or(default_prefix))
            .formats(formats.iter().cloned())
            .partial(self.partial))
    }

    /// Whether this render should go through layout resolution at all.
    pub fn wants_layout(&self) -> bool {
        !self.partial && self.layout != Layout::Disabled
    }
}

impl From<&str> for RenderOptions {
    fn from(name: &str) -> Self {
        RenderOptions::new().template(name)
    }
}

impl From<String> for RenderOptions {
    fn from(name: String) -> Self {
        RenderOptions::new().template(name)
    }
}

impl From<&String> for RenderOptions {
    fn from(name: &String) -> Self {
        RenderOptions::new().template(name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naked_uses_action_name() {
        let query = RenderOptions::new()
            .to_query(Some("naked_render"), None, &[])
            .unwrap();
        assert_eq!(query.path(), "naked_render");
    }

    #[test]
    fn test_explicit_name_wins() {
        let query = RenderOptions::from("index.jinja")
            .to_query(Some("other"), None, &[])
            .unwrap();
        assert_eq!(query.name(), "index.jinja");
        assert!(query.has_extension());
    }

    #[test]
    fn test_prefix_override_and_default() {
        let defaulted = RenderOptions::new()
            .to_query(Some("index"), Some("me3".into()), &[])
            .unwrap();
        assert_eq!(defaulted.path(), "me3/index");

        let overridden = RenderOptions::new()
            .prefix("admin")
            .to_query(Some("index"), Some("me3".into()), &[])
            .unwrap();
        assert_eq!(overridden.path(), "admin/index");
    }

    #[test]
    fn test_formats_override() {
        let defaults = vec!["html".to_string()];
        let query = RenderOptions::new()
            .formats(["json"])
            .to_query(Some("show"), None, &defaults)
            .unwrap();
        assert_eq!(query.requested_formats(), ["json"]);

        let query = RenderOptions::new()
            .to_query(Some("show"), None, &defaults)
            .unwrap();
        assert_eq!(query.requested_formats(), ["html"]);
    }

    #[test]
    fn test_no_name_available() {
        let err = RenderOptions::new().to_query(None, None, &[]).unwrap_err();
        assert!(matches!(err, RenderError::OperationError(_)));
    }

    #[test]
    fn test_wants_layout() {
        assert!(RenderOptions::new().wants_layout());
        assert!(!RenderOptions::new().without_layout().wants_layout());
        assert!(!RenderOptions::new().partial(true).wants_layout());
        assert!(RenderOptions::new().layout("admin").wants_layout());
    }
}
