//! Per-controller view settings.
//!
//! [`Views`] bundles everything a controller type needs to render: its view
//! paths, optional layout support, default formats and the engine. A
//! controller type builds its `Views` once, typically in a
//! `once_cell::sync::Lazy`, and a subtype starts from its parent's with
//! [`Views::inherit`].
//!
//! ```rust
//! use marquee_render::{Layouts, TemplateQuery, ViewRoot, Views};
//! use once_cell::sync::Lazy;
//!
//! static BASE: Lazy<Views> = Lazy::new(|| {
//!     Views::new().append_view_path(ViewRoot::embedded(&[("index.jinja", "Hello")]))
//! });
//!
//! static WITH_LAYOUTS: Lazy<Views> = Lazy::new(|| {
//!     BASE.inherit()
//!         .append_view_path(ViewRoot::embedded(&[(
//!             "layouts/application.jinja",
//!             "[{{ content }}]",
//!         )]))
//!         .with_layouts(Layouts::new())
//! });
//!
//! assert!(BASE.layouts().is_none());
//! assert_eq!(WITH_LAYOUTS.view_paths().len(), 2);
//! ```

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::config::ViewConfig;
use crate::error::RenderError;
use crate::layout::{self, Layouts};
use crate::template::{
    default_engine, ResolvedTemplate, TemplateEngine, TemplateQuery, ViewPaths, ViewRoot,
};

/// View settings shared by every instance of a controller type.
#[derive(Clone)]
pub struct Views {
    view_paths: ViewPaths,
    layouts: Option<Layouts>,
    default_formats: Vec<String>,
    engine: Arc<dyn TemplateEngine>,
}

impl Default for Views {
    fn default() -> Self {
        Self {
            view_paths: ViewPaths::new(),
            layouts: None,
            default_formats: Vec::new(),
            engine: default_engine(),
        }
    }
}

impl fmt::Debug for Views {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Views")
            .field("view_paths", &self.view_paths)
            .field("layouts", &self.layouts)
            .field("default_formats", &self.default_formats)
            .finish_non_exhaustive()
    }
}

impl Views {
    /// No view paths, no layouts, the shared default engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds views from configuration, resolving relative paths against `base`.
    pub fn from_config(config: &ViewConfig, base: impl AsRef<Path>) -> Self {
        Self {
            view_paths: config.view_paths(base),
            layouts: Some(config.layouts()),
            default_formats: config.default_formats.clone(),
            engine: default_engine(),
        }
    }

    /// Copies these settings for a subtype.
    pub fn inherit(&self) -> Self {
        Self {
            view_paths: self.view_paths.inherit(),
            ..self.clone()
        }
    }

    /// Adds a root searched after the existing ones.
    pub fn append_view_path(mut self, root: impl Into<ViewRoot>) -> Self {
        self.view_paths = self.view_paths.append(root);
        self
    }

    /// Adds a root searched before the existing ones.
    pub fn prepend_view_path(mut self, root: impl Into<ViewRoot>) -> Self {
        self.view_paths = self.view_paths.prepend(root);
        self
    }

    /// Enables layout support.
    pub fn with_layouts(mut self, layouts: Layouts) -> Self {
        self.layouts = Some(layouts);
        self
    }

    /// Disables layout support.
    pub fn without_layouts(mut self) -> Self {
        self.layouts = None;
        self
    }

    /// Sets the formats used when neither the controller nor the render names any.
    pub fn with_default_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_formats = formats.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the engine.
    pub fn with_engine(mut self, engine: Arc<dyn TemplateEngine>) -> Self {
        self.engine = engine;
        self
    }

    /// Roots searched for templates, in order.
    pub fn view_paths(&self) -> &ViewPaths {
        &self.view_paths
    }

    /// Layout support, if enabled.
    pub fn layouts(&self) -> Option<&Layouts> {
        self.layouts.as_ref()
    }

    /// Formats requested when nothing else names any.
    pub fn default_formats(&self) -> &[String] {
        &self.default_formats
    }

    /// Engine that renders templates and layouts.
    pub fn engine(&self) -> &dyn TemplateEngine {
        self.engine.as_ref()
    }

    /// Resolves a template against the view paths.
    pub fn find_template(&self, query: &TemplateQuery) -> Result<ResolvedTemplate, RenderError> {
        self.view_paths.find_template(query)
    }

    /// Renders a resolved template with `assigns` as its context.
    pub fn render_template(
        &self,
        template: &ResolvedTemplate,
        assigns: &Map<String, Value>,
    ) -> Result<String, RenderError> {
        self.engine
            .render(template, &Value::Object(assigns.clone()))
    }

    /// Runs the implicit layout chain for `controller_path`.
    ///
    /// Returns `Ok(None)` when layouts are disabled or none exists.
    pub fn find_layout(
        &self,
        controller_path: &str,
        formats: &[String],
    ) -> Result<Option<ResolvedTemplate>, RenderError> {
        match &self.layouts {
            Some(layouts) => layouts.find(&self.view_paths, controller_path, formats),
            None => Ok(None),
        }
    }

    /// Finds a layout requested by name. Works without layout support enabled,
    /// using the default namespace.
    pub fn find_named_layout(
        &self,
        name: &str,
        formats: &[String],
    ) -> Result<ResolvedTemplate, RenderError> {
        match &self.layouts {
            Some(layouts) => layouts.find_named(&self.view_paths, name, formats),
            None => Layouts::new().find_named(&self.view_paths, name, formats),
        }
    }

    /// Renders `layout` around `body`.
    pub fn wrap(
        &self,
        layout: &ResolvedTemplate,
        assigns: &Map<String, Value>,
        body: &str,
    ) -> Result<String, RenderError> {
        layout::wrap(self.engine(), layout, assigns, body)
    }
}

/// MIME type for a template format, if known.
pub fn content_type_for(format: &str) -> Option<&'static str> {
    match format {
        "html" => Some("text/html"),
        "json" => Some("application/json"),
        "xml" => Some("application/xml"),
        "text" | "txt" => Some("text/plain"),
        "yaml" | "yml" => Some("application/yaml"),
        "csv" => Some("text/csv"),
        "js" => Some("text/javascript"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::MiniJinjaEngine;

    fn fixture_root() -> ViewRoot {
        ViewRoot::embedded(&[
            ("index.jinja", "Hello from index"),
            ("me4/index.jinja", "Hello from me4/index"),
            ("layouts/me4.jinja", "Me4 Enter : {{ content }} : Exit"),
            ("layouts/application.jinja", "Application Enter : {{ content }} : Exit"),
        ])
    }

    #[test]
    fn test_find_layout_requires_layout_support() {
        let plain = Views::new().append_view_path(fixture_root());
        assert_eq!(plain.find_layout("me4", &[]).unwrap(), None);

        let with_layouts = plain.inherit().with_layouts(Layouts::new());
        let found = with_layouts.find_layout("me4", &[]).unwrap().unwrap();
        assert_eq!(found.identifier(), "layouts/me4.jinja");
    }

    #[test]
    fn test_named_layout_without_support() {
        let views = Views::new().append_view_path(fixture_root());
        let found = views.find_named_layout("application", &[]).unwrap();
        assert_eq!(found.identifier(), "layouts/application.jinja");
    }

    #[test]
    fn test_render_and_wrap() {
        let views = Views::new()
            .append_view_path(fixture_root())
            .with_layouts(Layouts::new());
        let template = views
            .find_template(&TemplateQuery::new("index").prefix("me4"))
            .unwrap();
        let assigns = Map::new();
        let body = views.render_template(&template, &assigns).unwrap();
        let layout = views.find_layout("me4", &[]).unwrap().unwrap();
        let wrapped = views.wrap(&layout, &assigns, &body).unwrap();
        assert_eq!(wrapped, "Me4 Enter : Hello from me4/index : Exit");
    }

    #[test]
    fn test_inherit_keeps_parent_untouched() {
        let parent = Views::new()
            .append_view_path(fixture_root())
            .with_default_formats(["html"]);
        let child = parent
            .inherit()
            .append_view_path(ViewRoot::embedded(&[("extra.jinja", "extra")]));
        assert_eq!(parent.view_paths().len(), 1);
        assert_eq!(child.view_paths().len(), 2);
        assert_eq!(child.default_formats(), ["html"]);
    }

    #[test]
    fn test_custom_engine() {
        let mut engine = MiniJinjaEngine::new();
        engine
            .environment_mut()
            .add_filter("shout", |v: String| v.to_uppercase());
        let views = Views::new()
            .append_view_path(ViewRoot::embedded(&[("loud.jinja", "{{ word | shout }}")]))
            .with_engine(Arc::new(engine));
        let template = views.find_template(&TemplateQuery::new("loud")).unwrap();
        let mut assigns = Map::new();
        assigns.insert("word".into(), Value::String("hey".into()));
        assert_eq!(views.render_template(&template, &assigns).unwrap(), "HEY");
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("html"), Some("text/html"));
        assert_eq!(content_type_for("json"), Some("application/json"));
        assert_eq!(content_type_for("unknown"), None);
    }

    #[test]
    fn test_views_are_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Views>();
    }
}
