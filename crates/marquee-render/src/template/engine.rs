//! Template engine abstraction.
//!
//! This module defines the [`TemplateEngine`] trait, the seam between
//! template resolution (which file) and template evaluation (what text).
//! The default implementation is [`MiniJinjaEngine`].

use minijinja::{AutoEscape, Environment, Value};
use once_cell::sync::Lazy;
use std::sync::Arc;

use super::view_paths::ResolvedTemplate;
use crate::error::RenderError;

/// A template engine that can render templates with data.
///
/// Engines receive already-resolved template source plus a JSON context and
/// own everything about expression syntax. Implementations must be safe to
/// share between threads: one engine serves every concurrent render.
pub trait TemplateEngine: Send + Sync {
    /// Renders `source` with `context`. `name` is used for diagnostics.
    fn render_str(
        &self,
        name: &str,
        source: &str,
        context: &serde_json::Value,
    ) -> Result<String, RenderError>;

    /// Renders a resolved template, reading its content first.
    fn render(
        &self,
        template: &ResolvedTemplate,
        context: &serde_json::Value,
    ) -> Result<String, RenderError> {
        let source = template.content()?;
        self.render_str(template.identifier(), &source, context)
    }
}

/// MiniJinja-based template engine.
///
/// Auto-escaping is off for every template: controller output is not
/// necessarily HTML, and a layout must embed its already-rendered body
/// verbatim. Templates escape explicitly with `{{ value | escape }}`.
///
/// # Example
///
/// ```rust
/// use marquee_render::{MiniJinjaEngine, TemplateEngine};
/// use serde_json::json;
///
/// let engine = MiniJinjaEngine::new();
/// let output = engine
///     .render_str("greeting", "Hello, {{ name }}!", &json!({"name": "World"}))
///     .unwrap();
/// assert_eq!(output, "Hello, World!");
/// ```
pub struct MiniJinjaEngine {
    env: Environment<'static>,
}

impl MiniJinjaEngine {
    /// Creates a new MiniJinja engine.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_name| AutoEscape::None);
        Self { env }
    }

    /// Returns a reference to the underlying MiniJinja environment.
    pub fn environment(&self) -> &Environment<'static> {
        &self.env
    }

    /// Returns a mutable reference to the underlying MiniJinja environment.
    ///
    /// This allows registering custom filters or functions before the engine
    /// is shared.
    pub fn environment_mut(&mut self) -> &mut Environment<'static> {
        &mut self.env
    }
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn render_str(
        &self,
        name: &str,
        source: &str,
        context: &serde_json::Value,
    ) -> Result<String, RenderError> {
        let value = Value::from_serialize(context);
        Ok(self.env.render_named_str(name, source, value)?)
    }
}

static DEFAULT_ENGINE: Lazy<Arc<MiniJinjaEngine>> = Lazy::new(|| Arc::new(MiniJinjaEngine::new()));

/// The process-wide default engine.
pub fn default_engine() -> Arc<dyn TemplateEngine> {
    DEFAULT_ENGINE.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minijinja_engine_simple() {
        let engine = MiniJinjaEngine::new();
        let output = engine
            .render_str("t", "Hello, {{ name }}!", &json!({"name": "World"}))
            .unwrap();
        assert_eq!(output, "Hello, World!");
    }

    #[test]
    fn test_minijinja_engine_with_loop() {
        let engine = MiniJinjaEngine::new();
        let output = engine
            .render_str(
                "t",
                "{% for item in items %}{{ item }},{% endfor %}",
                &json!({"items": ["a", "b", "c"]}),
            )
            .unwrap();
        assert_eq!(output, "a,b,c,");
    }

    #[test]
    fn test_no_auto_escape_even_for_html_names() {
        let engine = MiniJinjaEngine::new();
        let output = engine
            .render_str("layout.html", "{{ content }}", &json!({"content": "<p>hi</p>"}))
            .unwrap();
        assert_eq!(output, "<p>hi</p>");
    }

    #[test]
    fn test_explicit_escape_filter() {
        let engine = MiniJinjaEngine::new();
        let output = engine
            .render_str("t", "{{ v | escape }}", &json!({"v": "<b>"}))
            .unwrap();
        assert_eq!(output, "&lt;b&gt;");
    }

    #[test]
    fn test_render_resolved_template() {
        let engine = MiniJinjaEngine::new();
        let template = ResolvedTemplate::inline("index.jinja", "{{ my_ivar }} from index");
        let output = engine.render(&template, &json!({"my_ivar": "Hello"})).unwrap();
        assert_eq!(output, "Hello from index");
    }

    #[test]
    fn test_template_error() {
        let engine = MiniJinjaEngine::new();
        let result = engine.render_str("broken", "{{ unclosed", &serde_json::Value::Null);
        assert!(matches!(result, Err(RenderError::TemplateError(_))));
    }

    #[test]
    fn test_custom_filter_via_environment() {
        let mut engine = MiniJinjaEngine::new();
        engine
            .environment_mut()
            .add_filter("shout", |v: String| format!("{}!", v.to_uppercase()));
        let output = engine
            .render_str("t", "{{ word | shout }}", &json!({"word": "hey"}))
            .unwrap();
        assert_eq!(output, "HEY!");
    }
}
