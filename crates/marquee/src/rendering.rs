//! The rendering capability for controllers.
//!
//! A controller gains `render` by implementing [`Rendering`], which only asks
//! for the type's [`Views`]. Everything else has a default that a controller
//! may override:
//!
//! | Hook | Default |
//! |------|---------|
//! | [`prefix`](Rendering::prefix) | no prefix (templates at the view root) |
//! | [`engine`](Rendering::engine) | the engine configured on the views |
//! | [`layouts`](Rendering::layouts) | the layout support configured on the views |
//! | [`layout`](Rendering::layout) | `layouts/<controller_path>`, then `layouts/application` |
//!
//! ## Render Flow
//!
//! 1. Build the lookup from the options, falling back to the action name,
//!    [`prefix`](Rendering::prefix) and the controller's formats.
//! 2. Resolve the template against the view paths and render it with the
//!    controller's assigns.
//! 3. Wrap the body in a layout when one is requested and found.
//!
//! [`render`](Rendering::render) stores the result as the response body;
//! [`render_to_string`](Rendering::render_to_string) only returns it.

use marquee_dispatch::Controller;
use marquee_render::{
    content_type_for, wrap, Layout, LayoutOutcome, Layouts, RenderError, RenderOptions,
    ResolvedTemplate, TemplateEngine, Views,
};

/// The result of a render, before it is stored anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Final text, layout applied.
    pub body: String,
    /// Identifier of the template that produced the body.
    pub template: String,
    /// Format of that template, if its file name carries one.
    pub format: Option<String>,
    /// What happened with the layout.
    pub layout: LayoutOutcome,
}

impl Rendered {
    /// MIME type implied by the template's format.
    pub fn content_type(&self) -> Option<&'static str> {
        self.format.as_deref().and_then(content_type_for)
    }
}

/// Template rendering for a controller type.
///
/// # Example
///
/// ```rust
/// use marquee::{
///     Controller, ControllerClass, ControllerState, RenderOptions, Rendering, ViewRoot, Views,
/// };
/// use once_cell::sync::Lazy;
///
/// static VIEWS: Lazy<Views> = Lazy::new(|| {
///     Views::new().append_view_path(ViewRoot::embedded(&[
///         ("naked_render.jinja", "Hello from naked_render.jinja"),
///     ]))
/// });
///
/// #[derive(Default)]
/// struct Me2 { state: ControllerState }
///
/// impl Controller for Me2 {
///     const NAME: &'static str = "Me2";
///     fn state(&self) -> &ControllerState { &self.state }
///     fn state_mut(&mut self) -> &mut ControllerState { &mut self.state }
/// }
///
/// impl Rendering for Me2 {
///     fn views(&self) -> &Views { &VIEWS }
/// }
///
/// let class = ControllerClass::<Me2>::builder()
///     .action("naked_render", |c: &mut Me2| c.render(RenderOptions::new()))
///     .build();
/// let response = class.process("naked_render").unwrap();
/// assert_eq!(response.body(), Some("Hello from naked_render.jinja"));
/// ```
pub trait Rendering: Controller {
    /// View settings for this controller type.
    fn views(&self) -> &Views;

    /// Namespace prepended to template names.
    fn prefix(&self) -> Option<String> {
        None
    }

    /// Engine used for the template and its layout.
    fn engine(&self) -> &dyn TemplateEngine {
        self.views().engine()
    }

    /// Layout support; `None` means only explicitly named layouts apply.
    fn layouts(&self) -> Option<&Layouts> {
        self.views().layouts()
    }

    /// The implicit layout for this render.
    ///
    /// A missing layout is not an error here; it returns `Ok(None)`.
    fn layout(&self, formats: &[String]) -> Result<Option<ResolvedTemplate>, RenderError> {
        match self.layouts() {
            Some(layouts) => {
                layouts.find(self.views().view_paths(), &Self::controller_path(), formats)
            }
            None => Ok(None),
        }
    }

    /// Renders and reports how the body was produced. Has no side effects.
    fn render_detailed(&self, options: impl Into<RenderOptions>) -> Result<Rendered, RenderError> {
        let options = options.into();
        let state = self.state();

        let formats = if state.formats().is_empty() {
            self.views().default_formats()
        } else {
            state.formats()
        };
        let query = options.to_query(state.action_name(), self.prefix(), formats)?;
        let template = self.views().find_template(&query)?;

        let assigns = state.assigns();
        let engine = self.engine();
        let body = engine.render(&template, &serde_json::Value::Object(assigns.clone()))?;

        let layout_formats: Vec<String> = match template.format() {
            Some(format) => vec![format.to_string()],
            None => query.requested_formats().to_vec(),
        };

        let layout = if !options.wants_layout() {
            None
        } else {
            match &options.layout {
                Layout::Named(name) => Some(self.views().find_named_layout(name, &layout_formats)?),
                Layout::Default => self.layout(&layout_formats)?,
                Layout::Disabled => None,
            }
        };

        let (body, outcome) = match layout {
            Some(layout) => {
                tracing::debug!(template = %template.identifier(), layout = %layout.identifier(), "wrapped in layout");
                let wrapped = wrap(engine, &layout, assigns, &body)?;
                (wrapped, LayoutOutcome::Wrapped(layout.identifier().to_string()))
            }
            None if options.wants_layout() && self.layouts().is_some() => {
                tracing::debug!(template = %template.identifier(), "no layout found");
                (body, LayoutOutcome::Unwrapped)
            }
            None => (body, LayoutOutcome::NotRequested),
        };

        Ok(Rendered {
            body,
            template: template.identifier().to_string(),
            format: template.format().map(str::to_string),
            layout: outcome,
        })
    }

    /// Renders and returns the text without touching the response.
    fn render_to_string(&self, options: impl Into<RenderOptions>) -> Result<String, RenderError> {
        self.render_detailed(options).map(|rendered| rendered.body)
    }

    /// Renders into the response body.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::DoubleRender`] if the body is already set, and
    /// otherwise whatever resolution or rendering fails with.
    fn render(&mut self, options: impl Into<RenderOptions>) -> Result<(), RenderError> {
        if self.state().performed() {
            return Err(RenderError::DoubleRender);
        }
        let rendered = self.render_detailed(options)?;
        let content_type = rendered.content_type();
        let response = self.state_mut().response_mut();
        response.body = Some(rendered.body);
        if let Some(content_type) = content_type {
            response.content_type = Some(content_type.to_string());
        }
        Ok(())
    }
}
