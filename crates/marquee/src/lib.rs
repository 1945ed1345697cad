//! # Marquee - Abstract Controllers
//!
//! Marquee is the minimal controller layer underneath a web framework:
//! action dispatch, template lookup, rendering and layouts, with no HTTP in
//! sight. It provides:
//!
//! - Controllers as plain structs, instantiated once per dispatch
//! - Action resolution with an `action_missing` fallback
//! - Before-action, after-action and response hooks
//! - Templates resolved from ordered view paths, with format variants
//! - Layouts: `layouts/<controller>`, falling back to `layouts/application`
//!
//! ## Core Concepts
//!
//! - [`Controller`]: Per-dispatch state (response, action name, formats, assigns)
//! - [`ControllerClass`]: The registered actions of a controller type
//! - [`Rendering`]: Adds `render` and `render_to_string` to a controller
//! - [`Views`]: View paths, layout support and engine for a controller type
//! - [`Dispatcher`]: Controller classes keyed by controller path
//!
//! ## Quick Start
//!
//! ```rust
//! use marquee::prelude::*;
//! use once_cell::sync::Lazy;
//!
//! static VIEWS: Lazy<Views> = Lazy::new(|| {
//!     Views::new()
//!         .append_view_path(ViewRoot::embedded(&[
//!             ("me4/index.jinja", "Hello from {{ who }}"),
//!             ("layouts/application.jinja", "Application Enter : {{ content }} : Exit"),
//!         ]))
//!         .with_layouts(Layouts::new())
//! });
//!
//! #[derive(Default)]
//! struct Me4 { state: ControllerState }
//!
//! impl Controller for Me4 {
//!     const NAME: &'static str = "Me4";
//!     fn state(&self) -> &ControllerState { &self.state }
//!     fn state_mut(&mut self) -> &mut ControllerState { &mut self.state }
//! }
//!
//! impl Rendering for Me4 {
//!     fn views(&self) -> &Views { &VIEWS }
//!     fn prefix(&self) -> Option<String> { Some(Self::controller_path()) }
//! }
//!
//! let class = ControllerClass::<Me4>::builder()
//!     .action("index", |c: &mut Me4| {
//!         c.assign("who", "me4/index");
//!         c.render(RenderOptions::new())
//!     })
//!     .build();
//!
//! let response = class.process("index").unwrap();
//! assert_eq!(
//!     response.body(),
//!     Some("Application Enter : Hello from me4/index : Exit")
//! );
//! ```
//!
//! ## Crates
//!
//! - `marquee-dispatch`: controllers, action resolution, hooks
//! - `marquee-render`: view paths, template engine, layouts, configuration
//!
//! Both are re-exported here.

pub mod prelude;
mod rendering;

pub use rendering::{Rendered, Rendering};

// Dispatch exports
pub use marquee_dispatch::{
    controller_path, underscore, Action, ActionMissingFn, ActionResult, AfterActionFn,
    BeforeActionFn, Controller, ControllerClass, ControllerClassBuilder, ControllerState, Dispatch,
    DispatchError, Dispatcher, FnAction, HookError, HookPhase, Hooks, IntoActionResult, Response,
    ResponseFn,
};

// Render exports
pub use marquee_render::template;
pub use marquee_render::{
    content_type_for, default_engine, is_template_file, Layout, LayoutOutcome, Layouts,
    MiniJinjaEngine, RenderError, RenderOptions, ResolvedTemplate, TemplateEngine, TemplateQuery,
    TemplateSource, ViewConfig, ViewPaths, ViewRoot, Views, DEFAULT_LAYOUT,
    DEFAULT_LAYOUT_NAMESPACE, LAYOUT_CONTENT_KEY, TEMPLATE_EXTENSIONS,
};
