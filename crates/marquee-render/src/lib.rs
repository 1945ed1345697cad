//! # Marquee Render - Template Lookup and Layouts
//!
//! `marquee-render` resolves controller templates from an ordered list of
//! view paths, renders them with a pluggable engine, and wraps the result in
//! layouts.
//!
//! This crate is the view layer of the `marquee` controller framework, but it
//! has no dependency on controllers and can be used on its own.
//!
//! ## Core Concepts
//!
//! - [`ViewPaths`]: Ordered roots (directories or embedded sets) searched for templates
//! - [`TemplateQuery`]: Name, prefix, formats and partial flag of a lookup
//! - [`ResolvedTemplate`]: The template that won, with its format and source
//! - [`TemplateEngine`]: Turns a resolved template and a JSON context into text
//! - [`Layouts`]: The `layouts/<controller>` then `layouts/application` chain
//! - [`Views`]: All of the above, bundled per controller type
//!
//! ## Quick Start
//!
//! ```rust
//! use marquee_render::{Layouts, TemplateQuery, ViewRoot, Views};
//! use serde_json::{json, Map};
//!
//! let views = Views::new()
//!     .append_view_path(ViewRoot::embedded(&[
//!         ("me4/index.jinja", "Hello from me4/index"),
//!         ("layouts/me4.jinja", "Me4 Enter : {{ content }} : Exit"),
//!     ]))
//!     .with_layouts(Layouts::new());
//!
//! let template = views
//!     .find_template(&TemplateQuery::new("index").prefix("me4"))
//!     .unwrap();
//! let assigns = Map::new();
//! let body = views.render_template(&template, &assigns).unwrap();
//!
//! let layout = views.find_layout("me4", &[]).unwrap().unwrap();
//! let output = views.wrap(&layout, &assigns, &body).unwrap();
//! assert_eq!(output, "Me4 Enter : Hello from me4/index : Exit");
//! ```
//!
//! ## File Naming
//!
//! Templates are named `<prefix>/<name>.<format><ext>`. The format segment is
//! optional, and a format-specific file is preferred over the formatless one
//! when the format is requested. Partials start with `_`. Layouts live under
//! `layouts/`.

mod config;
mod error;
mod layout;
mod options;
pub mod template;
mod views;

pub use config::ViewConfig;
pub use error::RenderError;
pub use layout::{
    wrap, Layout, LayoutOutcome, Layouts, DEFAULT_LAYOUT, DEFAULT_LAYOUT_NAMESPACE,
    LAYOUT_CONTENT_KEY,
};
pub use options::RenderOptions;
pub use template::{
    default_engine, is_template_file, MiniJinjaEngine, ResolvedTemplate, TemplateEngine,
    TemplateQuery, TemplateSource, ViewPaths, ViewRoot, TEMPLATE_EXTENSIONS,
};
pub use views::{content_type_for, Views};
