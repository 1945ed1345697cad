//! Template resolution and evaluation.
//!
//! Resolution and evaluation are separate steps:
//!
//! 1. A [`TemplateQuery`] names what to look for (name, prefix, formats,
//!    partial) and [`ViewPaths`] turns it into a [`ResolvedTemplate`].
//! 2. A [`TemplateEngine`] turns the resolved template plus a JSON context
//!    into text.
//!
//! Supported extensions: `.jinja`, `.jinja2`, `.j2`, `.txt` (in priority order).
//!
//! ```rust
//! use marquee_render::{MiniJinjaEngine, TemplateEngine, TemplateQuery, ViewPaths, ViewRoot};
//! use serde_json::json;
//!
//! let views = ViewPaths::new().append(ViewRoot::embedded(&[
//!     ("action_with_ivars.jinja", "{{ my_ivar }} from index_with_ivars"),
//! ]));
//! let template = views
//!     .find_template(&TemplateQuery::new("action_with_ivars"))
//!     .unwrap();
//!
//! let engine = MiniJinjaEngine::new();
//! let out = engine.render(&template, &json!({"my_ivar": "Hello"})).unwrap();
//! assert_eq!(out, "Hello from index_with_ivars");
//! ```

mod engine;
mod query;
mod view_paths;

pub use engine::{default_engine, MiniJinjaEngine, TemplateEngine};
pub use query::{TemplateQuery, TEMPLATE_EXTENSIONS};
pub use view_paths::{is_template_file, ResolvedTemplate, TemplateSource, ViewPaths, ViewRoot};
