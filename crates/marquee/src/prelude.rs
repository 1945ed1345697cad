//! Commonly used types, for glob import.
//!
//! ```rust
//! use marquee::prelude::*;
//!
//! let options = RenderOptions::new().layout(Layout::Disabled);
//! assert!(!options.wants_layout());
//! ```

pub use crate::{
    Controller, ControllerClass, ControllerState, DispatchError, Dispatcher, HookError, Hooks,
    Layout, Layouts, RenderError, RenderOptions, Rendering, Response, ViewConfig, ViewPaths,
    ViewRoot, Views,
};
