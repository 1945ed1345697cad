//! Action dispatch for abstract controllers.
//!
//! `marquee-dispatch` resolves an action name against a controller type and
//! runs it on a fresh controller instance, returning the response the action
//! built. It knows nothing about templates: rendering is added on top by the
//! `marquee` crate.
//!
//! # Features
//!
//! - **Controllers**: plain structs implementing [`Controller`], created per dispatch
//! - **Action resolution**: registered actions filtered by an overridable
//!   [`respond_to_action`](Controller::respond_to_action) predicate
//! - **Fallback**: an optional `action_missing` handler per class
//! - **Hooks**: before-action, after-action and response callbacks
//! - **Runtime lookup**: [`Dispatcher`] keyed by controller path
//!
//! # Usage
//!
//! ```rust
//! use marquee_dispatch::{Controller, ControllerClass, ControllerState};
//!
//! #[derive(Default)]
//! struct Greeter { state: ControllerState }
//!
//! impl Controller for Greeter {
//!     const NAME: &'static str = "GreeterController";
//!     fn state(&self) -> &ControllerState { &self.state }
//!     fn state_mut(&mut self) -> &mut ControllerState { &mut self.state }
//! }
//!
//! let class = ControllerClass::<Greeter>::builder()
//!     .action("index", |g: &mut Greeter| g.set_response_body("Hello world"))
//!     .action_missing(|g: &mut Greeter, _name: &str| g.set_response_body("fallback"))
//!     .build();
//!
//! assert_eq!(class.process("index").unwrap().body(), Some("Hello world"));
//! assert_eq!(class.process("ohai").unwrap().body(), Some("fallback"));
//! ```

mod controller;
mod dispatch;
mod error;
mod handler;
mod hooks;
mod response;

pub use controller::{controller_path, underscore, Controller, ControllerState};

pub use dispatch::{ControllerClass, ControllerClassBuilder, Dispatch, Dispatcher};

pub use error::DispatchError;

pub use handler::{Action, ActionMissingFn, ActionResult, FnAction, IntoActionResult};

pub use hooks::{AfterActionFn, BeforeActionFn, HookError, HookPhase, Hooks, ResponseFn};

pub use response::Response;
