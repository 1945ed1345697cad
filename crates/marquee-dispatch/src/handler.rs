//! Action handler types.
//!
//! An action is a function over a controller instance: it mutates the
//! controller (setting the body, assigning values, rendering) and reports
//! success or failure. What it returns on success is ignored; only its side
//! effects on the instance reach the response.
//!
//! # Core Types
//!
//! - [`Action`]: Trait for action handlers (`&self`, shared across threads)
//! - [`FnAction`]: Wraps a plain function or closure as an [`Action`]
//! - [`ActionResult`]: The normalized result of running an action
//! - [`IntoActionResult`]: What an action fn may return

use std::marker::PhantomData;
use std::sync::Arc;

/// The normalized result of running an action.
pub type ActionResult = Result<(), anyhow::Error>;

/// Handler invoked when the requested action is not dispatchable.
///
/// Receives the controller and the requested action name.
pub type ActionMissingFn<C> = Arc<dyn Fn(&mut C, &str) -> ActionResult + Send + Sync>;

/// Trait for types that can be converted into an [`ActionResult`].
///
/// Lets action functions return `()`, `anyhow::Result<T>`, or any
/// `Result<T, E>` whose error converts into `anyhow::Error`. Success values
/// are discarded.
///
/// # Example
///
/// ```rust
/// use marquee_dispatch::IntoActionResult;
///
/// fn returns_a_value() -> anyhow::Result<&'static str> {
///     Ok("Something else")
/// }
///
/// assert!(returns_a_value().into_action_result().is_ok());
/// assert!(().into_action_result().is_ok());
/// ```
pub trait IntoActionResult {
    /// Convert this type into an [`ActionResult`].
    fn into_action_result(self) -> ActionResult;
}

impl IntoActionResult for () {
    fn into_action_result(self) -> ActionResult {
        Ok(())
    }
}

impl<T, E> IntoActionResult for Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn into_action_result(self) -> ActionResult {
        self.map(|_| ()).map_err(Into::into)
    }
}

/// Trait for action handlers.
///
/// Handlers take `&self` so that one registered action can serve concurrent
/// dispatches; all per-request state lives on the controller instance.
pub trait Action<C>: Send + Sync {
    /// Runs the action against a controller instance.
    fn call(&self, controller: &mut C) -> ActionResult;
}

/// A wrapper that implements [`Action`] for `Fn(&mut C) -> R` functions.
///
/// # Example
///
/// ```rust
/// use marquee_dispatch::{Action, Controller, ControllerState, FnAction};
///
/// #[derive(Default)]
/// struct Home { state: ControllerState }
///
/// impl Controller for Home {
///     const NAME: &'static str = "Home";
///     fn state(&self) -> &ControllerState { &self.state }
///     fn state_mut(&mut self) -> &mut ControllerState { &mut self.state }
/// }
///
/// let action = FnAction::new(|c: &mut Home| c.set_response_body("hi"));
/// let mut home = Home::default();
/// action.call(&mut home).unwrap();
/// assert_eq!(home.state().response_body(), Some("hi"));
/// ```
pub struct FnAction<F, R> {
    f: F,
    _phantom: PhantomData<fn() -> R>,
}

impl<F, R> FnAction<F, R> {
    /// Creates a new FnAction wrapping the given function.
    pub fn new(f: F) -> Self {
        Self {
            f,
            _phantom: PhantomData,
        }
    }
}

impl<C, F, R> Action<C> for FnAction<F, R>
where
    F: Fn(&mut C) -> R + Send + Sync,
    R: IntoActionResult,
{
    fn call(&self, controller: &mut C) -> ActionResult {
        (self.f)(controller).into_action_result()
    }
}

/// Wraps an `action_missing` function, normalizing its return type.
pub(crate) fn action_missing_fn<C, F, R>(f: F) -> ActionMissingFn<C>
where
    F: Fn(&mut C, &str) -> R + Send + Sync + 'static,
    R: IntoActionResult,
{
    Arc::new(move |controller, name| f(controller, name).into_action_result())
}
