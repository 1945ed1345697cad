//! Action resolution and dispatch.
//!
//! A [`ControllerClass`] is the class-level description of a controller type:
//! which actions it exposes, its optional `action_missing` handler and its
//! hooks. It is built once and then shared read-only; every
//! [`process`](ControllerClass::process) call works on a fresh instance, so
//! concurrent dispatches need no synchronization.
//!
//! [`Dispatcher`] groups type-erased classes by controller path for callers
//! that pick the controller at runtime.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::controller::Controller;
use crate::error::DispatchError;
use crate::handler::{action_missing_fn, Action, ActionMissingFn, FnAction, IntoActionResult};
use crate::hooks::Hooks;
use crate::response::Response;

/// Class-level description of a controller type.
///
/// # Example
///
/// ```rust
/// use marquee_dispatch::{Controller, ControllerClass, ControllerState};
///
/// #[derive(Default)]
/// struct Me { state: ControllerState }
///
/// impl Controller for Me {
///     const NAME: &'static str = "Me";
///     fn state(&self) -> &ControllerState { &self.state }
///     fn state_mut(&mut self) -> &mut ControllerState { &mut self.state }
/// }
///
/// impl Me {
///     fn index(&mut self) -> anyhow::Result<&'static str> {
///         self.set_response_body("Hello world");
///         Ok("Something else")
///     }
/// }
///
/// let class = ControllerClass::<Me>::builder().action("index", Me::index).build();
/// let response = class.process("index").unwrap();
/// assert_eq!(response.body(), Some("Hello world"));
/// ```
pub struct ControllerClass<C: Controller> {
    actions: HashMap<String, Arc<dyn Action<C>>>,
    action_missing: Option<ActionMissingFn<C>>,
    hooks: Hooks<C>,
}

/// What the resolver picked for a requested action name.
enum Resolved<'a, C> {
    Action(&'a Arc<dyn Action<C>>),
    Missing(&'a ActionMissingFn<C>),
}

impl<C: Controller> ControllerClass<C> {
    /// Starts building a controller class.
    pub fn builder() -> ControllerClassBuilder<C> {
        ControllerClassBuilder::new()
    }

    /// The controller type name.
    pub fn name(&self) -> &'static str {
        C::NAME
    }

    /// Returns true if an action with this name is registered.
    pub fn has_action(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Registered action names, sorted.
    pub fn action_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.actions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns true if an `action_missing` handler is declared.
    pub fn has_action_missing(&self) -> bool {
        self.action_missing.is_some()
    }

    /// The class hooks.
    pub fn hooks(&self) -> &Hooks<C> {
        &self.hooks
    }

    /// Whether `action` may be dispatched on `controller`.
    ///
    /// True when the action is registered and the controller's
    /// [`respond_to_action`](Controller::respond_to_action) predicate accepts it.
    pub fn is_dispatchable(&self, controller: &C, action: &str) -> bool {
        self.has_action(action) && controller.respond_to_action(action)
    }

    fn resolve(&self, controller: &C, action: &str) -> Option<Resolved<'_, C>> {
        if self.is_dispatchable(controller, action) {
            return self.actions.get(action).map(Resolved::Action);
        }
        self.action_missing.as_ref().map(Resolved::Missing)
    }

    /// Dispatches `action` on a fresh controller instance.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::ActionNotFound`] if the action is not dispatchable and
    ///   no `action_missing` handler is declared
    /// - [`DispatchError::Hook`] if a hook fails
    /// - [`DispatchError::Action`] if the action itself fails
    pub fn process(&self, action: &str) -> Result<Response, DispatchError> {
        self.process_with(action, |_| {})
    }

    /// Like [`process`](Self::process), but lets the caller prepare the fresh
    /// instance first (for example to set the requested formats).
    pub fn process_with<F>(&self, action: &str, setup: F) -> Result<Response, DispatchError>
    where
        F: FnOnce(&mut C),
    {
        let span = tracing::debug_span!("process", controller = C::NAME, action);
        let _guard = span.enter();

        let mut controller = C::default();
        controller.state_mut().set_action_name(action);
        setup(&mut controller);

        let Some(resolved) = self.resolve(&controller, action) else {
            tracing::debug!("action not found");
            return Err(DispatchError::ActionNotFound {
                controller: C::NAME.to_string(),
                action: action.to_string(),
            });
        };

        if let Err(err) = self.hooks.run_before_action(action, &mut controller) {
            tracing::warn!(error = %err, "before-action hook halted dispatch");
            return Err(err.into());
        }

        if controller.state().performed() {
            tracing::debug!("response set by hook, skipping action");
        } else {
            let result = match resolved {
                Resolved::Action(handler) => handler.call(&mut controller),
                Resolved::Missing(handler) => {
                    tracing::debug!("dispatching to action_missing");
                    handler(&mut controller, action)
                }
            };
            result.map_err(|source| DispatchError::Action {
                action: action.to_string(),
                source,
            })?;
        }

        self.hooks.run_after_action(action, &mut controller)?;

        let response = std::mem::take(controller.state_mut()).into_response();
        let response = self.hooks.run_response(action, response)?;
        tracing::debug!(has_body = response.body.is_some(), "processed");
        Ok(response)
    }
}

impl<C: Controller> fmt::Debug for ControllerClass<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerClass")
            .field("name", &C::NAME)
            .field("actions", &self.action_names())
            .field("action_missing", &self.action_missing.is_some())
            .field("hooks", &self.hooks)
            .finish()
    }
}

/// Builder for [`ControllerClass`].
pub struct ControllerClassBuilder<C: Controller> {
    actions: HashMap<String, Arc<dyn Action<C>>>,
    action_missing: Option<ActionMissingFn<C>>,
    hooks: Hooks<C>,
}

impl<C: Controller> Default for ControllerClassBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Controller> ControllerClassBuilder<C> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            actions: HashMap::new(),
            action_missing: None,
            hooks: Hooks::new(),
        }
    }

    /// Registers an action function under `name`.
    ///
    /// Registering the same name twice replaces the earlier action.
    pub fn action<F, R>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut C) -> R + Send + Sync + 'static,
        R: IntoActionResult + 'static,
    {
        self.action_handler(name, FnAction::new(f))
    }

    /// Registers an [`Action`] implementation under `name`.
    pub fn action_handler<A>(mut self, name: impl Into<String>, action: A) -> Self
    where
        A: Action<C> + 'static,
    {
        self.actions.insert(name.into(), Arc::new(action));
        self
    }

    /// Declares the handler used when a requested action is not dispatchable.
    pub fn action_missing<F, R>(mut self, f: F) -> Self
    where
        F: Fn(&mut C, &str) -> R + Send + Sync + 'static,
        R: IntoActionResult + 'static,
    {
        self.action_missing = Some(action_missing_fn(f));
        self
    }

    /// Sets the hooks for this class.
    pub fn hooks(mut self, hooks: Hooks<C>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Finishes the class.
    pub fn build(self) -> ControllerClass<C> {
        ControllerClass {
            actions: self.actions,
            action_missing: self.action_missing,
            hooks: self.hooks,
        }
    }
}

/// Type-erased dispatch over a controller class.
pub trait Dispatch: Send + Sync {
    /// The controller type name.
    fn controller_name(&self) -> &'static str;

    /// The controller path the class is registered under.
    fn controller_path(&self) -> String;

    /// Dispatches `action` on a fresh instance.
    fn process(&self, action: &str) -> Result<Response, DispatchError>;
}

impl<C: Controller> Dispatch for ControllerClass<C> {
    fn controller_name(&self) -> &'static str {
        C::NAME
    }

    fn controller_path(&self) -> String {
        C::controller_path()
    }

    fn process(&self, action: &str) -> Result<Response, DispatchError> {
        ControllerClass::process(self, action)
    }
}

/// Controller classes keyed by controller path.
#[derive(Default)]
pub struct Dispatcher {
    controllers: HashMap<String, Arc<dyn Dispatch>>,
}

impl Dispatcher {
    /// Creates an empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a controller class under its controller path.
    ///
    /// A class registered under an existing path replaces the earlier one.
    pub fn controller<D: Dispatch + 'static>(mut self, class: D) -> Self {
        let path = class.controller_path();
        if self.controllers.contains_key(&path) {
            tracing::warn!(path = %path, "replacing registered controller");
        }
        self.controllers.insert(path, Arc::new(class));
        self
    }

    /// Looks up a registered controller class.
    pub fn get(&self, controller_path: &str) -> Option<&Arc<dyn Dispatch>> {
        self.controllers.get(controller_path)
    }

    /// Registered controller paths, sorted.
    pub fn controller_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.controllers.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    /// Dispatches `action` on the controller registered under `controller_path`.
    pub fn process(&self, controller_path: &str, action: &str) -> Result<Response, DispatchError> {
        let class = self
            .get(controller_path)
            .ok_or_else(|| DispatchError::ControllerNotFound(controller_path.to_string()))?;
        class.process(action)
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("controllers", &self.controller_paths())
            .finish()
    }
}
