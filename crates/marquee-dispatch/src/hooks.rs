//! Callbacks around action execution.
//!
//! Hooks let a controller class run shared code around every action without
//! touching the actions themselves.
//!
//! # Pipeline Position
//!
//! ```text
//! fresh controller instance
//!   → BEFORE-ACTION HOOKS ← (setup, guards; may halt)
//!   → action (or action_missing)
//!   → AFTER-ACTION HOOKS ← (inspect or amend instance state)
//!   → RESPONSE HOOKS ← (transform the finished response)
//! ```
//!
//! A before-action hook halts the chain by returning an error, or by setting
//! the response body: once a body is present the action itself is skipped,
//! though the remaining hooks still run.

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::response::Response;

/// The phase at which a hook error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookPhase {
    /// Error occurred before the action ran
    BeforeAction,
    /// Error occurred after the action ran
    AfterAction,
    /// Error occurred while transforming the response
    Response,
}

impl fmt::Display for HookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookPhase::BeforeAction => write!(f, "before-action"),
            HookPhase::AfterAction => write!(f, "after-action"),
            HookPhase::Response => write!(f, "response"),
        }
    }
}

/// Error returned by a hook.
#[derive(Debug, Error)]
#[error("hook error ({phase}): {message}")]
pub struct HookError {
    /// Human-readable error message
    pub message: String,
    /// The hook phase where the error occurred
    pub phase: HookPhase,
    /// The underlying error source, if any
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl HookError {
    /// Creates a new hook error for the before-action phase.
    pub fn before_action(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            phase: HookPhase::BeforeAction,
            source: None,
        }
    }

    /// Creates a new hook error for the after-action phase.
    pub fn after_action(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            phase: HookPhase::AfterAction,
            source: None,
        }
    }

    /// Creates a new hook error for the response phase.
    pub fn response(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            phase: HookPhase::Response,
            source: None,
        }
    }

    /// Sets the source error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        self.source = Some(source.into());
        self
    }
}

/// Hook run before the action. Receives the action name and the instance.
pub type BeforeActionFn<C> = Arc<dyn Fn(&str, &mut C) -> Result<(), HookError> + Send + Sync>;

/// Hook run after the action. Receives the action name and the instance.
pub type AfterActionFn<C> = Arc<dyn Fn(&str, &mut C) -> Result<(), HookError> + Send + Sync>;

/// Hook run on the finished response.
pub type ResponseFn = Arc<dyn Fn(&str, Response) -> Result<Response, HookError> + Send + Sync>;

/// Per-class hook configuration.
///
/// Hooks are executed in registration order.
pub struct Hooks<C> {
    before_action: Vec<BeforeActionFn<C>>,
    after_action: Vec<AfterActionFn<C>>,
    response: Vec<ResponseFn>,
}

impl<C> Default for Hooks<C> {
    fn default() -> Self {
        Self {
            before_action: Vec::new(),
            after_action: Vec::new(),
            response: Vec::new(),
        }
    }
}

impl<C> Clone for Hooks<C> {
    fn clone(&self) -> Self {
        Self {
            before_action: self.before_action.clone(),
            after_action: self.after_action.clone(),
            response: self.response.clone(),
        }
    }
}

impl<C> Hooks<C> {
    /// Creates a new empty hooks configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.before_action.is_empty() && self.after_action.is_empty() && self.response.is_empty()
    }

    /// Adds a before-action hook.
    ///
    /// # Example
    ///
    /// ```rust
    /// use marquee_dispatch::{Controller, ControllerState, HookError, Hooks};
    ///
    /// #[derive(Default)]
    /// struct Admin { state: ControllerState }
    ///
    /// impl Controller for Admin {
    ///     const NAME: &'static str = "Admin";
    ///     fn state(&self) -> &ControllerState { &self.state }
    ///     fn state_mut(&mut self) -> &mut ControllerState { &mut self.state }
    /// }
    ///
    /// let hooks = Hooks::<Admin>::new().before_action(|action, _admin| {
    ///     if action == "destroy" {
    ///         return Err(HookError::before_action("not allowed"));
    ///     }
    ///     Ok(())
    /// });
    /// # assert!(!hooks.is_empty());
    /// ```
    pub fn before_action<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &mut C) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.before_action.push(Arc::new(f));
        self
    }

    /// Adds an after-action hook.
    pub fn after_action<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &mut C) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.after_action.push(Arc::new(f));
        self
    }

    /// Adds a response hook.
    pub fn response<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, Response) -> Result<Response, HookError> + Send + Sync + 'static,
    {
        self.response.push(Arc::new(f));
        self
    }

    /// Runs all before-action hooks.
    pub fn run_before_action(&self, action: &str, controller: &mut C) -> Result<(), HookError> {
        for hook in &self.before_action {
            hook(action, controller)?;
        }
        Ok(())
    }

    /// Runs all after-action hooks.
    pub fn run_after_action(&self, action: &str, controller: &mut C) -> Result<(), HookError> {
        for hook in &self.after_action {
            hook(action, controller)?;
        }
        Ok(())
    }

    /// Runs all response hooks, chaining transformations.
    pub fn run_response(&self, action: &str, response: Response) -> Result<Response, HookError> {
        let mut current = response;
        for hook in &self.response {
            current = hook(action, current)?;
        }
        Ok(current)
    }
}

impl<C> fmt::Debug for Hooks<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("before_action_count", &self.before_action.len())
            .field("after_action_count", &self.after_action.len())
            .field("response_count", &self.response.len())
            .finish()
    }
}
