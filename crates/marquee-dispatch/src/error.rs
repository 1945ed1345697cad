//! Dispatch errors.

use thiserror::Error;

use crate::hooks::HookError;

/// Errors surfaced by [`ControllerClass::process`](crate::ControllerClass::process).
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The action is not dispatchable and the class declares no `action_missing` handler.
    #[error("the action '{action}' could not be found for {controller}")]
    ActionNotFound {
        /// Controller type name
        controller: String,
        /// Requested action
        action: String,
    },

    /// No controller is registered under the requested path.
    #[error("no controller registered under '{0}'")]
    ControllerNotFound(String),

    /// A hook aborted the dispatch.
    #[error(transparent)]
    Hook(#[from] HookError),

    /// The action (or `action_missing` handler) returned an error.
    #[error("action '{action}' failed: {source}")]
    Action {
        /// The action that failed
        action: String,
        /// The error the action returned
        #[source]
        source: anyhow::Error,
    },
}

impl DispatchError {
    /// Returns true for [`DispatchError::ActionNotFound`].
    pub fn is_action_not_found(&self) -> bool {
        matches!(self, DispatchError::ActionNotFound { .. })
    }

    /// Attempts to view the error an action failed with as a concrete type.
    ///
    /// ```rust
    /// use marquee_dispatch::DispatchError;
    ///
    /// let err = DispatchError::Action {
    ///     action: "index".into(),
    ///     source: anyhow::Error::new(std::io::Error::other("gone")),
    /// };
    /// assert!(err.downcast_ref::<std::io::Error>().is_some());
    /// ```
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: std::fmt::Display + std::fmt::Debug + Send + Sync + 'static,
    {
        match self {
            DispatchError::Action { source, .. } => source.downcast_ref::<E>(),
            _ => None,
        }
    }
}
