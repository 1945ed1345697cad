//! Controller instances and their per-request state.
//!
//! A controller type is a plain Rust struct that implements [`Controller`].
//! The framework creates a fresh instance (via `Default`) for every dispatch,
//! so anything stored on the struct lives exactly as long as one request.
//!
//! The state the framework itself cares about (the response, the action being
//! processed, the requested formats and the values exposed to templates) lives
//! in [`ControllerState`], which the controller embeds and hands out through
//! [`Controller::state`] and [`Controller::state_mut`].

use serde::Serialize;
use serde_json::{Map, Value};

use crate::response::Response;

/// Per-request state owned by a controller instance.
#[derive(Debug, Clone, Default)]
pub struct ControllerState {
    response: Response,
    action_name: Option<String>,
    formats: Vec<String>,
    assigns: Map<String, Value>,
}

impl ControllerState {
    /// Creates empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// The response being built.
    pub fn response(&self) -> &Response {
        &self.response
    }

    /// Mutable access to the response being built.
    pub fn response_mut(&mut self) -> &mut Response {
        &mut self.response
    }

    /// Consumes the state, yielding the response.
    pub fn into_response(self) -> Response {
        self.response
    }

    /// The response body, if one has been set.
    pub fn response_body(&self) -> Option<&str> {
        self.response.body.as_deref()
    }

    /// Sets the response body, replacing any previous one.
    pub fn set_response_body(&mut self, body: impl Into<String>) {
        self.response.body = Some(body.into());
    }

    /// Returns true once a response body has been set.
    pub fn performed(&self) -> bool {
        self.response.body.is_some()
    }

    /// The action currently being processed.
    pub fn action_name(&self) -> Option<&str> {
        self.action_name.as_deref()
    }

    /// Records the action being processed.
    pub fn set_action_name(&mut self, name: impl Into<String>) {
        self.action_name = Some(name.into());
    }

    /// Requested formats, in order of preference.
    pub fn formats(&self) -> &[String] {
        &self.formats
    }

    /// Replaces the requested formats.
    pub fn set_formats<I, S>(&mut self, formats: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.formats = formats.into_iter().map(Into::into).collect();
    }

    /// Values exposed to templates.
    pub fn assigns(&self) -> &Map<String, Value> {
        &self.assigns
    }

    /// Exposes a value to templates under `key`.
    pub fn assign(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.assigns.insert(key.into(), value.into());
    }

    /// Exposes any serializable value to templates under `key`.
    pub fn assign_serialized<T: Serialize>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(value)?;
        self.assigns.insert(key.into(), value);
        Ok(())
    }
}

/// A controller type.
///
/// Implementors embed a [`ControllerState`] and expose it through
/// [`state`](Self::state)/[`state_mut`](Self::state_mut). Actions are
/// registered separately on a [`ControllerClass`](crate::ControllerClass).
///
/// # Example
///
/// ```rust
/// use marquee_dispatch::{Controller, ControllerState};
///
/// #[derive(Default)]
/// struct Posts {
///     state: ControllerState,
/// }
///
/// impl Controller for Posts {
///     const NAME: &'static str = "Admin::PostsController";
///
///     fn state(&self) -> &ControllerState { &self.state }
///     fn state_mut(&mut self) -> &mut ControllerState { &mut self.state }
/// }
///
/// assert_eq!(Posts::controller_path(), "admin/posts");
/// ```
pub trait Controller: Default + 'static {
    /// Type name, `::`-separated for namespaces (e.g. `"Admin::PostsController"`).
    const NAME: &'static str;

    /// Shared access to the framework state.
    fn state(&self) -> &ControllerState;

    /// Mutable access to the framework state.
    fn state_mut(&mut self) -> &mut ControllerState;

    /// Whether `action_name` may be dispatched on this controller.
    ///
    /// Only consulted for registered actions. Override to hide actions.
    fn respond_to_action(&self, action_name: &str) -> bool {
        let _ = action_name;
        true
    }

    /// Underscored path for this controller, used for template prefixes and
    /// layout names.
    fn controller_path() -> String {
        controller_path(Self::NAME)
    }

    /// Shorthand for setting the response body.
    fn set_response_body(&mut self, body: impl Into<String>) {
        self.state_mut().set_response_body(body);
    }

    /// Shorthand for [`ControllerState::assign`].
    fn assign(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.state_mut().assign(key, value);
    }

    /// Shorthand for [`ControllerState::set_formats`].
    fn set_formats<I, S>(&mut self, formats: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state_mut().set_formats(formats);
    }
}

/// Derives a controller path from a type name.
///
/// A trailing `Controller` is dropped, then the name is underscored:
/// `"Admin::UsersController"` becomes `"admin/users"`.
pub fn controller_path(name: &str) -> String {
    let trimmed = name.strip_suffix("Controller").unwrap_or(name);
    underscore(if trimmed.is_empty() { name } else { trimmed })
}

/// Converts a `CamelCase` (optionally `::`-namespaced) name to `snake_case`
/// path segments.
///
/// Runs of capitals are kept together (`"HTMLParser"` becomes `"html_parser"`).
pub fn underscore(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);

    for (i, segment) in name.split("::").enumerate() {
        if i > 0 {
            out.push('/');
        }
        let chars: Vec<char> = segment.chars().collect();
        for (j, &c) in chars.iter().enumerate() {
            if c.is_uppercase() {
                if j > 0 {
                    let prev = chars[j - 1];
                    let next_is_lower = chars.get(j + 1).is_some_and(|n| n.is_lowercase());
                    if prev.is_lowercase()
                        || prev.is_ascii_digit()
                        || (prev.is_uppercase() && next_is_lower)
                    {
                        out.push('_');
                    }
                }
                out.extend(c.to_lowercase());
            } else if c == '-' {
                out.push('_');
            } else {
                out.push(c);
            }
        }
    }

    out
}
