//! The response object returned from a dispatch.

use serde::Serialize;

/// What a dispatch produces.
///
/// `body` stays `None` when neither the action nor a render set it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Response {
    /// The response body.
    pub body: Option<String>,
    /// Content type derived from the rendered template's format, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl Response {
    /// Creates an empty response.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the body, if set.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Returns the body, or `""` when unset.
    pub fn body_or_empty(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }

    /// Returns true if no body was set.
    pub fn is_empty(&self) -> bool {
        self.body.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_response() {
        let response = Response::new();
        assert!(response.is_empty());
        assert_eq!(response.body(), None);
        assert_eq!(response.body_or_empty(), "");
    }

    #[test]
    fn test_response_serializes_as_mapping() {
        let response = Response {
            body: Some("Hello world".into()),
            content_type: None,
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"body": "Hello world"})
        );
    }
}
