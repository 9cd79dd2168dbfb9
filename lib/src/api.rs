//! Response bodies shared between the library and the HTTP server.
//!
//! These mirror the error envelope of the v3 mail send API so that client
//! libraries parse them the same way they would a real response.

use serde::{Deserialize, Serialize};

/// Base URL of the error reference that `help` links point into.
pub const HELP_BASE: &str = "http://sendgrid.com/docs/API_Reference/Web_API_v3/Mail/errors.html";

/// JSON body returned by `/v3/mail/send`.
///
/// An empty `errors` list together with a success status means the request
/// was accepted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub errors: Vec<ErrorDetail>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
    pub field: Option<String>,
    pub help: Option<String>,
}

impl ErrorResponse {
    pub fn accepted() -> Self {
        Default::default()
    }

    pub fn single(detail: ErrorDetail) -> Self {
        Self {
            errors: vec![detail],
        }
    }
}

impl ErrorDetail {
    /// Detail pointing at a request field, with a help anchor into the
    /// error reference.
    pub fn field(message: impl Into<String>, field: impl Into<String>, anchor: &str) -> Self {
        Self {
            message: message.into(),
            field: Some(field.into()),
            help: Some(format!("{}#{}", HELP_BASE, anchor)),
        }
    }

    /// Detail that is not tied to any field
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: None,
            help: None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn accepted_serializes_empty_list() {
        let body = serde_json::to_string(&ErrorResponse::accepted()).unwrap();
        assert_eq!(body, r#"{"errors":[]}"#);
    }

    #[test]
    fn missing_field_and_help_are_null() {
        let body = ErrorResponse::single(ErrorDetail::message("Bad Request"));
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["errors"][0]["message"], "Bad Request");
        assert!(value["errors"][0]["field"].is_null());
        assert!(value["errors"][0]["help"].is_null());
    }

    #[test]
    fn field_detail_links_help_anchor() {
        let detail = ErrorDetail::field("x", "subject", "message.subject");
        assert_eq!(detail.field.as_deref(), Some("subject"));
        assert_eq!(
            detail.help.as_deref(),
            Some("http://sendgrid.com/docs/API_Reference/Web_API_v3/Mail/errors.html#message.subject")
        );
    }
}
