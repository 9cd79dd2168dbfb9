use thiserror::Error;

use crate::api::{ErrorDetail, ErrorResponse};

/// All possible errors raised while handling a mail send
#[derive(Debug, Error)]
pub enum Error {
    /// Request was understood but is invalid
    #[error("{}", .0.message)]
    BadRequest(ErrorDetail),

    /// Message could not be assembled from a valid request
    #[error("{}", .0.message)]
    Internal(ErrorDetail),

    /// Body is not a JSON mail send request
    #[error("could not decode request: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("SMTP: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("config: {0}")]
    Config(String),
}

impl Error {
    pub fn bad_request(message: impl Into<String>, field: impl Into<String>, anchor: &str) -> Self {
        Self::BadRequest(ErrorDetail::field(message, field, anchor))
    }

    pub fn internal(message: impl Into<String>, field: impl Into<String>, anchor: &str) -> Self {
        Self::Internal(ErrorDetail::field(message, field, anchor))
    }

    /// HTTP status code reported to the caller
    pub fn status(&self) -> u16 {
        match self {
            Error::BadRequest(_) | Error::Decode(_) => 400,
            Error::Internal(_) | Error::Smtp(_) | Error::Config(_) => 500,
        }
    }

    /// API-shaped body for this error.
    ///
    /// Decode failures deliberately hide the parser message, matching the
    /// bare "Bad Request" the hosted API answers with.
    pub fn to_response(&self) -> ErrorResponse {
        let detail = match self {
            Error::BadRequest(detail) | Error::Internal(detail) => detail.clone(),
            Error::Decode(_) => ErrorDetail::message("Bad Request"),
            Error::Smtp(e) => ErrorDetail::message(e.to_string()),
            Error::Config(msg) => ErrorDetail::message(msg.clone()),
        };

        ErrorResponse::single(detail)
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bad_request_maps_to_400_with_field() {
        let err = Error::bad_request("nope", "content", "message.content");
        assert_eq!(err.status(), 400);
        assert_eq!(err.to_string(), "nope");

        let resp = err.to_response();
        assert_eq!(resp.errors.len(), 1);
        assert_eq!(resp.errors[0].field.as_deref(), Some("content"));
    }

    #[test]
    fn decode_error_hides_parser_message() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert_eq!(err.status(), 400);

        let resp = err.to_response();
        assert_eq!(resp.errors[0].message, "Bad Request");
        assert_eq!(resp.errors[0].field, None);
    }

    #[test]
    fn internal_maps_to_500() {
        let err = Error::internal("boom", "attachments.0.content", "message.attachments.content");
        assert_eq!(err.status(), 500);
        assert_eq!(err.to_response().errors[0].message, "boom");
    }
}
