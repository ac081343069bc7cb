//! Error types for the query client.
//!
//! # Design
//! Programming errors (`TypeConflict`, `UnsupportedVersion`) and caller
//! errors (`ParameterConflict`) are detected before any request is sent.
//! Transport errors keep the underlying `ureq` / `reqwest` error as their
//! source so callers can downcast. Everything is returned at the point of
//! detection; nothing is logged and swallowed.

use std::convert::Infallible;

use thiserror::Error;

/// Errors returned by `Client`, `AsyncClient` and the request builder.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The endpoint handed to the low-level dispatcher is not a known one.
    #[error("unrecognized endpoint `{0}`")]
    TypeConflict(String),

    /// The endpoint declares an API version missing from the version table.
    #[error("unknown API version '{0}'")]
    UnsupportedVersion(u8),

    /// A caller parameter collides with a fixed, credential or continuation
    /// parameter. The request is never sent.
    #[error("parameter `{0}` is already set by the endpoint")]
    ParameterConflict(String),

    /// Connection, DNS, TLS or timeout failure from the HTTP layer.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The service answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The service reported an error inside an otherwise successful response.
    #[error("service error: {message}")]
    Api { message: String },

    /// The response body could not be interpreted by the endpoint formatter.
    #[error("could not format response: {0}")]
    Format(String),

    /// The client could not be configured (bad origin URL, missing credential).
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<ureq::Error> for QueryError {
    fn from(err: ureq::Error) -> Self {
        QueryError::Transport(Box::new(err))
    }
}

impl From<reqwest::Error> for QueryError {
    fn from(err: reqwest::Error) -> Self {
        QueryError::Transport(Box::new(err))
    }
}

impl From<serde_json::Error> for QueryError {
    fn from(err: serde_json::Error) -> Self {
        QueryError::Format(err.to_string())
    }
}

// Lets `Endpoint` itself satisfy `TryInto<Endpoint>` in the dispatcher bounds.
impl From<Infallible> for QueryError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn parameter_conflict_names_the_key() {
        let err = QueryError::ParameterConflict("output".to_string());
        assert_eq!(err.to_string(), "parameter `output` is already set by the endpoint");
    }

    #[test]
    fn http_status_includes_status_and_body() {
        let err = QueryError::HttpStatus {
            status: 501,
            body: "No short answer available".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 501: No short answer available");
    }

    #[test]
    fn serde_errors_become_format_failures() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: QueryError = json_err.into();
        assert!(matches!(err, QueryError::Format(_)));
    }

    #[test]
    fn transport_error_keeps_its_source() {
        let reqwest_err = reqwest::Client::new().get("not a url").build().unwrap_err();
        let err: QueryError = reqwest_err.into();
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("transport error"));
    }
}
