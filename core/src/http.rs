//! HTTP transport types shared by the blocking and non-blocking clients.
//!
//! # Design
//! Requests and responses are plain data. `QueryBuilder` produces an
//! `HttpRequest` without touching the network; the clients execute it and
//! convert whatever their HTTP library returned into an `HttpResponse`
//! before an endpoint formatter interprets it. Both clients therefore feed
//! formatters identical values for identical wire responses.

use crate::endpoint::Endpoint;
use crate::error::QueryError;

/// A fully built GET request against the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub endpoint: Endpoint,
    /// Absolute URL including the percent-encoded query string.
    pub url: String,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    /// URL the response was obtained from.
    pub url: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// The body decoded as UTF-8.
    pub fn text(&self) -> Result<&str, QueryError> {
        std::str::from_utf8(&self.body)
            .map_err(|e| QueryError::Format(format!("response body is not UTF-8: {e}")))
    }

    /// Map non-success status codes to `QueryError::HttpStatus`, keeping the
    /// service's explanation from the body.
    pub fn error_for_status(self) -> Result<Self, QueryError> {
        if self.is_success() {
            return Ok(self);
        }
        Err(QueryError::HttpStatus {
            status: self.status,
            body: String::from_utf8_lossy(&self.body).into_owned(),
        })
    }

    pub(crate) fn from_ureq(
        url: &str,
        mut response: ureq::http::Response<ureq::Body>,
    ) -> Result<Self, QueryError> {
        let status = response.status().as_u16();
        let headers = collect_headers(response.headers());
        let body = response.body_mut().read_to_vec()?;
        Ok(HttpResponse {
            status,
            headers,
            body,
            url: url.to_string(),
        })
    }

    pub(crate) async fn from_reqwest(response: reqwest::Response) -> Result<Self, QueryError> {
        let status = response.status().as_u16();
        let headers = collect_headers(response.headers());
        let url = response.url().to_string();
        let body = response.bytes().await?.to_vec();
        Ok(HttpResponse {
            status,
            headers,
            body,
            url,
        })
    }
}

fn collect_headers<'a, I>(headers: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (&'a ureq::http::HeaderName, &'a ureq::http::HeaderValue)>,
{
    headers
        .into_iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect()
}
