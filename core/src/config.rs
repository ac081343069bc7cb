//! Client configuration.
//!
//! # Environment Variables
//!
//! [`ClientBuilder::from_env`] reads the credential from `WOLFRAM_APPID` and
//! an optional origin override from `WOLFRAM_BASE_URL`.

use crate::async_client::AsyncClient;
use crate::blocking::Client;
use crate::client::QueryBuilder;
use crate::error::QueryError;

pub const APPID_ENV: &str = "WOLFRAM_APPID";
pub const BASE_URL_ENV: &str = "WOLFRAM_BASE_URL";

/// Builder for [`Client`] and [`AsyncClient`].
///
/// # Examples
///
/// ```
/// use wolfram_core::ClientBuilder;
///
/// let client = ClientBuilder::new("DEMO")
///     .base_url("http://localhost:3000")
///     .build()
///     .expect("valid origin");
/// assert_eq!(client.appid(), "DEMO");
/// ```
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    appid: String,
    base_url: Option<String>,
}

impl ClientBuilder {
    pub fn new(appid: impl Into<String>) -> Self {
        Self {
            appid: appid.into(),
            base_url: None,
        }
    }

    pub fn from_env() -> Result<Self, QueryError> {
        let appid = std::env::var(APPID_ENV)
            .map_err(|_| QueryError::Config(format!("{APPID_ENV} is not set")))?;
        Ok(Self {
            appid,
            base_url: std::env::var(BASE_URL_ENV).ok(),
        })
    }

    /// Send queries to another origin, e.g. a local mock of the service.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn build(self) -> Result<Client, QueryError> {
        self.query_builder().map(Client::from)
    }

    pub fn build_async(self) -> Result<AsyncClient, QueryError> {
        self.query_builder().map(AsyncClient::from)
    }

    fn query_builder(self) -> Result<QueryBuilder, QueryError> {
        match self.base_url {
            Some(url) => QueryBuilder::with_base_url(self.appid, &url),
            None => Ok(QueryBuilder::new(self.appid)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_public_origin() {
        let client = ClientBuilder::new("DEMO").build().unwrap();
        assert_eq!(client.query_builder().base_url(), "https://api.wolframalpha.com/");
    }

    #[test]
    fn base_url_override_applies_to_both_clients() {
        let blocking = ClientBuilder::new("DEMO")
            .base_url("http://localhost:3000")
            .build()
            .unwrap();
        let non_blocking = ClientBuilder::new("DEMO")
            .base_url("http://localhost:3000")
            .build_async()
            .unwrap();
        assert_eq!(blocking.query_builder().base_url(), "http://localhost:3000/");
        assert_eq!(
            non_blocking.query_builder().base_url(),
            blocking.query_builder().base_url()
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = ClientBuilder::new("DEMO").base_url("::nope::").build();
        assert!(matches!(result, Err(QueryError::Config(_))));
    }

    // Both environment cases live in one test so they cannot race each other.
    #[test]
    fn from_env_reads_credential_and_origin() {
        std::env::remove_var(APPID_ENV);
        std::env::remove_var(BASE_URL_ENV);
        assert!(matches!(ClientBuilder::from_env(), Err(QueryError::Config(_))));

        std::env::set_var(APPID_ENV, "ENV-APPID");
        std::env::set_var(BASE_URL_ENV, "http://127.0.0.1:4000");
        let client = ClientBuilder::from_env().unwrap().build().unwrap();
        assert_eq!(client.appid(), "ENV-APPID");
        assert_eq!(client.query_builder().base_url(), "http://127.0.0.1:4000/");

        std::env::remove_var(APPID_ENV);
        std::env::remove_var(BASE_URL_ENV);
    }
}
